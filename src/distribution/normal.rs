//! Normal(0.5, sd) abilities.

use super::*;

/// Abilities drawn from a Normal distribution centred at [`NORMAL_MEAN`].
///
/// Uses the truncated first moment `E[a; a >= x] = mu (1 - F(x)) + sd^2 f(x)`
/// for both groups. Every inverse-CDF argument is clamped into `[0, 1]` first,
/// since rounding near the budget boundary can push it slightly out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    gaussian: Gaussian,
}

impl Normal {
    /// Rejects a non-positive or non-finite `sd`.
    ///
    /// The closed forms treat abilities above 1 like any other, so with a
    /// wide spread and `sigma + tau` near 1 the payoff can exceed `alpha`.
    /// Tables built from such a model fail with [`TableError::Payoff`]
    /// (e.g. `sd = 0.3, sigma = 0.9, tau = 0.1, alpha = 0.05`). Spreads up
    /// to about 0.1 leave that mass negligible.
    pub fn new(sd: Probability) -> Result<Self, ParamError> {
        if sd.is_finite() && sd > 0.0 {
            Ok(Self {
                gaussian: Gaussian::new(NORMAL_MEAN, sd),
            })
        } else {
            Err(ParamError::StandardDeviation(sd))
        }
    }
    pub fn sd(&self) -> Probability {
        self.gaussian.sd()
    }
    fn mu(&self) -> Probability {
        self.gaussian.mean()
    }
    /// `E[a; a >= x]`
    fn upper_moment(&self, x: Probability) -> Probability {
        self.mu() * (1.0 - self.gaussian.cdf(x)) + self.sd().powi(2) * self.gaussian.pdf(x)
    }
}

impl Distribution for Normal {
    fn allowed_actions(
        &self,
        phi_0: Probability,
        sigma: Probability,
        alpha: Probability,
    ) -> (Probability, Probability) {
        if near(phi_0, 0.0) {
            return (0.0, sigma);
        }
        let lo = 1.0 - alpha / phi_0;
        let hi = (1.0 - alpha) / phi_0;
        let lower = match lo <= 0.0 {
            true => 0.0,
            false => (sigma * self.gaussian.quantile(lo)).clamp(0.0, sigma),
        };
        let upper = match hi >= 1.0 {
            true => sigma,
            false => (sigma * self.gaussian.quantile(hi)).clamp(0.0, sigma),
        };
        (lower, upper)
    }

    fn theta_1_from_theta_0(
        &self,
        theta_0: Probability,
        phi_0: Probability,
        sigma: Probability,
        tau: Probability,
        alpha: Probability,
    ) -> Probability {
        if near(phi_0, 1.0) {
            return tau + sigma;
        }
        let p = (1.0 - alpha - phi_0 * self.gaussian.cdf(theta_0 / sigma)) / (1.0 - phi_0);
        sigma * self.gaussian.quantile(p.clamp(0.0, 1.0)) + tau
    }

    fn payoff(
        &self,
        theta_0: Probability,
        phi_0: Probability,
        sigma: Probability,
        tau: Probability,
        alpha: Probability,
    ) -> Utility {
        debug_assert!(theta_0 <= sigma);
        let theta_1 = self.theta_1_from_theta_0(theta_0, phi_0, sigma, tau, alpha);
        let unpriv = phi_0 * sigma * self.upper_moment(theta_0 / sigma);
        let priv_ = if theta_1 > tau + sigma {
            0.0
        } else {
            let x = (theta_1 - tau) / sigma;
            (1.0 - phi_0) * (sigma * self.upper_moment(x) + tau * (1.0 - self.gaussian.cdf(x)))
        };
        unpriv + priv_
    }

    fn phi_0_post(&self, theta_0: Probability, phi_0: Probability, sigma: Probability) -> Probability {
        debug_assert!(theta_0 <= sigma);
        phi_0 - phi_0 * sigma * self.upper_moment(theta_0 / sigma)
    }

    /// Box-Muller.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Probability {
        let u = 1.0 - rng.random::<f64>();
        let v = rng.random::<f64>();
        let z = (-2.0 * u.ln()).sqrt() * (2.0 * std::f64::consts::PI * v).cos();
        self.mu() + self.sd() * z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn rejects_degenerate_spread() {
        assert!(Normal::new(0.0).is_err());
        assert!(Normal::new(-0.1).is_err());
        assert!(Normal::new(f64::NAN).is_err());
        assert!(Normal::new(0.05).is_ok());
    }
    #[test]
    fn allowed_actions_are_ordered_within_sigma() {
        let ref mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..10_000 {
            let normal = Normal::new(rng.random_range(0.01..0.3)).unwrap();
            let sigma = rng.random_range(0.01..=1.0);
            let phi_0 = rng.random_range(0.0..=1.0);
            let alpha = rng.random_range(0.0..=1.0);
            let (lower, upper) = normal.allowed_actions(phi_0, sigma, alpha);
            assert!(0.0 <= lower && lower <= upper && upper <= sigma);
        }
    }
    #[test]
    fn edge_compositions() {
        let normal = Normal::new(0.05).unwrap();
        assert_eq!(normal.allowed_actions(0.0, 0.4, 0.15), (0.0, 0.4));
        for theta_0 in [0.0, 0.2, 0.4] {
            assert_eq!(normal.theta_1_from_theta_0(theta_0, 1.0, 0.4, 0.1, 0.15), 0.5);
        }
    }
    #[test]
    fn theta_1_is_finite_when_budget_overflows() {
        let normal = Normal::new(0.05).unwrap();
        // quantile argument drifts below 0 and above 1 respectively
        let low = normal.theta_1_from_theta_0(0.0, 0.5, 0.4, 0.1, 1.0);
        let high = normal.theta_1_from_theta_0(0.4, 0.5, 0.4, 0.1, 0.0);
        assert!(low.is_finite());
        assert!(high.is_finite());
        assert!(low < high);
    }
    #[test]
    fn payoffs_stay_within_budget() {
        let ref mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..10_000 {
            // abilities above 1 are negligible at this spread and headroom
            let normal = Normal::new(rng.random_range(0.02..0.1)).unwrap();
            let sigma = rng.random_range(0.05..=0.9);
            let tau = rng.random_range(0.0..=0.9 - sigma);
            let phi_0 = rng.random_range(0.0..=1.0);
            let alpha = rng.random_range(0.0..=1.0);
            let (lower, upper) = normal.allowed_actions(phi_0, sigma, alpha);
            let theta_0 = rng.random_range(lower..=upper);
            let payoff = normal.payoff(theta_0, phi_0, sigma, tau, alpha);
            assert!(payoff.is_finite());
            assert!(payoff >= -1e-9, "payoff={payoff}");
            assert!(payoff <= alpha + 1e-6, "payoff={payoff} alpha={alpha}");
        }
    }
    #[test]
    fn successes_leave_the_unprivileged_pool() {
        let normal = Normal::new(0.05).unwrap();
        let (phi_0, sigma) = (0.5, 0.4);
        // nobody clears sigma, everybody clears 0 and succeeds at sigma / 2 on average
        assert!((normal.phi_0_post(sigma, phi_0, sigma) - phi_0).abs() < 1e-12);
        assert!((normal.phi_0_post(0.0, phi_0, sigma) - phi_0 * (1.0 - 0.5 * sigma)).abs() < 1e-12);
        let mut last = 0.0;
        for i in 0..=100 {
            let post = normal.phi_0_post(sigma * i as f64 / 100.0, phi_0, sigma);
            assert!((0.0..=phi_0).contains(&post));
            assert!(post >= last - 1e-15);
            last = post;
        }
    }
    #[test]
    fn batches_match_scalars() {
        let normal = Normal::new(0.1).unwrap();
        let thetas = [0.0, 0.1, 0.2, 0.3, 0.4];
        let payoffs = normal.payoff_batch(&thetas, 0.5, 0.4, 0.1, 0.15);
        let posts = normal.phi_0_post_batch(&thetas, 0.5, 0.4);
        let theta_1s = normal.theta_1_batch(&thetas, 0.5, 0.4, 0.1, 0.15);
        assert_eq!(payoffs.len(), thetas.len());
        for (i, &t) in thetas.iter().enumerate() {
            assert_eq!(payoffs[i], normal.payoff(t, 0.5, 0.4, 0.1, 0.15));
            assert_eq!(posts[i], normal.phi_0_post(t, 0.5, 0.4));
            assert_eq!(theta_1s[i], normal.theta_1_from_theta_0(t, 0.5, 0.4, 0.1, 0.15));
        }
    }
    #[test]
    fn samples_center_on_the_mean() {
        let normal = Normal::new(0.1).unwrap();
        let ref mut rng = SmallRng::seed_from_u64(4);
        let n = 100_000;
        let mean = (0..n).map(|_| normal.sample(rng)).sum::<f64>() / n as f64;
        assert!((mean - NORMAL_MEAN).abs() < 0.002);
    }
}
