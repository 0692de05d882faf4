//! Uniform[0, 1] abilities.

use super::*;

/// Abilities drawn uniformly from `[0, 1]`.
///
/// An unprivileged individual clears `theta_0` with probability
/// `1 - theta_0 / sigma`, and the expected success among those who do is
/// `(sigma + theta_0) / 2`, which gives the quadratic payoffs below.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Uniform;

impl Distribution for Uniform {
    fn allowed_actions(
        &self,
        phi_0: Probability,
        sigma: Probability,
        alpha: Probability,
    ) -> (Probability, Probability) {
        if near(phi_0, 0.0) {
            return (0.0, sigma);
        }
        let lower = (sigma * (1.0 - alpha / phi_0)).clamp(0.0, sigma);
        let upper = (sigma * (1.0 - alpha) / phi_0).clamp(0.0, sigma);
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
        (sigma * (1.0 - alpha) + (1.0 - phi_0) * tau - phi_0 * theta_0) / (1.0 - phi_0)
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
        let unpriv = phi_0 / (2.0 * sigma) * (sigma * sigma - theta_0 * theta_0);
        let priv_ = if theta_1 > tau + sigma {
            0.0
        } else {
            // below tau every privileged individual already qualifies
            let theta_1 = theta_1.max(tau);
            (1.0 - phi_0) / (2.0 * sigma) * ((sigma + tau).powi(2) - theta_1 * theta_1)
        };
        unpriv + priv_
    }

    fn phi_0_post(&self, theta_0: Probability, phi_0: Probability, sigma: Probability) -> Probability {
        debug_assert!(theta_0 <= sigma);
        phi_0 - phi_0 / (2.0 * sigma) * (sigma * sigma - theta_0 * theta_0)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Probability {
        rng.random::<Probability>()
    }
}
