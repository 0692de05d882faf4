use crate::*;
use rand::Rng;

/// One individual: an ability draw and a group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    ability: Probability,
    privileged: bool,
}

impl Agent {
    pub fn new(ability: Probability, privileged: bool) -> Self {
        Self {
            ability,
            privileged,
        }
    }
    pub fn ability(&self) -> Probability {
        self.ability
    }
    pub fn is_privileged(&self) -> bool {
        self.privileged
    }
    pub fn set_privileged(&mut self, privileged: bool) {
        self.privileged = privileged;
    }

    /// `sigma * a + tau` if privileged, else `sigma * a`, clamped into
    /// `[0, 1]` for abilities drawn outside the unit interval.
    pub fn success(&self, sigma: Probability, tau: Probability) -> Probability {
        let bonus = if self.privileged { tau } else { 0.0 };
        (self.ability * sigma + bonus).clamp(0.0, 1.0)
    }

    /// Threshold this agent's group is held to.
    pub fn threshold(&self, theta_0: Probability, theta_1: Probability) -> Probability {
        match self.privileged {
            true => theta_1,
            false => theta_0,
        }
    }

    /// Offer an opportunity if the agent clears its threshold and roll for
    /// success. Success moves the agent into the privileged group.
    pub fn compete<R: Rng + ?Sized>(
        &mut self,
        theta_0: Probability,
        theta_1: Probability,
        sigma: Probability,
        tau: Probability,
        rng: &mut R,
    ) -> bool {
        let success = self.success(sigma, tau);
        let given = success >= self.threshold(theta_0, theta_1);
        let succeeded = given && rng.random::<Probability>() <= success;
        if succeeded {
            self.privileged = true;
        }
        succeeded
    }

    /// Replace this agent by its offspring. Privileged parents have
    /// unprivileged children with probability `p_A * phi_0`; unprivileged
    /// parents have privileged children with probability `p_D * (1 - phi_0)`.
    /// Ability is redrawn either way.
    pub fn offspring<D, R>(
        &mut self,
        distribution: &D,
        phi_0: Probability,
        p_a: Probability,
        p_d: Probability,
        rng: &mut R,
    ) where
        D: Distribution,
        R: Rng + ?Sized,
    {
        self.privileged = match self.privileged {
            true => !(rng.random::<Probability>() <= p_a && rng.random::<Probability>() <= phi_0),
            false => rng.random::<Probability>() <= p_d && rng.random::<Probability>() > phi_0,
        };
        self.ability = distribution.sample(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn success_adds_privilege_bonus() {
        assert!((Agent::new(0.5, false).success(0.4, 0.1) - 0.2).abs() < 1e-12);
        assert!((Agent::new(0.5, true).success(0.4, 0.1) - 0.3).abs() < 1e-12);
        assert_eq!(Agent::new(1.7, true).success(0.9, 0.1), 1.0);
        assert_eq!(Agent::new(-0.2, false).success(0.9, 0.1), 0.0);
    }
    #[test]
    fn certain_success_promotes() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let mut agent = Agent::new(1.0, false);
        assert!(agent.compete(0.0, 2.0, 1.0, 0.0, rng));
        assert!(agent.is_privileged());
    }
    #[test]
    fn unreachable_threshold_denies() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        for privileged in [false, true] {
            let mut agent = Agent::new(1.0, privileged);
            assert!(!agent.compete(0.9, 0.9, 0.4, 0.1, rng));
            assert_eq!(agent.is_privileged(), privileged);
        }
    }
    #[test]
    fn offspring_inherit_group_without_mobility() {
        let ref mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..1000 {
            for privileged in [false, true] {
                let mut agent = Agent::new(0.5, privileged);
                agent.offspring(&Uniform, rng.random(), 0.0, 0.0, rng);
                assert_eq!(agent.is_privileged(), privileged);
                assert!((0.0..1.0).contains(&agent.ability()));
            }
        }
    }
    #[test]
    fn offspring_move_at_expected_rate() {
        let ref mut rng = SmallRng::seed_from_u64(3);
        let n = 100_000;
        let fallen = (0..n)
            .filter(|_| {
                let mut agent = Agent::new(0.5, true);
                agent.offspring(&Uniform, 0.5, 0.4, 0.0, rng);
                !agent.is_privileged()
            })
            .count();
        // p_A * phi_0
        assert!((fallen as f64 / n as f64 - 0.2).abs() < 0.01);
    }
}
