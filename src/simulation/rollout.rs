use crate::*;

/// Payoffs and compositions from replaying a policy on a simulated population.
#[derive(Debug, Clone, PartialEq)]
pub struct Rollout {
    payoffs: Vec<Utility>,
    compositions: Vec<Probability>,
}

impl Rollout {
    /// Each round looks up the thresholds at the nearest grid state to the
    /// current composition and steps the generation once.
    pub fn run<D>(generation: &mut Generation<D>, policy: &Policy, rounds: usize) -> Self
    where
        D: Distribution,
    {
        let population = generation.population() as Utility;
        let mut payoffs = Vec::with_capacity(rounds);
        let mut compositions = Vec::with_capacity(rounds + 1);
        compositions.push(generation.phi_0());
        for _ in 0..rounds {
            let (theta_0, theta_1) = policy.thresholds(generation.phi_0());
            let successes = generation.step(theta_0, theta_1);
            payoffs.push(successes as Utility / population);
            compositions.push(generation.phi_0());
        }
        let rollout = Self {
            payoffs,
            compositions,
        };
        log::info!("{:<32}{:<16}{:.6}", "rollout mean payoff", rounds, rollout.mean());
        rollout
    }

    /// Fraction of the population that succeeded, per round.
    pub fn payoffs(&self) -> &[Utility] {
        &self.payoffs
    }
    /// `phi_0` before the first round and after every round.
    pub fn compositions(&self) -> &[Probability] {
        &self.compositions
    }
    pub fn mean(&self) -> Utility {
        match self.payoffs.len() {
            0 => 0.0,
            n => self.payoffs.iter().sum::<Utility>() / n as Utility,
        }
    }
    /// `sum_t gamma^t * payoff_t`
    pub fn discounted(&self, gamma: Utility) -> Utility {
        self.payoffs
            .iter()
            .rev()
            .fold(0.0, |acc, payoff| payoff + gamma * acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_solved_policy() {
        let params = Params::new(0.4, 0.1, 0.1, 0.1, 20, 0.8, 0.15)
            .unwrap()
            .with_actions(50)
            .unwrap();
        let mut solver = Solver::new(Ability::uniform(), params).unwrap();
        let policy = solver.run();
        let mut generation = Generation::new(Ability::uniform(), &params, 5000, 2500, 7).unwrap();
        let rollout = Rollout::run(&mut generation, &policy, 20);
        assert_eq!(rollout.payoffs().len(), 20);
        assert_eq!(rollout.compositions().len(), 21);
        assert!(rollout.compositions().iter().all(|phi| (0.0..=1.0).contains(phi)));
        assert!(rollout.mean() > 0.0);
        // allocation is capped at alpha, up to sampling noise
        assert!(rollout.payoffs().iter().all(|p| *p <= params.alpha() + 0.02));
    }
    #[test]
    fn discounting_weights_early_rounds() {
        let rollout = Rollout {
            payoffs: vec![1.0, 1.0, 1.0],
            compositions: vec![0.5; 4],
        };
        assert!((rollout.discounted(0.5) - 1.75).abs() < 1e-12);
        assert!((rollout.mean() - 1.0).abs() < 1e-12);
        let empty = Rollout {
            payoffs: vec![],
            compositions: vec![0.5],
        };
        assert_eq!(empty.mean(), 0.0);
        assert_eq!(empty.discounted(0.9), 0.0);
    }
}
