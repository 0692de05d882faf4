use crate::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// A finite population stepped one generation at a time.
///
/// Every agent sees the same thresholds. After allocation each agent is
/// replaced by its offspring, with group mobility driven by the composition
/// the round started with.
pub struct Generation<D = Ability>
where
    D: Distribution,
{
    distribution: D,
    sigma: Probability,
    tau: Probability,
    p_a: Probability,
    p_d: Probability,
    agents: Vec<Agent>,
    privileged: usize,
    rng: SmallRng,
}

impl<D> Generation<D>
where
    D: Distribution,
{
    /// The first `n_privileged` agents start privileged. Counts above the
    /// population saturate.
    pub fn new(
        distribution: D,
        params: &Params,
        population: usize,
        n_privileged: usize,
        seed: u64,
    ) -> Result<Self, ParamError> {
        if population == 0 {
            return Err(ParamError::Population);
        }
        let mut rng = SmallRng::seed_from_u64(seed);
        let privileged = n_privileged.min(population);
        let agents = (0..population)
            .map(|i| Agent::new(distribution.sample(&mut rng), i < privileged))
            .collect();
        Ok(Self {
            distribution,
            sigma: params.sigma(),
            tau: params.tau(),
            p_a: params.p_a(),
            p_d: params.p_d(),
            agents,
            privileged,
            rng,
        })
    }

    pub fn population(&self) -> usize {
        self.agents.len()
    }
    pub fn n_privileged(&self) -> usize {
        self.privileged
    }
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }
    /// Unprivileged share of the population.
    pub fn phi_0(&self) -> Probability {
        1.0 - self.privileged as Probability / self.population() as Probability
    }

    /// Allocate under `(theta_0, theta_1)`, replace everyone by offspring,
    /// and return how many agents succeeded.
    pub fn step(&mut self, theta_0: Probability, theta_1: Probability) -> usize {
        let phi_0 = self.phi_0();
        let mut successes = 0;
        let mut privileged = 0;
        for agent in self.agents.iter_mut() {
            if agent.compete(theta_0, theta_1, self.sigma, self.tau, &mut self.rng) {
                successes += 1;
            }
            agent.offspring(&self.distribution, phi_0, self.p_a, self.p_d, &mut self.rng);
            if agent.is_privileged() {
                privileged += 1;
            }
        }
        self.privileged = privileged;
        log::trace!("{:<32}{:<16}{}", "generation step", successes, self.phi_0());
        successes
    }

    /// Redraw the privileged count uniformly and regroup agents to match.
    pub fn reset(&mut self) {
        let population = self.population();
        let privileged = self.rng.random_range(0..=population);
        for (i, agent) in self.agents.iter_mut().enumerate() {
            agent.set_privileged(i < privileged);
        }
        self.privileged = privileged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(p_a: Probability, p_d: Probability) -> Params {
        Params::new(0.4, 0.1, p_a, p_d, 20, 0.8, 0.15).unwrap()
    }

    #[test]
    fn starts_with_requested_composition() {
        let generation = Generation::new(Ability::uniform(), &params(0.1, 0.1), 200, 50, 0).unwrap();
        assert_eq!(generation.population(), 200);
        assert_eq!(generation.n_privileged(), 50);
        assert!((generation.phi_0() - 0.75).abs() < 1e-12);
        let all = Generation::new(Ability::uniform(), &params(0.1, 0.1), 10, 99, 0).unwrap();
        assert_eq!(all.phi_0(), 0.0);
        assert!(all.agents().iter().all(|a| a.is_privileged()));
    }
    #[test]
    fn rejects_empty_population() {
        assert!(matches!(
            Generation::new(Ability::uniform(), &params(0.0, 0.0), 0, 0, 0),
            Err(ParamError::Population)
        ));
    }
    #[test]
    fn closed_doors_change_nothing() {
        let mut generation = Generation::new(Ability::uniform(), &params(0.0, 0.0), 500, 123, 1).unwrap();
        for _ in 0..10 {
            assert_eq!(generation.step(2.0, 2.0), 0);
            assert_eq!(generation.n_privileged(), 123);
        }
    }
    #[test]
    fn composition_tracks_agents() {
        let mut generation = Generation::new(Ability::uniform(), &params(0.3, 0.4), 1000, 400, 2).unwrap();
        for round in 0..10 {
            let successes = generation.step(0.1 * round as f64 / 10.0, 0.2);
            assert!(successes <= generation.population());
            let counted = generation.agents().iter().filter(|a| a.is_privileged()).count();
            assert_eq!(counted, generation.n_privileged());
        }
        generation.reset();
        let counted = generation.agents().iter().filter(|a| a.is_privileged()).count();
        assert_eq!(counted, generation.n_privileged());
    }
    #[test]
    fn successes_only_grow_privilege_without_mobility() {
        let mut generation = Generation::new(Ability::uniform(), &params(0.0, 0.0), 1000, 100, 3).unwrap();
        let before = generation.n_privileged();
        let successes = generation.step(0.0, 0.0);
        assert!(generation.n_privileged() >= before);
        assert!(generation.n_privileged() <= before + successes);
    }
    #[test]
    fn sampled_payoff_matches_closed_form() {
        let params = params(0.0, 0.0);
        let population = 50_000;
        let mut generation = Generation::new(Ability::uniform(), &params, population, population / 2, 4).unwrap();
        let (phi_0, theta_0) = (generation.phi_0(), 0.3);
        let theta_1 = Uniform.theta_1_from_theta_0(theta_0, phi_0, params.sigma(), params.tau(), params.alpha());
        let expected = Uniform.payoff(theta_0, phi_0, params.sigma(), params.tau(), params.alpha());
        let sampled = generation.step(theta_0, theta_1) as f64 / population as f64;
        assert!((sampled - expected).abs() < 0.005, "{sampled} vs {expected}");
    }
}
