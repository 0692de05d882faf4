//! Closed set of supported ability distributions.

use super::*;

/// Ability distribution selected by the caller and injected into the solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ability {
    Uniform(Uniform),
    Normal(Normal),
}

impl Ability {
    pub fn uniform() -> Self {
        Self::Uniform(Uniform)
    }
    pub fn normal(sd: Probability) -> Result<Self, ParamError> {
        Normal::new(sd).map(Self::Normal)
    }
}

impl From<Uniform> for Ability {
    fn from(uniform: Uniform) -> Self {
        Self::Uniform(uniform)
    }
}
impl From<Normal> for Ability {
    fn from(normal: Normal) -> Self {
        Self::Normal(normal)
    }
}

impl Distribution for Ability {
    fn allowed_actions(
        &self,
        phi_0: Probability,
        sigma: Probability,
        alpha: Probability,
    ) -> (Probability, Probability) {
        match self {
            Self::Uniform(d) => d.allowed_actions(phi_0, sigma, alpha),
            Self::Normal(d) => d.allowed_actions(phi_0, sigma, alpha),
        }
    }
    fn theta_1_from_theta_0(
        &self,
        theta_0: Probability,
        phi_0: Probability,
        sigma: Probability,
        tau: Probability,
        alpha: Probability,
    ) -> Probability {
        match self {
            Self::Uniform(d) => d.theta_1_from_theta_0(theta_0, phi_0, sigma, tau, alpha),
            Self::Normal(d) => d.theta_1_from_theta_0(theta_0, phi_0, sigma, tau, alpha),
        }
    }
    fn payoff(
        &self,
        theta_0: Probability,
        phi_0: Probability,
        sigma: Probability,
        tau: Probability,
        alpha: Probability,
    ) -> Utility {
        match self {
            Self::Uniform(d) => d.payoff(theta_0, phi_0, sigma, tau, alpha),
            Self::Normal(d) => d.payoff(theta_0, phi_0, sigma, tau, alpha),
        }
    }
    fn phi_0_post(&self, theta_0: Probability, phi_0: Probability, sigma: Probability) -> Probability {
        match self {
            Self::Uniform(d) => d.phi_0_post(theta_0, phi_0, sigma),
            Self::Normal(d) => d.phi_0_post(theta_0, phi_0, sigma),
        }
    }
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Probability {
        match self {
            Self::Uniform(d) => d.sample(rng),
            Self::Normal(d) => d.sample(rng),
        }
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uniform(_) => write!(f, "uniform[0,1]"),
            Self::Normal(d) => write!(f, "normal({}, {})", NORMAL_MEAN, d.sd()),
        }
    }
}
