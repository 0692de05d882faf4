use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// Rejected model configuration. Each variant is a caller bug, not a
/// runtime condition, so nothing attempts to repair it.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("invalid ability weight: sigma = {0} must lie in (0, 1]")]
    Sigma(Probability),
    #[error("invalid privilege weight: tau = {tau} must lie in [0, 1] with sigma + tau <= 1 (sigma = {sigma})")]
    Tau { tau: Probability, sigma: Probability },
    #[error("invalid mobility probability: {name} = {value} must lie in [0, 1]")]
    Mobility { name: &'static str, value: Probability },
    #[error("invalid state resolution: N must be a positive integer")]
    States,
    #[error("invalid discount factor: gamma = {0} must lie in (0, 1)")]
    Discount(Utility),
    #[error("invalid opportunity budget: alpha = {0} must lie in [0, 1]")]
    Budget(Probability),
    #[error("invalid action resolution: D must be a positive integer")]
    Actions,
    #[error("invalid convergence tolerance: epsilon = {0} must be positive")]
    Tolerance(Utility),
    #[error("invalid iteration cap: must allow at least one sweep")]
    Iterations,
    #[error("invalid ability spread: sd = {0} must be positive")]
    StandardDeviation(Probability),
    #[error("invalid population: a generation needs at least one agent")]
    Population,
}

/// Model parameters, immutable once validated.
///
/// Construct with [`Params::new`] and adjust solver knobs with the
/// `with_*` builders; every path goes through [`Params::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    sigma: Probability,
    tau: Probability,
    #[serde(rename = "p_A")]
    p_a: Probability,
    #[serde(rename = "p_D")]
    p_d: Probability,
    alpha: Probability,
    gamma: Utility,
    #[serde(rename = "N")]
    states: usize,
    #[serde(rename = "D", default = "default_actions")]
    actions: usize,
    #[serde(default = "default_epsilon")]
    epsilon: Utility,
    #[serde(default = "default_iterations")]
    iterations: usize,
}

fn default_actions() -> usize {
    ACTION_RESOLUTION
}
fn default_epsilon() -> Utility {
    CONVERGENCE_EPSILON
}
fn default_iterations() -> usize {
    MAX_ITERATIONS
}

impl Params {
    pub fn new(
        sigma: Probability,
        tau: Probability,
        p_a: Probability,
        p_d: Probability,
        states: usize,
        gamma: Utility,
        alpha: Probability,
    ) -> Result<Self, ParamError> {
        Self {
            sigma,
            tau,
            p_a,
            p_d,
            alpha,
            gamma,
            states,
            actions: ACTION_RESOLUTION,
            epsilon: CONVERGENCE_EPSILON,
            iterations: MAX_ITERATIONS,
        }
        .validate()
    }

    /// Parse and validate a JSON parameter file body.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str::<Self>(json)?.validate()?)
    }

    pub fn with_actions(self, actions: usize) -> Result<Self, ParamError> {
        Self { actions, ..self }.validate()
    }
    pub fn with_epsilon(self, epsilon: Utility) -> Result<Self, ParamError> {
        Self { epsilon, ..self }.validate()
    }
    pub fn with_iterations(self, iterations: usize) -> Result<Self, ParamError> {
        Self { iterations, ..self }.validate()
    }

    pub fn validate(self) -> Result<Self, ParamError> {
        let unit = |x: f64| (0.0..=1.0).contains(&x);
        if !(self.sigma > 0.0 && self.sigma <= 1.0) {
            return Err(ParamError::Sigma(self.sigma));
        }
        if !unit(self.tau) || self.sigma + self.tau > 1.0 + PHI_TOLERANCE {
            return Err(ParamError::Tau {
                tau: self.tau,
                sigma: self.sigma,
            });
        }
        for (name, value) in [("p_A", self.p_a), ("p_D", self.p_d)] {
            if !unit(value) {
                return Err(ParamError::Mobility { name, value });
            }
        }
        if self.states == 0 {
            return Err(ParamError::States);
        }
        if !(self.gamma > 0.0 && self.gamma < 1.0) {
            return Err(ParamError::Discount(self.gamma));
        }
        if !unit(self.alpha) {
            return Err(ParamError::Budget(self.alpha));
        }
        if self.actions == 0 {
            return Err(ParamError::Actions);
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ParamError::Tolerance(self.epsilon));
        }
        if self.iterations == 0 {
            return Err(ParamError::Iterations);
        }
        Ok(self)
    }

    pub fn sigma(&self) -> Probability {
        self.sigma
    }
    pub fn tau(&self) -> Probability {
        self.tau
    }
    pub fn p_a(&self) -> Probability {
        self.p_a
    }
    pub fn p_d(&self) -> Probability {
        self.p_d
    }
    pub fn alpha(&self) -> Probability {
        self.alpha
    }
    pub fn gamma(&self) -> Utility {
        self.gamma
    }
    /// State resolution `N`.
    pub fn states(&self) -> usize {
        self.states
    }
    /// Action resolution `D`.
    pub fn actions(&self) -> usize {
        self.actions
    }
    pub fn epsilon(&self) -> Utility {
        self.epsilon
    }
    pub fn iterations(&self) -> usize {
        self.iterations
    }
    pub fn grid(&self) -> Grid {
        Grid::new(self.states, self.actions, self.sigma)
    }
}

impl std::fmt::Display for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "sigma={} tau={} p_A={} p_D={} alpha={} gamma={} N={} D={}",
            self.sigma,
            self.tau,
            self.p_a,
            self.p_d,
            self.alpha,
            self.gamma,
            self.states,
            self.actions
        )
    }
}
