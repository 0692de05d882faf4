//! Monte Carlo population for checking solved policies against sampled
//! outcomes. The solver never depends on it.

mod agent;
mod generation;
mod rollout;

pub use agent::*;
pub use generation::*;
pub use rollout::*;
