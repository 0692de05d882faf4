//! Ability distributions and the closed-form quantities the solver needs.

mod ability;
mod gaussian;
mod normal;
mod uniform;

pub use ability::*;
pub use gaussian::*;
pub use normal::*;
pub use uniform::*;

use crate::*;
use rand::Rng;

/// Closed forms over an ability distribution.
///
/// An individual with ability `a` has success probability `sigma * a`, plus
/// `tau` if privileged. Opportunities go to everyone whose success probability
/// meets their group's threshold: `theta_0` for the unprivileged share `phi_0`
/// and `theta_1` for the rest.
///
/// Scalar methods are required. The `*_batch` methods apply them element-wise
/// over a row of `theta_0` values.
pub trait Distribution {
    /// Interval of `theta_0` in `[0, sigma]` keeping the unprivileged
    /// allocation consistent with the budget `alpha`.
    fn allowed_actions(
        &self,
        phi_0: Probability,
        sigma: Probability,
        alpha: Probability,
    ) -> (Probability, Probability);

    /// Privileged threshold that spends exactly `alpha` in total given `theta_0`.
    /// Returns `tau + sigma` when there is no privileged population.
    fn theta_1_from_theta_0(
        &self,
        theta_0: Probability,
        phi_0: Probability,
        sigma: Probability,
        tau: Probability,
        alpha: Probability,
    ) -> Probability;

    /// Expected fraction of the whole population that gets an opportunity and succeeds.
    fn payoff(
        &self,
        theta_0: Probability,
        phi_0: Probability,
        sigma: Probability,
        tau: Probability,
        alpha: Probability,
    ) -> Utility;

    /// Unprivileged fraction left after allocation, before mobility.
    fn phi_0_post(&self, theta_0: Probability, phi_0: Probability, sigma: Probability) -> Probability;

    /// Draw one ability.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Probability;

    fn theta_1_batch(
        &self,
        theta_0: &[Probability],
        phi_0: Probability,
        sigma: Probability,
        tau: Probability,
        alpha: Probability,
    ) -> Vec<Probability> {
        theta_0
            .iter()
            .map(|&t| self.theta_1_from_theta_0(t, phi_0, sigma, tau, alpha))
            .collect()
    }

    fn payoff_batch(
        &self,
        theta_0: &[Probability],
        phi_0: Probability,
        sigma: Probability,
        tau: Probability,
        alpha: Probability,
    ) -> Vec<Utility> {
        theta_0
            .iter()
            .map(|&t| self.payoff(t, phi_0, sigma, tau, alpha))
            .collect()
    }

    fn phi_0_post_batch(
        &self,
        theta_0: &[Probability],
        phi_0: Probability,
        sigma: Probability,
    ) -> Vec<Probability> {
        theta_0
            .iter()
            .map(|&t| self.phi_0_post(t, phi_0, sigma))
            .collect()
    }
}
