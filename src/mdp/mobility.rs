use crate::*;

/// Exogenous mobility applied to the post-allocation composition.
///
/// Unprivileged individuals leave the pool with probability `p_D` unless
/// matched by another unprivileged draw (the quadratic term). Privileged
/// individuals fall in with probability `p_A` in proportion to the
/// unprivileged share.
pub fn mobility(phi_post: Probability, p_a: Probability, p_d: Probability) -> Probability {
    phi_post * (1.0 - p_d) + phi_post * phi_post * p_d + (1.0 - phi_post) * p_a * phi_post
}
