use crate::*;

/// Discretization of the state and action spaces.
///
/// State `s` in `0..=N` is the composition `phi_0 = s / N`.
/// Action `a` in `0..=D` is the threshold `theta_0 = a * sigma / D`.
/// Tables are flat row-major buffers of `(N + 1) * (D + 1)` entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    states: usize,
    actions: usize,
    sigma: Probability,
}

impl Grid {
    pub fn new(states: usize, actions: usize, sigma: Probability) -> Self {
        Self {
            states,
            actions,
            sigma,
        }
    }
    /// Number of rows, `N + 1`.
    pub fn rows(&self) -> usize {
        self.states + 1
    }
    /// Number of columns, `D + 1`.
    pub fn cols(&self) -> usize {
        self.actions + 1
    }
    pub fn len(&self) -> usize {
        self.rows() * self.cols()
    }
    pub fn index(&self, s: usize, a: usize) -> usize {
        s * self.cols() + a
    }
    pub fn phi(&self, s: usize) -> Probability {
        s as Probability / self.states as Probability
    }
    pub fn theta(&self, a: usize) -> Probability {
        self.sigma * (a as Probability / self.actions as Probability)
    }
    /// Width of one action step.
    pub fn step(&self) -> Probability {
        self.sigma / self.actions as Probability
    }
    /// Nearest action index to a threshold.
    pub fn action(&self, theta_0: Probability) -> usize {
        ((theta_0 * self.actions as Probability / self.sigma).round().max(0.0) as usize)
            .min(self.actions)
    }
    /// Action indices whose thresholds lie inside `[lower, upper]`.
    ///
    /// Rounds each endpoint onto the grid, stepping inward where rounding
    /// left the interval, so no grid action spends past the budget. An interval
    /// narrower than one step that straddles no grid point collapses to the
    /// action nearest its midpoint.
    pub fn interval(&self, lower: Probability, upper: Probability) -> (usize, usize) {
        let scale = self.actions as Probability / self.sigma;
        let lo = ((lower * scale - SNAP_TOLERANCE).ceil().max(0.0) as usize).min(self.actions);
        let hi = ((upper * scale + SNAP_TOLERANCE).floor().max(0.0) as usize).min(self.actions);
        match lo <= hi {
            true => (lo, hi),
            false => {
                let mid = self.action(0.5 * (lower + upper));
                (mid, mid)
            }
        }
    }
    /// Nearest state index to a composition.
    pub fn state(&self, phi_0: Probability) -> usize {
        ((phi_0 * self.states as Probability).round().max(0.0) as usize).min(self.states)
    }
    pub fn phis(&self) -> Vec<Probability> {
        (0..self.rows()).map(|s| self.phi(s)).collect()
    }
    pub fn thetas(&self, actions: std::ops::RangeInclusive<usize>) -> Vec<Probability> {
        actions.map(|a| self.theta(a)).collect()
    }
}
