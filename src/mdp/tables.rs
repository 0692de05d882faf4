use crate::*;
#[cfg(feature = "server")]
use rayon::prelude::*;

/// A distribution returned something the solver cannot use.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("allowed actions [{lower}, {upper}] not ordered within [0, {sigma}] at state {state}")]
    Bounds {
        state: usize,
        lower: Probability,
        upper: Probability,
        sigma: Probability,
    },
    #[error("payoff {payoff} outside [0, {alpha}] at state {state}, action {action}")]
    Payoff {
        state: usize,
        action: usize,
        payoff: Utility,
        alpha: Probability,
    },
}

/// Precomputed reward, transition, and action-validity tables.
///
/// Built once per solver and read-only afterwards. Forbidden entries hold
/// zero reward and loop back to their own state.
#[derive(Debug, Clone)]
pub struct Tables {
    grid: Grid,
    reward: Vec<Utility>,
    next: Vec<usize>,
    mask: Vec<bool>,
    bounds: Vec<(usize, usize)>,
}

/// One state's slice of every table.
struct Row {
    reward: Vec<Utility>,
    next: Vec<usize>,
    mask: Vec<bool>,
    bounds: (usize, usize),
}

impl Tables {
    pub fn build<D>(distribution: &D, params: &Params) -> Result<Self, TableError>
    where
        D: Distribution + Sync,
    {
        let grid = params.grid();
        log::info!("{:<32}{:>8} x {:<8}", "building tables", grid.rows(), grid.cols());
        #[cfg(feature = "server")]
        let rows = (0..grid.rows())
            .into_par_iter()
            .map(|s| Self::row(distribution, params, &grid, s))
            .collect::<Result<Vec<Row>, TableError>>()?;
        #[cfg(not(feature = "server"))]
        let rows = (0..grid.rows())
            .map(|s| Self::row(distribution, params, &grid, s))
            .collect::<Result<Vec<Row>, TableError>>()?;
        let mut tables = Self {
            grid,
            reward: Vec::with_capacity(grid.len()),
            next: Vec::with_capacity(grid.len()),
            mask: Vec::with_capacity(grid.len()),
            bounds: Vec::with_capacity(grid.rows()),
        };
        for row in rows {
            tables.reward.extend(row.reward);
            tables.next.extend(row.next);
            tables.mask.extend(row.mask);
            tables.bounds.push(row.bounds);
        }
        log::debug!(
            "{:<32}{:>8}",
            "allowed state-action pairs",
            tables.mask.iter().filter(|m| **m).count()
        );
        Ok(tables)
    }

    fn row<D>(distribution: &D, params: &Params, grid: &Grid, s: usize) -> Result<Row, TableError>
    where
        D: Distribution,
    {
        let sigma = params.sigma();
        let alpha = params.alpha();
        let phi_0 = grid.phi(s);
        let (lower, upper) = distribution.allowed_actions(phi_0, sigma, alpha);
        if !(0.0 <= lower && lower <= upper && upper <= sigma) {
            return Err(TableError::Bounds {
                state: s,
                lower,
                upper,
                sigma,
            });
        }
        let (lo, hi) = grid.interval(lower, upper);
        let thetas = grid.thetas(lo..=hi);
        let payoffs = distribution.payoff_batch(&thetas, phi_0, sigma, params.tau(), alpha);
        let posts = distribution.phi_0_post_batch(&thetas, phi_0, sigma);
        // a collapsed interval may sit half a step outside the exact bounds
        let slack = 0.5 * grid.step() + PHI_TOLERANCE;
        let mut row = Row {
            reward: vec![0.0; grid.cols()],
            next: vec![s; grid.cols()],
            mask: vec![false; grid.cols()],
            bounds: (lo, hi),
        };
        for (i, a) in (lo..=hi).enumerate() {
            let payoff = payoffs[i];
            if !(-slack <= payoff && payoff <= alpha + slack) {
                return Err(TableError::Payoff {
                    state: s,
                    action: a,
                    payoff,
                    alpha,
                });
            }
            let phi_new = mobility(posts[i], params.p_a(), params.p_d());
            row.reward[a] = payoff.clamp(0.0, alpha);
            row.next[a] = grid.state(phi_new);
            row.mask[a] = true;
        }
        Ok(row)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn reward(&self, s: usize, a: usize) -> Utility {
        self.reward[self.grid.index(s, a)]
    }
    pub fn next(&self, s: usize, a: usize) -> usize {
        self.next[self.grid.index(s, a)]
    }
    pub fn allowed(&self, s: usize, a: usize) -> bool {
        self.mask[self.grid.index(s, a)]
    }
    /// Allowed action indices for a state.
    pub fn bounds(&self, s: usize) -> std::ops::RangeInclusive<usize> {
        let (lo, hi) = self.bounds[s];
        lo..=hi
    }
    pub fn rewards(&self) -> &[Utility] {
        &self.reward
    }
    pub fn transitions(&self) -> &[usize] {
        &self.next
    }
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }
}
