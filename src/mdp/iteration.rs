use crate::*;
#[cfg(feature = "server")]
use rayon::prelude::*;
use std::time::Duration;
use std::time::Instant;

/// Outcome of a value-iteration run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Convergence {
    pub iterations: usize,
    pub residual: Utility,
    pub converged: bool,
    pub elapsed: Duration,
}

impl std::fmt::Display for Convergence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<20}{:<24}{:<20}{:<20}",
            format!("sweeps {}", self.iterations),
            format!("residual {:.3e}", self.residual),
            format!("converged {}", self.converged),
            format!("elapsed {:.1?}", self.elapsed),
        )
    }
}

/// Bellman fixed-point iteration over precomputed tables.
///
/// Each sweep reads only the frozen `Q` of the previous sweep and writes a
/// fresh buffer, so rows update independently:
///
/// `Q'[s, a] = (R[s, a] + gamma * max_a' Q[S[s, a], a']) * mask[s, a]`
pub struct ValueIteration {
    tables: Tables,
    gamma: Utility,
    epsilon: Utility,
    iterations: usize,
    sweeps: usize,
    q: Vec<Utility>,
}

impl ValueIteration {
    pub fn new(tables: Tables, params: &Params) -> Self {
        Self {
            q: vec![0.0; tables.grid().len()],
            tables,
            gamma: params.gamma(),
            epsilon: params.epsilon(),
            iterations: params.iterations(),
            sweeps: 0,
        }
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }
    pub fn q(&self) -> &[Utility] {
        &self.q
    }
    /// Total sweeps applied across every `run`.
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }
    /// `Q[s, :]`
    pub fn row(&self, s: usize) -> &[Utility] {
        let cols = self.tables.grid().cols();
        &self.q[s * cols..(s + 1) * cols]
    }

    /// State values `V[s] = max_a Q[s, a]`.
    pub fn values(&self) -> Vec<Utility> {
        self.q
            .chunks(self.tables.grid().cols())
            .map(|row| row.iter().copied().fold(Utility::NEG_INFINITY, Utility::max))
            .collect()
    }

    /// Apply one Bellman update to every entry. Returns `max |Q' - Q|`.
    pub fn sweep(&mut self) -> Utility {
        let ref values = self.values();
        let ref tables = self.tables;
        let gamma = self.gamma;
        let cols = tables.grid().cols();
        let mut next = vec![0.0; self.q.len()];
        let update = |(s, row): (usize, &mut [Utility])| {
            for a in 0..cols {
                row[a] = match tables.allowed(s, a) {
                    true => tables.reward(s, a) + gamma * values[tables.next(s, a)],
                    false => 0.0,
                };
            }
        };
        #[cfg(feature = "server")]
        next.par_chunks_mut(cols).enumerate().for_each(update);
        #[cfg(not(feature = "server"))]
        next.chunks_mut(cols).enumerate().for_each(update);
        let residual = self
            .q
            .iter()
            .zip(next.iter())
            .map(|(old, new)| (new - old).abs())
            .fold(0.0, Utility::max);
        self.q = next;
        self.sweeps += 1;
        residual
    }

    /// Sweep until the residual drops below epsilon, the iteration cap is
    /// reached, or the solve deadline passes.
    pub fn run(&mut self) -> Convergence {
        log::info!("{:<32}{:<32}", "running value iteration", format!("epsilon {:e}", self.epsilon));
        let start = Instant::now();
        let mut checkpoint = start;
        let mut iterations = 0;
        loop {
            let residual = self.sweep();
            iterations += 1;
            log::debug!("{:<32}{:<16}{:.6e}", "value iteration sweep", iterations, residual);
            let converged = residual < self.epsilon;
            let capped = iterations >= self.iterations;
            let stopped = interrupted();
            if converged || capped || stopped {
                let convergence = Convergence {
                    iterations,
                    residual,
                    converged,
                    elapsed: start.elapsed(),
                };
                match converged {
                    true => log::info!("{:<32}{}", "converged", convergence),
                    false if capped => log::warn!("{:<32}{}", "iteration cap reached", convergence),
                    false => log::warn!("{:<32}{}", "deadline reached", convergence),
                }
                return convergence;
            }
            if checkpoint.elapsed() >= SWEEP_LOG_INTERVAL {
                checkpoint = Instant::now();
                log::info!("{:<32}{:<16}{:.6e}", "value iteration progress", iterations, residual);
            }
        }
    }
}
