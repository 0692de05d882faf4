use crate::*;
use std::io::Write;
use std::path::Path;

/// Optimal thresholds per state, extracted once value iteration has settled.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    sigma: Probability,
    phi_0: Vec<Probability>,
    theta_0: Vec<Probability>,
    theta_1: Vec<Probability>,
}

impl Policy {
    /// For each state, take the best allowed action (first on ties) and the
    /// privileged threshold that spends the rest of the budget.
    pub fn extract<D>(distribution: &D, params: &Params, engine: &ValueIteration) -> Self
    where
        D: Distribution,
    {
        let tables = engine.tables();
        let grid = tables.grid();
        let phi_0 = grid.phis();
        let theta_0 = (0..grid.rows())
            .map(|s| Self::argmax(engine.row(s), tables.bounds(s)))
            .map(|a| grid.theta(a))
            .collect::<Vec<_>>();
        let theta_1 = phi_0
            .iter()
            .zip(theta_0.iter())
            .map(|(&phi, &theta)| {
                distribution.theta_1_from_theta_0(
                    theta,
                    phi,
                    params.sigma(),
                    params.tau(),
                    params.alpha(),
                )
            })
            .collect::<Vec<_>>();
        Self {
            sigma: params.sigma(),
            phi_0,
            theta_0,
            theta_1,
        }
    }

    /// Lowest index attaining the row maximum within the allowed actions.
    fn argmax(row: &[Utility], allowed: std::ops::RangeInclusive<usize>) -> usize {
        let start = *allowed.start();
        allowed.fold(start, |best, a| if row[a] > row[best] { a } else { best })
    }

    pub fn len(&self) -> usize {
        self.phi_0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.phi_0.is_empty()
    }
    pub fn phi_0(&self) -> &[Probability] {
        &self.phi_0
    }
    pub fn theta_0(&self) -> &[Probability] {
        &self.theta_0
    }
    pub fn theta_1(&self) -> &[Probability] {
        &self.theta_1
    }

    /// Thresholds at the grid state nearest to a composition.
    pub fn thresholds(&self, phi_0: Probability) -> (Probability, Probability) {
        let n = self.len() - 1;
        let s = ((phi_0 * n as Probability).round().max(0.0) as usize).min(n);
        (self.theta_0[s], self.theta_1[s])
    }

    /// `min(theta_1 - theta_0, sigma - theta_0)` per state: how much more
    /// lenient the unprivileged threshold is.
    pub fn affirmative_gap(&self) -> Vec<Probability> {
        self.theta_0
            .iter()
            .zip(self.theta_1.iter())
            .map(|(&t0, &t1)| (t1 - t0).min(self.sigma - t0))
            .collect()
    }

    /// Header row `phi_0,theta_0,theta_1` then one row per state.
    pub fn to_csv<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        writeln!(writer, "phi_0,theta_0,theta_1")?;
        for ((phi, t0), t1) in self
            .phi_0
            .iter()
            .zip(self.theta_0.iter())
            .zip(self.theta_1.iter())
        {
            writeln!(writer, "{},{},{}", phi, t0, t1)?;
        }
        Ok(())
    }

    pub fn write_csv(&self, path: &Path) -> anyhow::Result<()> {
        log::info!("{:<32}{:<32}", "saving policy", path.display());
        let ref mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.to_csv(file)?;
        file.flush()?;
        Ok(())
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:>10}{:>12}{:>12}", "phi_0", "theta_0", "theta_1")?;
        for s in 0..self.len() {
            writeln!(
                f,
                "{:>10.4}{:>12.6}{:>12.6}",
                self.phi_0[s], self.theta_0[s], self.theta_1[s]
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_prefers_first_maximum_within_bounds() {
        let row = [9.0, 1.0, 3.0, 3.0, 2.0];
        assert_eq!(Policy::argmax(&row, 1..=4), 2);
        assert_eq!(Policy::argmax(&row, 0..=4), 0);
        assert_eq!(Policy::argmax(&[0.0; 5], 3..=4), 3);
    }
    #[test]
    fn writes_header_and_rows() {
        let policy = Policy {
            sigma: 0.4,
            phi_0: vec![0.0, 0.5, 1.0],
            theta_0: vec![0.1, 0.2, 0.3],
            theta_1: vec![0.5, 0.4, 0.5],
        };
        let mut buffer = Vec::new();
        policy.to_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "phi_0,theta_0,theta_1");
        assert_eq!(lines[2], "0.5,0.2,0.4");
    }
    #[test]
    fn gap_and_lookup() {
        let policy = Policy {
            sigma: 0.4,
            phi_0: vec![0.0, 0.5, 1.0],
            theta_0: vec![0.1, 0.2, 0.3],
            theta_1: vec![0.5, 0.3, 0.5],
        };
        let gap = policy.affirmative_gap();
        assert!((gap[0] - 0.3).abs() < 1e-12);
        assert!((gap[1] - 0.1).abs() < 1e-12);
        assert!((gap[2] - 0.1).abs() < 1e-12);
        assert_eq!(policy.thresholds(0.45), (0.2, 0.3));
        assert_eq!(policy.thresholds(2.0), (0.3, 0.5));
    }
}
