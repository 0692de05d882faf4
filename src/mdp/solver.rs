use crate::*;

/// Owns one model instance from table construction through policy extraction.
///
/// Tables are built once at construction. `run` may be called repeatedly
/// and resumes from the current `Q`.
pub struct Solver<D = Ability>
where
    D: Distribution + Sync,
{
    distribution: D,
    params: Params,
    engine: ValueIteration,
    convergence: Option<Convergence>,
}

impl<D> Solver<D>
where
    D: Distribution + Sync,
{
    pub fn new(distribution: D, params: Params) -> Result<Self, TableError> {
        log::info!("{:<32}{}", "solving", params);
        let tables = Tables::build(&distribution, &params)?;
        let engine = ValueIteration::new(tables, &params);
        Ok(Self {
            distribution,
            params,
            engine,
            convergence: None,
        })
    }

    /// Iterate to a fixed point and extract the policy.
    pub fn run(&mut self) -> Policy {
        self.convergence = Some(self.engine.run());
        self.policy()
    }

    /// Policy implied by the current `Q`, converged or not.
    pub fn policy(&self) -> Policy {
        Policy::extract(&self.distribution, &self.params, &self.engine)
    }

    pub fn convergence(&self) -> Option<Convergence> {
        self.convergence
    }
    pub fn params(&self) -> &Params {
        &self.params
    }
    pub fn distribution(&self) -> &D {
        &self.distribution
    }
    pub fn engine(&self) -> &ValueIteration {
        &self.engine
    }
    pub fn tables(&self) -> &Tables {
        self.engine.tables()
    }
}
