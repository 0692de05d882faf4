//! Solve one model instance and write its policy table.
//!
//! Options: --config, --distribution, --output, --rounds, plus one flag per
//! model parameter. SOLVE_DURATION bounds the wall-clock time of value
//! iteration.

use aamodel::*;
use clap::Parser;
use clap::ValueEnum;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Family {
    Uniform,
    Normal,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON parameter file; overrides the model flags below
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 0.4)]
    sigma: Probability,
    #[arg(long, default_value_t = 0.1)]
    tau: Probability,
    #[arg(long = "p-a", default_value_t = 0.0)]
    p_a: Probability,
    #[arg(long = "p-d", default_value_t = 0.0)]
    p_d: Probability,
    #[arg(long, default_value_t = 0.15)]
    alpha: Probability,
    #[arg(long, default_value_t = 0.8)]
    gamma: Utility,
    /// State resolution N
    #[arg(long, default_value_t = 2000)]
    states: usize,
    /// Action resolution D
    #[arg(long, default_value_t = ACTION_RESOLUTION)]
    actions: usize,
    #[arg(long, default_value_t = CONVERGENCE_EPSILON)]
    epsilon: Utility,
    #[arg(long, default_value_t = MAX_ITERATIONS)]
    iterations: usize,
    #[arg(long, value_enum, default_value_t = Family::Uniform)]
    distribution: Family,
    /// Spread of the normal ability distribution
    #[arg(long, default_value_t = 0.1)]
    sd: Probability,
    #[arg(long, default_value = "policy.csv")]
    output: PathBuf,
    /// Replay the policy on a simulated population for this many rounds
    #[arg(long, default_value_t = 0)]
    rounds: usize,
    #[arg(long, default_value_t = 10_000)]
    population: usize,
}

impl Args {
    fn params(&self) -> anyhow::Result<Params> {
        match self.config {
            Some(ref path) => Params::from_json(&std::fs::read_to_string(path)?),
            None => Ok(Params::new(
                self.sigma,
                self.tau,
                self.p_a,
                self.p_d,
                self.states,
                self.gamma,
                self.alpha,
            )?
            .with_actions(self.actions)?
            .with_epsilon(self.epsilon)?
            .with_iterations(self.iterations)?),
        }
    }
    fn ability(&self) -> anyhow::Result<Ability> {
        Ok(match self.distribution {
            Family::Uniform => Ability::uniform(),
            Family::Normal => Ability::normal(self.sd)?,
        })
    }
}

fn main() -> anyhow::Result<()> {
    aamodel::log();
    aamodel::deadline();
    let args = Args::parse();
    let params = args.params()?;
    let ability = args.ability()?;
    log::info!("{:<32}{}", "ability distribution", ability);
    let mut solver = Solver::new(ability, params)?;
    let policy = solver.run();
    policy.write_csv(&args.output)?;
    if args.rounds > 0 {
        let mut generation = Generation::new(ability, &params, args.population, args.population / 2, 0)?;
        let rollout = Rollout::run(&mut generation, &policy, args.rounds);
        log::info!("{:<32}{:.6}", "rollout discounted payoff", rollout.discounted(params.gamma()));
    }
    Ok(())
}
