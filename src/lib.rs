//! Opportunity allocation across generations as a discretized MDP.
//!
//! A population is split into privileged and unprivileged groups. Each round
//! a fixed budget of opportunities is handed out by thresholding individual
//! success probabilities, and the composition of the next generation depends
//! on who succeeded. This crate finds the threshold policy maximizing the
//! discounted long-run number of successes.
//!
//! # Module Structure
//!
//! - `distribution`: Ability distributions and their closed-form payoffs
//! - `mdp`: Parameters, tables, value iteration, and policy extraction
//! - `simulation`: Monte Carlo population used to sanity-check policies
#![allow(clippy::needless_range_loop)]

mod distribution;
mod mdp;
mod simulation;

pub use distribution::*;
pub use mdp::*;
pub use simulation::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Population fractions, CDF values, and allocation thresholds.
pub type Probability = f64;
/// Expected payoffs and state-action values.
pub type Utility = f64;

// ============================================================================
// DISCRETIZATION
// ============================================================================
/// Default number of action steps between `theta_0 = 0` and `theta_0 = sigma`.
pub const ACTION_RESOLUTION: usize = 2000;
/// Tolerance used when comparing a population fraction against 0 or 1.
pub const PHI_TOLERANCE: Probability = 1e-9;
/// Slack, in action steps, when snapping a threshold interval onto the grid.
pub const SNAP_TOLERANCE: f64 = 1e-9;

// ============================================================================
// VALUE ITERATION
// ============================================================================
/// Sup-norm residual below which value iteration stops.
pub const CONVERGENCE_EPSILON: Utility = 1e-4;
/// Sweep cap so a misconfigured instance cannot loop forever.
/// Reaching `1e-4` at `gamma = 0.99` takes under 1500 sweeps.
pub const MAX_ITERATIONS: usize = 100_000;
/// Interval between progress log messages during value iteration.
pub const SWEEP_LOG_INTERVAL: std::time::Duration = std::time::Duration::from_secs(10);

// ============================================================================
// NORMAL ABILITY DISTRIBUTION
// ============================================================================
/// Mean ability. Only 0.5 is supported by the closed forms.
pub const NORMAL_MEAN: Probability = 0.5;
/// Tail mass at which the Gaussian quantile saturates instead of diverging.
pub const NORMAL_TAIL: Probability = 1e-15;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Optional solve deadline from SOLVE_DURATION env var.
static DEADLINE: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();
/// Check whether the solve deadline has passed. Only consulted between sweeps.
pub fn interrupted() -> bool {
    DEADLINE
        .get()
        .map_or(false, |d| std::time::Instant::now() >= *d)
}
/// Arm the wall-clock deadline from SOLVE_DURATION (e.g. "30s", "5m", "2h").
pub fn deadline() {
    if let Ok(duration) = std::env::var("SOLVE_DURATION") {
        if let Some(limit) = parse_duration(&duration) {
            if let Some(at) = std::time::Instant::now().checked_add(limit) {
                let _ = DEADLINE.set(at);
                log::info!("solver will stop after {}", duration);
            }
        }
    }
}
/// Parse duration string like "30s", "5m", "2h", "1d" into Duration.
fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    let (num, unit) = s.split_at(s.len().saturating_sub(1));
    let value: u64 = num.parse().ok()?;
    let secs = match unit {
        "s" => Some(value),
        "m" => value.checked_mul(60),
        "h" => value.checked_mul(3600),
        "d" => value.checked_mul(86400),
        _ => None,
    };
    secs.map(std::time::Duration::from_secs)
}

/// Approximate equality for population fractions.
pub(crate) fn near(x: Probability, y: Probability) -> bool {
    (x - y).abs() <= PHI_TOLERANCE
}
