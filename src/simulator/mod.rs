//! Game balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of campaigns on autopilot to analyze:
//! - Win rate per hero class
//! - Which monsters (or traps) end runs
//! - How often each event kind comes up
//! - How often fleeing works
//!
//! Runs drive the same `Campaign` the terminal game uses, so the numbers
//! match real play.

mod config;
mod policy;
mod report;
mod runner;

pub use config::SimConfig;
pub use policy::Policy;
pub use report::{ClassSummary, SimReport};
pub use runner::{run_simulation, simulate_single_run, RunStats};
