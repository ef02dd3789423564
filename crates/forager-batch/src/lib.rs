//! Batch driver: solve every blueprint of a file and report the scores.
//!
//! Blueprints are independent, so with the `parallel` feature (on by
//! default) they are solved on the rayon pool.

pub mod config;
pub mod error;
pub mod report;
pub mod runner;

pub use config::{BatchConfig, load_config};
pub use error::BatchError;
pub use report::{BatchReport, BlueprintScore};
pub use runner::{TracedRun, run_all, run_one, solve_economy};
