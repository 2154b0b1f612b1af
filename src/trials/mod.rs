//! Multi-trial orchestrator.
//!
//! A single placement trial is greedy and order-dependent; the runner
//! repeats it 10^k times with independent shuffles and keeps the partition
//! that maximizes the minimum number of satisfied preferences.
//!
//! # Submodules
//!
//! - [`config`]: run parameters and validation
//! - [`fitness`]: lexicographic comparison of partitions
//! - [`runner`]: sequential or rayon-parallel trial execution

pub mod config;
pub mod fitness;
pub mod runner;

pub use config::{GroupingConfig, MAX_TRIAL_EXPONENT};
pub use fitness::TrialFitness;
pub use runner::{GroupingRun, TrialRunner};
