//! Single-trial placement.
//!
//! One trial turns a shuffled processing order into a partition of the
//! roster. The building blocks are exposed individually:
//!
//! - [`scoring`]: user→group and group→user affinity scores
//! - [`constraints`]: exclusion and weighted capacity checks
//! - [`ranking`]: group ranking for a user, member ranking for a group
//! - [`TrialEngine`]: ranked placement with eviction, then the fallback pass
//!
//! # Key Types
//!
//! - [`GroupSizes`]: the descending capacity schedule
//! - [`Group`], [`TrialResult`]: the partition a trial produces
//! - [`TrialStats`]: per-trial counters

pub mod constraints;
mod engine;
pub mod ranking;
mod schedule;
pub mod scoring;
mod types;

pub use constraints::{at_capacity, exclusion_conflict, would_exceed, CapacityLimits};
pub use engine::{Relaxation, TrialEngine, TrialStats, MAX_PLACEMENT_PASSES};
pub use ranking::{rank_groups_for_user, rank_members_for_group};
pub use schedule::GroupSizes;
pub use scoring::{group_user_score, user_group_score, weighted_size};
pub use types::{Group, TrialResult};
