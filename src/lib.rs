//! Preference-driven group assignment.
//!
//! Partitions a roster of identities into groups of prescribed capacity
//! so that as many stated preferences as possible are satisfied:
//!
//! - **Roster**: interned identities with gender, cohort and participation
//!   details, "want to be with" preferences and symmetric exclusions.
//!   An identity suffixed `--x<n>` counts as `n` seats.
//! - **Placement**: one greedy, order-dependent trial. Participants pick
//!   their most attractive group; over-full groups evict their least
//!   accepted member; leftovers go through a relaxing fallback pass.
//! - **Trials**: 10^k independent trials, sequential or on rayon's pool,
//!   selecting the partition whose worst-off participant has the most
//!   friends.
//! - **Summary**: per-group statistics and a printable report.
//!
//! # Example
//!
//! ```
//! use u_grouping::placement::GroupSizes;
//! use u_grouping::roster::{Detail, RosterBuilder};
//! use u_grouping::summary::Summary;
//! use u_grouping::trials::{GroupingConfig, TrialRunner};
//!
//! let roster = RosterBuilder::new()
//!     .detail("a", Detail::male())
//!     .detail("b", Detail::male())
//!     .detail("c", Detail::male())
//!     .detail("d", Detail::male())
//!     .preferences("a", ["b"])
//!     .preferences("b", ["a"])
//!     .preferences("c", ["d"])
//!     .preferences("d", ["c"])
//!     .build();
//!
//! let config = GroupingConfig::new(GroupSizes::parse("2-2")?)
//!     .with_one_gender(true)
//!     .with_trial_exponent(2)
//!     .with_seed(7);
//! let run = TrialRunner::run(&roster, &config)?;
//!
//! let summary = Summary::new(&roster, &run.best, config.display_names());
//! assert_eq!(summary.placed, 4);
//! assert_eq!(summary.min_friends, 1);
//! # Ok::<(), u_grouping::GroupingError>(())
//! ```
//!
//! # Features
//!
//! - `parallel` (default): run trials on rayon's thread pool
//! - `serde`: JSON roster documents and serializable results
//! - `cli`: the `groupsort` binary

pub mod error;
pub mod placement;
pub mod roster;
pub mod summary;
pub mod trials;

pub use error::GroupingError;
