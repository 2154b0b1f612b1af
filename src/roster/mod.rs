//! Population model.
//!
//! Turns the string-keyed external inputs into a dense, read-only
//! [`Roster`] shared by every trial.
//!
//! # Key Types
//!
//! - [`Detail`]: per-identity attributes (gender flag, cohort, participation)
//! - [`RosterBuilder`]: collects details, preferences and anti-preferences
//! - [`Roster`]: interned population with resolved preferences and exclusions
//! - `RosterDocument` (feature `serde`): JSON form of the inputs
//!
//! Multiplicity helpers ([`multiplier`], [`total_weight`],
//! [`parse_multiplier`]) live here as well since every other component
//! weighs identities through them.

mod builder;
#[cfg(feature = "serde")]
mod document;
mod types;
mod weight;

pub use builder::{Roster, RosterBuilder, EXCLUSION_SEPARATOR};
#[cfg(feature = "serde")]
pub use document::RosterDocument;
pub use types::{Detail, Identity, MemberId};
pub use weight::{multiplier, parse_multiplier, total_weight, MAX_MULTIPLIER};
