//! Lexicographic fitness of a trial result.

use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::placement::TrialResult;
use crate::roster::Roster;
use crate::summary::{min_friends, worst_favorability};

/// Quality of one partition, compared lexicographically:
///
/// 1. higher `min_friends` is better
/// 2. fewer participants `tied_at_min` is better
/// 3. higher `worst_favorability` is better
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TrialFitness {
    /// Lowest friend count of any participant with preferences.
    pub min_friends: usize,
    /// Participants at that lowest count.
    pub tied_at_min: usize,
    /// Lowest group favorability.
    pub worst_favorability: f64,
}

impl TrialFitness {
    /// Measures `result`.
    pub fn evaluate(roster: &Roster, result: &TrialResult) -> Self {
        let min = min_friends(roster, &result.groups);
        Self {
            min_friends: min.count,
            tied_at_min: min.members.len(),
            worst_favorability: worst_favorability(roster, result),
        }
    }

    /// Compares quality; `Greater` means `self` is better.
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use u_grouping::trials::TrialFitness;
    ///
    /// let a = TrialFitness { min_friends: 2, tied_at_min: 1, worst_favorability: 0.9 };
    /// let b = TrialFitness { min_friends: 3, tied_at_min: 5, worst_favorability: 0.1 };
    /// assert_eq!(b.compare(&a), Ordering::Greater);
    /// ```
    pub fn compare(&self, other: &Self) -> Ordering {
        self.min_friends
            .cmp(&other.min_friends)
            .then_with(|| other.tied_at_min.cmp(&self.tied_at_min))
            .then_with(|| self.worst_favorability.total_cmp(&other.worst_favorability))
    }

    /// Whether `self` is strictly better than `other`.
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Greater
    }
}
