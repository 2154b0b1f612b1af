//! Group-size schedules.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GroupingError;

/// Target capacities, one per group, in descending order.
///
/// The length of the schedule is the group count. Capacities are weighted
/// (see [`multiplier`](crate::roster::multiplier)) and soft: the fallback
/// pass may exceed them.
///
/// # Examples
///
/// ```
/// use u_grouping::placement::GroupSizes;
///
/// let sizes: GroupSizes = "20-30-25".parse().unwrap();
/// assert_eq!(sizes.as_slice(), &[30, 25, 20]);
/// assert_eq!(sizes.group_count(), 3);
/// assert_eq!(sizes.to_string(), "30-25-20");
///
/// assert!("30-x-20".parse::<GroupSizes>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupSizes(Vec<u32>);

impl GroupSizes {
    /// Builds a schedule from explicit capacities, sorting them descending.
    pub fn new(mut sizes: Vec<u32>) -> Self {
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        Self(sizes)
    }

    /// Parses a hyphen-delimited schedule such as `"30-25-20"`.
    ///
    /// # Errors
    ///
    /// Returns [`GroupingError::InvalidSchedule`] for an empty schedule or
    /// any token that is not a positive integer.
    pub fn parse(input: &str) -> Result<Self, GroupingError> {
        let invalid = |reason: String| GroupingError::InvalidSchedule {
            input: input.to_string(),
            reason,
        };

        if input.trim().is_empty() {
            return Err(invalid("schedule is empty".into()));
        }

        let sizes = input
            .split('-')
            .map(|token| {
                let token = token.trim();
                match token.parse::<u32>() {
                    Ok(0) => Err(invalid("group sizes must be positive".into())),
                    Ok(size) => Ok(size),
                    Err(_) => Err(invalid(format!("token {token:?} is not a positive integer"))),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(sizes))
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all capacities.
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

impl FromStr for GroupSizes {
    type Err = GroupingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GroupSizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, size) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{size}")?;
        }
        Ok(())
    }
}
