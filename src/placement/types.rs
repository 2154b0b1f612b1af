//! Groups and trial results.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::schedule::GroupSizes;
use super::scoring::weighted_size;
use crate::roster::{MemberId, Roster};

/// One group of a partition.
///
/// Members are kept in descending acceptability order (see
/// [`rank_members_for_group`](super::rank_members_for_group)).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Group {
    /// Target weighted capacity.
    pub target: u32,
    pub members: Vec<MemberId>,
}

impl Group {
    /// An empty group with the given target capacity.
    pub fn new(target: u32) -> Self {
        Self {
            target,
            members: Vec::new(),
        }
    }

    /// Summed multiplicity of the members.
    pub fn weighted_size(&self, roster: &Roster) -> u32 {
        weighted_size(roster, &self.members)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.members.contains(&id)
    }
}

/// The partition produced by one trial.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrialResult {
    pub groups: Vec<Group>,
    pub sizes: GroupSizes,
}

impl TrialResult {
    /// Empty groups following `sizes`.
    pub fn empty(sizes: &GroupSizes) -> Self {
        Self {
            groups: sizes.as_slice().iter().map(|&t| Group::new(t)).collect(),
            sizes: sizes.clone(),
        }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Maps every roster index to the group holding it.
    pub fn assignments(&self, roster: &Roster) -> Vec<Option<usize>> {
        let mut assignment = vec![None; roster.len()];
        for (g, group) in self.groups.iter().enumerate() {
            for &member in &group.members {
                assignment[member] = Some(g);
            }
        }
        assignment
    }

    /// Number of placed identities.
    pub fn placed_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Participating identities that ended up in no group.
    pub fn unplaced(&self, roster: &Roster) -> Vec<MemberId> {
        let assignment = self.assignments(roster);
        roster
            .universe()
            .iter()
            .copied()
            .filter(|&id| assignment[id].is_none())
            .collect()
    }
}
