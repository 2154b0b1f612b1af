//! Aggregate report of a finished partition.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use super::metrics::{favorability, gender_ratio, min_friends};
use crate::placement::TrialResult;
use crate::roster::{MemberId, Roster};

/// How members are named in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayNames {
    /// The detail record's name, falling back to the identity.
    #[default]
    Detail,
    /// Always the identity key.
    Identity,
}

impl DisplayNames {
    /// Display name of `id` under this policy.
    pub fn name_of(self, roster: &Roster, id: MemberId) -> String {
        match (self, &roster.detail(id).name) {
            (Self::Detail, Some(name)) => name.clone(),
            _ => roster.identity(id).to_string(),
        }
    }
}

/// Statistics of one group.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GroupSummary {
    /// Spreadsheet-style label: A, B, …, Z, AA, AB, …
    pub label: String,
    pub target: u32,
    pub weighted_size: u32,
    pub headcount: usize,
    pub male_ratio: f64,
    pub favorability: f64,
    /// Weighted member count per grade/cohort label.
    pub cohorts: BTreeMap<String, u32>,
    /// Display names in acceptability order.
    pub members: Vec<String>,
}

/// Statistics of a whole partition.
///
/// A pure function of the roster, the result and the naming policy:
/// building it twice yields equal summaries.
///
/// # Examples
///
/// ```
/// use u_grouping::placement::{GroupSizes, TrialResult};
/// use u_grouping::roster::{Detail, RosterBuilder};
/// use u_grouping::summary::{DisplayNames, Summary};
///
/// let roster = RosterBuilder::new()
///     .detail("a", Detail::male().with_name("Ann"))
///     .detail("b", Detail::female())
///     .preferences("a", ["b"])
///     .build();
/// let mut result = TrialResult::empty(&GroupSizes::new(vec![2]));
/// result.groups[0].members = vec![0, 1];
///
/// let summary = Summary::new(&roster, &result, DisplayNames::Detail);
/// assert_eq!(summary.groups[0].members, vec!["Ann", "b"]);
/// assert_eq!(summary.placed_percent, 100.0);
/// assert_eq!(summary.min_friends, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Summary {
    pub groups: Vec<GroupSummary>,
    /// Participating identities placed in some group.
    pub placed: usize,
    /// Participating identities.
    pub universe: usize,
    pub placed_percent: f64,
    pub unplaced: Vec<String>,
    pub min_friends: usize,
    pub min_friends_members: Vec<String>,
    pub mean_favorability: f64,
    pub worst_favorability: f64,
}

impl Summary {
    pub fn new(roster: &Roster, result: &TrialResult, names: DisplayNames) -> Self {
        let groups: Vec<GroupSummary> = result
            .groups
            .iter()
            .enumerate()
            .map(|(index, group)| {
                let mut cohorts = BTreeMap::new();
                for &member in &group.members {
                    *cohorts
                        .entry(roster.detail(member).grade.clone())
                        .or_insert(0) += roster.weight(member);
                }
                GroupSummary {
                    label: group_label(index),
                    target: group.target,
                    weighted_size: group.weighted_size(roster),
                    headcount: group.len(),
                    male_ratio: gender_ratio(roster, &group.members),
                    favorability: favorability(roster, &group.members),
                    cohorts,
                    members: group
                        .members
                        .iter()
                        .map(|&m| names.name_of(roster, m))
                        .collect(),
                }
            })
            .collect();

        let unplaced: Vec<String> = result
            .unplaced(roster)
            .into_iter()
            .map(|id| names.name_of(roster, id))
            .collect();
        let universe = roster.universe().len();
        let placed = universe - unplaced.len();
        let placed_percent = if universe == 0 {
            100.0
        } else {
            placed as f64 * 100.0 / universe as f64
        };

        let min = min_friends(roster, &result.groups);
        let favorabilities: Vec<f64> = groups.iter().map(|g| g.favorability).collect();
        let mean_favorability = if favorabilities.is_empty() {
            1.0
        } else {
            favorabilities.iter().sum::<f64>() / favorabilities.len() as f64
        };
        let worst_favorability = favorabilities.iter().copied().fold(1.0, f64::min);

        Self {
            groups,
            placed,
            universe,
            placed_percent,
            unplaced,
            min_friends: min.count,
            min_friends_members: min
                .members
                .into_iter()
                .map(|id| names.name_of(roster, id))
                .collect(),
            mean_favorability,
            worst_favorability,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            writeln!(
                f,
                "Group {} ({}/{}, {} people, {:.0}% male, favorability {:.1}%)",
                group.label,
                group.weighted_size,
                group.target,
                group.headcount,
                group.male_ratio * 100.0,
                group.favorability * 100.0,
            )?;
            let cohorts: Vec<String> = group
                .cohorts
                .iter()
                .filter(|(grade, _)| !grade.is_empty())
                .map(|(grade, count)| format!("{grade}: {count}"))
                .collect();
            if !cohorts.is_empty() {
                writeln!(f, "  cohorts: {}", cohorts.join(", "))?;
            }
            for member in &group.members {
                writeln!(f, "  - {member}")?;
            }
        }

        writeln!(
            f,
            "Placed {}/{} ({:.1}%)",
            self.placed, self.universe, self.placed_percent
        )?;
        if !self.unplaced.is_empty() {
            writeln!(f, "Unplaced: {}", self.unplaced.join(", "))?;
        }
        writeln!(
            f,
            "Minimum friends: {} ({} at minimum)",
            self.min_friends,
            self.min_friends_members.len()
        )?;
        write!(
            f,
            "Favorability: mean {:.1}%, worst {:.1}%",
            self.mean_favorability * 100.0,
            self.worst_favorability * 100.0
        )
    }
}

/// 0 → "A", 25 → "Z", 26 → "AA", 27 → "AB", …
fn group_label(index: usize) -> String {
    let mut n = index;
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    label.iter().rev().map(|&b| b as char).collect()
}
