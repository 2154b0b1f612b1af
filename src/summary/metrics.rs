//! Quality metrics of groups and partitions.

use crate::placement::{Group, TrialResult};
use crate::roster::{MemberId, Roster};

/// Participants tied at the lowest friend count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinFriends {
    /// Lowest number of own preferences found in one's own group.
    pub count: usize,
    /// Participants achieving `count`, in roster order.
    pub members: Vec<MemberId>,
}

/// Share of realized preferences inside `group`.
///
/// Considers every ordered pair `(i, j)`, `i != j`, weighted by
/// `weight(i) * weight(j)`; the pair is a hit when `i` lists `j`. A group
/// without pairs scores 1.0.
///
/// ```
/// use u_grouping::roster::{Detail, RosterBuilder};
/// use u_grouping::summary::favorability;
///
/// let roster = RosterBuilder::new()
///     .detail("a", Detail::male())
///     .detail("b", Detail::male())
///     .preferences("a", ["b"])
///     .build();
/// assert_eq!(favorability(&roster, &[]), 1.0);
/// assert_eq!(favorability(&roster, &[0, 1]), 0.5);
/// ```
pub fn favorability(roster: &Roster, group: &[MemberId]) -> f64 {
    let mut hits = 0u64;
    let mut total = 0u64;

    for &i in group {
        for &j in group {
            if i == j {
                continue;
            }
            let weight = u64::from(roster.weight(i)) * u64::from(roster.weight(j));
            total += weight;
            if roster.prefers(i, j) {
                hits += weight;
            }
        }
    }

    if total == 0 {
        1.0
    } else {
        hits as f64 / total as f64
    }
}

/// Head-count share of members flagged male. 0.0 for an empty group.
pub fn gender_ratio(roster: &Roster, group: &[MemberId]) -> f64 {
    if group.is_empty() {
        return 0.0;
    }
    let males = group.iter().filter(|&&m| roster.is_male(m)).count();
    males as f64 / group.len() as f64
}

/// How many of `id`'s preferences share its group.
pub fn friend_count(roster: &Roster, group: &[MemberId], id: MemberId) -> usize {
    group
        .iter()
        .filter(|&&member| roster.prefers(id, member))
        .count()
}

/// Lowest friend count over participants that expressed preferences.
///
/// Unplaced participants count zero friends.
pub fn min_friends(roster: &Roster, groups: &[Group]) -> MinFriends {
    let mut assignment: Vec<Option<&Group>> = vec![None; roster.len()];
    for group in groups {
        for &member in &group.members {
            assignment[member] = Some(group);
        }
    }

    let counts: Vec<(MemberId, usize)> = roster
        .ranked_participants()
        .into_iter()
        .map(|id| {
            let count = assignment[id].map_or(0, |group| friend_count(roster, &group.members, id));
            (id, count)
        })
        .collect();

    let Some(count) = counts.iter().map(|&(_, c)| c).min() else {
        return MinFriends::default();
    };

    MinFriends {
        count,
        members: counts
            .into_iter()
            .filter(|&(_, c)| c == count)
            .map(|(id, _)| id)
            .collect(),
    }
}

/// Lowest group favorability of a partition; 1.0 without groups.
pub fn worst_favorability(roster: &Roster, result: &TrialResult) -> f64 {
    result
        .groups
        .iter()
        .map(|group| favorability(roster, &group.members))
        .fold(1.0, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::GroupSizes;
    use crate::roster::{Detail, RosterBuilder};
    use proptest::prelude::*;

    fn roster() -> Roster {
        // 0 = a, 1 = b--x2, 2 = c, 3 = d
        RosterBuilder::new()
            .detail("a", Detail::male())
            .detail("b--x2", Detail::female())
            .detail("c", Detail::male())
            .detail("d", Detail::female())
            .preferences("a", ["b--x2", "c"])
            .preferences("b--x2", ["a"])
            .preferences("c", ["d"])
            .build()
    }

    fn partition(groups: &[&[MemberId]]) -> TrialResult {
        let mut result = TrialResult::empty(&GroupSizes::new(vec![2; groups.len()]));
        for (g, members) in groups.iter().enumerate() {
            result.groups[g].members = members.to_vec();
        }
        result
    }

    #[test]
    fn test_favorability_weighted() {
        let r = roster();
        // pairs: a->b (2, hit), b->a (2, hit) => 1.0
        assert_eq!(favorability(&r, &[0, 1]), 1.0);
        // a,b,c: a->b 2 hit, a->c 1 hit, b->a 2 hit, b->c 2, c->a 1, c->b 2
        // hits 5 / total 10
        assert!((favorability(&r, &[0, 1, 2]) - 0.5).abs() < 1e-12);
        assert_eq!(favorability(&r, &[1, 3]), 0.0);
        assert_eq!(favorability(&r, &[2]), 1.0);
    }

    #[test]
    fn test_gender_ratio_is_headcount() {
        let r = roster();
        assert_eq!(gender_ratio(&r, &[0, 1]), 0.5);
        assert_eq!(gender_ratio(&r, &[0, 2]), 1.0);
        assert_eq!(gender_ratio(&r, &[]), 0.0);
    }

    #[test]
    fn test_min_friends() {
        let r = roster();
        let result = partition(&[&[0, 1], &[2, 3]]);
        let min = min_friends(&r, &result.groups);
        // a: 1 (b), b: 1 (a), c: 1 (d)
        assert_eq!(min.count, 1);
        assert_eq!(min.members, vec![0, 1, 2]);

        let result = partition(&[&[0, 3], &[1, 2]]);
        let min = min_friends(&r, &result.groups);
        assert_eq!(min.count, 0);
        assert_eq!(min.members, vec![0, 1, 2]);
    }

    #[test]
    fn test_min_friends_unplaced_counts_zero() {
        let r = roster();
        let result = partition(&[&[0, 1], &[3]]);
        let min = min_friends(&r, &result.groups);
        assert_eq!(min.count, 0);
        assert_eq!(min.members, vec![2]);
    }

    #[test]
    fn test_min_friends_without_participants() {
        let r = RosterBuilder::new().detail("a", Detail::male()).build();
        assert_eq!(min_friends(&r, &[]), MinFriends::default());
    }

    #[test]
    fn test_worst_favorability() {
        let r = roster();
        let result = partition(&[&[0, 1], &[2, 3]]);
        // g1: c->d hit (1), d->c (1) => 0.5
        assert_eq!(worst_favorability(&r, &result), 0.5);
        assert_eq!(worst_favorability(&r, &partition(&[])), 1.0);
    }

    proptest! {
        #[test]
        fn prop_favorability_in_unit_interval(
            prefs in prop::collection::vec(prop::collection::vec(0usize..6, 0..6), 6),
            weights in prop::collection::vec(1u32..6, 6),
            members in prop::collection::btree_set(0usize..6, 0..6),
        ) {
            let names: Vec<String> = weights
                .iter()
                .enumerate()
                .map(|(i, &w)| if w == 1 { format!("p{i}") } else { format!("p{i}--x{w}") })
                .collect();
            let mut builder = RosterBuilder::new();
            for name in &names {
                builder = builder.detail(name.clone(), Detail::male());
            }
            for (i, list) in prefs.iter().enumerate() {
                builder = builder.preferences(names[i].clone(), list.iter().map(|&j| names[j].clone()));
            }
            let roster = builder.build();
            let group: Vec<MemberId> = members.into_iter().collect();

            let f = favorability(&roster, &group);
            prop_assert!((0.0..=1.0).contains(&f));
            if group.len() < 2 {
                prop_assert_eq!(f, 1.0);
            }
        }
    }
}
