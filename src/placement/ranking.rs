//! Ranking functions.
//!
//! Both rankings sort on several keys in sequence, later keys only
//! breaking ties of earlier ones:
//!
//! | ranking                    | key 1                  | key 2                | key 3            |
//! |----------------------------|------------------------|----------------------|------------------|
//! | [`rank_groups_for_user`]   | user→group score, desc | weighted size, desc  | random           |
//! | [`rank_members_for_group`] | group→user score, desc | insertion order      | —                |

use rand::Rng;

use super::scoring::{group_user_score, user_group_score, weighted_size};
use super::types::Group;
use crate::roster::{MemberId, Roster};

/// Orders group indices from most to least attractive for `candidate`.
///
/// Groups tied on score and size are ordered uniformly at random. Each
/// group draws one key from `rng` up front, which keeps the comparator a
/// total order; pass a seeded or scripted generator for reproducible
/// tie-breaks.
pub fn rank_groups_for_user<R: Rng>(
    roster: &Roster,
    groups: &[Group],
    candidate: MemberId,
    rng: &mut R,
) -> Vec<usize> {
    let mut keyed: Vec<(u32, u32, u64, usize)> = groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            (
                user_group_score(roster, &group.members, candidate),
                weighted_size(roster, &group.members),
                rng.random::<u64>(),
                index,
            )
        })
        .collect();

    keyed.sort_unstable_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| b.1.cmp(&a.1))
            .then_with(|| a.2.cmp(&b.2))
            .then_with(|| a.3.cmp(&b.3))
    });

    keyed.into_iter().map(|(.., index)| index).collect()
}

/// Orders the members of a group from most to least accepted.
///
/// Members tied on score keep their relative order, so earlier-placed
/// members outrank later ones.
pub fn rank_members_for_group(roster: &Roster, group: &[MemberId]) -> Vec<MemberId> {
    let mut scored: Vec<(u32, MemberId)> = group
        .iter()
        .map(|&member| (group_user_score(roster, group, member), member))
        .collect();

    // stable
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().map(|(_, member)| member).collect()
}
