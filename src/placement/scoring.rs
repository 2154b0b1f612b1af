//! Preference-based affinity scores.
//!
//! Both scores weigh members by multiplicity, so a registration standing
//! for three people counts three times.

use crate::roster::{MemberId, Roster};

/// Summed multiplicity of `members`.
pub fn weighted_size(roster: &Roster, members: &[MemberId]) -> u32 {
    members.iter().map(|&m| roster.weight(m)).sum()
}

/// How much `candidate` likes `group`.
///
/// Sums the weight of every member the candidate lists as a preference.
/// A candidate without preferences scores 0 everywhere.
pub fn user_group_score(roster: &Roster, group: &[MemberId], candidate: MemberId) -> u32 {
    group
        .iter()
        .filter(|&&member| roster.prefers(candidate, member))
        .map(|&member| roster.weight(member))
        .sum()
}

/// How much `group` likes `candidate`.
///
/// Sums `weight(candidate) * weight(member)` over members that list the
/// candidate, so both sides' multiplicity counts.
pub fn group_user_score(roster: &Roster, group: &[MemberId], candidate: MemberId) -> u32 {
    let candidate_weight = roster.weight(candidate);
    group
        .iter()
        .filter(|&&member| member != candidate && roster.prefers(member, candidate))
        .map(|&member| candidate_weight * roster.weight(member))
        .sum()
}
