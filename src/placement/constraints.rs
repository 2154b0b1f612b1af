//! Hard constraints: exclusion pairs and weighted capacity caps.

use crate::roster::{MemberId, Roster};

/// Capacity thresholds for one group.
///
/// A group is over capacity only when a threshold is *exceeded*; holding
/// exactly `max_total` is fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityLimits {
    /// Maximum weighted size.
    pub max_total: u32,
    /// Maximum weighted count of one gender. Ignored in one-gender mode.
    pub max_same_gender: u32,
    /// Groups are assumed homogeneous; only the total applies.
    pub one_gender: bool,
}

impl CapacityLimits {
    /// Normal limits for a group of `target`: the total, and half of it
    /// (floored) per gender.
    pub fn for_target(target: u32, one_gender: bool) -> Self {
        Self {
            max_total: target,
            max_same_gender: target / 2,
            one_gender,
        }
    }

    /// Limits that keep the total cap but drop the gender cap.
    pub fn total_only(target: u32) -> Self {
        Self {
            max_total: target,
            max_same_gender: u32::MAX,
            one_gender: true,
        }
    }

    fn exceeded_by(&self, total: u32, same_gender: u32) -> bool {
        if self.one_gender {
            total > self.max_total
        } else {
            total > self.max_total || same_gender > self.max_same_gender
        }
    }
}

/// Whether `candidate` has an anti-preference with any member of `group`.
pub fn exclusion_conflict(roster: &Roster, group: &[MemberId], candidate: MemberId) -> bool {
    group
        .iter()
        .any(|&member| roster.excluded(member, candidate))
}

/// Whether `group` exceeds `limits`.
///
/// Same-gender load is measured against the `is_male` classification
/// (normally the gender of the identity just added).
pub fn at_capacity(roster: &Roster, group: &[MemberId], is_male: bool, limits: CapacityLimits) -> bool {
    let (total, same_gender) = load(roster, group, is_male);
    limits.exceeded_by(total, same_gender)
}

/// Whether adding `candidate` to `group` would exceed `limits`.
pub fn would_exceed(
    roster: &Roster,
    group: &[MemberId],
    candidate: MemberId,
    limits: CapacityLimits,
) -> bool {
    let (total, same_gender) = load(roster, group, roster.is_male(candidate));
    let weight = roster.weight(candidate);
    limits.exceeded_by(total + weight, same_gender + weight)
}

fn load(roster: &Roster, group: &[MemberId], is_male: bool) -> (u32, u32) {
    group.iter().fold((0, 0), |(total, same), &member| {
        let weight = roster.weight(member);
        let same = if roster.is_male(member) == is_male {
            same + weight
        } else {
            same
        };
        (total + weight, same)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Detail, RosterBuilder};

    fn roster() -> Roster {
        // 0 = m1, 1 = m2--x2, 2 = f1, 3 = f2
        RosterBuilder::new()
            .detail("m1", Detail::male())
            .detail("m2--x2", Detail::male())
            .detail("f1", Detail::female())
            .detail("f2", Detail::female())
            .anti_preference("m1__f1")
            .build()
    }

    #[test]
    fn test_exclusion_symmetric() {
        let r = roster();
        assert!(exclusion_conflict(&r, &[0, 3], 2));
        assert!(exclusion_conflict(&r, &[2], 0));
        assert!(!exclusion_conflict(&r, &[1, 3], 2));
        assert!(!exclusion_conflict(&r, &[], 0));
    }

    #[test]
    fn test_exact_target_is_not_over() {
        let r = roster();
        let limits = CapacityLimits::for_target(4, false);
        // total 4 (m1 + m2x2 + f1), males 3 > 2
        assert!(at_capacity(&r, &[0, 1, 2], true, limits));
        // total 4, males 2, females 2
        assert!(!at_capacity(&r, &[1, 2, 3], true, limits));
        assert!(!at_capacity(&r, &[1, 2, 3], false, limits));
    }

    #[test]
    fn test_total_cap() {
        let r = roster();
        let limits = CapacityLimits::for_target(3, true);
        assert!(!at_capacity(&r, &[0, 1], true, limits));
        assert!(at_capacity(&r, &[0, 1, 2], true, limits));
    }

    #[test]
    fn test_one_gender_skips_gender_cap() {
        let r = roster();
        assert!(at_capacity(&r, &[0, 1], true, CapacityLimits::for_target(4, false)));
        assert!(!at_capacity(&r, &[0, 1], true, CapacityLimits::for_target(4, true)));
        assert!(!at_capacity(&r, &[0, 1], true, CapacityLimits::total_only(4)));
    }

    #[test]
    fn test_would_exceed_counts_candidate() {
        let r = roster();
        let limits = CapacityLimits::for_target(4, false);
        // adding m2 (x2) to [m1]: males 3 > 2
        assert!(would_exceed(&r, &[0], 1, limits));
        // adding f2 to [m1, f1]: total 3, females 2
        assert!(!would_exceed(&r, &[0, 2], 3, limits));
        assert!(would_exceed(&r, &[0, 1, 2], 3, CapacityLimits::total_only(4)));
        assert!(!would_exceed(&r, &[0, 1], 3, CapacityLimits::total_only(4)));
    }
}
