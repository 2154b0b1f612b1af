//! Single-trial assignment engine.
//!
//! # Algorithm
//!
//! **Phase A: ranked placement.** Walk the (shuffled) processing order.
//! Each unplaced identity tries its groups best-first, skipping exclusion
//! conflicts. After an insertion the group is re-ranked; if it is now over
//! capacity, members of the newcomer's gender are evicted from the tail
//! until the freed weight covers the newcomer. Evicted members return to
//! the pool. If the newcomer evicts itself, it tries its next group. Full
//! passes repeat while they change state, up to [`MAX_PLACEMENT_PASSES`].
//!
//! **Phase B: fallback placement.** Every participating identity still
//! unplaced goes to the least-full admissible group, in three passes of
//! decreasing strictness: total and gender caps, total cap only, no cap.
//! Exclusions are never relaxed.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use super::constraints::{at_capacity, exclusion_conflict, would_exceed, CapacityLimits};
use super::ranking::{rank_groups_for_user, rank_members_for_group};
use super::schedule::GroupSizes;
use super::scoring::{user_group_score, weighted_size};
use super::types::{Group, TrialResult};
use crate::roster::{MemberId, Roster};

/// Upper bound on full passes of the ranked placement loop.
///
/// Bounds trials whose evictions keep oscillating.
pub const MAX_PLACEMENT_PASSES: usize = 100;

/// Capacity relaxation levels of the fallback pass, strictest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relaxation {
    /// Total and gender caps.
    Strict,
    /// Total cap only.
    TotalOnly,
    /// No cap; only exclusions apply.
    Unbounded,
}

impl Relaxation {
    /// All levels in the order the fallback pass tries them.
    pub const ORDER: [Relaxation; 3] = [Self::Strict, Self::TotalOnly, Self::Unbounded];

    fn limits(self, target: u32, one_gender: bool) -> Option<CapacityLimits> {
        match self {
            Self::Strict => Some(CapacityLimits::for_target(target, one_gender)),
            Self::TotalOnly => Some(CapacityLimits::total_only(target)),
            Self::Unbounded => None,
        }
    }
}

/// Counters describing how a trial went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrialStats {
    /// Full passes of the ranked placement loop.
    pub passes: usize,
    /// Members removed by eviction, self-evictions included.
    pub evictions: usize,
    /// Identities placed by the fallback pass.
    pub fallback_placed: usize,
    /// Identities no pass could place.
    pub unplaced: usize,
}

#[derive(Debug, Default)]
struct Eviction {
    evicted_self: bool,
    evicted_others: bool,
}

/// Mutable state of one trial: the group arena and the placed set.
struct TrialState {
    groups: Vec<Group>,
    placed: Vec<bool>,
    stats: TrialStats,
}

/// Runs single trials over a shared roster.
///
/// The engine itself is immutable; every call to [`run`](Self::run) builds
/// its own group arena, so one engine can serve many threads.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_grouping::placement::{GroupSizes, TrialEngine};
/// use u_grouping::roster::{Detail, RosterBuilder};
///
/// let roster = RosterBuilder::new()
///     .detail("a", Detail::male())
///     .detail("b", Detail::male())
///     .preferences("a", ["b"])
///     .preferences("b", ["a"])
///     .build();
/// let sizes: GroupSizes = "2".parse().unwrap();
/// let engine = TrialEngine::new(&roster, &sizes, true);
///
/// let (result, _stats) = engine.run_shuffled(&mut StdRng::seed_from_u64(1));
/// assert_eq!(result.groups[0].len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TrialEngine<'a> {
    roster: &'a Roster,
    sizes: &'a GroupSizes,
    one_gender: bool,
}

impl<'a> TrialEngine<'a> {
    pub fn new(roster: &'a Roster, sizes: &'a GroupSizes, one_gender: bool) -> Self {
        Self {
            roster,
            sizes,
            one_gender,
        }
    }

    /// Runs one trial with a freshly shuffled processing order.
    pub fn run_shuffled<R: Rng>(&self, rng: &mut R) -> (TrialResult, TrialStats) {
        let mut order = self.roster.ranked_participants();
        order.shuffle(rng);
        self.run(&order, rng)
    }

    /// Runs one trial with an explicit processing order.
    ///
    /// `order` drives the ranked placement loop; the fallback pass then
    /// covers the whole participating universe. `rng` only breaks ties
    /// between equally attractive groups.
    pub fn run<R: Rng>(&self, order: &[MemberId], rng: &mut R) -> (TrialResult, TrialStats) {
        let mut state = TrialState {
            groups: TrialResult::empty(self.sizes).groups,
            placed: vec![false; self.roster.len()],
            stats: TrialStats::default(),
        };

        self.ranked_placement(&mut state, order, rng);
        self.fallback_placement(&mut state);

        if state.stats.unplaced > 0 {
            debug!(
                unplaced = state.stats.unplaced,
                passes = state.stats.passes,
                "trial left identities unplaced"
            );
        }

        let result = TrialResult {
            groups: state.groups,
            sizes: self.sizes.clone(),
        };
        (result, state.stats)
    }

    fn ranked_placement<R: Rng>(&self, state: &mut TrialState, order: &[MemberId], rng: &mut R) {
        loop {
            state.stats.passes += 1;
            let mut changed = false;

            for &candidate in order {
                if state.placed[candidate] {
                    continue;
                }
                changed |= self.place_ranked(state, candidate, rng);
            }

            let all_placed = order.iter().all(|&id| state.placed[id]);
            if !changed || all_placed || state.stats.passes >= MAX_PLACEMENT_PASSES {
                break;
            }
        }
    }

    /// Places `candidate` in its best admissible group.
    ///
    /// Returns whether any group changed. A candidate that evicts itself
    /// from every group it tries stays unplaced for this pass.
    fn place_ranked<R: Rng>(&self, state: &mut TrialState, candidate: MemberId, rng: &mut R) -> bool {
        let roster = self.roster;
        let ranking = rank_groups_for_user(roster, &state.groups, candidate, rng);
        let mut changed = false;

        for g in ranking {
            if exclusion_conflict(roster, &state.groups[g].members, candidate) {
                continue;
            }

            let group = &mut state.groups[g];
            group.members.push(candidate);
            group.members = rank_members_for_group(roster, &group.members);
            state.placed[candidate] = true;

            let limits = CapacityLimits::for_target(group.target, self.one_gender);
            if !at_capacity(roster, &group.members, roster.is_male(candidate), limits) {
                return true;
            }

            let eviction = self.evict(group, candidate, &mut state.placed, &mut state.stats);
            changed |= eviction.evicted_others;
            if !eviction.evicted_self {
                return true;
            }
        }

        changed
    }

    /// Evicts tail members of the newcomer's gender until the freed weight
    /// covers the newcomer's own weight.
    fn evict(
        &self,
        group: &mut Group,
        newcomer: MemberId,
        placed: &mut [bool],
        stats: &mut TrialStats,
    ) -> Eviction {
        let roster = self.roster;
        let needed = roster.weight(newcomer);
        let is_male = roster.is_male(newcomer);
        let mut freed = 0;
        let mut eviction = Eviction::default();
        let mut pos = group.members.len();

        while freed < needed && pos > 0 {
            pos -= 1;
            let member = group.members[pos];
            if roster.is_male(member) != is_male {
                continue;
            }

            group.members.remove(pos);
            placed[member] = false;
            freed += roster.weight(member);
            stats.evictions += 1;

            if member == newcomer {
                eviction.evicted_self = true;
            } else {
                eviction.evicted_others = true;
            }
            trace!(
                evicted = roster.identity(member),
                by = roster.identity(newcomer),
                "evicted group member"
            );
        }

        eviction
    }

    fn fallback_placement(&self, state: &mut TrialState) {
        let roster = self.roster;

        for &candidate in roster.universe() {
            if state.placed[candidate] {
                continue;
            }

            let order = self.fallback_order(&state.groups, candidate);
            let chosen = Relaxation::ORDER.iter().find_map(|&level| {
                order
                    .iter()
                    .copied()
                    .find(|&g| self.admits(&state.groups[g], candidate, level))
            });

            match chosen {
                Some(g) => {
                    let group = &mut state.groups[g];
                    group.members.push(candidate);
                    group.members = rank_members_for_group(roster, &group.members);
                    state.placed[candidate] = true;
                    state.stats.fallback_placed += 1;
                }
                None => state.stats.unplaced += 1,
            }
        }
    }

    /// Least-full groups first; ties go to the group the candidate likes
    /// most, then to the earlier group.
    fn fallback_order(&self, groups: &[Group], candidate: MemberId) -> Vec<usize> {
        let mut keyed: Vec<(i64, u32, usize)> = groups
            .iter()
            .enumerate()
            .map(|(index, group)| {
                let fill = i64::from(weighted_size(self.roster, &group.members)) - i64::from(group.target);
                let score = user_group_score(self.roster, &group.members, candidate);
                (fill, score, index)
            })
            .collect();

        keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)));
        keyed.into_iter().map(|(.., index)| index).collect()
    }

    fn admits(&self, group: &Group, candidate: MemberId, level: Relaxation) -> bool {
        if exclusion_conflict(self.roster, &group.members, candidate) {
            return false;
        }
        match level.limits(group.target, self.one_gender) {
            Some(limits) => !would_exceed(self.roster, &group.members, candidate, limits),
            None => true,
        }
    }
}
