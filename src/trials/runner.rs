//! Multi-trial execution.
//!
//! [`TrialRunner`] runs 10^k independent placement trials, each with its
//! own seeded random stream, and keeps the one with the best
//! [`TrialFitness`]. Trials share nothing but the read-only roster, so
//! they run on rayon's pool when the `parallel` feature is enabled.
//!
//! Trial `t` draws from `StdRng::seed_from_u64(seed + t)`, and a full
//! fitness tie goes to the lower trial index. The selected result is
//! therefore a function of the seed alone, independent of thread count
//! and scheduling.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, trace};

use super::config::GroupingConfig;
use super::fitness::TrialFitness;
use crate::error::GroupingError;
use crate::placement::{TrialEngine, TrialResult};
use crate::roster::Roster;

/// Outcome of a grouping run.
#[derive(Debug, Clone)]
pub struct GroupingRun {
    /// The best partition found.
    pub best: TrialResult,

    /// Fitness of `best`.
    pub fitness: TrialFitness,

    /// Index of the trial that produced `best`.
    pub best_trial: usize,

    /// Number of trials that completed.
    pub trials_run: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Seed the trial streams were derived from.
    pub seed: u64,
}

/// A completed trial and its fitness.
#[derive(Debug, Clone)]
struct ScoredTrial {
    trial: usize,
    result: TrialResult,
    fitness: TrialFitness,
}

impl ScoredTrial {
    /// Keeps the better of two trials; a full tie keeps the lower index.
    fn better(self, other: Self) -> Self {
        match self.fitness.compare(&other.fitness) {
            std::cmp::Ordering::Greater => self,
            std::cmp::Ordering::Less => other,
            std::cmp::Ordering::Equal => {
                if self.trial <= other.trial {
                    self
                } else {
                    other
                }
            }
        }
    }
}

fn select_best<I>(trials: I) -> Option<ScoredTrial>
where
    I: IntoIterator<Item = ScoredTrial>,
{
    trials.into_iter().reduce(ScoredTrial::better)
}

/// Executes grouping runs.
///
/// # Usage
///
/// ```
/// use u_grouping::placement::GroupSizes;
/// use u_grouping::roster::{Detail, RosterBuilder};
/// use u_grouping::trials::{GroupingConfig, TrialRunner};
///
/// let roster = RosterBuilder::new()
///     .detail("a", Detail::male())
///     .detail("b", Detail::female())
///     .detail("c", Detail::female())
///     .detail("d", Detail::male())
///     .preferences("a", ["b"])
///     .preferences("c", ["d"])
///     .build();
/// let config = GroupingConfig::new(GroupSizes::parse("2-2").unwrap())
///     .with_trial_exponent(2)
///     .with_seed(42);
///
/// let run = TrialRunner::run(&roster, &config).unwrap();
/// assert_eq!(run.trials_run, 100);
/// assert_eq!(run.fitness.min_friends, 1);
/// ```
pub struct TrialRunner;

impl TrialRunner {
    /// Runs all configured trials and returns the best one.
    ///
    /// # Errors
    ///
    /// Returns the validation error of an invalid `config`.
    pub fn run(roster: &Roster, config: &GroupingConfig) -> Result<GroupingRun, GroupingError> {
        Self::run_with_cancel(roster, config, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// Once the flag is set, trials that have not started are skipped and
    /// the best completed trial is returned with `cancelled` set.
    ///
    /// # Errors
    ///
    /// - the validation error of an invalid `config`
    /// - [`GroupingError::NoTrials`] if cancellation preceded every trial
    pub fn run_with_cancel(
        roster: &Roster,
        config: &GroupingConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GroupingRun, GroupingError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let trial_count = config.trial_count();
        let engine = TrialEngine::new(roster, &config.sizes, config.one_gender);
        let completed = AtomicUsize::new(0);

        info!(
            trials = trial_count,
            groups = config.sizes.group_count(),
            capacity = config.sizes.total(),
            participants = roster.universe().len(),
            one_gender = config.one_gender,
            seed,
            "starting grouping run"
        );

        let is_cancelled = || {
            cancel
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
        };

        let run_trial = |trial: usize| -> Option<ScoredTrial> {
            if is_cancelled() {
                return None;
            }
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(trial as u64));
            let (result, stats) = engine.run_shuffled(&mut rng);
            let fitness = TrialFitness::evaluate(roster, &result);
            completed.fetch_add(1, Ordering::Relaxed);
            trace!(
                trial,
                passes = stats.passes,
                evictions = stats.evictions,
                unplaced = stats.unplaced,
                min_friends = fitness.min_friends,
                "trial finished"
            );
            Some(ScoredTrial {
                trial,
                result,
                fitness,
            })
        };

        let best = if config.parallel {
            run_parallel(trial_count, &run_trial)
        } else {
            select_best((0..trial_count).filter_map(&run_trial))
        };

        let trials_run = completed.load(Ordering::Relaxed);
        let cancelled = is_cancelled();
        let best = best.ok_or(GroupingError::NoTrials)?;

        if cancelled {
            debug!(trials_run, "run cancelled");
        }
        info!(
            trials_run,
            best_trial = best.trial,
            min_friends = best.fitness.min_friends,
            tied_at_min = best.fitness.tied_at_min,
            worst_favorability = best.fitness.worst_favorability,
            "grouping run finished"
        );

        Ok(GroupingRun {
            best: best.result,
            fitness: best.fitness,
            best_trial: best.trial,
            trials_run,
            cancelled,
            seed,
        })
    }
}

#[cfg(feature = "parallel")]
fn run_parallel<F>(trial_count: usize, run_trial: &F) -> Option<ScoredTrial>
where
    F: Fn(usize) -> Option<ScoredTrial> + Sync,
{
    (0..trial_count)
        .into_par_iter()
        .filter_map(run_trial)
        .reduce_with(ScoredTrial::better)
}

#[cfg(not(feature = "parallel"))]
fn run_parallel<F>(trial_count: usize, run_trial: &F) -> Option<ScoredTrial>
where
    F: Fn(usize) -> Option<ScoredTrial>,
{
    select_best((0..trial_count).filter_map(run_trial))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::GroupSizes;
    use crate::roster::{Detail, RosterBuilder};

    fn pairs_roster() -> Roster {
        RosterBuilder::new()
            .detail("a", Detail::male())
            .detail("b", Detail::male())
            .detail("c", Detail::male())
            .detail("d", Detail::male())
            .preferences("a", ["b"])
            .preferences("b", ["a"])
            .preferences("c", ["d"])
            .preferences("d", ["c"])
            .build()
    }

    fn config(sizes: &str) -> GroupingConfig {
        GroupingConfig::new(GroupSizes::parse(sizes).unwrap())
            .with_trial_exponent(2)
            .with_seed(42)
    }

    fn scored(trial: usize, min_friends: usize) -> ScoredTrial {
        ScoredTrial {
            trial,
            result: TrialResult::empty(&GroupSizes::new(vec![1])),
            fitness: TrialFitness {
                min_friends,
                tied_at_min: 1,
                worst_favorability: 1.0,
            },
        }
    }

    #[test]
    fn test_select_best_prefers_higher_min_friends() {
        let best = select_best(vec![scored(0, 2), scored(1, 3)]).unwrap();
        assert_eq!(best.trial, 1);
        assert_eq!(best.fitness.min_friends, 3);
    }

    #[test]
    fn test_select_best_tie_keeps_lower_index() {
        let best = select_best(vec![scored(4, 1), scored(2, 1), scored(7, 1)]).unwrap();
        assert_eq!(best.trial, 2);
        assert!(select_best(Vec::new()).is_none());
    }

    #[test]
    fn test_mutual_pairs_grouped() {
        let roster = pairs_roster();
        let run = TrialRunner::run(&roster, &config("2-2").with_one_gender(true)).unwrap();

        assert_eq!(run.trials_run, 100);
        assert!(!run.cancelled);
        assert_eq!(run.seed, 42);
        assert_eq!(run.fitness.min_friends, 1);

        let assignments = run.best.assignments(&roster);
        assert_eq!(assignments[0], assignments[1]);
        assert_eq!(assignments[2], assignments[3]);
        assert_ne!(assignments[0], assignments[2]);
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let roster = RosterBuilder::new()
            .detail("a", Detail::male())
            .detail("b", Detail::female())
            .detail("c", Detail::male())
            .detail("d", Detail::female())
            .detail("e", Detail::male())
            .detail("f", Detail::female())
            .preferences("a", ["b", "c"])
            .preferences("b", ["d"])
            .preferences("c", ["e", "f"])
            .preferences("d", ["a"])
            .preferences("e", ["f"])
            .preferences("f", ["b"])
            .build();
        let sequential =
            TrialRunner::run(&roster, &config("2-2-2").with_parallel(false)).unwrap();
        let parallel = TrialRunner::run(&roster, &config("2-2-2").with_parallel(true)).unwrap();

        assert_eq!(sequential.best_trial, parallel.best_trial);
        assert_eq!(sequential.best, parallel.best);
        assert_eq!(sequential.fitness, parallel.fitness);
    }

    #[test]
    fn test_same_seed_same_result() {
        let roster = pairs_roster();
        let cfg = config("3-1").with_parallel(false);
        let first = TrialRunner::run(&roster, &cfg).unwrap();
        let second = TrialRunner::run(&roster, &cfg).unwrap();
        assert_eq!(first.best, second.best);
        assert_eq!(first.best_trial, second.best_trial);
    }

    #[test]
    fn test_every_participant_accounted_for() {
        let roster = RosterBuilder::new()
            .detail("a", Detail::male())
            .detail("b", Detail::male())
            .detail("c", Detail::male())
            .detail("x", Detail::male().with_participating(false))
            .anti_preference("a__b")
            .anti_preference("a__c")
            .build();
        let run = TrialRunner::run(&roster, &config("2-1").with_one_gender(true)).unwrap();

        let placed = run.best.placed_count();
        let unplaced = run.best.unplaced(&roster);
        assert_eq!(placed + unplaced.len(), roster.universe().len());
        assert!(!run.best.groups.iter().any(|g| g.contains(3)));
        for group in &run.best.groups {
            assert!(!(group.contains(0) && group.contains(1)));
            assert!(!(group.contains(0) && group.contains(2)));
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let roster = pairs_roster();
        let result = TrialRunner::run(&roster, &config("2-2").with_trial_exponent(7));
        assert!(matches!(
            result,
            Err(GroupingError::TrialExponentTooLarge { requested: 7, .. })
        ));
    }

    #[test]
    fn test_cancel_before_start() {
        let roster = pairs_roster();
        let cancel = Arc::new(AtomicBool::new(true));
        let result = TrialRunner::run_with_cancel(&roster, &config("2-2"), Some(cancel));
        assert!(matches!(result, Err(GroupingError::NoTrials)));
    }

    #[test]
    fn test_unset_cancel_flag_runs_everything() {
        let roster = pairs_roster();
        let cancel = Arc::new(AtomicBool::new(false));
        let run = TrialRunner::run_with_cancel(&roster, &config("2-2"), Some(cancel)).unwrap();
        assert_eq!(run.trials_run, 100);
        assert!(!run.cancelled);
    }

    #[test]
    fn test_empty_roster() {
        let roster = RosterBuilder::new().build();
        let run = TrialRunner::run(&roster, &config("2").with_trial_exponent(0)).unwrap();
        assert_eq!(run.trials_run, 1);
        assert_eq!(run.best.placed_count(), 0);
        assert_eq!(run.fitness.min_friends, 0);
    }
}
