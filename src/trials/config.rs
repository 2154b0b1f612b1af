//! Run configuration.
//!
//! [`GroupingConfig`] holds every parameter of a run and is threaded
//! explicitly through the runner; nothing is read from ambient state.

use crate::error::GroupingError;
use crate::placement::GroupSizes;
use crate::summary::DisplayNames;

/// Largest accepted trial exponent: at most 10^6 trials per run.
pub const MAX_TRIAL_EXPONENT: u32 = 6;

/// Configuration of a grouping run.
///
/// # Defaults
///
/// ```
/// use u_grouping::placement::GroupSizes;
/// use u_grouping::trials::GroupingConfig;
///
/// let config = GroupingConfig::new(GroupSizes::parse("4-4").unwrap());
/// assert_eq!(config.trial_exponent, 3);
/// assert_eq!(config.trial_count(), 1000);
/// assert!(config.parallel);
/// assert!(!config.one_gender);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_grouping::placement::GroupSizes;
/// use u_grouping::trials::GroupingConfig;
///
/// let config = GroupingConfig::new(GroupSizes::parse("30-25-20").unwrap())
///     .with_trial_exponent(4)
///     .with_one_gender(true)
///     .with_seed(42)
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingConfig {
    /// Target capacities; the length is the group count.
    pub sizes: GroupSizes,

    /// Every group is assumed to be of one gender: only total capacity
    /// is enforced.
    pub one_gender: bool,

    /// Runs 10^`trial_exponent` trials.
    pub trial_exponent: u32,

    /// Whether to run trials in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature. The selected result
    /// is the same either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Report identities instead of display names.
    ///
    /// Only affects summaries, never placement.
    pub use_identity_names: bool,
}

impl GroupingConfig {
    /// A configuration for `sizes` with default settings.
    pub fn new(sizes: GroupSizes) -> Self {
        Self {
            sizes,
            one_gender: false,
            trial_exponent: 3,
            parallel: true,
            seed: None,
            use_identity_names: false,
        }
    }

    /// Sets the group-size schedule.
    pub fn with_sizes(mut self, sizes: GroupSizes) -> Self {
        self.sizes = sizes;
        self
    }

    /// Enables or disables one-gender mode.
    pub fn with_one_gender(mut self, one_gender: bool) -> Self {
        self.one_gender = one_gender;
        self
    }

    /// Sets the trial exponent (10^`exponent` trials).
    pub fn with_trial_exponent(mut self, exponent: u32) -> Self {
        self.trial_exponent = exponent;
        self
    }

    /// Enables or disables parallel trials.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets whether summaries show identities instead of names.
    pub fn with_identity_names(mut self, use_identity_names: bool) -> Self {
        self.use_identity_names = use_identity_names;
        self
    }

    /// Number of trials a run performs.
    pub fn trial_count(&self) -> usize {
        10usize.pow(self.trial_exponent.min(MAX_TRIAL_EXPONENT))
    }

    /// Naming policy for summaries.
    pub fn display_names(&self) -> DisplayNames {
        if self.use_identity_names {
            DisplayNames::Identity
        } else {
            DisplayNames::Detail
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - [`GroupingError::TrialExponentTooLarge`] above [`MAX_TRIAL_EXPONENT`]
    /// - [`GroupingError::InvalidSchedule`] for an empty schedule
    pub fn validate(&self) -> Result<(), GroupingError> {
        if self.trial_exponent > MAX_TRIAL_EXPONENT {
            return Err(GroupingError::TrialExponentTooLarge {
                requested: self.trial_exponent,
                max: MAX_TRIAL_EXPONENT,
            });
        }
        if self.sizes.is_empty() {
            return Err(GroupingError::InvalidSchedule {
                input: self.sizes.to_string(),
                reason: "at least one group is required".into(),
            });
        }
        Ok(())
    }
}
