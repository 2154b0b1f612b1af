//! Error type shared by configuration, roster loading and the trial runner.
//!
//! Nothing inside a single placement trial is fallible: unplaceable
//! identities are an outcome, not an error. Errors only arise from bad
//! configuration, bad input data, or a run that completed no trials.

use thiserror::Error;

/// Errors reported by `u-grouping`.
#[derive(Debug, Error)]
pub enum GroupingError {
    /// The group-size schedule could not be parsed.
    #[error("invalid group-size schedule {input:?}: {reason}")]
    InvalidSchedule { input: String, reason: String },

    /// More trials were requested than the runner allows.
    #[error("trial exponent {requested} exceeds the maximum of {max} (10^{max} trials)")]
    TrialExponentTooLarge { requested: u32, max: u32 },

    /// An identity carries a `--x<n>` weight suffix outside the supported range.
    #[error("unsupported weight suffix on identity {identity:?} (supported: --x1 to --x5)")]
    UnsupportedWeight { identity: String },

    /// The run was cancelled before any trial completed.
    #[error("no trial completed")]
    NoTrials,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GroupingError::TrialExponentTooLarge {
            requested: 7,
            max: 6,
        };
        assert_eq!(
            err.to_string(),
            "trial exponent 7 exceeds the maximum of 6 (10^6 trials)"
        );

        let err = GroupingError::InvalidSchedule {
            input: "3-x".into(),
            reason: "token \"x\" is not a positive integer".into(),
        };
        assert!(err.to_string().starts_with("invalid group-size schedule \"3-x\""));

        let err = GroupingError::UnsupportedWeight {
            identity: "bob--x9".into(),
        };
        assert!(err.to_string().ends_with("(supported: --x1 to --x5)"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GroupingError = io.into();
        assert!(matches!(err, GroupingError::Io(_)));
    }
}
