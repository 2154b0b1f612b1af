//! Identity and per-identity detail records.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// External key of one registration.
pub type Identity = String;

/// Dense index of an identity inside a [`Roster`](super::Roster).
///
/// Indices follow insertion order and are only meaningful for the roster
/// that produced them.
pub type MemberId = usize;

/// Attributes recorded for one identity.
///
/// # Examples
///
/// ```
/// use u_grouping::roster::Detail;
///
/// let detail = Detail::female().with_grade("10").with_name("Ada");
/// assert!(!detail.male);
/// assert_eq!(detail.grade, "10");
/// assert!(detail.is_participating());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Detail {
    /// Binary gender flag used by the gender-balance caps.
    #[cfg_attr(feature = "serde", serde(default))]
    pub male: bool,

    /// Grade or cohort label. Only reported, never constrained.
    #[cfg_attr(feature = "serde", serde(default))]
    pub grade: String,

    /// `Some(false)` removes the identity from the population.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub participating: Option<bool>,

    /// Human-readable name for reports.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,

    /// Raw preference list, used when the preference map has no entry.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub preferences: Option<Vec<Identity>>,
}

impl Detail {
    /// A participating male record with no other attributes.
    pub fn male() -> Self {
        Self {
            male: true,
            ..Self::default()
        }
    }

    /// A participating female record with no other attributes.
    pub fn female() -> Self {
        Self::default()
    }

    /// Sets the grade/cohort label.
    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = grade.into();
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the participation flag.
    pub fn with_participating(mut self, participating: bool) -> Self {
        self.participating = Some(participating);
        self
    }

    /// Sets the raw preference list.
    pub fn with_preferences<I, S>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Identity>,
    {
        self.preferences = Some(preferences.into_iter().map(Into::into).collect());
        self
    }

    /// Whether this identity takes part in grouping.
    ///
    /// Missing flags count as participating.
    pub fn is_participating(&self) -> bool {
        self.participating != Some(false)
    }
}
