//! JSON roster documents.
//!
//! A document is the exported form of the three core inputs:
//!
//! ```json
//! {
//!   "users": { "ada": { "male": false, "grade": "10" }, "bo--x2": { "male": true } },
//!   "preferences": { "ada": ["bo--x2"] },
//!   "anti_preferences": ["ada__cy"]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::builder::{Roster, RosterBuilder};
use super::types::{Detail, Identity};
use super::weight::parse_multiplier;
use crate::error::GroupingError;

/// Serialized form of the population.
///
/// Maps are ordered by identity so that the resulting [`Roster`] (and
/// therefore every seeded run) is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterDocument {
    pub users: BTreeMap<Identity, Detail>,

    #[serde(default)]
    pub preferences: BTreeMap<Identity, Vec<Identity>>,

    #[serde(default)]
    pub anti_preferences: Vec<String>,
}

impl RosterDocument {
    /// Parses a document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`GroupingError::Json`] on malformed input.
    pub fn from_json_str(s: &str) -> Result<Self, GroupingError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads and parses a JSON document from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GroupingError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks every identity's weight suffix strictly.
    ///
    /// # Errors
    ///
    /// Returns [`GroupingError::UnsupportedWeight`] for the first identity
    /// with an out-of-range `--x<n>` suffix.
    pub fn validate(&self) -> Result<(), GroupingError> {
        for identity in self.users.keys() {
            parse_multiplier(identity)?;
        }
        Ok(())
    }

    /// Validates and resolves the document into a [`Roster`].
    pub fn into_roster(self) -> Result<Roster, GroupingError> {
        self.validate()?;
        Ok(RosterBuilder::new()
            .details(self.users)
            .preference_map(self.preferences)
            .anti_preferences(self.anti_preferences)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "users": {
            "bo--x2": { "male": true, "grade": "11", "name": "Bo" },
            "ada": { "male": false, "grade": "10", "preferences": ["bo--x2"] },
            "cy": { "male": true, "participating": false }
        },
        "preferences": { "bo--x2": ["ada"] },
        "anti_preferences": ["ada__cy", "cy__ada"]
    }"#;

    #[test]
    fn test_parse_and_resolve() {
        let doc = RosterDocument::from_json_str(DOC).unwrap();
        assert_eq!(doc.users.len(), 3);

        let roster = doc.into_roster().unwrap();
        // BTreeMap order: "ada", "bo--x2", "cy".
        assert_eq!(roster.identity(0), "ada");
        assert_eq!(roster.weight(1), 2);
        assert_eq!(roster.detail(1).name.as_deref(), Some("Bo"));
        assert!(roster.prefers(0, 1));
        assert!(roster.prefers(1, 0));
        assert!(roster.excluded(0, 2));
        assert_eq!(roster.universe(), &[0, 1]);
    }

    #[test]
    fn test_missing_optional_sections() {
        let doc = RosterDocument::from_json_str(r#"{ "users": { "a": {} } }"#).unwrap();
        assert!(doc.preferences.is_empty());
        assert!(doc.anti_preferences.is_empty());
        let roster = doc.into_roster().unwrap();
        assert!(!roster.is_male(0));
    }

    #[test]
    fn test_rejects_unsupported_weight() {
        let doc = RosterDocument::from_json_str(r#"{ "users": { "a--x9": {} } }"#).unwrap();
        assert!(matches!(
            doc.into_roster(),
            Err(GroupingError::UnsupportedWeight { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            RosterDocument::from_json_str("{ users: "),
            Err(GroupingError::Json(_))
        ));
    }

    #[test]
    fn test_round_trip_shape() {
        let doc = RosterDocument::from_json_str(DOC).unwrap();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"anti_preferences\""));
        assert!(!json.contains("\"participating\":null"));
    }
}
