//! Multiplicity encoded in identity suffixes.
//!
//! One registration may stand for several people, written as a `--x<n>`
//! suffix on the identity (`"smith--x3"` is three people). Capacity and
//! ratio arithmetic always works on these weights, never on head-count.

use crate::error::GroupingError;

/// Largest supported multiplicity.
pub const MAX_MULTIPLIER: u32 = 5;

const SUFFIX_MARKER: &str = "--x";

const KNOWN_SUFFIXES: [(&str, u32); 4] = [("--x2", 2), ("--x3", 3), ("--x4", 4), ("--x5", 5)];

/// Returns the multiplicity encoded in `identity`.
///
/// Only the suffixes `--x2` through `--x5` are recognized; anything else,
/// including an unsupported suffix such as `--x9`, yields 1.
///
/// ```
/// use u_grouping::roster::multiplier;
///
/// assert_eq!(multiplier("alice--x3"), 3);
/// assert_eq!(multiplier("alice"), 1);
/// assert_eq!(multiplier("alice--x9"), 1);
/// ```
pub fn multiplier(identity: &str) -> u32 {
    KNOWN_SUFFIXES
        .iter()
        .find(|(suffix, _)| identity.ends_with(suffix))
        .map_or(1, |&(_, weight)| weight)
}

/// Sums [`multiplier`] over a collection of identities.
pub fn total_weight<I, S>(identities: I) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    identities
        .into_iter()
        .map(|identity| multiplier(identity.as_ref()))
        .sum()
}

/// Strict variant of [`multiplier`].
///
/// An identity ending in `--x` followed only by digits must encode a
/// weight between 1 and [`MAX_MULTIPLIER`]; anything else is rejected
/// instead of silently counting as one person.
///
/// # Errors
///
/// Returns [`GroupingError::UnsupportedWeight`] for suffixes like `--x9`,
/// `--x0` or `--x12`.
pub fn parse_multiplier(identity: &str) -> Result<u32, GroupingError> {
    let Some(pos) = identity.rfind(SUFFIX_MARKER) else {
        return Ok(1);
    };
    let digits = &identity[pos + SUFFIX_MARKER.len()..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(1);
    }
    match digits.parse::<u32>() {
        Ok(weight) if (1..=MAX_MULTIPLIER).contains(&weight) => Ok(weight),
        _ => Err(GroupingError::UnsupportedWeight {
            identity: identity.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_suffixes() {
        assert_eq!(multiplier("alice"), 1);
        assert_eq!(multiplier("alice--x2"), 2);
        assert_eq!(multiplier("alice--x3"), 3);
        assert_eq!(multiplier("alice--x4"), 4);
        assert_eq!(multiplier("alice--x5"), 5);
    }

    #[test]
    fn test_unknown_suffix_defaults_to_one() {
        assert_eq!(multiplier("alice--x9"), 1);
        assert_eq!(multiplier("alice--x1"), 1);
        assert_eq!(multiplier("alice-x3"), 1);
        assert_eq!(multiplier("alice--x3b"), 1);
        assert_eq!(multiplier(""), 1);
    }

    #[test]
    fn test_total_weight() {
        assert_eq!(total_weight(["a", "b--x2", "c--x5"]), 8);
        assert_eq!(total_weight(Vec::<String>::new()), 0);
        let owned = vec!["x--x3".to_string(), "y".to_string()];
        assert_eq!(total_weight(&owned), 4);
    }

    #[test]
    fn test_parse_multiplier_accepts_supported() {
        assert_eq!(parse_multiplier("bob").unwrap(), 1);
        assert_eq!(parse_multiplier("bob--x1").unwrap(), 1);
        assert_eq!(parse_multiplier("bob--x4").unwrap(), 4);
        // A marker not followed by digits is part of the name.
        assert_eq!(parse_multiplier("bob--xavier").unwrap(), 1);
    }

    #[test]
    fn test_parse_multiplier_rejects_unsupported() {
        for identity in ["bob--x9", "bob--x0", "bob--x12"] {
            let err = parse_multiplier(identity).unwrap_err();
            assert!(
                matches!(err, GroupingError::UnsupportedWeight { .. }),
                "{identity} should be rejected"
            );
        }
    }

    #[test]
    fn test_strict_agrees_with_lenient_when_valid() {
        for identity in ["a", "a--x2", "a--x3", "a--x4", "a--x5", "a--xyz"] {
            assert_eq!(parse_multiplier(identity).unwrap(), multiplier(identity));
        }
    }
}
