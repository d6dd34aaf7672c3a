//! Version ordering and tool-version checks
//!
//! This module handles:
//! - Natural ("human") ordering of recipe version directories, where numeric
//!   runs compare by value so that `2.10.0` sorts after `2.9.0`
//! - Semver constraints recipes may place on the running treebuild

use std::cmp::Ordering;

use semver::{Version, VersionReq};
use thiserror::Error;

/// Current treebuild version from Cargo.toml
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors related to version checking
#[derive(Error, Debug, PartialEq)]
pub enum VersionError {
    /// Current treebuild version doesn't satisfy the required constraint
    #[error("treebuild {current} does not satisfy requirement '{constraint}' from {origin}")]
    VersionMismatch {
        current: String,
        constraint: String,
        origin: String,
    },

    /// Invalid version constraint format
    #[error("Invalid version constraint '{constraint}': {reason}")]
    InvalidConstraint { constraint: String, reason: String },

    /// Invalid version format
    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },
}

/// A run of either ASCII digits or everything else
#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Number(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let bytes = s.as_bytes();
    while start < bytes.len() {
        let digit = bytes[start].is_ascii_digit();
        let end = bytes[start..]
            .iter()
            .position(|b| b.is_ascii_digit() != digit)
            .map_or(bytes.len(), |n| start + n);
        let run = &s[start..end];
        out.push(if digit { Chunk::Number(run) } else { Chunk::Text(run) });
        start = end;
    }
    out
}

/// Compare two digit runs by value without overflowing
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compare two version strings in natural order
///
/// Digit runs compare numerically, other runs lexically, and a number sorts
/// before text at the same position. Versions that are naturally equal but
/// spelled differently (`1.01` and `1.1`) fall back to plain string order so
/// the result is total.
///
/// ```
/// use std::cmp::Ordering;
/// use treebuild::core::version::natural_cmp;
///
/// assert_eq!(natural_cmp("2.10.0", "2.9.0"), Ordering::Greater);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);

    for (l, r) in left.iter().zip(right.iter()) {
        let ord = match (l, r) {
            (Chunk::Number(x), Chunk::Number(y)) => cmp_numeric(x, y),
            (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    left.len().cmp(&right.len()).then_with(|| a.cmp(b))
}

/// Pick the naturally-highest version from a list
pub fn newest<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions.into_iter().max_by(|a, b| natural_cmp(a, b))
}

/// Check that the running treebuild satisfies a recipe's constraint
///
/// # Arguments
/// * `constraint` - A semver constraint string (e.g., ">=0.1.0", "^1.0")
/// * `origin` - Where the constraint came from (for error messages)
pub fn check_tool_version(constraint: &str, origin: &str) -> Result<(), VersionError> {
    check_version_constraint(CURRENT_VERSION, constraint, origin)
}

/// Check if a version satisfies a constraint
pub fn check_version_constraint(
    version: &str,
    constraint: &str,
    origin: &str,
) -> Result<(), VersionError> {
    let parsed_version = Version::parse(version).map_err(|e| VersionError::InvalidVersion {
        version: version.to_string(),
        reason: e.to_string(),
    })?;

    let version_req =
        VersionReq::parse(constraint).map_err(|e| VersionError::InvalidConstraint {
            constraint: constraint.to_string(),
            reason: e.to_string(),
        })?;

    if version_req.matches(&parsed_version) {
        Ok(())
    } else {
        Err(VersionError::VersionMismatch {
            current: version.to_string(),
            constraint: constraint.to_string(),
            origin: origin.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_numeric_runs_compare_by_value() {
        assert_eq!(natural_cmp("2.10.0", "2.9.0"), Ordering::Greater);
        assert_eq!(natural_cmp("1.9.212", "1.10.0"), Ordering::Less);
        assert_eq!(natural_cmp("0.6.190103", "0.6.99"), Ordering::Greater);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("1.2", "1.2.1"), Ordering::Less);
        assert_eq!(natural_cmp("3.6.3", "3.6.3"), Ordering::Equal);
    }

    #[test]
    fn test_text_runs() {
        assert_eq!(natural_cmp("1.0.0-beta", "1.0.0-rc"), Ordering::Less);
        assert_eq!(natural_cmp("1.0.0", "1.0.0a"), Ordering::Less);
    }

    #[test]
    fn test_leading_zeros_are_total() {
        assert_ne!(natural_cmp("1.01", "1.1"), Ordering::Equal);
    }

    #[test]
    fn test_huge_numbers_do_not_overflow() {
        assert_eq!(
            natural_cmp("1.99999999999999999999999", "1.100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_newest() {
        assert_eq!(newest(["2.9.0", "2.10.0", "2.1.0"]), Some("2.10.0"));
        assert_eq!(newest(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_version_constraint() {
        assert!(check_version_constraint("0.1.0", ">=0.1.0", "recipe 'a'").is_ok());
        assert!(matches!(
            check_version_constraint("0.1.0", ">=0.2.0", "recipe 'a'"),
            Err(VersionError::VersionMismatch { .. })
        ));
        assert!(matches!(
            check_version_constraint("0.1.0", "not a constraint", "recipe 'a'"),
            Err(VersionError::InvalidConstraint { .. })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_numeric_triples_match_tuple_order(
            a in (0u32..1000, 0u32..1000, 0u32..1000),
            b in (0u32..1000, 0u32..1000, 0u32..1000),
        ) {
            let va = format!("{}.{}.{}", a.0, a.1, a.2);
            let vb = format!("{}.{}.{}", b.0, b.1, b.2);
            prop_assert_eq!(natural_cmp(&va, &vb), a.cmp(&b));
        }

        #[test]
        fn prop_antisymmetric(a in "[0-9a-z.]{0,12}", b in "[0-9a-z.]{0,12}") {
            prop_assert_eq!(natural_cmp(&a, &b), natural_cmp(&b, &a).reverse());
        }
    }
}
