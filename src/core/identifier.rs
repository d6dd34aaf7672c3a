//! Component identifiers and references
//!
//! A [`ComponentId`] names exactly one recipe (`name/version`). Recipes refer
//! to each other through [`QualifiedReference`]s, which may carry a
//! `@namespace/channel` qualifier. Users select components with
//! [`ComponentRequest`]s.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::config::defaults::ALL_KEYWORD;
use crate::error::RequestError;

/// `name/version[@namespace/channel]`
fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([^/@\s{}]+)/([^/@\s{}]+)(?:@([^/@\s{}]+)/([^/@\s{}]+))?$")
            .expect("reference pattern is valid")
    })
}

/// Segments become directory names, so `.` and `..` are never valid
fn is_dot_only(s: &str) -> bool {
    s.chars().all(|c| c == '.')
}

fn is_plain_segment(s: &str) -> bool {
    !s.is_empty()
        && !is_dot_only(s)
        && !s.contains(['/', '@'])
        && !s.chars().any(char::is_whitespace)
}

/// Identifies one versioned recipe
///
/// Ordering is by name, then by the literal version string. It is only used
/// to make scheduling deterministic, never to compare versions; see
/// [`crate::core::version`] for that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId {
    /// Component name
    pub name: String,
    /// Component version
    pub version: String,
}

impl ComponentId {
    /// Create a new identifier
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Attach a namespace/channel qualifier
    pub fn qualified(&self, namespace: &str, channel: &str) -> String {
        format!("{self}@{namespace}/{channel}")
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

impl FromStr for ComponentId {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((name, version)) if is_plain_segment(name) && is_plain_segment(version) => {
                Ok(Self::new(name, version))
            }
            _ => Err(RequestError::Malformed {
                request: s.to_string(),
            }),
        }
    }
}

/// Authority and release line of a dependency
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Qualifier {
    /// Namespace (the authority publishing the component)
    pub namespace: String,
    /// Channel (release line)
    pub channel: String,
}

/// A dependency as declared by a recipe
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedReference {
    /// Referenced component
    pub component: ComponentId,
    /// Optional `@namespace/channel` qualifier
    pub qualifier: Option<Qualifier>,
}

impl QualifiedReference {
    /// Parse `name/version[@namespace/channel]`, returning `None` if malformed
    pub fn parse(reference: &str) -> Option<Self> {
        let caps = reference_pattern().captures(reference.trim())?;
        if caps.iter().skip(1).flatten().any(|m| is_dot_only(m.as_str())) {
            return None;
        }
        let component = ComponentId::new(&caps[1], &caps[2]);
        let qualifier = match (caps.get(3), caps.get(4)) {
            (Some(namespace), Some(channel)) => Some(Qualifier {
                namespace: namespace.as_str().to_string(),
                channel: channel.as_str().to_string(),
            }),
            _ => None,
        };
        Some(Self {
            component,
            qualifier,
        })
    }

    /// Whether this reference is qualified with exactly `namespace/channel`
    pub fn is_in(&self, namespace: &str, channel: &str) -> bool {
        self.qualifier
            .as_ref()
            .is_some_and(|q| q.namespace == namespace && q.channel == channel)
    }
}

impl fmt::Display for QualifiedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(q) => write!(f, "{}@{}/{}", self.component, q.namespace, q.channel),
            None => write!(f, "{}", self.component),
        }
    }
}

/// A component selection as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentRequest {
    /// Every available component at its newest version
    All,
    /// A component at its newest version
    Newest(String),
    /// An exact `name==version`
    Exact(ComponentId),
}

impl FromStr for ComponentRequest {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(ALL_KEYWORD) {
            return Ok(Self::All);
        }

        let malformed = || RequestError::Malformed {
            request: s.to_string(),
        };

        match s.split_once("==") {
            Some((name, version)) => {
                if is_plain_segment(name) && is_plain_segment(version) {
                    Ok(Self::Exact(ComponentId::new(name, version)))
                } else {
                    Err(malformed())
                }
            }
            None if is_plain_segment(s) => Ok(Self::Newest(s.to_string())),
            None => Err(malformed()),
        }
    }
}
