//! Hierarchical addressing shared by navigation nodes and source files.
//!
//! A [`Location`] is an ordered list of path segments. It displays dot-joined
//! (`guide.setup`) but is always compared segment-wise, so a segment that
//! itself contains a dot never aliases a deeper path.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator used when a location is rendered as a single string.
pub const LOCATION_SEPARATOR: char = '.';

/// Hierarchical path addressing a node or file within the assembled tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(Vec<String>);

impl Location {
    /// The empty location: the scope above all root-level nodes.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a location from its segments.
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// Parse a dot-joined location string. An empty string is the root.
    ///
    /// Every `.` starts a new segment, so this is only the inverse of
    /// `Display` when no segment contains a dot: `["v1.2", "intro"]` displays
    /// as `v1.2.intro` but parses back into three segments. Use
    /// [`from_parts`](Self::from_parts) to address such locations.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        Self::from_parts(dotted.split(LOCATION_SEPARATOR))
    }

    /// The location's segments, outermost first.
    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The last segment, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// A new location one level below this one.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut parts = self.0.clone();
        parts.push(segment.into());
        Self(parts)
    }

    /// The enclosing location, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    /// Whether `self` is `other` or lies underneath it.
    pub fn starts_with(&self, other: &Location) -> bool {
        self.0.starts_with(&other.0)
    }

    /// Lookup key for hash-based matching.
    pub fn key(&self) -> LocationKey {
        LocationKey::from_parts(&self.0)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{LOCATION_SEPARATOR}")?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LocationKey
// ---------------------------------------------------------------------------

/// Single-string form of a segment list, used as a hash map key.
///
/// Every segment is written as `/` followed by the segment with `\` and `/`
/// backslash-escaped. The encoding is injective: distinct segment lists never
/// share a key, and the root (no segments) is the empty string while a single
/// empty segment is `/`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationKey(String);

impl LocationKey {
    pub fn from_parts<S: AsRef<str>>(parts: &[S]) -> Self {
        let mut key = String::new();
        for part in parts {
            key.push('/');
            for c in part.as_ref().chars() {
                if c == '/' || c == '\\' {
                    key.push('\\');
                }
                key.push(c);
            }
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Location> for LocationKey {
    fn from(location: &Location) -> Self {
        location.key()
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
