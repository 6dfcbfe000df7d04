//! Source file identity and the lazy content-access trait.

use std::fmt;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use docnav_shared::{DocNavError, Location, Result};

/// Separator between source name and relative path when hashing a Uid.
pub const UID_SEPARATOR: char = '#';

const BYTE_ORDER_MARK: char = '\u{feff}';

// ---------------------------------------------------------------------------
// FileIdentity
// ---------------------------------------------------------------------------

/// Immutable addressing data for one file in a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIdentity {
    source_name: String,
    relative_path: String,
    location: Location,
    name: String,
    uid: String,
}

impl FileIdentity {
    /// Derive the identity of `relative_path` inside the named source.
    pub fn new(source_name: &str, relative_path: &str) -> Self {
        let relative_path = normalize_relative_path(relative_path);
        let location = location_from_relative_path(&relative_path);
        let name = location.file_name().unwrap_or_default().to_string();
        let uid = compute_uid(source_name, &relative_path);

        Self {
            source_name: source_name.to_string(),
            relative_path,
            location,
            name,
            uid,
        }
    }

    /// Name of the owning source.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Path relative to the source root, `/`-separated.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Hierarchical location with the extension removed.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Last segment of the location.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deterministic identifier from source name and relative path.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Segments of the directory containing this file (empty at the source root).
    pub fn directory(&self) -> Location {
        let mut parts: Vec<&str> = self.relative_path.split('/').collect();
        parts.pop();
        Location::from_parts(parts)
    }

    /// Uid of the containing directory, or `None` for files at the source root.
    pub fn parent_uid(&self) -> Option<String> {
        let (dir, _) = self.relative_path.rsplit_once('/')?;
        Some(compute_uid(&self.source_name, dir))
    }
}

impl fmt::Display for FileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source_name, self.relative_path)
    }
}

/// Normalize separators to `/` and strip leading `./` or `/`.
pub fn normalize_relative_path(raw: &str) -> String {
    let unified = raw.replace('\\', "/");
    let mut trimmed = unified.as_str();
    loop {
        if let Some(rest) = trimmed.strip_prefix("./") {
            trimmed = rest;
        } else if let Some(rest) = trimmed.strip_prefix('/') {
            trimmed = rest;
        } else {
            break;
        }
    }
    trimmed.to_string()
}

/// Location of a `/`-separated relative path: one segment per path component,
/// with the extension dropped from the last one.
///
/// A dotfile with no further extension (`.order`) keeps its full name.
pub fn location_from_relative_path(relative_path: &str) -> Location {
    let mut parts: Vec<&str> = relative_path.split('/').filter(|p| !p.is_empty()).collect();
    if let Some(last) = parts.last_mut() {
        let full: &str = *last;
        match full.rfind('.') {
            Some(idx) if idx > 0 => *last = &full[..idx],
            _ => {}
        }
    }
    Location::from_parts(parts)
}

/// Uppercase hex SHA-256 of `source_name#relative_path`.
pub fn compute_uid(source_name: &str, relative_path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source_name.as_bytes());
    hasher.update(UID_SEPARATOR.to_string().as_bytes());
    hasher.update(relative_path.as_bytes());
    format!("{:X}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// SourceFile
// ---------------------------------------------------------------------------

/// One addressable file in a source, with lazily-read contents.
#[async_trait]
pub trait SourceFile: Send + Sync + fmt::Debug {
    /// Addressing data fixed at discovery time.
    fn identity(&self) -> &FileIdentity;

    /// Read the raw bytes.
    async fn bytes(&self) -> Result<Vec<u8>>;

    /// Read the contents as UTF-8 text, without a leading byte order mark.
    async fn text(&self) -> Result<String> {
        let bytes = self.bytes().await?;
        let text = String::from_utf8(bytes).map_err(|e| {
            DocNavError::source_error(
                self.identity().source_name(),
                format!("{} is not valid UTF-8: {e}", self.identity().relative_path()),
            )
        })?;
        Ok(match text.strip_prefix(BYTE_ORDER_MARK) {
            Some(rest) => rest.to_string(),
            None => text,
        })
    }

    /// Read the contents split into lines (`\n` or `\r\n`).
    async fn lines(&self) -> Result<Vec<String>> {
        let text = self.text().await?;
        Ok(text.lines().map(str::to_string).collect())
    }

    fn location(&self) -> &Location {
        self.identity().location()
    }

    fn relative_path(&self) -> &str {
        self.identity().relative_path()
    }

    fn name(&self) -> &str {
        self.identity().name()
    }

    fn uid(&self) -> &str {
        self.identity().uid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_from_nested_markdown() {
        let id = FileIdentity::new("docs", "guide/intro.md");
        assert_eq!(id.relative_path(), "guide/intro.md");
        assert_eq!(id.location().parts(), ["guide", "intro"]);
        assert_eq!(id.location().to_string(), "guide.intro");
        assert_eq!(id.name(), "intro");
        assert_eq!(id.directory().parts(), ["guide"]);
        assert_eq!(id.to_string(), "docs:guide/intro.md");
    }

    #[test]
    fn windows_separators_are_normalized() {
        let id = FileIdentity::new("docs", "guide\\setup.md");
        assert_eq!(id.relative_path(), "guide/setup.md");
        assert_eq!(id.location().parts(), ["guide", "setup"]);
        assert_eq!(normalize_relative_path("./a/b.md"), "a/b.md");
        assert_eq!(normalize_relative_path("/a.md"), "a.md");
    }

    #[test]
    fn only_last_extension_is_dropped() {
        let loc = location_from_relative_path("v1.2/notes.final.md");
        assert_eq!(loc.parts(), ["v1.2", "notes.final"]);
    }

    #[test]
    fn dotfile_keeps_its_name() {
        let id = FileIdentity::new("docs", "guide/.order");
        assert_eq!(id.name(), ".order");
        assert_eq!(id.directory().parts(), ["guide"]);

        let root_order = FileIdentity::new("docs", ".order");
        assert!(root_order.directory().is_root());
    }

    #[test]
    fn uid_is_deterministic_and_source_scoped() {
        let a = compute_uid("docs", "guide/intro.md");
        assert_eq!(a, compute_uid("docs", "guide/intro.md"));
        assert_ne!(a, compute_uid("other", "guide/intro.md"));
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn parent_uid_points_at_directory() {
        let id = FileIdentity::new("docs", "guide/intro.md");
        assert_eq!(id.parent_uid(), Some(compute_uid("docs", "guide")));
        assert_eq!(FileIdentity::new("docs", "index.md").parent_uid(), None);
    }
}
