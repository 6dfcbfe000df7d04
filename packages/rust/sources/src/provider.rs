//! Source and provider traits, plus the configured source set.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use tracing::{debug, instrument};

use docnav_shared::{Result, SourceConfig};

use crate::directory::DirectorySource;
use crate::file::SourceFile;

/// A named origin of files, queryable by pattern.
pub trait Source: Send + Sync + fmt::Debug {
    /// Source name; part of every file's Uid.
    fn name(&self) -> &str;

    /// Every file whose `/`-separated relative path matches `pattern`.
    ///
    /// Callers must not rely on the order of the result.
    fn find_files(&self, pattern: &Regex) -> Result<Vec<Arc<dyn SourceFile>>>;
}

/// Aggregates all configured sources.
pub trait SourcesProvider: Send + Sync {
    fn all_sources(&self) -> Vec<Arc<dyn Source>>;
}

/// Query every source of `provider` for `pattern`, concatenating results in
/// source order.
#[instrument(skip_all, fields(pattern = %pattern))]
pub fn find_all(
    provider: &dyn SourcesProvider,
    pattern: &Regex,
) -> Result<Vec<Arc<dyn SourceFile>>> {
    let mut files = Vec::new();
    for source in provider.all_sources() {
        let found = source.find_files(pattern)?;
        debug!(source = source.name(), matched = found.len(), "queried source");
        files.extend(found);
    }
    Ok(files)
}

// ---------------------------------------------------------------------------
// SourceSet
// ---------------------------------------------------------------------------

/// An ordered list of sources.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    sources: Vec<Arc<dyn Source>>,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// One [`DirectorySource`] per `[[sources]]` entry.
    pub fn from_config(configs: &[SourceConfig]) -> Self {
        let mut set = Self::new();
        for config in configs {
            set.push(DirectorySource::from_config(config));
        }
        set
    }

    pub fn push(&mut self, source: impl Source + 'static) {
        self.sources.push(Arc::new(source));
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, source: impl Source + 'static) -> Self {
        self.push(source);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl SourcesProvider for SourceSet {
    fn all_sources(&self) -> Vec<Arc<dyn Source>> {
        self.sources.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySource;

    #[test]
    fn find_all_spans_sources() {
        let set = SourceSet::new()
            .with(MemorySource::new("docs").with_file("intro.md", "# Intro"))
            .with(
                MemorySource::new("api")
                    .with_file("reference.md", "# Ref")
                    .with_file("logo.png", [0u8, 1, 2]),
            );
        assert_eq!(set.len(), 2);

        let md = Regex::new(r".*\.md$").unwrap();
        let files = find_all(&set, &md).expect("find");
        let mut names: Vec<&str> = files.iter().map(|f| f.name()).collect();
        names.sort();
        assert_eq!(names, ["intro", "reference"]);
    }

    #[test]
    fn from_config_builds_directory_sources() {
        let configs = vec![SourceConfig {
            name: "docs".into(),
            root: "/srv/docs".into(),
            path: String::new(),
        }];
        let set = SourceSet::from_config(&configs);
        assert_eq!(set.len(), 1);
        assert_eq!(set.all_sources()[0].name(), "docs");
    }
}
