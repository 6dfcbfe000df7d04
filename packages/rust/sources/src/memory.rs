//! In-memory source.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;

use docnav_shared::{DocNavError, Result};

use crate::file::{FileIdentity, SourceFile, normalize_relative_path};
use crate::provider::Source;

/// A named source whose files live in memory, keyed by relative path.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    files: BTreeMap<String, Option<Arc<[u8]>>>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: BTreeMap::new(),
        }
    }

    /// Add (or replace) a file.
    pub fn with_file(mut self, relative_path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(relative_path, contents);
        self
    }

    /// Add a file that is listed but fails every read.
    pub fn with_unreadable_file(mut self, relative_path: &str) -> Self {
        self.files.insert(normalize_relative_path(relative_path), None);
        self
    }

    pub fn insert(&mut self, relative_path: &str, contents: impl Into<Vec<u8>>) {
        let bytes: Vec<u8> = contents.into();
        self.files
            .insert(normalize_relative_path(relative_path), Some(Arc::from(bytes)));
    }
}

impl Source for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn find_files(&self, pattern: &Regex) -> Result<Vec<Arc<dyn SourceFile>>> {
        Ok(self
            .files
            .iter()
            .filter(|(path, _)| pattern.is_match(path))
            .map(|(path, contents)| {
                Arc::new(MemorySourceFile {
                    identity: FileIdentity::new(&self.name, path),
                    contents: contents.clone(),
                }) as Arc<dyn SourceFile>
            })
            .collect())
    }
}

/// A file handed out by [`MemorySource`].
#[derive(Debug)]
pub struct MemorySourceFile {
    identity: FileIdentity,
    contents: Option<Arc<[u8]>>,
}

#[async_trait]
impl SourceFile for MemorySourceFile {
    fn identity(&self) -> &FileIdentity {
        &self.identity
    }

    async fn bytes(&self) -> Result<Vec<u8>> {
        match &self.contents {
            Some(bytes) => Ok(bytes.to_vec()),
            None => Err(DocNavError::io(
                self.identity.relative_path(),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "unreadable file"),
            )),
        }
    }
}
