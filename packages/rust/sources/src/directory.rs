//! Physical directory source.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use docnav_shared::{DocNavError, Result, SourceConfig};

use crate::file::{FileIdentity, SourceFile};
use crate::provider::Source;

/// A directory on disk (`root/path`) exposed as a source.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    name: String,
    base_dir: PathBuf,
}

impl DirectorySource {
    pub fn new(name: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            base_dir: base_dir.into(),
        }
    }

    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(&config.name, config.base_dir())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `/`-joined path of `path` relative to the base directory.
    fn relative_path_of(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.base_dir).ok()?;
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

impl Source for DirectorySource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip_all, fields(source = %self.name, pattern = %pattern))]
    fn find_files(&self, pattern: &Regex) -> Result<Vec<Arc<dyn SourceFile>>> {
        if !self.base_dir.is_dir() {
            return Err(DocNavError::source_error(
                &self.name,
                format!("directory {} does not exist", self.base_dir.display()),
            ));
        }

        let mut files: Vec<Arc<dyn SourceFile>> = Vec::new();
        for entry in WalkDir::new(&self.base_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| DocNavError::source_error(&self.name, e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(relative_path) = self.relative_path_of(entry.path()) else {
                continue;
            };
            if !pattern.is_match(&relative_path) {
                continue;
            }
            files.push(Arc::new(PhysicalSourceFile {
                identity: FileIdentity::new(&self.name, &relative_path),
                absolute_path: entry.into_path(),
            }));
        }

        debug!(matched = files.len(), "walked source directory");
        Ok(files)
    }
}

/// A file on disk handed out by [`DirectorySource`].
#[derive(Debug)]
pub struct PhysicalSourceFile {
    identity: FileIdentity,
    absolute_path: PathBuf,
}

impl PhysicalSourceFile {
    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }
}

#[async_trait]
impl SourceFile for PhysicalSourceFile {
    fn identity(&self) -> &FileIdentity {
        &self.identity
    }

    async fn bytes(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.absolute_path)
            .await
            .map_err(|e| DocNavError::io(&self.absolute_path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("docnav-source-test-{}", Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write(base: &Path, rel: &str, contents: &str) {
        let path = base.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[tokio::test]
    async fn walks_nested_directories() {
        let dir = temp_dir();
        write(&dir, "guide/intro.md", "# Intro");
        write(&dir, "guide/setup.md", "# Setup");
        write(&dir, "guide/.order", "setup\nintro\n");
        write(&dir, "index.md", "# Home");

        let source = DirectorySource::new("docs", &dir);
        let md = source.find_files(&Regex::new(r".*\.md$").unwrap()).expect("find");
        let paths: Vec<&str> = md.iter().map(|f| f.relative_path()).collect();
        assert_eq!(paths, ["guide/intro.md", "guide/setup.md", "index.md"]);

        let order = source
            .find_files(&Regex::new(r"(^|/)\.order$").unwrap())
            .expect("find order");
        assert_eq!(order.len(), 1);
        assert_eq!(order[0].identity().directory().parts(), ["guide"]);
        assert_eq!(order[0].lines().await.unwrap(), ["setup", "intro"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn sub_path_from_config() {
        let dir = temp_dir();
        write(&dir, "docs/a.md", "");
        write(&dir, "other/b.md", "");

        let source = DirectorySource::from_config(&SourceConfig {
            name: "repo".into(),
            root: dir.to_string_lossy().into_owned(),
            path: "docs".into(),
        });
        let files = source.find_files(&Regex::new(r".*\.md$").unwrap()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path(), "a.md");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let source = DirectorySource::new("gone", std::env::temp_dir().join("docnav-does-not-exist"));
        let err = source.find_files(&Regex::new(".*").unwrap()).unwrap_err();
        assert!(matches!(err, DocNavError::Source { .. }));
    }
}
