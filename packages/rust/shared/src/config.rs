//! Application configuration for DocNav.
//!
//! User config lives at `~/.docnav/docnav.toml`.
//! CLI flags override config file values, which override defaults.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DocNavError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docnav.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docnav";

// ---------------------------------------------------------------------------
// Config structs (matching docnav.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Navigation policy.
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// Configured documentation sources, in priority order.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

/// `[navigation]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Regex matched against relative paths to find content documents.
    #[serde(default = "default_content_pattern")]
    pub content_pattern: String,

    /// File name of per-directory order override files.
    #[serde(default = "default_order_file")]
    pub order_file: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            content_pattern: default_content_pattern(),
            order_file: default_order_file(),
        }
    }
}

fn default_content_pattern() -> String {
    r".*\.md$".into()
}
fn default_order_file() -> String {
    ".order".into()
}

impl NavigationConfig {
    /// Compile the content-file pattern.
    pub fn content_regex(&self) -> Result<Regex> {
        Regex::new(&self.content_pattern)
            .map_err(|e| DocNavError::pattern(&self.content_pattern, &e))
    }

    /// Build a pattern matching order files in any directory: either named
    /// exactly `order_file` (`guide/.order`) or a sibling ending in it
    /// (`guide.order` next to `guide/`).
    pub fn order_regex(&self) -> Result<Regex> {
        let pattern = format!("(^|/)[^/]*{}$", regex::escape(&self.order_file));
        Regex::new(&pattern).map_err(|e| DocNavError::pattern(pattern.as_str(), &e))
    }
}

/// `[[sources]]` entry — a physical directory exposed as a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source name; part of every file's Uid.
    pub name: String,
    /// Root directory on disk.
    pub root: String,
    /// Sub-path under `root` that holds the documents.
    #[serde(default)]
    pub path: String,
}

impl SourceConfig {
    /// The directory whose contents this source exposes.
    pub fn base_dir(&self) -> PathBuf {
        let root = Path::new(&self.root);
        if self.path.is_empty() {
            root.to_path_buf()
        } else {
            root.join(&self.path)
        }
    }
}

impl AppConfig {
    /// Check source definitions and patterns before any pass runs.
    pub fn validate(&self) -> Result<()> {
        self.navigation.content_regex()?;
        if self.navigation.order_file.is_empty() {
            return Err(DocNavError::config("navigation.order_file must not be empty"));
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(DocNavError::config("source with empty name"));
            }
            if !seen.insert(source.name.as_str()) {
                return Err(DocNavError::config(format!(
                    "duplicate source name '{}'",
                    source.name
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docnav/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DocNavError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docnav/docnav.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocNavError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        DocNavError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    init_config_at(&config_file_path()?)
}

/// Write a default config file at `path`, creating parent directories.
pub fn init_config_at(path: &Path) -> Result<PathBuf> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| DocNavError::io(dir, e))?;
    }

    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DocNavError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| DocNavError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("content_pattern"));
        assert!(toml_str.contains(".order"));
    }

    #[test]
    fn config_with_sources() {
        let toml_str = r#"
[navigation]
order_file = ".nav"

[[sources]]
name = "docs"
root = "/srv/repo"
path = "docs"

[[sources]]
name = "api"
root = "/srv/api"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].base_dir(), PathBuf::from("/srv/repo/docs"));
        assert_eq!(config.sources[1].base_dir(), PathBuf::from("/srv/api"));
        assert_eq!(config.navigation.order_file, ".nav");
        assert_eq!(config.navigation.content_pattern, r".*\.md$");
        config.validate().expect("valid");
    }

    #[test]
    fn duplicate_source_names_rejected() {
        let toml_str = r#"
[[sources]]
name = "docs"
root = "/a"

[[sources]]
name = "docs"
root = "/b"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate source name"));
    }

    #[test]
    fn invalid_content_pattern_rejected() {
        let mut config = AppConfig::default();
        config.navigation.content_pattern = "(".into();
        assert!(matches!(
            config.validate(),
            Err(DocNavError::Pattern { .. })
        ));
    }

    #[test]
    fn order_regex_matches_directory_and_sibling_files() {
        let nav = NavigationConfig::default();
        let re = nav.order_regex().expect("compile");
        assert!(re.is_match(".order"));
        assert!(re.is_match("guide/.order"));
        assert!(re.is_match("guide.order"));
        assert!(re.is_match("docs/guide.order"));
        assert!(!re.is_match("guide/.orders"));
        assert!(!re.is_match("guide/intro.md"));
        assert!(!re.is_match("guide/.order.md"));
    }

    #[test]
    fn init_and_load_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("docnav-config-test-{}", std::process::id()))
            .join(CONFIG_FILE_NAME);
        init_config_at(&path).expect("init");
        let loaded = load_config_from(&path).expect("load");
        assert!(loaded.sources.is_empty());
        assert_eq!(loaded.navigation.order_file, ".order");
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
