//! Shared types, error model, and configuration for DocNav.
//!
//! This crate is the foundation depended on by all other DocNav crates.
//! It provides:
//! - [`DocNavError`] — the unified error type
//! - Navigation tree types ([`NavTree`], [`NavNode`], [`NodeKind`])
//! - Hierarchical addressing ([`Location`], [`LocationKey`])
//! - Configuration ([`AppConfig`], [`NavigationConfig`], config loading)

pub mod config;
pub mod error;
pub mod location;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, NavigationConfig, SourceConfig, config_dir, config_file_path, init_config,
    init_config_at, load_config, load_config_from,
};
pub use error::{DocNavError, Result};
pub use location::{LOCATION_SEPARATOR, Location, LocationKey};
pub use types::{HIDDEN_ORDER, NavNode, NavTree, NodeKind};
