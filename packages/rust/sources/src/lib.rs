//! Pluggable documentation sources.
//!
//! A [`Source`] is a named origin of files that can be queried by regex; a
//! [`SourcesProvider`] aggregates every configured source. Each discovered
//! file is exposed as a [`SourceFile`] carrying an immutable [`FileIdentity`]
//! (relative path, location, name, Uid) and lazy access to its contents.
//!
//! Built-in sources:
//! - [`DirectorySource`] — a physical directory walked recursively
//! - [`MemorySource`] — files held in memory, for tests and embedding

mod directory;
mod file;
mod memory;
mod provider;

pub use directory::{DirectorySource, PhysicalSourceFile};
pub use file::{
    FileIdentity, SourceFile, UID_SEPARATOR, compute_uid, location_from_relative_path,
    normalize_relative_path,
};
pub use memory::{MemorySource, MemorySourceFile};
pub use provider::{Source, SourceSet, SourcesProvider, find_all};
