//! Content flagging pass.
//!
//! Marks each node as content-bearing or purely structural by matching node
//! locations against the locations of content documents found in the sources.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use regex::Regex;
use tracing::{debug, instrument};

use docnav_shared::{DocNavError, Location, LocationKey, NavNode, NavTree, NodeKind, Result};
use docnav_sources::{SourceFile, SourcesProvider, find_all};

/// Counts produced by a flagging run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagReport {
    /// Nodes with `has_content = true`.
    pub content_nodes: usize,
    /// Containers without a content document.
    pub structural_nodes: usize,
}

// ---------------------------------------------------------------------------
// ContentIndex
// ---------------------------------------------------------------------------

/// Content documents keyed by location.
///
/// A location may collect several documents (overlapping sources); that is
/// only a fault once a container resolves to it.
#[derive(Debug, Default)]
pub struct ContentIndex {
    files: HashMap<LocationKey, Vec<Arc<dyn SourceFile>>>,
    file_count: usize,
}

impl ContentIndex {
    /// Index `files` by location.
    pub fn build(files: impl IntoIterator<Item = Arc<dyn SourceFile>>) -> Self {
        let mut index = Self::default();
        for file in files {
            index.files.entry(file.location().key()).or_default().push(file);
            index.file_count += 1;
        }
        index
    }

    /// Every content document at `location`.
    pub fn get(&self, location: &Location) -> &[Arc<dyn SourceFile>] {
        self.files
            .get(&location.key())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The single content document at `location`.
    ///
    /// Fails with [`DocNavError::AmbiguousContent`] when more than one
    /// document resolves to it.
    pub fn single(&self, location: &Location) -> Result<Option<&Arc<dyn SourceFile>>> {
        match self.get(location) {
            [] => Ok(None),
            [file] => Ok(Some(file)),
            [first, second, ..] => Err(DocNavError::AmbiguousContent {
                location: location.to_string(),
                first: first.identity().to_string(),
                second: second.identity().to_string(),
            }),
        }
    }

    /// Number of distinct locations.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Number of indexed documents, duplicates included.
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Pass
// ---------------------------------------------------------------------------

/// Query every source for content documents and set `has_content` on every
/// node of `tree`.
#[instrument(skip_all, fields(pattern = %content_pattern))]
pub fn update_has_content_flag(
    provider: &dyn SourcesProvider,
    content_pattern: &Regex,
    tree: &mut NavTree,
) -> Result<FlagReport> {
    let index = ContentIndex::build(find_all(provider, content_pattern)?);
    debug!(
        locations = index.len(),
        files = index.file_count(),
        "content index built"
    );

    let report = apply_content_flags(tree, &index)?;
    debug!(
        content = report.content_nodes,
        structural = report.structural_nodes,
        "content flags applied"
    );
    Ok(report)
}

/// Set `has_content` on every node from a prebuilt index.
///
/// Leaves are always content and never consult the index. A container is
/// content when exactly one document sits at its location; more than one is
/// a [`DocNavError::AmbiguousContent`] fault. Children are flagged before
/// their parent.
pub fn apply_content_flags(tree: &mut NavTree, index: &ContentIndex) -> Result<FlagReport> {
    let mut report = FlagReport::default();
    set_content_flag(tree.roots_mut(), index, &mut report)?;
    Ok(report)
}

fn set_content_flag(
    nodes: &mut BTreeMap<String, NavNode>,
    index: &ContentIndex,
    report: &mut FlagReport,
) -> Result<()> {
    for node in nodes.values_mut() {
        let has_content = match &mut node.kind {
            NodeKind::Leaf => true,
            NodeKind::Container(children) => {
                set_content_flag(children, index, report)?;
                index.single(&node.location)?.is_some()
            }
        };

        node.has_content = has_content;
        if has_content {
            report.content_nodes += 1;
        } else {
            report.structural_nodes += 1;
        }
    }
    Ok(())
}
