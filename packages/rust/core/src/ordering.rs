//! Sibling ordering pass.
//!
//! Every node gets an integer display order. Siblings default to ordinal
//! name order; an order file overrides the order of one directory's direct
//! children and hides children it does not list. The file lives either
//! inside the directory (`guide/.order`) or next to it (`guide.order`).

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use regex::Regex;
use tracing::{debug, instrument};

use docnav_shared::{
    DocNavError, HIDDEN_ORDER, Location, LocationKey, NavNode, NavTree, NavigationConfig,
    NodeKind, Result,
};
use docnav_sources::{FileIdentity, SourceFile, SourcesProvider, find_all};

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// One override decision taken by the ordering pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEvent {
    /// The node was listed in its directory's order file.
    Moved { location: Location, index: i32 },
    /// The node was missing from its directory's order file.
    Hidden { location: Location },
}

impl OrderEvent {
    pub fn location(&self) -> &Location {
        match self {
            Self::Moved { location, .. } | Self::Hidden { location } => location,
        }
    }
}

/// Outcome of an ordering run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderReport {
    /// Override decisions in traversal order.
    pub events: Vec<OrderEvent>,
    /// Number of scopes whose order came from an order file.
    pub scopes_overridden: usize,
}

impl OrderReport {
    pub fn hidden(&self) -> impl Iterator<Item = &Location> {
        self.events.iter().filter_map(|e| match e {
            OrderEvent::Hidden { location } => Some(location),
            OrderEvent::Moved { .. } => None,
        })
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden().count()
    }
}

// ---------------------------------------------------------------------------
// OrderFileRule
// ---------------------------------------------------------------------------

/// Recognizes order files and resolves the scope each one governs.
#[derive(Debug, Clone)]
pub struct OrderFileRule {
    name: String,
    pattern: Regex,
}

impl OrderFileRule {
    pub fn from_config(config: &NavigationConfig) -> Result<Self> {
        Ok(Self {
            name: config.order_file.clone(),
            pattern: config.order_regex()?,
        })
    }

    /// Pattern matching both in-directory and sibling order files.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// The scope whose children `file` orders.
    ///
    /// `guide/.order` governs `guide`; the sibling `guide.order` governs
    /// `guide` as well.
    pub fn scope_of(&self, file: &FileIdentity) -> Location {
        let relative_path = file.relative_path();
        let file_name = relative_path.rsplit('/').next().unwrap_or(relative_path);
        let directory = file.directory();
        match file_name.strip_suffix(self.name.as_str()) {
            Some(stem) if !stem.is_empty() => directory.child(stem),
            _ => directory,
        }
    }
}

// ---------------------------------------------------------------------------
// OrderOverrides
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct OrderFile {
    origin: String,
    lines: Vec<String>,
}

/// Order-file contents keyed by the scope they apply to.
#[derive(Debug, Clone, Default)]
pub struct OrderOverrides {
    scopes: HashMap<LocationKey, OrderFile>,
}

impl OrderOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every order file up front.
    ///
    /// Fails with [`DocNavError::AmbiguousOrder`] before any read when two
    /// files apply to the same scope; read failures propagate as-is.
    pub async fn load(files: Vec<Arc<dyn SourceFile>>, rule: &OrderFileRule) -> Result<Self> {
        let mut seen: HashMap<LocationKey, &Arc<dyn SourceFile>> = HashMap::new();
        for file in &files {
            let scope = rule.scope_of(file.identity());
            if let Some(existing) = seen.insert(scope.key(), file) {
                return Err(DocNavError::AmbiguousOrder {
                    scope: scope.to_string(),
                    first: existing.identity().to_string(),
                    second: file.identity().to_string(),
                });
            }
        }

        let mut overrides = Self::new();
        for file in &files {
            let lines = file.lines().await?;
            overrides.scopes.insert(
                rule.scope_of(file.identity()).key(),
                OrderFile {
                    origin: file.identity().to_string(),
                    lines,
                },
            );
        }
        Ok(overrides)
    }

    /// Register `lines` as the order for the children of `scope`.
    pub fn insert(&mut self, scope: &Location, lines: Vec<String>) {
        self.scopes.insert(
            scope.key(),
            OrderFile {
                origin: format!("<inline:{scope}>"),
                lines,
            },
        );
    }

    /// Order-file lines for the children of `scope`.
    pub fn get(&self, scope: &Location) -> Option<&[String]> {
        self.scopes.get(&scope.key()).map(|f| f.lines.as_slice())
    }

    fn origin(&self, scope: &Location) -> Option<&str> {
        self.scopes.get(&scope.key()).map(|f| f.origin.as_str())
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Pass
// ---------------------------------------------------------------------------

/// Query every source for order files and assign `order` to every node of
/// `tree`.
#[instrument(skip_all, fields(pattern = %rule.pattern()))]
pub async fn reorder_tree(
    provider: &dyn SourcesProvider,
    rule: &OrderFileRule,
    tree: &mut NavTree,
) -> Result<OrderReport> {
    let overrides = OrderOverrides::load(find_all(provider, rule.pattern())?, rule).await?;
    debug!(order_files = overrides.len(), "order files loaded");

    let report = apply_order(tree, &overrides);
    debug!(
        scopes_overridden = report.scopes_overridden,
        hidden = report.hidden_count(),
        "order applied"
    );
    Ok(report)
}

/// Assign `order` to every node from prefetched overrides.
///
/// Each scope first gets name order (`0, 1, 2, …`), its descendants are
/// ordered next, and finally the scope's own order file, if any, replaces
/// the defaults of its direct children.
pub fn apply_order(tree: &mut NavTree, overrides: &OrderOverrides) -> OrderReport {
    let mut report = OrderReport::default();
    set_order(tree.roots_mut(), &Location::root(), overrides, &mut report);
    report
}

fn set_order(
    children: &mut BTreeMap<String, NavNode>,
    scope: &Location,
    overrides: &OrderOverrides,
    report: &mut OrderReport,
) {
    // BTreeMap iterates in key order, which is the default display order.
    for (index, node) in children.values_mut().enumerate() {
        node.order = order_index(index);
        if let NodeKind::Container(grandchildren) = &mut node.kind {
            set_order(grandchildren, &node.location, overrides, report);
        }
    }

    apply_override(children, scope, overrides, report);
}

fn apply_override(
    children: &mut BTreeMap<String, NavNode>,
    scope: &Location,
    overrides: &OrderOverrides,
    report: &mut OrderReport,
) {
    let Some(lines) = overrides.get(scope) else {
        return;
    };
    report.scopes_overridden += 1;
    debug!(
        scope = %scope,
        origin = overrides.origin(scope).unwrap_or_default(),
        "applying order file"
    );

    for node in children.values_mut() {
        match lines.iter().position(|line| *line == node.file_name) {
            Some(index) => {
                node.order = order_index(index);
                report.events.push(OrderEvent::Moved {
                    location: node.location.clone(),
                    index: node.order,
                });
            }
            None => {
                node.order = HIDDEN_ORDER;
                report.events.push(OrderEvent::Hidden {
                    location: node.location.clone(),
                });
            }
        }
    }
}

/// Saturating `usize` → `i32`, so huge sibling lists never wrap negative.
fn order_index(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}
