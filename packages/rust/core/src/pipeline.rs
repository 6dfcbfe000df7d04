//! End-to-end navigation pipeline: sources → skeleton → flags → order.

use std::time::{Duration, Instant};

use regex::Regex;
use tracing::{debug, info, instrument};

use docnav_shared::{NavTree, NavigationConfig, Result};
use docnav_sources::SourcesProvider;

use crate::builder::build_tree;
use crate::flagging::{FlagReport, update_has_content_flag};
use crate::ordering::{OrderEvent, OrderFileRule, OrderReport, reorder_tree};

/// Compiled file policies for both passes.
#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    /// Matches content documents.
    pub content_pattern: Regex,
    /// Recognizes order override files and their scopes.
    pub order_files: OrderFileRule,
}

impl AnnotateOptions {
    pub fn from_config(config: &NavigationConfig) -> Result<Self> {
        Ok(Self {
            content_pattern: config.content_regex()?,
            order_files: OrderFileRule::from_config(config)?,
        })
    }
}

/// Result of annotating a tree.
#[derive(Debug, Clone, Default)]
pub struct AnnotateReport {
    /// Flagging counts.
    pub flags: FlagReport,
    /// Ordering decisions.
    pub order: OrderReport,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Run content flagging and ordering over an existing tree.
///
/// On error the tree may be partially annotated and must not be presented.
#[instrument(skip_all)]
pub async fn annotate_tree(
    provider: &dyn SourcesProvider,
    tree: &mut NavTree,
    options: &AnnotateOptions,
) -> Result<AnnotateReport> {
    let start = Instant::now();

    let flags = update_has_content_flag(provider, &options.content_pattern, tree)?;
    let order = reorder_tree(provider, &options.order_files, tree).await?;

    for event in &order.events {
        match event {
            OrderEvent::Moved { location, index } => {
                debug!(%location, index, "moving according to order file");
            }
            OrderEvent::Hidden { location } => {
                debug!(%location, "hiding according to order file");
            }
        }
    }

    let report = AnnotateReport {
        flags,
        order,
        elapsed: start.elapsed(),
    };
    info!(
        content = report.flags.content_nodes,
        structural = report.flags.structural_nodes,
        hidden = report.order.hidden_count(),
        "navigation tree annotated"
    );
    Ok(report)
}

/// Build a tree from the provider's content documents and annotate it.
pub async fn build_navigation(
    provider: &dyn SourcesProvider,
    options: &AnnotateOptions,
) -> Result<(NavTree, AnnotateReport)> {
    let mut tree = build_tree(provider, &options.content_pattern)?;
    let report = annotate_tree(provider, &mut tree, options).await?;
    Ok((tree, report))
}
