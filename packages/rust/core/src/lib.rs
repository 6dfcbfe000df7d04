//! Navigation tree reconciliation for DocNav.
//!
//! This crate maps flat source listings onto a navigation tree and annotates
//! every node in place:
//! - [`flagging`] decides whether a node is backed by a content document
//! - [`ordering`] assigns sibling display order, honoring `.order` overrides
//! - [`builder`] builds a tree skeleton from content file locations
//! - [`pipeline`] runs the passes end to end

pub mod builder;
pub mod flagging;
pub mod ordering;
pub mod pipeline;

pub use builder::{build_tree, build_tree_from_locations};
pub use flagging::{ContentIndex, FlagReport, apply_content_flags, update_has_content_flag};
pub use ordering::{OrderEvent, OrderFileRule, OrderOverrides, OrderReport, apply_order, reorder_tree};
pub use pipeline::{AnnotateOptions, AnnotateReport, annotate_tree, build_navigation};
