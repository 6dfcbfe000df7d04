//! Navigation tree types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::location::Location;

/// Order value marking a node as hidden from display.
pub const HIDDEN_ORDER: i32 = -1;

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// Leaf/container discriminator for a navigation node.
///
/// A container with an empty child map is still a container; only `Leaf`
/// marks a page without children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "children", rename_all = "snake_case")]
pub enum NodeKind {
    /// A content page.
    Leaf,
    /// A section, keyed by each child's segment name.
    Container(BTreeMap<String, NavNode>),
}

// ---------------------------------------------------------------------------
// NavNode
// ---------------------------------------------------------------------------

/// A single entry in the navigation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavNode {
    /// Full hierarchical location; unique within the tree.
    pub location: Location,
    /// Leaf segment name, matched against `.order` entries.
    pub file_name: String,
    /// Leaf page or container section.
    pub kind: NodeKind,
    /// Whether a content document backs this node.
    #[serde(default)]
    pub has_content: bool,
    /// Display order among siblings; negative means hidden.
    #[serde(default)]
    pub order: i32,
}

impl NavNode {
    /// Create a leaf node at `location`.
    pub fn leaf(location: Location) -> Self {
        Self::with_kind(location, NodeKind::Leaf)
    }

    /// Create an empty container node at `location`.
    pub fn container(location: Location) -> Self {
        Self::with_kind(location, NodeKind::Container(BTreeMap::new()))
    }

    fn with_kind(location: Location, kind: NodeKind) -> Self {
        let file_name = location.file_name().unwrap_or_default().to_string();
        Self {
            location,
            file_name,
            kind,
            has_content: false,
            order: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf)
    }

    /// Whether the ordering pass hid this node.
    pub fn is_hidden(&self) -> bool {
        self.order < 0
    }

    /// Child map, or `None` for a leaf.
    pub fn children(&self) -> Option<&BTreeMap<String, NavNode>> {
        match &self.kind {
            NodeKind::Leaf => None,
            NodeKind::Container(children) => Some(children),
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut BTreeMap<String, NavNode>> {
        match &mut self.kind {
            NodeKind::Leaf => None,
            NodeKind::Container(children) => Some(children),
        }
    }

    /// Turn a leaf into a container (keeping its fields) and return the
    /// child map.
    pub fn make_container(&mut self) -> &mut BTreeMap<String, NavNode> {
        if self.is_leaf() {
            self.kind = NodeKind::Container(BTreeMap::new());
        }
        match &mut self.kind {
            NodeKind::Container(children) => children,
            NodeKind::Leaf => unreachable!("leaf was converted above"),
        }
    }

    /// Add `child` under this node, converting a leaf into a container.
    ///
    /// The child's location must extend this node's location by exactly one
    /// segment.
    pub fn insert_child(&mut self, child: NavNode) -> Option<NavNode> {
        debug_assert_eq!(child.location.parent().as_ref(), Some(&self.location));
        let key = child.file_name.clone();
        self.make_container().insert(key, child)
    }

    /// Non-hidden children, sorted by display order (ties broken by name).
    pub fn visible_children(&self) -> Vec<&NavNode> {
        self.children().map(visible_sorted).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// NavTree
// ---------------------------------------------------------------------------

/// The navigation tree: root-level names mapped to root nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavTree {
    roots: BTreeMap<String, NavNode>,
}

impl NavTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &BTreeMap<String, NavNode> {
        &self.roots
    }

    pub fn roots_mut(&mut self) -> &mut BTreeMap<String, NavNode> {
        &mut self.roots
    }

    /// Add a root-level node, replacing any node with the same name.
    pub fn insert_root(&mut self, node: NavNode) -> Option<NavNode> {
        debug_assert_eq!(node.location.depth(), 1);
        self.roots.insert(node.file_name.clone(), node)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes at every depth.
    pub fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// Resolve a location to its node, segment by segment.
    pub fn find(&self, location: &Location) -> Option<&NavNode> {
        let (first, rest) = location.parts().split_first()?;
        let mut node = self.roots.get(first)?;
        for part in rest {
            node = node.children()?.get(part)?;
        }
        Some(node)
    }

    pub fn find_mut(&mut self, location: &Location) -> Option<&mut NavNode> {
        let (first, rest) = location.parts().split_first()?;
        let mut node = self.roots.get_mut(first)?;
        for part in rest {
            node = node.children_mut()?.get_mut(part)?;
        }
        Some(node)
    }

    /// Every node in depth-first pre-order, siblings by name.
    pub fn nodes(&self) -> Vec<&NavNode> {
        fn collect<'a>(map: &'a BTreeMap<String, NavNode>, out: &mut Vec<&'a NavNode>) {
            for node in map.values() {
                out.push(node);
                if let Some(children) = node.children() {
                    collect(children, out);
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.roots, &mut out);
        out
    }

    /// Non-hidden root nodes, sorted by display order.
    pub fn visible_roots(&self) -> Vec<&NavNode> {
        visible_sorted(&self.roots)
    }
}

fn visible_sorted(map: &BTreeMap<String, NavNode>) -> Vec<&NavNode> {
    let mut nodes: Vec<&NavNode> = map.values().filter(|n| !n.is_hidden()).collect();
    // BTreeMap iteration is already name-ordered, so a stable sort keeps ties by name.
    nodes.sort_by_key(|n| n.order);
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> NavTree {
        let mut guide = NavNode::container(Location::parse("guide"));
        guide.insert_child(NavNode::leaf(Location::parse("guide.intro")));
        guide.insert_child(NavNode::leaf(Location::parse("guide.setup")));

        let mut tree = NavTree::new();
        tree.insert_root(guide);
        tree.insert_root(NavNode::leaf(Location::parse("about")));
        tree
    }

    #[test]
    fn leaf_and_container_constructors() {
        let leaf = NavNode::leaf(Location::parse("guide.intro"));
        assert!(leaf.is_leaf());
        assert_eq!(leaf.file_name, "intro");
        assert!(leaf.children().is_none());

        let container = NavNode::container(Location::parse("guide"));
        assert!(!container.is_leaf());
        assert_eq!(container.children().map(BTreeMap::len), Some(0));
    }

    #[test]
    fn insert_child_converts_leaf() {
        let mut node = NavNode::leaf(Location::parse("guide"));
        node.insert_child(NavNode::leaf(Location::parse("guide.intro")));
        assert!(!node.is_leaf());
        assert!(node.children().unwrap().contains_key("intro"));
    }

    #[test]
    fn find_resolves_nested_locations() {
        let tree = sample_tree();
        let setup = tree.find(&Location::parse("guide.setup")).expect("setup");
        assert_eq!(setup.file_name, "setup");
        assert!(tree.find(&Location::parse("guide.missing")).is_none());
        assert!(tree.find(&Location::parse("about.nested")).is_none());
        assert!(tree.find(&Location::root()).is_none());
    }

    #[test]
    fn find_addresses_dotted_segments_by_parts() {
        let mut release = NavNode::container(Location::from_parts(["v1.2"]));
        release.insert_child(NavNode::leaf(Location::from_parts(["v1.2", "intro"])));
        let mut tree = NavTree::new();
        tree.insert_root(release);

        let intro = tree
            .find(&Location::from_parts(["v1.2", "intro"]))
            .expect("intro");
        assert_eq!(intro.file_name, "intro");
        assert!(tree.find(&Location::parse("v1.2.intro")).is_none());
    }

    #[test]
    fn nodes_are_preorder() {
        let tree = sample_tree();
        let names: Vec<String> = tree.nodes().iter().map(|n| n.location.to_string()).collect();
        assert_eq!(names, ["about", "guide", "guide.intro", "guide.setup"]);
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn visible_children_skip_hidden_and_sort_by_order() {
        let mut tree = sample_tree();
        {
            let guide = tree.find_mut(&Location::parse("guide")).unwrap();
            let children = guide.children_mut().unwrap();
            children.get_mut("intro").unwrap().order = 1;
            children.get_mut("setup").unwrap().order = 0;
        }
        let guide = tree.find(&Location::parse("guide")).unwrap();
        let order: Vec<&str> = guide
            .visible_children()
            .iter()
            .map(|n| n.file_name.as_str())
            .collect();
        assert_eq!(order, ["setup", "intro"]);

        tree.find_mut(&Location::parse("guide.intro")).unwrap().order = HIDDEN_ORDER;
        let guide = tree.find(&Location::parse("guide")).unwrap();
        assert_eq!(guide.visible_children().len(), 1);
    }

    #[test]
    fn tree_serialization() {
        let tree = sample_tree();
        let json = serde_json::to_string(&tree).expect("serialize");
        assert!(json.contains("\"type\":\"container\""));
        let parsed: NavTree = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, tree);
    }
}
