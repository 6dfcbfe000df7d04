//! Tree skeleton builder.
//!
//! Builds a [`NavTree`] from the locations of content documents. Every
//! location becomes a node; its prefixes become containers.

use regex::Regex;
use tracing::{debug, instrument};

use docnav_shared::{Location, NavNode, NavTree, Result};
use docnav_sources::{SourcesProvider, find_all};

/// Build a skeleton tree from every content document in `provider`.
///
/// Duplicate locations collapse into one node here; the flagging pass
/// rejects them only when they land on a container.
#[instrument(skip_all, fields(pattern = %content_pattern))]
pub fn build_tree(provider: &dyn SourcesProvider, content_pattern: &Regex) -> Result<NavTree> {
    let files = find_all(provider, content_pattern)?;
    let tree = build_tree_from_locations(files.iter().map(|f| f.location()));
    debug!(files = files.len(), nodes = tree.node_count(), "tree skeleton built");
    Ok(tree)
}

/// Build a skeleton tree from locations.
///
/// A location that is also the prefix of another becomes a container; all
/// other locations become leaves.
pub fn build_tree_from_locations<'a>(
    locations: impl IntoIterator<Item = &'a Location>,
) -> NavTree {
    let mut tree = NavTree::new();
    for location in locations {
        insert_location(&mut tree, location);
    }
    tree
}

fn insert_location(tree: &mut NavTree, location: &Location) {
    let parts = location.parts();
    let Some(first) = parts.first() else {
        return;
    };

    let mut node = tree
        .roots_mut()
        .entry(first.clone())
        .or_insert_with(|| NavNode::leaf(Location::from_parts([first.as_str()])));

    for (depth, part) in parts.iter().enumerate().skip(1) {
        let children = node.make_container();
        node = children
            .entry(part.clone())
            .or_insert_with(|| NavNode::leaf(Location::from_parts(&parts[..=depth])));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docnav_sources::{MemorySource, SourceSet};

    #[test]
    fn builds_nested_structure() {
        let locations = [
            Location::parse("guide.intro"),
            Location::parse("guide.setup"),
            Location::parse("about"),
        ];
        let tree = build_tree_from_locations(&locations);

        let guide = tree.find(&Location::parse("guide")).expect("guide");
        assert!(!guide.is_leaf());
        assert_eq!(guide.file_name, "guide");
        assert_eq!(guide.children().unwrap().len(), 2);

        let intro = tree.find(&Location::parse("guide.intro")).expect("intro");
        assert!(intro.is_leaf());
        assert_eq!(intro.location.parts(), ["guide", "intro"]);

        assert!(tree.find(&Location::parse("about")).unwrap().is_leaf());
    }

    #[test]
    fn page_with_subpages_becomes_container() {
        // Order of insertion must not matter.
        for locations in [
            [Location::parse("guide"), Location::parse("guide.intro")],
            [Location::parse("guide.intro"), Location::parse("guide")],
        ] {
            let tree = build_tree_from_locations(&locations);
            assert!(!tree.find(&Location::parse("guide")).unwrap().is_leaf());
            assert_eq!(tree.node_count(), 2);
        }
    }

    #[test]
    fn locations_stay_consistent_with_ancestors() {
        let locations = [Location::parse("a.b.c.d")];
        let tree = build_tree_from_locations(&locations);
        for node in tree.nodes() {
            let parent = node.location.parent().expect("non-root");
            assert_eq!(node.location, parent.child(node.file_name.clone()));
        }
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn build_from_sources_ignores_non_content() {
        let set = SourceSet::new().with(
            MemorySource::new("docs")
                .with_file("guide/intro.md", "")
                .with_file("guide/.order", "intro")
                .with_file("assets/logo.png", ""),
        );
        let tree = build_tree(&set, &Regex::new(r".*\.md$").unwrap()).expect("build");
        assert_eq!(tree.node_count(), 2);
        assert!(tree.find(&Location::parse("assets")).is_none());
    }
}
