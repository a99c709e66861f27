//! Plain-text tree dumps for snapshot testing.

use std::fmt::Write;

use crate::dom::node::NodeId;
use crate::dom::tree::Tree;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Dump `start` and its subtree, one node per line, indented two spaces per
/// level. Each line reads `tag#id.class "text" color [x,y wxh]`, omitting the
/// parts a node doesn't have.
///
/// # Examples
///
/// ```ignore
/// let mut doc = Document::new(DocumentConfig::default())?;
/// let label = doc.create_text("hi");
/// doc.append_child(doc.root(), label)?;
/// doc.tick();
/// insta::assert_snapshot!(dump_tree(doc.tree(), doc.root()));
/// ```
pub fn dump_tree(tree: &Tree, start: NodeId) -> String {
    let mut out = String::new();
    dump_node(tree, start, 0, &mut out);
    out.truncate(out.trim_end().len());
    out
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn dump_node(tree: &Tree, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let _ = write!(out, "{:indent$}{}", "", node.tag(), indent = depth * 2);
    if let Some(node_id) = node.id() {
        let _ = write!(out, "#{node_id}");
    }
    for class in node.classes().iter() {
        let _ = write!(out, ".{class}");
    }
    if let Some(text) = node.text() {
        let _ = write!(out, " {text:?}");
    }
    if let Some(color) = node.style().color() {
        let _ = write!(out, " {color}");
    }
    if let Some(r) = node.region() {
        let _ = write!(out, " [{},{} {}x{}]", r.x, r.y, r.width, r.height);
    }
    out.push('\n');

    for &child in tree.child_nodes(id) {
        dump_node(tree, child, depth + 1, out);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
