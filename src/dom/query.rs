//! Tree queries: visitor traversal, id/class/tag lookup, selectors, text.

use std::ops::ControlFlow;

use crate::css::parser::{parse_selector_list, ParseError};
use crate::css::stylesheet::matches_selector;

use super::node::{Node, NodeId};
use super::tree::Tree;

impl Tree {
    /// Visit `start` and its subtree in document order: self, `::before`,
    /// children, `::after`. The visitor can stop the walk early.
    pub fn accept<B>(
        &self,
        start: NodeId,
        visitor: &mut impl FnMut(NodeId, &Node) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let Some(node) = self.get(start) else {
            return ControlFlow::Continue(());
        };
        visitor(start, node)?;
        for &child in self.child_nodes(start) {
            self.accept(child, visitor)?;
        }
        ControlFlow::Continue(())
    }

    /// Find the first node whose id matches.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_first(|node| node.id() == Some(id))
    }

    /// Find all nodes that have the given class.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.query_all(|node| node.has_class(class))
    }

    /// Find all nodes with the given tag.
    pub fn query_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.query_all(|node| node.tag() == tag)
    }

    /// Find all nodes matching an arbitrary predicate, in document order.
    pub fn query_all(&self, predicate: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        let mut found = Vec::new();
        if let Some(root) = self.root() {
            let _ = self.accept::<()>(root, &mut |id, node| {
                if predicate(node) {
                    found.push(id);
                }
                ControlFlow::Continue(())
            });
        }
        found
    }

    /// First node under `start` (inclusive) matching a CSS selector list.
    pub fn query_selector(&self, start: NodeId, selector: &str) -> Result<Option<NodeId>, ParseError> {
        let selectors = parse_selector_list(selector)?;
        let found = self.accept(start, &mut |id, _| {
            if selectors.iter().any(|sel| matches_selector(sel, self, id)) {
                ControlFlow::Break(id)
            } else {
                ControlFlow::Continue(())
            }
        });
        Ok(match found {
            ControlFlow::Break(id) => Some(id),
            ControlFlow::Continue(()) => None,
        })
    }

    /// Every node under `start` (inclusive) matching a CSS selector list.
    pub fn query_selector_all(&self, start: NodeId, selector: &str) -> Result<Vec<NodeId>, ParseError> {
        let selectors = parse_selector_list(selector)?;
        let mut found = Vec::new();
        let _ = self.accept::<()>(start, &mut |id, _| {
            if selectors.iter().any(|sel| matches_selector(sel, self, id)) {
                found.push(id);
            }
            ControlFlow::Continue(())
        });
        Ok(found)
    }

    /// Concatenated text of every text-bearing node under `start`, pseudo
    /// content included.
    pub fn text_content(&self, start: NodeId) -> String {
        let mut text = String::new();
        let _ = self.accept::<()>(start, &mut |_, node| {
            if let Some(t) = node.text() {
                text.push_str(t);
            }
            ControlFlow::Continue(())
        });
        text
    }

    fn find_first(&self, predicate: impl Fn(&Node) -> bool) -> Option<NodeId> {
        let root = self.root()?;
        match self.accept(root, &mut |id, node| {
            if predicate(node) {
                ControlFlow::Break(id)
            } else {
                ControlFlow::Continue(())
            }
        }) {
            ControlFlow::Break(id) => Some(id),
            ControlFlow::Continue(()) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::model::PseudoElement;
    use crate::dom::node::Component;

    /// Build a test tree for queries:
    /// ```text
    ///        root (view #root)
    ///       /    \
    ///     a        b
    ///  (view     (view
    ///   #sidebar  #main
    ///   .nav)     .content)
    ///   / \
    ///  c   d
    /// (button   (button
    ///  #save     #cancel
    ///  .primary  .danger
    ///  .btn)     .btn)
    /// ```
    fn build_query_tree() -> (Tree, NodeId) {
        let mut tree = Tree::new();
        let root = tree.insert(Node::new("view", Component::View).with_id("root"));
        let a = tree.insert(
            Node::new("view", Component::View)
                .with_id("sidebar")
                .with_class("nav"),
        );
        let b = tree.insert(
            Node::new("view", Component::View)
                .with_id("main")
                .with_class("content"),
        );
        let c = tree.insert(
            Node::new("button", Component::Button)
                .with_id("save")
                .with_class("primary")
                .with_class("btn"),
        );
        let d = tree.insert(
            Node::new("button", Component::Button)
                .with_id("cancel")
                .with_class("danger")
                .with_class("btn"),
        );
        tree.attach(root, a, 0).unwrap();
        tree.attach(root, b, 1).unwrap();
        tree.attach(a, c, 0).unwrap();
        tree.attach(a, d, 1).unwrap();
        (tree, root)
    }

    #[test]
    fn by_id_class_tag() {
        let (tree, _) = build_query_tree();
        let save = tree.query_by_id("save").unwrap();
        assert_eq!(tree.get(save).unwrap().tag(), "button");
        assert!(tree.query_by_id("nope").is_none());
        assert_eq!(tree.query_by_class("btn").len(), 2);
        assert_eq!(tree.query_by_tag("view").len(), 3);
    }

    #[test]
    fn selector_queries_in_document_order() {
        let (tree, root) = build_query_tree();
        let buttons = tree.query_selector_all(root, "#sidebar > .btn").unwrap();
        let ids: Vec<_> = buttons
            .iter()
            .map(|&id| tree.get(id).unwrap().id().unwrap())
            .collect();
        assert_eq!(ids, vec!["save", "cancel"]);

        let first = tree.query_selector(root, ".danger, .primary").unwrap();
        assert_eq!(first, tree.query_by_id("save"));
        assert_eq!(tree.query_selector(root, "text").unwrap(), None);
    }

    #[test]
    fn selector_parse_errors_propagate() {
        let (tree, root) = build_query_tree();
        assert!(tree.query_selector(root, "view >").is_err());
    }

    #[test]
    fn accept_visits_pseudo_nodes_in_place() {
        let (mut tree, root) = build_query_tree();
        let b = tree.query_by_id("main").unwrap();
        let before = tree.insert(
            Node::new("_before", Component::Pseudo(PseudoElement::Before)).with_text("<"),
        );
        let after = tree.insert(
            Node::new("_after", Component::Pseudo(PseudoElement::After)).with_text(">"),
        );
        let label = tree.insert(Node::new("text", Component::Text).with_text("main"));
        tree.attach(b, before, 0).unwrap();
        tree.attach(b, label, 1).unwrap();
        tree.attach(b, after, 2).unwrap();

        let mut order = Vec::new();
        let _ = tree.accept::<()>(b, &mut |id, _| {
            order.push(id);
            ControlFlow::Continue(())
        });
        assert_eq!(order, vec![b, before, label, after]);
        assert_eq!(tree.text_content(root), "<main>");
    }

    #[test]
    fn accept_stops_early() {
        let (tree, root) = build_query_tree();
        let mut seen = 0;
        let flow = tree.accept(root, &mut |_, _| {
            seen += 1;
            if seen == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert!(flow.is_break());
        assert_eq!(seen, 2);
    }
}
