//! Component factories: tag → node.

use crate::css::model::PseudoElement;

use super::node::{Component, Node};

/// Creates nodes for tags and pseudo-elements.
pub trait ComponentFactory {
    /// A node for `tag`, optionally carrying text.
    fn create_component(&self, tag: &str, text: Option<&str>) -> Node;

    /// A synthetic node for a `::before` / `::after` pseudo-element.
    fn create_pseudo(&self, kind: PseudoElement) -> Node {
        Node::new(kind.tag(), Component::Pseudo(kind))
    }
}

/// Maps `text` to a text leaf, `button` to a button, anything else to a view.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFactory;

impl ComponentFactory for DefaultFactory {
    fn create_component(&self, tag: &str, text: Option<&str>) -> Node {
        let component = match tag {
            "text" => Component::Text,
            "button" => Component::Button,
            _ => Component::View,
        };
        let node = Node::new(tag, component);
        match text {
            Some(text) => node.with_text(text),
            None => node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_tags_to_components() {
        let factory = DefaultFactory;
        assert_eq!(factory.create_component("text", Some("hi")).component(), Component::Text);
        assert_eq!(factory.create_component("text", Some("hi")).text(), Some("hi"));
        assert_eq!(factory.create_component("button", None).component(), Component::Button);
        assert_eq!(factory.create_component("panel", None).component(), Component::View);
        assert_eq!(factory.create_component("panel", None).tag(), "panel");
    }

    #[test]
    fn pseudo_nodes_use_reserved_tags() {
        let node = DefaultFactory.create_pseudo(PseudoElement::After);
        assert_eq!(node.tag(), "_after");
        assert!(node.is_pseudo());
        assert!(!node.is_container());
    }
}
