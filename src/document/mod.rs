//! The document: node arena, scheduler, matcher, layout and renderer in one
//! context.
//!
//! Every mutation only marks the affected node dirty. [`Document::tick`] then
//! runs the per-node callbacks in registration order: dirty nodes resolve
//! their style once, resolved styles are pushed to the renderer once, and a
//! single layout pass runs if anything asked for one.

pub mod config;
mod pseudo;
mod resolve;

use std::sync::Arc;

use taffy::geometry::Size;
use tracing::{debug, warn};

use crate::css::model::PseudoElement;
use crate::css::parser::parse_declaration_list;
use crate::css::properties::{self, PropertyError};
use crate::css::stylesheet::CompiledStylesheet;
use crate::dom::factory::{ComponentFactory, DefaultFactory};
use crate::dom::node::{ClassList, Node, NodeId};
use crate::dom::tree::Tree;
use crate::dom::NodeError;
use crate::geometry::Region;
use crate::layout::engine::LayoutEngine;
use crate::render::{NullRenderer, Renderer};
use crate::scheduler::Scheduler;
use crate::style::node_style::{NodeStyle, PropertyMap};
use crate::style::rule::Matcher;
use crate::style::value::StyleValue;

pub use config::{DocumentConfig, TickStats};

/// A retained tree of styled nodes.
pub struct Document {
    tree: Tree,
    scheduler: Scheduler,
    matcher: Box<dyn Matcher>,
    factory: Box<dyn ComponentFactory>,
    renderer: Box<dyn Renderer>,
    layout: Option<LayoutEngine>,
    config: DocumentConfig,
    root: NodeId,
    /// Work since the last tick ended.
    current: TickStats,
    /// Work over the document's lifetime.
    totals: TickStats,
}

impl Document {
    /// Create a document styled by the user agent sheet plus `config.css`.
    pub fn new(config: DocumentConfig) -> Result<Self, NodeError> {
        let mut sheet = if config.user_agent_css {
            CompiledStylesheet::user_agent()
        } else {
            CompiledStylesheet::new()
        };
        if let Some(css) = &config.css {
            sheet.add_css(css)?;
        }
        Ok(Self::with_matcher(config, Box::new(sheet)))
    }

    /// Create a document styled by a custom matcher.
    pub fn with_matcher(config: DocumentConfig, matcher: Box<dyn Matcher>) -> Self {
        let factory = DefaultFactory;
        let root_node = factory.create_component(&config.root_tag, None);
        let mut doc = Self {
            tree: Tree::new(),
            scheduler: Scheduler::new(),
            matcher,
            factory: Box::new(factory),
            renderer: Box::new(NullRenderer),
            layout: config.calculates_layout.then(LayoutEngine::new),
            config,
            root: NodeId::default(),
            current: TickStats::default(),
            totals: TickStats::default(),
        };
        let root = doc.adopt(root_node);
        doc.tree.set_root(root);
        doc.root = root;
        if let (Some(engine), Some(handle)) = (doc.layout.as_mut(), doc.tree.get(root).and_then(Node::layout_node)) {
            engine.set_root(handle);
        }
        doc.mark_dirty(root, true);
        doc.request_layout(root);
        doc
    }

    /// Replace the renderer (builder).
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Replace the factory used for nodes created from now on (builder).
    pub fn with_factory(mut self, factory: impl ComponentFactory + 'static) -> Self {
        self.factory = Box::new(factory);
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.tree.contains(id)
    }

    /// The active resolved style of `id`.
    pub fn style(&self, id: NodeId) -> Option<&Arc<NodeStyle>> {
        self.tree.get(id).map(Node::style)
    }

    /// The box `id` received in the last layout pass.
    pub fn region(&self, id: NodeId) -> Option<Region> {
        self.tree.get(id).and_then(Node::region)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    /// Author-facing children, pseudo-nodes excluded.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree.children(id)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn layout_engine(&self) -> Option<&LayoutEngine> {
        self.layout.as_ref()
    }

    /// Counters accumulated over every tick so far.
    pub fn totals(&self) -> TickStats {
        self.totals
    }

    // -----------------------------------------------------------------------
    // Creation and structure
    // -----------------------------------------------------------------------

    /// Create a detached node for `tag`.
    pub fn create(&mut self, tag: &str) -> NodeId {
        let node = self.factory.create_component(tag, None);
        self.adopt(node)
    }

    /// Create a detached text leaf.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        let node = self.factory.create_component("text", Some(text));
        self.adopt(node)
    }

    /// Append `child` to `parent`. Shorthand for [`set_parent`](Self::set_parent).
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool, NodeError> {
        self.set_parent(child, Some(parent), None, false)
    }

    /// Move `node` under `new_parent`, or detach it when `None`.
    ///
    /// Without `relative_to` the node goes just before the parent's
    /// `::after` node (or at the end when `insert_after`). With it, the node
    /// goes at `relative_to`'s position, or just behind it when
    /// `insert_after`. Returns `false` if the parent's insert hook rejected
    /// the node; it is then left detached.
    pub fn set_parent(
        &mut self,
        node: NodeId,
        new_parent: Option<NodeId>,
        relative_to: Option<NodeId>,
        insert_after: bool,
    ) -> Result<bool, NodeError> {
        if self.tree.node(node)?.is_pseudo() {
            return Err(NodeError::PseudoNode(node));
        }
        if let Some(parent) = new_parent {
            if !self.tree.node(parent)?.is_container() {
                return Err(NodeError::NotAContainer(parent));
            }
            if parent == node || self.tree.ancestors(parent).contains(&node) {
                return Err(NodeError::Cycle {
                    parent,
                    child: node,
                });
            }
            if let Some(relative) = relative_to {
                if relative == node || self.tree.parent(relative) != Some(parent) {
                    return Err(NodeError::NotAChild {
                        parent,
                        child: relative,
                    });
                }
            }
        }

        if let Some(old) = self.tree.parent(node) {
            if !self.unregister_child(old, node)? {
                return Ok(false);
            }
        }

        let Some(parent) = new_parent else {
            self.mark_dirty(node, true);
            return Ok(true);
        };

        let len = self.tree.child_nodes(parent).len();
        let index = match relative_to {
            Some(relative) => {
                let at = self
                    .tree
                    .index_of(parent, relative)
                    .ok_or(NodeError::NotAChild {
                        parent,
                        child: relative,
                    })?;
                at + usize::from(insert_after)
            }
            None if insert_after => len,
            None => self
                .tree
                .get(parent)
                .and_then(Node::after)
                .and_then(|after| self.tree.index_of(parent, after))
                .unwrap_or(len),
        };

        let attached = self.register_child(parent, node, index)?;
        self.mark_dirty(node, true);
        Ok(attached)
    }

    /// Insert `child` into `parent`'s child list and shadow layout at `index`,
    /// if the parent's insert hook accepts it. The parent re-resolves with its
    /// children, since structural pseudo-classes depend on siblings.
    pub fn register_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<bool, NodeError> {
        let parent_node = self.tree.node(parent)?;
        if !parent_node.is_container() {
            return Err(NodeError::NotAContainer(parent));
        }
        let kind = self.tree.node(child)?.component();
        if kind.pseudo().is_some() {
            return Err(NodeError::PseudoNode(child));
        }
        if !parent_node.component().accepts_child(kind, index) {
            debug!(?parent, ?child, index, "insert rejected");
            return Ok(false);
        }
        self.attach_structural(parent, child, index)?;
        self.mark_dirty(parent, true);
        Ok(true)
    }

    /// Remove `child` from `parent`, if the parent's delete hook allows it.
    pub fn unregister_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool, NodeError> {
        let parent_node = self.tree.node(parent)?;
        if !parent_node.is_container() {
            return Err(NodeError::NotAContainer(parent));
        }
        if self.tree.parent(child) != Some(parent) {
            return Err(NodeError::NotAChild { parent, child });
        }
        let kind = self.tree.node(child)?.component();
        if kind.pseudo().is_some() {
            return Err(NodeError::PseudoNode(child));
        }
        if !parent_node.component().releases_child(kind) {
            debug!(?parent, ?child, "delete rejected");
            return Ok(false);
        }
        self.detach_structural(child);
        self.mark_dirty(parent, true);
        Ok(true)
    }

    /// Destroy `id`, its pseudo-nodes and its whole subtree.
    pub fn destroy(&mut self, id: NodeId) -> Result<(), NodeError> {
        self.tree.node(id)?;
        let parent = self.tree.parent(id);
        self.destroy_node(id);
        if let Some(parent) = parent {
            self.mark_dirty(parent, true);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    /// Set a structural property. Only `className` is recognized.
    pub fn set_property(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), NodeError> {
        match name {
            "className" => {
                let node = self.tree.node_mut(id)?;
                node.classes = ClassList::parse(value);
                self.renderer.class_changed(id, &node.classes);
                self.mark_dirty(id, true);
                Ok(())
            }
            _ => Err(NodeError::InvalidProperty(name.to_string())),
        }
    }

    pub fn set_id(&mut self, id: NodeId, value: Option<&str>) -> Result<(), NodeError> {
        self.tree.node_mut(id)?.id = value.map(str::to_owned);
        self.mark_dirty(id, true);
        Ok(())
    }

    /// Add a class. Returns `false` if it was already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<bool, NodeError> {
        self.edit_classes(id, |classes| classes.insert(class))
    }

    /// Remove a class. Returns `false` if it was absent.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<bool, NodeError> {
        self.edit_classes(id, |classes| classes.remove(class))
    }

    /// Toggle a class. Returns whether it is now present.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> Result<bool, NodeError> {
        let present = self.tree.node(id)?.has_class(class);
        if present {
            self.remove_class(id, class)?;
        } else {
            self.add_class(id, class)?;
        }
        Ok(!present)
    }

    /// Set a data attribute; `None` removes it.
    pub fn set_data(&mut self, id: NodeId, key: &str, value: Option<&str>) -> Result<(), NodeError> {
        let node = self.tree.node_mut(id)?;
        let changed = match value {
            Some(value) => node.data.insert(key.to_string(), value.to_string()).as_deref() != Some(value),
            None => node.data.remove(key).is_some(),
        };
        if changed {
            self.mark_dirty(id, true);
        }
        Ok(())
    }

    /// Replace a text-bearing node's text.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<(), NodeError> {
        let node = self.tree.node_mut(id)?;
        node.text = Some(text.to_string());
        node.dirty.style = true;
        self.request_layout(id);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Inline style
    // -----------------------------------------------------------------------

    /// Set one inline longhand to an already-typed value. The value must fit
    /// the property's syntax.
    pub fn set_style(&mut self, id: NodeId, name: &str, value: StyleValue) -> Result<(), NodeError> {
        let def = properties::lookup(name)
            .ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))?;
        properties::check_value(def, &value)?;
        let node = self.tree.node_mut(id)?;
        if node.inline.get(def.name) == Some(&value) {
            return Ok(());
        }
        node.inline.insert(def.name, value);
        self.mark_dirty(id, def.inherited);
        Ok(())
    }

    /// Set one inline property from CSS text (`"margin", "4px 8px"`).
    pub fn set_style_property(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), NodeError> {
        let parsed = parse_inline(&format!("{name}: {value}"))?;
        let node = self.tree.node_mut(id)?;
        let recursive = parsed.keys().any(|name| properties::is_inherited(name));
        node.inline.extend(parsed);
        self.mark_dirty(id, recursive);
        Ok(())
    }

    /// Replace the whole inline style with a declaration list.
    pub fn set_style_text(&mut self, id: NodeId, css: &str) -> Result<(), NodeError> {
        let parsed = parse_inline(css)?;
        self.tree.node_mut(id)?.inline = parsed;
        self.mark_dirty(id, true);
        Ok(())
    }

    /// Remove an inline property (shorthands remove their longhands).
    /// Returns whether anything was removed.
    pub fn remove_style(&mut self, id: NodeId, name: &str) -> Result<bool, NodeError> {
        let names = longhands(name)?;
        let node = self.tree.node_mut(id)?;
        let mut removed = false;
        for longhand in &names {
            removed |= node.inline.remove(longhand).is_some();
        }
        if removed {
            let recursive = names.iter().any(|name| properties::is_inherited(name));
            self.mark_dirty(id, recursive);
        }
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Mark `id` for re-resolution in the next tick.
    pub fn invalidate(&mut self, id: NodeId, recursive: bool) -> Result<(), NodeError> {
        self.tree.node(id)?;
        self.mark_dirty(id, recursive);
        Ok(())
    }

    /// Run every registered callback once: resolve dirty nodes, push styles,
    /// run the coalesced layout pass and push moved boxes.
    pub fn tick(&mut self) -> TickStats {
        for (_, id) in self.scheduler.pending() {
            let Some(dirty) = self.tree.get(id).map(Node::dirty) else {
                continue;
            };
            if dirty.resolve && !self.covered_by_ancestor(id) {
                self.resolve(id, dirty.recursive);
            }
        }

        for (_, id) in self.scheduler.pending() {
            let Some(node) = self.tree.get_mut(id) else {
                continue;
            };
            if node.dirty.style {
                node.dirty.style = false;
                self.renderer.apply_style(id, node);
                self.current.style_applies += 1;
            }
        }

        self.run_layout();

        let stats = std::mem::take(&mut self.current);
        self.totals += stats;
        debug!(
            resolves = stats.resolves,
            style_applies = stats.style_applies,
            layout_requests = stats.layout_requests,
            layout_passes = stats.layout_passes,
            "tick"
        );
        stats
    }

    fn run_layout(&mut self) {
        let Some(engine) = self.layout.as_mut() else {
            return;
        };
        let viewport = Size {
            width: self.config.viewport.0,
            height: self.config.viewport.1,
        };
        let ran = match engine.compute(viewport) {
            Ok(ran) => ran,
            Err(err) => {
                warn!(%err, "layout pass failed");
                false
            }
        };

        for id in self.tree.walk(self.root) {
            let Some(node) = self.tree.get_mut(id) else {
                continue;
            };
            node.dirty.layout = false;
            if !ran {
                continue;
            }
            let Some(region) = node.layout.and_then(|handle| engine.layout(handle)) else {
                continue;
            };
            if node.region != Some(region) {
                node.region = Some(region);
                self.renderer.apply_layout(id, region);
                self.current.layout_applies += 1;
            }
        }
        if ran {
            self.current.layout_passes += 1;
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Insert a fresh node: arena slot, tick callback, shadow layout node.
    fn adopt(&mut self, node: Node) -> NodeId {
        let default_layout = node.component().default_layout();
        let id = self.tree.insert(node);
        let callback = self.scheduler.register(id);
        let handle = self.layout.as_mut().and_then(|engine| {
            engine
                .new_node(id, default_layout)
                .map_err(|err| warn!(%err, "failed to create layout node"))
                .ok()
        });
        if let Some(node) = self.tree.get_mut(id) {
            node.callback = Some(callback);
            node.layout = handle;
            node.dirty.resolve = true;
        }
        id
    }

    /// Whether a pending recursive resolve of an ancestor will reach `id`.
    fn covered_by_ancestor(&self, id: NodeId) -> bool {
        self.tree.ancestors(id).into_iter().any(|ancestor| {
            self.tree
                .get(ancestor)
                .map(Node::dirty)
                .is_some_and(|dirty| dirty.resolve && dirty.recursive)
        })
    }

    pub(crate) fn mark_dirty(&mut self, id: NodeId, recursive: bool) {
        if let Some(node) = self.tree.get_mut(id) {
            node.dirty.resolve = true;
            node.dirty.recursive |= recursive;
        }
    }

    /// Ask for a layout pass on behalf of `id`; at most once per node per tick.
    pub(crate) fn request_layout(&mut self, id: NodeId) {
        let Some(engine) = self.layout.as_mut() else {
            return;
        };
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if node.dirty.layout {
            return;
        }
        node.dirty.layout = true;
        engine.request_layout();
        self.current.layout_requests += 1;
    }

    /// Attach in the tree and the shadow layout tree at the same index.
    fn attach_structural(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<(), NodeError> {
        self.tree.attach(parent, child, index)?;
        let index = self.tree.index_of(parent, child).unwrap_or(index);
        let handles = (
            self.tree.get(parent).and_then(Node::layout_node),
            self.tree.get(child).and_then(Node::layout_node),
        );
        if let (Some(engine), (Some(parent_handle), Some(child_handle))) = (self.layout.as_mut(), handles) {
            if let Err(err) = engine.insert(parent_handle, index, child_handle) {
                warn!(%err, "failed to mirror child insert");
            }
        }
        self.request_layout(parent);
        Ok(())
    }

    /// Detach from the tree and the shadow layout tree.
    fn detach_structural(&mut self, child: NodeId) -> Option<(NodeId, usize)> {
        let (parent, index) = self.tree.detach(child)?;
        let handles = (
            self.tree.get(parent).and_then(Node::layout_node),
            self.tree.get(child).and_then(Node::layout_node),
        );
        if let (Some(engine), (Some(parent_handle), Some(child_handle))) = (self.layout.as_mut(), handles) {
            if let Err(err) = engine.remove(parent_handle, child_handle) {
                warn!(%err, "failed to mirror child removal");
            }
        }
        self.request_layout(parent);
        Some((parent, index))
    }

    fn destroy_node(&mut self, id: NodeId) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if let Some(callback) = node.callback.take() {
            self.scheduler.cancel(callback);
        }
        let pseudos = [node.before.take(), node.after.take()];
        for pseudo in pseudos.into_iter().flatten() {
            self.destroy_node(pseudo);
        }
        for child in self.tree.child_nodes(id).to_vec() {
            self.destroy_node(child);
        }

        if let Some((parent, _)) = self.detach_structural(id) {
            if let Some(parent) = self.tree.get_mut(parent) {
                for kind in [PseudoElement::Before, PseudoElement::After] {
                    let slot = parent.pseudo_slot(kind);
                    if *slot == Some(id) {
                        *slot = None;
                    }
                }
            }
        }

        if let (Some(engine), Some(handle)) = (
            self.layout.as_mut(),
            self.tree.get(id).and_then(Node::layout_node),
        ) {
            if let Err(err) = engine.delete(handle) {
                warn!(%err, "failed to delete layout node");
            }
        }
        self.renderer.destroyed(id);
        self.tree.remove(id);
    }

    fn edit_classes(
        &mut self,
        id: NodeId,
        edit: impl FnOnce(&mut ClassList) -> bool,
    ) -> Result<bool, NodeError> {
        let node = self.tree.node_mut(id)?;
        let changed = edit(&mut node.classes);
        if changed {
            self.renderer.class_changed(id, &node.classes);
            self.mark_dirty(id, true);
        }
        Ok(changed)
    }
}

/// Parse a declaration list into inline longhands. Any invalid declaration
/// fails the whole list.
fn parse_inline(css: &str) -> Result<PropertyMap, NodeError> {
    let mut map = PropertyMap::new();
    for decl in parse_declaration_list(css)? {
        for (def, value) in properties::parse_declaration(&decl)? {
            map.insert(def.name, value);
        }
    }
    Ok(map)
}

/// The longhands a property name covers.
fn longhands(name: &str) -> Result<Vec<&'static str>, NodeError> {
    let names: Vec<&'static str> = match name {
        "margin" | "padding" => properties::all()
            .iter()
            .map(|def| def.name)
            .filter(|longhand| {
                longhand
                    .strip_prefix(name)
                    .is_some_and(|rest| rest.starts_with('-'))
            })
            .collect(),
        "gap" => vec!["row-gap", "column-gap"],
        _ => {
            let def = properties::lookup(name)
                .ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))?;
            vec![def.name]
        }
    };
    Ok(names)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::scalar::Scalar;
    use crate::css::specificity::Specificity;
    use crate::style::value::Color;
    use crate::testing::RecordingRenderer;

    fn doc_with_css(css: &str) -> Document {
        Document::new(DocumentConfig::default().with_css(css)).unwrap()
    }

    fn px(value: f32) -> StyleValue {
        StyleValue::Length(Scalar::point(value))
    }

    fn color_of(doc: &Document, id: NodeId) -> Option<Color> {
        doc.style(id).unwrap().color()
    }

    #[test]
    fn first_tick_resolves_and_lays_out_root() {
        let mut doc = Document::new(DocumentConfig::default()).unwrap();
        let stats = doc.tick();
        assert_eq!(stats.resolves, 1);
        assert_eq!(stats.style_applies, 1);
        assert_eq!(stats.layout_passes, 1);
        assert!(doc.region(doc.root()).is_some());

        let idle = doc.tick();
        assert_eq!(idle, TickStats::default());
    }

    #[test]
    fn children_are_laid_out_in_order() {
        let mut doc = Document::new(DocumentConfig::default()).unwrap();
        let a = doc.create("view");
        let b = doc.create("view");
        doc.set_style(a, "width", px(100.0)).unwrap();
        doc.set_style(a, "height", px(50.0)).unwrap();
        doc.set_style(b, "width", px(80.0)).unwrap();
        doc.set_style(b, "height", px(20.0)).unwrap();
        doc.append_child(doc.root(), a).unwrap();
        doc.append_child(doc.root(), b).unwrap();
        doc.tick();

        assert_eq!(doc.region(a), Some(Region::new(0.0, 0.0, 100.0, 50.0)));
        assert_eq!(doc.region(b), Some(Region::new(0.0, 50.0, 80.0, 20.0)));
    }

    #[test]
    fn repeated_changes_coalesce_into_one_apply() {
        let recorder = RecordingRenderer::new();
        let mut doc = Document::new(DocumentConfig::default())
            .unwrap()
            .with_renderer(recorder.clone());
        let panel = doc.create("view");
        doc.append_child(doc.root(), panel).unwrap();
        doc.tick();
        recorder.clear();

        for i in 1..=10 {
            doc.set_style(panel, "width", px(i as f32 * 10.0)).unwrap();
        }
        let stats = doc.tick();

        assert_eq!(stats.style_applies, 1);
        assert!(stats.layout_requests <= 1);
        assert_eq!(stats.layout_passes, 1);
        assert_eq!(recorder.recording().style_count(panel), 1);
        assert_eq!(doc.region(panel).map(|r| r.width), Some(100.0));
    }

    #[test]
    fn inline_beats_ordinary_rules_but_not_important_ones() {
        let mut doc = doc_with_css("#x { color: red; } view { color: green; }");
        let x = doc.create("view");
        doc.set_id(x, Some("x")).unwrap();
        doc.append_child(doc.root(), x).unwrap();
        doc.tick();
        assert_eq!(color_of(&doc, x), Color::named("red"));

        doc.set_style_property(x, "color", "blue").unwrap();
        doc.tick();
        assert_eq!(color_of(&doc, x), Color::named("blue"));

        let mut doc = doc_with_css("#x { color: red !important; }");
        let x = doc.create("view");
        doc.set_id(x, Some("x")).unwrap();
        doc.set_style_property(x, "color", "blue").unwrap();
        doc.append_child(doc.root(), x).unwrap();
        doc.tick();
        assert_eq!(color_of(&doc, x), Color::named("red"));
    }

    #[test]
    fn lowered_threshold_lifts_id_rules_above_inline() {
        let config = DocumentConfig::default()
            .with_css("#x { color: red; }")
            .with_important_threshold(Specificity(100));
        let mut doc = Document::new(config).unwrap();
        let x = doc.create("view");
        doc.set_id(x, Some("x")).unwrap();
        doc.set_style_property(x, "color", "blue").unwrap();
        doc.append_child(doc.root(), x).unwrap();
        doc.tick();
        assert_eq!(color_of(&doc, x), Color::named("red"));
    }

    #[test]
    fn reparenting_inherits_from_new_parent() {
        let mut doc = doc_with_css("#a { color: red; } #b { color: blue; }");
        let a = doc.create("view");
        let b = doc.create("view");
        doc.set_id(a, Some("a")).unwrap();
        doc.set_id(b, Some("b")).unwrap();
        let label = doc.create_text("hi");
        doc.append_child(doc.root(), a).unwrap();
        doc.append_child(doc.root(), b).unwrap();
        doc.append_child(a, label).unwrap();
        doc.tick();
        assert_eq!(color_of(&doc, label), Color::named("red"));

        assert!(doc.set_parent(label, Some(b), None, false).unwrap());
        doc.tick();
        assert_eq!(doc.parent(label), Some(b));
        assert_eq!(color_of(&doc, label), Color::named("blue"));
    }

    #[test]
    fn relative_font_sizes() {
        let mut doc = Document::new(DocumentConfig::default()).unwrap();
        let em = doc.create("view");
        let rem = doc.create("view");
        doc.set_style_property(em, "font-size", "2em").unwrap();
        doc.set_style_property(rem, "font-size", "1.5rem").unwrap();
        doc.append_child(doc.root(), em).unwrap();
        doc.append_child(doc.root(), rem).unwrap();
        doc.tick();

        assert_eq!(doc.style(doc.root()).unwrap().font_size(), Some(24.0));
        assert_eq!(doc.style(em).unwrap().font_size(), Some(48.0));
        assert_eq!(doc.style(rem).unwrap().font_size(), Some(36.0));
    }

    #[test]
    fn set_parent_relative_positions() {
        let mut doc = Document::new(DocumentConfig::default()).unwrap();
        let root = doc.root();
        let a = doc.create("view");
        let b = doc.create("view");
        let c = doc.create("view");
        doc.append_child(root, a).unwrap();
        doc.append_child(root, c).unwrap();
        doc.set_parent(b, Some(root), Some(c), false).unwrap();
        assert_eq!(doc.children(root), vec![a, b, c]);

        doc.set_parent(a, Some(root), Some(c), true).unwrap();
        assert_eq!(doc.children(root), vec![b, c, a]);

        doc.set_parent(a, None, None, false).unwrap();
        assert_eq!(doc.children(root), vec![b, c]);
        assert_eq!(doc.parent(a), None);
    }

    #[test]
    fn author_children_go_before_after_pseudo() {
        let mut doc = Document::new(DocumentConfig::default()).unwrap();
        let root = doc.root();
        let before = doc.add_before(root).unwrap();
        let after = doc.add_after(root).unwrap();
        let child = doc.create("view");
        doc.append_child(root, child).unwrap();

        assert_eq!(doc.tree().child_nodes(root), &[before, child, after]);
        assert_eq!(doc.children(root), vec![child]);
    }

    #[test]
    fn add_before_is_idempotent() {
        let mut doc = Document::new(DocumentConfig::default()).unwrap();
        let root = doc.root();
        let first = doc.add_before(root).unwrap();
        let second = doc.add_before(root).unwrap();
        assert_eq!(first, second);
        assert_eq!(doc.tree().child_nodes(root).len(), 1);

        let text = doc.create_text("leaf");
        assert_eq!(doc.add_before(text), None);

        doc.remove_before(root);
        assert_eq!(doc.pseudo(root, PseudoElement::Before), None);
        assert!(!doc.contains(first));
        doc.remove_before(root);
    }

    #[test]
    fn pseudo_elements_follow_matching_rules() {
        let mut doc = doc_with_css(r#".label::before { content: "> "; color: red; }"#);
        let label = doc.create("view");
        doc.add_class(label, "label").unwrap();
        let text = doc.create_text("x");
        doc.append_child(label, text).unwrap();
        doc.append_child(doc.root(), label).unwrap();
        doc.tick();

        let before = doc.pseudo(label, PseudoElement::Before).unwrap();
        assert_eq!(doc.node(before).unwrap().text(), Some("> "));
        assert_eq!(color_of(&doc, before), Color::named("red"));
        assert_eq!(doc.tree().text_content(label), "> x");
        assert_eq!(doc.pseudo(label, PseudoElement::After), None);

        doc.remove_class(label, "label").unwrap();
        doc.tick();
        assert_eq!(doc.pseudo(label, PseudoElement::Before), None);
        assert!(!doc.contains(before));
    }

    #[test]
    fn destroy_cascades_and_cancels_callbacks() {
        let recorder = RecordingRenderer::new();
        let mut doc = Document::new(DocumentConfig::default())
            .unwrap()
            .with_renderer(recorder.clone());
        let panel = doc.create("view");
        let label = doc.create_text("a");
        let inner = doc.create("view");
        doc.append_child(doc.root(), panel).unwrap();
        doc.append_child(panel, label).unwrap();
        doc.append_child(panel, inner).unwrap();
        doc.tick();
        let before = doc.add_before(panel).unwrap();
        assert_eq!(doc.scheduler().len(), 5);

        doc.destroy(panel).unwrap();
        for id in [panel, label, inner, before] {
            assert!(!doc.contains(id));
        }
        assert_eq!(doc.scheduler().len(), 1);
        assert_eq!(doc.children(doc.root()), Vec::<NodeId>::new());
        assert_eq!(recorder.recording().destroyed.len(), 4);

        let stats = doc.tick();
        assert_eq!(stats.style_applies, 1);
        assert_eq!(recorder.recording().styles.last(), Some(&doc.root()));
        assert!(matches!(doc.destroy(panel), Err(NodeError::MissingNode(_))));
    }

    #[test]
    fn insert_hook_rejects_nested_buttons() {
        let mut doc = Document::new(DocumentConfig::default()).unwrap();
        let outer = doc.create("button");
        let inner = doc.create("button");
        doc.append_child(doc.root(), outer).unwrap();
        assert!(!doc.append_child(outer, inner).unwrap());
        assert_eq!(doc.parent(inner), None);

        let label = doc.create_text("ok");
        assert!(doc.append_child(outer, label).unwrap());
    }

    #[test]
    fn structural_errors() {
        let mut doc = Document::new(DocumentConfig::default()).unwrap();
        let root = doc.root();
        let panel = doc.create("view");
        let text = doc.create_text("t");
        doc.append_child(root, panel).unwrap();

        assert!(matches!(
            doc.append_child(panel, root),
            Err(NodeError::Cycle { .. })
        ));
        assert!(matches!(
            doc.append_child(text, panel),
            Err(NodeError::NotAContainer(_))
        ));
        assert!(matches!(
            doc.set_parent(text, Some(root), Some(text), false),
            Err(NodeError::NotAChild { .. })
        ));
    }

    #[test]
    fn pseudo_nodes_stay_with_their_owner() {
        let mut doc = doc_with_css(r#".card::before { content: "*"; }"#);
        let card = doc.create("view");
        let other = doc.create("view");
        doc.add_class(card, "card").unwrap();
        doc.append_child(doc.root(), card).unwrap();
        doc.append_child(doc.root(), other).unwrap();
        doc.tick();
        let before = doc.pseudo(card, PseudoElement::Before).unwrap();

        assert!(matches!(
            doc.append_child(other, before),
            Err(NodeError::PseudoNode(id)) if id == before
        ));
        assert!(matches!(
            doc.register_child(other, before, 0),
            Err(NodeError::PseudoNode(_))
        ));
        assert!(matches!(
            doc.unregister_child(card, before),
            Err(NodeError::PseudoNode(_))
        ));
        assert_eq!(doc.parent(before), Some(card));

        doc.remove_before(card);
        assert!(!doc.contains(before));
        assert!(doc.contains(other));
    }

    #[test]
    fn sibling_changes_restyle_structural_pseudo_classes() {
        let mut doc = doc_with_css(".item:last-child { color: red; } .item:empty { opacity: 0.5; }");
        let list = doc.create("view");
        let a = doc.create("view");
        doc.add_class(a, "item").unwrap();
        doc.append_child(doc.root(), list).unwrap();
        doc.append_child(list, a).unwrap();
        doc.tick();
        assert_eq!(color_of(&doc, a), Color::named("red"));

        let b = doc.create("view");
        doc.add_class(b, "item").unwrap();
        doc.append_child(list, b).unwrap();
        doc.tick();
        assert_eq!(color_of(&doc, a), Some(Color::BLACK));
        assert_eq!(color_of(&doc, b), Color::named("red"));

        doc.destroy(b).unwrap();
        doc.tick();
        assert_eq!(color_of(&doc, a), Color::named("red"));

        let opacity = |doc: &Document, id| doc.style(id).unwrap().get("opacity").cloned();
        assert_eq!(opacity(&doc, a), Some(StyleValue::Float(0.5)));
        let text = doc.create_text("x");
        doc.append_child(a, text).unwrap();
        doc.tick();
        assert_eq!(opacity(&doc, a), Some(StyleValue::Float(1.0)));
    }

    #[test]
    fn nodes_resolve_at_most_once_per_tick() {
        let mut doc = doc_with_css(r#".card::before { content: "*"; }"#);
        // Created ahead of its parent, so it comes first in callback order.
        let label = doc.create_text("x");
        let card = doc.create("view");
        doc.add_class(card, "card").unwrap();
        doc.append_child(doc.root(), card).unwrap();
        doc.tick();

        doc.append_child(card, label).unwrap();
        // card, card::before, label
        assert_eq!(doc.tick().resolves, 3);
        let before = doc.pseudo(card, PseudoElement::Before).unwrap();
        assert!(!doc.node(before).unwrap().dirty().resolve);
    }

    #[test]
    fn property_errors() {
        let mut doc = Document::new(DocumentConfig::default()).unwrap();
        let root = doc.root();
        assert!(matches!(
            doc.set_property(root, "bogus", "x"),
            Err(NodeError::InvalidProperty(name)) if name == "bogus"
        ));
        assert!(matches!(
            doc.set_style(root, "bogus", px(1.0)),
            Err(NodeError::Style(PropertyError::UnknownProperty(_)))
        ));
        assert!(doc.set_style_text(root, "color: 12px").is_err());
        assert!(matches!(
            doc.set_style(root, "width", StyleValue::Color(Color::BLACK)),
            Err(NodeError::Style(PropertyError::InvalidValue { .. }))
        ));
        assert_eq!(doc.node(root).unwrap().inline_style().get("width"), None);
    }

    #[test]
    fn class_name_property_replaces_classes() {
        let recorder = RecordingRenderer::new();
        let mut doc = Document::new(DocumentConfig::default())
            .unwrap()
            .with_renderer(recorder.clone());
        let root = doc.root();

        doc.set_property(root, "className", "a b").unwrap();
        let node = doc.node(root).unwrap();
        assert!(node.has_class("a") && node.has_class("b"));

        doc.set_property(root, "className", "  ").unwrap();
        assert!(doc.node(root).unwrap().classes().is_shared_empty());
        assert_eq!(recorder.recording().class_changes.len(), 2);

        assert!(doc.toggle_class(root, "on").unwrap());
        assert!(!doc.toggle_class(root, "on").unwrap());
    }

    #[test]
    fn remove_style_expands_shorthands() {
        let mut doc = Document::new(DocumentConfig::default()).unwrap();
        let root = doc.root();
        doc.set_style_property(root, "margin", "4px").unwrap();
        assert_eq!(doc.node(root).unwrap().inline_style().len(), 4);

        assert!(doc.remove_style(root, "margin").unwrap());
        assert!(doc.node(root).unwrap().inline_style().is_empty());
        assert!(!doc.remove_style(root, "margin").unwrap());
    }

    #[test]
    fn removed_layout_values_reset_to_defaults() {
        let mut doc = Document::new(DocumentConfig::default()).unwrap();
        let panel = doc.create("view");
        doc.append_child(doc.root(), panel).unwrap();
        doc.set_style(panel, "flex-direction", StyleValue::keyword("row")).unwrap();
        doc.tick();

        let engine = doc.layout_engine().unwrap();
        let handle = doc.node(panel).unwrap().layout_node().unwrap();
        assert_eq!(engine.style(handle).unwrap().flex_direction, taffy::style::FlexDirection::Row);

        doc.remove_style(panel, "flex-direction").unwrap();
        doc.tick();
        let engine = doc.layout_engine().unwrap();
        assert_eq!(engine.style(handle).unwrap().flex_direction, taffy::style::FlexDirection::Column);
        assert!(doc.node(panel).unwrap().applied_layouts().is_empty());
    }

    #[test]
    fn layout_can_be_disabled() {
        let mut doc = Document::new(DocumentConfig::default().with_layout(false)).unwrap();
        let stats = doc.tick();
        assert!(doc.layout_engine().is_none());
        assert_eq!(stats.layout_passes, 0);
        assert_eq!(doc.region(doc.root()), None);
    }

    #[test]
    fn totals_accumulate_across_ticks() {
        let mut doc = Document::new(DocumentConfig::default()).unwrap();
        doc.tick();
        doc.set_data(doc.root(), "state", Some("on")).unwrap();
        doc.tick();
        assert_eq!(doc.node(doc.root()).unwrap().data("state"), Some("on"));
        assert_eq!(doc.totals().resolves, 2);
        assert_eq!(doc.totals().style_applies, 2);
    }
}
