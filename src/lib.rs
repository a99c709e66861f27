//! # cascade-ui
//!
//! A retained UI node tree styled by a CSS cascade and laid out with
//! [taffy](https://crates.io/crates/taffy).
//!
//! Nodes are created and rearranged through a [`Document`]. Mutations only
//! mark nodes dirty; [`Document::tick`] resolves each dirty node once, pushes
//! the result to a [`Renderer`](render::Renderer), and runs at most one layout
//! pass. Painting is left to the renderer.
//!
//! ## Core Systems
//!
//! - **[`css`]** — Tokenizer, parser, property registry, specificity, compiled stylesheets
//! - **[`style`]** — Resolved values, cascade ordering, per-node snapshots and their state machine
//! - **[`dom`]** — Slotmap-backed node arena, components, queries, factories
//! - **[`layout`]** — Layout property mapping and the taffy shadow tree
//! - **[`animation`]** — Typed blending, timing functions, deferred values
//! - **[`document`]** — The tick loop tying everything together
//! - **[`scheduler`]** — Per-node tick callbacks in registration order
//! - **[`render`]** — The paint backend seam
//! - **[`geometry`]** — Vectors, quaternions, regions

// Foundation
pub mod geometry;

// Styling
pub mod animation;
pub mod css;
pub mod style;

// Tree and layout
pub mod dom;
pub mod layout;

// Orchestration
pub mod document;
pub mod render;
pub mod scheduler;

// Testing
pub mod testing;

pub use document::{Document, DocumentConfig, TickStats};
pub use dom::{Component, Node, NodeError, NodeId};
pub use style::{Color, NodeStyle, StyleValue};
