//! Layout adapter: style-to-taffy property mapping and the shadow layout tree.

pub mod engine;
pub mod property;

pub use engine::LayoutEngine;
pub use property::{LayoutProp, LayoutValue};
