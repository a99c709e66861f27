//! Headless testing helpers: a recording renderer and tree dumps.
//!
//! Hand a [`RecordingRenderer`] to [`Document::with_renderer`](crate::document::Document::with_renderer)
//! and keep a clone to inspect what each tick delivered. Use [`dump_tree`] to
//! capture a subtree as plain text for snapshot assertions.

pub mod recorder;
pub mod snapshot;

pub use recorder::{Recording, RecordingRenderer};
pub use snapshot::dump_tree;
