//! Style values, resolved snapshots, the style state machine and the cascade.

pub mod cascade;
pub mod node_style;
pub mod rule;
pub mod state;
pub mod value;

pub use cascade::CascadeSource;
pub use node_style::{NodeStyle, PropertyMap};
pub use rule::{Matcher, NoRules, RuleMatch};
pub use state::{StylePhase, StyleState, StyleUpdate};
pub use value::{BoxShadow, Color, StyleValue, ValueKind};
