//! CSS front end: tokenizer, parser, property registry, specificity, matching.

pub mod scalar;
pub mod tokenizer;
pub mod model;
pub mod parser;
pub mod properties;
pub mod specificity;
pub mod stylesheet;

pub use stylesheet::CompiledStylesheet;
