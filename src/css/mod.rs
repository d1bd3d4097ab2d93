//! Stylesheet engine: colors, tokenizer, parser, typed properties, style sets.

pub mod color;
pub mod tokenizer;
pub mod model;
pub mod parser;
pub mod styles;
pub mod properties;
pub mod stylesheet;
