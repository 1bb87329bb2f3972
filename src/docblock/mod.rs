//! DocBlock text
//!
//! Rendering a tag set into a `/** ... */` block and reading tags back out
//! of an existing one.

pub mod parser;
pub mod renderer;

pub use parser::parse;
pub use renderer::{render, RenderOptions, EMPTY_BLOCK};
