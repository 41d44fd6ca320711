//! Rendering module for exporting analyzed documents.
//!
//! Markup renderers live outside this crate; they consume the JSON mirror
//! produced here.

mod json;

pub use json::{from_json, read_json, to_json, write_json, JsonFormat};
