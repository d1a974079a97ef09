//! leafpress Render Library
//!
//! Turns article sections into rendered block descriptors and writes them
//! out as HTML or plain text.
//!
//! # Modules
//!
//! - [`render`] - validation-checked section rendering
//! - [`block`] - rendered block descriptors
//! - [`inline`] - inline rich text for paragraphs
//! - [`html`] - HTML output
//! - [`text`] - plain-text output

pub mod block;
pub mod html;
pub mod inline;
pub mod render;
pub mod text;

pub use block::{Part, RenderedBlock};
pub use inline::{Inline, RichText};
pub use render::{render, render_record, render_section};
