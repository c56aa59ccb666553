//! Utility modules

pub mod text;

pub use text::{byte_index, char_len, escape_html, strip_tags};
