//! Toolbar tools and the Format Command Dispatcher
//!
//! Tools map declaratively onto backend commands (`tool`), the dispatcher
//! applies and queries them (`dispatcher`), and link/image insertion is
//! handled separately (`insert`).

mod backend;
pub mod dispatcher;
mod insert;
mod tool;

pub use backend::RichTextBackend;
pub use dispatcher::{active_formats, execute, is_active, try_execute};
pub use insert::{insert_image, insert_link, DEFAULT_IMAGE_ALT, IMAGE_STYLE};
pub use tool::{
    default_tools, tool_for_shortcut, FormatCommand, ToolAction, ToolbarTool, FORMAT_BLOCK,
};
