//! Terminal presentation: icons, capability detection and text rendering.

pub mod render;
pub mod terminal;
pub mod theme;

pub use render::{render_status_bar, render_tree, render_tree_node, render_view_header};
pub use terminal::{detect_capabilities, TerminalCapabilities};
