//! TUI Widgets
//!
//! Custom widgets for the image library TUI.

mod explore;

pub use explore::render_explore;
