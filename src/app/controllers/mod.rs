//! Controllers layer - orchestration and coordination.
//!
//! - Tabs and the welcome screen
//! - Markdown preview
//! - Sidebar panels and the explorer tree

pub mod preview;
pub mod sidebar;
pub mod tabs;
