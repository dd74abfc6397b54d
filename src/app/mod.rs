//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (files, tab keys, settings, messages)
//! - `controllers/` - Orchestration (TabController, SidebarController, PreviewController)
//! - `services/` - Business operations (markdown, workspace, text_ops)
//! - `infrastructure/` - External integrations (FLTK buffer, logging, error)
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::sidebar::{SidebarController, SidebarPanel};
pub use controllers::tabs::TabController;
pub use domain::{AppSettings, FileId, Message, TabKey, ThemeMode, ViewEffect, ViewMode, ViewSink};
pub use infrastructure::buffer::buffer_text_no_leak;
pub use infrastructure::error::{AppError, Result, ViewError};
pub use services::markdown::render_markdown;
pub use services::workspace::Workspace;
