//! Domain layer - core data structures and types.
//!
//! - Workspace files (`FileId`, `FileEntry`)
//! - Tab keys, active selection and view effects
//! - Application settings
//! - Message types for the event system

pub mod file;
pub mod messages;
pub mod settings;
pub mod view;

pub use file::{EditPolicy, FileEntry, FileId, FileKind};
pub use messages::Message;
pub use settings::{AppSettings, ThemeMode};
pub use view::{ActiveSelection, OpenTab, TabKey, TabSnapshot, ViewEffect, ViewMode, ViewSink};
