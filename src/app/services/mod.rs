//! Services layer - business operations and utilities.
//!
//! - Markdown rendering
//! - Text operations
//! - The workspace file map

pub mod markdown;
pub mod text_ops;
pub mod workspace;
