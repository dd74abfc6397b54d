//! Infrastructure layer - external integrations.
//!
//! - FLTK buffer access
//! - Error types
//! - Logging setup

pub mod buffer;
pub mod error;
pub mod logging;

pub use error::{AppError, Result, ViewError};
