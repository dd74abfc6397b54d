use thiserror::Error;

use crate::app::domain::file::FileId;

/// Rejections from the tab/view controller. Callers in the UI swallow these;
/// state is always left untouched when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("no such file: {0}")]
    UnknownFile(FileId),

    #[error("mode required for markdown: {0}")]
    ModeRequired(FileId),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Workspace error: {0}")]
    Workspace(String),

    #[error("View error: {0}")]
    View(#[from] ViewError),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_view_error_conversion() {
        let err: AppError = ViewError::ModeRequired(FileId::new("about.md")).into();
        assert!(matches!(err, AppError::View(ViewError::ModeRequired(_))));
        assert_eq!(
            err.to_string(),
            "View error: mode required for markdown: about.md"
        );
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Settings("invalid font size".to_string());
        assert_eq!(err.to_string(), "Settings error: invalid font size");

        let err = AppError::Workspace("duplicate file name: a.md".to_string());
        assert_eq!(err.to_string(), "Workspace error: duplicate file name: a.md");

        let err = ViewError::UnknownFile(FileId::new("ghost.txt"));
        assert_eq!(err.to_string(), "no such file: ghost.txt");
    }
}
