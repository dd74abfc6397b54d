use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const MARKDOWN_EXTENSIONS: [&str; 3] = [".md", ".markdown", ".mdown"];
const IMAGE_EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".gif"];

/// Identifies a workspace file by its name, e.g. `about.md`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub String);

impl FileId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    Markdown,
    Text,
    Image,
}

impl FileKind {
    /// Classify a file name by extension (case-insensitive).
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if MARKDOWN_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            FileKind::Markdown
        } else if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            FileKind::Image
        } else {
            FileKind::Text
        }
    }
}

/// What the editor lets the user do with a file's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditPolicy {
    /// Code and data files are shown, never changed.
    #[default]
    ReadOnly,
    /// Markdown can be edited in place, but lines can't be added.
    SingleLine,
}

impl EditPolicy {
    pub fn for_kind(kind: FileKind) -> Self {
        match kind {
            FileKind::Markdown => EditPolicy::SingleLine,
            FileKind::Text | FileKind::Image => EditPolicy::ReadOnly,
        }
    }

    pub fn allows_edits(self) -> bool {
        self != EditPolicy::ReadOnly
    }
}

/// One file known to the workspace. `content` is the editable text; image
/// entries keep it empty and carry a `source_path` instead.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub id: FileId,
    pub kind: FileKind,
    pub content: String,
    /// Folder path segments leading to this file, outermost first.
    pub folder: Vec<String>,
    pub source_path: Option<PathBuf>,
}

impl FileEntry {
    pub fn new(name: &str, content: impl Into<String>) -> Self {
        Self {
            id: FileId::new(name),
            kind: FileKind::from_name(name),
            content: content.into(),
            folder: Vec::new(),
            source_path: None,
        }
    }

    pub fn in_folder(mut self, folder: &[&str]) -> Self {
        self.folder = folder.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_source(mut self, path: &Path) -> Self {
        self.source_path = Some(path.to_path_buf());
        self
    }

    pub fn is_markdown(&self) -> bool {
        self.kind == FileKind::Markdown
    }

    pub fn edit_policy(&self) -> EditPolicy {
        EditPolicy::for_kind(self.kind)
    }
}
