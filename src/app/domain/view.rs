use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::file::FileId;

const PREVIEW_SUFFIX: &str = ":preview";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewMode {
    Editor,
    Preview,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Editor => "editor",
            ViewMode::Preview => "preview",
        }
    }
}

/// Composite key of a tab: the same file may be open once per mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabKey {
    pub file_id: FileId,
    pub mode: ViewMode,
}

impl TabKey {
    pub fn new(file_id: impl Into<FileId>, mode: ViewMode) -> Self {
        Self {
            file_id: file_id.into(),
            mode,
        }
    }

    pub fn editor(file_id: impl Into<FileId>) -> Self {
        Self::new(file_id, ViewMode::Editor)
    }

    pub fn preview(file_id: impl Into<FileId>) -> Self {
        Self::new(file_id, ViewMode::Preview)
    }
}

/// `about.md` for editor tabs, `about.md:preview` for preview tabs.
impl fmt::Display for TabKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            ViewMode::Editor => write!(f, "{}", self.file_id),
            ViewMode::Preview => write!(f, "{}{}", self.file_id, PREVIEW_SUFFIX),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTabKeyError;

impl fmt::Display for ParseTabKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("empty tab id")
    }
}

impl std::error::Error for ParseTabKeyError {}

impl FromStr for TabKey {
    type Err = ParseTabKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, mode) = match s.strip_suffix(PREVIEW_SUFFIX) {
            Some(name) => (name, ViewMode::Preview),
            None => (s, ViewMode::Editor),
        };
        if name.is_empty() {
            return Err(ParseTabKeyError);
        }
        Ok(TabKey::new(FileId::new(name), mode))
    }
}

/// One entry in the tab strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenTab {
    pub key: TabKey,
    pub display_name: String,
}

impl OpenTab {
    pub fn new(key: TabKey) -> Self {
        let display_name = match key.mode {
            ViewMode::Editor => key.file_id.to_string(),
            ViewMode::Preview => format!("{} (Preview)", key.file_id),
        };
        Self { key, display_name }
    }
}

/// Either one tab or the welcome screen is active, never both and never neither.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActiveSelection {
    #[default]
    Welcome,
    Tab(TabKey),
}

impl ActiveSelection {
    pub fn tab(&self) -> Option<&TabKey> {
        match self {
            ActiveSelection::Welcome => None,
            ActiveSelection::Tab(key) => Some(key),
        }
    }

    pub fn is_welcome(&self) -> bool {
        matches!(self, ActiveSelection::Welcome)
    }
}

/// Comparable copy of the tab state, used to check that no-ops stay no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSnapshot {
    pub tabs: Vec<TabKey>,
    pub active: ActiveSelection,
}

/// A single visual consequence of a controller operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEffect {
    TabInserted(OpenTab),
    TabRemoved(TabKey),
    TabActivation { key: TabKey, active: bool },
    FileVisibility { file_id: FileId, visible: bool },
    WelcomeVisibility(bool),
    MarkdownSubView { file_id: FileId, mode: ViewMode },
    PreviewContent { file_id: FileId, html: String },
    ExplorerHighlight(Option<FileId>),
}

/// Receives view effects in the order they are produced.
pub trait ViewSink {
    fn apply(&mut self, effect: ViewEffect);
}

impl ViewSink for Vec<ViewEffect> {
    fn apply(&mut self, effect: ViewEffect) {
        self.push(effect);
    }
}
