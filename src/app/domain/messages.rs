use super::file::FileId;
use super::view::{TabKey, ViewMode};
use crate::app::controllers::sidebar::SidebarPanel;

/// All messages that can be sent through the FLTK channel.
/// Widget callbacks send one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // Files and tabs
    OpenFile(FileId, Option<ViewMode>),
    /// 1-based line of the explorer browser
    ExplorerClick(usize),
    SwitchTab(TabKey),
    CloseTab(TabKey),
    CloseActiveTab,
    ShowWelcome,
    WelcomeLink(FileId),
    OpenFolder,

    // Sidebar
    SetPanel(SidebarPanel),
    Search(String),
    /// 1-based line of the search results browser
    SearchResultClick(usize),

    // View
    ToggleDarkMode,
    ToggleLineNumbers,

    FileQuit,
    WindowClose,
}
