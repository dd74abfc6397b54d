use fltk::{
    app::{self, Sender},
    dialog,
    frame::Frame,
    menu::{MenuBar, MenuItem},
    prelude::*,
    window::Window,
};

use super::controllers::preview::wrap_html_for_helpview;
use super::controllers::sidebar::{ExplorerRow, RowKind, SearchHit, SidebarController, SidebarPanel};
use super::controllers::tabs::TabController;
use super::domain::file::FileId;
use super::domain::settings::{AppSettings, ThemeMode};
use super::domain::view::{TabKey, ViewMode};
use super::domain::messages::Message;
use super::infrastructure::buffer::buffer_text_no_leak;
use super::services::workspace::Workspace;
use crate::ui::file_dialogs::native_folder_dialog;
use crate::ui::main_window::MainWidgets;
use crate::ui::sidebar::{ActivityBar, SidebarWidgets};
use crate::ui::theme::apply_theme;
use crate::ui::view_panes::ViewPanes;
use crate::ui::welcome::WelcomePage;

const APP_NAME: &str = "Codefolio";
const OPEN_IN_EDITOR: &str = "Open in Editor";
const OPEN_PREVIEW: &str = "Open Preview";

pub struct AppState {
    pub tabs: TabController,
    pub sidebar: SidebarController,
    pub panes: ViewPanes,
    pub side: SidebarWidgets,
    pub activity_bar: ActivityBar,
    pub welcome: WelcomePage,
    pub window: Window,
    pub menu: MenuBar,
    pub status_bar: Frame,
    pub sender: Sender<Message>,
    pub settings: AppSettings,
    pub dark_mode: bool,
    pub show_linenumbers: bool,
    explorer_rows: Vec<ExplorerRow>,
    search_hits: Vec<SearchHit>,
    /// Raw HTML of the preview on screen, kept to re-wrap on theme changes.
    preview_html: Option<String>,
}

impl AppState {
    pub fn new(
        widgets: MainWidgets,
        workspace: Workspace,
        settings: AppSettings,
        sender: Sender<Message>,
    ) -> Self {
        let MainWidgets {
            wind,
            menu,
            activity_bar,
            sidebar,
            tab_bar,
            content,
            welcome,
            text_editor,
            preview,
            image_frame,
            status_bar,
        } = widgets;

        let panes = ViewPanes::new(
            tab_bar,
            content,
            welcome.flex.clone(),
            text_editor,
            preview,
            image_frame,
            sidebar.explorer.clone(),
        );

        let dark_mode = settings.is_dark();
        let show_linenumbers = settings.line_numbers_enabled;
        let mut state = Self {
            tabs: TabController::new(Workspace::new()),
            sidebar: SidebarController::new(),
            panes,
            side: sidebar,
            activity_bar,
            welcome,
            window: wind,
            menu,
            status_bar,
            sender,
            settings,
            dark_mode,
            show_linenumbers,
            explorer_rows: Vec::new(),
            search_hits: Vec::new(),
            preview_html: None,
        };
        state.apply_all_themes();
        state.replace_workspace(workspace);

        if !state.settings.welcome_on_start
            && let Some(first) = state.tabs.workspace().welcome_links().first().cloned()
        {
            state.open_welcome_link(&first);
        }
        state
    }

    /// Copy the text of the file on screen back into the workspace so the
    /// controller always renders and searches what the user sees. Read-only
    /// files are skipped.
    fn sync_visible_buffer(&mut self) {
        let Some(file_id) = self.panes.shown_file().cloned() else {
            return;
        };
        let editable = self
            .tabs
            .workspace()
            .get(&file_id)
            .is_some_and(|e| e.edit_policy().allows_edits());
        if !editable {
            return;
        }
        if let Some(buf) = self.panes.buffer(&file_id) {
            let text = buffer_text_no_leak(buf);
            self.tabs.workspace_mut().update_content(&file_id, &text);
        }
    }

    pub fn open_file(&mut self, file_id: &FileId, mode: Option<ViewMode>) {
        self.sync_visible_buffer();
        if let Err(e) = self.tabs.open_file(file_id, mode, &mut self.panes) {
            tracing::debug!("Ignoring open request: {}", e);
        }
        self.after_view_change();
    }

    pub fn open_welcome_link(&mut self, file_id: &FileId) {
        self.sync_visible_buffer();
        if let Err(e) = self.tabs.open_welcome_link(file_id, &mut self.panes) {
            tracing::debug!("Ignoring welcome link: {}", e);
        }
        self.after_view_change();
    }

    pub fn switch_tab(&mut self, key: &TabKey) {
        self.sync_visible_buffer();
        self.tabs.switch_to(&key.file_id, Some(key.mode), &mut self.panes);
        self.after_view_change();
    }

    pub fn close_tab(&mut self, key: &TabKey) {
        self.sync_visible_buffer();
        self.tabs.close_tab(&key.file_id, Some(key.mode), &mut self.panes);
        self.after_view_change();
    }

    pub fn close_active_tab(&mut self) {
        self.sync_visible_buffer();
        self.tabs.close_active(&mut self.panes);
        self.after_view_change();
    }

    pub fn show_welcome(&mut self) {
        self.sync_visible_buffer();
        self.tabs.switch_to_welcome(&mut self.panes);
        self.after_view_change();
    }

    /// Explorer click: folders toggle, markdown asks for a mode, anything
    /// else opens straight away.
    pub fn explorer_click(&mut self, line: usize) {
        let Some(row) = line.checked_sub(1).and_then(|i| self.explorer_rows.get(i)).cloned() else {
            return;
        };
        match row.kind {
            RowKind::Folder { path, .. } => {
                let collapsed = self.sidebar.toggle_folder(&path);
                tracing::debug!("Folder {} collapsed: {}", path, collapsed);
                self.refresh_explorer();
            }
            RowKind::File(file_id) if self.tabs.workspace().is_markdown(&file_id) => {
                match ask_markdown_mode() {
                    Some(mode) => self.sender.send(Message::OpenFile(file_id, Some(mode))),
                    None => self.panes.sync_explorer_highlight(),
                }
            }
            RowKind::File(file_id) => self.sender.send(Message::OpenFile(file_id, None)),
        }
    }

    pub fn set_panel(&mut self, panel: SidebarPanel) {
        self.sidebar.set_panel(panel);
        self.side.show_panel(panel);
        self.activity_bar.set_active(panel, self.dark_mode);
        match panel {
            SidebarPanel::Explorer => self.refresh_explorer(),
            SidebarPanel::Search => {
                let query = self.side.search_input.value();
                self.search(&query);
                let _ = self.side.search_input.take_focus();
            }
            SidebarPanel::SourceControl => self.side.fill_source_control(),
            SidebarPanel::Extensions => self.side.fill_extensions(self.sidebar.extensions()),
        }
    }

    pub fn search(&mut self, query: &str) {
        self.sync_visible_buffer();
        self.search_hits = self.sidebar.search(self.tabs.workspace(), query);
        self.side.fill_search(&self.search_hits);
    }

    /// Open the file of a search hit and put the cursor on its line.
    pub fn search_result_click(&mut self, line: usize) {
        let Some(hit) = line.checked_sub(1).and_then(|i| self.search_hits.get(i)).cloned() else {
            return;
        };
        let mode = self
            .tabs
            .workspace()
            .is_markdown(&hit.file_id)
            .then_some(ViewMode::Editor);
        self.open_file(&hit.file_id, mode);

        if let Some(buf) = self.panes.buffer(&hit.file_id) {
            let mut buf = buf.clone();
            let pos = buf.skip_lines(0, hit.line as i32 - 1);
            self.panes.editor.set_insert_position(pos);
            self.panes.editor.show_insert_position();
        }
    }

    pub fn open_folder(&mut self) {
        let start = self.settings.workspace_dir.clone();
        let Some(dir) = native_folder_dialog(start.as_deref()) else {
            return;
        };
        match Workspace::load_dir(&dir) {
            Ok(workspace) => {
                self.replace_workspace(workspace);
                self.settings.workspace_dir = Some(dir);
                self.save_settings();
            }
            Err(e) => {
                tracing::warn!("Failed to open {}: {}", dir.display(), e);
                dialog::alert_default(&format!("Cannot open folder: {e}"));
            }
        }
    }

    /// Swap in a new workspace. Open tabs are closed through the controller
    /// first so the tab strip empties the normal way.
    fn replace_workspace(&mut self, workspace: Workspace) {
        let keys: Vec<TabKey> = self.tabs.tabs().iter().map(|t| t.key.clone()).collect();
        for key in keys {
            self.tabs.close_tab(&key.file_id, Some(key.mode), &mut self.panes);
        }

        self.panes.load_workspace(&workspace);
        self.welcome.set_links(&workspace.welcome_links(), &self.sender);
        tracing::info!("Workspace has {} files", workspace.len());
        self.tabs = TabController::new(workspace);

        let panel = self.sidebar.panel();
        self.sidebar = SidebarController::new();
        self.search_hits.clear();
        self.set_panel(panel);
        self.refresh_explorer();

        self.tabs.switch_to_welcome(&mut self.panes);
        self.after_view_change();
    }

    fn refresh_explorer(&mut self) {
        self.explorer_rows = self.sidebar.explorer_rows(self.tabs.workspace());
        self.panes.set_explorer_rows(&self.explorer_rows);
    }

    /// Bring the non-effect parts of the UI in line after a controller call.
    fn after_view_change(&mut self) {
        if let Some(html) = self.panes.take_pending_preview() {
            self.show_preview_html(html);
        }
        self.update_linenumber_width();
        self.update_status_bar();
        self.update_window_title();
    }

    fn show_preview_html(&mut self, html: String) {
        let resolved = self
            .tabs
            .preview()
            .rewrite_img_sources(&html, self.tabs.workspace());
        self.panes
            .preview
            .set_value(&wrap_html_for_helpview(&resolved, self.dark_mode));
        self.preview_html = Some(html);
    }

    pub fn update_linenumber_width(&mut self) {
        if !self.show_linenumbers {
            self.panes.editor.set_linenumber_width(0);
            return;
        }
        let line_count = self
            .panes
            .shown_file()
            .and_then(|id| self.tabs.workspace().line_count(id))
            .unwrap_or(1);
        let digits = ((line_count + 1) as f64).log10().floor() as i32 + 1;
        let width = (digits * 8 + 16).max(40);
        self.panes.editor.set_linenumber_width(width);
        self.panes.editor.redraw();
    }

    fn update_status_bar(&mut self) {
        let label = match self.tabs.active_tab() {
            Some(tab) => {
                let lines = self.tabs.workspace().line_count(&tab.key.file_id).unwrap_or(0);
                format!(
                    "  {}    {}    {} lines",
                    tab.display_name,
                    tab.key.mode.as_str(),
                    lines
                )
            }
            None => "  Welcome".to_string(),
        };
        self.status_bar.set_label(&label);
    }

    pub fn update_window_title(&mut self) {
        match self.tabs.active_tab() {
            Some(tab) => self
                .window
                .set_label(&format!("{} - {}", tab.display_name, APP_NAME)),
            None => self.window.set_label(&format!("Welcome - {APP_NAME}")),
        }
    }

    pub fn toggle_line_numbers(&mut self) {
        self.show_linenumbers = !self.show_linenumbers;
        self.settings.line_numbers_enabled = self.show_linenumbers;
        self.update_linenumber_width();
        self.save_settings();
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.settings.theme_mode = if self.dark_mode {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        };
        self.apply_all_themes();
        if let Some(html) = self.preview_html.take() {
            self.show_preview_html(html);
        }
        self.save_settings();
    }

    fn apply_all_themes(&mut self) {
        apply_theme(
            &mut self.panes.editor,
            &mut self.panes.preview,
            &mut self.panes.image_frame,
            &mut self.window,
            &mut self.menu,
            &mut self.status_bar,
            self.dark_mode,
        );
        self.panes.tab_bar.apply_theme(self.dark_mode);
        self.side.apply_theme(self.dark_mode);
        self.activity_bar.set_active(self.sidebar.panel(), self.dark_mode);
        self.welcome.apply_theme(self.dark_mode);
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save() {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }

    pub fn file_quit(&mut self) {
        self.save_settings();
        self.window.hide();
        app::quit();
    }
}

/// Popup asking how to open a markdown file. `None` when dismissed.
fn ask_markdown_mode() -> Option<ViewMode> {
    let choices = MenuItem::new(&[OPEN_IN_EDITOR, OPEN_PREVIEW]);
    let (x, y) = app::event_coords();
    let picked = choices.popup(x, y)?;
    match picked.label()?.as_str() {
        OPEN_PREVIEW => Some(ViewMode::Preview),
        _ => Some(ViewMode::Editor),
    }
}
