use crate::app::controllers::preview::PreviewController;
use crate::app::domain::file::FileId;
use crate::app::domain::view::{
    ActiveSelection, OpenTab, TabKey, TabSnapshot, ViewEffect, ViewMode, ViewSink,
};
use crate::app::infrastructure::error::ViewError;
use crate::app::services::workspace::Workspace;

const README: &str = "README.md";

/// Mode a welcome-screen link opens with: the readme in the editor, other
/// markdown in preview, everything else without a mode.
pub fn welcome_link_mode(workspace: &Workspace, file_id: &FileId) -> Option<ViewMode> {
    if file_id.as_str() == README {
        Some(ViewMode::Editor)
    } else if workspace.is_markdown(file_id) {
        Some(ViewMode::Preview)
    } else {
        None
    }
}

/// Owns the tab strip, the active selection and the files behind them.
///
/// Every operation runs to completion and reports what changed on screen to
/// a [`ViewSink`]. Rejected operations leave all state untouched.
pub struct TabController {
    workspace: Workspace,
    tabs: Vec<OpenTab>,
    active: ActiveSelection,
    visible_file: Option<FileId>,
    preview: PreviewController,
}

impl TabController {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            tabs: Vec::new(),
            active: ActiveSelection::Welcome,
            visible_file: None,
            preview: PreviewController::new(),
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    pub fn preview(&self) -> &PreviewController {
        &self.preview
    }

    pub fn tabs(&self) -> &[OpenTab] {
        &self.tabs
    }

    pub fn active(&self) -> &ActiveSelection {
        &self.active
    }

    pub fn active_tab(&self) -> Option<&OpenTab> {
        let key = self.active.tab()?;
        self.tabs.iter().find(|t| &t.key == key)
    }

    pub fn is_active(&self, key: &TabKey) -> bool {
        self.active.tab() == Some(key)
    }

    pub fn visible_file(&self) -> Option<&FileId> {
        self.visible_file.as_ref()
    }

    pub fn snapshot(&self) -> TabSnapshot {
        TabSnapshot {
            tabs: self.tabs.iter().map(|t| t.key.clone()).collect(),
            active: self.active.clone(),
        }
    }

    fn position(&self, key: &TabKey) -> Option<usize> {
        self.tabs.iter().position(|t| &t.key == key)
    }

    /// Non-markdown files only ever have editor tabs; a missing mode means editor.
    fn normalize(&self, file_id: &FileId, mode: Option<ViewMode>) -> TabKey {
        let mode = if self.workspace.is_markdown(file_id) {
            mode.unwrap_or(ViewMode::Editor)
        } else {
            ViewMode::Editor
        };
        TabKey::new(file_id.clone(), mode)
    }

    /// Open a file, creating its tab if needed, and make it active.
    ///
    /// Markdown files need an explicit mode. If the tab already exists this
    /// is the same as [`switch_to`](Self::switch_to).
    pub fn open_file(
        &mut self,
        file_id: &FileId,
        requested: Option<ViewMode>,
        sink: &mut impl ViewSink,
    ) -> Result<TabKey, ViewError> {
        let Some(entry) = self.workspace.get(file_id) else {
            return Err(ViewError::UnknownFile(file_id.clone()));
        };
        if entry.is_markdown() && requested.is_none() {
            return Err(ViewError::ModeRequired(file_id.clone()));
        }

        let key = self.normalize(file_id, requested);
        if self.position(&key).is_some() {
            self.activate(&key, sink);
            return Ok(key);
        }

        tracing::debug!("Opening tab {}", key);
        let tab = OpenTab::new(key.clone());
        self.tabs.push(tab.clone());
        sink.apply(ViewEffect::TabInserted(tab));
        self.activate(&key, sink);
        Ok(key)
    }

    /// Open a file the way the welcome screen links do.
    pub fn open_welcome_link(
        &mut self,
        file_id: &FileId,
        sink: &mut impl ViewSink,
    ) -> Result<TabKey, ViewError> {
        let mode = welcome_link_mode(&self.workspace, file_id);
        self.open_file(file_id, mode, sink)
    }

    /// Activate an existing tab. Returns false (and does nothing) if there is
    /// no tab for this file and mode.
    pub fn switch_to(
        &mut self,
        file_id: &FileId,
        mode: Option<ViewMode>,
        sink: &mut impl ViewSink,
    ) -> bool {
        let key = self.normalize(file_id, mode);
        if self.position(&key).is_none() {
            tracing::debug!("No tab {} to switch to", key);
            return false;
        }
        self.activate(&key, sink);
        true
    }

    /// Close a tab. Returns false (and does nothing) if it was never open.
    ///
    /// When the active tab closes, the last tab in the strip takes over, or
    /// the welcome screen if the strip is empty.
    pub fn close_tab(
        &mut self,
        file_id: &FileId,
        mode: Option<ViewMode>,
        sink: &mut impl ViewSink,
    ) -> bool {
        let key = self.normalize(file_id, mode);
        let Some(idx) = self.position(&key) else {
            return false;
        };

        tracing::debug!("Closing tab {}", key);
        let was_active = self.is_active(&key);
        self.tabs.remove(idx);
        sink.apply(ViewEffect::TabRemoved(key.clone()));

        if was_active {
            // The removed tab needs no deactivation effect
            self.active = ActiveSelection::Welcome;
            match self.tabs.last().map(|t| t.key.clone()) {
                Some(next) => self.activate(&next, sink),
                None => self.show_welcome(sink),
            }
        }

        if !self.tabs.iter().any(|t| &t.key.file_id == file_id) {
            if self.visible_file.as_ref() == Some(file_id) {
                self.visible_file = None;
            }
            sink.apply(ViewEffect::FileVisibility {
                file_id: file_id.clone(),
                visible: false,
            });
        }
        true
    }

    /// Close whichever tab is active. No-op on the welcome screen.
    pub fn close_active(&mut self, sink: &mut impl ViewSink) -> bool {
        match self.active.tab().cloned() {
            Some(key) => self.close_tab(&key.file_id, Some(key.mode), sink),
            None => false,
        }
    }

    pub fn switch_to_welcome(&mut self, sink: &mut impl ViewSink) {
        self.show_welcome(sink);
    }

    fn show_welcome(&mut self, sink: &mut impl ViewSink) {
        if let ActiveSelection::Tab(prev) = std::mem::take(&mut self.active) {
            sink.apply(ViewEffect::TabActivation {
                key: prev,
                active: false,
            });
        }
        if let Some(file_id) = self.visible_file.take() {
            sink.apply(ViewEffect::FileVisibility {
                file_id,
                visible: false,
            });
        }
        sink.apply(ViewEffect::ExplorerHighlight(None));
        sink.apply(ViewEffect::WelcomeVisibility(true));
    }

    /// Make `key` the active tab and bring its file on screen. Preview tabs
    /// are rendered from the current text every time.
    fn activate(&mut self, key: &TabKey, sink: &mut impl ViewSink) {
        let prev = std::mem::replace(&mut self.active, ActiveSelection::Tab(key.clone()));
        if let ActiveSelection::Tab(prev) = prev
            && &prev != key
        {
            sink.apply(ViewEffect::TabActivation {
                key: prev,
                active: false,
            });
        }
        sink.apply(ViewEffect::TabActivation {
            key: key.clone(),
            active: true,
        });
        sink.apply(ViewEffect::WelcomeVisibility(false));

        let file_id = &key.file_id;
        if self.visible_file.as_ref() != Some(file_id) {
            if let Some(old) = self.visible_file.replace(file_id.clone()) {
                sink.apply(ViewEffect::FileVisibility {
                    file_id: old,
                    visible: false,
                });
            }
            sink.apply(ViewEffect::FileVisibility {
                file_id: file_id.clone(),
                visible: true,
            });
        }
        sink.apply(ViewEffect::ExplorerHighlight(Some(file_id.clone())));

        if self.workspace.is_markdown(file_id) {
            sink.apply(ViewEffect::MarkdownSubView {
                file_id: file_id.clone(),
                mode: key.mode,
            });
            if key.mode == ViewMode::Preview {
                let text = self.workspace.content(file_id).unwrap_or_default();
                let html = self.preview.render(text);
                sink.apply(ViewEffect::PreviewContent {
                    file_id: file_id.clone(),
                    html,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::file::FileEntry;

    fn controller() -> TabController {
        let ws = Workspace::from_entries([
            FileEntry::new("about.md", "# About\n\nHello **there**"),
            FileEntry::new("README.md", "# Readme"),
            FileEntry::new("contact.js", "let x = 1;"),
            FileEntry::new("styles.css", "body {}"),
        ])
        .unwrap();
        TabController::new(ws)
    }

    fn id(name: &str) -> FileId {
        FileId::new(name)
    }

    fn assert_single_active(c: &TabController) {
        match c.active() {
            ActiveSelection::Welcome => {}
            ActiveSelection::Tab(key) => {
                assert_eq!(c.tabs().iter().filter(|t| &t.key == key).count(), 1)
            }
        }
    }

    #[test]
    fn test_starts_on_welcome() {
        let c = controller();
        assert!(c.active().is_welcome());
        assert!(c.tabs().is_empty());
        assert!(c.active_tab().is_none());
    }

    #[test]
    fn test_open_markdown_without_mode_is_rejected() {
        let mut c = controller();
        let mut fx = Vec::new();
        let before = c.snapshot();

        let err = c.open_file(&id("about.md"), None, &mut fx).unwrap_err();
        assert_eq!(err, ViewError::ModeRequired(id("about.md")));
        assert_eq!(c.snapshot(), before);
        assert!(fx.is_empty());
    }

    #[test]
    fn test_open_unknown_file_is_rejected() {
        let mut c = controller();
        let mut fx = Vec::new();
        let err = c.open_file(&id("ghost.txt"), None, &mut fx).unwrap_err();
        assert_eq!(err, ViewError::UnknownFile(id("ghost.txt")));
        assert!(c.tabs().is_empty());
        assert!(fx.is_empty());
    }

    #[test]
    fn test_open_non_markdown_forces_editor() {
        let mut c = controller();
        let mut fx = Vec::new();
        let key = c
            .open_file(&id("contact.js"), Some(ViewMode::Preview), &mut fx)
            .unwrap();
        assert_eq!(key, TabKey::editor("contact.js"));
        assert!(c.is_active(&key));
        assert!(!fx.iter().any(|e| matches!(e, ViewEffect::MarkdownSubView { .. })));
    }

    #[test]
    fn test_open_emits_insert_activate_and_hides_welcome() {
        let mut c = controller();
        let mut fx = Vec::new();
        c.open_file(&id("contact.js"), None, &mut fx).unwrap();
        assert_eq!(
            fx,
            vec![
                ViewEffect::TabInserted(OpenTab::new(TabKey::editor("contact.js"))),
                ViewEffect::TabActivation {
                    key: TabKey::editor("contact.js"),
                    active: true
                },
                ViewEffect::WelcomeVisibility(false),
                ViewEffect::FileVisibility {
                    file_id: id("contact.js"),
                    visible: true
                },
                ViewEffect::ExplorerHighlight(Some(id("contact.js"))),
            ]
        );
    }

    #[test]
    fn test_open_existing_tab_switches_instead() {
        let mut c = controller();
        let mut fx = Vec::new();
        c.open_file(&id("contact.js"), None, &mut fx).unwrap();
        c.open_file(&id("styles.css"), None, &mut fx).unwrap();
        fx.clear();

        c.open_file(&id("contact.js"), None, &mut fx).unwrap();
        assert_eq!(c.tabs().len(), 2);
        assert!(c.is_active(&TabKey::editor("contact.js")));
        assert!(!fx.iter().any(|e| matches!(e, ViewEffect::TabInserted(_))));
        assert!(fx.contains(&ViewEffect::TabActivation {
            key: TabKey::editor("styles.css"),
            active: false
        }));
    }

    #[test]
    fn test_same_file_two_modes() {
        let mut c = controller();
        let mut fx = Vec::new();
        c.open_file(&id("about.md"), Some(ViewMode::Editor), &mut fx).unwrap();
        c.open_file(&id("about.md"), Some(ViewMode::Preview), &mut fx).unwrap();
        assert_eq!(c.tabs().len(), 2);
        assert_eq!(c.tabs()[1].display_name, "about.md (Preview)");
        assert!(c.is_active(&TabKey::preview("about.md")));
    }

    #[test]
    fn test_switch_into_preview_renders_every_time() {
        let mut c = controller();
        let mut fx = Vec::new();
        c.open_file(&id("about.md"), Some(ViewMode::Preview), &mut fx).unwrap();
        c.open_file(&id("about.md"), Some(ViewMode::Editor), &mut fx).unwrap();

        c.workspace_mut().update_content(&id("about.md"), "# Changed");
        fx.clear();
        assert!(c.switch_to(&id("about.md"), Some(ViewMode::Preview), &mut fx));

        assert!(fx.contains(&ViewEffect::MarkdownSubView {
            file_id: id("about.md"),
            mode: ViewMode::Preview
        }));
        assert!(fx.contains(&ViewEffect::PreviewContent {
            file_id: id("about.md"),
            html: "<h1>Changed</h1>".to_string()
        }));
        // Same file stays visible, no hide/show flicker
        assert!(!fx.iter().any(|e| matches!(e, ViewEffect::FileVisibility { .. })));
        assert_eq!(c.preview().render_count(), 2);
    }

    #[test]
    fn test_switch_to_editor_does_not_render() {
        let mut c = controller();
        let mut fx = Vec::new();
        c.open_file(&id("about.md"), Some(ViewMode::Editor), &mut fx).unwrap();
        assert!(!fx.iter().any(|e| matches!(e, ViewEffect::PreviewContent { .. })));
        assert!(fx.contains(&ViewEffect::MarkdownSubView {
            file_id: id("about.md"),
            mode: ViewMode::Editor
        }));
    }

    #[test]
    fn test_switch_to_missing_tab_is_noop() {
        let mut c = controller();
        let mut fx = Vec::new();
        c.open_file(&id("contact.js"), None, &mut fx).unwrap();
        let before = c.snapshot();
        fx.clear();

        assert!(!c.switch_to(&id("styles.css"), None, &mut fx));
        assert!(!c.switch_to(&id("about.md"), Some(ViewMode::Preview), &mut fx));
        assert_eq!(c.snapshot(), before);
        assert!(fx.is_empty());
    }

    #[test]
    fn test_switch_markdown_without_mode_means_editor() {
        let mut c = controller();
        let mut fx = Vec::new();
        c.open_file(&id("about.md"), Some(ViewMode::Editor), &mut fx).unwrap();
        c.open_file(&id("contact.js"), None, &mut fx).unwrap();
        assert!(c.switch_to(&id("about.md"), None, &mut fx));
        assert!(c.is_active(&TabKey::editor("about.md")));
    }

    #[test]
    fn test_close_missing_tab_is_noop() {
        let mut c = controller();
        let mut fx = Vec::new();
        c.open_file(&id("contact.js"), None, &mut fx).unwrap();
        let before = c.snapshot();
        fx.clear();

        assert!(!c.close_tab(&id("styles.css"), None, &mut fx));
        assert!(!c.close_tab(&id("about.md"), Some(ViewMode::Preview), &mut fx));
        assert_eq!(c.snapshot(), before);
        assert!(fx.is_empty());
    }

    #[test]
    fn test_close_sole_tab_shows_welcome() {
        let mut c = controller();
        let mut fx = Vec::new();
        c.open_file(&id("contact.js"), None, &mut fx).unwrap();
        fx.clear();

        assert!(c.close_tab(&id("contact.js"), None, &mut fx));
        assert!(c.active().is_welcome());
        assert!(c.tabs().is_empty());
        assert!(c.visible_file().is_none());
        assert!(fx.contains(&ViewEffect::WelcomeVisibility(true)));
        assert!(fx.contains(&ViewEffect::FileVisibility {
            file_id: id("contact.js"),
            visible: false
        }));
    }

    #[test]
    fn test_close_active_picks_last_tab_not_neighbor() {
        let mut c = controller();
        let mut fx = Vec::new();
        c.open_file(&id("contact.js"), None, &mut fx).unwrap();
        c.open_file(&id("styles.css"), None, &mut fx).unwrap();
        c.open_file(&id("README.md"), Some(ViewMode::Editor), &mut fx).unwrap();
        c.switch_to(&id("contact.js"), None, &mut fx);

        c.close_tab(&id("contact.js"), None, &mut fx);
        // styles.css sat right after contact.js; README.md is last
        assert!(c.is_active(&TabKey::editor("README.md")));
        assert_single_active(&c);
    }

    #[test]
    fn test_close_inactive_tab_keeps_active() {
        let mut c = controller();
        let mut fx = Vec::new();
        c.open_file(&id("contact.js"), None, &mut fx).unwrap();
        c.open_file(&id("styles.css"), None, &mut fx).unwrap();
        fx.clear();

        c.close_tab(&id("contact.js"), None, &mut fx);
        assert!(c.is_active(&TabKey::editor("styles.css")));
        assert!(!fx.iter().any(|e| matches!(e, ViewEffect::TabActivation { .. })));
    }

    #[test]
    fn test_close_editor_while_preview_active_keeps_file_shown() {
        let mut c = controller();
        let mut fx = Vec::new();
        c.open_file(&id("about.md"), Some(ViewMode::Editor), &mut fx).unwrap();
        c.open_file(&id("about.md"), Some(ViewMode::Preview), &mut fx).unwrap();
        fx.clear();

        assert!(c.close_tab(&id("about.md"), Some(ViewMode::Editor), &mut fx));
        assert!(c.is_active(&TabKey::preview("about.md")));
        assert_eq!(c.visible_file(), Some(&id("about.md")));
        assert_eq!(fx, vec![ViewEffect::TabRemoved(TabKey::editor("about.md"))]);
    }

    #[test]
    fn test_switch_to_welcome_hides_everything() {
        let mut c = controller();
        let mut fx = Vec::new();
        c.open_file(&id("contact.js"), None, &mut fx).unwrap();
        fx.clear();

        c.switch_to_welcome(&mut fx);
        assert!(c.active().is_welcome());
        assert_eq!(c.tabs().len(), 1);
        assert_eq!(
            fx,
            vec![
                ViewEffect::TabActivation {
                    key: TabKey::editor("contact.js"),
                    active: false
                },
                ViewEffect::FileVisibility {
                    file_id: id("contact.js"),
                    visible: false
                },
                ViewEffect::ExplorerHighlight(None),
                ViewEffect::WelcomeVisibility(true),
            ]
        );

        // Coming back shows the file again
        fx.clear();
        assert!(c.switch_to(&id("contact.js"), None, &mut fx));
        assert!(fx.contains(&ViewEffect::FileVisibility {
            file_id: id("contact.js"),
            visible: true
        }));
    }

    #[test]
    fn test_close_active_tab_helper() {
        let mut c = controller();
        let mut fx = Vec::new();
        assert!(!c.close_active(&mut fx));
        c.open_file(&id("about.md"), Some(ViewMode::Preview), &mut fx).unwrap();
        assert!(c.close_active(&mut fx));
        assert!(c.active().is_welcome());
    }

    #[test]
    fn test_welcome_links() {
        let mut c = controller();
        let mut fx = Vec::new();
        assert_eq!(
            c.open_welcome_link(&id("README.md"), &mut fx).unwrap(),
            TabKey::editor("README.md")
        );
        assert_eq!(
            c.open_welcome_link(&id("about.md"), &mut fx).unwrap(),
            TabKey::preview("about.md")
        );
        assert_eq!(
            c.open_welcome_link(&id("contact.js"), &mut fx).unwrap(),
            TabKey::editor("contact.js")
        );
    }
}
