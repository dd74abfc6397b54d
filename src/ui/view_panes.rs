use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fltk::{
    app,
    browser::HoldBrowser,
    enums::{Event, Key},
    frame::Frame,
    group::Flex,
    image::SharedImage,
    misc::HelpView,
    prelude::*,
    text::{TextBuffer, TextEditor},
};

use super::tab_bar::TabBar;
use crate::app::controllers::sidebar::ExplorerRow;
use crate::app::domain::file::{EditPolicy, FileId, FileKind};
use crate::app::domain::view::{ViewEffect, ViewMode, ViewSink};
use crate::app::services::text_ops::flatten_line_breaks;
use crate::app::services::workspace::Workspace;

const NAVIGATION_KEYS: [Key; 14] = [
    Key::Left,
    Key::Right,
    Key::Up,
    Key::Down,
    Key::Home,
    Key::End,
    Key::PageUp,
    Key::PageDown,
    Key::ShiftL,
    Key::ShiftR,
    Key::ControlL,
    Key::ControlR,
    Key::AltL,
    Key::AltR,
];

/// Keys that change text even with a modifier held.
const EDITING_KEYS: [Key; 6] = [
    Key::BackSpace,
    Key::Delete,
    Key::Enter,
    Key::KPEnter,
    Key::Tab,
    Key::Insert,
];

/// Cut, paste, undo, redo.
const EDITING_SHORTCUTS: [char; 4] = ['x', 'v', 'z', 'y'];

enum PaneSource {
    Text { buf: TextBuffer, policy: EditPolicy },
    Image(Option<PathBuf>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Welcome,
    Editor,
    Preview,
    Image,
    Empty,
}

/// The widgets controller effects land on: the tab strip, the content
/// area and the explorer highlight.
///
/// Every text file gets its own `TextBuffer`, created when the workspace is
/// loaded, so switching files swaps buffers in a single editor.
pub struct ViewPanes {
    pub tab_bar: TabBar,
    pub content: Flex,
    pub welcome: Flex,
    pub editor: TextEditor,
    pub preview: HelpView,
    pub image_frame: Frame,
    pub explorer: HoldBrowser,
    sources: HashMap<FileId, PaneSource>,
    explorer_lines: Vec<(String, Option<FileId>)>,
    shown_file: Option<FileId>,
    pending_preview: Option<String>,
    /// Read by the editor's event handler
    edit_policy: Rc<Cell<EditPolicy>>,
}

impl ViewPanes {
    pub fn new(
        tab_bar: TabBar,
        content: Flex,
        welcome: Flex,
        mut editor: TextEditor,
        preview: HelpView,
        image_frame: Frame,
        explorer: HoldBrowser,
    ) -> Self {
        let edit_policy = Rc::new(Cell::new(EditPolicy::default()));
        editor.handle({
            let policy = edit_policy.clone();
            move |ed, event| handle_editor_event(ed, event, policy.get())
        });

        Self {
            tab_bar,
            content,
            welcome,
            editor,
            preview,
            image_frame,
            explorer,
            sources: HashMap::new(),
            explorer_lines: Vec::new(),
            shown_file: None,
            pending_preview: None,
            edit_policy,
        }
    }

    /// Create one buffer per text file. Call with a fresh controller only;
    /// open tabs are not touched.
    pub fn load_workspace(&mut self, workspace: &Workspace) {
        self.sources.clear();
        self.shown_file = None;
        for entry in workspace.files() {
            let source = match entry.kind {
                FileKind::Image => PaneSource::Image(entry.source_path.clone()),
                FileKind::Markdown | FileKind::Text => {
                    let mut buf = TextBuffer::default();
                    buf.set_text(&entry.content);
                    PaneSource::Text {
                        buf,
                        policy: entry.edit_policy(),
                    }
                }
            };
            self.sources.insert(entry.id.clone(), source);
        }
    }

    pub fn buffer(&self, file_id: &FileId) -> Option<&TextBuffer> {
        match self.sources.get(file_id) {
            Some(PaneSource::Text { buf, .. }) => Some(buf),
            _ => None,
        }
    }

    pub fn shown_file(&self) -> Option<&FileId> {
        self.shown_file.as_ref()
    }

    /// Fill the explorer and remember which file sits on each line.
    pub fn set_explorer_rows(&mut self, rows: &[ExplorerRow]) {
        self.explorer_lines = rows
            .iter()
            .map(|r| (r.display(), r.file_id().cloned()))
            .collect();
        self.refill_explorer();
        self.sync_explorer_highlight();
    }

    /// Put the explorer selection back on the file being shown.
    pub fn sync_explorer_highlight(&mut self) {
        let shown = self.shown_file.clone();
        self.highlight_explorer(shown.as_ref());
    }

    fn refill_explorer(&mut self) {
        self.explorer.clear();
        for (text, _) in &self.explorer_lines {
            self.explorer.add(text);
        }
    }

    /// HTML from the last `PreviewContent` effect, if not yet displayed.
    pub fn take_pending_preview(&mut self) -> Option<String> {
        self.pending_preview.take()
    }

    fn show_only(&mut self, pane: Pane) {
        set_visible(&mut self.welcome, pane == Pane::Welcome);
        set_visible(&mut self.editor, pane == Pane::Editor);
        set_visible(&mut self.preview, pane == Pane::Preview);
        set_visible(&mut self.image_frame, pane == Pane::Image);
        self.content.layout();
        self.content.redraw();
    }

    fn show_file(&mut self, file_id: FileId) {
        match self.sources.get(&file_id) {
            Some(PaneSource::Text { buf, policy }) => {
                self.edit_policy.set(*policy);
                self.editor.set_buffer(buf.clone());
                self.show_only(Pane::Editor);
            }
            Some(PaneSource::Image(path)) => {
                let path = path.clone();
                self.load_image(&file_id, path.as_deref());
                self.show_only(Pane::Image);
            }
            None => {
                tracing::warn!("No pane for {}", file_id);
                self.show_only(Pane::Empty);
            }
        }
        self.shown_file = Some(file_id);
    }

    fn load_image(&mut self, file_id: &FileId, path: Option<&Path>) {
        let loaded = path.map(|p| (p, SharedImage::load(p)));
        match loaded {
            Some((_, Ok(mut img))) => {
                let (w, h) = (self.content.w(), self.content.h());
                if img.w() > w || img.h() > h {
                    img.scale(w, h, true, true);
                }
                self.image_frame.set_label("");
                self.image_frame.set_image(Some(img));
            }
            Some((p, Err(e))) => {
                tracing::warn!("Failed to load image {}: {}", p.display(), e);
                self.image_frame.set_image(None::<SharedImage>);
                self.image_frame.set_label(&format!("Cannot display {file_id}"));
            }
            None => {
                self.image_frame.set_image(None::<SharedImage>);
                self.image_frame.set_label(&format!("{file_id} has no image data"));
            }
        }
    }

    fn highlight_explorer(&mut self, file_id: Option<&FileId>) {
        let line = file_id.and_then(|id| {
            self.explorer_lines
                .iter()
                .position(|(_, f)| f.as_ref() == Some(id))
        });
        match line {
            Some(idx) => self.explorer.select(idx as i32 + 1),
            // Refilling drops the selection
            None => self.refill_explorer(),
        }
    }
}

/// Apply the shown file's edit policy to editor input. Returns true when the
/// event is swallowed.
fn handle_editor_event(ed: &mut TextEditor, event: Event, policy: EditPolicy) -> bool {
    match event {
        Event::KeyDown => {
            let modified = app::is_event_ctrl() || app::is_event_alt();
            !key_allowed(policy, app::event_key(), modified)
        }
        // Keyboard paste and drops both arrive here
        Event::Paste => {
            if policy.allows_edits()
                && let Some(mut buf) = ed.buffer()
            {
                let text = flatten_line_breaks(&app::event_text());
                buf.remove_selection();
                let pos = ed.insert_position();
                buf.insert(pos, &text);
                ed.set_insert_position(pos + text.len() as i32);
                ed.show_insert_position();
            }
            true
        }
        _ => false,
    }
}

/// Whether a key press may reach the editor. Newlines are never allowed;
/// read-only files only get cursor movement and non-editing shortcuts.
fn key_allowed(policy: EditPolicy, key: Key, modified: bool) -> bool {
    if key == Key::Enter || key == Key::KPEnter {
        return false;
    }
    if policy.allows_edits() {
        return true;
    }
    if modified {
        return !EDITING_KEYS.contains(&key)
            && !EDITING_SHORTCUTS.iter().any(|c| key == Key::from_char(*c));
    }
    NAVIGATION_KEYS.contains(&key)
}

fn set_visible(w: &mut impl WidgetExt, visible: bool) {
    if visible {
        w.show();
    } else {
        w.hide();
    }
}

impl ViewSink for ViewPanes {
    fn apply(&mut self, effect: ViewEffect) {
        match effect {
            ViewEffect::TabInserted(tab) => self.tab_bar.insert(&tab),
            ViewEffect::TabRemoved(key) => self.tab_bar.remove(&key),
            ViewEffect::TabActivation { key, active } => self.tab_bar.set_active(&key, active),
            ViewEffect::WelcomeVisibility(visible) => {
                self.tab_bar.set_welcome_active(visible);
                if visible {
                    self.show_only(Pane::Welcome);
                } else {
                    set_visible(&mut self.welcome, false);
                }
            }
            ViewEffect::FileVisibility { file_id, visible } => {
                if visible {
                    self.show_file(file_id);
                } else if self.shown_file.as_ref() == Some(&file_id) {
                    self.shown_file = None;
                    if !self.welcome.visible() {
                        self.show_only(Pane::Empty);
                    }
                }
            }
            ViewEffect::MarkdownSubView { mode, .. } => match mode {
                ViewMode::Editor => self.show_only(Pane::Editor),
                ViewMode::Preview => self.show_only(Pane::Preview),
            },
            ViewEffect::PreviewContent { html, .. } => self.pending_preview = Some(html),
            ViewEffect::ExplorerHighlight(file_id) => self.highlight_explorer(file_id.as_ref()),
        }
    }
}
