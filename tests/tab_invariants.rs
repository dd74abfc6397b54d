//! Property-based invariant tests for the tab controller.
//!
//! These hold for **any** sequence of user operations:
//!
//! 1. Exactly one thing is active: the welcome screen or a tab that is open.
//! 2. No tab key appears twice in the strip.
//! 3. Closing a tab that is not open changes nothing and emits nothing.
//! 4. Closing the only tab brings back the welcome screen.
//! 5. Markdown rendering is deterministic and never panics.

use codefolio::app::controllers::tabs::TabController;
use codefolio::app::domain::file::{FileEntry, FileId};
use codefolio::app::domain::view::{ActiveSelection, ViewEffect, ViewMode};
use codefolio::app::services::markdown::render_markdown;
use codefolio::app::services::workspace::Workspace;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const FILES: [&str; 4] = ["about.md", "projects.md", "main.rs", "notes.txt"];

fn workspace() -> Workspace {
    Workspace::from_entries([
        FileEntry::new("about.md", "# About\n\nHello **world**"),
        FileEntry::new("projects.md", "## Projects\n\n- one\n- two"),
        FileEntry::new("main.rs", "fn main() {}\n"),
        FileEntry::new("notes.txt", "plain notes"),
    ])
    .expect("unique names")
}

#[derive(Debug, Clone)]
enum Op {
    Open(usize, Option<ViewMode>),
    Switch(usize, Option<ViewMode>),
    Close(usize, Option<ViewMode>),
    CloseActive,
    Welcome,
}

fn mode() -> impl Strategy<Value = Option<ViewMode>> {
    prop_oneof![
        Just(None),
        Just(Some(ViewMode::Editor)),
        Just(Some(ViewMode::Preview)),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    let file = 0..FILES.len();
    prop_oneof![
        4 => (file.clone(), mode()).prop_map(|(f, m)| Op::Open(f, m)),
        2 => (file.clone(), mode()).prop_map(|(f, m)| Op::Switch(f, m)),
        3 => (file, mode()).prop_map(|(f, m)| Op::Close(f, m)),
        1 => Just(Op::CloseActive),
        1 => Just(Op::Welcome),
    ]
}

fn apply(ctrl: &mut TabController, op: &Op, effects: &mut Vec<ViewEffect>) {
    match op {
        Op::Open(f, m) => {
            // Markdown without a mode is rejected; that is part of the model
            let _ = ctrl.open_file(&FileId::new(FILES[*f]), *m, effects);
        }
        Op::Switch(f, m) => {
            ctrl.switch_to(&FileId::new(FILES[*f]), *m, effects);
        }
        Op::Close(f, m) => {
            ctrl.close_tab(&FileId::new(FILES[*f]), *m, effects);
        }
        Op::CloseActive => {
            ctrl.close_active(effects);
        }
        Op::Welcome => ctrl.switch_to_welcome(effects),
    }
}

fn assert_consistent(ctrl: &TabController) -> Result<(), TestCaseError> {
    let snap = ctrl.snapshot();
    match &snap.active {
        ActiveSelection::Welcome => {
            prop_assert!(ctrl.visible_file().is_none(), "welcome active with a visible file");
        }
        ActiveSelection::Tab(key) => {
            prop_assert!(snap.tabs.contains(key), "active tab {} is not open", key);
            prop_assert_eq!(ctrl.visible_file(), Some(&key.file_id));
        }
    }
    for (i, key) in snap.tabs.iter().enumerate() {
        prop_assert!(!snap.tabs[i + 1..].contains(key), "duplicate tab {}", key);
    }
    Ok(())
}

// ── Active selection ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn exactly_one_active_after_any_sequence(ops in prop::collection::vec(op(), 0..60)) {
        let mut ctrl = TabController::new(workspace());
        let mut effects = Vec::new();
        for op in &ops {
            apply(&mut ctrl, op, &mut effects);
            assert_consistent(&ctrl)?;
        }
    }

    #[test]
    fn at_most_one_tab_marked_active_in_effects(ops in prop::collection::vec(op(), 1..40)) {
        let mut ctrl = TabController::new(workspace());
        let mut effects = Vec::new();
        let mut marked = std::collections::HashSet::new();
        let mut welcome = true;
        for op in &ops {
            apply(&mut ctrl, op, &mut effects);
            for effect in effects.drain(..) {
                match effect {
                    ViewEffect::TabActivation { key, active: true } => {
                        marked.insert(key);
                    }
                    ViewEffect::TabActivation { key, active: false } | ViewEffect::TabRemoved(key) => {
                        marked.remove(&key);
                    }
                    ViewEffect::WelcomeVisibility(v) => welcome = v,
                    _ => {}
                }
            }
            prop_assert!(marked.len() <= 1, "several tabs marked active: {:?}", marked);
            prop_assert_eq!(welcome, marked.is_empty());
            prop_assert_eq!(ctrl.active().tab(), marked.iter().next());
        }
    }
}

// ── No-op closes ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn closing_missing_tab_is_noop(
        ops in prop::collection::vec(op(), 0..30),
        target in 0..FILES.len(),
        target_mode in mode(),
    ) {
        let mut ctrl = TabController::new(workspace());
        let mut effects = Vec::new();
        for op in &ops {
            apply(&mut ctrl, op, &mut effects);
        }

        let file_id = FileId::new(FILES[target]);
        let effective = if ctrl.workspace().is_markdown(&file_id) {
            target_mode.unwrap_or(ViewMode::Editor)
        } else {
            ViewMode::Editor
        };
        let open = ctrl
            .tabs()
            .iter()
            .any(|t| t.key.file_id == file_id && t.key.mode == effective);
        prop_assume!(!open);

        let before = ctrl.snapshot();
        let mut after_effects = Vec::new();
        prop_assert!(!ctrl.close_tab(&file_id, target_mode, &mut after_effects));
        prop_assert_eq!(ctrl.snapshot(), before);
        prop_assert!(after_effects.is_empty());
    }

    #[test]
    fn closing_sole_tab_shows_welcome(f in 0..FILES.len(), m in prop_oneof![Just(ViewMode::Editor), Just(ViewMode::Preview)]) {
        let mut ctrl = TabController::new(workspace());
        let mut effects = Vec::new();
        let file_id = FileId::new(FILES[f]);
        let key = ctrl.open_file(&file_id, Some(m), &mut effects).expect("known file");

        prop_assert!(ctrl.close_tab(&key.file_id, Some(key.mode), &mut effects));
        prop_assert!(ctrl.tabs().is_empty());
        prop_assert_eq!(ctrl.active(), &ActiveSelection::Welcome);
        prop_assert_eq!(effects.last(), Some(&ViewEffect::FileVisibility { file_id, visible: false }));
        prop_assert!(effects.contains(&ViewEffect::WelcomeVisibility(true)));
    }
}

// ── Renderer ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn render_is_deterministic(text in "(?s).{0,400}") {
        prop_assert_eq!(render_markdown(&text), render_markdown(&text));
    }

    #[test]
    fn render_handles_markdown_like_input(
        lines in prop::collection::vec(
            prop_oneof![
                "#{1,4} [a-z ]{0,20}",
                "- [a-z*_`]{0,20}",
                "[a-z]{0,10}\\*\\*[a-z]{0,10}\\*\\*",
                "!\\[[a-z]{0,5}\\]\\([a-z./]{0,10}\\)",
                "\\[[a-z]{0,5}\\]\\([a-z:/.]{0,10}\\)",
                "```",
                "",
            ],
            0..30,
        )
    ) {
        let text = lines.join("\n");
        let html = render_markdown(&text);
        prop_assert_eq!(html, render_markdown(&text));
    }
}
