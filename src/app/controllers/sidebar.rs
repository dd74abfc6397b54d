use std::collections::HashSet;

use crate::app::domain::file::{FileId, FileKind};
use crate::app::services::text_ops::matching_lines;
use crate::app::services::workspace::Workspace;

pub const NO_RESULTS: &str = "No results found";
pub const NO_SOURCE_CONTROL: &str = "No source control providers registered.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarPanel {
    #[default]
    Explorer,
    Search,
    SourceControl,
    Extensions,
}

impl SidebarPanel {
    pub const ALL: [SidebarPanel; 4] = [
        SidebarPanel::Explorer,
        SidebarPanel::Search,
        SidebarPanel::SourceControl,
        SidebarPanel::Extensions,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SidebarPanel::Explorer => "EXPLORER",
            SidebarPanel::Search => "SEARCH",
            SidebarPanel::SourceControl => "SOURCE CONTROL",
            SidebarPanel::Extensions => "EXTENSIONS",
        }
    }

    /// Activity bar glyph.
    pub fn icon(&self) -> &'static str {
        match self {
            SidebarPanel::Explorer => "@fileopen",
            SidebarPanel::Search => "@search",
            SidebarPanel::SourceControl => "@refresh",
            SidebarPanel::Extensions => "@menu",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Folder { path: String, collapsed: bool },
    File(FileId),
}

/// One visible line of the explorer tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerRow {
    pub depth: usize,
    pub label: String,
    pub kind: RowKind,
}

impl ExplorerRow {
    /// Indented label with the folder marker, as shown in the explorer.
    pub fn display(&self) -> String {
        let indent = "    ".repeat(self.depth);
        match &self.kind {
            RowKind::Folder { collapsed: true, .. } => format!("{indent}\u{25b6} {}", self.label),
            RowKind::Folder { collapsed: false, .. } => format!("{indent}\u{25bc} {}", self.label),
            RowKind::File(_) => format!("{indent}  {}", self.label),
        }
    }

    pub fn file_id(&self) -> Option<&FileId> {
        match &self.kind {
            RowKind::File(id) => Some(id),
            RowKind::Folder { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub file_id: FileId,
    /// 1-based
    pub line: usize,
    pub preview: String,
}

impl SearchHit {
    pub fn display(&self) -> String {
        format!("{}:{}  {}", self.file_id, self.line, self.preview)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extension {
    pub icon: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
}

const INSTALLED_EXTENSIONS: [Extension; 5] = [
    Extension {
        icon: "\u{1f3a8}",
        name: "Peacock",
        description: "Subtly change workspace color for quick identification",
        version: "v4.2.2 \u{2022} johnpapa.vscode-peacock",
    },
    Extension {
        icon: "\u{1f5bc}",
        name: "Image Viewer",
        description: "Preview images with zoom and pan controls",
        version: "v1.0.0",
    },
    Extension {
        icon: "\u{1f4dd}",
        name: "Markdown Preview Enhanced",
        description: "Preview Markdown files with syntax highlighting",
        version: "v2.5.1",
    },
    Extension {
        icon: "\u{1f3a8}",
        name: "Material Icon Theme",
        description: "Material Design icons for VS Code",
        version: "v4.18.0 \u{2022} PKief.material-icon-theme",
    },
    Extension {
        icon: "\u{26a1}",
        name: "Live Server",
        description: "Launch a development local server with live reload",
        version: "v5.7.9 \u{2022} ritwickdey.LiveServer",
    },
];

/// Activity bar selection and explorer tree state.
///
/// Switching panels never loses explorer state: the tree is always rebuilt
/// from the workspace plus the collapsed folder set.
#[derive(Debug, Default)]
pub struct SidebarController {
    panel: SidebarPanel,
    collapsed: HashSet<String>,
}

impl SidebarController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self) -> SidebarPanel {
        self.panel
    }

    pub fn title(&self) -> &'static str {
        self.panel.title()
    }

    /// Returns true if the panel changed.
    pub fn set_panel(&mut self, panel: SidebarPanel) -> bool {
        if self.panel == panel {
            return false;
        }
        tracing::debug!("Sidebar panel -> {}", panel.title());
        self.panel = panel;
        true
    }

    /// Flip a folder between collapsed and expanded. `path` is the folder
    /// chain joined with `/`. Returns the new collapsed state.
    pub fn toggle_folder(&mut self, path: &str) -> bool {
        if self.collapsed.remove(path) {
            false
        } else {
            self.collapsed.insert(path.to_string());
            true
        }
    }

    pub fn is_collapsed(&self, path: &str) -> bool {
        self.collapsed.contains(path)
    }

    /// Visible explorer rows in workspace order. Files under a collapsed
    /// folder (at any depth) are left out, the folder row itself stays.
    pub fn explorer_rows(&self, workspace: &Workspace) -> Vec<ExplorerRow> {
        let mut rows = Vec::new();
        let mut open_path: Vec<String> = Vec::new();

        for entry in workspace.files() {
            let shared = open_path
                .iter()
                .zip(entry.folder.iter())
                .take_while(|(a, b)| a == b)
                .count();
            open_path.truncate(shared);

            for name in &entry.folder[shared..] {
                let hidden = self.hidden(&open_path);
                open_path.push(name.clone());
                if !hidden {
                    let path = open_path.join("/");
                    rows.push(ExplorerRow {
                        depth: open_path.len() - 1,
                        label: name.clone(),
                        kind: RowKind::Folder {
                            collapsed: self.is_collapsed(&path),
                            path,
                        },
                    });
                }
            }

            if !self.hidden(&open_path) {
                rows.push(ExplorerRow {
                    depth: open_path.len(),
                    label: entry.id.to_string(),
                    kind: RowKind::File(entry.id.clone()),
                });
            }
        }
        rows
    }

    /// True if any folder along `chain` is collapsed.
    fn hidden(&self, chain: &[String]) -> bool {
        (1..=chain.len()).any(|n| self.is_collapsed(&chain[..n].join("/")))
    }

    /// Case-insensitive content search over every non-image file.
    pub fn search(&self, workspace: &Workspace, query: &str) -> Vec<SearchHit> {
        workspace
            .files()
            .iter()
            .filter(|e| e.kind != FileKind::Image)
            .flat_map(|e| {
                matching_lines(&e.content, query)
                    .into_iter()
                    .map(|m| SearchHit {
                        file_id: e.id.clone(),
                        line: m.line,
                        preview: m.text,
                    })
            })
            .collect()
    }

    pub fn extensions(&self) -> &'static [Extension] {
        &INSTALLED_EXTENSIONS
    }
}
