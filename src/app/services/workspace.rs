use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::domain::file::{FileEntry, FileId, FileKind};
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::services::text_ops::{extract_filename, line_count};

/// The explicit `FileId -> FileEntry` mapping the views are derived from.
///
/// Entries keep explorer order: folders before files at each level, then
/// case-insensitive by name.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    entries: Vec<FileEntry>,
    root: Option<PathBuf>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a workspace from in-memory entries, in the given order.
    pub fn from_entries(entries: impl IntoIterator<Item = FileEntry>) -> Result<Self> {
        let mut ws = Self::new();
        for entry in entries {
            ws.insert(entry)?;
        }
        Ok(ws)
    }

    /// The portfolio compiled into the binary.
    pub fn bundled() -> Self {
        let entries = [
            FileEntry::new("README.md", include_str!("../../../assets/portfolio/README.md")),
            FileEntry::new("about.md", include_str!("../../../assets/portfolio/about.md")),
            FileEntry::new("projects.md", include_str!("../../../assets/portfolio/projects/projects.md"))
                .in_folder(&["projects"]),
            FileEntry::new("skills.json", include_str!("../../../assets/portfolio/projects/skills.json"))
                .in_folder(&["projects"]),
            FileEntry::new("contact.js", include_str!("../../../assets/portfolio/contact.js")),
            FileEntry::new("styles.css", include_str!("../../../assets/portfolio/styles.css")),
        ];
        let mut ws = Self::new();
        ws.entries.extend(entries);
        ws.sort();
        ws
    }

    /// Load every non-hidden file under `root`. Text files are read eagerly;
    /// images are only registered by path.
    pub fn load_dir(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(AppError::Workspace(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        let mut ws = Self {
            entries: Vec::new(),
            root: Some(root.to_path_buf()),
        };
        ws.load_folder(root, &mut Vec::new())?;
        ws.sort();
        tracing::info!("Loaded {} files from {}", ws.entries.len(), root.display());
        Ok(ws)
    }

    fn load_folder(&mut self, dir: &Path, folder: &mut Vec<String>) -> Result<()> {
        for dir_entry in fs::read_dir(dir)? {
            let path = dir_entry?.path();
            let name = extract_filename(&path);
            if name.starts_with('.') {
                continue;
            }
            if path.is_dir() {
                folder.push(name);
                self.load_folder(&path, folder)?;
                folder.pop();
                continue;
            }

            let content = match FileKind::from_name(&name) {
                FileKind::Image => String::new(),
                _ => match fs::read_to_string(&path) {
                    Ok(text) => strip_bom(text),
                    Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                        tracing::warn!("Skipping non-UTF-8 file {}", path.display());
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                },
            };
            let mut entry = FileEntry::new(&name, content).with_source(&path);
            entry.folder = folder.clone();
            self.insert(entry)?;
        }
        Ok(())
    }

    fn sort(&mut self) {
        self.entries.sort_by(|a, b| {
            // Walk the shared prefix; a file nested deeper sorts as its folder
            for (x, y) in a.folder.iter().zip(b.folder.iter()) {
                let ord = caseless_cmp(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            b.folder
                .len()
                .cmp(&a.folder.len())
                .then_with(|| caseless_cmp(a.id.as_str(), b.id.as_str()))
        });
    }

    pub fn insert(&mut self, entry: FileEntry) -> Result<()> {
        if self.contains(&entry.id) {
            return Err(AppError::Workspace(format!(
                "duplicate file name: {}",
                entry.id
            )));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &FileId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &FileId) -> Option<&FileEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn is_markdown(&self, id: &FileId) -> bool {
        self.get(id).is_some_and(FileEntry::is_markdown)
    }

    pub fn content(&self, id: &FileId) -> Option<&str> {
        self.get(id).map(|e| e.content.as_str())
    }

    /// Replace a file's editable text. Returns false for unknown files and images.
    pub fn update_content(&mut self, id: &FileId, text: &str) -> bool {
        match self.entries.iter_mut().find(|e| &e.id == id) {
            Some(entry) if entry.kind != FileKind::Image => {
                if entry.content != text {
                    entry.content = text.to_string();
                }
                true
            }
            _ => false,
        }
    }

    pub fn line_count(&self, id: &FileId) -> Option<usize> {
        self.content(id).map(line_count)
    }

    /// Files offered on the welcome screen: every markdown file, then the
    /// first file of any other text kind.
    pub fn welcome_links(&self) -> Vec<FileId> {
        let mut links: Vec<FileId> = self
            .entries
            .iter()
            .filter(|e| e.is_markdown())
            .map(|e| e.id.clone())
            .collect();
        if let Some(other) = self.entries.iter().find(|e| e.kind == FileKind::Text) {
            links.push(other.id.clone());
        }
        links
    }

    /// Resolve an image `src` from rendered markdown to a path on disk.
    pub fn resolve_image(&self, src: &str) -> Option<PathBuf> {
        if src.starts_with("http://") || src.starts_with("https://") {
            return None;
        }
        let name = extract_filename(Path::new(src));
        if let Some(path) = self
            .get(&FileId::new(name))
            .and_then(|e| e.source_path.clone())
        {
            return Some(path);
        }
        self.root.as_ref().map(|root| root.join(src))
    }
}

/// Drop the UTF-8 byte order mark some editors write at the start of a file.
fn strip_bom(text: String) -> String {
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

/// Case-insensitive order; names differing only in case stay apart so
/// equal folders end up adjacent.
fn caseless_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, text: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, text).unwrap();
    }

    #[test]
    fn test_bundled_has_markdown_and_code() {
        let ws = Workspace::bundled();
        assert!(ws.is_markdown(&FileId::new("about.md")));
        assert!(ws.is_markdown(&FileId::new("README.md")));
        assert!(!ws.is_markdown(&FileId::new("contact.js")));
        assert!(ws.root().is_none());
    }

    #[test]
    fn test_load_dir_orders_folders_first() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("zeta.md"), "# Z");
        write(&dir.path().join("Alpha.txt"), "a");
        write(&dir.path().join("projects/web.md"), "web");
        write(&dir.path().join(".git/config"), "hidden");

        let ws = Workspace::load_dir(dir.path()).unwrap();
        let names: Vec<&str> = ws.files().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(names, vec!["web.md", "Alpha.txt", "zeta.md"]);
        assert_eq!(ws.files()[0].folder, vec!["projects".to_string()]);
        assert_eq!(ws.root(), Some(dir.path()));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_load_dir_keeps_same_folder_adjacent_across_case() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("Docs/a.md"), "a");
        write(&dir.path().join("docs/b.md"), "b");
        write(&dir.path().join("Docs/c.md"), "c");

        let ws = Workspace::load_dir(dir.path()).unwrap();
        let layout: Vec<(&str, &str)> = ws
            .files()
            .iter()
            .map(|e| (e.folder[0].as_str(), e.id.as_str()))
            .collect();
        assert_eq!(layout, vec![("Docs", "a.md"), ("Docs", "c.md"), ("docs", "b.md")]);
    }

    #[test]
    fn test_load_dir_strips_byte_order_mark() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("about.md"), "\u{feff}# About\n");

        let ws = Workspace::load_dir(dir.path()).unwrap();
        assert_eq!(ws.content(&FileId::new("about.md")), Some("# About\n"));
    }

    #[test]
    fn test_bundled_order() {
        let ws = Workspace::bundled();
        let names: Vec<&str> = ws.files().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            names,
            vec!["projects.md", "skills.json", "about.md", "contact.js", "README.md", "styles.css"]
        );
    }

    #[test]
    fn test_load_dir_registers_images_without_reading() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("me.png"), [0x89, 0x50, 0x4e, 0x47, 0xff]).unwrap();

        let ws = Workspace::load_dir(dir.path()).unwrap();
        let entry = ws.get(&FileId::new("me.png")).unwrap();
        assert_eq!(entry.kind, FileKind::Image);
        assert!(entry.content.is_empty());
        assert_eq!(
            ws.resolve_image("me.png"),
            Some(dir.path().join("me.png"))
        );
    }

    #[test]
    fn test_load_dir_rejects_duplicate_names() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("a/notes.md"), "1");
        write(&dir.path().join("b/notes.md"), "2");

        let err = Workspace::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::Workspace(_)));
    }

    #[test]
    fn test_load_dir_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = Workspace::load_dir(&dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_update_content() {
        let mut ws = Workspace::from_entries([
            FileEntry::new("about.md", "old"),
            FileEntry::new("me.png", ""),
        ])
        .unwrap();
        assert!(ws.update_content(&FileId::new("about.md"), "new\ntext"));
        assert_eq!(ws.content(&FileId::new("about.md")), Some("new\ntext"));
        assert_eq!(ws.line_count(&FileId::new("about.md")), Some(2));
        assert!(!ws.update_content(&FileId::new("me.png"), "x"));
        assert!(!ws.update_content(&FileId::new("ghost.md"), "x"));
    }

    #[test]
    fn test_welcome_links() {
        let ws = Workspace::from_entries([
            FileEntry::new("contact.js", ""),
            FileEntry::new("README.md", ""),
            FileEntry::new("styles.css", ""),
            FileEntry::new("about.md", ""),
        ])
        .unwrap();
        let links: Vec<String> = ws.welcome_links().iter().map(|f| f.to_string()).collect();
        assert_eq!(links, vec!["README.md", "about.md", "contact.js"]);
    }

    #[test]
    fn test_remote_images_are_not_resolved() {
        let ws = Workspace::bundled();
        assert_eq!(ws.resolve_image("https://example.com/a.png"), None);
        assert_eq!(ws.resolve_image("local.png"), None);
    }
}
