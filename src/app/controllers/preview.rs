use std::path::PathBuf;

use crate::app::services::markdown::{image_sources, render_markdown};
use crate::app::services::workspace::Workspace;

/// Runs markdown renders for preview tabs.
///
/// There is no cache: every activation of a preview tab renders
/// the current text again. The `src` of every image in the last render is
/// remembered so the front-end can load them.
#[derive(Debug, Default)]
pub struct PreviewController {
    loaded_image_srcs: Vec<String>,
    render_count: usize,
}

impl PreviewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render markdown text and record the images it references.
    pub fn render(&mut self, text: &str) -> String {
        let html = render_markdown(text);
        self.track_images_in_html(&html);
        self.render_count += 1;
        html
    }

    fn track_images_in_html(&mut self, html: &str) {
        self.loaded_image_srcs = image_sources(html);
    }

    /// Image `src` values from the most recent render.
    pub fn image_srcs(&self) -> &[String] {
        &self.loaded_image_srcs
    }

    /// Images from the last render that exist on disk, as `(src, path)`.
    pub fn resolved_images(&self, workspace: &Workspace) -> Vec<(&str, PathBuf)> {
        self.loaded_image_srcs
            .iter()
            .filter_map(|src| Some((src.as_str(), workspace.resolve_image(src)?)))
            .filter(|(_, path)| path.is_file())
            .collect()
    }

    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// Point the images of the last render at their absolute path, since
    /// HelpView resolves relative paths against the process directory.
    pub fn rewrite_img_sources(&self, html: &str, workspace: &Workspace) -> String {
        let mut out = html.to_string();
        for (src, path) in self.resolved_images(workspace) {
            out = out.replace(
                &format!("src=\"{src}\""),
                &format!("src=\"{}\"", path.display()),
            );
        }
        out
    }
}

/// Wrap rendered HTML for FLTK's HelpView, which has no CSS support.
pub fn wrap_html_for_helpview(html: &str, is_dark: bool) -> String {
    let (bg, fg, link) = if is_dark {
        ("#1e1e1e", "#d4d4d4", "#3794ff")
    } else {
        ("#ffffff", "#1e1e1e", "#0066bf")
    };
    format!(
        "<body bgcolor=\"{bg}\" text=\"{fg}\" link=\"{link}\"><font face=\"Helvetica\" size=\"4\">{html}</font></body>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::file::FileEntry;

    #[test]
    fn test_render_tracks_images() {
        let mut preview = PreviewController::new();
        let html = preview.render("# Me\n![profile](profile.png)\n");
        assert!(html.starts_with("<h1>Me</h1>"));
        assert_eq!(preview.image_srcs(), ["profile.png".to_string()]);

        preview.render("no images here");
        assert!(preview.image_srcs().is_empty());
        assert_eq!(preview.render_count(), 2);
    }

    #[test]
    fn test_render_is_uncached() {
        let mut preview = PreviewController::new();
        assert_eq!(preview.render("# A"), "<h1>A</h1>");
        assert_eq!(preview.render("# B"), "<h1>B</h1>");
    }

    #[test]
    fn test_resolved_images_only_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("here.png"), [0u8; 4]).unwrap();
        std::fs::write(dir.path().join("about.md"), "x").unwrap();
        let ws = Workspace::load_dir(dir.path()).unwrap();

        let mut preview = PreviewController::new();
        preview.render("![a](here.png)\n![b](missing.png)\n![c](https://x.org/c.png)");
        assert_eq!(
            preview.resolved_images(&ws),
            vec![("here.png", dir.path().join("here.png"))]
        );
    }

    #[test]
    fn test_resolved_images_bundled_workspace_is_empty() {
        let ws = Workspace::from_entries([FileEntry::new("about.md", "")]).unwrap();
        let mut preview = PreviewController::new();
        preview.render("![a](pic.png)");
        assert!(preview.resolved_images(&ws).is_empty());
    }

    #[test]
    fn test_rewrite_img_sources() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("me.png"), [0u8; 4]).unwrap();
        let ws = Workspace::load_dir(dir.path()).unwrap();

        let mut preview = PreviewController::new();
        let html = preview.render("![me](me.png) and ![gone](gone.png)");
        let out = preview.rewrite_img_sources(&html, &ws);
        let expected = format!("src=\"{}\"", dir.path().join("me.png").display());
        assert!(out.contains(&expected));
        assert!(out.contains("src=\"gone.png\""));
    }

    #[test]
    fn test_wrap_html_for_helpview() {
        let html = wrap_html_for_helpview("<p>x</p>", true);
        assert!(html.contains("bgcolor=\"#1e1e1e\""));
        assert!(html.contains("<p>x</p>"));
        assert!(wrap_html_for_helpview("", false).contains("#ffffff"));
    }
}
