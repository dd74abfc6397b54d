//! Minimal line-oriented markdown to HTML conversion.
//!
//! Handles headers (`#`, `##`, `###`), flat `- ` lists, standalone image
//! lines and space-joined paragraphs. There is no nesting and no escaping:
//! raw angle brackets in the input reach the output unchanged.

use std::sync::OnceLock;

use regex_lite::Regex;

/// Inline style attached to every rendered `<img>`.
pub const PREVIEW_IMAGE_STYLE: &str = "max-width: 25%; height: auto; border-radius: 8px; \
border: 1px solid #3c3c3c; box-shadow: 0 4px 12px rgba(0, 0, 0, 0.3); margin: 15px 0; display: block;";

struct InlinePatterns {
    bold: Regex,
    image: Regex,
    link: Regex,
    code: Regex,
}

fn inline_patterns() -> &'static InlinePatterns {
    static PATTERNS: OnceLock<InlinePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| InlinePatterns {
        bold: Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern"),
        image: Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("image pattern"),
        link: Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern"),
        code: Regex::new(r"`([^`]+)`").expect("code pattern"),
    })
}

/// Apply inline formatting: bold, then images, then links, then code spans.
///
/// Images must run before links since `![a](b)` contains `[a](b)`.
pub fn format_inline(text: &str) -> String {
    let p = inline_patterns();
    let text = p.bold.replace_all(text, "<strong>$1</strong>");
    let img = format!(r#"<img src="$2" alt="$1" style="{PREVIEW_IMAGE_STYLE}">"#);
    let text = p.image.replace_all(&text, img.as_str());
    let text = p.link.replace_all(&text, r#"<a href="$2" target="_blank">$1</a>"#);
    p.code.replace_all(&text, "<code>$1</code>").into_owned()
}

#[derive(Default)]
struct BlockWriter {
    blocks: Vec<String>,
    paragraph: Vec<String>,
    in_list: bool,
}

impl BlockWriter {
    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let joined = self.paragraph.join(" ");
        self.blocks.push(format!("<p>{}</p>", format_inline(&joined)));
        self.paragraph.clear();
    }

    fn close_list(&mut self) {
        if self.in_list {
            self.blocks.push("</ul>".to_string());
            self.in_list = false;
        }
    }

    fn header(&mut self, level: u8, text: &str) {
        self.flush_paragraph();
        self.close_list();
        self.blocks.push(format!("<h{level}>{text}</h{level}>"));
    }

    fn list_item(&mut self, text: &str) {
        self.flush_paragraph();
        if !self.in_list {
            self.blocks.push("<ul>".to_string());
            self.in_list = true;
        }
        self.blocks.push(format!("<li>{}</li>", format_inline(text)));
    }

    fn finish(mut self) -> String {
        self.flush_paragraph();
        self.close_list();
        self.blocks.join("\n")
    }
}

/// Whitespace as line trimming sees it; includes the byte order mark.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Render markdown text to an HTML fragment.
///
/// Deterministic and side-effect free; calling it twice with the same input
/// gives byte-identical output.
pub fn render_markdown(text: &str) -> String {
    let mut out = BlockWriter::default();

    for line in text.split('\n') {
        let trimmed = line.trim_matches(is_blank);

        if let Some(rest) = trimmed.strip_prefix("### ") {
            out.header(3, rest);
        } else if let Some(rest) = trimmed.strip_prefix("## ") {
            out.header(2, rest);
        } else if let Some(rest) = trimmed.strip_prefix("# ") {
            out.header(1, rest);
        } else if let Some(rest) = trimmed.strip_prefix("- ") {
            out.list_item(rest);
        } else if trimmed.starts_with("![") {
            out.flush_paragraph();
            out.close_list();
            out.blocks.push(format_inline(trimmed));
        } else if trimmed.is_empty() {
            out.flush_paragraph();
            out.close_list();
        } else {
            out.close_list();
            out.paragraph.push(trimmed.to_string());
        }
    }

    out.finish()
}

/// Collect the `src` attribute of every `<img>` tag in rendered HTML.
pub fn image_sources(html: &str) -> Vec<String> {
    let mut sources = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find("<img ") {
        let tag = &rest[start..];
        let end = tag.find('>').map_or(tag.len(), |i| i + 1);
        if let Some(src) = extract_attr(&tag[..end], "src") {
            sources.push(src);
        }
        rest = &tag[end..];
    }
    sources
}

fn extract_attr(tag: &str, name: &str) -> Option<String> {
    let needle = format!("{name}=\"");
    let start = tag.find(&needle)? + needle.len();
    let len = tag[start..].find('"')?;
    Some(tag[start..start + len].to_string())
}
