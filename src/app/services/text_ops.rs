use std::path::Path;

/// Extract filename from a file path
///
/// Returns the filename component of a path, or "Unknown" if it can't be extracted.
pub fn extract_filename(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Find next occurrence of search string in text
///
/// Returns the byte position of the match, or None if not found.
/// Searches from start_pos onwards.
pub fn find_in_text(text: &str, search: &str, start_pos: usize, case_sensitive: bool) -> Option<usize> {
    if search.is_empty() || start_pos >= text.len() || !text.is_char_boundary(start_pos) {
        return None;
    }

    let rest = &text[start_pos..];
    if case_sensitive {
        return rest.find(search).map(|pos| start_pos + pos);
    }

    // Lowercasing can change byte lengths, so compare char-aligned windows
    // of the original text instead of offsets into a lowered copy.
    let needle: Vec<char> = search.chars().flat_map(char::to_lowercase).collect();
    rest.char_indices()
        .find(|(i, _)| {
            let mut hay = rest[*i..].chars().flat_map(char::to_lowercase);
            needle.iter().all(|c| hay.next() == Some(*c))
        })
        .map(|(i, _)| start_pos + i)
}

/// Number of lines shown in the editor gutter. Empty text still has one line.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Collapse every run of line breaks into a single space.
pub fn flatten_line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_break = false;
    for c in text.chars() {
        if c == '\r' || c == '\n' {
            if !in_break {
                out.push(' ');
            }
            in_break = true;
        } else {
            out.push(c);
            in_break = false;
        }
    }
    out
}

/// One matching line: 1-based line number plus the trimmed line text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub line: usize,
    pub text: String,
}

/// Case-insensitive search returning every line containing `query`.
pub fn matching_lines(text: &str, query: &str) -> Vec<LineMatch> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .enumerate()
        .filter(|(_, line)| find_in_text(line, query, 0, false).is_some())
        .map(|(i, line)| LineMatch {
            line: i + 1,
            text: line.trim().to_string(),
        })
        .collect()
}
