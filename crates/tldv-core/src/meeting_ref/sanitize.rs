//! Filename sanitization for meeting titles.

/// Name used when a title is missing or sanitizes to nothing.
pub const DEFAULT_MEETING_NAME: &str = "TLDV_Meeting";

const MAX_NAME_CHARS: usize = 100;

fn is_reserved(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*')
}

fn trim_edges(s: &str) -> &str {
    s.trim_matches(|c| c == '_' || c == ' ')
}

/// Sanitizes a meeting title for use as a filename.
///
/// - Replaces `< > : " / \ | ? *` with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing underscores and spaces
/// - Limits length to 100 characters
/// - Falls back to [`DEFAULT_MEETING_NAME`] when nothing is left
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let c = if is_reserved(c) { '_' } else { c };
        if c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = trim_edges(&out);
    let result = match trimmed.char_indices().nth(MAX_NAME_CHARS) {
        // Truncation can expose a space or underscore at the new end.
        Some((cut, _)) => trim_edges(&trimmed[..cut]),
        None => trimmed,
    };

    if result.is_empty() {
        DEFAULT_MEETING_NAME.to_string()
    } else {
        result.to_string()
    }
}
