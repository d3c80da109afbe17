//! Offset helpers for working inside an issue body

/// Strip trailing spaces, tabs and line endings (`\n` or `\r\n`).
///
/// A lone trailing `\r` is kept.
pub fn rtrim_space_and_eol(text: &str) -> &str {
    let mut rest = text;
    loop {
        if let Some(trimmed) = rest.strip_suffix(|c: char| c == ' ' || c == '\t') {
            rest = trimmed;
        } else if let Some(trimmed) = rest.strip_suffix('\n') {
            rest = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        } else {
            return rest;
        }
    }
}

/// Offset of the first byte of the line containing `at`
pub(crate) fn line_start(text: &str, at: usize) -> usize {
    text[..at].rfind('\n').map_or(0, |eol| eol + 1)
}

/// Offset of the line ending following `from`, before any `\r\n` pair,
/// or the end of `text` when no newline follows
pub(crate) fn line_end(text: &str, from: usize) -> usize {
    match text[from..].find('\n') {
        None => text.len(),
        Some(offset) => {
            let eol = from + offset;
            if eol > from && text.as_bytes()[eol - 1] == b'\r' {
                eol - 1
            } else {
                eol
            }
        }
    }
}
