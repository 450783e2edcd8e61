//! Desktop notice texts

use crate::domain::notes::FALLBACK_SECTION_TITLE;

/// Title of the notice sent when a note was appended
pub const NOTE_ADDED_TITLE: &str = "Note added";
/// Title of the notice sent when an image could not be processed
pub const NOTE_FAILED_TITLE: &str = "Note failed";

const FAILURE_BODY_MAX_CHARS: usize = 120;

/// Body of the success notice: the entry title, or the filename when the
/// entry only has the generic title.
pub fn success_body(section_title: &str, filename: &str) -> String {
    let title = section_title.trim();
    if title.is_empty() || title == FALLBACK_SECTION_TITLE {
        filename.to_string()
    } else {
        title.to_string()
    }
}

/// Body of the failure notice: filename and the first line of the error,
/// cut to a single short line.
pub fn failure_body(filename: &str, error: &str) -> String {
    let first_line = error
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("unknown error");

    let body = format!("{} — {}", filename, first_line);
    if body.chars().count() <= FAILURE_BODY_MAX_CHARS {
        return body;
    }

    let mut truncated: String = body.chars().take(FAILURE_BODY_MAX_CHARS - 1).collect();
    truncated.push('…');
    truncated
}
