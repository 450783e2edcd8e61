//! Line classification for untrusted transcription lines
//!
//! The transcription model is unreliable about which bucket a line belongs
//! in and often leaves the handwritten marker attached to the text. Every
//! raw note is run through [`classify`] to recover its real kind.

use std::sync::LazyLock;

use regex::Regex;

/// Typographic bullets that a handwritten `.` task marker gets turned into.
pub const LEAKED_BULLET_GLYPHS: &[char] = &['•', '●', '◦', '▪', '∙', '·'];

/// Annotation characters that may leak into the text verbatim.
const LEAKED_PREFIXES: &[char] = &['.', '-', 'x', 'X', '?'];

/// A digit the model read instead of a `?`, e.g. `"2. "` or `"2 "`.
static MISREAD_NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.?\s+").expect("valid number prefix pattern"));

/// Semantic kind of a single transcribed line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// `# Title` starts a new entry
    SectionMarker,
    /// `. text`
    TaskOpen,
    /// `x text`
    TaskDone,
    /// `? text`
    Question,
    /// `- text` or anything without a recognised prefix
    Note,
}

impl LineKind {
    /// Whether the line becomes a checklist item
    pub const fn is_task(&self) -> bool {
        matches!(self, Self::TaskOpen | Self::TaskDone)
    }
}

/// A line after classification, with its marker removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub kind: LineKind,
    pub text: String,
}

impl ClassifiedLine {
    fn new(kind: LineKind, text: &str) -> Self {
        Self {
            kind,
            text: text.trim().to_string(),
        }
    }
}

/// Classify one raw line from the `notes` bucket.
///
/// Section markers win over everything else, even when a leaked prefix sits
/// in front of the `#`. Otherwise only the first character is consulted.
/// An empty input yields an empty note, which callers discard.
pub fn classify(raw: &str) -> ClassifiedLine {
    let line = raw.trim();
    if line.is_empty() {
        return ClassifiedLine::new(LineKind::Note, "");
    }

    let candidate = strip_leaked_prefix(line).unwrap_or(line);
    if let Some(title) = section_title(candidate) {
        return ClassifiedLine::new(LineKind::SectionMarker, title);
    }

    let Some(first) = line.chars().next() else {
        return ClassifiedLine::new(LineKind::Note, "");
    };
    let rest = consume_prefix(line, first);

    match first {
        '.' => ClassifiedLine::new(LineKind::TaskOpen, rest),
        'x' | 'X' => ClassifiedLine::new(LineKind::TaskDone, rest),
        '?' => ClassifiedLine::new(LineKind::Question, strip_misread_number(rest)),
        '-' => ClassifiedLine::new(LineKind::Note, rest),
        c if LEAKED_BULLET_GLYPHS.contains(&c) => ClassifiedLine::new(LineKind::TaskOpen, rest),
        _ => ClassifiedLine::new(LineKind::Note, line),
    }
}

/// Clean a line from the trusted `questions` bucket.
///
/// Only a single leaked `?`, `.` or `-` marker is removed; the line is not
/// reclassified. A leading `x` is kept: in a question it is far more often
/// the first letter of a word ("xenon?") than a leaked done marker.
pub fn clean_question(raw: &str) -> String {
    let line = raw.trim();
    let cleaned = match line.chars().next() {
        Some('?') => strip_misread_number(consume_prefix(line, '?')),
        Some(c @ ('.' | '-')) => consume_prefix(line, c),
        _ => line,
    };
    cleaned.trim().to_string()
}

/// Title of a `#` section marker, without the hashes.
fn section_title(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('#')?;
    let title = rest.trim_start_matches('#').trim();
    (!title.is_empty()).then_some(title)
}

/// Remove one known leaked prefix and a single following space.
fn strip_leaked_prefix(line: &str) -> Option<&str> {
    let first = line.chars().next()?;
    LEAKED_PREFIXES
        .contains(&first)
        .then(|| consume_prefix(line, first))
}

/// Drop the leading `prefix` character and at most one space after it.
fn consume_prefix(line: &str, prefix: char) -> &str {
    let rest = &line[prefix.len_utf8()..];
    rest.strip_prefix(' ').unwrap_or(rest)
}

fn strip_misread_number(text: &str) -> &str {
    let text = text.trim_start();
    match MISREAD_NUMBER_PREFIX.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_and_text(raw: &str) -> (LineKind, String) {
        let line = classify(raw);
        (line.kind, line.text)
    }

    #[test]
    fn empty_input_is_empty_note() {
        assert_eq!(kind_and_text("   "), (LineKind::Note, String::new()));
        assert_eq!(kind_and_text(""), (LineKind::Note, String::new()));
    }

    #[test]
    fn hash_line_is_section_marker_without_hash() {
        assert_eq!(
            kind_and_text("#Ledermøte"),
            (LineKind::SectionMarker, "Ledermøte".to_string())
        );
        assert_eq!(
            kind_and_text("# 1:1 Fredrik"),
            (LineKind::SectionMarker, "1:1 Fredrik".to_string())
        );
    }

    #[test]
    fn section_marker_is_found_through_leaked_prefix() {
        assert_eq!(
            kind_and_text("- # Retro"),
            (LineKind::SectionMarker, "Retro".to_string())
        );
        assert_eq!(
            kind_and_text(".#Plan"),
            (LineKind::SectionMarker, "Plan".to_string())
        );
        assert_eq!(
            kind_and_text("x # Done list"),
            (LineKind::SectionMarker, "Done list".to_string())
        );
    }

    #[test]
    fn bare_hash_is_not_a_section() {
        assert_eq!(kind_and_text("#"), (LineKind::Note, "#".to_string()));
        assert_eq!(kind_and_text("#   "), (LineKind::Note, "#".to_string()));
    }

    #[test]
    fn dot_prefix_is_open_task() {
        assert_eq!(
            kind_and_text(". gjør noe!!!"),
            (LineKind::TaskOpen, "gjør noe!!!".to_string())
        );
    }

    #[test]
    fn x_prefix_is_done_task() {
        assert_eq!(
            kind_and_text("x ferdig"),
            (LineKind::TaskDone, "ferdig".to_string())
        );
        assert_eq!(
            kind_and_text("X Ferdig"),
            (LineKind::TaskDone, "Ferdig".to_string())
        );
        assert_eq!(kind_and_text("x1"), (LineKind::TaskDone, "1".to_string()));
    }

    #[test]
    fn question_prefix_strips_misread_number() {
        assert_eq!(
            kind_and_text("? 2. Hva skjer?"),
            (LineKind::Question, "Hva skjer?".to_string())
        );
        assert_eq!(
            kind_and_text("? 2 Hva skjer?"),
            (LineKind::Question, "Hva skjer?".to_string())
        );
        assert_eq!(
            kind_and_text("? et spørsmål"),
            (LineKind::Question, "et spørsmål".to_string())
        );
    }

    #[test]
    fn dash_prefix_is_note() {
        assert_eq!(
            kind_and_text("- et notat"),
            (LineKind::Note, "et notat".to_string())
        );
    }

    #[test]
    fn bullet_glyph_is_open_task() {
        for glyph in LEAKED_BULLET_GLYPHS {
            let (kind, text) = kind_and_text(&format!("{} ring Per", glyph));
            assert_eq!(kind, LineKind::TaskOpen, "glyph {glyph}");
            assert_eq!(text, "ring Per");
        }
    }

    #[test]
    fn numbered_note_keeps_number() {
        assert_eq!(
            kind_and_text("1. en vanlig nummerert note"),
            (LineKind::Note, "1. en vanlig nummerert note".to_string())
        );
    }

    #[test]
    fn plain_text_is_note() {
        assert_eq!(
            kind_and_text("  punkt 1  "),
            (LineKind::Note, "punkt 1".to_string())
        );
    }

    #[test]
    fn only_one_prefix_is_consumed() {
        assert_eq!(kind_and_text(". . a"), (LineKind::TaskOpen, ". a".to_string()));
        assert_eq!(kind_and_text("- - a"), (LineKind::Note, "- a".to_string()));
    }

    #[test]
    fn clean_question_strips_single_marker() {
        assert_eq!(clean_question("? et spørsmål"), "et spørsmål");
        assert_eq!(clean_question("?3. Hvorfor?"), "Hvorfor?");
        assert_eq!(clean_question("- hva nå?"), "hva nå?");
        assert_eq!(clean_question("hva nå?"), "hva nå?");
        assert_eq!(clean_question("xenon?"), "xenon?");
    }

    #[test]
    fn task_kinds() {
        assert!(LineKind::TaskOpen.is_task());
        assert!(LineKind::TaskDone.is_task());
        assert!(!LineKind::Question.is_task());
    }
}
