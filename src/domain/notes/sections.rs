//! Grouping of transcribed topics into entries
//!
//! One photo can hold several logical entries, separated by `#` marker
//! lines. Content seen before the first marker is held in an unassigned
//! list and committed to the first section when it opens.

use super::classify::{classify, clean_question, LineKind};
use super::parsed::{Task, Topic};

/// Title of the implicit entry used when no `#` marker appears
pub const FALLBACK_SECTION_TITLE: &str = "Handwritten notes";

/// Tasks, notes and questions for one topic title inside a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicBucket {
    pub title: String,
    pub tasks: Vec<Task>,
    pub notes: Vec<String>,
    pub questions: Vec<String>,
}

impl TopicBucket {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            tasks: Vec::new(),
            notes: Vec::new(),
            questions: Vec::new(),
        }
    }

    /// True when there is nothing to render below the topic heading
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.notes.is_empty() && self.questions.is_empty()
    }
}

/// One logical entry; rendered under its own dated heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub topics: Vec<TopicBucket>,
}

impl Section {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            topics: Vec::new(),
        }
    }

    fn fallback() -> Self {
        Self::new(FALLBACK_SECTION_TITLE)
    }

    /// True when at least one bucket holds a task, note or question
    pub fn has_content(&self) -> bool {
        self.topics.iter().any(|bucket| !bucket.is_empty())
    }

    /// True for the implicit entry created when no marker was written
    pub fn is_fallback(&self) -> bool {
        self.title == FALLBACK_SECTION_TITLE
    }
}

/// Accumulates content while topics are walked.
#[derive(Debug, Default)]
struct SectionBuilder {
    unassigned: Vec<TopicBucket>,
    sections: Vec<Section>,
}

impl SectionBuilder {
    /// Bucket for `topic` in the current section, or in the unassigned list
    /// when no section has been opened yet. Exact title match.
    fn bucket(&mut self, topic: &str) -> &mut TopicBucket {
        match self.sections.last_mut() {
            Some(section) => bucket_in(&mut section.topics, topic),
            None => bucket_in(&mut self.unassigned, topic),
        }
    }

    fn open_section(&mut self, title: String) {
        let mut section = Section::new(title);
        if self.sections.is_empty() {
            section.topics = std::mem::take(&mut self.unassigned);
        }
        self.sections.push(section);
    }

    fn add_task(&mut self, topic: &str, text: &str, done: bool) {
        let text = text.trim();
        if !text.is_empty() {
            self.bucket(topic).tasks.push(Task::new(text, done));
        }
    }

    fn add_note(&mut self, topic: &str, text: String) {
        if !text.is_empty() {
            self.bucket(topic).notes.push(text);
        }
    }

    fn add_question(&mut self, topic: &str, text: String) {
        if !text.is_empty() {
            self.bucket(topic).questions.push(text);
        }
    }

    fn finish(mut self) -> Vec<Section> {
        if self.sections.is_empty() {
            let mut section = Section::fallback();
            section.topics = std::mem::take(&mut self.unassigned);
            self.sections.push(section);
        }

        let sections: Vec<Section> = self
            .sections
            .into_iter()
            .filter(Section::has_content)
            .collect();

        if sections.is_empty() {
            vec![Section::fallback()]
        } else {
            sections
        }
    }
}

fn bucket_in<'a>(buckets: &'a mut Vec<TopicBucket>, title: &str) -> &'a mut TopicBucket {
    let index = match buckets.iter().position(|bucket| bucket.title == title) {
        Some(index) => index,
        None => {
            buckets.push(TopicBucket::new(title));
            buckets.len() - 1
        }
    };
    &mut buckets[index]
}

/// Walk topics in order and split them into non-empty sections.
///
/// Always returns at least one section.
pub fn build_sections(topics: &[Topic]) -> Vec<Section> {
    let mut builder = SectionBuilder::default();

    for topic in topics {
        let title = topic.title.as_str();

        for task in &topic.tasks {
            builder.add_task(title, &task.text, task.done);
        }

        for question in &topic.questions {
            builder.add_question(title, clean_question(question));
        }

        for note in &topic.notes {
            let line = classify(note);
            match line.kind {
                LineKind::SectionMarker => builder.open_section(line.text),
                kind if kind.is_task() => {
                    builder.add_task(title, &line.text, kind == LineKind::TaskDone)
                }
                LineKind::Question => builder.add_question(title, line.text),
                _ => builder.add_note(title, line.text),
            }
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(title: &str, notes: &[&str]) -> Topic {
        Topic {
            notes: notes.iter().map(|n| n.to_string()).collect(),
            ..Topic::titled(title)
        }
    }

    fn titles(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn no_marker_gives_single_fallback_section() {
        let sections = build_sections(&[topic("General", &["a", "b"])]);
        assert_eq!(titles(&sections), vec![FALLBACK_SECTION_TITLE]);
        assert!(sections[0].is_fallback());
        assert_eq!(sections[0].topics[0].notes, vec!["a", "b"]);
    }

    #[test]
    fn markers_split_sections() {
        let sections = build_sections(&[topic("General", &["#A", "x1", "#B", "x2"])]);
        assert_eq!(titles(&sections), vec!["A", "B"]);
        assert_eq!(sections[0].topics[0].tasks, vec![Task::new("1", true)]);
        assert_eq!(sections[1].topics[0].tasks, vec![Task::new("2", true)]);
    }

    #[test]
    fn empty_sections_are_dropped() {
        let sections = build_sections(&[topic("General", &["#A", "#B", "note under B"])]);
        assert_eq!(titles(&sections), vec!["B"]);
    }

    #[test]
    fn content_before_first_marker_joins_first_section() {
        let input = Topic {
            tasks: vec![Task::new("Follow up", false)],
            questions: vec!["hva nå?".to_string()],
            ..topic("General", &["#Ledermøte", "punkt 1", "#1:1 Fredrik", "punkt 2"])
        };

        let sections = build_sections(&[input]);

        assert_eq!(titles(&sections), vec!["Ledermøte", "1:1 Fredrik"]);
        let first = &sections[0].topics[0];
        assert_eq!(first.tasks, vec![Task::new("Follow up", false)]);
        assert_eq!(first.questions, vec!["hva nå?"]);
        assert_eq!(first.notes, vec!["punkt 1"]);
        assert_eq!(sections[1].topics[0].notes, vec!["punkt 2"]);
        assert!(sections[1].topics[0].tasks.is_empty());
    }

    #[test]
    fn later_topics_attach_to_current_section() {
        let sections = build_sections(&[
            topic("General", &["#Retro", "- bra"]),
            topic("Neste", &["- mer"]),
        ]);

        assert_eq!(titles(&sections), vec!["Retro"]);
        let buckets: Vec<&str> = sections[0].topics.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(buckets, vec!["General", "Neste"]);
    }

    #[test]
    fn buckets_match_exact_titles_only() {
        let sections = build_sections(&[topic("Plan", &["a"]), topic("plan", &["b"])]);
        assert_eq!(sections[0].topics.len(), 2);
    }

    #[test]
    fn same_title_merges_into_one_bucket() {
        let sections = build_sections(&[topic("Plan", &["a"]), topic("Plan", &["b"])]);
        assert_eq!(sections[0].topics.len(), 1);
        assert_eq!(sections[0].topics[0].notes, vec!["a", "b"]);
    }

    #[test]
    fn reclassified_notes_land_in_right_lists() {
        let sections = build_sections(&[topic(
            "Prosjekt",
            &[". gjør noe!!!", "? 2. Hva skjer?", "1. nummerert", "• kjøp melk"],
        )]);

        let bucket = &sections[0].topics[0];
        assert_eq!(
            bucket.tasks,
            vec![Task::new("gjør noe!!!", false), Task::new("kjøp melk", false)]
        );
        assert_eq!(bucket.questions, vec!["Hva skjer?"]);
        assert_eq!(bucket.notes, vec!["1. nummerert"]);
    }

    #[test]
    fn blank_entries_are_discarded() {
        let input = Topic {
            tasks: vec![Task::new("  ", false)],
            questions: vec!["?".to_string(), " ".to_string()],
            ..topic("T", &["", "-", "x "])
        };
        let sections = build_sections(&[input]);
        assert_eq!(sections, vec![Section::fallback()]);
    }

    #[test]
    fn all_empty_input_gives_empty_fallback() {
        let sections = build_sections(&[Topic::titled("A"), Topic::titled("B")]);
        assert_eq!(sections.len(), 1);
        assert!(sections[0].is_fallback());
        assert!(sections[0].topics.is_empty());
    }
}
