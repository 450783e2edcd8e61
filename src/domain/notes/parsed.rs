//! Lenient model of the transcription JSON
//!
//! The model is asked for `{"topics": [{title, tasks, notes, questions}]}`
//! but any field may be missing, null or of the wrong type. Decoding never
//! fails; garbage degrades to empty content.

use serde_json::Value;

/// Title used when a topic has no usable title
pub const DEFAULT_TOPIC_TITLE: &str = "General";

/// A task as reported in the `tasks` bucket
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Task {
    pub text: String,
    pub done: bool,
}

impl Task {
    pub fn new(text: impl Into<String>, done: bool) -> Self {
        Self {
            text: text.into(),
            done,
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self {
                text: map.get("text").map(coerce_string).unwrap_or_default(),
                done: map.get("done").is_some_and(is_truthy),
            },
            other => Self::new(coerce_string(other), false),
        }
    }
}

/// One topic group as produced by the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub title: String,
    pub tasks: Vec<Task>,
    pub notes: Vec<String>,
    pub questions: Vec<String>,
}

impl Default for Topic {
    fn default() -> Self {
        Self {
            title: DEFAULT_TOPIC_TITLE.to_string(),
            tasks: Vec::new(),
            notes: Vec::new(),
            questions: Vec::new(),
        }
    }
}

impl Topic {
    /// Create an empty topic with the given title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };

        let title = map
            .get("title")
            .map(coerce_string)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TOPIC_TITLE.to_string());

        Self {
            title,
            tasks: array(map.get("tasks")).map(Task::from_value).collect(),
            notes: array(map.get("notes")).map(coerce_string).collect(),
            questions: array(map.get("questions")).map(coerce_string).collect(),
        }
    }
}

/// Parsed transcription, ready for the note formatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNotes {
    pub topics: Vec<Topic>,
}

impl Default for ParsedNotes {
    fn default() -> Self {
        Self {
            topics: vec![Topic::default()],
        }
    }
}

impl ParsedNotes {
    /// Build from already-typed topics. An empty list becomes one default topic.
    pub fn new(topics: Vec<Topic>) -> Self {
        if topics.is_empty() {
            Self::default()
        } else {
            Self { topics }
        }
    }

    /// Decode from an arbitrary JSON value
    pub fn from_value(value: &Value) -> Self {
        let topics = array(value.get("topics")).map(Topic::from_value).collect();
        Self::new(topics)
    }

    /// Parse JSON text, then decode leniently
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(content)?;
        Ok(Self::from_value(&value))
    }
}

fn array(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter())
        .into_iter()
        .flatten()
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_well_formed_input() {
        let parsed = ParsedNotes::from_value(&json!({
            "topics": [{
                "title": "Prosjekt",
                "tasks": [{"text": "oppgave", "done": false}, {"text": "ferdig", "done": true}],
                "notes": ["- et notat"],
                "questions": ["? hva"]
            }]
        }));

        assert_eq!(parsed.topics.len(), 1);
        let topic = &parsed.topics[0];
        assert_eq!(topic.title, "Prosjekt");
        assert_eq!(
            topic.tasks,
            vec![Task::new("oppgave", false), Task::new("ferdig", true)]
        );
        assert_eq!(topic.notes, vec!["- et notat"]);
        assert_eq!(topic.questions, vec!["? hva"]);
    }

    #[test]
    fn missing_topics_gives_default_topic() {
        for value in [json!({}), json!({"topics": null}), json!({"topics": []}), json!("oops")] {
            let parsed = ParsedNotes::from_value(&value);
            assert_eq!(parsed, ParsedNotes::default());
            assert_eq!(parsed.topics[0].title, DEFAULT_TOPIC_TITLE);
        }
    }

    #[test]
    fn blank_or_missing_title_defaults_to_general() {
        let parsed = ParsedNotes::from_value(&json!({
            "topics": [{"title": "   "}, {"title": null}, {}]
        }));
        assert!(parsed.topics.iter().all(|t| t.title == "General"));
    }

    #[test]
    fn null_lists_are_empty() {
        let parsed = ParsedNotes::from_value(&json!({
            "topics": [{"title": "T", "tasks": null, "notes": null, "questions": null}]
        }));
        let topic = &parsed.topics[0];
        assert!(topic.tasks.is_empty());
        assert!(topic.notes.is_empty());
        assert!(topic.questions.is_empty());
    }

    #[test]
    fn non_string_values_are_coerced() {
        let parsed = ParsedNotes::from_value(&json!({
            "topics": [{
                "title": 42,
                "tasks": [{"text": 7, "done": 1}, "bare task", {"done": "yes"}],
                "notes": [3, true, null],
                "questions": [1.5]
            }]
        }));
        let topic = &parsed.topics[0];
        assert_eq!(topic.title, "42");
        assert_eq!(topic.tasks[0], Task::new("7", true));
        assert_eq!(topic.tasks[1], Task::new("bare task", false));
        assert_eq!(topic.tasks[2], Task::new("", true));
        assert_eq!(topic.notes, vec!["3", "true", ""]);
        assert_eq!(topic.questions, vec!["1.5"]);
    }

    #[test]
    fn from_json_str_rejects_invalid_json() {
        assert!(ParsedNotes::from_json_str("not json").is_err());
        assert!(ParsedNotes::from_json_str(r#"{"topics": []}"#).is_ok());
    }
}
