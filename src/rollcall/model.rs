use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A student record as the server owns it. The client only ever holds
/// transient copies; `id` is assigned by the server and immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub grade: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The request body for create and update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub name: String,
    pub age: u32,
    pub grade: String,
}

impl StudentDraft {
    pub fn new(name: impl Into<String>, age: u32, grade: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            grade: grade.into(),
        }
    }
}

/// Wire shape of the search endpoint response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub students: Vec<Student>,
    pub total: u64,
    pub query: String,
}

/// Whether the form targets a new record or an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

impl FormMode {
    pub fn heading(&self) -> &'static str {
        match self {
            FormMode::Create => "Add New Student",
            FormMode::Edit(_) => "Edit Student",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Add Student",
            FormMode::Edit(_) => "Update Student",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_deserializes_without_timestamps() {
        let s: Student =
            serde_json::from_str(r#"{"id":1,"name":"Alice","age":20,"grade":"A"}"#).unwrap();
        assert_eq!(s.name, "Alice");
        assert!(s.created_at.is_none());
    }

    #[test]
    fn draft_serializes_three_fields_only() {
        let draft = StudentDraft::new("Bob", 21, "B");
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Bob", "age": 21, "grade": "B"})
        );
    }

    #[test]
    fn form_mode_labels() {
        assert_eq!(FormMode::Create.heading(), "Add New Student");
        assert_eq!(FormMode::Edit(3).submit_label(), "Update Student");
    }
}
