use crate::model::Student;

pub mod add;
pub mod delete;
pub mod get;
pub mod list;
pub mod search;
pub mod stats;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Summary of an active search, rendered as the result banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInfo {
    pub query: String,
    pub total: u64,
}

impl SearchInfo {
    pub fn headline(&self) -> String {
        let noun = if self.total == 1 { "student" } else { "students" };
        format!("Found {} {} matching \"{}\"", self.total, noun, self.query)
    }
}

/// Per-grade aggregate for the stats view.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeStat {
    pub grade: String,
    pub count: usize,
    pub avg_age: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterStats {
    pub total: usize,
    pub grades: Vec<GradeStat>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Students to show in the list view (replaces the current view).
    pub students: Vec<Student>,
    /// Single fetched record (get / begin-edit).
    pub student: Option<Student>,
    pub search: Option<SearchInfo>,
    pub stats: Option<RosterStats>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_students(mut self, students: Vec<Student>) -> Self {
        self.students = students;
        self
    }

    pub fn with_student(mut self, student: Student) -> Self {
        self.student = Some(student);
        self
    }

    pub fn with_search(mut self, search: SearchInfo) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_stats(mut self, stats: RosterStats) -> Self {
        self.stats = Some(stats);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_headline_pluralizes() {
        let one = SearchInfo {
            query: "ali".into(),
            total: 1,
        };
        assert_eq!(one.headline(), "Found 1 student matching \"ali\"");

        let many = SearchInfo {
            query: "a".into(),
            total: 3,
        };
        assert_eq!(many.headline(), "Found 3 students matching \"a\"");
    }
}
