use std::collections::BTreeMap;

use chrono::Utc;

use super::StudentBackend;
use crate::error::{Result, RollcallError};
use crate::model::{SearchResults, Student, StudentDraft};

/// In-memory backend for testing and development.
/// Emulates the reference server: sequential integer ids, validation rules,
/// name-ordered listings, and substring search over name and grade.
#[derive(Default)]
pub struct InMemoryBackend {
    students: BTreeMap<i64, Student>,
    next_id: i64,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_by_name(&self) -> Vec<Student> {
        let mut students: Vec<Student> = self.students.values().cloned().collect();
        students.sort_by(|a, b| a.name.cmp(&b.name));
        students
    }
}

/// Server-side validation rules from the reference backend.
fn validate(draft: &StudentDraft) -> Result<()> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(RollcallError::Api("Missing required field: name".into()));
    }
    if name.chars().count() > 100 {
        return Err(RollcallError::Api(
            "Name must be between 1 and 100 characters".into(),
        ));
    }
    if draft.age < 1 || draft.age > 150 {
        return Err(RollcallError::Api("Age must be between 1 and 150".into()));
    }
    let grade = draft.grade.trim();
    if grade.is_empty() {
        return Err(RollcallError::Api("Missing required field: grade".into()));
    }
    if grade.chars().count() > 50 {
        return Err(RollcallError::Api(
            "Grade must be between 1 and 50 characters".into(),
        ));
    }
    Ok(())
}

impl StudentBackend for InMemoryBackend {
    fn list(&self) -> Result<Vec<Student>> {
        Ok(self.sorted_by_name())
    }

    fn search(&self, query: &str) -> Result<SearchResults> {
        let needle = query.to_lowercase();
        let students: Vec<Student> = self
            .sorted_by_name()
            .into_iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle)
                    || s.grade.to_lowercase().contains(&needle)
            })
            .collect();
        Ok(SearchResults {
            total: students.len() as u64,
            students,
            query: query.to_string(),
        })
    }

    fn get(&self, id: i64) -> Result<Student> {
        self.students
            .get(&id)
            .cloned()
            .ok_or_else(|| RollcallError::Api("Student not found".into()))
    }

    fn create(&mut self, draft: &StudentDraft) -> Result<()> {
        validate(draft)?;
        self.next_id += 1;
        let now = Utc::now();
        let student = Student {
            id: self.next_id,
            name: draft.name.trim().to_string(),
            age: draft.age,
            grade: draft.grade.trim().to_string(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.students.insert(student.id, student);
        Ok(())
    }

    fn update(&mut self, id: i64, draft: &StudentDraft) -> Result<()> {
        validate(draft)?;
        let student = self
            .students
            .get_mut(&id)
            .ok_or_else(|| RollcallError::Api("Student not found".into()))?;
        student.name = draft.name.trim().to_string();
        student.age = draft.age;
        student.grade = draft.grade.trim().to_string();
        student.updated_at = Some(Utc::now());
        Ok(())
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        if self.students.remove(&id).is_none() {
            return Err(RollcallError::Api("Student not found".into()));
        }
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct RosterFixture {
        pub backend: InMemoryBackend,
    }

    impl Default for RosterFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl RosterFixture {
        pub fn new() -> Self {
            Self {
                backend: InMemoryBackend::new(),
            }
        }

        pub fn with_student(mut self, name: &str, age: u32, grade: &str) -> Self {
            self.backend
                .create(&StudentDraft::new(name, age, grade))
                .unwrap();
            self
        }

        pub fn with_students(mut self, count: usize) -> Self {
            for i in 0..count {
                let draft = StudentDraft::new(format!("Student {}", i + 1), 18, "A");
                self.backend.create(&draft).unwrap();
            }
            self
        }
    }
}
