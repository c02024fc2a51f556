use crate::backend::StudentBackend;
use crate::commands::CmdResult;
use crate::error::Result;

/// Fetch the full collection, optionally narrowed to one grade.
/// The grade filter is applied client-side (exact match, like the
/// reference backend's by-grade query).
pub fn run<B: StudentBackend>(backend: &B, grade: Option<&str>) -> Result<CmdResult> {
    let mut students = backend.list()?;
    if let Some(grade) = grade {
        students.retain(|s| s.grade == grade);
    }
    Ok(CmdResult::default().with_students(students))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::fixtures::RosterFixture;

    #[test]
    fn lists_everyone_without_filter() {
        let fixture = RosterFixture::new().with_students(3);
        let result = run(&fixture.backend, None).unwrap();
        assert_eq!(result.students.len(), 3);
    }

    #[test]
    fn grade_filter_is_exact() {
        let fixture = RosterFixture::new()
            .with_student("Alice", 20, "A")
            .with_student("Bob", 21, "A+")
            .with_student("Carol", 22, "A");

        let result = run(&fixture.backend, Some("A")).unwrap();
        let names: Vec<_> = result.students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Carol"]);
    }
}
