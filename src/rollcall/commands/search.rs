use crate::backend::StudentBackend;
use crate::commands::{CmdResult, SearchInfo};
use crate::error::Result;

pub fn run<B: StudentBackend>(backend: &B, query: &str) -> Result<CmdResult> {
    let results = backend.search(query)?;
    let info = SearchInfo {
        query: results.query,
        total: results.total,
    };
    Ok(CmdResult::default()
        .with_students(results.students)
        .with_search(info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::fixtures::RosterFixture;

    #[test]
    fn carries_banner_info_alongside_matches() {
        let fixture = RosterFixture::new()
            .with_student("Alice", 20, "A")
            .with_student("Bob", 21, "B");

        let result = run(&fixture.backend, "ali").unwrap();
        assert_eq!(result.students.len(), 1);
        let info = result.search.unwrap();
        assert_eq!(info.headline(), "Found 1 student matching \"ali\"");
    }

    #[test]
    fn no_matches_still_reports_query() {
        let fixture = RosterFixture::new().with_student("Alice", 20, "A");
        let result = run(&fixture.backend, "zzz").unwrap();
        assert!(result.students.is_empty());
        assert_eq!(result.search.unwrap().total, 0);
    }
}
