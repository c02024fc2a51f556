use crate::backend::StudentBackend;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

/// Issues the delete request. Interactive confirmation happens in the CLI
/// layer before this runs; by this point the deletion is committed to.
pub fn run<B: StudentBackend>(backend: &mut B, id: i64) -> Result<CmdResult> {
    backend.delete(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Student deleted successfully!"));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::fixtures::RosterFixture;

    #[test]
    fn removes_the_record() {
        let mut fixture = RosterFixture::new().with_student("Alice", 20, "A");
        run(&mut fixture.backend, 1).unwrap();
        assert!(fixture.backend.list().unwrap().is_empty());
    }

    #[test]
    fn unknown_id_is_an_error() {
        let mut fixture = RosterFixture::new();
        let err = run(&mut fixture.backend, 7).unwrap_err();
        assert_eq!(err.to_string(), "Student not found");
    }
}
