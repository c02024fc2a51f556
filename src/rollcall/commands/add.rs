use crate::backend::StudentBackend;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::StudentDraft;

pub fn run<B: StudentBackend>(backend: &mut B, draft: &StudentDraft) -> Result<CmdResult> {
    backend.create(draft)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Student added successfully!"));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::InMemoryBackend;
    use crate::commands::MessageLevel;

    #[test]
    fn adds_student_and_reports_success() {
        let mut backend = InMemoryBackend::new();
        let result = run(&mut backend, &StudentDraft::new("Alice", 20, "A")).unwrap();

        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(backend.list().unwrap().len(), 1);
    }

    #[test]
    fn server_rejection_propagates() {
        let mut backend = InMemoryBackend::new();
        let err = run(&mut backend, &StudentDraft::new("", 20, "A")).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: name");
        assert!(backend.list().unwrap().is_empty());
    }
}
