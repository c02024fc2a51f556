use crate::backend::StudentBackend;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::StudentDraft;

pub fn run<B: StudentBackend>(backend: &mut B, id: i64, draft: &StudentDraft) -> Result<CmdResult> {
    backend.update(id, draft)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Student updated successfully!"));
    Ok(result)
}
