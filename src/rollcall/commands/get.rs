use crate::backend::StudentBackend;
use crate::commands::CmdResult;
use crate::error::Result;

pub fn run<B: StudentBackend>(backend: &B, id: i64) -> Result<CmdResult> {
    let student = backend.get(id)?;
    Ok(CmdResult::default().with_student(student))
}
