use std::collections::BTreeMap;

use crate::backend::StudentBackend;
use crate::commands::{CmdResult, GradeStat, RosterStats};
use crate::error::Result;

/// Roster totals and per-grade count / average age, computed client-side
/// from the fetched collection.
pub fn run<B: StudentBackend>(backend: &B) -> Result<CmdResult> {
    let students = backend.list()?;

    let mut buckets: BTreeMap<String, (usize, u64)> = BTreeMap::new();
    for student in &students {
        let entry = buckets.entry(student.grade.clone()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += u64::from(student.age);
    }

    let grades = buckets
        .into_iter()
        .map(|(grade, (count, age_sum))| GradeStat {
            grade,
            count,
            avg_age: age_sum as f64 / count as f64,
        })
        .collect();

    let stats = RosterStats {
        total: students.len(),
        grades,
    };
    Ok(CmdResult::default().with_stats(stats))
}
