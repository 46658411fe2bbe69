//! Checks whether a schedule is recoverable (RC).

use core::fmt::Debug;

use super::{Justification, Recoverability, Verdict};
use crate::schedule::committed;
use crate::schedule::reads_from::reads_from;
use crate::schedule::types::Operation;

/// Checks whether every committed reader commits after the transactions it
/// read from.
///
/// Readers that never commit impose no constraint. A committed reader whose
/// writer never commits fails the check.
#[must_use]
pub fn check_recoverable<Variable>(schedule: &[Operation<Variable>]) -> Verdict<Variable>
where
    Variable: Eq + Clone + Debug,
{
    let commit_order = committed(schedule);
    let mut verdict = Verdict::new(Recoverability::Recoverable);

    for read in reads_from(schedule) {
        let Some(reader_rank) = commit_order.iter().position(|t| *t == read.reader) else {
            verdict.record(Justification::ReaderNeverCommits(read));
            continue;
        };

        if commit_order[..reader_rank].contains(&read.writer) {
            verdict.record(Justification::WriterCommitsFirst(read));
        } else {
            verdict.record(Justification::WriterCommitsLate(read));
            break;
        }
    }

    verdict.finish()
}
