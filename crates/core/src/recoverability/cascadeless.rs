//! Checks whether a schedule avoids cascading aborts (ACA).

use core::fmt::Debug;

use super::{Justification, Recoverability, Verdict};
use crate::schedule::reads_from::reads_from;
use crate::schedule::types::Operation;

/// Checks whether every attributed read happens after its writer committed.
///
/// Whether the reader itself later commits or aborts does not matter.
#[must_use]
pub fn check_avoids_cascading_aborts<Variable>(
    schedule: &[Operation<Variable>],
) -> Verdict<Variable>
where
    Variable: Eq + Clone + Debug,
{
    let mut verdict = Verdict::new(Recoverability::AvoidsCascadingAborts);

    for read in reads_from(schedule) {
        let committed_before_read = schedule[..read.position].iter().any(|op| {
            matches!(op, Operation::Commit { transaction } if *transaction == read.writer)
        });

        if committed_before_read {
            verdict.record(Justification::CommittedRead(read));
        } else {
            verdict.record(Justification::DirtyRead(read));
            break;
        }
    }

    verdict.finish()
}
