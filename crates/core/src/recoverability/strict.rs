//! Checks whether a schedule is strict (ST).

use core::fmt::Debug;

use super::{Justification, Recoverability, Verdict};
use crate::schedule::termination;
use crate::schedule::types::Operation;

/// Checks whether no transaction reads or overwrites an object between
/// another transaction's write of it and that writer's abort or commit.
///
/// A writer that never terminates keeps its objects protected up to the
/// end of the schedule.
#[must_use]
pub fn check_strict<Variable>(schedule: &[Operation<Variable>]) -> Verdict<Variable>
where
    Variable: Eq + Clone + Debug,
{
    let mut verdict = Verdict::new(Recoverability::Strict);

    for (position, write) in schedule.iter().enumerate() {
        let Operation::Write {
            transaction,
            variable,
        } = write
        else {
            continue;
        };

        let end = termination(schedule, *transaction);
        let end_position = end.map_or(schedule.len(), |(at, _)| at);
        let end = end.map(|(_, op)| op.clone());

        let overlap = schedule
            .get(position + 1..end_position)
            .unwrap_or_default()
            .iter()
            .find(|op| op.transaction() != *transaction && op.variable() == Some(variable));

        match overlap {
            Some(access) => {
                verdict.record(Justification::WriteOverlapped {
                    write: write.clone(),
                    access: access.clone(),
                    end,
                });
                break;
            }
            None => verdict.record(Justification::WriteIsolated {
                write: write.clone(),
                end,
            }),
        }
    }

    verdict.finish()
}
