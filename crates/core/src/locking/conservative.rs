//! Conservative two-phase locking (C2PL).

use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::HashMap;

use super::queue::Requests;
use super::table::LockTable;
use super::Step;
use crate::schedule::accesses;
use crate::schedule::types::{Operation, TransactionId};

/// Produce a C2PL execution of `schedule`.
///
/// The schedule is replayed as a request stream. Before a transaction runs
/// its first access it must lock every object it will ever access; if any
/// of those locks is unavailable the request is deferred and the
/// transaction gets nothing. Once a transaction holds its locks each access
/// runs and releases its own lock right away, and the transaction's abort
/// or commit is emitted when its last lock goes.
///
/// Aborts and commits are taken out of the stream up front. A transaction
/// without accesses keeps its termination in place; one that never
/// terminates just releases its locks.
#[must_use]
pub fn conservative_two_phase_locking<Variable>(
    schedule: &[Operation<Variable>],
) -> Vec<Step<Variable>>
where
    Variable: Eq + Clone + Debug,
{
    tracing::debug!(operations = schedule.len(), "conservative 2PL");

    let mut terminations: HashMap<TransactionId, Operation<Variable>> = HashMap::new();
    let mut stream = Vec::with_capacity(schedule.len());
    for op in schedule {
        let transaction = op.transaction();
        if op.is_termination() && !accesses(schedule, transaction).is_empty() {
            terminations.insert(transaction, op.clone());
        } else {
            stream.push(op.clone());
        }
    }

    let mut requests = Requests::new(stream);
    let mut table = LockTable::new();
    let mut steps = Vec::new();

    while let Some(op) = requests.pop() {
        let transaction = op.transaction();

        if op.is_termination() {
            steps.push(Step::Execute(op));
            requests.retry_deferred();
        } else if !table.has_acquired(transaction) {
            let required = accesses(schedule, transaction);
            if required.iter().all(|access| table.lockable(access)) {
                tracing::trace!(%transaction, locks = required.len(), "lock set granted");
                steps.extend(required.iter().cloned().map(Step::Lock));
                table.acquire_all(transaction, required);
                requests.push_front(op);
            } else {
                tracing::trace!(?op, "lock set unavailable, deferring");
                requests.defer(op);
            }
        } else {
            table.release(&op);
            steps.push(Step::Execute(op.clone()));
            steps.push(Step::Unlock(op));
            if table.held(transaction).is_empty() {
                if let Some(end) = terminations.remove(&transaction) {
                    steps.push(Step::Execute(end));
                }
            }
            requests.retry_deferred();
        }
    }

    let leftover = requests.into_deferred();
    if !leftover.is_empty() {
        tracing::warn!(?leftover, "conservative 2PL left requests unserved");
    }

    steps
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn test_single_transaction() {
        let schedule = vec![
            Operation::read(1, "x"),
            Operation::write(1, "y"),
            Operation::commit(1),
        ];
        assert_eq!(
            conservative_two_phase_locking(&schedule),
            vec![
                Step::Lock(Operation::read(1, "x")),
                Step::Lock(Operation::write(1, "y")),
                Step::Execute(Operation::read(1, "x")),
                Step::Unlock(Operation::read(1, "x")),
                Step::Execute(Operation::write(1, "y")),
                Step::Unlock(Operation::write(1, "y")),
                Step::Execute(Operation::commit(1)),
            ]
        );
    }

    #[test]
    fn test_lock_set_released_access_by_access() {
        // t2 may lock x as soon as t1 is done with it, even though t1
        // still holds z.
        let schedule = vec![
            Operation::write(1, "x"),
            Operation::read(2, "y"),
            Operation::read(2, "x"),
            Operation::write(1, "z"),
            Operation::commit(1),
            Operation::commit(2),
        ];
        assert_eq!(
            conservative_two_phase_locking(&schedule),
            vec![
                Step::Lock(Operation::write(1, "x")),
                Step::Lock(Operation::write(1, "z")),
                Step::Execute(Operation::write(1, "x")),
                Step::Unlock(Operation::write(1, "x")),
                Step::Lock(Operation::read(2, "y")),
                Step::Lock(Operation::read(2, "x")),
                Step::Execute(Operation::read(2, "y")),
                Step::Unlock(Operation::read(2, "y")),
                Step::Execute(Operation::read(2, "x")),
                Step::Unlock(Operation::read(2, "x")),
                Step::Execute(Operation::commit(2)),
                Step::Execute(Operation::write(1, "z")),
                Step::Unlock(Operation::write(1, "z")),
                Step::Execute(Operation::commit(1)),
            ]
        );
    }

    #[test]
    fn test_blocked_transaction_waits_for_whole_lock_set() {
        // t2 needs y, which t1 keeps locked until its second access.
        let schedule = vec![
            Operation::write(1, "x"),
            Operation::read(2, "y"),
            Operation::write(1, "y"),
            Operation::commit(1),
            Operation::commit(2),
        ];
        assert_eq!(
            conservative_two_phase_locking(&schedule),
            vec![
                Step::Lock(Operation::write(1, "x")),
                Step::Lock(Operation::write(1, "y")),
                Step::Execute(Operation::write(1, "x")),
                Step::Unlock(Operation::write(1, "x")),
                Step::Execute(Operation::write(1, "y")),
                Step::Unlock(Operation::write(1, "y")),
                Step::Execute(Operation::commit(1)),
                Step::Lock(Operation::read(2, "y")),
                Step::Execute(Operation::read(2, "y")),
                Step::Unlock(Operation::read(2, "y")),
                Step::Execute(Operation::commit(2)),
            ]
        );
    }

    #[test]
    fn test_termination_without_accesses_stays_in_place() {
        let schedule = vec![
            Operation::<&str>::commit(2),
            Operation::write(1, "x"),
            Operation::commit(1),
        ];
        assert_eq!(
            conservative_two_phase_locking(&schedule),
            vec![
                Step::Execute(Operation::commit(2)),
                Step::Lock(Operation::write(1, "x")),
                Step::Execute(Operation::write(1, "x")),
                Step::Unlock(Operation::write(1, "x")),
                Step::Execute(Operation::commit(1)),
            ]
        );
    }

    #[test]
    fn test_unterminated_transaction() {
        let schedule = vec![Operation::write(1, "x"), Operation::read(2, "x")];
        let steps = conservative_two_phase_locking(&schedule);
        assert_eq!(steps.len(), 6);
        assert!(steps
            .iter()
            .all(|step| step.operation().is_access()));
    }
}
