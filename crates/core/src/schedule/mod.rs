//! The operation model and pure queries over a schedule.

pub mod display;
pub mod error;
pub mod reads_from;
pub mod types;

use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use self::error::Error;
use self::types::{Action, Operation, TransactionId};

/// Transactions that abort somewhere in the schedule.
#[must_use]
pub fn aborted<Variable>(schedule: &[Operation<Variable>]) -> HashSet<TransactionId> {
    schedule
        .iter()
        .filter(|op| op.action() == Action::Abort)
        .map(Operation::transaction)
        .collect()
}

/// Transactions that commit, in commit order.
#[must_use]
pub fn committed<Variable>(schedule: &[Operation<Variable>]) -> Vec<TransactionId> {
    schedule
        .iter()
        .filter(|op| op.action() == Action::Commit)
        .map(Operation::transaction)
        .collect()
}

/// Distinct transactions in order of first appearance.
#[must_use]
pub fn transactions<Variable>(schedule: &[Operation<Variable>]) -> Vec<TransactionId> {
    let mut seen = HashSet::new();
    schedule
        .iter()
        .map(Operation::transaction)
        .filter(|transaction| seen.insert(*transaction))
        .collect()
}

/// Reads and writes issued by `transaction`, in program order.
#[must_use]
pub fn accesses<Variable>(
    schedule: &[Operation<Variable>],
    transaction: TransactionId,
) -> Vec<Operation<Variable>>
where
    Variable: Clone,
{
    schedule
        .iter()
        .filter(|op| op.transaction() == transaction && op.is_access())
        .cloned()
        .collect()
}

/// Position and event of the abort or commit that ends `transaction`.
#[must_use]
pub fn termination<Variable>(
    schedule: &[Operation<Variable>],
    transaction: TransactionId,
) -> Option<(usize, &Operation<Variable>)> {
    schedule
        .iter()
        .enumerate()
        .find(|(_, op)| op.transaction() == transaction && op.is_termination())
}

/// Conflicting pairs among the operations of committed transactions.
///
/// A pair `(a, b)` is reported when `a` precedes `b`, both touch the same
/// object, they belong to different transactions and `b`'s action is in the
/// conflict set of `a`'s action. Pairs come out ordered by the position of
/// `a`, then of `b`.
#[must_use]
pub fn conflicts<Variable>(
    schedule: &[Operation<Variable>],
) -> Vec<(&Operation<Variable>, &Operation<Variable>)>
where
    Variable: Eq,
{
    let committed: HashSet<TransactionId> = committed(schedule).into_iter().collect();
    let ops: Vec<&Operation<Variable>> = schedule
        .iter()
        .filter(|op| op.is_access() && committed.contains(&op.transaction()))
        .collect();

    let mut pairs = Vec::new();
    for (i, &first) in ops.iter().enumerate() {
        for &second in &ops[i + 1..] {
            if first.transaction() != second.transaction()
                && first.variable() == second.variable()
                && first.action().conflicts_with(second.action())
            {
                pairs.push((first, second));
            }
        }
    }

    tracing::trace!(pairs = pairs.len(), "conflict pairs collected");
    pairs
}

/// Checks that every transaction terminates at most once and issues
/// nothing after its abort or commit.
///
/// The analyses in this crate assume these rules but do not enforce them.
///
/// # Errors
///
/// Returns the first offending operation as an [`Error`].
pub fn validate<Variable>(schedule: &[Operation<Variable>]) -> Result<(), Error<Variable>>
where
    Variable: Clone,
{
    let mut terminated: HashMap<TransactionId, usize> = HashMap::new();

    for (position, op) in schedule.iter().enumerate() {
        if let Some(&first_position) = terminated.get(&op.transaction()) {
            return Err(if op.is_termination() {
                Error::DuplicateTermination {
                    termination: op.clone(),
                    position,
                    first_position,
                }
            } else {
                Error::OperationAfterTermination {
                    operation: op.clone(),
                    position,
                    termination_position: first_position,
                }
            });
        }
        if op.is_termination() {
            terminated.insert(op.transaction(), position);
        }
    }

    Ok(())
}
