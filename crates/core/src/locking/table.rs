use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::schedule::types::{Action, Operation, TransactionId};

/// Locks held by each transaction during one simulation run.
///
/// Every held lock is the access it was taken for, kept in acquisition
/// order. A transaction that acquired its locks and released them all
/// again stays known to the table with an empty list.
#[derive(Debug, Clone)]
pub struct LockTable<Variable> {
    held: HashMap<TransactionId, Vec<Operation<Variable>>>,
}

impl<Variable> Default for LockTable<Variable> {
    fn default() -> Self {
        Self {
            held: HashMap::new(),
        }
    }
}

impl<Variable> LockTable<Variable>
where
    Variable: Eq + Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `op` can be granted given the locks of all other
    /// transactions.
    ///
    /// Aborts and commits are always lockable. An access is blocked by any
    /// lock another transaction holds on the same object, unless both the
    /// request and the held lock are reads.
    #[must_use]
    pub fn lockable(&self, op: &Operation<Variable>) -> bool {
        let Some(variable) = op.variable() else {
            return true;
        };
        let requester = op.transaction();

        !self
            .held
            .iter()
            .filter(|(transaction, _)| **transaction != requester)
            .flat_map(|(_, locks)| locks)
            .any(|held| {
                held.variable() == Some(variable)
                    && !(op.action() == Action::Read && held.action() == Action::Read)
            })
    }

    /// Whether `transaction` has ever been granted locks in this run.
    #[must_use]
    pub fn has_acquired(&self, transaction: TransactionId) -> bool {
        self.held.contains_key(&transaction)
    }

    /// Locks currently held by `transaction`, in acquisition order.
    #[must_use]
    pub fn held(&self, transaction: TransactionId) -> &[Operation<Variable>] {
        self.held.get(&transaction).map(Vec::as_slice).unwrap_or_default()
    }

    /// Record a lock for `op` on behalf of its transaction.
    pub fn acquire(&mut self, op: Operation<Variable>) {
        self.held.entry(op.transaction()).or_default().push(op);
    }

    /// Record locks for every access in `ops`, all for `transaction`.
    pub fn acquire_all(&mut self, transaction: TransactionId, ops: Vec<Operation<Variable>>) {
        self.held.entry(transaction).or_default().extend(ops);
    }

    /// Drop the oldest lock held for exactly `op`, returning whether one
    /// was held.
    pub fn release(&mut self, op: &Operation<Variable>) -> bool {
        let Some(locks) = self.held.get_mut(&op.transaction()) else {
            return false;
        };
        locks
            .iter()
            .position(|held| held == op)
            .map(|index| locks.remove(index))
            .is_some()
    }

    /// Drop every lock of `transaction`, returning them in acquisition
    /// order.
    pub fn release_all(&mut self, transaction: TransactionId) -> Vec<Operation<Variable>> {
        self.held
            .get_mut(&transaction)
            .map(core::mem::take)
            .unwrap_or_default()
    }
}
