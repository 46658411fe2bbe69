use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::schedule::types::{Operation, TransactionId};

/// Work queue of a simulation run: requests still to be tried, and
/// requests deferred during the current pass.
///
/// After every step that makes progress the deferred requests are put back
/// in front of the pending ones, in their original order.
#[derive(Debug)]
pub(crate) struct Requests<Variable> {
    pending: VecDeque<Operation<Variable>>,
    deferred: VecDeque<Operation<Variable>>,
}

impl<Variable> Requests<Variable> {
    pub(crate) fn new(requests: impl IntoIterator<Item = Operation<Variable>>) -> Self {
        Self {
            pending: requests.into_iter().collect(),
            deferred: VecDeque::new(),
        }
    }

    pub(crate) fn pop(&mut self) -> Option<Operation<Variable>> {
        self.pending.pop_front()
    }

    /// Make `op` the very next request.
    pub(crate) fn push_front(&mut self, op: Operation<Variable>) {
        self.pending.push_front(op);
    }

    pub(crate) fn defer(&mut self, op: Operation<Variable>) {
        self.deferred.push_back(op);
    }

    /// Whether `transaction` has a request waiting in the deferred queue.
    pub(crate) fn has_deferred(&self, transaction: TransactionId) -> bool {
        self.deferred
            .iter()
            .any(|op| op.transaction() == transaction)
    }

    pub(crate) fn retry_deferred(&mut self) {
        while let Some(op) = self.deferred.pop_back() {
            self.pending.push_front(op);
        }
    }

    pub(crate) fn into_deferred(self) -> Vec<Operation<Variable>> {
        self.deferred.into()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn test_retry_keeps_order() {
        let mut requests = Requests::new(vec![
            Operation::read(1, "x"),
            Operation::read(2, "x"),
            Operation::read(3, "x"),
        ]);

        let first = requests.pop().unwrap();
        let second = requests.pop().unwrap();
        requests.defer(first);
        requests.defer(second);
        assert!(requests.has_deferred(TransactionId(1)));
        assert!(!requests.has_deferred(TransactionId(3)));

        requests.retry_deferred();
        assert_eq!(requests.pop(), Some(Operation::read(1, "x")));
        assert_eq!(requests.pop(), Some(Operation::read(2, "x")));
        assert_eq!(requests.pop(), Some(Operation::read(3, "x")));
        assert_eq!(requests.pop(), None);
        assert!(requests.into_deferred().is_empty());
    }
}
