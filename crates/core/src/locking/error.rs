use alloc::vec::Vec;
use core::fmt::{Debug, Display, Formatter};

use super::Step;
use crate::schedule::types::{Operation, TransactionId};

/// No pending request could be granted: the listed requests wait on locks
/// that will never be released.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deadlock<Variable> {
    /// Steps produced before the run got stuck.
    pub steps: Vec<Step<Variable>>,
    /// Requests left in the deferred queue, in queue order.
    pub blocked: Vec<Operation<Variable>>,
}

impl<Variable> Deadlock<Variable> {
    /// Distinct transactions with blocked requests, in queue order.
    #[must_use]
    pub fn blocked_transactions(&self) -> Vec<TransactionId> {
        let mut transactions: Vec<TransactionId> = Vec::new();
        for op in &self.blocked {
            if !transactions.contains(&op.transaction()) {
                transactions.push(op.transaction());
            }
        }
        transactions
    }
}

impl<Variable> Display for Deadlock<Variable>
where
    Variable: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "deadlock after {} steps; blocked:", self.steps.len())?;
        for op in &self.blocked {
            write!(f, " {op}")?;
        }
        Ok(())
    }
}

impl<Variable> core::error::Error for Deadlock<Variable> where Variable: Debug + Display {}
