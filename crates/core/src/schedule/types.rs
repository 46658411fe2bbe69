use alloc::vec::Vec;
use core::fmt::{Debug, Display, Formatter, Result};

use derive_more::From;

/// Identifies the transaction that issued an operation.
///
/// Stable for the lifetime of the transaction. Ordering is numeric and is
/// only used to make outputs deterministic.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From)]
pub struct TransactionId(pub u64);

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of a schedule event, without its operands.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    Write,
    Abort,
    Commit,
}

impl Action {
    /// `true` for reads and writes.
    #[must_use]
    pub const fn is_access(self) -> bool {
        matches!(self, Self::Read | Self::Write)
    }

    /// `true` for aborts and commits.
    #[must_use]
    pub const fn is_termination(self) -> bool {
        matches!(self, Self::Abort | Self::Commit)
    }

    /// Whether an earlier `self` conflicts with a later `other` on the same
    /// object: a write conflicts with reads and writes, a read only with
    /// writes.
    #[must_use]
    pub const fn conflicts_with(self, other: Self) -> bool {
        match self {
            Self::Write => matches!(other, Self::Read | Self::Write),
            Self::Read => matches!(other, Self::Write),
            Self::Abort | Self::Commit => false,
        }
    }

    /// Single-letter notation prefix.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Read => 'r',
            Self::Write => 'w',
            Self::Abort => 'a',
            Self::Commit => 'c',
        }
    }
}

/// One event of a schedule.
///
/// Reads and writes name the accessed object; aborts and commits do not.
/// Two operations are equal iff action, transaction and object are equal.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Operation<Variable> {
    Read {
        transaction: TransactionId,
        variable: Variable,
    },
    Write {
        transaction: TransactionId,
        variable: Variable,
    },
    Abort {
        transaction: TransactionId,
    },
    Commit {
        transaction: TransactionId,
    },
}

impl<Variable> Operation<Variable> {
    pub const fn read(transaction: u64, variable: Variable) -> Self {
        Self::Read {
            transaction: TransactionId(transaction),
            variable,
        }
    }

    pub const fn write(transaction: u64, variable: Variable) -> Self {
        Self::Write {
            transaction: TransactionId(transaction),
            variable,
        }
    }

    pub const fn abort(transaction: u64) -> Self {
        Self::Abort {
            transaction: TransactionId(transaction),
        }
    }

    pub const fn commit(transaction: u64) -> Self {
        Self::Commit {
            transaction: TransactionId(transaction),
        }
    }

    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::Read { .. } => Action::Read,
            Self::Write { .. } => Action::Write,
            Self::Abort { .. } => Action::Abort,
            Self::Commit { .. } => Action::Commit,
        }
    }

    #[must_use]
    pub const fn transaction(&self) -> TransactionId {
        match self {
            Self::Read { transaction, .. }
            | Self::Write { transaction, .. }
            | Self::Abort { transaction }
            | Self::Commit { transaction } => *transaction,
        }
    }

    /// The accessed object, `None` for aborts and commits.
    #[must_use]
    pub const fn variable(&self) -> Option<&Variable> {
        match self {
            Self::Read { variable, .. } | Self::Write { variable, .. } => Some(variable),
            Self::Abort { .. } | Self::Commit { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_access(&self) -> bool {
        self.action().is_access()
    }

    #[must_use]
    pub const fn is_termination(&self) -> bool {
        self.action().is_termination()
    }
}

impl<Variable> Display for Operation<Variable>
where
    Variable: Display,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        let symbol = self.action().symbol();
        let transaction = self.transaction();
        match self.variable() {
            Some(variable) => write!(f, "{symbol}{transaction}({variable})"),
            None => write!(f, "{symbol}{transaction}"),
        }
    }
}

impl<Variable> Debug for Operation<Variable>
where
    Variable: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        let symbol = self.action().symbol();
        let transaction = self.transaction();
        match self.variable() {
            Some(variable) => write!(f, "{symbol}{transaction}({variable:?})"),
            None => write!(f, "{symbol}{transaction}"),
        }
    }
}

/// One total order of execution over the operations of many transactions.
pub type Schedule<Variable> = Vec<Operation<Variable>>;
