use core::fmt::{Debug, Display, Formatter};

use super::types::Operation;

/// A schedule that breaks the per-transaction termination rules.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error<Variable> {
    /// A transaction aborts or commits a second time.
    DuplicateTermination {
        termination: Operation<Variable>,
        position: usize,
        first_position: usize,
    },
    /// A transaction issues an operation after it has terminated.
    OperationAfterTermination {
        operation: Operation<Variable>,
        position: usize,
        termination_position: usize,
    },
}

impl<Variable> Display for Error<Variable>
where
    Variable: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DuplicateTermination {
                termination,
                position,
                first_position,
            } => write!(
                f,
                "{termination} at position {position}: transaction {} already terminated at position {first_position}",
                termination.transaction()
            ),
            Self::OperationAfterTermination {
                operation,
                position,
                termination_position,
            } => write!(
                f,
                "{operation} at position {position}: transaction {} terminated at position {termination_position}",
                operation.transaction()
            ),
        }
    }
}

impl<Variable> core::error::Error for Error<Variable> where Variable: Debug + Display {}
