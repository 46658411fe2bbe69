use core::fmt::{Display, Formatter, Result};

use crate::schedule::reads_from::ReadsFrom;
use crate::schedule::types::Operation;

/// One line of reasoning recorded while evaluating a recoverability class.
///
/// Each reads-from entry (RC, ACA) or write interval (ST) that the checker
/// looks at produces exactly one justification.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Justification<Variable> {
    /// RC: the reader never commits, so the entry imposes nothing.
    ReaderNeverCommits(ReadsFrom<Variable>),
    /// RC: the writer commits before the reader does.
    WriterCommitsFirst(ReadsFrom<Variable>),
    /// RC violation: the reader commits but the writer has not committed
    /// before it.
    WriterCommitsLate(ReadsFrom<Variable>),
    /// ACA: the writer committed before the read happened.
    CommittedRead(ReadsFrom<Variable>),
    /// ACA violation: the read observed data of a transaction that had not
    /// committed yet.
    DirtyRead(ReadsFrom<Variable>),
    /// ST: nobody else touched the object between the write and the
    /// writer's termination (`None` when the writer never terminates).
    WriteIsolated {
        write: Operation<Variable>,
        end: Option<Operation<Variable>>,
    },
    /// ST violation: `access` touched the written object before the writer
    /// terminated.
    WriteOverlapped {
        write: Operation<Variable>,
        access: Operation<Variable>,
        end: Option<Operation<Variable>>,
    },
}

impl<Variable> Justification<Variable> {
    #[must_use]
    pub const fn is_violation(&self) -> bool {
        matches!(
            self,
            Self::WriterCommitsLate(_) | Self::DirtyRead(_) | Self::WriteOverlapped { .. }
        )
    }
}

struct End<'a, Variable>(&'a Option<Operation<Variable>>);

impl<Variable> Display for End<'_, Variable>
where
    Variable: Display,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self.0 {
            Some(end) => write!(f, "{end}"),
            None => write!(f, "the end of the schedule"),
        }
    }
}

impl<Variable> Display for Justification<Variable>
where
    Variable: Display,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Self::ReaderNeverCommits(read) => {
                write!(f, "{read}: t{} never commits. OK.", read.reader)
            }
            Self::WriterCommitsFirst(read) => write!(
                f,
                "{read}: t{} commits before t{}. OK.",
                read.writer, read.reader
            ),
            Self::WriterCommitsLate(read) => write!(
                f,
                "{read}: t{} does not commit before t{}. NON-RC.",
                read.writer, read.reader
            ),
            Self::CommittedRead(read) => write!(
                f,
                "{read}: t{} commits before r{}({}). OK.",
                read.writer, read.reader, read.variable
            ),
            Self::DirtyRead(read) => write!(
                f,
                "{read}: t{} does not commit before r{}({}). NON-ACA.",
                read.writer, read.reader, read.variable
            ),
            Self::WriteIsolated { write, end } => {
                write!(f, "{write}: no other transaction accesses ")?;
                if let Some(variable) = write.variable() {
                    write!(f, "{variable}")?;
                }
                write!(f, " before {}. OK.", End(end))
            }
            Self::WriteOverlapped { write, access, end } => write!(
                f,
                "{write} < {access} but {access} < {}. NON-ST.",
                End(end)
            ),
        }
    }
}
