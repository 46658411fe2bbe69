//! The reads-from relation of a schedule.
//!
//! A read of `x` by `t` is attributed to the nearest earlier write of `x`
//! by a different transaction that does not abort anywhere in the
//! schedule. Reads with no such write observe the initial value and are
//! left out of the relation.

use alloc::vec::Vec;
use core::fmt::{Display, Formatter};

use super::aborted;
use super::types::{Operation, TransactionId};

/// `reader` observed the value of `variable` last written by `writer`.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReadsFrom<Variable> {
    pub reader: TransactionId,
    pub variable: Variable,
    pub writer: TransactionId,
    /// Position of the read in the schedule.
    pub position: usize,
}

impl<Variable> Display for ReadsFrom<Variable>
where
    Variable: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "t{} reads {} from t{}",
            self.reader, self.variable, self.writer
        )
    }
}

/// Resolve every attributable read of the schedule, in schedule order.
#[must_use]
pub fn reads_from<Variable>(schedule: &[Operation<Variable>]) -> Vec<ReadsFrom<Variable>>
where
    Variable: Eq + Clone,
{
    let aborted = aborted(schedule);

    schedule
        .iter()
        .enumerate()
        .filter_map(|(position, op)| {
            let Operation::Read {
                transaction: reader,
                variable,
            } = op
            else {
                return None;
            };
            let writer = schedule[..position].iter().rev().find_map(|earlier| match earlier {
                Operation::Write {
                    transaction,
                    variable: written,
                } if written == variable
                    && transaction != reader
                    && !aborted.contains(transaction) =>
                {
                    Some(*transaction)
                }
                _ => None,
            })?;
            tracing::trace!(%reader, %writer, position, "read attributed");
            Some(ReadsFrom {
                reader: *reader,
                variable: variable.clone(),
                writer,
                position,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn rf(reader: u64, variable: &'static str, writer: u64, position: usize) -> ReadsFrom<&'static str> {
        ReadsFrom {
            reader: TransactionId(reader),
            variable,
            writer: TransactionId(writer),
            position,
        }
    }

    #[test]
    fn test_nearest_writer_wins() {
        let schedule = vec![
            Operation::write(1, "x"),
            Operation::write(2, "x"),
            Operation::read(3, "x"),
        ];
        assert_eq!(reads_from(&schedule), vec![rf(3, "x", 2, 2)]);
    }

    #[test]
    fn test_aborted_writer_skipped() {
        // The abort comes after the read, but the writer is still excluded.
        let schedule = vec![
            Operation::write(1, "x"),
            Operation::write(2, "x"),
            Operation::read(3, "x"),
            Operation::abort(2),
        ];
        assert_eq!(reads_from(&schedule), vec![rf(3, "x", 1, 2)]);
    }

    #[test]
    fn test_own_write_skipped() {
        let schedule = vec![
            Operation::write(1, "x"),
            Operation::write(2, "x"),
            Operation::read(2, "x"),
        ];
        assert_eq!(reads_from(&schedule), vec![rf(2, "x", 1, 2)]);
    }

    #[test]
    fn test_initial_value_unattributed() {
        let schedule = vec![
            Operation::read(1, "x"),
            Operation::write(2, "y"),
            Operation::read(1, "y"),
            Operation::write(1, "x"),
        ];
        assert_eq!(reads_from(&schedule), vec![rf(1, "y", 2, 2)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(alloc::format!("{}", rf(2, "x", 1, 4)), "t2 reads x from t1");
    }
}
