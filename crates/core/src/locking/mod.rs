//! Lock-based schedulers.
//!
//! Both simulators take a schedule as a stream of requests and produce a
//! new schedule in which every access is surrounded by a lock and an
//! unlock step:
//!
//! - [`conservative_two_phase_locking`] (C2PL) grabs the full lock set of a
//!   transaction before its first access, and never deadlocks.
//! - [`strict_two_phase_locking`] (S2PL / SS2PL) locks access by access and
//!   keeps locks until termination; it reports a [`Deadlock`] when no
//!   request can make progress.
//!
//! Locks follow the usual compatibility rule: reads share, writes are
//! exclusive (see [`LockTable::lockable`]).

use core::fmt::{Debug, Display, Formatter};

use crate::schedule::types::Operation;

pub mod conservative;
pub mod error;
mod queue;
pub mod strict;
pub mod table;

pub use conservative::conservative_two_phase_locking;
pub use error::Deadlock;
pub use strict::{strict_two_phase_locking, Strictness};
pub use table::LockTable;

/// One event of a lock-annotated schedule.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Step<Variable> {
    /// A lock is granted for the access.
    Lock(Operation<Variable>),
    /// The operation itself runs.
    Execute(Operation<Variable>),
    /// The lock taken for the access is released.
    Unlock(Operation<Variable>),
}

impl<Variable> Step<Variable> {
    #[must_use]
    pub const fn operation(&self) -> &Operation<Variable> {
        match self {
            Self::Lock(op) | Self::Execute(op) | Self::Unlock(op) => op,
        }
    }

    const fn marker(&self) -> &'static str {
        match self {
            Self::Lock(_) => "l",
            Self::Execute(_) => "",
            Self::Unlock(_) => "u",
        }
    }
}

/// Whether `op` can be granted under the locks recorded in `table`.
#[must_use]
pub fn lockable<Variable>(op: &Operation<Variable>, table: &LockTable<Variable>) -> bool
where
    Variable: Eq + Clone,
{
    table.lockable(op)
}

// Lock steps render as `rl1(x)` / `wl1(x)`, unlock steps as `ru1(x)` /
// `wu1(x)`, executed operations in plain notation.
impl<Variable> Display for Step<Variable>
where
    Variable: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let op = self.operation();
        let symbol = op.action().symbol();
        let marker = self.marker();
        let transaction = op.transaction();
        match op.variable() {
            Some(variable) => write!(f, "{symbol}{marker}{transaction}({variable})"),
            None => write!(f, "{symbol}{marker}{transaction}"),
        }
    }
}

impl<Variable> Debug for Step<Variable>
where
    Variable: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let op = self.operation();
        let symbol = op.action().symbol();
        let marker = self.marker();
        let transaction = op.transaction();
        match op.variable() {
            Some(variable) => write!(f, "{symbol}{marker}{transaction}({variable:?})"),
            None => write!(f, "{symbol}{marker}{transaction}"),
        }
    }
}
