//! Strict and strong strict two-phase locking (S2PL, SS2PL).

use alloc::vec::Vec;
use core::fmt::{Debug, Display, Formatter};

use super::error::Deadlock;
use super::queue::Requests;
use super::table::LockTable;
use super::Step;
use crate::schedule::types::{Action, Operation};

/// How long a transaction keeps its locks.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Strictness {
    /// Read locks go right after the read; write locks are held until the
    /// transaction aborts or commits.
    #[default]
    Strict,
    /// Every lock is held until the transaction aborts or commits.
    StrongStrict,
}

impl Display for Strictness {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Strict => "S2PL",
            Self::StrongStrict => "SS2PL",
        })
    }
}

/// Produce a strict 2PL execution of `schedule`.
///
/// Requests are served in schedule order. A request is deferred when its
/// lock is unavailable or when its transaction already has a deferred
/// request, so no transaction overtakes itself. Every granted request puts
/// all deferred requests back in front of the queue.
///
/// # Errors
///
/// Returns a [`Deadlock`] with the steps produced so far and the stuck
/// requests when the queue runs dry while requests are still deferred.
pub fn strict_two_phase_locking<Variable>(
    schedule: &[Operation<Variable>],
    strictness: Strictness,
) -> Result<Vec<Step<Variable>>, Deadlock<Variable>>
where
    Variable: Eq + Clone + Debug,
{
    tracing::debug!(operations = schedule.len(), %strictness, "strict 2PL");

    let mut requests = Requests::new(schedule.iter().cloned());
    let mut table = LockTable::new();
    let mut steps = Vec::new();

    while let Some(op) = requests.pop() {
        let transaction = op.transaction();

        if requests.has_deferred(transaction) || !table.lockable(&op) {
            tracing::trace!(?op, "deferring");
            requests.defer(op);
            continue;
        }

        match op.action() {
            Action::Abort | Action::Commit => {
                steps.extend(table.release_all(transaction).into_iter().map(Step::Unlock));
                steps.push(Step::Execute(op));
            }
            Action::Read | Action::Write => {
                steps.push(Step::Lock(op.clone()));
                steps.push(Step::Execute(op.clone()));
                if strictness == Strictness::Strict && op.action() == Action::Read {
                    steps.push(Step::Unlock(op));
                } else {
                    table.acquire(op);
                }
            }
        }

        requests.retry_deferred();
    }

    let blocked = requests.into_deferred();
    if blocked.is_empty() {
        Ok(steps)
    } else {
        tracing::debug!(?blocked, "strict 2PL deadlocked");
        Err(Deadlock { steps, blocked })
    }
}
