//! Recoverability classes of a schedule.
//!
//! Three classes are checked, strongest first:
//!
//! 1. **Strict (ST)** -- nobody reads or overwrites an object written by a
//!    transaction until that transaction has aborted or committed.
//! 2. **Avoids Cascading Aborts (ACA)** -- every read observes data of a
//!    transaction that has already committed.
//! 3. **Recoverable (RC)** -- a transaction commits only after every
//!    transaction it read from has committed.
//!
//! `ST` implies `ACA` implies `RC`, so a schedule is recoverable iff it is
//! `RC`. [`classify`] walks the classes in that order and stops at the
//! first one that holds.

use alloc::vec::Vec;
use core::fmt::{Debug, Display, Formatter};

use crate::schedule::types::Operation;

pub mod cascadeless;
pub mod recoverable;
pub mod strict;
pub mod trace;

pub use cascadeless::check_avoids_cascading_aborts;
pub use recoverable::check_recoverable;
pub use strict::check_strict;
pub use trace::Justification;

/// Recoverability classes, ordered from strongest to weakest.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Recoverability {
    /// Strict: written data is untouchable until the writer terminates.
    Strict,
    /// Avoids Cascading Aborts: only committed data is read.
    AvoidsCascadingAborts,
    /// Recoverable: readers commit after the transactions they read from.
    Recoverable,
}

impl Recoverability {
    /// All classes, strongest first.
    pub const ALL: [Self; 3] = [Self::Strict, Self::AvoidsCascadingAborts, Self::Recoverable];
}

impl Display for Recoverability {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Strict => "ST",
            Self::AvoidsCascadingAborts => "ACA",
            Self::Recoverable => "RC",
        })
    }
}

/// Outcome of checking one class, with the reasoning that led to it.
///
/// The trace stops at the first violation, which is then its last entry.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict<Variable> {
    pub level: Recoverability,
    pub holds: bool,
    pub trace: Vec<Justification<Variable>>,
}

impl<Variable> Verdict<Variable>
where
    Variable: Debug,
{
    pub(crate) const fn new(level: Recoverability) -> Self {
        Self {
            level,
            holds: true,
            trace: Vec::new(),
        }
    }

    /// Append a justification; a violation settles the verdict.
    pub(crate) fn record(&mut self, justification: Justification<Variable>) {
        tracing::trace!(level = %self.level, ?justification, "recoverability step");
        if justification.is_violation() {
            self.holds = false;
        }
        self.trace.push(justification);
    }

    pub(crate) fn finish(self) -> Self {
        tracing::debug!(level = %self.level, holds = self.holds, steps = self.trace.len(), "recoverability checked");
        self
    }

    /// The justification that made the class fail, if any.
    #[must_use]
    pub fn violation(&self) -> Option<&Justification<Variable>> {
        self.trace.last().filter(|step| step.is_violation())
    }
}

/// Check whether `schedule` belongs to the given class.
#[must_use]
pub fn check<Variable>(schedule: &[Operation<Variable>], level: Recoverability) -> Verdict<Variable>
where
    Variable: Eq + Clone + Debug,
{
    tracing::debug!(operations = schedule.len(), %level, "checking recoverability");

    match level {
        Recoverability::Strict => check_strict(schedule),
        Recoverability::AvoidsCascadingAborts => check_avoids_cascading_aborts(schedule),
        Recoverability::Recoverable => check_recoverable(schedule),
    }
}

/// The verdicts evaluated by [`classify`], strongest class first.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<Variable> {
    pub verdicts: Vec<Verdict<Variable>>,
}

impl<Variable> Classification<Variable> {
    /// `true` iff one of the evaluated classes holds.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.verdicts.iter().any(|verdict| verdict.holds)
    }

    /// The strongest class the schedule belongs to.
    #[must_use]
    pub fn strongest(&self) -> Option<Recoverability> {
        self.verdicts
            .iter()
            .find(|verdict| verdict.holds)
            .map(|verdict| verdict.level)
    }
}

/// Decide whether `schedule` is recoverable.
///
/// Evaluates ST, ACA and RC in that order and stops at the first class
/// that holds. Only the verdicts that were actually evaluated are returned,
/// so a strict schedule yields a single verdict and a non-recoverable one
/// yields all three.
#[must_use]
pub fn classify<Variable>(schedule: &[Operation<Variable>]) -> Classification<Variable>
where
    Variable: Eq + Clone + Debug,
{
    let mut verdicts = Vec::new();
    for level in Recoverability::ALL {
        let verdict = check(schedule, level);
        let holds = verdict.holds;
        verdicts.push(verdict);
        if holds {
            break;
        }
    }
    Classification { verdicts }
}
