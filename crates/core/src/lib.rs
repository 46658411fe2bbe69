//! Analysis and lock-based scheduling of transaction schedules.
//!
//! A schedule is one interleaving of read, write, abort and commit
//! operations issued by many transactions. `txsched_core` answers three
//! questions about it:
//!
//! 1. **Recoverability** -- is the schedule Strict (ST), does it Avoid
//!    Cascading Aborts (ACA), is it Recoverable (RC)? Every verdict comes
//!    with a trace of the reads-from entries or write intervals that
//!    decided it.
//! 2. **Conflict serializability** -- the conflict graph between committed
//!    transactions and, when it is acyclic, a serial order that respects it.
//! 3. **Locking** -- what a conservative (C2PL) or strict (S2PL, SS2PL)
//!    two-phase-locking scheduler would make of the schedule when it is fed
//!    in as a stream of requests.
//!
//! # Entry points
//!
//! ```rust
//! use txsched_core::{classify, strict_two_phase_locking, Operation, Recoverability, Strictness};
//!
//! // w1(x) r2(x) c2 c1
//! let schedule = vec![
//!     Operation::write(1, "x"),
//!     Operation::read(2, "x"),
//!     Operation::commit(2),
//!     Operation::commit(1),
//! ];
//!
//! let classification = classify(&schedule);
//! assert!(!classification.is_recoverable());
//! assert_eq!(classification.verdicts.len(), Recoverability::ALL.len());
//!
//! let steps = strict_two_phase_locking(&schedule, Strictness::Strict).unwrap();
//! assert_eq!(steps.len(), 8);
//! ```
//!
//! # Crate features
//!
//! - **`serde`** -- enables `Serialize`/`Deserialize` derives on operations,
//!   verdicts, locking steps and errors.
//! - **`schemars`** -- enables `JsonSchema` derives on the operation model.
//!
//! This crate is `no_std` compatible (requires `alloc`). The schedule
//! notation parser lives in the separate `txsched_parser` crate.

#![cfg_attr(not(any(test, feature = "schemars")), no_std)]
extern crate alloc;

pub mod graph;
pub mod locking;
pub mod recoverability;
pub mod schedule;
pub mod serializability;

pub use locking::{
    conservative_two_phase_locking, strict_two_phase_locking, Deadlock, Step, Strictness,
};
pub use recoverability::{check, classify, Classification, Recoverability, Verdict};
pub use schedule::reads_from::{reads_from, ReadsFrom};
pub use schedule::types::{Action, Operation, Schedule, TransactionId};
pub use serializability::{conflict_equivalent, conflict_graph, serialization_order};
