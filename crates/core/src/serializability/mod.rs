//! Conflict serializability.
//!
//! The conflict graph has a vertex per transaction and an edge `ti -> tj`
//! for every conflicting pair in which `ti`'s operation comes first. Only
//! committed transactions contribute edges, the same way [`conflicts`]
//! ignores everything else.

pub mod error;

use alloc::vec::Vec;

use self::error::Error;
use crate::graph::digraph::DiGraph;
use crate::schedule::types::{Operation, TransactionId};
use crate::schedule::{conflicts, transactions};

/// Build the conflict graph of `schedule`.
///
/// Every transaction of the schedule is a vertex, including the ones that
/// abort or never terminate.
#[must_use]
pub fn conflict_graph<Variable>(schedule: &[Operation<Variable>]) -> DiGraph<TransactionId>
where
    Variable: Eq,
{
    let mut graph = DiGraph::default();
    for transaction in transactions(schedule) {
        graph.add_vertex(transaction);
    }
    for (first, second) in conflicts(schedule) {
        graph.add_edge(first.transaction(), second.transaction());
    }

    tracing::debug!(
        vertices = graph.adj_map.len(),
        edges = graph.to_edge_list().len(),
        "conflict graph built"
    );
    graph
}

/// A serial order of the transactions that respects every conflict.
///
/// Ties are broken by the smaller transaction id.
///
/// # Errors
///
/// Returns [`Error::Cycle`] naming one edge of a cycle when the schedule is
/// not conflict serializable.
pub fn serialization_order<Variable>(
    schedule: &[Operation<Variable>],
) -> Result<Vec<TransactionId>, Error>
where
    Variable: Eq,
{
    let graph = conflict_graph(schedule);
    if let Some((a, b)) = graph.find_cycle_edge() {
        tracing::debug!(%a, %b, "conflict cycle");
        return Err(Error::Cycle { a, b });
    }
    // No edge closes a cycle, so the sort cannot fail.
    Ok(graph.topological_sort().unwrap_or_default())
}

/// Whether two schedules are conflict equivalent.
///
/// # Errors
///
/// Always returns [`Error::UnsupportedEquivalence`]; the comparison is not
/// implemented and callers must not read the absence of a result as
/// either answer.
pub fn conflict_equivalent<Variable>(
    first: &[Operation<Variable>],
    second: &[Operation<Variable>],
) -> Result<bool, Error> {
    tracing::debug!(
        first = first.len(),
        second = second.len(),
        "conflict equivalence requested"
    );
    Err(Error::UnsupportedEquivalence)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn test_conflict_graph_running_example() {
        // r2(x) r1(y) w3(x) w2(x) r3(y) w3(y) w2(y) w2(z) a2 r1(z) w1(z) c1 w3(z) c3
        let schedule = vec![
            Operation::read(2, "x"),
            Operation::read(1, "y"),
            Operation::write(3, "x"),
            Operation::write(2, "x"),
            Operation::read(3, "y"),
            Operation::write(3, "y"),
            Operation::write(2, "y"),
            Operation::write(2, "z"),
            Operation::abort(2),
            Operation::read(1, "z"),
            Operation::write(1, "z"),
            Operation::commit(1),
            Operation::write(3, "z"),
            Operation::commit(3),
        ];

        let graph = conflict_graph(&schedule);
        assert_eq!(
            graph.vertices(),
            vec![TransactionId(1), TransactionId(2), TransactionId(3)]
        );
        assert_eq!(
            graph.to_edge_list(),
            vec![(TransactionId(1), TransactionId(3))]
        );
        assert_eq!(
            serialization_order(&schedule),
            Ok(vec![TransactionId(1), TransactionId(2), TransactionId(3)])
        );
    }

    #[test]
    fn test_cycle_is_reported() {
        // r1(x) w2(x) w2(y) r1(y) c1 c2
        let schedule = vec![
            Operation::read(1, "x"),
            Operation::write(2, "x"),
            Operation::write(2, "y"),
            Operation::read(1, "y"),
            Operation::commit(1),
            Operation::commit(2),
        ];

        assert_eq!(
            serialization_order(&schedule),
            Err(Error::Cycle {
                a: TransactionId(1),
                b: TransactionId(2),
            })
        );
    }

    #[test]
    fn test_conflict_equivalence_fails_clearly() {
        let schedule = vec![Operation::write(1, "x"), Operation::commit(1)];
        assert_eq!(
            conflict_equivalent(&schedule, &schedule),
            Err(Error::UnsupportedEquivalence)
        );
    }
}
