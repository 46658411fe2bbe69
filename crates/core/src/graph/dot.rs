//! Graphviz DOT output for a [`DiGraph`].
//!
//! Only the text is produced here; turning it into an image is up to an
//! external `dot` binary.

use alloc::string::String;
use core::fmt::{Debug, Display, Write};
use core::hash::Hash;

use super::digraph::DiGraph;

/// Render `graph` as a `digraph` named `name`, vertices and edges sorted.
#[must_use]
pub fn render_dot<T>(graph: &DiGraph<T>, name: &str) -> String
where
    T: Hash + Eq + Clone + Debug + Ord + Display,
{
    let mut output = String::new();
    let _ = writeln!(output, "digraph \"{name}\" {{");
    for vertex in graph.vertices() {
        let _ = writeln!(output, "    \"{vertex}\";");
    }
    for (source, target) in graph.to_edge_list() {
        let _ = writeln!(output, "    \"{source}\" -> \"{target}\";");
    }
    output.push_str("}\n");
    output
}
