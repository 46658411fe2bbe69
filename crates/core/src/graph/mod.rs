pub mod digraph;
pub mod dot;
