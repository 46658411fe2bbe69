use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Reverse;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

/// Directed graph backed by an adjacency map.
///
/// Each vertex of type `T` maps to the set of its outgoing neighbors.
/// Vertices are added implicitly when they appear in an edge, or explicitly
/// via [`add_vertex`](Self::add_vertex). Self-loops are permitted.
///
/// Used to hold the conflict relation between transactions.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct DiGraph<T>
where
    T: Hash + Eq + Clone + Debug,
{
    /// Maps each vertex to the set of vertices it has edges to.
    pub adj_map: HashMap<T, HashSet<T>>,
}

impl<T> DiGraph<T>
where
    T: Hash + Eq + Clone + Debug + Ord,
{
    /// Inserts a directed edge from `source` to `target`.
    ///
    /// Both vertices are added to the graph if not already present.
    pub fn add_edge(&mut self, source: T, target: T) {
        self.adj_map
            .entry(source)
            .or_default()
            .insert(target.clone());
        self.adj_map.entry(target).or_default();
    }

    /// Adds a vertex with no outgoing edges (if not already present).
    pub fn add_vertex(&mut self, source: T) {
        self.adj_map.entry(source).or_default();
    }

    /// Returns `true` if an edge from `source` to `target` exists.
    pub fn has_edge(&self, source: &T, target: &T) -> bool {
        self.adj_map
            .get(source)
            .is_some_and(|neighbor| neighbor.contains(target))
    }

    /// Vertices in ascending order.
    #[must_use]
    pub fn vertices(&self) -> Vec<T> {
        let mut vertices: Vec<T> = self.adj_map.keys().cloned().collect();
        vertices.sort_unstable();
        vertices
    }

    /// Detects if the graph contains a cycle using Kahn's algorithm.
    /// Time complexity: O(V+E)
    #[must_use]
    pub fn has_cycle(&self) -> bool {
        self.topological_sort().is_none()
    }

    /// Returns `true` if the graph has no cycles.
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        !self.has_cycle()
    }

    fn in_degrees(&self) -> HashMap<T, usize> {
        let mut in_degree: HashMap<T, usize> = HashMap::new();

        for vertex in self.adj_map.keys() {
            in_degree.entry(vertex.clone()).or_insert(0);
        }
        for neighbors in self.adj_map.values() {
            for neighbor in neighbors {
                *in_degree.entry(neighbor.clone()).or_insert(0) += 1;
            }
        }

        in_degree
    }

    /// Returns a topological ordering of vertices if the graph is acyclic,
    /// or None if the graph contains a cycle.
    ///
    /// Uses Kahn's algorithm; among the vertices that are ready at any
    /// point the smallest is emitted first, so the result is deterministic.
    #[must_use]
    pub fn topological_sort(&self) -> Option<Vec<T>> {
        let mut in_degree = self.in_degrees();

        let mut ready: BinaryHeap<Reverse<T>> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(vertex, _)| Reverse(vertex.clone()))
            .collect();

        let mut result = Vec::new();

        while let Some(Reverse(vertex)) = ready.pop() {
            if let Some(neighbors) = self.adj_map.get(&vertex) {
                for neighbor in neighbors {
                    if let Some(degree) = in_degree.get_mut(neighbor) {
                        *degree -= 1;
                        if *degree == 0 {
                            ready.push(Reverse(neighbor.clone()));
                        }
                    }
                }
            }
            result.push(vertex);
        }

        // If all vertices were processed, graph is acyclic
        (result.len() == self.adj_map.len()).then_some(result)
    }

    /// Returns an edge `(a, b)` that participates in a cycle, or `None` if acyclic.
    ///
    /// Uses Kahn's algorithm to strip acyclic vertices, then picks the
    /// smallest remaining edge whose target reaches back to its source.
    /// Time complexity: O(V+E) plus sorting the leftover edges.
    #[must_use]
    pub fn find_cycle_edge(&self) -> Option<(T, T)> {
        let mut in_degree = self.in_degrees();

        let mut queue: Vec<T> = in_degree
            .iter()
            .filter(|(_, &deg)| deg == 0)
            .map(|(v, _)| v.clone())
            .collect();

        let mut removed: HashSet<T> = HashSet::new();

        while let Some(vertex) = queue.pop() {
            removed.insert(vertex.clone());
            if let Some(neighbors) = self.adj_map.get(&vertex) {
                for neighbor in neighbors {
                    if let Some(deg) = in_degree.get_mut(neighbor) {
                        *deg -= 1;
                        if *deg == 0 {
                            queue.push(neighbor.clone());
                        }
                    }
                }
            }
        }

        // Leftover vertices are on a cycle or downstream of one; keep only
        // edges that close a cycle.
        self.to_edge_list().into_iter().find(|(src, dst)| {
            !removed.contains(src) && !removed.contains(dst) && self.is_reachable(dst, src)
        })
    }

    /// Returns true if there is a path from `source` to `target`.
    fn is_reachable(&self, source: &T, target: &T) -> bool {
        let mut visited: HashSet<T> = HashSet::new();
        let mut stack: Vec<T> = Vec::new();
        stack.push(source.clone());
        while let Some(node) = stack.pop() {
            if &node == target {
                return true;
            }
            if visited.insert(node.clone()) {
                if let Some(neighbors) = self.adj_map.get(&node) {
                    stack.extend(neighbors.iter().cloned());
                }
            }
        }
        false
    }

    /// Returns all edges as a list of (source, target) pairs, sorted.
    #[must_use]
    pub fn to_edge_list(&self) -> Vec<(T, T)> {
        let mut edges = Vec::new();
        for (src, dsts) in &self.adj_map {
            for dst in dsts {
                edges.push((src.clone(), dst.clone()));
            }
        }
        edges.sort_unstable();
        edges
    }
}
