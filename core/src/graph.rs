use crate::coloring::Color;
use rand::{Rng, seq::SliceRandom};
use std::collections::HashSet;

/// Undirected graph stored as adjacency lists, with an optional allow-list
/// of colors for every vertex.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
    constraints: Vec<Vec<Color>>,
}

impl Graph {
    pub fn new(number_of_vertices: usize) -> Graph {
        Graph {
            adjacency: vec![Vec::new(); number_of_vertices],
            constraints: vec![Vec::new(); number_of_vertices],
        }
    }

    /// Adds the edge in both directions. Repeated edges are ignored.
    ///
    /// Panics on an out-of-range vertex or a self-loop.
    pub fn add_edge(&mut self, i: usize, j: usize) {
        assert!(i < self.vertices(), "vertex {} out of range", i);
        assert!(j < self.vertices(), "vertex {} out of range", j);
        assert_ne!(i, j, "self-loop on vertex {}", i);
        if self.adjacency[i].contains(&j) {
            return;
        }
        self.adjacency[i].push(j);
        self.adjacency[j].push(i);
    }

    /// Appends `color` to the allow-list of vertex `v`.
    pub fn add_constraint(&mut self, v: usize, color: Color) {
        assert!(v < self.vertices(), "vertex {} out of range", v);
        if !self.constraints[v].contains(&color) {
            self.constraints[v].push(color);
        }
    }

    #[inline]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adjacency[v]
    }

    /// Allowed colors of `v`; empty means unconstrained.
    #[inline]
    pub fn allowed(&self, v: usize) -> &[Color] {
        &self.constraints[v]
    }

    #[inline]
    pub fn is_constrained(&self, v: usize) -> bool {
        !self.constraints[v].is_empty()
    }

    /// Whether `color` is permitted on `v` by its allow-list.
    #[inline]
    pub fn permits(&self, v: usize, color: Color) -> bool {
        let allowed = self.allowed(v);
        allowed.is_empty() || allowed.contains(&color)
    }

    #[inline]
    pub fn vertices(&self) -> usize {
        self.adjacency.len()
    }

    #[inline]
    pub fn edges(&self) -> usize {
        let arcs: usize = self.adjacency.iter().map(Vec::len).sum();
        arcs / 2
    }

    /// Total number of allow-list entries over all vertices.
    #[inline]
    pub fn constraints(&self) -> usize {
        self.constraints.iter().map(Vec::len).sum()
    }

    pub fn is_connected(&self) -> bool {
        if self.vertices() == 0 {
            return true;
        }

        let mut visited = HashSet::new();
        let mut remaining = vec![0];

        while let Some(current) = remaining.pop() {
            if !visited.insert(current) {
                continue;
            }
            remaining.extend(self.neighbors(current).iter().copied());
        }

        visited.len() == self.vertices()
    }

    /// Builds a random connected graph with `edges` distinct edges.
    ///
    /// The vertex list is shuffled and consecutive vertices are linked until
    /// enough edges exist, so the first pass alone already spans the graph.
    /// `edges` is clamped to `[n - 1, n * (n - 1) / 2]`.
    pub fn random(vertices: usize, edges: usize, rng: &mut impl Rng) -> Graph {
        let mut graph = Graph::new(vertices);
        if vertices < 2 {
            return graph;
        }

        let max_edges = vertices * (vertices - 1) / 2;
        let edges = edges.max(vertices - 1).min(max_edges);

        let mut order: Vec<usize> = (0..vertices).collect();
        while graph.edges() < edges {
            order.shuffle(rng);
            for pair in order.windows(2) {
                if graph.edges() >= edges {
                    break;
                }
                graph.add_edge(pair[0], pair[1]);
            }
        }

        graph
    }
}

/// Edge count for a sparse graph. `requested` is kept when it already lies
/// strictly between the tree size and the sparse quota, otherwise the quota
/// is used.
pub fn sparse_edge_count(vertices: usize, requested: usize) -> usize {
    let (min, max) = edge_bounds(vertices);
    let mean = (max + min) / 2;
    let quota = (0.6 * ((min + mean) / 2) as f64) as usize + 1;

    let requested = requested.max(min).min(max);
    if requested > min && requested < quota {
        requested
    } else {
        quota
    }
}

/// Edge count for a dense graph. `requested` is kept (capped at the complete
/// graph) when it exceeds the dense quota, otherwise the quota is used.
pub fn dense_edge_count(vertices: usize, requested: usize) -> usize {
    let (min, max) = edge_bounds(vertices);
    let mean = (max + min) / 2;
    let quota = (max + mean) / 2;

    let requested = requested.max(min).min(max);
    if requested > quota {
        requested
    } else {
        quota
    }
}

fn edge_bounds(vertices: usize) -> (usize, usize) {
    if vertices < 2 {
        return (0, 0);
    }
    (vertices - 1, vertices * (vertices - 1) / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn edges_are_symmetric() {
        let mut graph = Graph::new(5);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(4, 0);

        for u in 0..graph.vertices() {
            for &v in graph.neighbors(u) {
                assert!(graph.neighbors(v).contains(&u));
            }
        }
        assert_eq!(graph.edges(), 3);
    }

    #[test]
    fn duplicate_edges_are_recorded_once() {
        let mut graph = Graph::new(2);
        graph.add_edge(0, 1);
        graph.add_edge(1, 0);
        assert_eq!(graph.edges(), 1);
        assert_eq!(graph.neighbors(0), &[1]);
    }

    #[test]
    #[should_panic]
    fn out_of_range_vertex_panics() {
        let mut graph = Graph::new(2);
        graph.add_edge(0, 2);
    }

    #[test]
    fn constraints_are_counted() {
        let mut graph = Graph::new(3);
        graph.add_constraint(0, 1);
        graph.add_constraint(0, 2);
        graph.add_constraint(0, 2);
        graph.add_constraint(2, 0);

        assert_eq!(graph.constraints(), 3);
        assert_eq!(graph.allowed(0), &[1, 2]);
        assert!(!graph.is_constrained(1));
        assert!(graph.permits(1, 7));
        assert!(!graph.permits(2, 1));
    }

    #[test]
    fn random_graph_is_connected() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = Graph::random(30, 0, &mut rng);
        assert_eq!(graph.edges(), 29);
        assert!(graph.is_connected());

        let graph = Graph::random(10, 1000, &mut rng);
        assert_eq!(graph.edges(), 45);
    }

    #[test]
    fn disconnected_graph_is_detected() {
        let mut graph = Graph::new(4);
        graph.add_edge(0, 1);
        graph.add_edge(2, 3);
        assert!(!graph.is_connected());
    }

    #[test]
    fn sparse_and_dense_counts() {
        assert_eq!(sparse_edge_count(10, 0), 11);
        assert_eq!(dense_edge_count(10, 0), 36);
    }

    #[test]
    fn requested_edges_kept_inside_band() {
        assert_eq!(sparse_edge_count(10, 10), 10);
        assert_eq!(sparse_edge_count(10, 9), 11);
        assert_eq!(sparse_edge_count(10, 20), 11);
        assert_eq!(dense_edge_count(10, 40), 40);
        assert_eq!(dense_edge_count(10, 100), 45);
        assert_eq!(dense_edge_count(10, 30), 36);
    }
}
