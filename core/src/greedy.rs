use log::{info, trace, warn};
use crate::{Color, Coloring, Graph};
use crate::error::{ColoringError, check_request};

/// Greedy k-coloring with conflict repair.
///
/// Constrained vertices are placed first, then the rest scan `0..k`. When a
/// vertex has no free color it takes the one used by the fewest neighbors
/// and those neighbors are uncolored again. An outer iteration runs the
/// constrained pass and, only if that placed everything without evictions,
/// the free pass. The loop ends when the free pass has no evictions either.
///
/// `max_iterations` bounds the outer loop, `None` keeps it unbounded. The
/// flag is `false` when the bound ran out before the loop settled.
pub fn kcolor_greedy(
    graph: &Graph,
    k: usize,
    max_iterations: Option<usize>,
) -> Result<(Coloring, bool), ColoringError> {
    check_request(graph.vertices(), k)?;

    if k >= graph.vertices() {
        return Ok((Coloring::identity(graph.vertices()), true));
    }

    let max_iterations = max_iterations.unwrap_or(usize::max_value());
    let mut coloring = Coloring::unassigned(graph.vertices());

    for iteration in 0..max_iterations {
        if !color_constrained(graph, &mut coloring) {
            trace!("#{} constrained pass evicted neighbors", iteration);
            continue;
        }

        if color_free(graph, k, &mut coloring) {
            info!("greedy coloring settled after {} iterations", iteration + 1);
            return Ok((coloring, true));
        }
        trace!("#{} free pass evicted neighbors", iteration);
    }

    warn!("greedy coloring did not settle within {} iterations", max_iterations);
    Ok((coloring, false))
}

/// Places every uncolored constrained vertex. Returns `false` if any vertex
/// had to evict neighbors.
fn color_constrained(graph: &Graph, coloring: &mut Coloring) -> bool {
    let mut fulfilled = true;

    for v in 0..graph.vertices() {
        if !graph.is_constrained(v) || coloring.get(v).is_some() {
            continue;
        }

        let candidates = graph.allowed(v).iter().copied();
        if let Some(color) = place(graph, coloring, v, candidates) {
            evict(graph, coloring, v, color);
            fulfilled = false;
        }
    }

    fulfilled
}

/// Places every uncolored vertex using colors `0..k`. Stops at the first
/// eviction and returns `false`.
fn color_free(graph: &Graph, k: usize, coloring: &mut Coloring) -> bool {
    for v in 0..graph.vertices() {
        if coloring.get(v).is_some() {
            continue;
        }

        let candidates = (0..k).filter(|it| graph.permits(v, *it));
        if let Some(color) = place(graph, coloring, v, candidates) {
            evict(graph, coloring, v, color);
            return false;
        }
    }

    true
}

/// Colors `v` with the first candidate no neighbor holds. Without such a
/// candidate `v` takes the one held by the fewest neighbors (lowest on ties)
/// and that color is returned so the caller can evict.
fn place(
    graph: &Graph,
    coloring: &mut Coloring,
    v: usize,
    candidates: impl Iterator<Item=Color>,
) -> Option<Color> {
    let mut least_used: Option<(Color, usize)> = None;

    for color in candidates {
        let uses = neighbor_uses(graph, coloring, v, color);
        if uses == 0 {
            coloring.set(v, color);
            return None;
        }
        if least_used.map_or(true, |(_, fewest)| uses < fewest) {
            least_used = Some((color, uses));
        }
    }

    let (color, _) = least_used?;
    coloring.set(v, color);
    Some(color)
}

fn neighbor_uses(graph: &Graph, coloring: &Coloring, v: usize, color: Color) -> usize {
    graph
        .neighbors(v)
        .iter()
        .filter(|&&u| coloring.get(u) == Some(color))
        .count()
}

fn evict(graph: &Graph, coloring: &mut Coloring, v: usize, color: Color) {
    for &u in graph.neighbors(v) {
        if coloring.get(u) == Some(color) {
            coloring.unset(u);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_correctly_colored;

    fn path(n: usize) -> Graph {
        let mut graph = Graph::new(n);
        for i in 1..n {
            graph.add_edge(i - 1, i);
        }
        graph
    }

    fn triangle() -> Graph {
        let mut graph = Graph::new(3);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 0);
        graph
    }

    #[test]
    fn enough_colors_gives_identity() {
        let mut graph = path(5);
        graph.add_constraint(0, 3);
        let (coloring, success) = kcolor_greedy(&graph, 5, None).unwrap();
        assert!(success);
        assert_eq!(coloring, Coloring::identity(5));
    }

    #[test]
    fn triangle_with_three_colors() {
        let graph = triangle();
        let (coloring, success) = kcolor_greedy(&graph, 3, Some(100)).unwrap();
        assert!(success);
        assert!(is_correctly_colored(&graph, &coloring));
        assert_eq!(coloring.colors_used(), 3);
    }

    #[test]
    fn triangle_with_two_colors_fails() {
        let graph = triangle();
        let (coloring, success) = kcolor_greedy(&graph, 2, Some(1_000)).unwrap();
        assert!(!success);
        assert!(!is_correctly_colored(&graph, &coloring));
    }

    #[test]
    fn path_alternates() {
        let graph = path(4);
        let (coloring, success) = kcolor_greedy(&graph, 2, Some(100)).unwrap();
        assert!(success);
        assert_eq!(coloring, Coloring::from(vec![0, 1, 0, 1]));
        assert!(is_correctly_colored(&graph, &coloring));
    }

    #[test]
    fn constrained_vertex_gets_allowed_color() {
        let mut graph = path(4);
        graph.add_constraint(0, 1);
        let (coloring, success) = kcolor_greedy(&graph, 2, Some(100)).unwrap();
        assert!(success);
        assert_eq!(coloring.get(0), Some(1));
        assert_ne!(coloring.get(1), Some(1));
        assert!(is_correctly_colored(&graph, &coloring));
    }

    #[test]
    fn conflicting_constraints_evict_neighbor() {
        // Both ends of an edge may only take color 0.
        let mut graph = path(3);
        graph.add_constraint(0, 0);
        graph.add_constraint(1, 0);
        let (_, success) = kcolor_greedy(&graph, 2, Some(50)).unwrap();
        assert!(!success);
    }

    #[test]
    fn evicted_vertex_is_recolored() {
        // Vertex 1 can only take 0, so it evicts vertex 0 which then moves to 1.
        let mut graph = path(3);
        graph.add_constraint(0, 0);
        graph.add_constraint(0, 1);
        graph.add_constraint(1, 0);
        let (coloring, success) = kcolor_greedy(&graph, 2, Some(10)).unwrap();
        assert!(success);
        assert_eq!(coloring, Coloring::from(vec![1, 0, 1]));
    }

    fn star(leaves: &[Color]) -> (Graph, Coloring) {
        let mut graph = Graph::new(leaves.len() + 1);
        let mut coloring = Coloring::unassigned(leaves.len() + 1);
        for (i, &color) in leaves.iter().enumerate() {
            graph.add_edge(0, i + 1);
            coloring.set(i + 1, color);
        }
        (graph, coloring)
    }

    #[test]
    fn place_takes_lowest_of_equally_used_colors() {
        let (graph, mut coloring) = star(&[1, 0]);
        assert_eq!(place(&graph, &mut coloring, 0, 0..2), Some(0));
        assert_eq!(coloring.get(0), Some(0));
    }

    #[test]
    fn place_takes_least_used_color() {
        let (graph, mut coloring) = star(&[0, 0, 1]);
        assert_eq!(place(&graph, &mut coloring, 0, 0..2), Some(1));
        assert_eq!(coloring.get(0), Some(1));
    }

    #[test]
    fn place_prefers_free_color() {
        let (graph, mut coloring) = star(&[0, 2]);
        assert_eq!(place(&graph, &mut coloring, 0, 0..3), None);
        assert_eq!(coloring.get(0), Some(1));
    }

    #[test]
    fn evict_clears_only_matching_neighbors() {
        let (graph, mut coloring) = star(&[0, 1, 0]);
        assert_eq!(place(&graph, &mut coloring, 0, 0..2), Some(1));
        evict(&graph, &mut coloring, 0, 1);
        assert_eq!(coloring.get(0), Some(1));
        assert_eq!(coloring.get(1), Some(0));
        assert_eq!(coloring.get(2), None);
        assert_eq!(coloring.get(3), Some(0));
    }

    #[test]
    fn free_pass_stops_at_first_eviction() {
        let (graph, mut coloring) = star(&[0, 1]);
        // Vertex 0 sees both colors once and evicts vertex 1.
        assert!(!color_free(&graph, 2, &mut coloring));
        assert_eq!(coloring.get(0), Some(0));
        assert_eq!(coloring.get(1), None);
        assert_eq!(coloring.get(2), Some(1));
    }

    #[test]
    fn rejects_degenerate_requests() {
        assert_eq!(kcolor_greedy(&path(3), 0, None), Err(ColoringError::NoColors));
        assert_eq!(kcolor_greedy(&Graph::new(0), 2, None), Err(ColoringError::EmptyGraph));
    }
}
