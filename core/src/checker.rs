use crate::{Coloring, Graph};

/// Depth-first visiting order over every connected component.
///
/// Components are entered from the lowest-numbered unvisited vertex.
pub struct DepthFirst<'g> {
    graph: &'g Graph,
    visited: Vec<bool>,
    remaining: Vec<usize>,
    next_root: usize,
}

impl<'g> DepthFirst<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            visited: vec![false; graph.vertices()],
            remaining: Vec::new(),
            next_root: 0,
        }
    }
}

impl Iterator for DepthFirst<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            while let Some(current) = self.remaining.pop() {
                if self.visited[current] {
                    continue;
                }
                self.visited[current] = true;
                let visited = &self.visited;
                self.remaining.extend(
                    self.graph
                        .neighbors(current)
                        .iter()
                        .rev()
                        .filter(|it| !visited[**it]),
                );
                return Some(current);
            }

            while self.next_root < self.visited.len() && self.visited[self.next_root] {
                self.next_root += 1;
            }
            if self.next_root == self.visited.len() {
                return None;
            }
            self.remaining.push(self.next_root);
        }
    }
}

/// Checks that every vertex is colored, holds an allowed color and differs
/// from all of its neighbors.
pub fn is_correctly_colored(graph: &Graph, coloring: &Coloring) -> bool {
    assert_eq!(graph.vertices(), coloring.len());

    DepthFirst::new(graph).all(|v| {
        let color = match coloring.get(v) {
            Some(color) => color,
            None => return false,
        };
        if !graph.permits(v, color) {
            return false;
        }
        graph
            .neighbors(v)
            .iter()
            .all(|&u| coloring.get(u).map_or(false, |it| it != color))
    })
}
