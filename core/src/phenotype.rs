use std::ops::Range;
use rand::{Rng, seq::SliceRandom};
use crate::{Color, Coloring, Graph, checker::DepthFirst};

/// One candidate coloring evolving inside a [`Population`].
///
/// [`Population`]: crate::Population
#[derive(Clone, Debug)]
pub struct Phenotype<'g> {
    graph: &'g Graph,
    k: usize,
    colors: Vec<Color>,
    mutatable: Vec<usize>,
}

impl<'g> Phenotype<'g> {
    /// Every vertex gets a uniformly random color in `0..k`.
    pub fn new(graph: &'g Graph, k: usize, rng: &mut impl Rng) -> Self {
        let colors = (0..graph.vertices())
            .map(|_| rng.gen_range(0..k))
            .collect();
        Self::with_colors(graph, k, colors)
    }

    /// Constrained vertices draw from their allow-list. The others take the
    /// smallest color no lower-numbered neighbor holds, or a random one when
    /// all of `0..k` are taken.
    pub fn new_constraint_biased(graph: &'g Graph, k: usize, rng: &mut impl Rng) -> Self {
        let mut colors: Vec<Color> = Vec::with_capacity(graph.vertices());

        for v in 0..graph.vertices() {
            let color = match graph.allowed(v).choose(rng) {
                Some(&color) => color,
                None => {
                    let fixed = &colors;
                    (0..k)
                        .find(|c| {
                            graph
                                .neighbors(v)
                                .iter()
                                .all(|&u| u >= v || fixed[u] != *c)
                        })
                        .unwrap_or_else(|| rng.gen_range(0..k))
                }
            };
            colors.push(color);
        }

        Self::with_colors(graph, k, colors)
    }

    pub fn with_colors(graph: &'g Graph, k: usize, colors: Vec<Color>) -> Self {
        assert_eq!(graph.vertices(), colors.len());
        Self {
            graph,
            k,
            colors,
            mutatable: Vec::new(),
        }
    }

    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Vertices found in violation by the last [`fitness`](Self::fitness) call.
    #[inline]
    pub fn mutatable(&self) -> &[usize] {
        &self.mutatable
    }

    pub fn coloring(&self) -> Coloring {
        Coloring::from(self.colors.as_slice())
    }

    /// Number of violations; `0` iff the coloring is proper.
    ///
    /// A color outside a vertex's allow-list counts once. A conflicting edge
    /// counts once from each endpoint.
    pub fn fitness(&mut self) -> usize {
        let graph = self.graph;
        let colors = &self.colors;
        self.mutatable.clear();

        let mut violations = 0;
        for v in DepthFirst::new(graph) {
            let color = colors[v];
            let mut violating = false;

            if !graph.permits(v, color) {
                violations += 1;
                violating = true;
            }

            for &u in graph.neighbors(v) {
                if colors[u] == color {
                    violations += 1;
                    violating = true;
                }
            }

            if violating {
                self.mutatable.push(v);
            }
        }

        violations
    }

    pub fn mutate(&mut self, rng: &mut impl Rng) {
        let v = rng.gen_range(0..self.colors.len());
        self.colors[v] = rng.gen_range(0..self.k);
    }

    /// Recolors one vertex from the last violation list, preferring its
    /// allow-list. No-op when nothing was in violation.
    pub fn mutate_heuristic(&mut self, rng: &mut impl Rng) {
        let v = match self.mutatable.choose(rng) {
            Some(&v) => v,
            None => return,
        };

        self.colors[v] = match self.graph.allowed(v).choose(rng) {
            Some(&color) => color,
            None => rng.gen_range(0..self.k),
        };
    }

    /// Copies `other`'s colors over a random interval and returns it.
    pub fn crossover(&mut self, other: &Self, rng: &mut impl Rng) -> Range<usize> {
        let len = self.colors.len();
        let a = rng.gen_range(0..len);
        let b = rng.gen_range(0..len);
        let range = a.min(b)..a.max(b);
        self.crossover_range(other, range.clone());
        range
    }

    #[inline]
    pub fn crossover_range(&mut self, other: &Self, range: Range<usize>) {
        self.colors[range.clone()].copy_from_slice(&other.colors[range]);
    }
}
