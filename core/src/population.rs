use rand::Rng;
use rayon::prelude::*;
use crate::{Coloring, Phenotype};
use crate::error::ColoringError;

/// A generation of phenotypes together with their last fitness values.
pub struct Population<'g> {
    candidates: Vec<Phenotype<'g>>,
    quality: Vec<usize>,
    mutate_chance: f64,
    crossover_chance: f64,
    elitism: bool,
}

impl<'g> Population<'g> {
    pub fn new(
        candidates: Vec<Phenotype<'g>>,
        mutate_chance: f64,
        crossover_chance: f64,
        elitism: bool,
    ) -> Result<Self, ColoringError> {
        if candidates.len() < 2 {
            return Err(ColoringError::PopulationTooSmall { size: candidates.len() });
        }
        check_probability("mutation probability", mutate_chance)?;
        check_probability("crossover probability", crossover_chance)?;

        Ok(Self {
            quality: vec![usize::max_value(); candidates.len()],
            candidates,
            mutate_chance,
            crossover_chance,
            elitism,
        })
    }

    /// Fitness of every candidate as of the last [`evaluate`](Self::evaluate).
    #[inline]
    pub fn quality(&self) -> &[usize] {
        &self.quality
    }

    /// The candidate in the elitism slot and its fitness.
    #[inline]
    pub fn best(&self) -> (&Phenotype<'g>, usize) {
        (&self.candidates[0], self.quality[0])
    }

    /// Scores every candidate. Returns the coloring of the first candidate
    /// (by index) with zero violations; otherwise moves the best-scoring
    /// candidate to slot 0, the lowest index winning ties.
    pub fn evaluate(&mut self) -> Option<Coloring> {
        self.candidates
            .par_iter_mut()
            .map(|candidate| candidate.fitness())
            .collect_into_vec(&mut self.quality);

        let mut best = 0;
        for (i, &quality) in self.quality.iter().enumerate() {
            if quality == 0 {
                return Some(self.candidates[i].coloring());
            }
            if quality < self.quality[best] {
                best = i;
            }
        }

        self.candidates.swap(0, best);
        self.quality.swap(0, best);
        None
    }

    /// Each unprotected candidate takes an interval from a different random
    /// candidate with probability `crossover_chance`.
    pub fn crossover(&mut self, rng: &mut impl Rng) {
        for i in self.first_unprotected()..self.candidates.len() {
            if !rng.gen_bool(self.crossover_chance) {
                continue;
            }

            let j = loop {
                let j = rng.gen_range(0..self.candidates.len());
                if j != i {
                    break j;
                }
            };

            let (child, parent) = pair_mut(&mut self.candidates, i, j);
            child.crossover(parent, rng);
        }
    }

    /// Uniform mutation gated by `mutate_chance`.
    pub fn mutate(&mut self, rng: &mut impl Rng) {
        let start = self.first_unprotected();
        for candidate in self.candidates.iter_mut().skip(start) {
            if rng.gen_bool(self.mutate_chance) {
                candidate.mutate(rng);
            }
        }
    }

    /// Heuristic mutation applied to every unprotected candidate.
    pub fn mutate_heuristic(&mut self, rng: &mut impl Rng) {
        let start = self.first_unprotected();
        for candidate in self.candidates.iter_mut().skip(start) {
            candidate.mutate_heuristic(rng);
        }
    }

    #[inline]
    fn first_unprotected(&self) -> usize {
        if self.elitism { 1 } else { 0 }
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ColoringError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ColoringError::InvalidProbability { name, value })
    }
}

fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &T) {
    assert_ne!(i, j);
    if i < j {
        let (left, right) = items.split_at_mut(j);
        (&mut left[i], &right[0])
    } else {
        let (left, right) = items.split_at_mut(i);
        (&mut right[0], &left[j])
    }
}
