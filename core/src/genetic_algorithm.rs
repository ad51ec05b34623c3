use log::{debug, info, warn};
use rand::Rng;
use crate::{Coloring, Graph, Phenotype, Population};
use crate::error::{ColoringError, check_request};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Random initial colorings and uniform mutation gated by the mutation
    /// probability.
    Uniform,
    /// Constraint-biased initial colorings and heuristic mutation on every
    /// unprotected phenotype.
    Heuristic,
}

#[derive(Clone, Debug)]
pub struct GeneticAlgorithmParameters {
    pub population_size: usize,
    pub mutation_probability: f64,
    pub crossover_probability: f64,
    pub elitism: bool,
    /// `None` runs until a proper coloring turns up.
    pub max_generations: Option<usize>,
    pub strategy: Strategy,
}

impl Default for GeneticAlgorithmParameters {
    fn default() -> Self {
        Self {
            population_size: 100,
            mutation_probability: 0.315,
            crossover_probability: 0.175,
            elitism: true,
            max_generations: Some(100_000),
            strategy: Strategy::Uniform,
        }
    }
}

pub struct GenerationInfo<'a> {
    pub generation: usize,
    pub best_fitness: usize,
    pub quality: &'a [usize],
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Solved {
        coloring: Coloring,
        generations: usize,
    },
    /// The generation bound ran out or the callback stopped the run.
    NotSolved {
        best: Coloring,
        fitness: usize,
        generations: usize,
    },
}

impl Outcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved { .. })
    }

    pub fn coloring(&self) -> &Coloring {
        match self {
            Outcome::Solved { coloring, .. } => coloring,
            Outcome::NotSolved { best, .. } => best,
        }
    }

    pub fn into_coloring(self) -> Coloring {
        match self {
            Outcome::Solved { coloring, .. } => coloring,
            Outcome::NotSolved { best, .. } => best,
        }
    }

    pub fn generations(&self) -> usize {
        match *self {
            Outcome::Solved { generations, .. } => generations,
            Outcome::NotSolved { generations, .. } => generations,
        }
    }
}

/// Evolves colorings of `graph` with `k` colors until one has no violations.
///
/// Each generation is evaluated, then crossed over and mutated. `callback`
/// sees every unsolved generation and stops the run by returning `true`.
pub fn kcolor_gp(
    graph: &Graph,
    k: usize,
    params: &GeneticAlgorithmParameters,
    rng: &mut impl Rng,
    mut callback: impl FnMut(&GenerationInfo) -> bool,
) -> Result<Outcome, ColoringError> {
    check_request(graph.vertices(), k)?;

    if k >= graph.vertices() {
        return Ok(Outcome::Solved {
            coloring: Coloring::identity(graph.vertices()),
            generations: 0,
        });
    }

    let candidates = (0..params.population_size)
        .map(|_| match params.strategy {
            Strategy::Uniform => Phenotype::new(graph, k, rng),
            Strategy::Heuristic => Phenotype::new_constraint_biased(graph, k, rng),
        })
        .collect();
    let mut population = Population::new(
        candidates,
        params.mutation_probability,
        params.crossover_probability,
        params.elitism,
    )?;

    let max_generations = params.max_generations.unwrap_or(usize::max_value());
    let mut best = (usize::max_value(), Coloring::unassigned(graph.vertices()));
    let mut generation = 0;

    loop {
        if let Some(coloring) = population.evaluate() {
            info!("proper {}-coloring found in generation {}", k, generation);
            return Ok(Outcome::Solved {
                coloring,
                generations: generation + 1,
            });
        }

        let (elite, best_fitness) = population.best();
        debug!("#{} best fitness {}", generation, best_fitness);
        if best_fitness < best.0 {
            best = (best_fitness, elite.coloring());
        }

        let should_break = callback(&GenerationInfo {
            generation,
            best_fitness,
            quality: population.quality(),
        });

        generation += 1;
        if should_break || generation >= max_generations {
            break;
        }

        population.crossover(rng);
        match params.strategy {
            Strategy::Uniform => population.mutate(rng),
            Strategy::Heuristic => population.mutate_heuristic(rng),
        }
    }

    warn!(
        "no proper {}-coloring after {} generations, best fitness {}",
        k, generation, best.0
    );
    Ok(Outcome::NotSolved {
        best: best.1,
        fitness: best.0,
        generations: generation,
    })
}
