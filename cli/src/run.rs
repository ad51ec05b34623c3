use std::str::FromStr;
use anyhow::Result;
use kcolor::{
    Coloring, GeneticAlgorithmParameters, Graph, Strategy, kcolor_gp, kcolor_greedy,
};
use log::debug;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Greedy,
    Evolution,
    Heuristic,
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('-') {
            "g" => Ok(Algorithm::Greedy),
            "e" => Ok(Algorithm::Evolution),
            "h" => Ok(Algorithm::Heuristic),
            other => Err(format!("unknown algorithm `{}`, expected g, e or h", other)),
        }
    }
}

/// Bounds and GA knobs shared by every run of one invocation.
#[derive(Clone, Debug)]
pub struct RunSettings {
    pub max_iterations: Option<usize>,
    pub max_generations: Option<usize>,
    pub mutation_probability: f64,
    pub crossover_probability: f64,
}

impl Default for RunSettings {
    fn default() -> Self {
        let ga = GeneticAlgorithmParameters::default();
        Self {
            max_iterations: Some(100_000),
            max_generations: ga.max_generations,
            mutation_probability: ga.mutation_probability,
            crossover_probability: ga.crossover_probability,
        }
    }
}

/// Runs one algorithm and returns whatever coloring it ended with.
pub fn color_graph(
    graph: &Graph,
    k: usize,
    algorithm: Algorithm,
    population_size: usize,
    settings: &RunSettings,
    rng: &mut impl Rng,
) -> Result<Coloring> {
    let strategy = match algorithm {
        Algorithm::Greedy => {
            let (coloring, _) = kcolor_greedy(graph, k, settings.max_iterations)?;
            return Ok(coloring);
        }
        Algorithm::Evolution => Strategy::Uniform,
        Algorithm::Heuristic => Strategy::Heuristic,
    };

    let params = GeneticAlgorithmParameters {
        population_size,
        mutation_probability: settings.mutation_probability,
        crossover_probability: settings.crossover_probability,
        elitism: true,
        max_generations: settings.max_generations,
        strategy,
    };
    let outcome = kcolor_gp(graph, k, &params, rng, |info| {
        debug!("#{} best {} of {}", info.generation, info.best_fitness, info.quality.len());
        false
    })?;

    Ok(outcome.into_coloring())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kcolor::is_correctly_colored;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn parses_algorithm_flags() {
        assert_eq!("g".parse::<Algorithm>(), Ok(Algorithm::Greedy));
        assert_eq!("-e".parse::<Algorithm>(), Ok(Algorithm::Evolution));
        assert_eq!("h".parse::<Algorithm>(), Ok(Algorithm::Heuristic));
        assert!("x".parse::<Algorithm>().is_err());
    }

    #[test]
    fn every_algorithm_colors_a_path() {
        let mut graph = Graph::new(6);
        for i in 1..6 {
            graph.add_edge(i - 1, i);
        }
        let mut rng = StdRng::seed_from_u64(1);
        for &algorithm in &[Algorithm::Greedy, Algorithm::Evolution, Algorithm::Heuristic] {
            let coloring = color_graph(&graph, 2, algorithm, 20, &RunSettings::default(), &mut rng)
                .unwrap();
            assert!(is_correctly_colored(&graph, &coloring), "{:?}", algorithm);
        }
    }
}
