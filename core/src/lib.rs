mod checker;
mod coloring;
mod error;
mod genetic_algorithm;
mod graph;
mod greedy;
mod phenotype;
mod population;

pub use crate::graph::{Graph, sparse_edge_count, dense_edge_count};
pub use crate::coloring::{Color, Coloring};
pub use crate::checker::{DepthFirst, is_correctly_colored};
pub use crate::error::ColoringError;
pub use crate::greedy::kcolor_greedy;
pub use crate::phenotype::Phenotype;
pub use crate::population::Population;
pub use crate::genetic_algorithm::{
    GenerationInfo, GeneticAlgorithmParameters, Outcome, Strategy, kcolor_gp,
};
