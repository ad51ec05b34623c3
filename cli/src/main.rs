use std::fs;
use std::path::PathBuf;
use std::process;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kcolor::{Graph, dense_edge_count, is_correctly_colored, sparse_edge_count};
use kcolor_cli::benchmark::run_benchmark;
use kcolor_cli::dot::{render_dot, render_edge_list};
use kcolor_cli::loader::load_graph;
use kcolor_cli::run::{Algorithm, RunSettings, color_graph};
use log::{LevelFilter, info, warn};
use rand::{SeedableRng, rngs::StdRng};

#[derive(Parser)]
#[clap(name = "kcolor")]
#[clap(about = "Greedy and genetic k-coloring of constrained graphs", long_about = None)]
struct Cli {
    /// Seed of the random generator shared by the whole run
    #[clap(long, default_value_t = 2021)]
    seed: u64,

    /// Log at debug level unless RUST_LOG says otherwise
    #[clap(short, long)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Limits {
    /// Repair iterations allowed to the greedy colorer (0 = unbounded)
    #[clap(long, default_value_t = 100_000)]
    max_iterations: usize,

    /// Generations allowed to the genetic colorer (0 = unbounded)
    #[clap(long, default_value_t = 100_000)]
    max_generations: usize,

    #[clap(long, default_value_t = 0.315)]
    mutation: f64,

    #[clap(long, default_value_t = 0.175)]
    crossover: f64,
}

impl Limits {
    fn settings(&self) -> RunSettings {
        let bound = |n: usize| if n == 0 { None } else { Some(n) };
        RunSettings {
            max_iterations: bound(self.max_iterations),
            max_generations: bound(self.max_generations),
            mutation_probability: self.mutation,
            crossover_probability: self.crossover,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Color a graph and write it as DOT
    Color {
        /// Edge list (`A -- B` per line)
        graph: PathBuf,

        /// Output DOT file, `-` for stdout
        output: String,

        /// Number of available colors
        k: usize,

        /// g = greedy, e = genetic, h = genetic with heuristic mutation
        #[clap(short, long, default_value = "g")]
        algorithm: Algorithm,

        /// Allowed colors (`V: C` per line)
        #[clap(short, long)]
        constraints: Option<PathBuf>,

        /// Phenotypes per generation for e and h
        #[clap(short, long, default_value_t = 100)]
        population: usize,

        #[clap(flatten)]
        limits: Limits,
    },

    /// Print a random connected graph
    Generate {
        #[clap(short, long)]
        nodes: usize,

        /// Edge count, at least nodes - 1 and kept within the --sparse or --dense band
        #[clap(short, long, default_value_t = 0)]
        edges: usize,

        #[clap(short, long, conflicts_with = "dense")]
        sparse: bool,

        #[clap(short, long)]
        dense: bool,
    },

    /// Run a benchmark plan and write per-run CSV results
    Bench {
        input: PathBuf,
        output: PathBuf,

        #[clap(flatten)]
        limits: Limits,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(error) => {
            eprintln!("error: {:?}", error);
            process::exit(2);
        }
    }
}

/// Returns `false` when a coloring came out improper.
fn run(cli: Cli) -> Result<bool> {
    let mut rng = StdRng::seed_from_u64(cli.seed);

    match cli.command {
        Commands::Color { graph, output, k, algorithm, constraints, population, limits } => {
            let graph_file = graph;
            let graph = load_graph(&graph_file, constraints.as_deref())?;
            info!(
                "{}: {} vertices, {} edges, {} constraints",
                graph_file.display(), graph.vertices(), graph.edges(), graph.constraints()
            );

            let coloring = color_graph(&graph, k, algorithm, population, &limits.settings(), &mut rng)?;
            let proper = is_correctly_colored(&graph, &coloring);
            if proper {
                info!("proper coloring with {} colors", coloring.colors_used());
            } else {
                warn!("coloring is not proper: {}", coloring);
            }

            let dot = render_dot("colored_graph", &graph, &coloring);
            if output == "-" {
                print!("{}", dot);
            } else {
                fs::write(&output, dot).with_context(|| format!("cannot write {}", output))?;
            }
            Ok(proper)
        }
        Commands::Generate { nodes, edges, sparse, dense } => {
            let edges = if sparse {
                sparse_edge_count(nodes, edges)
            } else if dense {
                dense_edge_count(nodes, edges)
            } else {
                edges
            };
            print!("{}", render_edge_list(&Graph::random(nodes, edges, &mut rng)));
            Ok(true)
        }
        Commands::Bench { input, output, limits } => {
            let results = run_benchmark(&input, &output, &limits.settings(), &mut rng)?;
            let proper = results.iter().filter(|it| it.success).count();
            info!("{} runs, {} proper, results in {}", results.len(), proper, output.display());
            Ok(true)
        }
    }
}
