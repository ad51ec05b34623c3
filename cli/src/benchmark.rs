use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use anyhow::{Context, Result};
use kcolor::is_correctly_colored;
use log::{info, warn};
use noisy_float::prelude::*;
use rand::Rng;
use crate::loader::load_graph;
use crate::run::{Algorithm, RunSettings, color_graph};

/// One line of the benchmark plan:
/// `id,algorithm,graph,constraints|x,colors,population,repetition`.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchRun {
    pub id: u32,
    pub algorithm: Algorithm,
    pub graph_file: PathBuf,
    pub constraints_file: Option<PathBuf>,
    pub colors: usize,
    pub population: usize,
    pub repetition: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunResult {
    pub id: u32,
    pub time_ms: f32,
    pub success: bool,
    pub nodes: usize,
    pub edges: usize,
    pub constraints: usize,
}

impl RunResult {
    pub fn to_csv(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.id, self.time_ms, self.success as u8, self.nodes, self.edges, self.constraints
        )
    }
}

/// Parses a plan line. Lines that are malformed, ask for no colors, or ask
/// a GA for an empty population yield `None`.
pub fn parse_bench_line(line: &str) -> Option<BenchRun> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    if fields.len() != 7 {
        return None;
    }

    let algorithm = match fields[1] {
        "g" | "e" | "h" => fields[1].parse().ok()?,
        _ => return None,
    };
    let constraints_file = match fields[3] {
        "x" | "X" => None,
        "" => return None,
        path => Some(PathBuf::from(path)),
    };
    if fields[2].is_empty() {
        return None;
    }

    let run = BenchRun {
        id: fields[0].parse().ok()?,
        algorithm,
        graph_file: PathBuf::from(fields[2]),
        constraints_file,
        colors: fields[4].parse().ok()?,
        population: fields[5].parse().ok()?,
        repetition: fields[6].parse().ok()?,
    };

    if run.colors == 0 {
        return None;
    }
    if run.algorithm != Algorithm::Greedy && run.population == 0 {
        return None;
    }
    Some(run)
}

pub fn bench_run(run: &BenchRun, settings: &RunSettings, rng: &mut impl Rng) -> Result<RunResult> {
    let graph = load_graph(&run.graph_file, run.constraints_file.as_deref())?;

    let start = Instant::now();
    let coloring = color_graph(&graph, run.colors, run.algorithm, run.population, settings, rng)?;
    let elapsed = start.elapsed();

    Ok(RunResult {
        id: run.id,
        time_ms: elapsed.as_secs_f32() * 1000.0,
        success: is_correctly_colored(&graph, &coloring),
        nodes: graph.vertices(),
        edges: graph.edges(),
        constraints: graph.constraints(),
    })
}

/// Executes every plan line of `input`, appending one CSV row per
/// repetition to `output`, which is truncated first.
pub fn run_benchmark(
    input: &Path,
    output: &Path,
    settings: &RunSettings,
    rng: &mut impl Rng,
) -> Result<Vec<RunResult>> {
    let plan = File::open(input)
        .with_context(|| format!("cannot open benchmark plan {}", input.display()))?;
    File::create(output)
        .with_context(|| format!("cannot truncate {}", output.display()))?;

    let mut results = Vec::new();
    for (number, line) in BufReader::new(plan).lines().enumerate() {
        let line = line.with_context(|| format!("cannot read {}", input.display()))?;
        let run = match parse_bench_line(&line) {
            Some(run) => run,
            None => {
                warn!("skipping plan line {}: `{}`", number + 1, line);
                continue;
            }
        };

        let mut runs = Vec::with_capacity(run.repetition);
        for _ in 0..run.repetition {
            let result = bench_run(&run, settings, rng)
                .with_context(|| format!("benchmark {} failed", run.id))?;
            write_result(output, &result)?;
            runs.push(result);
        }
        summarize(&run, &runs);
        results.extend(runs);
    }

    Ok(results)
}

fn write_result(output: &Path, result: &RunResult) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(output)
        .with_context(|| format!("cannot append to {}", output.display()))?;
    writeln!(file, "{}", result.to_csv())?;
    Ok(())
}

fn summarize(run: &BenchRun, runs: &[RunResult]) {
    let fastest = runs.iter().min_by_key(|it| n32(it.time_ms));
    let slowest = runs.iter().max_by_key(|it| n32(it.time_ms));
    let successes = runs.iter().filter(|it| it.success).count();

    if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
        info!(
            "benchmark {} ({:?}, k={}): {}/{} proper, {:.3}..{:.3} ms",
            run.id, run.algorithm, run.colors, successes, runs.len(),
            fastest.time_ms, slowest.time_ms
        );
    }
}

/// Reads back a results file written by [`run_benchmark`].
pub fn read_results(path: &Path) -> Result<Vec<RunResult>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;

    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| -> Result<RunResult> {
            let fields: Vec<&str> = line.split(',').collect();
            anyhow::ensure!(fields.len() == 6, "expected 6 fields in `{}`", line);
            Ok(RunResult {
                id: fields[0].parse()?,
                time_ms: fields[1].parse()?,
                success: fields[2] == "1",
                nodes: fields[3].parse()?,
                edges: fields[4].parse()?,
                constraints: fields[5].parse()?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plan_lines() {
        assert_eq!(
            parse_bench_line("3,e,graphs/a.dot,x,4,20,5"),
            Some(BenchRun {
                id: 3,
                algorithm: Algorithm::Evolution,
                graph_file: PathBuf::from("graphs/a.dot"),
                constraints_file: None,
                colors: 4,
                population: 20,
                repetition: 5,
            })
        );

        let run = parse_bench_line("1,g,a.dot,c.txt,2,0,1").unwrap();
        assert_eq!(run.constraints_file, Some(PathBuf::from("c.txt")));
    }

    #[test]
    fn skips_bad_plan_lines() {
        assert_eq!(parse_bench_line("1,q,a.dot,x,2,0,1"), None);
        assert_eq!(parse_bench_line("1,g,a.dot,x,0,0,1"), None);
        assert_eq!(parse_bench_line("1,h,a.dot,x,3,0,1"), None);
        assert_eq!(parse_bench_line("1,g,a.dot,x,3,0"), None);
        assert_eq!(parse_bench_line("one,g,a.dot,x,3,0,1"), None);
    }

    #[test]
    fn formats_csv_rows() {
        let result = RunResult {
            id: 7,
            time_ms: 1.5,
            success: true,
            nodes: 10,
            edges: 15,
            constraints: 0,
        };
        assert_eq!(result.to_csv(), "7,1.5,1,10,15,0");
    }
}
