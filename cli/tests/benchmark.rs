use std::fs;
use std::path::PathBuf;
use kcolor::is_correctly_colored;
use kcolor_cli::benchmark::{read_results, run_benchmark};
use kcolor_cli::loader::load_graph;
use kcolor_cli::run::{Algorithm, RunSettings, color_graph};
use rand::{SeedableRng, rngs::StdRng};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("kcolor-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const PATH_GRAPH: &str = "graph g {\n\t0 -- 1\n\t1 -- 2\n\t2 -- 3\n}\n";

#[test]
fn constrained_path_from_files() {
    let dir = scratch("constrained");
    let graph_file = dir.join("path.dot");
    let constraints_file = dir.join("path.txt");
    fs::write(&graph_file, PATH_GRAPH).unwrap();
    fs::write(&constraints_file, "0: 1\n").unwrap();

    let graph = load_graph(&graph_file, Some(constraints_file.as_path())).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let coloring = color_graph(&graph, 2, Algorithm::Greedy, 0, &RunSettings::default(), &mut rng)
        .unwrap();

    assert_eq!(coloring.get(0), Some(1));
    assert_ne!(coloring.get(1), Some(1));
    assert!(is_correctly_colored(&graph, &coloring));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn benchmark_writes_one_row_per_repetition() {
    let dir = scratch("bench");
    let graph_file = dir.join("path.dot");
    let constraints_file = dir.join("path.txt");
    let plan = dir.join("plan.csv");
    let output = dir.join("out.csv");
    fs::write(&graph_file, PATH_GRAPH).unwrap();
    fs::write(&constraints_file, "0: 1\n3: 0, 1\n").unwrap();
    fs::write(&output, "stale\n").unwrap();
    fs::write(&plan, format!(
        "1,g,{graph},x,2,0,2\n\
         not a plan line\n\
         2,h,{graph},{constraints},2,10,1\n\
         3,e,{graph},x,2,0,1\n",
        graph = graph_file.display(),
        constraints = constraints_file.display(),
    )).unwrap();

    let mut rng = StdRng::seed_from_u64(9);
    let results = run_benchmark(&plan, &output, &RunSettings::default(), &mut rng).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(read_results(&output).unwrap(), results);
    assert_eq!(results.iter().map(|it| it.id).collect::<Vec<_>>(), vec![1, 1, 2]);
    for result in &results {
        assert!(result.success);
        assert_eq!(result.nodes, 4);
        assert_eq!(result.edges, 3);
    }
    assert_eq!(results[2].constraints, 3);

    let _ = fs::remove_dir_all(dir);
}
