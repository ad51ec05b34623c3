use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use kcolor::{Color, Graph};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("line {line}: {reason}")]
    Syntax { line: usize, reason: String },

    #[error("line {line}: vertex {vertex} is not in the graph")]
    UnknownVertex { line: usize, vertex: usize },
}

/// Reads a graph from the `A -- B` edge list format, optionally followed by
/// a `V: C` constraint file.
pub fn load_graph(graph_file: &Path, constraints_file: Option<&Path>) -> Result<Graph> {
    let text = fs::read_to_string(graph_file)
        .with_context(|| format!("cannot read graph {}", graph_file.display()))?;
    let mut graph = parse_graph(&text)
        .with_context(|| format!("malformed graph {}", graph_file.display()))?;

    if let Some(path) = constraints_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read constraints {}", path.display()))?;
        parse_constraints(&mut graph, &text)
            .with_context(|| format!("malformed constraints {}", path.display()))?;
    }

    Ok(graph)
}

pub fn parse_graph(text: &str) -> Result<Graph, LoadError> {
    let mut edges = Vec::new();
    let mut vertices = 0;
    let mut widest_line = 0;

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if is_decoration(line) {
            continue;
        }

        let mut parts = line.splitn(2, "--");
        let (a, b) = match (parts.next(), parts.next()) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(syntax(number, "expected `A -- B`")),
        };
        let a = parse_number(a, number)?;
        let b = parse_number(b, number)?;
        if a == b {
            return Err(syntax(number, "self-loops are not allowed"));
        }

        let count = a
            .max(b)
            .checked_add(1)
            .ok_or_else(|| syntax(number, "vertex number out of range"))?;
        if count > vertices {
            vertices = count;
            widest_line = number;
        }
        edges.push((a, b));
    }

    // Every vertex of an edge list touches an edge.
    if vertices > 2 * edges.len() {
        return Err(LoadError::UnknownVertex { line: widest_line + 1, vertex: vertices - 1 });
    }

    let mut graph = Graph::new(vertices);
    for (a, b) in edges {
        graph.add_edge(a, b);
    }
    Ok(graph)
}

pub fn parse_constraints(graph: &mut Graph, text: &str) -> Result<(), LoadError> {
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if is_decoration(line) {
            continue;
        }

        let mut parts = line.splitn(2, ':');
        let (vertex, colors) = match (parts.next(), parts.next()) {
            (Some(vertex), Some(colors)) => (vertex, colors),
            _ => return Err(syntax(number, "expected `V: C`")),
        };

        let vertex = parse_number(vertex, number)?;
        if vertex >= graph.vertices() {
            return Err(LoadError::UnknownVertex { line: number + 1, vertex });
        }

        for color in colors.split(',') {
            let color: Color = parse_number(color, number)?;
            graph.add_constraint(vertex, color);
        }
    }

    Ok(())
}

fn is_decoration(line: &str) -> bool {
    line.is_empty()
        || line.starts_with('#')
        || line.starts_with("//")
        || line.ends_with('{')
        || line == "}"
}

fn parse_number(text: &str, line: usize) -> Result<usize, LoadError> {
    let text = text.trim().trim_end_matches(';');
    text.parse()
        .map_err(|_| syntax(line, &format!("`{}` is not a vertex number", text)))
}

fn syntax(line: usize, reason: &str) -> LoadError {
    LoadError::Syntax {
        line: line + 1,
        reason: reason.to_owned(),
    }
}
