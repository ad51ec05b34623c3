use kcolor::{Coloring, Graph};

/// Renders a colored graph as DOT. Every color maps to a hue in `[0, 1)`;
/// unassigned vertices are left unfilled.
pub fn render_dot(name: &str, graph: &Graph, coloring: &Coloring) -> String {
    let hue_step = 1.0 / graph.vertices().max(1) as f32;
    let mut dot = String::new();

    dot.push_str(&format!("strict graph {} {{\n", name));
    for v in 0..graph.vertices() {
        match coloring.get(v) {
            Some(color) => {
                dot.push_str(&format!(
                    "\t{} [style=\"filled\"; fillcolor=\"{} 1.0 1.0\"]\n",
                    v,
                    color as f32 * hue_step
                ));
            }
            None => {
                dot.push_str(&format!("\t{}\n", v));
            }
        }
    }
    for v in 0..graph.vertices() {
        for &u in graph.neighbors(v) {
            if v < u {
                dot.push_str(&format!("\t{} -- {}\n", v, u));
            }
        }
    }
    dot.push_str("}\n");

    dot
}

/// Writes the plain edge list format the loader reads back.
pub fn render_edge_list(graph: &Graph) -> String {
    let mut text = String::from("graph g {\n");
    for v in 0..graph.vertices() {
        for &u in graph.neighbors(v) {
            if v < u {
                text.push_str(&format!("\t{} -- {}\n", v, u));
            }
        }
    }
    text.push_str("}\n");
    text
}
