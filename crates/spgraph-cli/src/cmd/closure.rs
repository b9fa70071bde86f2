//! `spg closure` — transitive closure of a directed, unweighted graph.

use anyhow::Context;
use serde::Serialize;
use spgraph_core::{Graph, Probe, VertexId, transitive_closure_with_probe};
use std::io::{self, Write};

use super::{GraphFileArgs, load_graph};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Closure as returned in JSON output.
#[derive(Debug, Serialize)]
pub struct ClosureReport {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub edges: Vec<(VertexId, VertexId)>,
    #[serde(skip)]
    pub dot: String,
}

impl ClosureReport {
    pub fn from_graph(closure: &Graph) -> Self {
        Self {
            vertex_count: closure.vertex_count(),
            edge_count: closure.edge_count(),
            edges: closure.edges().map(|(from, e)| (from, e.to)).collect(),
            dot: closure.to_dot(),
        }
    }
}

/// Execute `spg closure <file>`.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, the graph is undirected or
/// weighted, or output rendering fails.
pub fn run_closure(
    args: &GraphFileArgs,
    output: OutputMode,
    probe: &mut dyn Probe,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let graph = load_graph(&args.file)?;
    let closure = transitive_closure_with_probe(&graph, probe).with_context(|| {
        format!("transitive closure of {} failed", args.file.display())
    })?;
    let report = ClosureReport::from_graph(&closure);

    render_mode(
        out,
        output,
        &report,
        |r, w| write!(w, "{}", r.dot),
        render_closure_human,
    )
}

fn render_closure_human(report: &ClosureReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Transitive closure")?;
    pretty_kv(w, "Vertices", report.vertex_count.to_string())?;
    pretty_kv(w, "Edges", report.edge_count.to_string())?;
    writeln!(w)?;
    write!(w, "{}", report.dot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spgraph_core::transitive_closure;

    #[test]
    fn report_lists_closure_edges() {
        let mut g = Graph::directed(3);
        g.add_edge(0, 1).expect("valid edge");
        g.add_edge(1, 2).expect("valid edge");
        let report = ClosureReport::from_graph(&transitive_closure(&g).expect("valid input"));

        assert_eq!(report.edges, vec![(0, 1), (0, 2), (1, 2)]);
        assert!(report.dot.contains("0 -> 2"));
        let value = serde_json::to_value(&report).expect("serializable");
        assert_eq!(value["edges"][1], serde_json::json!([0, 2]));
    }
}
