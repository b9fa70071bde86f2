//! `spg show` — load a graph description and print it.

use serde::Serialize;
use spgraph_core::{Graph, VertexId, Weight};
use std::io::{self, Write};

use super::{GraphFileArgs, load_graph};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

#[derive(Debug, Serialize)]
pub struct ShowEdge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: Weight,
}

/// Graph summary as returned in JSON output.
#[derive(Debug, Serialize)]
pub struct ShowGraph {
    pub directed: bool,
    pub weighted: bool,
    pub vertex_count: usize,
    pub edge_count: usize,
    /// Each undirected edge appears once, with `from < to`.
    pub edges: Vec<ShowEdge>,
    #[serde(skip)]
    pub dot: String,
}

impl ShowGraph {
    pub fn from_graph(graph: &Graph) -> Self {
        let edges = graph
            .edges()
            .filter(|(from, e)| graph.is_directed() || *from < e.to)
            .map(|(from, e)| ShowEdge {
                from,
                to: e.to,
                weight: e.weight,
            })
            .collect();

        Self {
            directed: graph.is_directed(),
            weighted: graph.is_weighted(),
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            edges,
            dot: graph.to_dot(),
        }
    }
}

/// Execute `spg show <file>`.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or output rendering fails.
pub fn run_show(
    args: &GraphFileArgs,
    output: OutputMode,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let graph = load_graph(&args.file)?;
    let report = ShowGraph::from_graph(&graph);

    render_mode(
        out,
        output,
        &report,
        |r, w| write!(w, "{}", r.dot),
        render_show_human,
    )
}

fn render_show_human(report: &ShowGraph, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Graph")?;
    pretty_kv(
        w,
        "Kind",
        match (report.directed, report.weighted) {
            (true, true) => "directed, weighted",
            (true, false) => "directed, unweighted",
            (false, true) => "undirected, weighted",
            (false, false) => "undirected, unweighted",
        },
    )?;
    pretty_kv(w, "Vertices", report.vertex_count.to_string())?;
    pretty_kv(w, "Edges", report.edge_count.to_string())?;
    writeln!(w)?;
    pretty_section(w, "DOT")?;
    write!(w, "{}", report.dot)
}
