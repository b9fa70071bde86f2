//! `spg paths` — single-source shortest paths.
//!
//! With `--source`, one Bellman-Ford run; any failure fails the command.
//! Without it, one run per vertex in id order, and a failing source is
//! reported in place while the remaining sources still run.

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use spgraph_core::{
    GraphError, Probe, ShortestPathResult, VertexId, Weight, bellman_ford_with_probe,
};
use std::io::{self, Write};
use tracing::warn;

use super::{GraphFileArgs, load_graph};
use crate::output::{CliError, OutputMode, format_distance, pretty_section, render_mode};

#[derive(Args, Debug, Clone)]
pub struct PathsArgs {
    #[command(flatten)]
    pub graph: GraphFileArgs,

    /// Source vertex. Runs from every vertex when omitted.
    #[arg(long, short)]
    pub source: Option<VertexId>,

    /// Print the single shortest path to this vertex instead of the tree.
    #[arg(long, requires = "source")]
    pub to: Option<VertexId>,
}

/// Outcome for one source in the per-source listing.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SourcePaths {
    Solved(ShortestPathResult),
    Failed { source: VertexId, error: CliError },
}

/// Single path as returned by `--to`.
#[derive(Debug, Serialize)]
pub struct PathReport {
    pub source: VertexId,
    pub target: VertexId,
    /// `None` when the target is unreachable.
    pub distance: Option<Weight>,
    /// Vertex sequence from source to target; empty when unreachable.
    pub path: Vec<VertexId>,
}

impl PathReport {
    fn new(result: &ShortestPathResult, target: VertexId) -> Self {
        Self {
            source: result.source(),
            target,
            distance: result.distance(target),
            path: result.path_to(target),
        }
    }
}

/// Execute `spg paths <file> [--source N] [--to W]`.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, an explicit `--source` run
/// fails, `--to` is out of range, or output rendering fails.
pub fn run_paths(
    args: &PathsArgs,
    output: OutputMode,
    probe: &mut dyn Probe,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let graph = load_graph(&args.graph.file)?;

    if let Some(source) = args.source {
        let result = bellman_ford_with_probe(&graph, source, probe)
            .with_context(|| format!("shortest paths from vertex {source} failed"))?;

        if let Some(target) = args.to {
            if target >= graph.vertex_count() {
                return Err(GraphError::VertexOutOfRange {
                    vertex: target,
                    vertex_count: graph.vertex_count(),
                })
                .context("invalid --to vertex");
            }
            let report = PathReport::new(&result, target);
            return render_mode(out, output, &report, render_path_text, render_path_human);
        }

        let listing = [SourcePaths::Solved(result)];
        return render_mode(
            out,
            output,
            listing.as_slice(),
            render_trees_text,
            render_trees_human,
        );
    }

    let listing: Vec<SourcePaths> = (0..graph.vertex_count())
        .map(|source| match bellman_ford_with_probe(&graph, source, probe) {
            Ok(result) => SourcePaths::Solved(result),
            Err(err) => {
                warn!(source, error = %err, "source failed; continuing with the next one");
                SourcePaths::Failed {
                    source,
                    error: CliError::from(&err),
                }
            }
        })
        .collect();

    render_mode(
        out,
        output,
        listing.as_slice(),
        render_trees_text,
        render_trees_human,
    )
}

fn tree_dot(result: &ShortestPathResult) -> io::Result<String> {
    result
        .to_tree_graph()
        .map(|tree| tree.to_dot())
        .map_err(io::Error::other)
}

fn render_trees_text(listing: &[SourcePaths], w: &mut dyn Write) -> io::Result<()> {
    for entry in listing {
        match entry {
            SourcePaths::Solved(result) => {
                writeln!(w, "// source {}", result.source())?;
                write!(w, "{}", tree_dot(result)?)?;
            }
            SourcePaths::Failed { source, error } => {
                writeln!(w, "// source {source}: error: {}", error.message)?;
            }
        }
    }
    Ok(())
}

fn render_trees_human(listing: &[SourcePaths], w: &mut dyn Write) -> io::Result<()> {
    for (i, entry) in listing.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        match entry {
            SourcePaths::Solved(result) => {
                pretty_section(w, &format!("Shortest paths from {}", result.source()))?;
                writeln!(w, "{:>8}  {:>10}  {:>11}", "vertex", "distance", "predecessor")?;
                for v in 0..result.vertex_count() {
                    let pred = result
                        .predecessor(v)
                        .map_or_else(|| "-".to_string(), |p| p.to_string());
                    writeln!(
                        w,
                        "{v:>8}  {:>10}  {pred:>11}",
                        format_distance(result.distance(v))
                    )?;
                }
                writeln!(w, "rounds: {}", result.rounds())?;
                writeln!(w)?;
                write!(w, "{}", tree_dot(result)?)?;
            }
            SourcePaths::Failed { source, error } => {
                pretty_section(w, &format!("Shortest paths from {source}"))?;
                writeln!(w, "error: {}", error.message)?;
                if let Some(ref suggestion) = error.suggestion {
                    writeln!(w, "  suggestion: {suggestion}")?;
                }
            }
        }
    }
    Ok(())
}

fn path_line(report: &PathReport) -> String {
    report
        .path
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn render_path_text(report: &PathReport, w: &mut dyn Write) -> io::Result<()> {
    if report.path.is_empty() {
        writeln!(w, "INF")
    } else {
        writeln!(w, "{} {}", format_distance(report.distance), path_line(report))
    }
}

fn render_path_human(report: &PathReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(
        w,
        &format!("Shortest path {} -> {}", report.source, report.target),
    )?;
    if report.path.is_empty() {
        writeln!(w, "vertex {} is unreachable", report.target)
    } else {
        writeln!(w, "distance: {}", format_distance(report.distance))?;
        writeln!(w, "path:     {}", path_line(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spgraph_core::{Graph, bellman_ford};

    fn diamond() -> Graph {
        let mut g = Graph::weighted_directed(4);
        g.add_weighted_edge(0, 1, 4).expect("valid edge");
        g.add_weighted_edge(0, 2, 1).expect("valid edge");
        g.add_weighted_edge(2, 1, 1).expect("valid edge");
        g.add_weighted_edge(1, 3, 1).expect("valid edge");
        g
    }

    #[test]
    fn path_report_follows_predecessors() {
        let result = bellman_ford(&diamond(), 0).expect("no cycles");
        let report = PathReport::new(&result, 3);
        assert_eq!(report.path, vec![0, 2, 1, 3]);
        assert_eq!(report.distance, Some(3));

        let mut buf = Vec::new();
        render_path_text(&report, &mut buf).expect("render");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "3 0 -> 2 -> 1 -> 3\n");
    }

    #[test]
    fn unreachable_target_prints_inf() {
        let result = bellman_ford(&diamond(), 3).expect("no cycles");
        let report = PathReport::new(&result, 0);
        assert!(report.path.is_empty());

        let mut buf = Vec::new();
        render_path_text(&report, &mut buf).expect("render");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "INF\n");
    }

    #[test]
    fn failed_source_serializes_with_error() {
        let entry = SourcePaths::Failed {
            source: 1,
            error: CliError::from(&GraphError::NegativeCycle { start: 1 }),
        };
        let value = serde_json::to_value(&entry).expect("serializable");
        assert_eq!(value["source"], 1);
        assert_eq!(value["error"]["error_code"], "E2001");
    }
}
