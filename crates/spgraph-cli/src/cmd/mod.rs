pub mod closure;
pub mod distances;
pub mod eccentricity;
pub mod menu;
pub mod paths;
pub mod show;

use anyhow::Context;
use clap::{Args, ValueEnum};
use spgraph_core::{Graph, Probe};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::output::OutputMode;

/// A single graph description file.
#[derive(Args, Debug, Clone)]
pub struct GraphFileArgs {
    /// Graph description file: `<directed> <weighted> <vertices> <edges>`
    /// followed by one `<from> <to> [<weight>]` line per edge.
    pub file: PathBuf,
}

/// Analyses selectable from `spg menu`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Analysis {
    Show,
    Paths,
    Distances,
    Eccentricity,
    Closure,
}

/// Load and validate a graph description file.
pub fn load_graph(path: &Path) -> anyhow::Result<Graph> {
    let graph = Graph::from_path(path)
        .with_context(|| format!("failed to load graph from {}", path.display()))?;
    graph
        .check_invariants()
        .with_context(|| format!("graph from {} is malformed", path.display()))?;
    Ok(graph)
}

/// Run `analysis` on `file` with default options, as `spg <analysis> <file>`
/// would.
pub fn run_analysis(
    analysis: Analysis,
    file: &Path,
    output: OutputMode,
    probe: &mut dyn Probe,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let args = GraphFileArgs {
        file: file.to_path_buf(),
    };
    match analysis {
        Analysis::Show => show::run_show(&args, output, out),
        Analysis::Paths => paths::run_paths(
            &paths::PathsArgs {
                graph: args,
                source: None,
                to: None,
            },
            output,
            probe,
            out,
        ),
        Analysis::Distances => distances::run_distances(&args, output, probe, out),
        Analysis::Eccentricity => eccentricity::run_eccentricity(&args, output, probe, out),
        Analysis::Closure => closure::run_closure(&args, output, probe, out),
    }
}
