//! `spg distances` — the all-pairs distance matrix.

use anyhow::Context;
use serde::Serialize;
use spgraph_core::{DistanceMatrix, Probe, Weight, all_pairs_with_probe};
use std::io::{self, Write};

use super::{GraphFileArgs, load_graph};
use crate::output::{OutputMode, format_distance, pretty_section, render_mode};

/// Matrix as returned in JSON output; unreachable cells are `null`.
#[derive(Debug, Serialize)]
pub struct DistancesReport {
    pub vertex_count: usize,
    pub distances: Vec<Vec<Option<Weight>>>,
}

impl DistancesReport {
    pub fn from_matrix(matrix: &DistanceMatrix) -> Self {
        Self {
            vertex_count: matrix.vertex_count(),
            distances: matrix.rows().map(<[Option<Weight>]>::to_vec).collect(),
        }
    }
}

/// Execute `spg distances <file>`.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, any source reaches a
/// negative cycle, or output rendering fails.
pub fn run_distances(
    args: &GraphFileArgs,
    output: OutputMode,
    probe: &mut dyn Probe,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let graph = load_graph(&args.file)?;
    let matrix = all_pairs_with_probe(&graph, probe).with_context(|| {
        format!(
            "all-pairs distances for {} failed",
            args.file.display()
        )
    })?;
    let report = DistancesReport::from_matrix(&matrix);

    render_mode(
        out,
        output,
        &report,
        render_distances_text,
        render_distances_human,
    )
}

fn render_distances_text(report: &DistancesReport, w: &mut dyn Write) -> io::Result<()> {
    for row in &report.distances {
        let cells: Vec<String> = row.iter().copied().map(format_distance).collect();
        writeln!(w, "{}", cells.join(" "))?;
    }
    Ok(())
}

fn render_distances_human(report: &DistancesReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(
        w,
        &format!("Distances ({} vertices)", report.vertex_count),
    )?;

    let width = report
        .distances
        .iter()
        .flatten()
        .map(|d| format_distance(*d).len())
        .chain(std::iter::once(report.vertex_count.to_string().len()))
        .max()
        .unwrap_or(1);

    write!(w, "{:>width$}", "")?;
    for col in 0..report.vertex_count {
        write!(w, "  {col:>width$}")?;
    }
    writeln!(w)?;

    for (v, row) in report.distances.iter().enumerate() {
        write!(w, "{v:>width$}")?;
        for cell in row {
            write!(w, "  {:>width$}", format_distance(*cell))?;
        }
        writeln!(w)?;
    }
    Ok(())
}
