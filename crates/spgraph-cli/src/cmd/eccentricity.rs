//! `spg eccentricity` — eccentricity, radius, diameter and center.

use anyhow::Context;
use spgraph_core::{EccentricityReport, Probe, Weight, eccentricity_with_probe};
use std::io::{self, Write};

use super::{GraphFileArgs, load_graph};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

fn measure(value: Option<Weight>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn center_line(report: &EccentricityReport) -> String {
    report
        .central_vertices()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Execute `spg eccentricity <file>`.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, any source reaches a
/// negative cycle, or output rendering fails.
pub fn run_eccentricity(
    args: &GraphFileArgs,
    output: OutputMode,
    probe: &mut dyn Probe,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let graph = load_graph(&args.file)?;
    let report = eccentricity_with_probe(&graph, probe).with_context(|| {
        format!("eccentricity of {} failed", args.file.display())
    })?;

    render_mode(
        out,
        output,
        &report,
        render_eccentricity_text,
        render_eccentricity_human,
    )
}

fn render_eccentricity_text(report: &EccentricityReport, w: &mut dyn Write) -> io::Result<()> {
    for (v, e) in report.eccentricities().iter().enumerate() {
        writeln!(w, "{v} {}", measure(*e))?;
    }
    writeln!(w, "radius {}", measure(report.radius()))?;
    writeln!(w, "diameter {}", measure(report.diameter()))?;
    writeln!(w, "center {}", center_line(report))
}

fn render_eccentricity_human(report: &EccentricityReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Eccentricity")?;
    writeln!(w, "{:>8}  {:>12}", "vertex", "eccentricity")?;
    for (v, e) in report.eccentricities().iter().enumerate() {
        let marker = if report.is_central(v) { "  *" } else { "" };
        writeln!(w, "{v:>8}  {:>12}{marker}", measure(*e))?;
    }
    writeln!(w)?;
    pretty_kv(w, "Radius", measure(report.radius()))?;
    pretty_kv(w, "Diameter", measure(report.diameter()))?;
    let center = center_line(report);
    pretty_kv(
        w,
        "Center",
        if center.is_empty() { "(none)" } else { center.as_str() },
    )
}
