//! `spg menu` — interactive numeric picker over a directory of graph files.
//!
//! Lists the matching files (sorted by name), then reads one choice per
//! line: a number runs the selected analysis on that file, `exit` or end of
//! input stops. Invalid choices and failing analyses are reported and the
//! menu keeps going.

use anyhow::{Context, bail};
use clap::Args;
use spgraph_core::Probe;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{Analysis, run_analysis};
use crate::config::Config;
use crate::output::{CliError, OutputMode, pretty_section, write_error};

#[derive(Args, Debug, Clone)]
pub struct MenuArgs {
    /// Directory holding graph files. Defaults to `[menu] samples_dir`.
    pub dir: Option<PathBuf>,

    /// Analysis to run on the chosen file.
    #[arg(long, short, value_enum, default_value_t = Analysis::Paths)]
    pub analysis: Analysis,

    /// File extension to list. Defaults to `[menu] extension` or `txt`.
    #[arg(long)]
    pub extension: Option<String>,
}

/// Files in `dir` with extension `ext`, sorted by file name.
pub fn list_samples(dir: &Path, ext: &str) -> anyhow::Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read sample directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == ext) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

enum Choice {
    Exit,
    Skip,
    File(usize),
    Invalid(String),
}

fn parse_choice(line: &str, count: usize) -> Choice {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Choice::Skip;
    }
    if trimmed.eq_ignore_ascii_case("exit") {
        return Choice::Exit;
    }
    match trimmed.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Choice::File(n - 1),
        _ => Choice::Invalid(trimmed.to_string()),
    }
}

fn write_listing(out: &mut dyn Write, files: &[PathBuf]) -> std::io::Result<()> {
    pretty_section(out, "Graph files")?;
    for (i, file) in files.iter().enumerate() {
        let name = file
            .file_name()
            .map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned());
        writeln!(out, "{:>3}. {name}", i + 1)?;
    }
    Ok(())
}

/// Execute `spg menu`, reading choices from `input`.
///
/// # Errors
///
/// Returns an error if the sample directory cannot be read or holds no
/// matching files, or if reading input or writing output fails. Errors of
/// individual analyses are reported inline and do not end the menu.
pub fn run_menu(
    args: &MenuArgs,
    config: &Config,
    project_root: &Path,
    output: OutputMode,
    probe: &mut dyn Probe,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let dir = args
        .dir
        .as_ref()
        .map_or_else(|| config.samples_dir(project_root), |d| project_root.join(d));
    let ext = args
        .extension
        .as_deref()
        .map_or_else(|| config.extension(), |e| e.trim_start_matches('.'));

    let files = list_samples(&dir, ext)?;
    if files.is_empty() {
        bail!("no *.{ext} files in {}", dir.display());
    }
    debug!(dir = %dir.display(), files = files.len(), "menu ready");

    let interactive = !output.is_json();
    if interactive {
        write_listing(out, &files)?;
    }

    let mut line = String::new();
    loop {
        if interactive {
            write!(
                out,
                "\nSelect a graph (1-{}) or type 'exit' to quit: ",
                files.len()
            )?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            if interactive {
                writeln!(out)?;
            }
            break;
        }

        match parse_choice(&line, files.len()) {
            Choice::Exit => break,
            Choice::Skip => {}
            Choice::Invalid(raw) => {
                write_error(
                    out,
                    output,
                    &CliError::new(format!(
                        "invalid choice `{raw}`: select a number between 1 and {}",
                        files.len()
                    )),
                )?;
            }
            Choice::File(index) => {
                let file = &files[index];
                if interactive {
                    writeln!(out)?;
                    pretty_section(out, &file.display().to_string())?;
                }
                if let Err(err) = run_analysis(args.analysis, file, output, probe, out) {
                    warn!(file = %file.display(), error = %err, "analysis failed");
                    write_error(out, output, &CliError::from(&err))?;
                }
            }
        }
    }

    Ok(())
}
