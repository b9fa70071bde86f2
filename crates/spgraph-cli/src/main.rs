#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;

use clap::{Parser, Subcommand};
use config::Config;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use serde::Serialize;
use spgraph_core::RelaxationCounters;
use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "spg: Bellman-Ford shortest paths, distance matrices, eccentricity and transitive closure",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print relaxation counters and elapsed time to stderr.
    #[arg(long, global = true)]
    stats: bool,

    /// Output format: pretty, text or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self, config: &Config) -> OutputMode {
        resolve_output_mode(self.format, self.json, config.output_format())
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Print a graph",
        long_about = "Load a graph description file, check it, and print it as DOT.",
        after_help = "EXAMPLES:\n    # Print a graph as DOT\n    spg show graph.txt\n\n    # Emit machine-readable output\n    spg show graph.txt --json"
    )]
    Show(cmd::GraphFileArgs),

    #[command(
        about = "Single-source shortest paths",
        long_about = "Run Bellman-Ford from one source, or from every vertex when --source is omitted, and print the shortest-path trees.",
        after_help = "EXAMPLES:\n    # Trees from every vertex\n    spg paths graph.txt\n\n    # One source, one target\n    spg paths graph.txt --source 0 --to 3"
    )]
    Paths(cmd::paths::PathsArgs),

    #[command(
        about = "All-pairs shortest distances",
        long_about = "Print the matrix of shortest distances between every ordered pair of vertices. Unreachable pairs print as INF."
    )]
    Distances(cmd::GraphFileArgs),

    #[command(
        about = "Eccentricity, radius, diameter and center",
        long_about = "Print every vertex's eccentricity (- when undefined), the radius, the diameter and the central vertices."
    )]
    Eccentricity(cmd::GraphFileArgs),

    #[command(
        about = "Transitive closure",
        long_about = "Print the transitive closure of a directed, unweighted graph as DOT."
    )]
    Closure(cmd::GraphFileArgs),

    #[command(
        about = "Pick graph files from a numbered menu",
        long_about = "List the graph files in a directory and run an analysis on each chosen file until `exit` or end of input.",
        after_help = "EXAMPLES:\n    # Shortest-path trees for files in ./graphs\n    spg menu graphs\n\n    # Distance matrices instead\n    spg menu graphs --analysis distances"
    )]
    Menu(cmd::menu::MenuArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SPGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "spgraph=debug,info"
        } else {
            "spgraph=info,warn"
        })
    });

    let format = env::var("SPGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

#[derive(Debug, Serialize)]
struct StatsReport {
    command: &'static str,
    elapsed_us: u128,
    #[serde(flatten)]
    counters: RelaxationCounters,
}

impl StatsReport {
    fn display_table(&self) -> String {
        let c = &self.counters;
        format!(
            "command      {}\nelapsed      {:?}\nruns         {}\nrounds       {}\nedge scans   {}\nrelaxations  {}\nearly exits  {}\nneg. cycles  {}",
            self.command,
            Duration::from_micros(u64::try_from(self.elapsed_us).unwrap_or(u64::MAX)),
            c.runs,
            c.rounds,
            c.edge_scans,
            c.relaxations,
            c.early_exits,
            c.negative_cycles,
        )
    }
}

const fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Show(_) => "show",
        Commands::Paths(_) => "paths",
        Commands::Distances(_) => "distances",
        Commands::Eccentricity(_) => "eccentricity",
        Commands::Closure(_) => "closure",
        Commands::Menu(_) => "menu",
    }
}

fn run_command(
    command: &Commands,
    config: &Config,
    project_root: &Path,
    output: OutputMode,
    counters: &mut RelaxationCounters,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match command {
        Commands::Show(args) => cmd::show::run_show(args, output, &mut out),
        Commands::Paths(args) => cmd::paths::run_paths(args, output, counters, &mut out),
        Commands::Distances(args) => {
            cmd::distances::run_distances(args, output, counters, &mut out)
        }
        Commands::Eccentricity(args) => {
            cmd::eccentricity::run_eccentricity(args, output, counters, &mut out)
        }
        Commands::Closure(args) => cmd::closure::run_closure(args, output, counters, &mut out),
        Commands::Menu(args) => {
            let stdin = io::stdin();
            cmd::menu::run_menu(
                args,
                config,
                project_root,
                output,
                counters,
                &mut stdin.lock(),
                &mut out,
            )
        }
    };

    out.flush()?;
    result
}

fn emit_stats(output: OutputMode, report: &StatsReport) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut err = stderr.lock();
    if output.is_json() {
        serde_json::to_writer_pretty(&mut err, report)?;
        writeln!(err)?;
    } else {
        writeln!(err, "stats:")?;
        writeln!(err, "{}", report.display_table())?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let loaded = env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|root| config::load_config(&root).map(|config| (root, config)));

    let (project_root, config, result) = match loaded {
        Ok((root, config)) => (root, config, Ok(())),
        Err(err) => (Path::new(".").to_path_buf(), Config::default(), Err(err)),
    };
    let output = cli.output_mode(&config);
    debug!(?output, "output mode resolved");

    let mut counters = RelaxationCounters::default();
    let started = Instant::now();
    let result = result.and_then(|()| {
        run_command(&cli.command, &config, &project_root, output, &mut counters)
    });

    if cli.stats {
        let report = StatsReport {
            command: command_name(&cli.command),
            elapsed_us: started.elapsed().as_micros(),
            counters,
        };
        if let Err(err) = emit_stats(output, &report) {
            eprintln!("error: failed to write stats: {err:#}");
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if render_error(output, &CliError::from(&err)).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_flag_parses_before_subcommand() {
        let cli = Cli::parse_from(["spg", "--stats", "distances", "g.txt"]);
        assert!(cli.stats);
        assert!(matches!(cli.command, Commands::Distances(_)));
    }

    #[test]
    fn stats_flag_parses_after_subcommand() {
        let cli = Cli::parse_from(["spg", "closure", "g.txt", "--stats"]);
        assert!(cli.stats);
    }

    #[test]
    fn format_flag_parses() {
        let cli = Cli::parse_from(["spg", "show", "g.txt", "--format", "text"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
    }

    #[test]
    fn json_flag_sets_output_mode() {
        let cli = Cli::parse_from(["spg", "--json", "eccentricity", "g.txt"]);
        assert!(cli.json);
        assert!(cli.output_mode(&Config::default()).is_json());
    }

    #[test]
    fn paths_options_parse() {
        let cli = Cli::parse_from(["spg", "paths", "g.txt", "--source", "2", "--to", "4"]);
        let Commands::Paths(args) = cli.command else {
            panic!("expected paths");
        };
        assert_eq!(args.source, Some(2));
        assert_eq!(args.to, Some(4));
    }

    #[test]
    fn to_requires_source() {
        let err = Cli::try_parse_from(["spg", "paths", "g.txt", "--to", "4"]);
        assert!(err.is_err());
    }

    #[test]
    fn menu_defaults_to_paths() {
        let cli = Cli::parse_from(["spg", "menu"]);
        let Commands::Menu(args) = cli.command else {
            panic!("expected menu");
        };
        assert_eq!(args.analysis, cmd::Analysis::Paths);
        assert!(args.dir.is_none());
    }

    #[test]
    fn stats_table_lists_counters() {
        let report = StatsReport {
            command: "paths",
            elapsed_us: 1500,
            counters: RelaxationCounters {
                runs: 3,
                ..RelaxationCounters::default()
            },
        };
        let table = report.display_table();
        assert!(table.contains("command      paths"));
        assert!(table.contains("runs         3"));
    }
}
