use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use linkjail_core::bench::{BenchReport, run_sequential};
use linkjail_core::fixtures::{Anchor, reference_checker, replay};
use linkjail_core::{BoundarySet, EscapeChecker, JailConfig, JailPath};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// `check` exit status for an escape. Errors exit with 1, so the two stay distinct.
const ESCAPE_EXIT_CODE: u8 = 2;

/// Linkjail boundary escape checker
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Decides whether resolving one sandbox path to another leaves the boundary that governs it."
)]
struct Cli {
    /// Boundary configuration file (.toml or .json).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Boundary path. Repeatable; appended after the boundaries from --config.
    #[arg(short, long = "boundary", global = true)]
    boundaries: Vec<String>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide whether resolving FROM to TO escapes. Exits with status 2 on escape, 1 on error.
    Check {
        from: String,
        to: String,
        /// Print the decision as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the boundary governing PATH.
    BoundaryOf {
        path: String,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Load the configured boundaries and report whether they form a valid set.
    Validate,
    /// Time a workload over a number of sequential iterations.
    Bench {
        #[arg(short = 'n', long, default_value_t = 1000)]
        iterations: u64,

        #[arg(short, long, value_enum, default_value_t = Workload::EscapeSuite)]
        workload: Workload,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum Workload {
    /// Replay the reference escape table (ignores configured boundaries).
    EscapeSuite,
    /// Resolve a probe path below every configured boundary.
    BoundaryLookup,
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    from: &'a JailPath,
    to: &'a JailPath,
    boundary: &'a JailPath,
    escape: bool,
}

#[derive(Serialize)]
struct BoundaryOutput<'a> {
    path: &'a JailPath,
    boundary: &'a JailPath,
    registered: bool,
}

#[derive(Serialize)]
struct BenchOutput {
    workload: Workload,
    #[serde(flatten)]
    report: BenchReport,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.debug { "debug" } else { "info" };
    linkjail_core::utils::logging::init_logging(log_level, false)?;

    run(cli).await
}

#[instrument(skip_all)]
async fn run(cli: Cli) -> Result<ExitCode> {
    match &cli.command {
        Command::Check { from, to, json } => {
            let checker = EscapeChecker::new(load_boundaries(&cli)?);
            let from = parse_path(from)?;
            let to = parse_path(to)?;
            let boundary = checker.boundaries().boundary_of(&from);
            let escape = checker.is_escape(&from, &to);
            if *json {
                let output = CheckOutput {
                    from: &from,
                    to: &to,
                    boundary,
                    escape,
                };
                println!("{}", serde_json::to_string(&output)?);
            } else {
                println!("{}", if escape { "escape" } else { "contained" });
            }
            Ok(if escape {
                ExitCode::from(ESCAPE_EXIT_CODE)
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::BoundaryOf { path, json } => {
            let set = load_boundaries(&cli)?;
            let path = parse_path(path)?;
            let registered = set.registered_boundary_of(&path).is_some();
            let boundary = set.boundary_of(&path);
            if *json {
                let output = BoundaryOutput {
                    path: &path,
                    boundary,
                    registered,
                };
                println!("{}", serde_json::to_string(&output)?);
            } else if registered {
                println!("{boundary}");
            } else {
                println!("{boundary} (self)");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate => {
            let set = load_boundaries(&cli)?;
            info!("All {} boundaries are valid.", set.len());
            println!("{} boundaries are valid.", set.len());
            Ok(ExitCode::SUCCESS)
        }
        Command::Bench {
            iterations,
            workload,
            json,
        } => {
            let report = run_bench(&cli, *workload, *iterations).await?;
            if *json {
                let output = BenchOutput {
                    workload: *workload,
                    report,
                };
                println!("{}", serde_json::to_string(&output)?);
            } else {
                println!("{report}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn parse_path(text: &str) -> Result<JailPath> {
    JailPath::parse(text).with_context(|| format!("Invalid path argument '{text}'"))
}

fn load_boundaries(cli: &Cli) -> Result<BoundarySet> {
    let mut config = match &cli.config {
        Some(path) => JailConfig::load_from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => JailConfig::default(),
    };
    config.boundaries.extend(cli.boundaries.iter().cloned());
    debug!("Building boundary set from {} entries", config.boundaries.len());
    config
        .into_boundary_set()
        .context("Invalid boundary configuration")
}

async fn run_bench(cli: &Cli, workload: Workload, iterations: u64) -> Result<BenchReport> {
    info!(?workload, iterations, "Starting benchmark");
    match workload {
        Workload::EscapeSuite => {
            let checker = reference_checker(Anchor::Relative)?;
            run_sequential(iterations, || {
                let checker = checker.clone();
                async move {
                    replay(&checker)?;
                    Ok::<(), anyhow::Error>(())
                }
            })
            .await
        }
        Workload::BoundaryLookup => {
            let set = load_boundaries(cli)?;
            if set.is_empty() {
                return Err(anyhow!(
                    "The boundary-lookup workload needs at least one boundary (use --boundary or --config)"
                ));
            }
            let probes = set
                .iter()
                .map(|boundary| boundary.join("probe"))
                .collect::<linkjail_core::Result<Vec<_>>>()?;
            let probes = Arc::new(probes);
            let set = Arc::new(set);
            run_sequential(iterations, || {
                let set = Arc::clone(&set);
                let probes = Arc::clone(&probes);
                async move {
                    for probe in probes.iter() {
                        std::hint::black_box(set.boundary_of(probe));
                    }
                    Ok::<(), anyhow::Error>(())
                }
            })
            .await
        }
    }
}
