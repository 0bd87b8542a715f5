mod config;
mod store;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::Settings;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tessellate_core::{
    Candidate, Catalog, CatalogVariant, Grid, SearchOutcome, Strategy, TessellationSolver,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "tessellate", about = "Tiling solver for grid puzzles", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Operation catalog to search
    #[arg(long, value_enum, global = true)]
    catalog: Option<CatalogArg>,

    /// Stop a search after this many candidates
    #[arg(long, global = true)]
    max_candidates: Option<u64>,

    /// Stop a search after this many seconds
    #[arg(long, global = true, value_parser = parse_seconds)]
    time_limit: Option<Duration>,

    /// Solution cache file
    #[arg(long, global = true)]
    cache_file: Option<PathBuf>,

    /// Neither load nor save the solution cache
    #[arg(long, global = true)]
    no_persist: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether the tessellation gate accepts each task
    Detect {
        /// Task JSON files (resolved under the data directory if missing)
        #[arg(required = true)]
        tasks: Vec<PathBuf>,
    },
    /// Search each accepted task and print predictions as JSON
    Solve {
        #[arg(required = true)]
        tasks: Vec<PathBuf>,
        /// Write predictions here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write predictions to the output directory
        #[arg(long, conflicts_with = "output")]
        submit: bool,
    },
    /// Show catalog sizes
    Catalog,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CatalogArg {
    Standard,
    Legacy,
}

impl From<CatalogArg> for CatalogVariant {
    fn from(arg: CatalogArg) -> Self {
        match arg {
            CatalogArg::Standard => CatalogVariant::Standard,
            CatalogArg::Legacy => CatalogVariant::Legacy,
        }
    }
}

/// One task's entry in the prediction report.
#[derive(Debug, Serialize)]
struct TaskReport {
    outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidate: Option<Candidate>,
    /// One entry per test input; `null` where applying failed
    predictions: Vec<Option<Grid>>,
}

fn main() {
    let cli = Cli::parse();
    let settings = apply_flags(Settings::detect(), &cli);
    init_logging(cli.verbose, settings.environment.default_log_level());

    if let Err(e) = run(cli, settings) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8, default_level: &str) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Non-negative, finite seconds.
fn parse_seconds(arg: &str) -> Result<Duration, String> {
    let secs: f64 = arg
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", arg))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| format!("'{}' must be a finite, non-negative number of seconds", arg))
}

fn apply_flags(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(catalog) = cli.catalog {
        settings.catalog = catalog.into();
    }
    if let Some(max) = cli.max_candidates {
        settings.budget = settings.budget.with_max_candidates(max);
    }
    if let Some(limit) = cli.time_limit {
        settings.budget = settings.budget.with_time_limit(limit);
    }
    if let Some(path) = &cli.cache_file {
        settings.cache_file = Some(path.clone());
    }
    if cli.no_persist {
        settings.cache_file = None;
    }
    settings
}

fn run(cli: Cli, settings: Settings) -> Result<()> {
    match cli.command {
        Commands::Detect { tasks } => detect(&settings, &tasks),
        Commands::Solve {
            tasks,
            output,
            submit,
        } => {
            let output = if submit {
                Some(settings.layout.output_dir.join("predictions.json"))
            } else {
                output
            };
            solve(&settings, &tasks, output.as_deref())
        }
        Commands::Catalog => {
            print_catalogs();
            Ok(())
        }
    }
}

fn detect(settings: &Settings, tasks: &[PathBuf]) -> Result<()> {
    let solver = TessellationSolver::with_catalog(settings.catalog);
    for arg in tasks {
        let task = store::load_task(&settings.layout.resolve_task(arg))?;
        let verdict = if solver.detect(&task) { "accepted" } else { "rejected" };
        println!("{}\t{}", task.id(), verdict);
    }
    Ok(())
}

fn solve(settings: &Settings, tasks: &[PathBuf], output: Option<&Path>) -> Result<()> {
    let cache = settings
        .cache_file
        .as_deref()
        .map(store::load_cache)
        .unwrap_or_default();
    let mut solver = TessellationSolver::with_catalog(settings.catalog)
        .with_budget(settings.budget)
        .with_cache(cache);

    let mut reports = BTreeMap::new();
    for arg in tasks {
        let task = store::load_task(&settings.layout.resolve_task(arg))?;
        if !solver.detect(&task) {
            info!(task = task.id(), "skipped by gate");
            reports.insert(
                task.id().to_owned(),
                TaskReport {
                    outcome: "rejected".to_owned(),
                    candidate: None,
                    predictions: Vec::new(),
                },
            );
            continue;
        }

        let outcome = solver.search(&task);
        let predictions = match outcome {
            SearchOutcome::Solved(_) => solver
                .predict(&task)
                .into_iter()
                .enumerate()
                .map(|(index, prediction)| match prediction {
                    Ok(grid) => Some(grid),
                    Err(err) => {
                        warn!(task = task.id(), index, %err, "prediction failed");
                        None
                    }
                })
                .collect(),
            _ => Vec::new(),
        };
        reports.insert(
            task.id().to_owned(),
            TaskReport {
                outcome: outcome.to_string(),
                candidate: solver.cached(&task).copied(),
                predictions,
            },
        );
    }

    let stats = solver.stats();
    info!(
        candidates = stats.candidates,
        trials = stats.trials,
        failures = stats.failures,
        solved = stats.solved,
        "search finished"
    );

    if let Some(path) = settings.cache_file.as_deref() {
        store::save_cache(path, &solver.snapshot())?;
    }

    let json = serde_json::to_string_pretty(&reports)?;
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn print_catalogs() {
    for variant in [CatalogVariant::Standard, CatalogVariant::Legacy] {
        let catalog = Catalog::get(variant);
        println!(
            "{}: {} preprocess, {} transform, {} query entries; {} candidates",
            variant,
            catalog.preprocess.len(),
            catalog.transform.len(),
            catalog.query.len(),
            catalog.candidate_count()
        );
    }
}
