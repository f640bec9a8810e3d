#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use optreport_algos::ProjectedGradient;
use optreport_core::math::Scalar;
use optreport_core::options::SolveOptions;
use optreport_core::stats::ExecutionStats;
use optreport_core::status::format_statuses;
use optreport_core::traits::IterativeSolver;
use optreport_io::{read_json_problem, write_stats};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "optreport")]
#[command(version, about = "Solve reporting and iteration tables for optimisation solvers")]
struct Cli {
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered solver statuses.
    Statuses,
    /// Validate a problem file.
    Check {
        #[arg(long)]
        problem: PathBuf,
    },
    /// Solve a box-constrained QP with projected gradient.
    Solve {
        #[arg(long)]
        problem: PathBuf,
        #[arg(long)]
        tol: Option<f64>,
        #[arg(long)]
        max_iters: Option<usize>,
        #[arg(long)]
        time_limit: Option<u64>,
        #[arg(long)]
        log_every: Option<usize>,
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print the stats as JSON instead of the text summary.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_json);
    match cli.command {
        Commands::Statuses => {
            println!("{}", format_statuses());
            Ok(())
        }
        Commands::Check { problem } => check_command(problem),
        Commands::Solve {
            problem,
            tol,
            max_iters,
            time_limit,
            log_every,
            output,
            json,
        } => {
            let mut options = tol.map_or_else(SolveOptions::<Scalar>::default, |tolerance| {
                SolveOptions::with_tolerance(tolerance as Scalar)
            });
            if let Some(iters) = max_iters {
                options.max_iterations = iters;
            }
            if let Some(limit) = time_limit {
                options.max_time = Some(Duration::from_secs(limit));
            }
            if let Some(every) = log_every {
                options.log_every = every;
            }
            solve_command(problem, options, output, json)
        }
    }
}

fn initialize_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init()
            .ok();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
            .ok();
    }
}

fn solve_command(
    path: PathBuf,
    options: SolveOptions<Scalar>,
    output: Option<PathBuf>,
    output_json: bool,
) -> Result<()> {
    let problem = read_json_problem(&path)?.into_box_qp();
    debug!(nvars = problem.nvars(), path = ?path, "problem loaded");

    let mut stats = ExecutionStats::<Scalar>::new("unknown", problem.shape_hints())?;
    ProjectedGradient::new(options)
        .solve(&problem, &mut stats)
        .with_context(|| format!("failed to solve {:?}", path))?;

    if output_json {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        serde_json::to_writer_pretty(&mut handle, &stats)?;
        handle.write_all(b"\n")?;
        handle.flush()?;
    } else {
        println!("{stats}");
    }
    if let Some(path) = output {
        write_stats(path, &stats)?;
    }
    Ok(())
}

fn check_command(path: PathBuf) -> Result<()> {
    let problem = read_json_problem(&path)?.into_box_qp();
    problem.validate().context("box QP validation failed")?;
    let hints = problem.shape_hints();
    println!(
        "Box QP validation succeeded: {} variables, {} bounded.",
        hints.nvar, hints.nbounded
    );
    Ok(())
}
