//! HRMS functional check runner
//!
//! Runs the fixed check suite against a live HRMS API and prints a
//! ✅/❌ line per check, or with `bench` times the API and frontend.
//! Exits 0 once the run has finished, whatever the outcomes.

use std::path::PathBuf;
use std::time::Duration;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hrms_e2e::runner::{write_results, RunnerConfig};
use hrms_e2e::{BenchConfig, Benchmark, TestRunner};

#[derive(Parser, Debug)]
#[command(name = "hrms-e2e")]
#[command(author, version, about = "Functional checks for the HRMS API", long_about = None)]
struct Args {
    /// API base URL, including the /api prefix
    #[arg(long, env = "HRMS_API_URL", default_value = "http://localhost:4000/api", global = true)]
    api_url: String,

    /// Frontend origin
    #[arg(long, env = "HRMS_FRONTEND_URL", default_value = "http://localhost:3000", global = true)]
    frontend_url: String,

    /// Per-request timeout in seconds (client default when unset)
    #[arg(long, env = "HRMS_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    /// Write the run result as JSON to this path
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Defaults to running the check suite
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Measure response times of the API and frontend
    Bench(BenchArgs),
}

#[derive(ClapArgs, Debug)]
struct BenchArgs {
    /// Requests per endpoint
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..))]
    iterations: u32,

    /// Requests in flight per batch
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    concurrency: u32,
}

impl Args {
    fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            api_url: self.api_url.clone(),
            frontend_url: self.frontend_url.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
            output: self.output.clone(),
        }
    }
}

impl BenchArgs {
    fn bench_config(&self) -> BenchConfig {
        BenchConfig {
            iterations: self.iterations as usize,
            concurrency: self.concurrency as usize,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = args.runner_config();

    match &args.command {
        None => {
            let mut runner = TestRunner::new(&config)?;
            let results = runner.run_suite().await;
            if let Some(path) = &config.output {
                write_results(&results, path)?;
            }
        }
        Some(Command::Bench(bench)) => {
            let mut benchmark = Benchmark::new(&config, bench.bench_config())?;
            let report = benchmark.run().await;
            if let Some(path) = &config.output {
                write_results(&report, path)?;
            }
        }
    }

    Ok(())
}
