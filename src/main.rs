//! Complaint Detector - Main entrypoint.
//!
//! Loads configuration, initializes logging and either serves JSON-RPC over
//! stdio or runs a one-shot command, printing JSON results to stdout.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use complaint_detector_lib::config::{self, DetectorConfig};
use complaint_detector_lib::error::{DetectorError, DetectorResult};
use complaint_detector_lib::protocol::jsonrpc::methods::compare::{
    run_benchmark, BenchmarkCase, BenchmarkParams, DEFAULT_BENCHMARK_ITERATIONS,
};
use complaint_detector_lib::protocol::jsonrpc::create_handler;
use complaint_detector_lib::protocol::stdio::serve_stdio;
use complaint_detector_lib::{init_logging, DetectorService};

/// Command line arguments for the complaint detector.
#[derive(Parser, Debug)]
#[clap(name = "complaint-detector", version, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Serve JSON-RPC requests on stdin/stdout
    Serve,

    /// Analyze one text against the stored patterns
    Analyze {
        /// Text to analyze
        text: String,

        /// Algorithm (kmp or boyer_moore); the setup algorithm when omitted
        #[clap(short, long)]
        algorithm: Option<String>,
    },

    /// Analyze every line of a file ("-" reads stdin)
    Batch {
        /// File with one text per line
        #[clap(value_parser)]
        input: PathBuf,

        /// Algorithm (kmp or boyer_moore); the setup algorithm when omitted
        #[clap(short, long)]
        algorithm: Option<String>,
    },

    /// Run both algorithms on one text and compare timings
    Compare {
        /// Text to analyze
        text: String,
    },

    /// Time both algorithms on raw text/pattern pairs
    Benchmark {
        /// Text to search
        #[clap(long, requires = "pattern")]
        text: Option<String>,

        /// Pattern to search for
        #[clap(long, requires = "text")]
        pattern: Option<String>,

        /// JSON file with an array of {"text", "pattern"} cases
        #[clap(long, value_parser, conflicts_with = "text")]
        cases: Option<PathBuf>,

        /// Iterations averaged per case
        #[clap(short, long, default_value_t = DEFAULT_BENCHMARK_ITERATIONS)]
        iterations: usize,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Main entry point for the application.
fn main() -> DetectorResult<()> {
    let args = Args::parse();

    // gen-config must work even when the current configuration is broken
    if let Some(Command::GenConfig { output }) = &args.command {
        init_logging(&config::LogConfig::default())?;
        DetectorConfig::default().write_toml(output)?;
        info!("Default configuration written to {}", output.display());
        return Ok(());
    }

    let config = config::load_config(args.config.as_deref())?;
    init_logging(&config.log)?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config),
        Command::Analyze { text, algorithm } => {
            let service = DetectorService::from_config(&config)?;
            print_json(&service.analyze(&text, algorithm.as_deref())?)
        }
        Command::Batch { input, algorithm } => {
            let texts = read_lines(&input)?;
            let service = DetectorService::from_config(&config)?;
            print_json(&service.analyze_batch(&texts, algorithm.as_deref())?)
        }
        Command::Compare { text } => {
            let service = DetectorService::from_config(&config)?;
            print_json(&service.compare(&text)?)
        }
        Command::Benchmark {
            text,
            pattern,
            cases,
            iterations,
        } => {
            let cases = match cases {
                Some(path) => Some(read_cases(&path)?),
                None => None,
            };
            print_json(&run_benchmark(BenchmarkParams {
                text,
                pattern,
                cases,
                iterations,
            })?)
        }
        Command::Validate => {
            info!(
                server = %config.server.name,
                algorithm = %config.engine.default_algorithm,
                patterns_path = %config.storage.patterns_path.display(),
                "Configuration validated successfully"
            );
            Ok(())
        }
        Command::GenConfig { .. } => Ok(()),
    }
}

/// Builds the runtime and serves until stdin closes.
fn serve(config: &DetectorConfig) -> DetectorResult<()> {
    let service = DetectorService::from_config(config)?.shared();
    let handler = create_handler(service);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.runtime_threads)
        .thread_name("detector-rt")
        .enable_all()
        .build()?;

    info!(
        server = %config.server.name,
        version = complaint_detector_lib::VERSION,
        methods = handler.method_names().len(),
        "Serving JSON-RPC on stdio"
    );

    runtime
        .block_on(serve_stdio(&handler, config.server.max_line_bytes))
        .map_err(DetectorError::from)
}

fn read_input(path: &Path) -> DetectorResult<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).map_err(|e| DetectorError::persistence(path, e))
    }
}

fn read_lines(path: &Path) -> DetectorResult<Vec<String>> {
    Ok(read_input(path)?
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}

fn read_cases(path: &Path) -> DetectorResult<Vec<BenchmarkCase>> {
    Ok(serde_json::from_str(&read_input(path)?)?)
}

fn print_json<T: Serialize>(value: &T) -> DetectorResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
