//! Lanai - Main entrypoint.
//!
//! Loads a delimited record file into a Lanai Trie and either answers
//! lookups interactively or reports load and memory statistics.

use clap::{Parser, Subcommand};
use lanai_lib::config::{self, ConfigLoader, LanaiConfig, LogConfig, ENV_PREFIX};
use lanai_lib::error::{set_error_reporter, LanaiError, LanaiResult, TracingErrorReporter};
use lanai_lib::loader::{load_file, LoadReport};
use lanai_lib::query::run_query_loop;
use lanai_lib::LanaiTrie;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for Lanai.
#[derive(Parser, Debug)]
#[clap(name = "lanai", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Load a record file and answer lookups from standard input
    Query {
        /// Record file, one `key<delimiter>value` record per line
        #[clap(value_parser)]
        file: PathBuf,
    },

    /// Load a record file and print load and memory statistics
    Stats {
        /// Record file, one `key<delimiter>value` record per line
        #[clap(value_parser)]
        file: PathBuf,

        /// Print statistics as JSON
        #[clap(long)]
        json: bool,
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

/// Statistics printed by the `stats` command.
#[derive(Debug, Serialize)]
struct Stats {
    load: LoadReport,
    keys: usize,
    nodes: usize,
    node_size: usize,
    memory_usage: usize,
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(log: &LogConfig) -> LanaiResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_line_number(log.source_location)
        .with_file(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.pretty().finish())
    };

    result.map_err(|e| LanaiError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Builds a trie from `file` using the configured trie and loader settings.
fn load_trie(config: &LanaiConfig, file: &Path) -> LanaiResult<(LanaiTrie<String>, LoadReport)> {
    let mut trie = LanaiTrie::with_config(config.trie.to_trie_config());
    let report = load_file(file, &mut trie, &config.loader)?;
    Ok((trie, report))
}

/// Main entry point for the application.
fn main() -> LanaiResult<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Load configuration
    let config_loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);
    let lanai_config = match config_loader.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };

    init_logging(&lanai_config.log)?;
    set_error_reporter(Arc::new(TracingErrorReporter));
    config::init_global_config(lanai_config.clone());

    match args.command {
        Command::Query { file } => {
            let (trie, report) = load_trie(&lanai_config, &file)?;
            info!(keys = trie.len(), skipped = report.skipped, "Records loaded");

            let stdin = io::stdin();
            let stdout = io::stdout();
            run_query_loop(&trie, stdin.lock(), stdout.lock(), &lanai_config.query)?;
            Ok(())
        }
        Command::Stats { file, json } => {
            let (trie, report) = load_trie(&lanai_config, &file)?;
            let stats = Stats {
                load: report,
                keys: trie.len(),
                nodes: trie.node_count(),
                node_size: trie.node_size(),
                memory_usage: trie.memory_usage(),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Records:      {}", stats.load.records);
                println!("Inserted:     {}", stats.load.inserted);
                println!("Duplicates:   {}", stats.load.duplicates);
                println!("Skipped:      {}", stats.load.skipped);
                println!("Keys:         {}", stats.keys);
                println!("Nodes:        {}", stats.nodes);
                println!("Node size:    {} bytes", stats.node_size);
                println!("Memory usage: {} bytes", stats.memory_usage);
            }
            Ok(())
        }
        Command::Validate => {
            // Loading already validated the merged configuration
            println!("Configuration is valid");
            Ok(())
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = LanaiConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            // Serialize to TOML
            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| LanaiError::Custom(format!("Failed to serialize config: {e}")))?;

            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}
