use anyhow::Context;
use clap::{Parser, Subcommand};
use fnkit::config::FnkitConfig;
use fnkit::core::{update, KeyPath, Node};
use fnkit::FnkitError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace};

/// Functional-programming utilities and their demo
#[derive(Parser)]
#[command(name = "fnkit")]
#[command(about = "Compose, debounce, update and group - demonstrated on sample data", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every demo section (default command)
    Demo {
        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Replace the value at a dotted path inside a JSON document
    Update {
        /// Dotted path, numeric segments index into arrays (e.g. "items.0.name")
        #[arg(short, long)]
        path: String,

        /// Replacement value as JSON (e.g. '"Boston"' or '{"a": 1}')
        #[arg(long)]
        value: String,

        /// JSON document to read (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = FnkitConfig::load(cli.config.as_deref());

    let log_level = match cli.verbose {
        0 => config
            .as_ref()
            .map(|c| c.log_level.clone())
            .unwrap_or_else(|_| "info".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .with_line_number(cli.verbose >= 2)
        .init();

    debug!("fnkit started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let result = match config {
        Ok(config) => run(cli.command, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        let code = e.downcast_ref::<FnkitError>().map_or(1, FnkitError::exit_code);
        std::process::exit(code);
    }
}

async fn run(command: Option<Commands>, config: FnkitConfig) -> anyhow::Result<()> {
    match command {
        Some(Commands::Demo { json }) => run_demo(json, &config).await,
        Some(Commands::Update { path, value, input }) => {
            run_update(&path, &value, input.as_deref())
        }
        None => run_demo(false, &config).await,
    }
}

async fn run_demo(json: bool, config: &FnkitConfig) -> anyhow::Result<()> {
    let report = fnkit::demo::run_all(config).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", fnkit::demo::render(&report)?);
    }
    Ok(())
}

fn run_update(path: &str, value: &str, input: Option<&Path>) -> anyhow::Result<()> {
    let document = match input {
        Some(file) => std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let root = Node::from_json(serde_json::from_str(&document).map_err(FnkitError::from)?);
    let replacement = Node::from_json(serde_json::from_str(value).map_err(FnkitError::from)?);
    let key_path = KeyPath::parse(path);
    debug!(path = %key_path, "Applying update");

    let updated = update(&root, &key_path, replacement).map_err(FnkitError::from)?;
    println!("{}", serde_json::to_string_pretty(&updated.to_json())?);
    Ok(())
}
