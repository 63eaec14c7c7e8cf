//! weather-host - drive the weather reducer from a stream of JSON actions
//!
//! Each input line is one action, e.g. `{"type": "addToFav", "city": {"id": 7}}`.
//! Favorites writes land in local storage, and the resulting state is
//! printed as JSON on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```sh
//! # Replay a file, print the final state
//! cargo run -p weather-store -- --input actions.jsonl
//!
//! # Pipe actions in, print every successor, keep storage in memory
//! cat actions.jsonl | cargo run -p weather-store -- --each --memory
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::io::{AsyncBufRead, BufReader};
use tokio_util::sync::CancellationToken;

use weather_store::config::{self, CliOverrides};
use weather_store::host::{self, HostError, OutputMode};
use weather_store::logging;

/// Replay weather dashboard actions through the state reducer
#[derive(Parser, Debug)]
#[command(name = "weather-host")]
#[command(about = "Replay weather dashboard actions through the state reducer")]
struct Args {
    /// Newline-delimited JSON actions (defaults to stdin)
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Print the state after every action instead of only the final one
    #[arg(long)]
    each: bool,

    /// Config file (defaults to <config dir>/weather-store/config.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Local storage file
    #[arg(long, conflicts_with = "memory")]
    store: Option<PathBuf>,

    /// Keep local storage in memory only
    #[arg(long)]
    memory: bool,

    /// Log filter, e.g. "debug" (RUST_LOG takes precedence)
    #[arg(long)]
    log_filter: Option<String>,

    /// Do not dispatch stored favorites on startup
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), HostError> {
    let config_path = args.config.clone().or_else(config::default_config_path);
    let file = match &config_path {
        Some(path) => config::load_config_file(path)?,
        None => None,
    };
    let overrides = CliOverrides {
        store_path: args.store.clone(),
        memory: args.memory,
        log_filter: args.log_filter.clone(),
        no_seed: args.no_seed,
    };
    let config = config::resolve(file, &overrides)?;

    logging::init(&config.log_filter)?;
    tracing::debug!(?config, "Resolved configuration");

    let storage = host::open_storage(&config.store)?;

    let input: Box<dyn AsyncBufRead + Unpin + Send> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            tokio::fs::File::open(path)
                .await
                .map_err(HostError::Input)?,
        )),
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let mode = if args.each {
        OutputMode::EachStep
    } else {
        OutputMode::Final
    };

    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, stopping after the current action");
            on_signal.cancel();
        }
    });

    let stdout = std::io::stdout();
    host::run_host(&config, storage, input, stdout.lock(), mode, shutdown).await?;
    Ok(())
}
