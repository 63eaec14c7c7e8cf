//! Host loop: feeds actions to the reducer and carries out its effects.
//!
//! PATTERN: Effects handled outside the reducer
//! - Input lines are decoded into actions on a reader task
//! - Actions flow through `EffectRuntime`, one dispatch at a time
//! - `PersistFavorites` effects are applied to local storage right after
//!   the dispatch that produced them

use std::io::Write;
use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use wx_dispatch::{
    ActionSummary, EffectRuntime, JsonFileStore, KeyValueStore, LoggingMiddleware, MemoryStore,
    PersistError, StoreWithMiddleware,
};

use crate::action::Action;
use crate::config::{ConfigError, HostConfig, StoreLocation};
use crate::effect::apply_effect;
use crate::favorites::load_favorites;
use crate::logging::LoggingError;
use crate::reducer::reducer;
use crate::state::{initial_state, AppState};

/// Local storage as seen by the host
pub type LocalStorage = Box<dyn KeyValueStore + Send>;

/// Top-level error for the host binary.
#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("Failed to open local storage: {0}")]
    Storage(#[from] PersistError),

    #[error("Failed to read input: {0}")]
    Input(#[source] std::io::Error),

    #[error("Failed to write state: {0}")]
    Output(#[source] std::io::Error),
}

/// How state is reported on the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Pretty JSON of the final snapshot only
    #[default]
    Final,
    /// One compact JSON line per dispatched action
    EachStep,
}

/// Open local storage at the configured location.
pub fn open_storage(location: &StoreLocation) -> Result<LocalStorage, PersistError> {
    Ok(match location {
        StoreLocation::Memory => Box::new(MemoryStore::new()),
        StoreLocation::File(path) => Box::new(JsonFileStore::open(path)?),
    })
}

/// Decode one input line. Blank lines and `#` comments yield `None`.
pub fn parse_action_line(line: &str) -> Option<Result<Action, serde_json::Error>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(serde_json::from_str(line))
}

/// Run every action from `input` through the reducer.
///
/// Stops at end of input or when `shutdown` is cancelled, and returns the
/// final snapshot.
pub async fn run_host<R, W>(
    config: &HostConfig,
    mut storage: LocalStorage,
    input: R,
    mut output: W,
    mode: OutputMode,
    shutdown: CancellationToken,
) -> Result<Arc<AppState>, HostError>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: Write,
{
    let store = StoreWithMiddleware::new(initial_state(), reducer, LoggingMiddleware::new());
    let runtime = EffectRuntime::from_store(store);

    if config.seed_favorites {
        if let Some(favorites) = load_favorites(&storage) {
            tracing::info!(count = favorites.len(), "Seeding stored favorites");
            runtime.enqueue(Action::SetFavorites {
                favorites: Some(favorites),
            });
        }
    }

    let stopped = runtime.cancellation_token();
    let runtime_token = runtime.cancellation_token();
    tokio::spawn(async move {
        shutdown.cancelled().await;
        runtime_token.cancel();
    });

    let reader = tokio::spawn(read_actions(input, runtime.sender()));

    let mut write_error = None;
    let last = runtime
        .run(
            |effect, _| apply_effect(effect, &mut storage),
            |action, state, changed| {
                tracing::trace!(action = %action.summary(), changed, "Dispatched");
                if mode == OutputMode::EachStep && write_error.is_none() {
                    if let Err(e) = write_line(&mut output, state) {
                        write_error = Some(e);
                    }
                }
            },
        )
        .await;

    if let Some(e) = write_error {
        return Err(HostError::Output(e));
    }

    // On shutdown the reader may still be waiting for input
    if stopped.is_cancelled() {
        reader.abort();
    }
    match reader.await {
        Ok(Err(e)) => return Err(HostError::Input(e)),
        Ok(Ok(skipped)) if skipped > 0 => {
            tracing::warn!(skipped, "Some input lines were not valid actions")
        }
        Ok(Ok(_)) => {}
        Err(e) if e.is_cancelled() => {}
        Err(e) => tracing::error!(error = %e, "Input reader panicked"),
    }

    if mode == OutputMode::Final {
        serde_json::to_writer_pretty(&mut output, &*last)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(output))
            .map_err(HostError::Output)?;
    }

    Ok(last)
}

/// Read lines and send decoded actions; returns how many lines were skipped.
async fn read_actions<R>(
    mut input: R,
    tx: tokio::sync::mpsc::UnboundedSender<Action>,
) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut line_no = 0usize;
    let mut skipped = 0usize;

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        line_no += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim_end_matches(&['\n', '\r'][..]),
            Err(e) => {
                skipped += 1;
                tracing::warn!(line = line_no, error = %e, "Skipping line that is not UTF-8");
                continue;
            }
        };

        match parse_action_line(line) {
            None => {}
            Some(Ok(action)) => {
                if tx.send(action).is_err() {
                    // Runtime is gone (shutdown)
                    break;
                }
            }
            Some(Err(e)) => {
                skipped += 1;
                tracing::warn!(line = line_no, error = %e, "Skipping malformed action");
            }
        }
    }

    Ok(skipped)
}

fn write_line<W: Write>(output: &mut W, state: &AppState) -> std::io::Result<()> {
    serde_json::to_writer(&mut *output, state)?;
    writeln!(output)
}
