use crate::error::{Result, WaveError};
use crate::render::protocol::{LoadCommand, LoadResponse, RequestId};
use crate::trace::{TraceSource, VcdTrace};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};

/// Run the trace load worker processing commands from the coordinator.
///
/// Parsing is blocking work and runs on tokio's blocking pool, so the worker
/// task itself only waits on the channel and the join handle.
pub async fn trace_worker_loop(mut rx: Receiver<LoadCommand>, tx: Sender<LoadResponse>) {
    while let Some(cmd) = rx.recv().await {
        let outcome = handle_command(cmd).await;
        if let Some(response) = outcome.response {
            if tx.send(response).await.is_err() {
                break;
            }
        }

        if outcome.done {
            break;
        }
    }
    log::debug!("trace worker stopped");
}

async fn handle_command(cmd: LoadCommand) -> HandlerOutcome {
    match cmd {
        LoadCommand::LoadTrace { request_id, path } => {
            match load_trace(request_id, path.clone()).await {
                Ok(trace) => HandlerOutcome::respond(LoadResponse::TraceLoaded {
                    request_id,
                    path,
                    trace,
                }),
                Err(error) => {
                    log::warn!("loading {} failed: {error}", path.display());
                    HandlerOutcome::respond(LoadResponse::Error { request_id, error })
                }
            }
        }
        LoadCommand::Shutdown => HandlerOutcome::exit(),
    }
}

async fn load_trace(request_id: RequestId, path: PathBuf) -> Result<Arc<dyn TraceSource>> {
    log::debug!("request {request_id}: loading {}", path.display());
    let trace = tokio::task::spawn_blocking(move || VcdTrace::load(&path))
        .await
        .map_err(|e| WaveError::other(format!("trace loader panicked: {e}")))??;
    Ok(Arc::new(trace))
}

struct HandlerOutcome {
    response: Option<LoadResponse>,
    done: bool,
}

impl HandlerOutcome {
    fn respond(response: LoadResponse) -> Self {
        Self {
            response: Some(response),
            done: false,
        }
    }

    fn exit() -> Self {
        Self {
            response: None,
            done: true,
        }
    }
}
