//! Protocol definitions shared between the render coordinator and the trace load worker.

use crate::error::WaveError;
use crate::trace::TraceSource;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Identifier attached to cross-thread requests so responses can be correlated.
pub type RequestId = u64;

/// Commands sent from the render coordinator to the load worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadCommand {
    LoadTrace { request_id: RequestId, path: PathBuf },
    Shutdown,
}

/// Responses emitted by the load worker back to the coordinator.
pub enum LoadResponse {
    TraceLoaded {
        request_id: RequestId,
        path: PathBuf,
        trace: Arc<dyn TraceSource>,
    },
    Error {
        request_id: RequestId,
        error: WaveError,
    },
}

impl LoadResponse {
    pub fn request_id(&self) -> RequestId {
        match self {
            Self::TraceLoaded { request_id, .. } | Self::Error { request_id, .. } => *request_id,
        }
    }
}

impl fmt::Debug for LoadResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TraceLoaded {
                request_id,
                path,
                trace,
            } => f
                .debug_struct("TraceLoaded")
                .field("request_id", request_id)
                .field("path", path)
                .field("signals", &trace.signal_names().len())
                .finish(),
            Self::Error { request_id, error } => f
                .debug_struct("Error")
                .field("request_id", request_id)
                .field("error", error)
                .finish(),
        }
    }
}
