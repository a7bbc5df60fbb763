use crate::input::{spawn_input_thread, InputAction};
use crate::render::protocol::{LoadCommand, LoadResponse};
use crate::trace::trace_worker_loop;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, Receiver, Sender, UnboundedReceiver};
use tokio::task::JoinHandle;

/// How long the input thread blocks in one poll before checking for shutdown.
const INPUT_POLL_INTERVAL_MS: u64 = 50;
/// Queued load commands and responses.
const LOAD_CHANNEL_CAPACITY: usize = 8;

/// Background tasks feeding the render loop: the terminal input thread and the
/// trace load worker, plus the channels connecting them.
pub struct Runtime {
    pub input_rx: UnboundedReceiver<InputAction>,
    pub load_tx: Sender<LoadCommand>,
    pub response_rx: Receiver<LoadResponse>,
    shutdown: Arc<AtomicBool>,
    input_thread: Option<std::thread::JoinHandle<()>>,
    worker: Option<JoinHandle<()>>,
}

impl Runtime {
    /// Spawn the input thread and the load worker. Must be called inside a tokio runtime.
    pub fn start() -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (load_tx, load_rx) = mpsc::channel(LOAD_CHANNEL_CAPACITY);
        let (response_tx, response_rx) = mpsc::channel(LOAD_CHANNEL_CAPACITY);
        let shutdown = Arc::new(AtomicBool::new(false));

        let worker = tokio::spawn(trace_worker_loop(load_rx, response_tx));
        let input_thread = spawn_input_thread(
            input_tx,
            Arc::clone(&shutdown),
            Duration::from_millis(INPUT_POLL_INTERVAL_MS),
        );
        log::debug!("input thread and trace worker started");

        Self {
            input_rx,
            load_tx,
            response_rx,
            shutdown,
            input_thread: Some(input_thread),
            worker: Some(worker),
        }
    }

    /// Stop both background tasks and wait for them to finish.
    pub async fn shutdown(mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        let _ = self.load_tx.send(LoadCommand::Shutdown).await;

        if let Some(worker) = self.worker.take() {
            let _ = worker.await;
        }
        if let Some(input_thread) = self.input_thread.take() {
            let _ = tokio::task::spawn_blocking(move || input_thread.join()).await;
        }
        log::debug!("runtime stopped");
    }
}
