use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use wavetui::render::protocol::{LoadCommand, LoadResponse};
use wavetui::trace::worker::trace_worker_loop;
use wavetui::WaveError;

const TIMEOUT_MS: u64 = 2000;

const DUMP: &str = "\
$timescale 10ps $end
$scope module tb $end
$var wire 1 ! clk $end
$var wire 8 # count [7:0] $end
$upscope $end
$enddefinitions $end
#0
0!
b0 #
#4
1!
b1 #
#8
0!
b10 #
";

async fn next_response(rx: &mut mpsc::Receiver<LoadResponse>) -> LoadResponse {
    timeout(Duration::from_millis(TIMEOUT_MS), rx.recv())
        .await
        .expect("worker response timed out")
        .expect("worker channel closed unexpectedly")
}

fn spawn_worker() -> (
    mpsc::Sender<LoadCommand>,
    mpsc::Receiver<LoadResponse>,
    tokio::task::JoinHandle<()>,
) {
    let (cmd_tx, cmd_rx) = mpsc::channel(4);
    let (resp_tx, resp_rx) = mpsc::channel(4);
    let worker = tokio::spawn(trace_worker_loop(cmd_rx, resp_tx));
    (cmd_tx, resp_rx, worker)
}

fn write_dump(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write dump");
    path
}

#[tokio::test]
async fn load_trace_returns_parsed_signals() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_dump(&dir, "counter.vcd", DUMP);
    let (cmd_tx, mut resp_rx, worker) = spawn_worker();

    cmd_tx
        .send(LoadCommand::LoadTrace {
            request_id: 7,
            path: path.clone(),
        })
        .await
        .unwrap();

    match next_response(&mut resp_rx).await {
        LoadResponse::TraceLoaded {
            request_id,
            path: loaded,
            trace,
        } => {
            assert_eq!(request_id, 7);
            assert_eq!(loaded, path);
            assert_eq!(trace.signal_names(), vec!["tb.clk", "tb.count[7:0]"]);

            let count = trace.signal("tb.count[7:0]").unwrap();
            assert_eq!(count.width, 8);
            let samples: Vec<_> = count
                .samples
                .iter()
                .map(|s| (s.time, s.value.as_str()))
                .collect();
            assert_eq!(
                samples,
                vec![(0, "00000000"), (40, "00000001"), (80, "00000010")]
            );
            assert_eq!(trace.end_time(), 80);
        }
        other => panic!("expected a loaded trace, got {other:?}"),
    }

    cmd_tx.send(LoadCommand::Shutdown).await.unwrap();
    worker.await.unwrap();
}

#[tokio::test]
async fn missing_file_reports_error_with_request_id() {
    let (cmd_tx, mut resp_rx, worker) = spawn_worker();

    cmd_tx
        .send(LoadCommand::LoadTrace {
            request_id: 3,
            path: "/no/such/trace.vcd".into(),
        })
        .await
        .unwrap();

    match next_response(&mut resp_rx).await {
        LoadResponse::Error { request_id, error } => {
            assert_eq!(request_id, 3);
            assert!(matches!(error, WaveError::FileNotFound { .. }));
        }
        other => panic!("expected an error, got {other:?}"),
    }

    drop(cmd_tx);
    worker.await.unwrap();
}

#[tokio::test]
async fn malformed_dump_is_a_parse_error_and_worker_survives() {
    let dir = tempfile::TempDir::new().unwrap();
    let bad = write_dump(&dir, "bad.vcd", "$var wire one ! clk $end\n");
    let good = write_dump(&dir, "good.vcd", DUMP);
    let (cmd_tx, mut resp_rx, worker) = spawn_worker();

    cmd_tx
        .send(LoadCommand::LoadTrace {
            request_id: 1,
            path: bad,
        })
        .await
        .unwrap();
    cmd_tx
        .send(LoadCommand::LoadTrace {
            request_id: 2,
            path: good,
        })
        .await
        .unwrap();

    let first = next_response(&mut resp_rx).await;
    assert!(matches!(
        first,
        LoadResponse::Error {
            request_id: 1,
            error: WaveError::TraceParse { .. }
        }
    ));
    let second = next_response(&mut resp_rx).await;
    assert_eq!(second.request_id(), 2);
    assert!(matches!(second, LoadResponse::TraceLoaded { .. }));

    cmd_tx.send(LoadCommand::Shutdown).await.unwrap();
    worker.await.unwrap();
}
