//! Render coordination helpers.
//!
//! Provides the state machine that mediates between input actions, trace load
//! commands, and view updates. Every action is handled synchronously against
//! the view state; only trace loading leaves the render loop.

use crate::browser::BrowserEvent;
use crate::error::{Result, WaveError};
use crate::input::{InputAction, WheelDirection};
use crate::render::protocol::{LoadCommand, LoadResponse, RequestId};
use crate::render::ui::layout::list_offset;
use crate::render::ui::{Focus, HitTarget, ViewState};
use crate::waveform::PanDirection;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Tracks render-related state that must persist across input actions and worker responses.
#[derive(Debug, Default)]
pub struct RenderLoopState {
    next_request_id: RequestId,
    latest_load: Option<RequestId>,
    needs_render: bool,
}

impl RenderLoopState {
    pub fn new() -> Self {
        Self {
            needs_render: true,
            ..Self::default()
        }
    }

    /// Whether a trace load is outstanding.
    pub fn is_loading(&self) -> bool {
        self.latest_load.is_some()
    }

    /// Whether anything changed since the last call; resets the flag.
    pub fn take_needs_render(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }

    /// Apply one input action. Returns `false` when the application should quit.
    pub async fn process_action(
        &mut self,
        action: InputAction,
        view_state: &mut ViewState,
        load_tx: &mpsc::Sender<LoadCommand>,
    ) -> Result<bool> {
        let user_input = !matches!(
            action,
            InputAction::NoAction | InputAction::InvalidInput | InputAction::Resize { .. }
        );
        // A load in flight keeps its "Loading" message until the worker answers.
        if user_input && !self.is_loading() && view_state.status_line.clear_message() {
            self.needs_render = true;
        }

        let changed = match action {
            InputAction::Quit => return Ok(false),
            InputAction::PanLeft => view_state.display.pan(PanDirection::Left).any(),
            InputAction::PanRight => view_state.display.pan(PanDirection::Right).any(),
            InputAction::ZoomIn => view_state.display.zoom_in().any(),
            InputAction::ZoomOut => view_state.display.zoom_out().any(),
            InputAction::FocusNext => {
                view_state.focus = view_state.focus.next();
                true
            }
            InputAction::FocusPrevious => {
                view_state.focus = view_state.focus.previous();
                true
            }
            InputAction::MoveUp => Self::move_selection(view_state, -1),
            InputAction::MoveDown => Self::move_selection(view_state, 1),
            InputAction::Activate => self.activate(view_state, load_tx).await?,
            InputAction::Click { column, row } => {
                self.click(column, row, view_state, load_tx).await?
            }
            InputAction::Wheel {
                direction,
                lines,
                column,
                row,
            } => Self::wheel(direction, lines, column, row, view_state),
            InputAction::Resize { width, height } => {
                view_state.update_terminal_size(width, height)
            }
            InputAction::NoAction | InputAction::InvalidInput => false,
        };
        self.needs_render |= changed;
        Ok(true)
    }

    /// Apply a load worker response, dropping anything but the latest request.
    pub fn handle_response(&mut self, response: LoadResponse, view_state: &mut ViewState) {
        let request_id = response.request_id();
        if Some(request_id) != self.latest_load {
            log::debug!("dropping stale load response {request_id}");
            return;
        }
        self.latest_load = None;
        self.needs_render = true;

        match response {
            LoadResponse::TraceLoaded { path, trace, .. } => {
                log::info!("showing trace {}", path.display());
                view_state.install_trace(path, trace);
            }
            LoadResponse::Error { error, .. } => {
                view_state
                    .status_line
                    .set_message(format!("Load failed: {}", error));
            }
        }
    }

    /// Ask the worker to load `path`, superseding any load still in flight.
    pub async fn request_load(
        &mut self,
        path: PathBuf,
        view_state: &mut ViewState,
        load_tx: &mpsc::Sender<LoadCommand>,
    ) -> Result<RequestId> {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.latest_load = Some(request_id);
        self.needs_render = true;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        view_state
            .status_line
            .set_message(format!("Loading {name}..."));

        load_tx
            .send(LoadCommand::LoadTrace { request_id, path })
            .await
            .map_err(|_| WaveError::other("trace worker unavailable"))?;
        Ok(request_id)
    }

    fn move_selection(view_state: &mut ViewState, delta: isize) -> bool {
        match view_state.focus {
            Focus::Browser if delta < 0 => view_state.browser.move_up(),
            Focus::Browser => view_state.browser.move_down(),
            Focus::Picker if delta < 0 => view_state.picker.move_up(),
            Focus::Picker => view_state.picker.move_down(),
            Focus::Waves => {
                return view_state
                    .display
                    .scroll_rows(delta)
                    .is_some_and(|redraw| redraw.any());
            }
        }
        true
    }

    async fn activate(
        &mut self,
        view_state: &mut ViewState,
        load_tx: &mpsc::Sender<LoadCommand>,
    ) -> Result<bool> {
        match view_state.focus {
            Focus::Browser => match view_state.browser.activate() {
                Ok(Some(BrowserEvent::FileSelected(path))) => {
                    self.request_load(path, view_state, load_tx).await?;
                }
                Ok(None) => {}
                Err(error) => view_state.status_line.set_message(error.to_string()),
            },
            Focus::Picker => match view_state.picker.toggle() {
                Some(event) => view_state.apply_picker_event(event),
                None => return Ok(false),
            },
            Focus::Waves => return Ok(false),
        }
        Ok(true)
    }

    async fn click(
        &mut self,
        column: u16,
        row: u16,
        view_state: &mut ViewState,
        load_tx: &mpsc::Sender<LoadCommand>,
    ) -> Result<bool> {
        match view_state.layout.hit(column, row) {
            Some(HitTarget::Browser { row }) => {
                let height = view_state.layout.browser_list().height;
                let offset = list_offset(view_state.browser.selected(), height);
                let index = offset + usize::from(row);
                if index < view_state.browser.entries().len() {
                    view_state.focus = Focus::Browser;
                    view_state.browser.select(index);
                    self.activate(view_state, load_tx).await?;
                    return Ok(true);
                }
                Ok(false)
            }
            Some(HitTarget::Picker { row }) => {
                let height = view_state.layout.picker_list().height;
                let offset = list_offset(view_state.picker.selected(), height);
                let index = offset + usize::from(row);
                if index < view_state.picker.items().len() {
                    view_state.focus = Focus::Picker;
                    view_state.picker.select(index);
                    self.activate(view_state, load_tx).await?;
                    return Ok(true);
                }
                Ok(false)
            }
            Some(HitTarget::Pane { pane, column, .. }) => {
                let refocused = view_state.focus != Focus::Waves;
                view_state.focus = Focus::Waves;
                let moved = view_state
                    .display
                    .on_click(pane, column)
                    .is_some_and(|redraw| redraw.any());
                Ok(refocused || moved)
            }
            None => Ok(false),
        }
    }

    fn wheel(
        direction: WheelDirection,
        lines: u64,
        column: u16,
        row: u16,
        view_state: &mut ViewState,
    ) -> bool {
        let step = direction.signed(lines);
        match view_state.layout.hit(column, row) {
            Some(HitTarget::Pane { pane, .. }) => {
                let redraw = if direction.is_horizontal() {
                    pane.scrolls_horizontally()
                        .then(|| view_state.display.scroll_columns(pane, step))
                        .flatten()
                } else if pane.scrolls_vertically() {
                    view_state
                        .display
                        .scroll_rows(isize::try_from(step).unwrap_or(0))
                } else {
                    None
                };
                redraw.is_some_and(|redraw| redraw.any())
            }
            Some(HitTarget::Browser { .. }) if !direction.is_horizontal() => {
                for _ in 0..lines {
                    if step < 0 {
                        view_state.browser.move_up();
                    } else {
                        view_state.browser.move_down();
                    }
                }
                true
            }
            Some(HitTarget::Picker { .. }) if !direction.is_horizontal() => {
                for _ in 0..lines {
                    if step < 0 {
                        view_state.picker.move_up();
                    } else {
                        view_state.picker.move_down();
                    }
                }
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod state_tests {
    use super::*;
    use crate::browser::FileBrowser;
    use crate::render::ui::{MockUIRenderer, UIRenderer};
    use crate::trace::{InMemoryTrace, TraceSource};
    use crate::waveform::{
        PaneGeometry, PaneId, Sample, SignalStore, Viewport, WaveformDisplay,
    };
    use std::sync::Arc;
    use tempfile::TempDir;

    struct Harness {
        _dir: TempDir,
        state: RenderLoopState,
        view: ViewState,
        tx: mpsc::Sender<LoadCommand>,
        rx: mpsc::Receiver<LoadCommand>,
    }

    fn harness() -> Harness {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("run.vcd"), "$end").unwrap();
        let browser = FileBrowser::open(dir.path()).unwrap();
        let display = WaveformDisplay::new(
            SignalStore::new(),
            Viewport::new(5),
            PaneGeometry::default(),
        );
        let view = ViewState::new(display, browser, 120, 40);
        let (tx, rx) = mpsc::channel(4);
        Harness {
            _dir: dir,
            state: RenderLoopState::new(),
            view,
            tx,
            rx,
        }
    }

    fn trace() -> Arc<dyn TraceSource> {
        Arc::new(
            InMemoryTrace::new()
                .with_signal(
                    "tb.clk",
                    1,
                    vec![Sample::new(0, "0"), Sample::new(10, "1"), Sample::new(25, "0")],
                )
                .with_signal("tb.bus", 4, vec![Sample::new(0, "1010")]),
        )
    }

    impl Harness {
        async fn act(&mut self, action: InputAction) -> bool {
            self.state
                .process_action(action, &mut self.view, &self.tx)
                .await
                .unwrap()
        }
    }

    #[tokio::test]
    async fn quit_stops_the_loop() {
        let mut h = harness();
        assert!(h.act(InputAction::ZoomIn).await);
        assert!(!h.act(InputAction::Quit).await);
    }

    #[tokio::test]
    async fn activating_a_trace_sends_a_load_request() {
        let mut h = harness();
        // Entries are "..", "run.vcd".
        h.act(InputAction::MoveDown).await;
        h.act(InputAction::Activate).await;

        match h.rx.recv().await {
            Some(LoadCommand::LoadTrace { request_id, path }) => {
                assert_eq!(request_id, 0);
                assert!(path.ends_with("run.vcd"));
            }
            other => panic!("expected a load request, got {other:?}"),
        }
        assert!(h.state.is_loading());
        assert!(h.view.format_status_line().contains("Loading run.vcd"));
    }

    #[tokio::test]
    async fn stale_responses_are_dropped() {
        let mut h = harness();
        let first = h
            .state
            .request_load("a.vcd".into(), &mut h.view, &h.tx)
            .await
            .unwrap();
        let second = h
            .state
            .request_load("b.vcd".into(), &mut h.view, &h.tx)
            .await
            .unwrap();

        h.state.handle_response(
            LoadResponse::TraceLoaded {
                request_id: first,
                path: "a.vcd".into(),
                trace: trace(),
            },
            &mut h.view,
        );
        assert!(h.view.trace.is_none());

        h.state.handle_response(
            LoadResponse::TraceLoaded {
                request_id: second,
                path: "b.vcd".into(),
                trace: trace(),
            },
            &mut h.view,
        );
        assert_eq!(h.view.filename(), "b.vcd");
        assert_eq!(h.view.focus, Focus::Picker);
        assert!(!h.state.is_loading());
    }

    #[tokio::test]
    async fn load_errors_reach_the_status_line() {
        let mut h = harness();
        let id = h
            .state
            .request_load("bad.vcd".into(), &mut h.view, &h.tx)
            .await
            .unwrap();
        h.state.handle_response(
            LoadResponse::Error {
                request_id: id,
                error: WaveError::trace_parse("bad.vcd", "unexpected token"),
            },
            &mut h.view,
        );
        assert!(h.view.format_status_line().contains("Load failed"));
    }

    #[tokio::test]
    async fn picker_toggle_and_wave_click() {
        let mut h = harness();
        let id = h
            .state
            .request_load("run.vcd".into(), &mut h.view, &h.tx)
            .await
            .unwrap();
        h.state.handle_response(
            LoadResponse::TraceLoaded {
                request_id: id,
                path: "run.vcd".into(),
                trace: trace(),
            },
            &mut h.view,
        );

        // Picker focused after load: enable tb.clk.
        h.act(InputAction::Activate).await;
        assert!(h.view.display.store().contains("tb.clk"));

        // Click the third column of the waves pane.
        let waves = h.view.layout.waves;
        h.act(InputAction::Click {
            column: waves.x + 3,
            row: waves.y,
        })
        .await;
        assert_eq!(h.view.focus, Focus::Waves);
        assert_eq!(h.view.display.viewport().cursor_time(), 15);

        let mut renderer = MockUIRenderer::new();
        renderer.render(&h.view).unwrap();
        assert_eq!(renderer.last_waves.len(), 1);
        assert!(renderer.last_waves[0].starts_with("__│──│__"));
        assert!(renderer.last_status.contains("cursor 15ps"));
    }

    #[tokio::test]
    async fn wheel_scrolls_the_pane_under_the_pointer() {
        let mut h = harness();
        let timeline = h.view.layout.timeline;
        h.act(InputAction::Wheel {
            direction: WheelDirection::Right,
            lines: 3,
            column: timeline.x,
            row: timeline.y,
        })
        .await;
        assert_eq!(h.view.display.viewport().start_time(), 15);

        // Vertical wheel over the timeline does nothing.
        h.act(InputAction::Wheel {
            direction: WheelDirection::Down,
            lines: 3,
            column: timeline.x,
            row: timeline.y,
        })
        .await;
        assert_eq!(h.view.display.synchronizer().scroll_of(PaneId::Waves).y, 0);
    }

    #[tokio::test]
    async fn resize_recomputes_layout() {
        let mut h = harness();
        h.act(InputAction::Resize {
            width: 150,
            height: 40,
        })
        .await;
        assert_eq!(h.view.layout.waves.width, 73);
    }

    #[tokio::test]
    async fn only_effective_actions_request_a_render() {
        let mut h = harness();
        assert!(h.state.take_needs_render());
        assert!(!h.state.take_needs_render());

        h.act(InputAction::NoAction).await;
        assert!(!h.state.take_needs_render());

        let timeline = h.view.layout.timeline;
        h.act(InputAction::Wheel {
            direction: WheelDirection::Up,
            lines: 3,
            column: timeline.x,
            row: timeline.y,
        })
        .await;
        assert!(!h.state.take_needs_render());

        h.act(InputAction::Resize {
            width: 120,
            height: 40,
        })
        .await;
        assert!(!h.state.take_needs_render());

        h.act(InputAction::PanRight).await;
        assert!(h.state.take_needs_render());
    }

    #[tokio::test]
    async fn status_message_clears_on_next_action() {
        let mut h = harness();
        let id = h
            .state
            .request_load("bad.vcd".into(), &mut h.view, &h.tx)
            .await
            .unwrap();

        // Still loading: the progress message stays.
        h.act(InputAction::ZoomIn).await;
        assert!(h.view.format_status_line().contains("Loading bad.vcd"));

        h.state.handle_response(
            LoadResponse::Error {
                request_id: id,
                error: WaveError::trace_parse("bad.vcd", "unexpected token"),
            },
            &mut h.view,
        );
        assert!(h.state.take_needs_render());

        h.act(InputAction::NoAction).await;
        assert!(h.view.format_status_line().contains("Load failed"));

        h.act(InputAction::FocusNext).await;
        assert!(h.view.status_line.message.is_none());
        assert!(h.state.take_needs_render());
    }
}
