//! Application orchestration layer
//!
//! Builds the waveform display, file browser and view state from the
//! configuration, starts the background runtime, and drives the render loop.

pub mod runtime;

use crate::browser::FileBrowser;
use crate::config::Config;
use crate::error::{Result, WaveError};
use crate::render::ui::{ColorTheme, UIRenderer, ViewState};
use crate::render::RenderLoopState;
use crate::waveform::{PaneGeometry, SignalStore, Viewport, WaveformDisplay};
use runtime::Runtime;
use std::path::PathBuf;

/// Application orchestrator - coordinates components without duplicating their state
pub struct Application {
    config: Config,
    theme: ColorTheme,
    initial_trace: Option<PathBuf>,
    ui_renderer: Box<dyn UIRenderer>,
}

impl Application {
    pub fn new(
        config: Config,
        theme: ColorTheme,
        initial_trace: Option<PathBuf>,
        ui_renderer: Box<dyn UIRenderer>,
    ) -> Self {
        Self {
            config,
            theme,
            initial_trace,
            ui_renderer,
        }
    }

    /// Build the view state the render loop starts from.
    pub fn build_view_state(&self, width: u16, height: u16) -> Result<ViewState> {
        let start_dir = match &self.config.start_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()
                .map_err(|e| WaveError::file_error("Cannot determine working directory", e))?,
        };
        let browser = FileBrowser::open(&start_dir)?;

        let display = WaveformDisplay::new(
            SignalStore::with_palette(self.theme.palette.clone()),
            Viewport::new(self.config.time_per_char),
            PaneGeometry {
                names_width: self.config.names_width,
                values_width: self.config.values_width,
                waves_width: 0,
            },
        )
        .with_colors(self.theme.display_colors());

        Ok(ViewState::new(display, browser, width, height))
    }

    /// Run until the user quits. The terminal is restored even when the loop fails.
    pub async fn run(&mut self) -> Result<()> {
        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let mut view_state = self.build_view_state(width, height)?;

        self.ui_renderer.initialize()?;
        let mut runtime = Runtime::start();

        let result = self.event_loop(&mut runtime, &mut view_state).await;

        runtime.shutdown().await;
        self.ui_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self, runtime: &mut Runtime, view_state: &mut ViewState) -> Result<()> {
        let mut loop_state = RenderLoopState::new();

        if let Some(path) = self.initial_trace.take() {
            loop_state
                .request_load(path, view_state, &runtime.load_tx)
                .await?;
        }
        if loop_state.take_needs_render() {
            self.ui_renderer.render(view_state)?;
        }

        let mut running = true;
        while running {
            tokio::select! {
                action = runtime.input_rx.recv() => match action {
                    Some(action) => {
                        running = loop_state
                            .process_action(action, view_state, &runtime.load_tx)
                            .await?;
                    }
                    None => {
                        log::warn!("input channel closed");
                        running = false;
                    }
                },
                Some(response) = runtime.response_rx.recv() => {
                    loop_state.handle_response(response, view_state);
                }
            }

            if running && loop_state.take_needs_render() {
                self.ui_renderer.render(view_state)?;
            }
        }
        Ok(())
    }
}
