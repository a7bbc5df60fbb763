//! The waveform display: signal store plus synchronized viewport.
//!
//! Every mutation goes through here; [`WaveformDisplay::render_frame`] is a pure
//! function of the current state and is called after each handled event.

use crate::waveform::frame::RenderedFrame;
use crate::waveform::panes::{render_names, render_timeline, render_values};
use crate::waveform::sample::SignalData;
use crate::waveform::store::SignalStore;
use crate::waveform::sync::{PaneGeometry, PaneId, Redraw, ScrollSynchronizer};
use crate::waveform::viewport::{PanDirection, Viewport, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::waveform::wave::render_wave;
use ratatui::style::Color;

/// Colors the display needs beyond the per-signal palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayColors {
    pub error: Color,
    pub timeline: Color,
}

impl Default for DisplayColors {
    fn default() -> Self {
        Self {
            error: Color::LightRed,
            timeline: Color::Gray,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WaveformDisplay {
    store: SignalStore,
    sync: ScrollSynchronizer,
    colors: DisplayColors,
}

impl WaveformDisplay {
    pub fn new(store: SignalStore, viewport: Viewport, geometry: PaneGeometry) -> Self {
        Self {
            store,
            sync: ScrollSynchronizer::new(viewport, geometry),
            colors: DisplayColors::default(),
        }
    }

    pub fn with_colors(mut self, colors: DisplayColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn store(&self) -> &SignalStore {
        &self.store
    }

    pub fn viewport(&self) -> &Viewport {
        self.sync.viewport()
    }

    pub fn synchronizer(&self) -> &ScrollSynchronizer {
        &self.sync
    }

    pub fn add_signal(&mut self, name: &str, data: SignalData) {
        self.store.add(name, data);
    }

    pub fn remove_signal(&mut self, name: &str) {
        self.store.remove(name);
        self.sync.clamp_rows(self.store.len());
    }

    /// Forget every signal, used when a different trace is opened.
    pub fn clear(&mut self) {
        self.store.reset();
        self.sync.clamp_rows(0);
    }

    pub fn pan(&mut self, direction: PanDirection) -> Redraw {
        self.sync.pan(direction)
    }

    pub fn zoom_in(&mut self) -> Redraw {
        self.sync.zoom(ZOOM_IN_FACTOR)
    }

    pub fn zoom_out(&mut self) -> Redraw {
        self.sync.zoom(ZOOM_OUT_FACTOR)
    }

    pub fn on_scroll(&mut self, pane: PaneId, scroll_x: u64, scroll_y: usize) -> Option<Redraw> {
        let redraw = self.sync.on_scroll(pane, scroll_x, scroll_y);
        self.sync.clamp_rows(self.store.len());
        redraw
    }

    /// Scroll every row pane by `rows` (negative is up).
    pub fn scroll_rows(&mut self, rows: isize) -> Option<Redraw> {
        let waves = self.sync.scroll_of(PaneId::Waves);
        let y = waves.y.saturating_add_signed(rows);
        self.on_scroll(PaneId::Waves, waves.x, y)
    }

    /// Scroll the time axis by `columns` (negative is towards time 0).
    pub fn scroll_columns(&mut self, pane: PaneId, columns: i64) -> Option<Redraw> {
        let current = self.sync.scroll_of(pane);
        let x = current.x.saturating_add_signed(columns);
        self.on_scroll(pane, x, current.y)
    }

    pub fn on_click(&mut self, pane: PaneId, column: u16) -> Option<Redraw> {
        self.sync.on_click(pane, column)
    }

    pub fn set_waves_width(&mut self, width: u16) {
        self.sync.set_waves_width(width);
    }

    /// Build all four panes and the cursor overlay from the current state.
    pub fn render_frame(&self) -> RenderedFrame {
        let viewport = self.sync.viewport();
        let width = self.sync.geometry().waves_width;
        let end_time = self.store.end_time();

        RenderedFrame {
            names: render_names(&self.store),
            values: render_values(&self.store, viewport.cursor_time()),
            waves: self
                .store
                .iter()
                .map(|(_, signal)| render_wave(signal, viewport, end_time, width, self.colors.error))
                .collect(),
            timeline: render_timeline(viewport, width, self.colors.timeline),
            cursor: self.sync.cursor_overlay(),
            scroll_row: self.sync.scroll_of(PaneId::Waves).y,
        }
    }
}

impl Default for WaveformDisplay {
    fn default() -> Self {
        Self::new(SignalStore::new(), Viewport::default(), PaneGeometry::default())
    }
}
