//! Cross-pane scroll coupling.
//!
//! Four panes scroll together. The names, values and waves panes share a
//! vertical offset; the waves and timeline panes share a horizontal offset.
//! Propagating an offset to a sibling pane notifies the synchronizer again,
//! exactly as a widget reports its own scroll change. A re-entrancy flag keeps
//! that cascade to a single synchronization pass.
//!
//! After every pass `start_time = waves.scroll_x * time_per_char`. Pan and zoom
//! move `start_time` themselves; the horizontal offsets then follow to the
//! column containing it without running a pass, so zoom never shifts the left
//! edge.

use crate::waveform::frame::CursorOverlay;
use crate::waveform::viewport::{PanDirection, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneId {
    Names,
    Values,
    Waves,
    Timeline,
}

impl PaneId {
    pub const ALL: [PaneId; 4] = [PaneId::Names, PaneId::Values, PaneId::Waves, PaneId::Timeline];

    fn index(self) -> usize {
        match self {
            PaneId::Names => 0,
            PaneId::Values => 1,
            PaneId::Waves => 2,
            PaneId::Timeline => 3,
        }
    }

    /// Panes whose rows are signals.
    pub fn scrolls_vertically(self) -> bool {
        !matches!(self, PaneId::Timeline)
    }

    /// Panes whose columns are time.
    pub fn scrolls_horizontally(self) -> bool {
        matches!(self, PaneId::Waves | PaneId::Timeline)
    }
}

/// Scroll position of one pane, in columns and rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaneScroll {
    pub x: u64,
    pub y: usize,
}

/// Column widths of the fixed panes and the visible waves width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneGeometry {
    pub names_width: u16,
    pub values_width: u16,
    pub waves_width: u16,
}

impl Default for PaneGeometry {
    fn default() -> Self {
        Self {
            names_width: crate::config::DEFAULT_NAMES_WIDTH,
            values_width: crate::config::DEFAULT_VALUES_WIDTH,
            waves_width: 80,
        }
    }
}

/// Panes that must be redrawn after a synchronization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Redraw {
    pub waves: bool,
    pub timeline: bool,
    pub cursor: bool,
    pub values: bool,
}

impl Redraw {
    fn scrolled() -> Self {
        Self {
            waves: true,
            timeline: true,
            cursor: true,
            values: false,
        }
    }

    pub fn any(&self) -> bool {
        self.waves || self.timeline || self.cursor || self.values
    }
}

#[derive(Debug, Clone)]
pub struct ScrollSynchronizer {
    viewport: Viewport,
    panes: [PaneScroll; 4],
    geometry: PaneGeometry,
    syncing: bool,
    passes: u64,
}

impl ScrollSynchronizer {
    pub fn new(viewport: Viewport, geometry: PaneGeometry) -> Self {
        let mut sync = Self {
            viewport,
            panes: [PaneScroll::default(); 4],
            geometry,
            syncing: false,
            passes: 0,
        };
        sync.align_to_start_time();
        sync
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn geometry(&self) -> PaneGeometry {
        self.geometry
    }

    pub fn set_waves_width(&mut self, width: u16) {
        self.geometry.waves_width = width;
    }

    pub fn scroll_of(&self, pane: PaneId) -> PaneScroll {
        self.panes[pane.index()]
    }

    /// Number of synchronization passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Handle a pane reporting a new scroll position.
    ///
    /// Returns `None` when the event arrived while a pass was already running.
    pub fn on_scroll(&mut self, source: PaneId, scroll_x: u64, scroll_y: usize) -> Option<Redraw> {
        let pane = &mut self.panes[source.index()];
        if source.scrolls_horizontally() {
            pane.x = scroll_x;
        }
        if source.scrolls_vertically() {
            pane.y = scroll_y;
        }
        self.synchronize(source)
    }

    fn synchronize(&mut self, source: PaneId) -> Option<Redraw> {
        if self.syncing {
            return None;
        }
        self.syncing = true;

        let origin = self.scroll_of(source);
        for pane in PaneId::ALL {
            if pane == source {
                continue;
            }
            let current = self.scroll_of(pane);
            if source.scrolls_vertically() && pane.scrolls_vertically() && current.y != origin.y {
                self.scroll_pane(pane, current.x, origin.y);
            }
            if source.scrolls_horizontally()
                && pane.scrolls_horizontally()
                && current.x != origin.x
            {
                self.scroll_pane(pane, origin.x, current.y);
            }
        }

        let start_time = self
            .scroll_of(PaneId::Waves)
            .x
            .saturating_mul(self.viewport.time_per_char());
        self.viewport.set_start_time(start_time);

        self.passes += 1;
        self.syncing = false;
        Some(Redraw::scrolled())
    }

    /// Move a sibling pane; like a widget, it reports the change back.
    fn scroll_pane(&mut self, pane: PaneId, x: u64, y: usize) {
        self.panes[pane.index()] = PaneScroll { x, y };
        let echoed = self.synchronize(pane);
        debug_assert!(echoed.is_none());
    }

    /// Pan the viewport and move the horizontal panes along with it.
    pub fn pan(&mut self, direction: PanDirection) -> Redraw {
        self.viewport.pan(direction, self.geometry.waves_width);
        self.align_to_start_time();
        Redraw::scrolled()
    }

    /// Zoom the viewport. `start_time` is kept; scroll columns are re-derived
    /// for the new scale.
    pub fn zoom(&mut self, factor: f64) -> Redraw {
        self.viewport.zoom(factor);
        self.align_to_start_time();
        Redraw::scrolled()
    }

    fn align_to_start_time(&mut self) {
        let scroll_x = self.viewport.start_time() / self.viewport.time_per_char();
        for pane in PaneId::ALL {
            if pane.scrolls_horizontally() {
                self.panes[pane.index()].x = scroll_x;
            }
        }
    }

    /// Handle a click at `column` of the waves or timeline pane.
    ///
    /// Clicks on the other panes do not move the cursor.
    pub fn on_click(&mut self, pane: PaneId, column: u16) -> Option<Redraw> {
        if !pane.scrolls_horizontally() {
            return None;
        }
        let time = self.viewport.column_to_time(u64::from(column), 0);
        self.viewport.set_cursor(time);
        Some(Redraw {
            values: true,
            cursor: true,
            ..Redraw::default()
        })
    }

    /// Cursor bar position relative to the display's left edge.
    pub fn cursor_overlay(&self) -> CursorOverlay {
        let cursor = self.viewport.cursor_time();
        if !self.viewport.contains(cursor, self.geometry.waves_width) {
            return CursorOverlay::default();
        }
        let column = (cursor - self.viewport.start_time()) / self.viewport.time_per_char();
        // `contains` bounds `column` below `waves_width`.
        let column = column as u16;
        CursorOverlay {
            visible: true,
            column_offset: column
                .saturating_add(self.geometry.names_width)
                .saturating_add(self.geometry.values_width),
        }
    }

    /// Keep the shared vertical offset inside `0..rows`.
    pub fn clamp_rows(&mut self, rows: usize) {
        let max = rows.saturating_sub(1);
        let y = self.scroll_of(PaneId::Waves).y;
        if y > max {
            let x = self.scroll_of(PaneId::Waves).x;
            self.on_scroll(PaneId::Waves, x, max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sync(tpc: u64) -> ScrollSynchronizer {
        ScrollSynchronizer::new(
            Viewport::new(tpc),
            PaneGeometry {
                names_width: 30,
                values_width: 15,
                waves_width: 50,
            },
        )
    }

    #[test]
    fn waves_scroll_drives_start_time_in_one_pass() {
        let mut sync = sync(8000);
        let before = sync.passes();

        let redraw = sync.on_scroll(PaneId::Waves, 4, 0).expect("pass runs");
        assert_eq!(sync.viewport().start_time(), 32_000);
        assert_eq!(sync.scroll_of(PaneId::Timeline).x, 4);
        assert_eq!(sync.passes(), before + 1);
        assert!(redraw.waves && redraw.timeline && redraw.cursor);
    }

    #[test]
    fn timeline_scroll_moves_waves() {
        let mut sync = sync(10);
        sync.on_scroll(PaneId::Timeline, 7, 99);
        assert_eq!(sync.scroll_of(PaneId::Waves).x, 7);
        assert_eq!(sync.viewport().start_time(), 70);
        // The timeline has no rows; vertical offsets stay put.
        assert_eq!(sync.scroll_of(PaneId::Names).y, 0);
        assert_eq!(sync.scroll_of(PaneId::Timeline).y, 0);
    }

    #[test]
    fn vertical_scroll_is_shared_by_row_panes() {
        let mut sync = sync(10);
        sync.on_scroll(PaneId::Names, 0, 3);
        for pane in [PaneId::Names, PaneId::Values, PaneId::Waves] {
            assert_eq!(sync.scroll_of(pane).y, 3);
        }
        assert_eq!(sync.scroll_of(PaneId::Timeline).y, 0);
        // Names and values have no horizontal scroll.
        sync.on_scroll(PaneId::Values, 12, 1);
        assert_eq!(sync.scroll_of(PaneId::Values).x, 0);
        assert_eq!(sync.scroll_of(PaneId::Waves).x, 0);
        assert_eq!(sync.scroll_of(PaneId::Waves).y, 1);
    }

    #[test]
    fn reentrant_notification_is_swallowed() {
        let mut sync = sync(10);
        sync.syncing = true;
        assert_eq!(sync.on_scroll(PaneId::Waves, 5, 0), None);
        assert_eq!(sync.viewport().start_time(), 0);
    }

    #[test]
    fn pan_and_zoom_keep_scroll_aligned() {
        let mut sync = sync(10);
        sync.pan(PanDirection::Right);
        assert_eq!(sync.viewport().start_time(), 100);
        assert_eq!(sync.scroll_of(PaneId::Waves).x, 10);
        assert_eq!(sync.scroll_of(PaneId::Timeline).x, 10);

        sync.zoom(2.0);
        assert_eq!(sync.viewport().time_per_char(), 20);
        assert_eq!(sync.scroll_of(PaneId::Waves).x, 5);
        assert_eq!(sync.viewport().start_time(), 100);

        // Off-grid start times survive zoom; the offsets round down to the
        // column containing them and no pass runs.
        let passes = sync.passes();
        sync.on_scroll(PaneId::Waves, 3, 0);
        assert_eq!(sync.viewport().start_time(), 60);
        sync.zoom(2.0);
        assert_eq!(sync.viewport().time_per_char(), 40);
        assert_eq!(sync.viewport().start_time(), 60);
        assert_eq!(sync.scroll_of(PaneId::Waves).x, 1);
        assert_eq!(sync.scroll_of(PaneId::Timeline).x, 1);
        assert_eq!(sync.passes(), passes + 1);

        // Clicks are measured from the left edge actually drawn.
        sync.on_click(PaneId::Waves, 2);
        assert_eq!(sync.viewport().cursor_time(), 140);
        sync.zoom(0.5);

        sync.pan(PanDirection::Left);
        sync.pan(PanDirection::Left);
        assert_eq!(sync.viewport().start_time(), 0);
    }

    #[test]
    fn click_sets_cursor_from_scroll_and_column() {
        let mut sync = sync(8000);
        sync.on_scroll(PaneId::Waves, 4, 0);
        let redraw = sync.on_click(PaneId::Waves, 6).unwrap();
        assert_eq!(sync.viewport().cursor_time(), 80_000);
        assert!(redraw.values && redraw.cursor);

        sync.on_click(PaneId::Timeline, 0);
        assert_eq!(sync.viewport().cursor_time(), 32_000);

        assert!(sync.on_click(PaneId::Names, 3).is_none());
        assert_eq!(sync.viewport().cursor_time(), 32_000);
    }

    #[test]
    fn cursor_overlay_visibility() {
        let mut sync = sync(10);
        sync.on_scroll(PaneId::Waves, 10, 0);
        sync.on_click(PaneId::Waves, 3);
        assert_eq!(
            sync.cursor_overlay(),
            CursorOverlay {
                visible: true,
                column_offset: 3 + 30 + 15,
            }
        );

        sync.on_scroll(PaneId::Waves, 14, 0);
        assert!(!sync.cursor_overlay().visible);

        sync.on_scroll(PaneId::Waves, 0, 0);
        sync.set_waves_width(10);
        assert!(!sync.cursor_overlay().visible);
        sync.set_waves_width(14);
        assert!(sync.cursor_overlay().visible);
    }

    #[test]
    fn clamp_rows_limits_vertical_offset() {
        let mut sync = sync(10);
        sync.on_scroll(PaneId::Waves, 0, 8);
        sync.clamp_rows(3);
        assert_eq!(sync.scroll_of(PaneId::Names).y, 2);
        sync.clamp_rows(0);
        assert_eq!(sync.scroll_of(PaneId::Values).y, 0);
    }
}
