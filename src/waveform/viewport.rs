//! The visible time window shared by every synchronized pane.

/// Fraction of the visible width moved by a single pan step.
const PAN_FRACTION: f64 = 0.2;

/// Zoom factor applied by the zoom-in command.
pub const ZOOM_IN_FACTOR: f64 = 0.5;

/// Zoom factor applied by the zoom-out command.
pub const ZOOM_OUT_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
}

/// Time window and zoom level. `time_per_char` is never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    start_time: u64,
    time_per_char: u64,
    cursor_time: u64,
}

impl Viewport {
    pub fn new(time_per_char: u64) -> Self {
        Self {
            start_time: 0,
            time_per_char: time_per_char.max(1),
            cursor_time: 0,
        }
    }

    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    pub fn time_per_char(&self) -> u64 {
        self.time_per_char
    }

    pub fn cursor_time(&self) -> u64 {
        self.cursor_time
    }

    pub fn set_start_time(&mut self, start_time: u64) {
        self.start_time = start_time;
    }

    /// Shift the window by a fifth of the visible width. Never goes below time 0.
    pub fn pan(&mut self, direction: PanDirection, visible_width: u16) {
        let step_cols = (f64::from(visible_width) * PAN_FRACTION).round() as u64;
        let delta = step_cols.saturating_mul(self.time_per_char);
        self.start_time = match direction {
            PanDirection::Left => self.start_time.saturating_sub(delta),
            PanDirection::Right => self.start_time.saturating_add(delta),
        };
    }

    /// Scale the time represented by one column, clamped to at least 1.
    ///
    /// Factors that are not strictly positive and finite are ignored.
    pub fn zoom(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("ignoring invalid zoom factor {factor}");
            return;
        }
        let scaled = (self.time_per_char as f64 * factor).round();
        // `as` saturates at u64::MAX for huge values.
        self.time_per_char = (scaled as u64).max(1);
    }

    /// Time shown at `col` of a pane scrolled by `pane_scroll_x` columns past `start_time`.
    pub fn column_to_time(&self, col: u64, pane_scroll_x: u64) -> u64 {
        self.start_time
            .saturating_add(pane_scroll_x.saturating_add(col).saturating_mul(self.time_per_char))
    }

    /// Store the cursor time. Out-of-window values are legal.
    pub fn set_cursor(&mut self, time: u64) {
        self.cursor_time = time;
    }

    /// Time covered by `width` columns.
    pub fn visible_span(&self, width: u16) -> u64 {
        u64::from(width).saturating_mul(self.time_per_char)
    }

    /// Whether `time` falls inside the window `[start_time, start_time + span)`.
    pub fn contains(&self, time: u64, width: u16) -> bool {
        time >= self.start_time && time - self.start_time < self.visible_span(width)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TIME_PER_CHAR)
    }
}
