//! Text synthesis for the names, values and timeline panes.

use crate::waveform::frame::{Emphasis, StyledLine, StyledRun};
use crate::waveform::sample::{display_value, value_at};
use crate::waveform::store::SignalStore;
use crate::waveform::viewport::Viewport;
use ratatui::style::Color;

/// Columns between two timeline ticks.
pub const TICK_SPACING_COLUMNS: u64 = 12;

/// Glyph drawn in front of every timeline label.
pub const TICK_SEPARATOR: &str = "|";

/// One line per signal, in display order, drawn in the signal's color.
pub fn render_names(store: &SignalStore) -> Vec<StyledLine> {
    store
        .iter()
        .map(|(name, signal)| {
            let mut line = StyledLine::new();
            line.push(StyledRun::plain(name, signal.color));
            line
        })
        .collect()
}

/// One line per signal with its value at `cursor_time`.
pub fn render_values(store: &SignalStore, cursor_time: u64) -> Vec<StyledLine> {
    store
        .iter()
        .map(|(_, signal)| {
            let value = value_at(&signal.samples, cursor_time);
            let mut line = StyledLine::new();
            line.push(StyledRun::new(
                display_value(value),
                signal.color,
                Emphasis::Bold,
            ));
            line
        })
        .collect()
}

/// Time ruler for `width` columns starting at the viewport's `start_time`.
///
/// Ticks sit every [`TICK_SPACING_COLUMNS`] columns on multiples of the tick
/// spacing, the first one at or after `start_time`. A label that would overlap
/// the previous one is skipped.
pub fn render_timeline(viewport: &Viewport, width: u16, color: Color) -> StyledLine {
    let tpc = viewport.time_per_char();
    let spacing = TICK_SPACING_COLUMNS.saturating_mul(tpc);
    let start = viewport.start_time();
    let width = usize::from(width);

    let mut text = String::with_capacity(width);
    let mut columns = 0usize;
    let mut tick = start.div_ceil(spacing).saturating_mul(spacing);

    loop {
        let pos = ((tick - start) / tpc) as usize;
        if pos >= width {
            break;
        }
        if pos >= columns {
            text.extend(std::iter::repeat(' ').take(pos - columns));
            let label = format!("{TICK_SEPARATOR} {}", format_time(tick));
            columns = pos + label.chars().count();
            text.push_str(&label);
        }
        match tick.checked_add(spacing) {
            Some(next) => tick = next,
            None => break,
        }
    }

    if columns < width {
        text.extend(std::iter::repeat(' ').take(width - columns));
    }
    let clipped: String = text.chars().take(width).collect();
    let mut line = StyledLine::new();
    line.push(StyledRun::plain(clipped, color));
    line
}

/// Human-readable form of a picosecond timestamp.
pub fn format_time(time_ps: u64) -> String {
    match time_ps {
        0 => "0.0ps".to_string(),
        t if t < 1_000 => format!("{t}ps"),
        t if t < 1_000_000 => format!("{:.1}ns", t as f64 / 1e3),
        t if t < 1_000_000_000 => format!("{:.1}us", t as f64 / 1e6),
        t => format!("{:.1}ms", t as f64 / 1e9),
    }
}
