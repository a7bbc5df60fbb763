//! Run-length waveform synthesis.
//!
//! Each row is built by walking the signal from `start_time`: look up the value
//! at the current time, find the next change, and emit one run covering every
//! column until that change. Rows are exactly `width` columns; the last run is
//! clipped, but glyph placement inside it (bus labels, closing edge) is computed
//! against its full length so scrolling does not shift labels around.

use crate::waveform::frame::{Emphasis, StyledLine, StyledRun};
use crate::waveform::sample::{bus_label, next_change_at, value_at, HIGH_Z};
use crate::waveform::store::StoredSignal;
use crate::waveform::viewport::Viewport;
use ratatui::style::Color;

pub const LOW_GLYPH: char = '_';
pub const HIGH_GLYPH: char = '─';
pub const UNKNOWN_GLYPH: char = '▒';
pub const HIGH_Z_GLYPH: char = ' ';
pub const TRANSITION_GLYPH: char = '│';
pub const BUS_EDGE_GLYPH: char = '=';

/// Render one signal's row.
pub fn render_wave(
    signal: &StoredSignal,
    viewport: &Viewport,
    end_time: u64,
    width: u16,
    error_color: Color,
) -> StyledLine {
    let tpc = viewport.time_per_char();
    let fallback = end_time.saturating_add(tpc);
    let width = u64::from(width);

    let mut line = StyledLine::new();
    let mut col = 0u64;
    let mut current_time = viewport.column_to_time(0, 0);

    while col < width {
        let value = value_at(&signal.samples, current_time);
        let next_change = next_change_at(&signal.samples, current_time, fallback);
        let run = (next_change.saturating_sub(current_time) / tpc).max(1);
        let visible = run.min(width - col);

        if signal.width == 1 {
            let transition = col > 0
                && value_at(&signal.samples, current_time.saturating_sub(tpc)) != value;
            push_bit_run(&mut line, value, transition, visible, signal.color, error_color);
        } else {
            push_bus_run(&mut line, value, run, visible, signal.color);
        }

        col += visible;
        current_time = current_time.saturating_add(run.saturating_mul(tpc));
    }

    line
}

fn push_bit_run(
    line: &mut StyledLine,
    value: &str,
    transition: bool,
    columns: u64,
    color: Color,
    error_color: Color,
) {
    let (glyph, color, emphasis) = match value {
        "0" => (LOW_GLYPH, color, Emphasis::Normal),
        "1" => (HIGH_GLYPH, color, Emphasis::Normal),
        HIGH_Z => (HIGH_Z_GLYPH, color, Emphasis::Dim),
        _ => (UNKNOWN_GLYPH, error_color, Emphasis::Normal),
    };

    let lead = if transition { TRANSITION_GLYPH } else { glyph };
    let mut text = String::with_capacity(columns as usize * glyph.len_utf8());
    text.push(lead);
    text.extend(std::iter::repeat(glyph).take(columns.saturating_sub(1) as usize));
    line.push(StyledRun::new(text, color, emphasis));
}

/// Emit the first `visible` columns of a bus field spanning `run` columns.
///
/// Layout: edge, interior, edge. The interior carries the centered label
/// `" <label> "` when it fits in `run - 2` columns, otherwise edge fill. Odd
/// padding puts the extra space on the right.
fn push_bus_run(line: &mut StyledLine, value: &str, run: u64, visible: u64, color: Color) {
    let label: Vec<char> = format!(" {} ", bus_label(value)).chars().collect();
    let interior = run.saturating_sub(2);
    let label_len = label.len() as u64;
    let fits = run >= 2 && label_len <= interior;
    let left_pad = if fits { (interior - label_len) / 2 } else { 0 };

    for i in 0..visible {
        if i == 0 || i == run - 1 {
            line.push(StyledRun::plain(BUS_EDGE_GLYPH.to_string(), color));
        } else if fits {
            let j = i - 1;
            let glyph = if j >= left_pad && j < left_pad + label_len {
                label[(j - left_pad) as usize]
            } else {
                ' '
            };
            line.push(StyledRun::new(glyph.to_string(), color, Emphasis::Reverse));
        } else {
            line.push(StyledRun::plain(BUS_EDGE_GLYPH.to_string(), color));
        }
    }
}
