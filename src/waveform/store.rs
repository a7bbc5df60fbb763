//! The set of signals currently shown in the waveform display.
//!
//! Display order is always the lexicographic name order. Colors are handed out
//! from a cyclic palette by a cursor that only ever moves forward: a signal's
//! color depends on how many signals were added before it over the whole
//! session, not on which ones are still present. Removing a signal does not free
//! its palette slot, and `end_time` never shrinks.

use crate::waveform::sample::{Sample, SignalData};
use ratatui::style::Color;
use std::collections::BTreeMap;

/// Palette used when no theme overrides it.
pub const DEFAULT_PALETTE: [Color; 6] = [
    Color::LightGreen,
    Color::LightCyan,
    Color::LightMagenta,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightRed,
];

/// A visible signal together with its assigned color.
#[derive(Debug, Clone)]
pub struct StoredSignal {
    pub width: u32,
    pub samples: Vec<Sample>,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct SignalStore {
    signals: BTreeMap<String, StoredSignal>,
    palette: Vec<Color>,
    color_cursor: usize,
    end_time: u64,
}

impl SignalStore {
    pub fn new() -> Self {
        Self::with_palette(DEFAULT_PALETTE.to_vec())
    }

    /// Create a store drawing colors from `palette`. An empty palette falls back
    /// to [`DEFAULT_PALETTE`].
    pub fn with_palette(palette: Vec<Color>) -> Self {
        let palette = if palette.is_empty() {
            DEFAULT_PALETTE.to_vec()
        } else {
            palette
        };
        Self {
            signals: BTreeMap::new(),
            palette,
            color_cursor: 0,
            end_time: 0,
        }
    }

    /// Insert a signal. Does nothing if `name` is already present.
    pub fn add(&mut self, name: &str, data: SignalData) {
        if self.signals.contains_key(name) {
            return;
        }

        let color = self.palette[self.color_cursor % self.palette.len()];
        self.color_cursor += 1;
        if let Some(last) = data.last_time() {
            self.end_time = self.end_time.max(last);
        }

        log::debug!(
            "adding signal {name} (width {}, {} samples)",
            data.width,
            data.samples.len()
        );
        self.signals.insert(
            name.to_string(),
            StoredSignal {
                width: data.width,
                samples: data.samples,
                color,
            },
        );
    }

    /// Remove a signal. Does nothing if `name` is absent. `end_time` is left as is.
    pub fn remove(&mut self, name: &str) {
        if self.signals.remove(name).is_some() {
            log::debug!("removed signal {name}");
        }
    }

    /// Names of all signals, ascending.
    pub fn signals_in_display_order(&self) -> impl Iterator<Item = &str> + '_ {
        self.signals.keys().map(String::as_str)
    }

    /// Signals with their names, ascending by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StoredSignal)> + '_ {
        self.signals.iter().map(|(name, signal)| (name.as_str(), signal))
    }

    pub fn get(&self, name: &str) -> Option<&StoredSignal> {
        self.signals.get(name)
    }

    pub fn color_of(&self, name: &str) -> Option<Color> {
        self.signals.get(name).map(|signal| signal.color)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.signals.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Latest last-sample time over every signal added so far.
    pub fn end_time(&self) -> u64 {
        self.end_time
    }

    /// Drop every signal and start a fresh color history, for loading a new trace.
    pub fn reset(&mut self) {
        self.signals.clear();
        self.color_cursor = 0;
        self.end_time = 0;
    }
}

impl Default for SignalStore {
    fn default() -> Self {
        Self::new()
    }
}
