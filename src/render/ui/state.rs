//! UI state management structures
//!
//! Everything the render loop mutates and the terminal draws: the waveform
//! display, the two sidebar lists, focus, layout and the status line.

use crate::browser::FileBrowser;
use crate::picker::{PickerEvent, SignalPicker};
use crate::render::ui::layout::ScreenLayout;
use crate::trace::TraceSource;
use crate::waveform::panes::format_time;
use crate::waveform::WaveformDisplay;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Which part of the screen receives keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Browser,
    Picker,
    Waves,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Browser => Focus::Picker,
            Focus::Picker => Focus::Waves,
            Focus::Waves => Focus::Browser,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Browser => Focus::Waves,
            Focus::Picker => Focus::Browser,
            Focus::Waves => Focus::Picker,
        }
    }
}

pub struct ViewState {
    pub display: WaveformDisplay,
    pub browser: FileBrowser,
    pub picker: SignalPicker,
    pub focus: Focus,
    pub status_line: StatusLine,
    pub layout: ScreenLayout,

    /// Trace the picker lists and enabled signals are read from
    pub trace: Option<Arc<dyn TraceSource>>,
    pub trace_path: Option<PathBuf>,

    pub terminal_width: u16,
    pub terminal_height: u16,
}

impl ViewState {
    pub fn new(display: WaveformDisplay, browser: FileBrowser, width: u16, height: u16) -> Self {
        let mut state = Self {
            display,
            browser,
            picker: SignalPicker::default(),
            focus: Focus::default(),
            status_line: StatusLine::new(),
            layout: ScreenLayout::default(),
            trace: None,
            trace_path: None,
            terminal_width: width,
            terminal_height: height,
        };
        state.relayout();
        state
    }

    /// Update terminal dimensions and recompute the layout.
    /// Returns true if dimensions actually changed.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.terminal_width != width || self.terminal_height != height;
        if changed {
            self.terminal_width = width;
            self.terminal_height = height;
            self.relayout();
        }
        changed
    }

    fn relayout(&mut self) {
        let geometry = self.display.synchronizer().geometry();
        self.layout = ScreenLayout::compute(self.terminal_width, self.terminal_height, geometry);
        self.display.set_waves_width(self.layout.waves.width);
    }

    /// Replace the current trace, dropping every enabled signal.
    pub fn install_trace(&mut self, path: PathBuf, trace: Arc<dyn TraceSource>) {
        let names = trace.signal_names();
        self.status_line
            .set_message(format!("Loaded {} signals", names.len()));
        self.display.clear();
        self.picker = SignalPicker::new(names);
        self.trace = Some(trace);
        self.trace_path = Some(path);
        self.focus = Focus::Picker;
    }

    /// Reflect a picker checkbox change in the waveform display.
    pub fn apply_picker_event(&mut self, event: PickerEvent) {
        match event {
            PickerEvent::Enabled(name) => {
                let data = self.trace.as_ref().and_then(|trace| trace.signal(&name));
                match data {
                    Some(data) => self.display.add_signal(&name, data),
                    None => log::debug!("signal {name} not in the current trace"),
                }
            }
            PickerEvent::Disabled(name) => self.display.remove_signal(&name),
        }
    }

    /// Get the filename for display
    pub fn filename(&self) -> String {
        self.trace_path
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
            .unwrap_or("<no trace>")
            .to_string()
    }

    /// Format the complete status line for this view state
    pub fn format_status_line(&self) -> String {
        let viewport = self.display.viewport();
        self.status_line.format_status_line(
            &self.filename(),
            viewport.cursor_time(),
            viewport.time_per_char(),
        )
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a temporary message
    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    /// Clear any temporary message. Returns whether there was one.
    pub fn clear_message(&mut self) -> bool {
        self.message.take().is_some()
    }

    /// Format the status line for display
    pub fn format_status_line(&self, filename: &str, cursor_time: u64, time_per_char: u64) -> String {
        let position = format!(
            "cursor {} | {}/col",
            format_time(cursor_time),
            format_time(time_per_char)
        );
        if let Some(ref message) = self.message {
            format!("{} | {} | {}", filename, position, message)
        } else {
            format!("{} | {}", filename, position)
        }
    }
}
