//! # wavetui - Terminal Waveform Viewer
//!
//! Browse a directory for VCD traces, tick the signals to show, and inspect
//! them as character-cell waveforms with a synchronized timeline, value column
//! and cursor.
//!
//! ## Features
//!
//! - **Waveform Rendering**: Run-length glyph rows for single bits and labelled buses
//! - **Synchronized Panes**: Names, values, waves and timeline scroll as one
//! - **Cursor Readout**: Click a time to read every signal's value at it
//! - **Background Loading**: Traces are parsed off the render loop
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - Defaults, config file and command-line overrides
//! - [`waveform`] - Signal store, viewport, pane renderers and scroll synchronizer
//! - [`trace`] - Trace sources, the VCD loader and the load worker
//! - [`browser`] / [`picker`] - Sidebar lists for files and signals
//! - [`input`] - Terminal input collection and key bindings
//! - [`render`] - Render loop state machine and terminal UI
//! - [`app`] - Application core and component coordination

// Core modules
pub mod config;
pub mod error;
pub mod waveform;

// Data sources and sidebar widgets
pub mod browser;
pub mod picker;
pub mod trace;

// Event flow
pub mod input;
pub mod render;

pub mod app;

// Re-export commonly used types for convenience
pub use error::{Result, WaveError};

// Public API surface for external usage
pub use app::Application;
pub use config::Config;
pub use trace::{InMemoryTrace, TraceSource, VcdTrace};
pub use waveform::{RenderedFrame, WaveformDisplay};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
