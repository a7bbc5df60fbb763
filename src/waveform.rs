//! Waveform rendering and viewport synchronization engine.
//!
//! Data flows one way: the [`store`] holds the visible signals, the
//! [`viewport`] holds the time window, and the pane renderers ([`wave`],
//! [`panes`]) turn both into a [`frame::RenderedFrame`]. User input reaches the
//! viewport through the [`sync::ScrollSynchronizer`], which keeps the four panes
//! aligned.

pub mod display;
pub mod frame;
pub mod panes;
pub mod sample;
pub mod store;
pub mod sync;
pub mod viewport;
pub mod wave;

pub use display::{DisplayColors, WaveformDisplay};
pub use frame::{CursorOverlay, Emphasis, RenderedFrame, StyledLine, StyledRun};
pub use sample::{Sample, SignalData};
pub use store::SignalStore;
pub use sync::{PaneGeometry, PaneId, Redraw, ScrollSynchronizer};
pub use viewport::{PanDirection, Viewport};
