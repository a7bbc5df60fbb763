//! Rendering subsystem: the render loop state machine, the protocol spoken with
//! the trace load worker, and the terminal UI.

pub mod protocol;
pub mod service;
pub mod ui;

pub use service::RenderLoopState;
