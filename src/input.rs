//! Input subsystem: terminal event collection and key bindings.

pub mod raw;
pub mod service;

// Modules outside this crate should prefer importing from `crate::input`
// rather than reaching into submodules.
pub use raw::WheelDirection;
pub use service::{spawn_input_thread, InputAction, InputService, KeyBindings};
