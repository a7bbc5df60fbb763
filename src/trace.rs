//! Trace sources: where signal data comes from and how it is loaded.

pub mod dump;
pub mod source;
pub mod validation;
pub mod worker;

pub use dump::VcdTrace;
pub use source::{InMemoryTrace, TraceSource};
pub use validation::{is_trace_file, validate_trace_path};
pub use worker::trace_worker_loop;
