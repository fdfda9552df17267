//! Error types for Tracecast
//!
//! Library code returns [`TracecastResult`]. Tool failures are not errors at
//! this level: the tool registry turns them into trace data.

mod constructors;
mod conversions;
mod types;

pub use types::{TracecastError, TracecastResult};
