//! Trace stores
//!
//! A [`TraceStore`] receives finished traces as documents. Backends:
//! - [`HttpTraceStore`]: document-store data API over HTTPS
//! - [`FileTraceStore`]: one JSON file per trace
//! - [`MemoryTraceStore`]: in-process, for tests

mod file;
mod http;
mod memory;
mod store;

pub use file::FileTraceStore;
pub use http::{HttpStoreConfig, HttpTraceStore};
pub use memory::MemoryTraceStore;
pub use store::TraceStore;
