//! Gateway adapters for the document-retrieval backend.
//!
//! `HttpGateway` talks to a real backend over REST; `MemoryGateway` is a
//! self-contained in-process backend for development and tests.

pub mod http;
pub mod memory;

pub use http::HttpGateway;
pub use memory::MemoryGateway;
