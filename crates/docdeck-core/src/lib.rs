//! DocDeck Core - Domain models, gateway port, and configuration
//!
//! This crate contains the data shapes shared with the retrieval backend,
//! the `RetrievalGateway` port that adapters implement, the error taxonomy,
//! and the pure formatting helpers used by presentation layers.

pub mod config;
pub mod error;
pub mod format;
pub mod gateway;
pub mod models;

pub use error::{DocdeckError, Result};
pub use gateway::{RetrievalGateway, SearchFilter};
