//! DocDeck Client - the navigation and operation state machine
//!
//! This crate owns the browsing state (current view, selected collection and
//! document, listings, search results, dialogs) and orchestrates gateway
//! calls, debounced search, and sequential upload batches on top of it.
//! Rendering is external: a shell reads `BrowserState` and drives the
//! `Navigator`.

pub mod modal;
pub mod navigator;
pub mod search;
pub mod state;
pub mod upload;

pub use modal::ModalCoordinator;
pub use navigator::{Navigator, NavigatorSettings};
pub use search::SearchDebouncer;
pub use state::{BrowserState, ViewMode};
pub use upload::UploadTracker;
