//! Orchestration of gateway calls over the browsing state.
//!
//! The `Navigator` is the single entry point a shell drives: it owns the
//! `BrowserState`, the search debouncer, the upload tracker, and the modal
//! coordinator, and issues every gateway call with the generation token the
//! state handed out, so slow responses that were superseded are dropped
//! instead of applied.

use std::sync::Arc;
use std::time::Duration;

use docdeck_core::config::ClientConfig;
use docdeck_core::format::is_valid_collection_name;
use docdeck_core::models::{Collection, DistanceMetric, DocumentSummary, FileUpload, UploadItem, UploadKind};
use docdeck_core::{Result, RetrievalGateway, SearchFilter};

use crate::modal::ModalCoordinator;
use crate::search::SearchDebouncer;
use crate::state::{BrowserState, ViewMode};
use crate::upload::UploadTracker;

/// The operational knobs the navigator reads from the layered config once,
/// at construction.
#[derive(Debug, Clone)]
pub struct NavigatorSettings {
    pub search_limit: usize,
    pub min_score: f32,
    pub debounce: Duration,
    pub retention: Duration,
    pub max_chunk_size: usize,
    pub chunk_overlap: usize,
}

impl From<&ClientConfig> for NavigatorSettings {
    fn from(config: &ClientConfig) -> Self {
        Self {
            search_limit: config.search_limit.value,
            min_score: config.min_score.value,
            debounce: Duration::from_millis(config.debounce_ms.value),
            retention: Duration::from_millis(config.retention_ms.value),
            max_chunk_size: config.max_chunk_size.value,
            chunk_overlap: config.chunk_overlap.value,
        }
    }
}

pub struct Navigator {
    gateway: Arc<dyn RetrievalGateway>,
    state: BrowserState,
    debouncer: SearchDebouncer,
    tracker: UploadTracker,
    modal: ModalCoordinator,
    settings: NavigatorSettings,
}

impl Navigator {
    pub fn new(gateway: Arc<dyn RetrievalGateway>, settings: NavigatorSettings) -> Self {
        let debouncer = SearchDebouncer::new(settings.debounce);
        Self {
            gateway,
            state: BrowserState::new(),
            debouncer,
            tracker: UploadTracker::new(),
            modal: ModalCoordinator::new(),
            settings,
        }
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn uploads(&self) -> &[UploadItem] {
        self.tracker.items()
    }

    /// Dismiss the displayed error, like closing a toast.
    pub fn clear_error(&mut self) {
        self.state.clear_error();
    }

    pub fn settings(&self) -> &NavigatorSettings {
        &self.settings
    }

    /// Reconcile a shell-owned sidebar flag with the dialog state. Call
    /// after any operation that may have opened or closed a dialog.
    pub fn sync_sidebar(&mut self, sidebar_open: &mut bool) {
        self.modal.sync(self.state.any_modal_open(), sidebar_open);
    }

    // ------------------------------------------------------------------
    // Navigation

    pub async fn refresh_collections(&mut self) {
        let generation = self.state.begin_collections_fetch();
        let result = self.gateway.list_collections().await;
        self.state.apply_collections(generation, result);
    }

    /// Enter the Documents view for `collection` and load its listing. A
    /// pending debounced search belongs to the abandoned view and is
    /// cancelled first.
    pub async fn select_collection(&mut self, collection: Collection) {
        self.debouncer.cancel();
        let name = collection.collection_name.clone();
        let generation = self.state.select_collection(collection);
        let result = self.gateway.list_documents(&name).await;
        self.state.apply_documents(generation, result);
    }

    /// Enter the DocumentDetail view for `document` and load its chunks.
    pub async fn select_document(&mut self, document: DocumentSummary) {
        let Some(collection) = self.state.selected_collection() else {
            return;
        };
        let collection = collection.collection_name.clone();

        self.debouncer.cancel();
        let document_id = document.document_id.clone();
        let generation = self.state.select_document(document);
        let result = self.gateway.document_detail(&collection, &document_id).await;
        self.state.apply_detail(generation, result);
    }

    pub fn go_back(&mut self) {
        self.debouncer.cancel();
        self.state.go_back();
    }

    /// Re-fetch the document listing for the current collection.
    pub async fn refresh_documents(&mut self) {
        let Some(collection) = self.state.selected_collection() else {
            return;
        };
        let collection = collection.collection_name.clone();

        let generation = self.state.begin_documents_fetch();
        let result = self.gateway.list_documents(&collection).await;
        self.state.apply_documents(generation, result);
    }

    // ------------------------------------------------------------------
    // Search

    /// Record a query edit. A non-empty query in the DocumentDetail view
    /// (re)starts the quiet-period timer; anything else cancels the timer
    /// and clears the results immediately.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.state.set_search_query(query.clone());

        let trimmed = query.trim();
        if self.state.view() == ViewMode::DocumentDetail && !trimmed.is_empty() {
            self.debouncer.schedule(trimmed);
        } else {
            self.debouncer.cancel();
            self.state.clear_search_results();
        }
    }

    /// Run the search for a query whose quiet period expired, if any. A
    /// shell polls this from its event loop.
    pub async fn poll_search(&mut self) {
        if let Some(query) = self.debouncer.try_settled() {
            self.run_search(query).await;
        }
    }

    /// Wait for the next settled query and run it. Used by shells that
    /// dedicate a task to search instead of polling.
    pub async fn next_settled_search(&mut self) {
        if let Some(query) = self.debouncer.settled().await {
            self.run_search(query).await;
        }
    }

    async fn run_search(&mut self, query: String) {
        let Some(collection) = self.state.selected_collection() else {
            return;
        };
        let collection = collection.collection_name.clone();

        // Searching from the detail view is scoped to the open document.
        let filter = self
            .state
            .selected_document()
            .map(|d| SearchFilter { document_id: d.document_id.clone() });

        let generation = self.state.begin_search();
        let result = self
            .gateway
            .search(
                &collection,
                &query,
                self.settings.search_limit,
                self.settings.min_score,
                filter.as_ref(),
            )
            .await;
        self.state.apply_search(generation, result);
    }

    // ------------------------------------------------------------------
    // Create collection

    pub fn open_create_dialog(&mut self) {
        self.state.open_create_dialog();
    }

    pub fn close_create_dialog(&mut self) {
        self.state.close_create_dialog();
    }

    pub fn set_new_collection_name(&mut self, name: impl Into<String>) {
        self.state.set_new_collection_name(name);
    }

    pub fn set_new_collection_description(&mut self, description: impl Into<String>) {
        self.state.set_new_collection_description(description);
    }

    /// Submit the create-collection form. The name is validated locally;
    /// an invalid name sets the error slot and never reaches the backend.
    /// On backend failure the dialog stays open with the form intact.
    pub async fn submit_create_collection(&mut self) {
        let name = self.state.new_collection_name().trim().to_string();
        if !is_valid_collection_name(&name) {
            self.state.set_error(
                "Collection name must be non-empty and contain only letters, digits, '_' or '-'",
            );
            return;
        }

        let description = self.state.new_collection_description().trim().to_string();
        let description = if description.is_empty() { None } else { Some(description) };

        self.state.begin_mutation();
        let result = self
            .gateway
            .create_collection(&name, DistanceMetric::Cosine, description.as_deref())
            .await;
        self.state.end_mutation();

        match result {
            Ok(()) => {
                self.state.create_succeeded();
                self.refresh_collections().await;
            }
            Err(e) => {
                tracing::warn!(collection = %name, error = %e, "create collection failed");
                self.state.set_error(format!("Failed to create collection: {}", e));
            }
        }
    }

    // ------------------------------------------------------------------
    // Two-phase deletes

    pub fn request_delete_collection(&mut self, collection: Collection) {
        self.state.request_delete_collection(collection);
    }

    pub fn cancel_delete_collection(&mut self) {
        self.state.cancel_delete_collection();
    }

    /// Execute the staged collection delete. On failure the stage and the
    /// dialog stay as they were, so the user can retry or cancel.
    pub async fn confirm_delete_collection(&mut self) {
        let Some(target) = self.state.collection_to_delete() else {
            return;
        };
        let name = target.collection_name.clone();

        self.state.begin_mutation();
        let result = self.gateway.delete_collection(&name).await;
        self.state.end_mutation();

        match result {
            Ok(()) => {
                self.state.delete_collection_succeeded(&name);
                self.refresh_collections().await;
            }
            Err(e) => {
                tracing::warn!(collection = %name, error = %e, "delete collection failed");
                self.state.set_error(format!("Failed to delete collection: {}", e));
            }
        }
    }

    pub fn request_delete_document(&mut self, document: DocumentSummary) {
        self.state.request_delete_document(document);
    }

    pub fn cancel_delete_document(&mut self) {
        self.state.cancel_delete_document();
    }

    pub async fn confirm_delete_document(&mut self) {
        let Some(collection) = self.state.selected_collection() else {
            return;
        };
        let collection = collection.collection_name.clone();
        let Some(target) = self.state.document_to_delete() else {
            return;
        };
        let document_id = target.document_id.clone();

        self.state.begin_mutation();
        let result = self.gateway.delete_document(&collection, &document_id).await;
        self.state.end_mutation();

        match result {
            Ok(()) => {
                self.state.delete_document_succeeded(&document_id);
                self.refresh_documents().await;
            }
            Err(e) => {
                tracing::warn!(document = %document_id, error = %e, "delete document failed");
                self.state.set_error(format!("Failed to delete document: {}", e));
            }
        }
    }

    // ------------------------------------------------------------------
    // Uploads

    /// Upload a batch into the selected collection, refresh the listing
    /// once every file has settled, keep the finished batch visible for
    /// the retention window, then drop it.
    pub async fn upload_files(&mut self, files: Vec<FileUpload>, kind: UploadKind) -> Result<()> {
        let Some(collection) = self.state.selected_collection() else {
            self.state.set_error("Select a collection before uploading");
            return Ok(());
        };
        let collection = collection.collection_name.clone();

        let gateway = Arc::clone(&self.gateway);
        self.tracker
            .run_batch(
                gateway.as_ref(),
                &collection,
                &files,
                kind,
                self.settings.max_chunk_size,
                self.settings.chunk_overlap,
            )
            .await?;

        self.refresh_documents().await;

        tokio::time::sleep(self.settings.retention).await;
        self.tracker.clear();
        Ok(())
    }
}
