//! Browsing state and its named transitions.
//!
//! All mutation of the view, selections, listings, and dialogs goes through
//! the methods on `BrowserState`. Each transition that invalidates a
//! selection clears the dependent data before the replacing fetch is issued,
//! so a stale selection is never observable. Fetch results are applied
//! through generation-checked `apply_*` methods; a response whose generation
//! no longer matches the context is dropped.

use docdeck_core::error::Result;
use docdeck_core::models::{
    Collection, DocumentDetail, DocumentListing, DocumentSummary, SearchResponse, SearchResult,
};

/// The three views of the browsing interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Collections,
    Documents,
    DocumentDetail,
}

/// Generation counters, one per fetch context.
///
/// A fetch captures the counter at issue time; the counter is bumped by
/// every transition that invalidates that context, and `apply_*` drops
/// responses whose captured generation is stale.
#[derive(Debug, Clone, Copy, Default)]
struct Generations {
    collections: u64,
    documents: u64,
    detail: u64,
    search: u64,
}

/// The single state value behind the browsing interface.
#[derive(Debug, Default)]
pub struct BrowserState {
    view: ViewMode,

    collections: Vec<Collection>,
    selected_collection: Option<Collection>,
    documents: Vec<DocumentSummary>,
    selected_document: Option<DocumentSummary>,
    document_detail: Option<DocumentDetail>,

    search_query: String,
    search_results: Vec<SearchResult>,
    searching: bool,

    loading: bool,
    error: Option<String>,

    // Dialogs
    show_create: bool,
    new_name: String,
    new_description: String,
    collection_to_delete: Option<Collection>,
    document_to_delete: Option<DocumentSummary>,

    generations: Generations,
}

impl BrowserState {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Read access

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn selected_collection(&self) -> Option<&Collection> {
        self.selected_collection.as_ref()
    }

    pub fn documents(&self) -> &[DocumentSummary] {
        &self.documents
    }

    pub fn selected_document(&self) -> Option<&DocumentSummary> {
        self.selected_document.as_ref()
    }

    pub fn document_detail(&self) -> Option<&DocumentDetail> {
        self.document_detail.as_ref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn search_results(&self) -> &[SearchResult] {
        &self.search_results
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn show_create_dialog(&self) -> bool {
        self.show_create
    }

    pub fn new_collection_name(&self) -> &str {
        &self.new_name
    }

    pub fn new_collection_description(&self) -> &str {
        &self.new_description
    }

    pub fn collection_to_delete(&self) -> Option<&Collection> {
        self.collection_to_delete.as_ref()
    }

    pub fn document_to_delete(&self) -> Option<&DocumentSummary> {
        self.document_to_delete.as_ref()
    }

    /// Logical OR over the create and both delete-confirmation dialogs,
    /// consumed by `ModalCoordinator`.
    pub fn any_modal_open(&self) -> bool {
        self.show_create || self.collection_to_delete.is_some() || self.document_to_delete.is_some()
    }

    /// Title for the current view, built from the active selection.
    pub fn header_title(&self) -> String {
        match self.view {
            ViewMode::Collections => "Collections".to_string(),
            ViewMode::Documents => match &self.selected_collection {
                Some(c) => format!("{} - Documents", c.display_name),
                None => "Documents".to_string(),
            },
            ViewMode::DocumentDetail => match &self.selected_document {
                Some(d) => format!("{} - Document detail", d.file_name),
                None => "Document detail".to_string(),
            },
        }
    }

    // ------------------------------------------------------------------
    // Error slot

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // ------------------------------------------------------------------
    // Collections

    /// Start a collection-list fetch. Returns the generation the response
    /// must carry to be applied.
    pub fn begin_collections_fetch(&mut self) -> u64 {
        self.loading = true;
        self.error = None;
        self.generations.collections += 1;
        self.generations.collections
    }

    /// Apply a collection-list response. Prior data stays in place on
    /// failure. Returns false when the response was stale and dropped.
    pub fn apply_collections(&mut self, generation: u64, result: Result<Vec<Collection>>) -> bool {
        if generation != self.generations.collections {
            tracing::debug!(generation, "dropping stale collections response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(collections) => self.collections = collections,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load collections");
                self.error = Some("Failed to load collections".to_string());
            }
        }
        true
    }

    /// Select a collection and move to the Documents view. Clears the
    /// document selection, detail, and search state before the document
    /// fetch is issued.
    pub fn select_collection(&mut self, collection: Collection) -> u64 {
        self.selected_collection = Some(collection);
        self.selected_document = None;
        self.document_detail = None;
        self.search_query.clear();
        self.search_results.clear();
        self.view = ViewMode::Documents;

        self.loading = true;
        self.error = None;
        self.generations.documents += 1;
        self.generations.documents
    }

    /// Apply a document-list response for the selected collection.
    pub fn apply_documents(&mut self, generation: u64, result: Result<DocumentListing>) -> bool {
        if generation != self.generations.documents {
            tracing::debug!(generation, "dropping stale document-list response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(listing) => self.documents = listing.documents,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load documents");
                self.error = Some("Failed to load documents".to_string());
            }
        }
        true
    }

    /// Re-issue the document fetch for the current collection, e.g. after
    /// an upload batch or a document delete.
    pub fn begin_documents_fetch(&mut self) -> u64 {
        self.loading = true;
        self.error = None;
        self.generations.documents += 1;
        self.generations.documents
    }

    // ------------------------------------------------------------------
    // Document detail

    /// Select a document and move to the DocumentDetail view. Clears the
    /// previous detail and search state before the detail fetch is issued.
    pub fn select_document(&mut self, document: DocumentSummary) -> u64 {
        self.selected_document = Some(document);
        self.document_detail = None;
        self.search_query.clear();
        self.search_results.clear();
        self.view = ViewMode::DocumentDetail;

        self.loading = true;
        self.error = None;
        self.generations.detail += 1;
        self.generations.detail
    }

    pub fn apply_detail(&mut self, generation: u64, result: Result<DocumentDetail>) -> bool {
        if generation != self.generations.detail {
            tracing::debug!(generation, "dropping stale document-detail response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(detail) => self.document_detail = Some(detail),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load document detail");
                self.error = Some("Failed to load document detail".to_string());
            }
        }
        true
    }

    // ------------------------------------------------------------------
    // Navigation

    /// One step up: DocumentDetail -> Documents -> Collections. Clears the
    /// selection that owned the abandoned view.
    pub fn go_back(&mut self) {
        match self.view {
            ViewMode::DocumentDetail => {
                self.view = ViewMode::Documents;
                self.selected_document = None;
                self.document_detail = None;
                self.search_query.clear();
                self.search_results.clear();
                self.generations.detail += 1;
                self.generations.search += 1;
            }
            ViewMode::Documents => {
                self.view = ViewMode::Collections;
                self.selected_collection = None;
                self.documents.clear();
                self.generations.documents += 1;
            }
            ViewMode::Collections => {}
        }
    }

    // ------------------------------------------------------------------
    // Search

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn begin_search(&mut self) -> u64 {
        self.searching = true;
        self.error = None;
        self.generations.search += 1;
        self.generations.search
    }

    pub fn apply_search(&mut self, generation: u64, result: Result<SearchResponse>) -> bool {
        if generation != self.generations.search {
            tracing::debug!(generation, "dropping stale search response");
            return false;
        }
        self.searching = false;
        match result {
            Ok(response) => self.search_results = response.results,
            Err(e) => {
                tracing::warn!(error = %e, "search failed");
                self.error = Some("Search failed".to_string());
            }
        }
        true
    }

    /// Immediate clear on empty query or view exit; also invalidates any
    /// in-flight search.
    pub fn clear_search_results(&mut self) {
        self.search_results.clear();
        self.searching = false;
        self.generations.search += 1;
    }

    // ------------------------------------------------------------------
    // Create-collection dialog

    pub fn open_create_dialog(&mut self) {
        self.show_create = true;
    }

    pub fn close_create_dialog(&mut self) {
        self.show_create = false;
    }

    pub fn set_new_collection_name(&mut self, name: impl Into<String>) {
        self.new_name = name.into();
    }

    pub fn set_new_collection_description(&mut self, description: impl Into<String>) {
        self.new_description = description.into();
    }

    /// Close the dialog and reset the form after a successful create.
    pub fn create_succeeded(&mut self) {
        self.show_create = false;
        self.new_name.clear();
        self.new_description.clear();
    }

    // ------------------------------------------------------------------
    // Two-phase deletes

    /// Stage a collection for deletion and open the confirmation dialog.
    /// Nothing is deleted yet.
    pub fn request_delete_collection(&mut self, collection: Collection) {
        self.collection_to_delete = Some(collection);
    }

    /// Drop the staged target without touching the backend.
    pub fn cancel_delete_collection(&mut self) {
        self.collection_to_delete = None;
    }

    /// The backend confirmed the delete: close the dialog, clear the staged
    /// target, and if the deleted collection was the selected one, drop the
    /// whole selection chain and return to the Collections view.
    pub fn delete_collection_succeeded(&mut self, name: &str) {
        self.collection_to_delete = None;

        let was_selected = self
            .selected_collection
            .as_ref()
            .is_some_and(|c| c.collection_name == name);
        if was_selected {
            self.selected_collection = None;
            self.documents.clear();
            self.selected_document = None;
            self.document_detail = None;
            self.search_query.clear();
            self.search_results.clear();
            self.view = ViewMode::Collections;
            self.generations.documents += 1;
            self.generations.detail += 1;
            self.generations.search += 1;
        }
    }

    pub fn request_delete_document(&mut self, document: DocumentSummary) {
        self.document_to_delete = Some(document);
    }

    pub fn cancel_delete_document(&mut self) {
        self.document_to_delete = None;
    }

    /// The backend confirmed the delete; if the document was open, fall
    /// back to the Documents view with the detail and search cleared.
    pub fn delete_document_succeeded(&mut self, document_id: &str) {
        self.document_to_delete = None;

        let was_selected = self
            .selected_document
            .as_ref()
            .is_some_and(|d| d.document_id == document_id);
        if was_selected {
            self.selected_document = None;
            self.document_detail = None;
            self.search_query.clear();
            self.search_results.clear();
            self.view = ViewMode::Documents;
            self.generations.detail += 1;
            self.generations.search += 1;
        }
    }

    // ------------------------------------------------------------------
    // Loading flag for mutations that have no fetch generation

    pub fn begin_mutation(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn end_mutation(&mut self) {
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use docdeck_core::DocdeckError;

    fn collection(name: &str) -> Collection {
        Collection {
            collection_name: name.to_string(),
            display_name: name.to_string(),
            description: None,
            vector_size: Some(768),
            points_count: Some(0),
            registered_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn document(id: &str) -> DocumentSummary {
        DocumentSummary {
            document_id: id.to_string(),
            file_name: format!("{}.md", id),
            file_type: "md".to_string(),
            processed_at: Utc::now(),
            total_chunks: 1,
            actual_chunks: 1,
            metadata: serde_json::Value::Null,
            chunks: vec![],
        }
    }

    fn listing(docs: Vec<DocumentSummary>) -> DocumentListing {
        DocumentListing {
            collection_name: "c".to_string(),
            total_documents: docs.len(),
            total_chunks: docs.len(),
            documents: docs,
        }
    }

    #[test]
    fn test_select_collection_clears_document_state_first() {
        let mut state = BrowserState::new();
        let gen = state.select_collection(collection("a"));
        state.apply_documents(gen, Ok(listing(vec![document("d1")])));
        let gen = state.select_document(document("d1"));
        state.set_search_query("tax");

        // Switching collections must clear everything owned by the old one
        // before any fetch result comes back.
        let _ = gen;
        let gen2 = state.select_collection(collection("b"));
        assert!(state.selected_document().is_none());
        assert!(state.document_detail().is_none());
        assert!(state.search_query().is_empty());
        assert!(state.search_results().is_empty());
        assert_eq!(state.view(), ViewMode::Documents);

        state.apply_documents(gen2, Ok(listing(vec![document("d2")])));
        assert_eq!(state.documents().len(), 1);
        assert_eq!(state.documents()[0].document_id, "d2");
    }

    #[test]
    fn test_stale_document_response_is_dropped() {
        let mut state = BrowserState::new();
        let stale = state.select_collection(collection("a"));
        // User switches again before the first fetch returns.
        let fresh = state.select_collection(collection("b"));

        assert!(!state.apply_documents(stale, Ok(listing(vec![document("old")]))));
        assert!(state.documents().is_empty());

        assert!(state.apply_documents(fresh, Ok(listing(vec![document("new")]))));
        assert_eq!(state.documents()[0].document_id, "new");
    }

    #[test]
    fn test_go_back_from_detail_keeps_collection() {
        let mut state = BrowserState::new();
        let gen = state.select_collection(collection("a"));
        state.apply_documents(gen, Ok(listing(vec![document("d1")])));
        state.select_document(document("d1"));
        state.set_search_query("q");

        state.go_back();
        assert_eq!(state.view(), ViewMode::Documents);
        assert!(state.selected_collection().is_some());
        assert!(state.selected_document().is_none());
        assert!(state.document_detail().is_none());
        assert!(state.search_query().is_empty());

        state.go_back();
        assert_eq!(state.view(), ViewMode::Collections);
        assert!(state.selected_collection().is_none());
        assert!(state.documents().is_empty());

        // Back at the root is a no-op.
        state.go_back();
        assert_eq!(state.view(), ViewMode::Collections);
    }

    #[test]
    fn test_fetch_error_keeps_prior_data() {
        let mut state = BrowserState::new();
        let gen = state.begin_collections_fetch();
        state.apply_collections(gen, Ok(vec![collection("a")]));

        let gen = state.begin_collections_fetch();
        state.apply_collections(
            gen,
            Err(DocdeckError::Transport { reason: "boom".to_string() }),
        );

        assert_eq!(state.collections().len(), 1);
        assert_eq!(state.error(), Some("Failed to load collections"));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_delete_selected_collection_returns_to_collections_view() {
        let mut state = BrowserState::new();
        let gen = state.select_collection(collection("a"));
        state.apply_documents(gen, Ok(listing(vec![document("d1")])));
        state.select_document(document("d1"));

        state.request_delete_collection(collection("a"));
        assert!(state.any_modal_open());

        state.delete_collection_succeeded("a");
        assert!(!state.any_modal_open());
        assert_eq!(state.view(), ViewMode::Collections);
        assert!(state.selected_collection().is_none());
        assert!(state.selected_document().is_none());
        assert!(state.documents().is_empty());
    }

    #[test]
    fn test_delete_unselected_collection_keeps_view() {
        let mut state = BrowserState::new();
        let gen = state.select_collection(collection("a"));
        state.apply_documents(gen, Ok(listing(vec![document("d1")])));

        state.request_delete_collection(collection("b"));
        state.delete_collection_succeeded("b");

        assert_eq!(state.view(), ViewMode::Documents);
        assert!(state.selected_collection().is_some());
        assert_eq!(state.documents().len(), 1);
    }

    #[test]
    fn test_delete_open_document_falls_back_to_documents_view() {
        let mut state = BrowserState::new();
        let gen = state.select_collection(collection("a"));
        state.apply_documents(gen, Ok(listing(vec![document("d1")])));
        state.select_document(document("d1"));

        state.request_delete_document(document("d1"));
        state.delete_document_succeeded("d1");

        assert_eq!(state.view(), ViewMode::Documents);
        assert!(state.selected_document().is_none());
        assert!(state.document_detail().is_none());
        assert!(state.search_results().is_empty());
        // The collection selection survives.
        assert!(state.selected_collection().is_some());
    }

    #[test]
    fn test_cancel_delete_clears_stage_only() {
        let mut state = BrowserState::new();
        state.request_delete_collection(collection("a"));
        assert!(state.collection_to_delete().is_some());

        state.cancel_delete_collection();
        assert!(state.collection_to_delete().is_none());
        assert!(!state.any_modal_open());
    }

    #[test]
    fn test_clear_search_results_invalidates_inflight_search() {
        let mut state = BrowserState::new();
        let gen = state.begin_search();
        state.clear_search_results();

        let dropped = !state.apply_search(
            gen,
            Ok(SearchResponse { query: "q".to_string(), results: vec![], total: 0 }),
        );
        assert!(dropped);
        assert!(!state.is_searching());
    }

    #[test]
    fn test_header_title_follows_selection() {
        let mut state = BrowserState::new();
        assert_eq!(state.header_title(), "Collections");

        let gen = state.select_collection(collection("notes"));
        state.apply_documents(gen, Ok(listing(vec![document("d1")])));
        assert_eq!(state.header_title(), "notes - Documents");

        state.select_document(document("d1"));
        assert_eq!(state.header_title(), "d1.md - Document detail");
    }
}
