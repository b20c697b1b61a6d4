//! The retrieval-backend port.
//!
//! Adapters (HTTP, in-memory) implement this trait; the client state machine
//! consumes it and treats every operation as an opaque remote call.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    Collection, DistanceMetric, DocumentDetail, DocumentListing, FileUpload, SearchResponse,
};

/// Narrows a search to a single document within the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub document_id: String,
}

/// Port for the document-retrieval backend.
///
/// All operations are asynchronous remote calls returning structured
/// payloads or a `DocdeckError`. Once issued they run to completion and are
/// not cancellable.
#[async_trait]
pub trait RetrievalGateway: Send + Sync {
    /// List all collections
    async fn list_collections(&self) -> Result<Vec<Collection>>;

    /// Create a collection. The caller validates the name first; the
    /// backend fails with `Conflict` on a duplicate name.
    async fn create_collection(
        &self,
        name: &str,
        distance_metric: DistanceMetric,
        description: Option<&str>,
    ) -> Result<()>;

    /// Delete a collection and everything in it
    async fn delete_collection(&self, name: &str) -> Result<()>;

    /// List documents of a collection with aggregate counts
    async fn list_documents(&self, collection: &str) -> Result<DocumentListing>;

    /// Fetch the full chunk text of one document
    async fn document_detail(&self, collection: &str, document_id: &str)
        -> Result<DocumentDetail>;

    /// Delete one document from a collection
    async fn delete_document(&self, collection: &str, document_id: &str) -> Result<()>;

    /// Semantic search scoped to a collection, optionally narrowed to one
    /// document
    async fn search(
        &self,
        collection: &str,
        query: &str,
        limit: usize,
        min_score: f32,
        filter: Option<&SearchFilter>,
    ) -> Result<SearchResponse>;

    /// Ingest one file into a collection. Fails per file with
    /// `DocdeckError::Upload`; the backend does not accept concurrent
    /// writes into the same collection.
    async fn upload_document(
        &self,
        collection: &str,
        file: &FileUpload,
        max_chunk_size: usize,
        chunk_overlap: usize,
        tags: &HashMap<String, String>,
    ) -> Result<()>;
}
