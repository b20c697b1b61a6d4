//! In-memory gateway for development and testing.
//!
//! Uses `RwLock::unwrap()` intentionally. Lock poisoning only occurs when
//! another thread panicked while holding the lock, which is an
//! unrecoverable state. For a real backend, use `HttpGateway`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use docdeck_core::error::{DocdeckError, Result};
use docdeck_core::models::{
    ChunkInfo, Collection, DetailedChunk, DistanceMetric, DocumentDetail, DocumentListing,
    DocumentSummary, FileUpload, SearchResponse, SearchResult,
};
use docdeck_core::{RetrievalGateway, SearchFilter};

const PREVIEW_LEN: usize = 120;

/// One ingested document with its full chunk text.
#[derive(Debug, Clone)]
struct StoredDocument {
    summary: DocumentSummary,
    chunks: Vec<DetailedChunk>,
}

/// In-memory implementation of `RetrievalGateway`.
///
/// Documents are chunked at ingestion with the caller's chunking hints, and
/// search scores chunks by case-insensitive occurrence counting. The scale
/// differs from a vector backend but preserves the contract: higher is more
/// relevant, ordering is descending.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
    documents: Arc<RwLock<HashMap<String, Vec<StoredDocument>>>>,
    next_id: Arc<RwLock<u64>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn require_collection(&self, name: &str) -> Result<()> {
        if self.collections.read().unwrap().contains_key(name) {
            Ok(())
        } else {
            Err(DocdeckError::NotFound { what: format!("collection '{}'", name) })
        }
    }

    /// Recompute a collection's point count from its documents.
    fn refresh_points_count(&self, name: &str) {
        let total: u64 = self
            .documents
            .read()
            .unwrap()
            .get(name)
            .map(|docs| docs.iter().map(|d| d.chunks.len() as u64).sum())
            .unwrap_or(0);

        if let Some(collection) = self.collections.write().unwrap().get_mut(name) {
            collection.points_count = Some(total);
            collection.updated_at = Utc::now();
        }
    }

    /// Overlapping windows over the document text, honoring the caller's
    /// chunking hints.
    fn chunk_text(text: &str, max_chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }
        let size = max_chunk_size.max(1);
        let step = size.saturating_sub(chunk_overlap).max(1);

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let end = (start + size).min(chars.len());
            chunks.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start += step;
        }
        chunks
    }

    fn occurrences(haystack: &str, needle: &str) -> usize {
        if needle.is_empty() {
            return 0;
        }
        haystack.matches(needle).count()
    }
}

#[async_trait]
impl RetrievalGateway for MemoryGateway {
    async fn list_collections(&self) -> Result<Vec<Collection>> {
        let collections = self.collections.read().unwrap();
        let mut list: Vec<Collection> = collections.values().cloned().collect();
        list.sort_by(|a, b| a.collection_name.cmp(&b.collection_name));
        Ok(list)
    }

    async fn create_collection(
        &self,
        name: &str,
        distance_metric: DistanceMetric,
        description: Option<&str>,
    ) -> Result<()> {
        let mut collections = self.collections.write().unwrap();
        if collections.contains_key(name) {
            return Err(DocdeckError::Conflict { name: name.to_string() });
        }

        tracing::debug!(collection = %name, metric = %distance_metric, "creating collection");
        let now = Utc::now();
        collections.insert(
            name.to_string(),
            Collection {
                collection_name: name.to_string(),
                display_name: name.to_string(),
                description: description.map(str::to_string),
                vector_size: Some(768),
                points_count: Some(0),
                registered_at: now,
                updated_at: now,
            },
        );
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let removed = self.collections.write().unwrap().remove(name);
        if removed.is_none() {
            return Err(DocdeckError::NotFound { what: format!("collection '{}'", name) });
        }
        self.documents.write().unwrap().remove(name);
        Ok(())
    }

    async fn list_documents(&self, collection: &str) -> Result<DocumentListing> {
        self.require_collection(collection)?;

        let documents = self.documents.read().unwrap();
        let docs = documents.get(collection).cloned().unwrap_or_default();

        let total_chunks = docs.iter().map(|d| d.chunks.len()).sum();
        let mut summaries: Vec<DocumentSummary> =
            docs.iter().map(|d| d.summary.clone()).collect();
        summaries.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        Ok(DocumentListing {
            collection_name: collection.to_string(),
            total_documents: summaries.len(),
            total_chunks,
            documents: summaries,
        })
    }

    async fn document_detail(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<DocumentDetail> {
        self.require_collection(collection)?;

        let documents = self.documents.read().unwrap();
        let doc = documents
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.summary.document_id == document_id))
            .ok_or_else(|| DocdeckError::NotFound {
                what: format!("document '{}' in collection '{}'", document_id, collection),
            })?;

        Ok(DocumentDetail {
            document_id: doc.summary.document_id.clone(),
            file_name: doc.summary.file_name.clone(),
            file_type: doc.summary.file_type.clone(),
            processed_at: doc.summary.processed_at,
            total_chunks: doc.summary.total_chunks,
            metadata: doc.summary.metadata.clone(),
            chunks: doc.chunks.clone(),
        })
    }

    async fn delete_document(&self, collection: &str, document_id: &str) -> Result<()> {
        self.require_collection(collection)?;

        {
            let mut documents = self.documents.write().unwrap();
            let docs = documents.get_mut(collection).ok_or_else(|| DocdeckError::NotFound {
                what: format!("document '{}' in collection '{}'", document_id, collection),
            })?;

            let before = docs.len();
            docs.retain(|d| d.summary.document_id != document_id);
            if docs.len() == before {
                return Err(DocdeckError::NotFound {
                    what: format!("document '{}' in collection '{}'", document_id, collection),
                });
            }
        }

        self.refresh_points_count(collection);
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: &str,
        limit: usize,
        min_score: f32,
        filter: Option<&SearchFilter>,
    ) -> Result<SearchResponse> {
        self.require_collection(collection)?;

        let needle = query.to_lowercase();
        let documents = self.documents.read().unwrap();

        let mut results: Vec<SearchResult> = documents
            .get(collection)
            .into_iter()
            .flatten()
            .filter(|doc| match filter {
                Some(f) => doc.summary.document_id == f.document_id,
                None => true,
            })
            .flat_map(|doc| {
                doc.chunks.iter().filter_map(|chunk| {
                    let hits = Self::occurrences(&chunk.chunk_text.to_lowercase(), &needle);
                    if hits == 0 {
                        return None;
                    }
                    Some(SearchResult {
                        id: chunk.chunk_id.clone(),
                        score: hits as f32,
                        document_id: doc.summary.document_id.clone(),
                        chunk_index: chunk.chunk_index,
                        chunk_text: chunk.chunk_text.clone(),
                        file_name: doc.summary.file_name.clone(),
                        file_type: doc.summary.file_type.clone(),
                        metadata: doc.summary.metadata.clone(),
                    })
                })
            })
            .collect();

        results.retain(|r| r.score >= min_score);
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(limit);

        let total = results.len();
        Ok(SearchResponse { query: query.to_string(), results, total })
    }

    async fn upload_document(
        &self,
        collection: &str,
        file: &FileUpload,
        max_chunk_size: usize,
        chunk_overlap: usize,
        tags: &HashMap<String, String>,
    ) -> Result<()> {
        self.require_collection(collection)?;

        let text = String::from_utf8(file.bytes.clone()).map_err(|_| DocdeckError::Upload {
            file_name: file.file_name.clone(),
            reason: "file is not valid UTF-8 text".to_string(),
        })?;

        let document_id = {
            let mut next_id = self.next_id.write().unwrap();
            *next_id += 1;
            format!("doc-{}", *next_id)
        };

        let file_type = file
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_else(|| "txt".to_string());

        let chunks: Vec<DetailedChunk> = Self::chunk_text(&text, max_chunk_size, chunk_overlap)
            .into_iter()
            .enumerate()
            .map(|(index, chunk_text)| DetailedChunk {
                chunk_id: format!("{}-chunk-{}", document_id, index),
                chunk_index: index,
                chunk_size: chunk_text.len(),
                chunk_text,
            })
            .collect();

        let metadata = serde_json::to_value(tags).map_err(|e| DocdeckError::Upload {
            file_name: file.file_name.clone(),
            reason: format!("failed to encode tags: {}", e),
        })?;

        let summary = DocumentSummary {
            document_id: document_id.clone(),
            file_name: file.file_name.clone(),
            file_type,
            processed_at: Utc::now(),
            total_chunks: chunks.len(),
            actual_chunks: chunks.len(),
            metadata,
            chunks: chunks
                .iter()
                .map(|c| ChunkInfo {
                    chunk_id: c.chunk_id.clone(),
                    chunk_index: c.chunk_index,
                    chunk_size: c.chunk_size,
                    chunk_text_preview: c.chunk_text.chars().take(PREVIEW_LEN).collect(),
                })
                .collect(),
        };

        {
            let mut documents = self.documents.write().unwrap();
            let docs = documents.entry(collection.to_string()).or_default();
            // Re-ingesting the same file replaces the previous version.
            docs.retain(|d| d.summary.file_name != file.file_name);
            docs.push(StoredDocument { summary, chunks });
        }

        self.refresh_points_count(collection);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn gateway_with_collection(name: &str) -> MemoryGateway {
        let gateway = MemoryGateway::new();
        gateway.create_collection(name, DistanceMetric::Cosine, None).await.unwrap();
        gateway
    }

    fn file(name: &str, body: &str) -> FileUpload {
        FileUpload::new(name, body.as_bytes().to_vec())
    }

    #[tokio::test]
    async fn test_create_duplicate_collection_conflicts() {
        let gateway = gateway_with_collection("docs").await;

        let err = gateway
            .create_collection("docs", DistanceMetric::Cosine, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DocdeckError::Conflict { .. }));

        assert_eq!(gateway.list_collections().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_collection_is_not_found() {
        let gateway = MemoryGateway::new();
        let err = gateway.delete_collection("ghost").await.unwrap_err();
        assert!(matches!(err, DocdeckError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_upload_chunks_with_overlap() {
        let gateway = gateway_with_collection("docs").await;
        let tags = HashMap::new();

        // 10 chars, window 4, step 2 -> windows at 0, 2, 4, 6
        gateway
            .upload_document("docs", &file("a.txt", "abcdefghij"), 4, 2, &tags)
            .await
            .unwrap();

        let listing = gateway.list_documents("docs").await.unwrap();
        assert_eq!(listing.total_documents, 1);
        assert_eq!(listing.total_chunks, 4);

        let detail = gateway
            .document_detail("docs", &listing.documents[0].document_id)
            .await
            .unwrap();
        assert_eq!(detail.chunks[0].chunk_text, "abcd");
        assert_eq!(detail.chunks[1].chunk_text, "cdef");
        assert_eq!(detail.chunks[3].chunk_text, "ghij");

        let collections = gateway.list_collections().await.unwrap();
        assert_eq!(collections[0].points_count, Some(4));
    }

    #[tokio::test]
    async fn test_reupload_replaces_previous_version() {
        let gateway = gateway_with_collection("docs").await;
        let tags = HashMap::new();

        gateway.upload_document("docs", &file("a.txt", "old"), 2000, 300, &tags).await.unwrap();
        gateway.upload_document("docs", &file("a.txt", "new"), 2000, 300, &tags).await.unwrap();

        let listing = gateway.list_documents("docs").await.unwrap();
        assert_eq!(listing.total_documents, 1);

        let detail = gateway
            .document_detail("docs", &listing.documents[0].document_id)
            .await
            .unwrap();
        assert_eq!(detail.chunks[0].chunk_text, "new");
    }

    #[tokio::test]
    async fn test_search_orders_by_occurrences_and_honors_limit() {
        let gateway = gateway_with_collection("docs").await;
        let tags = HashMap::new();

        gateway
            .upload_document("docs", &file("a.txt", "tax tax tax"), 2000, 0, &tags)
            .await
            .unwrap();
        gateway
            .upload_document("docs", &file("b.txt", "tax once here"), 2000, 0, &tags)
            .await
            .unwrap();
        gateway
            .upload_document("docs", &file("c.txt", "nothing relevant"), 2000, 0, &tags)
            .await
            .unwrap();

        let response = gateway.search("docs", "TAX", 10, 0.0, None).await.unwrap();
        assert_eq!(response.total, 2);
        assert!(response.results[0].score > response.results[1].score);
        assert_eq!(response.results[0].file_name, "a.txt");

        let capped = gateway.search("docs", "tax", 1, 0.0, None).await.unwrap();
        assert_eq!(capped.results.len(), 1);
    }

    #[tokio::test]
    async fn test_search_filter_narrows_to_one_document() {
        let gateway = gateway_with_collection("docs").await;
        let tags = HashMap::new();

        gateway.upload_document("docs", &file("a.txt", "alpha tax"), 2000, 0, &tags).await.unwrap();
        gateway.upload_document("docs", &file("b.txt", "beta tax"), 2000, 0, &tags).await.unwrap();

        let listing = gateway.list_documents("docs").await.unwrap();
        let target = listing.documents[0].document_id.clone();
        let filter = SearchFilter { document_id: target.clone() };

        let response = gateway.search("docs", "tax", 10, 0.0, Some(&filter)).await.unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.results[0].document_id, target);
    }

    #[tokio::test]
    async fn test_delete_document_updates_counts() {
        let gateway = gateway_with_collection("docs").await;
        let tags = HashMap::new();

        gateway.upload_document("docs", &file("a.txt", "hello"), 2000, 0, &tags).await.unwrap();
        let listing = gateway.list_documents("docs").await.unwrap();
        let id = listing.documents[0].document_id.clone();

        gateway.delete_document("docs", &id).await.unwrap();

        let listing = gateway.list_documents("docs").await.unwrap();
        assert_eq!(listing.total_documents, 0);
        assert_eq!(gateway.list_collections().await.unwrap()[0].points_count, Some(0));

        let err = gateway.delete_document("docs", &id).await.unwrap_err();
        assert!(matches!(err, DocdeckError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_non_utf8_upload_fails_as_upload_error() {
        let gateway = gateway_with_collection("docs").await;
        let tags = HashMap::new();

        let err = gateway
            .upload_document(
                "docs",
                &FileUpload::new("bin.dat", vec![0xff, 0xfe, 0x00]),
                2000,
                0,
                &tags,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DocdeckError::Upload { .. }));
    }
}
