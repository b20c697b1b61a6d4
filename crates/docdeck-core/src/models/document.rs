use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of one indexed document inside a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Unique within the owning collection
    pub document_id: String,

    /// Original file name
    pub file_name: String,

    /// File type tag (e.g. "pdf", "md")
    pub file_type: String,

    /// When backend ingestion processed the document
    pub processed_at: DateTime<Utc>,

    /// Chunk count the backend declared at ingestion
    pub total_chunks: usize,

    /// Chunks actually materialized; may lag total_chunks while
    /// processing is partial
    pub actual_chunks: usize,

    /// Opaque backend metadata
    #[serde(default)]
    pub metadata: serde_json::Value,

    /// Ordered chunk summaries
    #[serde(default)]
    pub chunks: Vec<ChunkInfo>,
}

/// Short chunk descriptor carried on document summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkInfo {
    pub chunk_id: String,

    /// Zero-based position within the document
    pub chunk_index: usize,

    /// Size in bytes
    pub chunk_size: usize,

    pub chunk_text_preview: String,
}

/// Full document view, fetched lazily when a document is opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDetail {
    pub document_id: String,
    pub file_name: String,
    pub file_type: String,
    pub processed_at: DateTime<Utc>,
    pub total_chunks: usize,

    #[serde(default)]
    pub metadata: serde_json::Value,

    /// Ordered chunks with full text
    pub chunks: Vec<DetailedChunk>,
}

/// Chunk with full text, carried only on `DocumentDetail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedChunk {
    pub chunk_id: String,
    pub chunk_index: usize,
    pub chunk_size: usize,
    pub chunk_text: String,
}

/// Envelope returned by the document-list operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentListing {
    pub collection_name: String,
    pub total_documents: usize,
    pub total_chunks: usize,
    pub documents: Vec<DocumentSummary>,
}
