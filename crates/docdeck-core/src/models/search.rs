use serde::{Deserialize, Serialize};

/// One scored hit from an in-collection search.
///
/// Scores are on the backend's scale; higher means more relevant, and the
/// client never clamps or rescales them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,

    pub score: f32,

    /// Owning document
    pub document_id: String,

    pub chunk_index: usize,

    pub chunk_text: String,

    pub file_name: String,

    pub file_type: String,

    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Envelope returned by the search operation.
///
/// Result sets are ephemeral: never persisted, replaced wholesale on each
/// search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub total: usize,
}
