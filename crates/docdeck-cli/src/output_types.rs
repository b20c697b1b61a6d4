//! Table row types for human and JSON output.

use chrono::Utc;
use docdeck_core::format::relative_time;
use docdeck_core::models::{Collection, DocumentSummary, SearchResult};
use serde::Serialize;
use tabled::Tabled;

#[derive(Debug, Serialize, Tabled)]
pub struct CollectionRow {
    #[tabled(rename = "Name")]
    pub name: String,

    #[tabled(rename = "Description")]
    pub description: String,

    #[tabled(rename = "Points")]
    pub points: String,

    #[tabled(rename = "Created")]
    pub created: String,
}

impl From<&Collection> for CollectionRow {
    fn from(c: &Collection) -> Self {
        Self {
            name: c.display_name.clone(),
            description: c.description.clone().unwrap_or_default(),
            points: c.points_count.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string()),
            created: relative_time(c.registered_at, Utc::now()),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct DocumentRow {
    #[tabled(rename = "ID")]
    pub document_id: String,

    #[tabled(rename = "File")]
    pub file_name: String,

    #[tabled(rename = "Type")]
    pub file_type: String,

    #[tabled(rename = "Chunks")]
    pub chunks: String,

    #[tabled(rename = "Processed")]
    pub processed: String,
}

impl From<&DocumentSummary> for DocumentRow {
    fn from(d: &DocumentSummary) -> Self {
        // Surface partial processing as "actual/declared".
        let chunks = if d.actual_chunks == d.total_chunks {
            d.total_chunks.to_string()
        } else {
            format!("{}/{}", d.actual_chunks, d.total_chunks)
        };
        Self {
            document_id: d.document_id.clone(),
            file_name: d.file_name.clone(),
            file_type: d.file_type.clone(),
            chunks,
            processed: relative_time(d.processed_at, Utc::now()),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct SearchRow {
    #[tabled(rename = "Score")]
    pub score: String,

    #[tabled(rename = "File")]
    pub file_name: String,

    #[tabled(rename = "Chunk")]
    pub chunk_index: usize,

    #[tabled(rename = "Text")]
    pub preview: String,
}

impl From<&SearchResult> for SearchRow {
    fn from(r: &SearchResult) -> Self {
        let mut preview: String = r.chunk_text.chars().take(80).collect();
        if r.chunk_text.chars().count() > 80 {
            preview.push('…');
        }
        Self {
            score: format!("{:.3}", r.score),
            file_name: r.file_name.clone(),
            chunk_index: r.chunk_index,
            preview,
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,

    #[tabled(rename = "Value")]
    pub value: String,

    #[tabled(rename = "Source")]
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_document_row_marks_partial_processing() {
        let doc = DocumentSummary {
            document_id: "doc-1".to_string(),
            file_name: "report.pdf".to_string(),
            file_type: "pdf".to_string(),
            processed_at: Utc::now(),
            total_chunks: 12,
            actual_chunks: 7,
            metadata: Value::Null,
            chunks: vec![],
        };
        let row = DocumentRow::from(&doc);
        assert_eq!(row.chunks, "7/12");
    }

    #[test]
    fn test_search_row_truncates_long_text() {
        let result = SearchResult {
            id: "c1".to_string(),
            score: 0.91234,
            document_id: "doc-1".to_string(),
            chunk_index: 3,
            chunk_text: "x".repeat(200),
            file_name: "a.md".to_string(),
            file_type: "md".to_string(),
            metadata: Value::Null,
        };
        let row = SearchRow::from(&result);
        assert_eq!(row.score, "0.912");
        assert_eq!(row.preview.chars().count(), 81);
        assert!(row.preview.ends_with('…'));
    }
}
