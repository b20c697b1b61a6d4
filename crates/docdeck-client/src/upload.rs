//! Per-file progress for one upload batch.
//!
//! Files are uploaded sequentially: the backend ingestion endpoint does not
//! accept concurrent writes into the same collection, so file N's call is
//! issued only after file N-1 has settled. A failure is recorded on its own
//! item and never stops the rest of the batch.

use std::collections::HashMap;

use docdeck_core::error::{DocdeckError, Result};
use docdeck_core::models::{FileUpload, UploadItem, UploadKind};
use docdeck_core::RetrievalGateway;

#[derive(Debug, Default)]
pub struct UploadTracker {
    items: Vec<UploadItem>,
    active: bool,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible progress rows, one per file of the current batch. Empty when
    /// no batch is visible.
    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    /// True while the batch's calls are still running.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True once every item of the current batch has settled.
    pub fn is_settled(&self) -> bool {
        !self.active && !self.items.is_empty() && self.items.iter().all(|i| i.is_settled())
    }

    /// Drop the visible batch (called after the display-retention window).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Upload `files` into `collection` one at a time. Rejects a second
    /// batch while one is in flight; a finished batch that is still visible
    /// is replaced.
    pub async fn run_batch(
        &mut self,
        gateway: &dyn RetrievalGateway,
        collection: &str,
        files: &[FileUpload],
        kind: UploadKind,
        max_chunk_size: usize,
        chunk_overlap: usize,
    ) -> Result<()> {
        if self.active {
            return Err(DocdeckError::BatchInFlight);
        }

        self.items = files.iter().map(|f| UploadItem::pending(&f.file_name)).collect();
        self.active = true;

        let mut tags = HashMap::new();
        tags.insert("upload_type".to_string(), kind.tag().to_string());

        for (index, file) in files.iter().enumerate() {
            self.items[index].mark_in_flight();

            match gateway
                .upload_document(collection, file, max_chunk_size, chunk_overlap, &tags)
                .await
            {
                Ok(()) => self.items[index].mark_success(),
                Err(e) => {
                    tracing::warn!(file = %file.file_name, error = %e, "upload failed");
                    self.items[index].mark_error(e.to_string());
                }
            }
        }

        self.active = false;
        Ok(())
    }
}
