use serde::{Deserialize, Serialize};

/// Coarse progress milestone reported once a file's call is in flight.
/// The backend does not stream byte-level progress.
pub const IN_FLIGHT_PROGRESS: u8 = 50;

/// Per-file upload status inside one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploading,
    Success,
    Error,
}

/// Visible progress record for one file of an upload batch.
///
/// A batch holds exactly one item per input file; the count is fixed at
/// batch start and never changes while the batch runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadItem {
    pub file_name: String,
    pub status: UploadStatus,

    /// 0-100, coarse milestones only
    pub progress: u8,

    #[serde(default)]
    pub error: Option<String>,
}

impl UploadItem {
    /// Initial state at batch start
    pub fn pending(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            status: UploadStatus::Uploading,
            progress: 0,
            error: None,
        }
    }

    /// The file's call is about to be issued
    pub fn mark_in_flight(&mut self) {
        self.progress = IN_FLIGHT_PROGRESS;
    }

    pub fn mark_success(&mut self) {
        self.status = UploadStatus::Success;
        self.progress = 100;
        self.error = None;
    }

    pub fn mark_error(&mut self, reason: impl Into<String>) {
        self.status = UploadStatus::Error;
        self.progress = 0;
        self.error = Some(reason.into());
    }

    /// Terminal means the file's call has settled either way
    pub fn is_settled(&self) -> bool {
        !matches!(self.status, UploadStatus::Uploading)
    }
}

/// Whether a batch came from a folder picker or a single-file picker.
///
/// Affects only the metadata tag sent with each upload, not processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Single,
    Folder,
}

impl UploadKind {
    pub fn tag(&self) -> &'static str {
        match self {
            UploadKind::Single => "single",
            UploadKind::Folder => "folder",
        }
    }
}

/// File content handed to the gateway for ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_item_lifecycle() {
        let mut item = UploadItem::pending("report.pdf");
        assert_eq!(item.status, UploadStatus::Uploading);
        assert_eq!(item.progress, 0);
        assert!(!item.is_settled());

        item.mark_in_flight();
        assert_eq!(item.progress, IN_FLIGHT_PROGRESS);
        assert!(!item.is_settled());

        item.mark_success();
        assert_eq!(item.status, UploadStatus::Success);
        assert_eq!(item.progress, 100);
        assert!(item.is_settled());
    }

    #[test]
    fn test_upload_item_error_resets_progress() {
        let mut item = UploadItem::pending("broken.docx");
        item.mark_in_flight();
        item.mark_error("connection reset");

        assert_eq!(item.status, UploadStatus::Error);
        assert_eq!(item.progress, 0);
        assert_eq!(item.error.as_deref(), Some("connection reset"));
        assert!(item.is_settled());
    }

    #[test]
    fn test_upload_kind_tag() {
        assert_eq!(UploadKind::Single.tag(), "single");
        assert_eq!(UploadKind::Folder.tag(), "folder");
    }
}
