pub mod collection;
pub mod document;
pub mod search;
pub mod upload;

pub use collection::{Collection, DistanceMetric};
pub use document::{ChunkInfo, DetailedChunk, DocumentDetail, DocumentListing, DocumentSummary};
pub use search::{SearchResponse, SearchResult};
pub use upload::{FileUpload, UploadItem, UploadKind, UploadStatus};
