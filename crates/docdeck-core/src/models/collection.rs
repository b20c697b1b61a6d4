use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, independently managed set of indexed documents.
///
/// Owned by the backend; the client holds the current listing as a
/// read-through cache that is reloaded after every create or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Unique, stable identifier assigned at creation
    pub collection_name: String,

    /// Human-facing name shown in listings
    pub display_name: String,

    /// Optional free-form description
    #[serde(default)]
    pub description: Option<String>,

    /// Vector dimensionality of the backing index
    #[serde(default)]
    pub vector_size: Option<u64>,

    /// Number of points currently stored
    #[serde(default)]
    pub points_count: Option<u64>,

    /// Creation timestamp
    pub registered_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Distance metric used when creating a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    #[default]
    Cosine,
    Dot,
    Euclid,
}

impl std::fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceMetric::Cosine => write!(f, "Cosine"),
            DistanceMetric::Dot => write!(f, "Dot"),
            DistanceMetric::Euclid => write!(f, "Euclid"),
        }
    }
}
