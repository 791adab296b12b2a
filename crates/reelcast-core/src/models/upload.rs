use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request for a presigned upload URL
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadGrantRequest {
    /// MIME type the client will upload
    #[serde(default)]
    pub content_type: Option<String>,
    /// Optional sub-folder inside the staging namespace
    #[serde(default)]
    pub folder: Option<String>,
}

/// A single-use permission to PUT one object into staging storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadGrant {
    /// Server-generated key under the staging namespace
    pub object_key: String,
    /// Time-bound presigned PUT URL
    pub write_url: String,
    /// Where the object will be readable once uploaded
    pub public_reference: String,
    /// When the storage layer stops accepting the write
    pub expires_at: DateTime<Utc>,
    /// Lifetime of `write_url` in seconds
    pub expires_in: u64,
}
