//! Wire types for the upload target endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::file::{FilePurpose, FileUpload};

/// Request for a signed upload target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadTargetRequest {
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub purpose: String,
}

impl UploadTargetRequest {
    pub fn for_file(file: &FileUpload, purpose: FilePurpose) -> Self {
        Self {
            file_name: file.file_name.clone(),
            file_type: file.mime_type.clone(),
            file_size: file.size_bytes,
            purpose: match purpose {
                FilePurpose::General => "general".to_string(),
                FilePurpose::Verification => "verification".to_string(),
            },
        }
    }
}

/// Signed target the uploads service hands back
///
/// `max_size` and `allowed_types` echo the server's own limits so the
/// client can refuse a doomed transfer before moving any bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadTarget {
    /// Reference to quote in the application payload once stored
    pub upload_target_ref: String,

    /// Pre-signed URL the file bytes go to
    pub transfer_url: String,

    /// Instant after which the target is no longer valid
    pub expires_at: DateTime<Utc>,

    /// Largest accepted transfer in bytes
    pub max_size: u64,

    /// Accepted MIME types; empty means no restriction
    #[serde(default)]
    pub allowed_types: Vec<String>,
}

impl UploadTarget {
    /// Whether the target has already expired
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
