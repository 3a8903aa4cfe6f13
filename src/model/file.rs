//! File upload payloads and per-purpose limits

use serde::{Deserialize, Serialize};

/// General uploads (pitch decks) are capped at 25 MB
pub const GENERAL_MAX_SIZE_BYTES: u64 = 25 * 1024 * 1024;

/// Verification documents are capped at 10 MB
pub const VERIFICATION_MAX_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Smallest size a real document can plausibly be
pub const MIN_PLAUSIBLE_SIZE_BYTES: u64 = 100;

/// A file selected for upload
///
/// Validation consumes only the metadata; the transfer step consumes the
/// bytes.
#[derive(Debug, Clone, Default)]
pub struct FileUpload {
    /// File name as provided by the picker
    pub file_name: String,

    /// Declared MIME type
    pub mime_type: String,

    /// Size in bytes
    pub size_bytes: u64,

    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Create a file upload from raw bytes
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size_bytes = bytes.len() as u64;
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            bytes,
        }
    }

    /// Lowercased extension without the dot, if the name has one
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name.rsplit('/').next().unwrap_or(&self.file_name);
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// What an upload is for, which decides its size cap and type allow-list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePurpose {
    /// Pitch decks and other general materials
    General,
    /// Accreditation verification documents
    Verification,
}

impl FilePurpose {
    /// Size ceiling in bytes for this purpose
    pub fn max_size_bytes(&self) -> u64 {
        match self {
            FilePurpose::General => GENERAL_MAX_SIZE_BYTES,
            FilePurpose::Verification => VERIFICATION_MAX_SIZE_BYTES,
        }
    }

    /// Accepted MIME types for this purpose
    pub fn allowed_mime_types(&self) -> &'static [&'static str] {
        match self {
            FilePurpose::General => &["application/pdf", "image/jpeg", "image/png"],
            FilePurpose::Verification => &["application/pdf"],
        }
    }

    /// Accepted file extensions for this purpose, lowercased, no dot
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            FilePurpose::General => &["pdf", "jpg", "jpeg", "png"],
            FilePurpose::Verification => &["pdf"],
        }
    }
}

/// Opaque reference to a file the uploads service has accepted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredFileRef {
    /// Server-assigned reference for the stored file
    pub reference: String,

    /// Original file name, kept for display
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased() {
        let file = FileUpload::new("Deck.PDF", "application/pdf", vec![0; 200]);
        assert_eq!(file.extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn test_extension_absent_for_bare_names() {
        assert_eq!(FileUpload::new("deck", "application/pdf", vec![]).extension(), None);
        assert_eq!(FileUpload::new(".hidden", "application/pdf", vec![]).extension(), None);
    }

    #[test]
    fn test_size_tracks_bytes() {
        let file = FileUpload::new("a.pdf", "application/pdf", vec![1, 2, 3]);
        assert_eq!(file.size_bytes, 3);
    }

    #[test]
    fn test_verification_is_pdf_only() {
        assert_eq!(FilePurpose::Verification.allowed_mime_types(), &["application/pdf"]);
        assert!(FilePurpose::Verification.max_size_bytes() < FilePurpose::General.max_size_bytes());
    }
}
