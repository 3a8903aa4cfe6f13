//! File metadata validation
//!
//! Runs on picker metadata only; the bytes are never inspected here.
//! Name checks, size checks, and type checks accumulate independently so
//! the caller sees every problem at once.

use crate::model::file::{FilePurpose, FileUpload, MIN_PLAUSIBLE_SIZE_BYTES};

use super::{ErrorCode, ValidationError};

/// Longest file name the pipeline accepts
const MAX_FILENAME_LENGTH: usize = 255;

/// Extensions that are never acceptable regardless of declared MIME type
const DANGEROUS_EXTENSIONS: [&str; 18] = [
    "exe", "bat", "cmd", "com", "scr", "pif", "msi", "dll", "jar", "sh", "bash", "ps1", "vbs",
    "vbe", "js", "jse", "wsf", "hta",
];

/// Validate an uploaded pitch deck
pub fn validate_deck_file(file: &FileUpload) -> Vec<ValidationError> {
    validate_file("deck_file", file, FilePurpose::General)
}

/// Validate an accreditation verification document
pub fn validate_verification_file(file: &FileUpload) -> Vec<ValidationError> {
    validate_file("verification_file", file, FilePurpose::Verification)
}

/// Validate file metadata against the limits for its purpose
pub fn validate_file(field: &str, file: &FileUpload, purpose: FilePurpose) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_file_name(&mut errors, field, &file.file_name);
    check_file_size(&mut errors, field, file.size_bytes, purpose);
    check_file_type(&mut errors, field, file, purpose);

    errors
}

fn check_file_name(errors: &mut Vec<ValidationError>, field: &str, name: &str) {
    if name.trim().is_empty() {
        errors.push(ValidationError::new(
            field,
            "File name is missing",
            ErrorCode::InvalidFilename,
        ));
        return;
    }

    if name.chars().count() > MAX_FILENAME_LENGTH {
        errors.push(ValidationError::new(
            field,
            format!("File name exceeds {} characters", MAX_FILENAME_LENGTH),
            ErrorCode::FilenameTooLong,
        ));
    }

    if name.chars().any(|c| c.is_control()) || name.contains('\u{0}') {
        errors.push(ValidationError::new(
            field,
            "File name contains control characters",
            ErrorCode::InvalidFilename,
        ));
    }

    if name.starts_with('.') || name.starts_with('~') {
        errors.push(ValidationError::new(
            field,
            "Hidden or temporary files are not accepted",
            ErrorCode::HiddenFile,
        ));
    }

    let has_traversal = name.contains("..") || name.contains('/') || name.contains('\\');
    let has_dangerous_extension = name
        .rsplit('.')
        .next()
        .map(|ext| DANGEROUS_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    if has_traversal || has_dangerous_extension {
        errors.push(ValidationError::new(
            field,
            "File name is not acceptable",
            ErrorCode::SuspiciousFilename,
        ));
    }
}

fn check_file_size(
    errors: &mut Vec<ValidationError>,
    field: &str,
    size_bytes: u64,
    purpose: FilePurpose,
) {
    if size_bytes == 0 {
        errors.push(ValidationError::new(field, "File is empty", ErrorCode::EmptyFile));
        return;
    }

    if size_bytes < MIN_PLAUSIBLE_SIZE_BYTES {
        errors.push(ValidationError::new(
            field,
            "File is too small to be a valid document",
            ErrorCode::FileTooSmall,
        ));
    }

    let max = purpose.max_size_bytes();
    if size_bytes > max {
        errors.push(ValidationError::new(
            field,
            format!("File exceeds the {} MB limit", max / (1024 * 1024)),
            ErrorCode::FileTooLarge,
        ));
    }
}

fn check_file_type(
    errors: &mut Vec<ValidationError>,
    field: &str,
    file: &FileUpload,
    purpose: FilePurpose,
) {
    let mime = file.mime_type.trim().to_ascii_lowercase();
    if !purpose.allowed_mime_types().contains(&mime.as_str()) {
        errors.push(ValidationError::new(
            field,
            format!(
                "File type must be one of: {}",
                purpose.allowed_mime_types().join(", ")
            ),
            ErrorCode::InvalidFileType,
        ));
    }

    let allowed = file
        .extension()
        .map(|ext| purpose.allowed_extensions().contains(&ext.as_str()))
        .unwrap_or(false);
    if !allowed {
        errors.push(ValidationError::new(
            field,
            format!(
                "File extension must be one of: {}",
                purpose.allowed_extensions().join(", ")
            ),
            ErrorCode::InvalidFileExtension,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str, size: usize) -> FileUpload {
        FileUpload::new(name, "application/pdf", vec![0u8; size])
    }

    fn codes(errors: &[ValidationError]) -> Vec<ErrorCode> {
        errors.iter().map(|e| e.code).collect()
    }

    #[test]
    fn test_clean_pdf_passes() {
        let errors = validate_deck_file(&pdf("deck.pdf", 4096));
        assert!(errors.is_empty(), "unexpected: {:?}", errors);
    }

    #[test]
    fn test_empty_file() {
        let errors = validate_deck_file(&pdf("deck.pdf", 0));
        assert_eq!(codes(&errors), vec![ErrorCode::EmptyFile]);
    }

    #[test]
    fn test_tiny_file() {
        let errors = validate_deck_file(&pdf("deck.pdf", 40));
        assert_eq!(codes(&errors), vec![ErrorCode::FileTooSmall]);
    }

    #[test]
    fn test_oversize_general_file() {
        let mut file = pdf("deck.pdf", 200);
        file.size_bytes = 26 * 1024 * 1024;
        let errors = validate_deck_file(&file);
        assert_eq!(codes(&errors), vec![ErrorCode::FileTooLarge]);
    }

    #[test]
    fn test_verification_cap_is_lower() {
        let mut file = pdf("letter.pdf", 200);
        file.size_bytes = 12 * 1024 * 1024;
        assert!(validate_deck_file(&file).is_empty());
        assert_eq!(
            codes(&validate_verification_file(&file)),
            vec![ErrorCode::FileTooLarge]
        );
    }

    #[test]
    fn test_verification_rejects_images() {
        let file = FileUpload::new("letter.png", "image/png", vec![0u8; 4096]);
        let errors = validate_verification_file(&file);
        assert!(codes(&errors).contains(&ErrorCode::InvalidFileType));
        assert!(codes(&errors).contains(&ErrorCode::InvalidFileExtension));
    }

    #[test]
    fn test_executable_disguised_as_pdf() {
        let file = FileUpload::new("invoice.pdf.exe", "application/pdf", vec![0u8; 4096]);
        let errors = validate_deck_file(&file);
        assert!(codes(&errors).contains(&ErrorCode::SuspiciousFilename));
        assert!(codes(&errors).contains(&ErrorCode::InvalidFileExtension));
    }

    #[test]
    fn test_traversal_in_name() {
        let errors = validate_deck_file(&pdf("../../etc/deck.pdf", 4096));
        assert!(codes(&errors).contains(&ErrorCode::SuspiciousFilename));
    }

    #[test]
    fn test_hidden_file() {
        let errors = validate_deck_file(&pdf(".deck.pdf", 4096));
        assert!(codes(&errors).contains(&ErrorCode::HiddenFile));
    }

    #[test]
    fn test_control_chars_in_name() {
        let errors = validate_deck_file(&pdf("de\u{0}ck.pdf", 4096));
        assert!(codes(&errors).contains(&ErrorCode::InvalidFilename));
    }

    #[test]
    fn test_name_too_long() {
        let name = format!("{}.pdf", "a".repeat(260));
        let errors = validate_deck_file(&pdf(&name, 4096));
        assert!(codes(&errors).contains(&ErrorCode::FilenameTooLong));
    }

    #[test]
    fn test_missing_name() {
        let errors = validate_deck_file(&pdf("", 4096));
        assert!(codes(&errors).contains(&ErrorCode::InvalidFilename));
    }

    #[test]
    fn test_findings_accumulate() {
        let file = FileUpload::new(".hack.exe", "text/plain", vec![0u8; 10]);
        let found = codes(&validate_deck_file(&file));
        assert!(found.contains(&ErrorCode::HiddenFile));
        assert!(found.contains(&ErrorCode::SuspiciousFilename));
        assert!(found.contains(&ErrorCode::FileTooSmall));
        assert!(found.contains(&ErrorCode::InvalidFileType));
        assert!(found.contains(&ErrorCode::InvalidFileExtension));
    }
}
