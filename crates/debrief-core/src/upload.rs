//! Upload validation for the audio processing endpoint.
//!
//! Validation layers:
//! 1. Emptiness and size limit
//! 2. Declared-MIME allowlist (the declared type governs acceptance)
//! 3. Magic byte sniffing via `infer` — advisory only: browsers routinely
//!    mislabel recorded audio, so a mismatch is logged and recorded but
//!    never rejected.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use tracing::warn;

use crate::defaults;

/// Declared MIME types accepted for uploaded audio.
///
/// `video/mp4` and `video/webm` are included because browsers label
/// MediaRecorder output with the container type, not the track type.
static ALLOWED_AUDIO_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "audio/mpeg",
        "audio/wav",
        "audio/mp3",
        "audio/m4a",
        "audio/webm",
        "video/mp4",
        "video/webm",
        "audio/ogg",
        "audio/flac",
    ]
    .into_iter()
    .collect()
});

/// Whether a declared MIME type is on the audio allowlist.
///
/// Parameters (`audio/webm;codecs=opus`) and case are normalized away
/// before the lookup.
pub fn is_allowed_audio_type(mime: &str) -> bool {
    ALLOWED_AUDIO_TYPES.contains(normalize_mime(mime).as_str())
}

/// Strip MIME parameters and lowercase the base type.
fn normalize_mime(mime: &str) -> String {
    mime.split(';').next().unwrap_or(mime).trim().to_lowercase()
}

/// Result of upload validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub allowed: bool,
    pub block_reason: Option<String>,
    pub detected_type: Option<String>,
}

impl ValidationResult {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            block_reason: None,
            detected_type: None,
        }
    }

    pub fn blocked(reason: impl Into<String>, detected: impl Into<String>) -> Self {
        Self {
            allowed: false,
            block_reason: Some(reason.into()),
            detected_type: Some(detected.into()),
        }
    }
}

/// Validate an uploaded audio file.
///
/// The declared content type decides acceptance; sniffed bytes are recorded
/// in `detected_type` and logged when they disagree, nothing more.
pub fn validate_upload(
    filename: &str,
    declared_mime: &str,
    data: &[u8],
    max_size_bytes: u64,
) -> ValidationResult {
    if data.is_empty() {
        return ValidationResult::blocked("Uploaded file is empty", "empty");
    }

    if data.len() as u64 > max_size_bytes {
        return ValidationResult::blocked(
            format!("File exceeds maximum size of {} bytes", max_size_bytes),
            "oversized",
        );
    }

    let declared = normalize_mime(declared_mime);
    if !ALLOWED_AUDIO_TYPES.contains(declared.as_str()) {
        return ValidationResult::blocked(
            format!("Unsupported content type: {}", declared_mime),
            declared,
        );
    }

    let mut result = ValidationResult::allowed();
    if let Some(detected) = detect_content_type(data) {
        if detected != declared {
            warn!(
                filename = %filename,
                declared = %declared,
                detected = %detected,
                "declared content type does not match sniffed bytes"
            );
        }
        result.detected_type = Some(detected);
    }
    result
}

/// Detect the content type from file magic bytes, if recognizable.
pub fn detect_content_type(data: &[u8]) -> Option<String> {
    infer::get(data).map(|kind| kind.mime_type().to_string())
}

/// Sanitize a client-supplied filename for storage and logging.
pub fn sanitize_filename(filename: &str) -> String {
    // Remove path components
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    // Replace dangerous characters
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // Ensure not empty and not too long
    let sanitized = sanitized.trim();
    if sanitized.is_empty() {
        return "unnamed_file".to_string();
    }

    // Truncate if too long (preserve extension)
    if sanitized.len() > defaults::FILENAME_MAX_LENGTH {
        if let Some(dot_pos) = sanitized.rfind('.') {
            let ext = &sanitized[dot_pos..];
            if let Some(stem_budget) = defaults::FILENAME_MAX_LENGTH.checked_sub(ext.len()) {
                let stem = truncate_to_boundary(&sanitized[..dot_pos], stem_budget);
                return format!("{}{}", stem, ext);
            }
        }
        return truncate_to_boundary(sanitized, defaults::FILENAME_MAX_LENGTH).to_string();
    }

    sanitized.to_string()
}

/// Longest prefix of `s` that fits in `max_bytes` without splitting a
/// character.
fn truncate_to_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        if idx + c.len_utf8() > max_bytes {
            break;
        }
        end = idx + c.len_utf8();
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: u64 = 100_000_000;

    // ID3v2 header — infer recognizes this as audio/mpeg.
    const MP3_HEADER: &[u8] = &[0x49, 0x44, 0x33, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_accepts_every_allowlisted_type() {
        for mime in [
            "audio/mpeg",
            "audio/wav",
            "audio/mp3",
            "audio/m4a",
            "audio/webm",
            "video/mp4",
            "video/webm",
            "audio/ogg",
            "audio/flac",
        ] {
            let result = validate_upload("clip.bin", mime, MP3_HEADER, LIMIT);
            assert!(result.allowed, "{mime} should be accepted");
        }
    }

    #[test]
    fn test_rejects_non_audio_declared_type() {
        let result = validate_upload("doc.pdf", "application/pdf", b"%PDF-1.4", LIMIT);
        assert!(!result.allowed);
        assert!(result
            .block_reason
            .unwrap()
            .contains("Unsupported content type"));
    }

    #[test]
    fn test_rejects_text_plain() {
        let result = validate_upload("notes.txt", "text/plain", b"hello", LIMIT);
        assert!(!result.allowed);
    }

    #[test]
    fn test_blocks_empty_file() {
        let result = validate_upload("silence.mp3", "audio/mpeg", b"", LIMIT);
        assert!(!result.allowed);
        assert!(result.block_reason.unwrap().contains("empty"));
    }

    #[test]
    fn test_blocks_oversized() {
        let data = vec![0u8; 101];
        let result = validate_upload("big.mp3", "audio/mpeg", &data, 100);
        assert!(!result.allowed);
        assert!(result
            .block_reason
            .unwrap()
            .contains("exceeds maximum size"));
    }

    #[test]
    fn test_size_boundary_at_limit() {
        let at_limit = vec![0u8; 100];
        let result = validate_upload("ok.mp3", "audio/mpeg", &at_limit, 100);
        assert!(result.allowed, "file exactly at the limit should pass");

        let over = vec![0u8; 101];
        let result = validate_upload("big.mp3", "audio/mpeg", &over, 100);
        assert!(!result.allowed, "file one byte over the limit should fail");
    }

    #[test]
    fn test_mismatched_bytes_are_advisory() {
        // PNG bytes with an audio declared type: logged, not rejected.
        let result = validate_upload("clip.mp3", "audio/mpeg", PNG_HEADER, LIMIT);
        assert!(result.allowed);
        assert_eq!(result.detected_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn test_detected_type_recorded_for_real_audio() {
        let result = validate_upload("clip.mp3", "audio/mpeg", MP3_HEADER, LIMIT);
        assert!(result.allowed);
        assert_eq!(result.detected_type.as_deref(), Some("audio/mpeg"));
    }

    #[test]
    fn test_mime_parameters_and_case_are_normalized() {
        assert!(is_allowed_audio_type("Audio/MPEG"));
        assert!(is_allowed_audio_type("audio/webm;codecs=opus"));
        assert!(is_allowed_audio_type(" audio/wav "));
        assert!(!is_allowed_audio_type("application/json"));

        let result = validate_upload("rec.webm", "audio/webm;codecs=opus", MP3_HEADER, LIMIT);
        assert!(result.allowed);
    }

    #[test]
    fn test_detect_content_type_recognizes_png() {
        assert_eq!(
            detect_content_type(PNG_HEADER).as_deref(),
            Some("image/png")
        );
    }

    #[test]
    fn test_detect_content_type_returns_none_for_garbage() {
        assert!(detect_content_type(b"just words, no magic").is_none());
    }

    #[test]
    fn test_sanitize_removes_path() {
        assert_eq!(sanitize_filename("/etc/passwd"), "passwd");
        assert_eq!(
            sanitize_filename("C:\\Users\\me\\meeting.mp3"),
            "meeting.mp3"
        );
        assert_eq!(sanitize_filename("../../../escape.wav"), "escape.wav");
    }

    #[test]
    fn test_sanitize_removes_dangerous_chars() {
        assert_eq!(sanitize_filename("call<>:today.mp3"), "call___today.mp3");
        assert_eq!(sanitize_filename("clip|take?.wav"), "clip_take_.wav");
    }

    #[test]
    fn test_sanitize_truncates_long_names() {
        let long_name = format!("{}.mp3", "a".repeat(300));
        let sanitized = sanitize_filename(&long_name);
        assert!(sanitized.len() <= defaults::FILENAME_MAX_LENGTH);
        assert!(sanitized.ends_with(".mp3"));
    }

    #[test]
    fn test_sanitize_truncates_multibyte_names_on_char_boundaries() {
        // 600 bytes of two-byte characters; the stem budget after ".mp3" is
        // odd, so a byte-indexed cut would land inside a character.
        let long_name = format!("{}.mp3", "é".repeat(300));
        let sanitized = sanitize_filename(&long_name);
        assert!(sanitized.len() <= defaults::FILENAME_MAX_LENGTH);
        assert!(sanitized.ends_with(".mp3"));
        assert!(sanitized.trim_end_matches(".mp3").chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_sanitize_truncates_extensionless_multibyte_names() {
        let sanitized = sanitize_filename(&"é".repeat(200));
        assert!(sanitized.len() <= defaults::FILENAME_MAX_LENGTH);
        assert!(!sanitized.is_empty());
        assert!(sanitized.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_sanitize_handles_extension_longer_than_the_cap() {
        let dotted = format!(".{}", "x".repeat(300));
        let sanitized = sanitize_filename(&dotted);
        assert_eq!(sanitized.len(), defaults::FILENAME_MAX_LENGTH);
    }

    #[test]
    fn test_sanitize_handles_empty() {
        assert_eq!(sanitize_filename(""), "unnamed_file");
        assert_eq!(sanitize_filename("   "), "unnamed_file");
    }
}
