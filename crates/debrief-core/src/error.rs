//! Error types for debrief.

use thiserror::Error;

/// Result type alias using debrief's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for debrief operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Upload rejected before processing (no file, wrong type, oversized)
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// The transcription call failed or produced no text; fatal to the request
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    /// Network-level failure reaching the model provider
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The model provider returned a non-success status
    #[error("Upstream rejected request: {0}")]
    UpstreamRejected(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Meeting not found
    #[error("Meeting not found: {0}")]
    MeetingNotFound(uuid::Uuid),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_error_display_invalid_upload() {
        let err = Error::InvalidUpload("no file attached".to_string());
        assert_eq!(err.to_string(), "Invalid upload: no file attached");
    }

    #[test]
    fn test_error_display_transcription_failed() {
        let err = Error::TranscriptionFailed("empty model reply".to_string());
        assert_eq!(err.to_string(), "Transcription failed: empty model reply");
    }

    #[test]
    fn test_error_display_upstream_unavailable() {
        let err = Error::UpstreamUnavailable("connection refused".to_string());
        assert_eq!(err.to_string(), "Upstream unavailable: connection refused");
    }

    #[test]
    fn test_error_display_upstream_rejected() {
        let err = Error::UpstreamRejected("403 Forbidden".to_string());
        assert_eq!(err.to_string(), "Upstream rejected request: 403 Forbidden");
    }

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("test resource".to_string());
        assert_eq!(err.to_string(), "Not found: test resource");
    }

    #[test]
    fn test_error_display_meeting_not_found() {
        let id = Uuid::nil();
        let err = Error::MeetingNotFound(id);
        assert_eq!(err.to_string(), format!("Meeting not found: {}", id));
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("empty message".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty message");
    }

    #[test]
    fn test_error_display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.to_string().contains("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        let result = get_result();
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_debug_format() {
        let err = Error::NotFound("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("NotFound"));
    }

    #[test]
    fn test_meeting_not_found_with_random_uuid() {
        let id = Uuid::new_v4();
        let err = Error::MeetingNotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
