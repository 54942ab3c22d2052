//! Error type shared by the content store, editor, media pipeline and HTTP layer.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmsError {
    /// The document store could not be reached, timed out or refused the write.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("File is too large. Maximum size is {max_mb}MB.")]
    ImageTooLarge { size: usize, max_bytes: usize, max_mb: usize },

    #[error("Upload failed: {0}")]
    ImageDecode(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("Delivery error: {0}")]
    FormSubmission(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invalid form: {0}")]
    InvalidForm(String),

    #[error("Unauthorized: {0}")]
    Auth(String),

    #[error("Invalid field path: {0}")]
    InvalidPath(String),

    /// The edit would leave the content bundle in a shape that no longer deserializes.
    #[error("Invalid edit: {0}")]
    InvalidEdit(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Draft not found: {0}")]
    DraftNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CmsError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageUnavailable(msg.into())
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    pub fn invalid_edit(msg: impl Into<String>) -> Self {
        Self::InvalidEdit(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl ResponseError for CmsError {
    fn status_code(&self) -> StatusCode {
        match self {
            CmsError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CmsError::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            CmsError::ImageDecode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CmsError::UnsupportedMedia(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            CmsError::FormSubmission(_) => StatusCode::BAD_GATEWAY,
            CmsError::Auth(_) => StatusCode::UNAUTHORIZED,
            CmsError::DraftNotFound(_) => StatusCode::NOT_FOUND,
            CmsError::InvalidEmail(_)
            | CmsError::InvalidForm(_)
            | CmsError::InvalidPath(_)
            | CmsError::InvalidEdit(_)
            | CmsError::UnsupportedLanguage(_) => StatusCode::BAD_REQUEST,
            CmsError::Config(_) | CmsError::Io(_) | CmsError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // The client only ever shows a generic notice for a failed decode.
            CmsError::ImageDecode(_) => "Upload failed.".to_string(),
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

pub type Result<T> = std::result::Result<T, CmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(
            CmsError::storage("down").status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            CmsError::ImageTooLarge {
                size: 3,
                max_bytes: 2,
                max_mb: 2
            }
            .status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            CmsError::Auth("nope".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            CmsError::invalid_path("x").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_too_large_message_names_limit() {
        let error = CmsError::ImageTooLarge {
            size: 3 * 1024 * 1024,
            max_bytes: 2 * 1024 * 1024,
            max_mb: 2,
        };
        assert_eq!(error.to_string(), "File is too large. Maximum size is 2MB.");
    }
}
