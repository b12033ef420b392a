use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single gallery API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404 from the server. On `/api/config` and on the first list page this
    /// means the server has not been configured yet.
    #[error("not found: {}", detail.as_deref().unwrap_or("no detail"))]
    NotFound { detail: Option<String> },

    #[error("server returned {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image decode task failed: {0}")]
    DecodeTask(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Server-provided detail message when present, otherwise the error text.
    pub fn detail(&self) -> String {
        match self {
            ApiError::NotFound {
                detail: Some(detail),
            }
            | ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_prefers_server_message() {
        let err = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            detail: Some("Source path not found: /nope".to_string()),
        };
        assert_eq!(err.detail(), "Source path not found: /nope");
        assert!(!err.is_not_found());
    }

    #[test]
    fn detail_falls_back_to_display() {
        let err = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: None,
        };
        assert_eq!(err.detail(), "server returned 500 Internal Server Error: no detail");
    }

    #[tokio::test]
    async fn failed_decode_task_has_no_status() {
        let join_error = tokio::spawn(async { panic!("decoder crashed") })
            .await
            .unwrap_err();
        let err = ApiError::from(join_error);
        assert!(matches!(err, ApiError::DecodeTask(_)));
        assert!(err.detail().starts_with("image decode task failed"));
        assert!(!err.detail().contains("500"));
    }

    #[test]
    fn not_found_is_detected() {
        let err = ApiError::NotFound { detail: None };
        assert!(err.is_not_found());
    }
}
