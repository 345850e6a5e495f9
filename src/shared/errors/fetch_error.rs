use reqwest::StatusCode;
use thiserror::Error;

/// 외부 API 호출 에러
/// Errors surfaced by the authenticated fetcher. Every variant is logged once before it is returned.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Request fields could not be flattened into query parameters
    #[error("Failed to encode query parameters: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// Non-2xx response
    #[error("Error response {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Connection failure, timeout or an unbuildable request
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not JSON or the client's parser rejected it
    #[error("Failed to parse response")]
    Parse(#[source] anyhow::Error),
}

impl FetchError {
    /// HTTP 상태 코드 (Status 에러인 경우만)
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport(err) => err.status(),
            _ => None,
        }
    }
}
