use thiserror::Error;

/// Errors from the check-run API. Never retried; the caller decides whether a
/// failure is terminal or merely logged (the error-path completion call).
#[derive(Debug, Error)]
pub enum RemoteApiError {
    /// Transport failure (connection, TLS, timeout).
    #[error("check-run request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform rejected the request (auth failure, rate limit,
    /// malformed payload). Carries the response body when one was readable.
    #[error("check-run API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("failed to parse check-run response: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, RemoteApiError>;
