use thiserror::Error;

/// Errors surfaced by the MyAnimeList client.
///
/// The first four variants mirror the API's HTTP status contract; the
/// decoder maps every response onto exactly one of them. `AuthRefreshFailed`
/// is raised only by the token refresh round trip itself.
#[derive(Debug, Error)]
pub enum Error {
    /// The API rejected the request parameters (HTTP 400).
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Missing, expired, or otherwise invalid OAuth token (HTTP 401).
    #[error("invalid or expired auth token: {0}")]
    InvalidAuth(String),

    /// The server refused the connection (HTTP 403).
    #[error("connection forbidden: {0}")]
    Forbidden(String),

    /// Any other transport or server failure, including malformed bodies
    /// on otherwise successful responses.
    #[error("request failed: {message}")]
    FailedRequest {
        status: Option<u16>,
        message: String,
    },

    /// The token refresh round trip failed. The previously held access
    /// token is left untouched.
    #[error("token refresh failed: {0}")]
    AuthRefreshFailed(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::FailedRequest {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}
