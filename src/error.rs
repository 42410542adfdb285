//! Error types for the TickTick client.

use thiserror::Error;

/// Errors that can occur when using the TickTick client.
#[derive(Debug, Error)]
pub enum Error {
    /// The access token cannot be used as an HTTP header value.
    #[error("invalid token format")]
    InvalidToken,

    /// A request body could not be encoded as JSON. Nothing was sent.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The API answered successfully but the body did not have the expected shape.
    #[error("failed to parse response: {0}")]
    Parse(#[source] serde_json::Error),

    /// The OAuth token endpoint rejected the request or returned garbage.
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl Error {
    /// Returns the API error if this error came from a non-success response.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Returns true if the API reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.api().is_some_and(ApiError::is_not_found)
    }
}

/// A non-success response from the TickTick API.
///
/// The message is the raw response body; it is not parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("TickTick API error (status {status}): {message}")]
pub struct ApiError {
    /// The HTTP status code.
    pub status: u16,
    /// The raw response body.
    pub message: String,
}

/// Classification of an [`ApiError`] by status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 404
    NotFound,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 429
    RateLimited,
    /// 500-599
    ServerError,
    /// Any other non-success status.
    Other,
}

impl ApiError {
    /// Create an API error from a status code and raw body.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Classify the error by its status code.
    pub fn kind(&self) -> ApiErrorKind {
        match self.status {
            404 => ApiErrorKind::NotFound,
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            429 => ApiErrorKind::RateLimited,
            500..=599 => ApiErrorKind::ServerError,
            _ => ApiErrorKind::Other,
        }
    }

    /// Returns true for 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Returns true for 401 Unauthorized.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Returns true for 403 Forbidden.
    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }

    /// Returns true for 429 Too Many Requests.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Returns true for any 5xx status.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// A failed OAuth token request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TokenError {
    /// Human-readable description including status and body where available.
    pub message: String,
}

impl TokenError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
