use thiserror::Error;

/// Failure of a metadata API call.
///
/// `Display` yields the message shown to the user, so callers can embed it
/// verbatim in their own error text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Authorization failed. Please check your API credentials.")]
    Unauthorized,

    #[error("The requested resource could not be found.")]
    NotFound,

    #[error("You have exceeded your rate limit. Please try again later.")]
    RateLimited,

    #[error("Server error. Please try again later.")]
    Server { status: u16 },

    #[error("Something went wrong with the request")]
    Status { status: u16 },

    /// The request was sent but no response came back
    #[error("Network error. Please check your connection.")]
    Network,

    #[error("Search request timed out. Please try again.")]
    Timeout,

    /// HTTP 200 whose body lacks the expected shape
    #[error("Invalid API response format")]
    MalformedResponse,

    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Request(String),
}

impl ApiError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound,
            429 => ApiError::RateLimited,
            500..=599 => ApiError::Server { status },
            _ => ApiError::Status { status },
        }
    }

    /// Classify a transport failure. Timeouts only surface as such for
    /// search, which is the one call with its own deadline.
    pub fn from_transport(err: &reqwest::Error, searching: bool) -> Self {
        if err.is_timeout() {
            return if searching { ApiError::Timeout } else { ApiError::Network };
        }
        if err.is_builder() {
            return ApiError::Request(err.to_string());
        }
        if err.is_decode() {
            return ApiError::Decode(err.to_string());
        }
        ApiError::Network
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::NotFound => Some(404),
            ApiError::RateLimited => Some(429),
            ApiError::Server { status } | ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether re-issuing the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Network | ApiError::Timeout | ApiError::RateLimited | ApiError::Server { .. }
        )
    }
}
