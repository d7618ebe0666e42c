//! Error types for the registry crawler.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! Each pipeline stage has its own enum; [`CrawlError`] aggregates them for one unit of work.

use std::path::PathBuf;
use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (request build, connection, DNS, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request body could not be serialized
    #[error("Failed to serialize request: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Registry answered 429
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Response body or description of the missing resource
        resource: String,
    },

    /// Invalid request payload (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from the registry
        message: String,
    },

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Any other non-2xx status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if a later attempt could plausibly succeed.
    ///
    /// Nothing in the crawler retries; this exists so callers can decide.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Server { .. } => true,
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// HTTP status carried by this error, if the registry answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::BadRequest { .. } => Some(400),
            Self::Server { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Http(_) | Self::Serialize(_) => None,
        }
    }
}

/// The secure random source failed while generating a search token.
#[derive(thiserror::Error, Debug)]
pub enum TokenError {
    /// OS entropy source error
    #[error("failed to draw secure random bytes: {0}")]
    Entropy(#[from] rand::Error),

    /// A caller-supplied token is not three ASCII letters
    #[error("invalid search token {value:?}: expected 3 letters a-z")]
    Invalid {
        /// The rejected input
        value: String,
    },
}

impl TokenError {
    /// Create an invalid token error.
    #[must_use]
    pub fn invalid(value: impl Into<String>) -> Self {
        Self::Invalid { value: value.into() }
    }
}

/// A `dosID` that is not a non-negative decimal integer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid entity identifier {0:?}")]
pub struct InvalidIdentifier(pub String);

impl InvalidIdentifier {
    /// Wrap the rejected raw value.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

/// Errors from the on-disk output store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Output directory could not be created
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        /// Directory path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be opened or created
    #[error("failed to open {}: {source}", path.display())]
    Open {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Write or flush failed
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Configuration is unusable.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Endpoint is not an absolute http(s) URL
    #[error("invalid {field} {value:?}: {reason}")]
    InvalidUrl {
        /// Config field name
        field: &'static str,
        /// Rejected value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Failure of one unit of crawl work (a search cycle or one identifier).
#[derive(thiserror::Error, Debug)]
pub enum CrawlError {
    /// Registry request failed
    #[error("registry request failed: {0}")]
    Client(#[from] ClientError),

    /// Output could not be persisted
    #[error("persistence failed: {0}")]
    Store(#[from] StoreError),

    /// Search token could not be produced
    #[error("token generation failed: {0}")]
    Token(#[from] TokenError),
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for crawl operations.
pub type CrawlResult<T> = Result<T, CrawlError>;
