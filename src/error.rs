// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the exporter.
//! Only failures that leave nothing to export become an `AppError` at the
//! top; everything below the root degrades into warnings.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"object_not_found"`,
/// the codes the Notion API reports are encoded in the type system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is not shared with the integration
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            404 => Self::ObjectNotFound,
            401 => Self::Unauthorized,
            429 => Self::RateLimited,
            other => Self::HttpStatus(other),
        }
    }

    /// Whether the object is missing or simply not shared with the integration.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound)
    }

    /// Whether the API key itself was refused.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::RestrictedResource)
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    /// A non-success response whose body was not a Notion error envelope.
    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: reqwest::StatusCode,
    },

    /// A non-success response carrying the Notion error envelope.
    #[error("Notion API error ({status}): {code} - {message}")]
    NotionApi {
        status: u32,
        code: NotionErrorCode,
        message: String,
        request_id: Option<String>,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    /// Not a single page of the root's children could be listed.
    #[error("Failed to fetch content of root '{root_id}': {cause}")]
    RootFetchFailed {
        root_id: String,
        #[source]
        cause: Box<AppError>,
    },

    #[error("Could not resolve page: {0}")]
    PageNotResolved(String),

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },
}

impl AppError {
    /// The Notion error code behind this failure, if the API reported one.
    pub fn notion_code(&self) -> Option<&NotionErrorCode> {
        match self {
            Self::NotionService { code, .. } | Self::NotionApi { code, .. } => Some(code),
            Self::RootFetchFailed { cause, .. } => cause.notion_code(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Pagination that failed after zero or more successful pages.
///
/// Carries every item accumulated before the failure so callers can choose
/// between keeping the partial collection and treating it as a hard error.
#[derive(Debug)]
pub struct PartialFetch<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
    pub cause: AppError,
}

impl<T> PartialFetch<T> {
    /// True when not a single page arrived.
    pub fn is_total(&self) -> bool {
        self.pages_fetched == 0
    }

    /// Keep what arrived and drop the failure.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> fmt::Display for PartialFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pagination stopped after {} page(s) and {} item(s): {}",
            self.pages_fetched,
            self.items.len(),
            self.cause
        )
    }
}

impl<T: fmt::Debug> std::error::Error for PartialFetch<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}
