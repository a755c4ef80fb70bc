use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::middleware_layer::auth::{LOGIN_REQUIRED_MESSAGE, SESSION_EXPIRED_MESSAGE};

/// A single backend validation failure.
///
/// The backend reports these as `{loc, msg, type}`; they are carried to the
/// caller untouched apart from the rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationDetail {
    /// Path of the offending value, e.g. `["body", "project_title"]`.
    pub location: Vec<String>,
    /// Human readable message.
    pub message: String,
    /// Machine readable error kind, e.g. `value_error.missing`.
    pub kind: String,
}

/// The serialisable shape of a failed call, suitable for handing to a UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescriptor {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub detail: Vec<ValidationDetail>,
}

/// The client's error type.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Credentials were rejected.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The backend answered 401/403 and the interceptor already handled it.
    #[error("Request rejected with {status}")]
    Unauthenticated {
        status: StatusCode,
        /// Whether a session was active (and has now been cleared).
        session_expired: bool,
    },

    /// A resource not found error.
    #[error("Resource not found")]
    NotFound,

    /// Any other non-success response.
    #[error("Request failed with {status}")]
    Rejected {
        status: StatusCode,
        message: Option<String>,
        detail: Vec<ValidationDetail>,
    },

    /// A payload failed client-side validation and was never sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The response body did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The call needs a session and there is none.
    #[error("User is not logged-in")]
    NotLoggedIn,

    /// A user-facing message layered over the underlying failure.
    #[error("{message}")]
    Operation {
        message: String,
        #[source]
        source: Box<ApiError>,
    },
}

/// A `Result` type that uses `ApiError` as the error type.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<garde::Report> for ApiError {
    fn from(report: garde::Report) -> Self {
        ApiError::Validation(report.to_string())
    }
}

impl ApiError {
    /// Wraps the error with a user-facing message.
    pub fn context(self, message: impl Into<String>) -> Self {
        ApiError::Operation {
            message: message.into(),
            source: Box::new(self),
        }
    }

    /// Wraps the error with `message` unless the backend already supplied one.
    pub fn or_context(self, message: impl Into<String>) -> Self {
        let has_backend_message = matches!(
            self.root(),
            ApiError::Rejected {
                message: Some(_),
                ..
            }
        );
        if has_backend_message {
            self
        } else {
            self.context(message)
        }
    }

    /// The innermost error, skipping any `Operation` layers.
    pub fn root(&self) -> &ApiError {
        match self {
            ApiError::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// The HTTP status that caused this error, if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self.root() {
            ApiError::Network(e) => e.status(),
            ApiError::Unauthenticated { status, .. } | ApiError::Rejected { status, .. } => {
                Some(*status)
            }
            ApiError::NotFound => Some(StatusCode::NOT_FOUND),
            _ => None,
        }
    }

    /// Whether the interceptor handled this failure.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self.root(), ApiError::Unauthenticated { .. })
    }

    /// Backend validation entries, if any.
    pub fn detail(&self) -> &[ValidationDetail] {
        match self.root() {
            ApiError::Rejected { detail, .. } => detail,
            _ => &[],
        }
    }

    /// A short, stable classification of the failure.
    pub fn code(&self) -> Option<&'static str> {
        match self.root() {
            ApiError::Network(_) => Some("ERR_NETWORK"),
            ApiError::Decode(_) => Some("ERR_BAD_RESPONSE"),
            ApiError::Validation(_) => Some("ERR_VALIDATION"),
            ApiError::NotLoggedIn => Some("ERR_NOT_LOGGED_IN"),
            ApiError::Authentication(_) => Some("ERR_BAD_REQUEST"),
            ApiError::Unauthenticated { status, .. } | ApiError::Rejected { status, .. } => {
                if status.is_server_error() {
                    Some("ERR_BAD_RESPONSE")
                } else {
                    Some("ERR_BAD_REQUEST")
                }
            }
            ApiError::NotFound => Some("ERR_BAD_REQUEST"),
            ApiError::Operation { .. } => None,
        }
    }

    /// The message to show the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(e) => {
                tracing::error!("Network error: {}", e);
                "Unable to reach the server. Please try again later.".to_string()
            }

            ApiError::Authentication(msg) => {
                tracing::warn!("Authentication failed: {}", msg);
                msg.clone()
            }

            ApiError::Unauthenticated {
                session_expired, ..
            } => {
                tracing::warn!("Request rejected, session_expired={}", session_expired);
                if *session_expired {
                    SESSION_EXPIRED_MESSAGE.to_string()
                } else {
                    LOGIN_REQUIRED_MESSAGE.to_string()
                }
            }

            ApiError::NotFound => {
                tracing::debug!("Resource not found");
                "The requested resource could not be found.".to_string()
            }

            ApiError::Rejected {
                status, message, ..
            } => {
                tracing::debug!("Request rejected with {}: {:?}", status, message);
                message
                    .clone()
                    .unwrap_or_else(|| "The request could not be completed.".to_string())
            }

            ApiError::Validation(msg) => {
                tracing::debug!("Validation error: {}", msg);
                msg.clone()
            }

            ApiError::Decode(msg) => {
                tracing::error!("Decode error: {}", msg);
                "Received an unexpected response from the server.".to_string()
            }

            ApiError::NotLoggedIn => {
                tracing::debug!("Call attempted without a session");
                "User is not logged-in".to_string()
            }

            ApiError::Operation { message, source } => {
                tracing::debug!("{}: {}", message, source);
                message.clone()
            }
        }
    }

    /// Flattens the error into its serialisable descriptor.
    pub fn descriptor(&self) -> ErrorDescriptor {
        let status = self.status();
        ErrorDescriptor {
            message: self.user_message(),
            code: self.code().map(str::to_string),
            http_status: status.map(|s| s.as_u16()),
            status_text: status
                .and_then(|s| s.canonical_reason())
                .map(str::to_string),
            detail: self.detail().to_vec(),
        }
    }
}
