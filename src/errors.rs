//! Failure taxonomy of the HTTP API and the builder that renders it.
//!
//! Every non-2xx response carries the same JSON shape:
//!
//! ```json
//! {"timestamp": "...", "status": 404, "error": "Not Found",
//!  "message": "Category with name France does not exist.",
//!  "path": "/api/v1/categories/France"}
//! ```
//!
//! with an additional ordered `errors` array for field validation failures.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::forms::categories::{CategoryFormError, ListCategoriesQueryError};
use crate::messages::{self, MessageCatalog, MessageSource};
use crate::services::ServiceError;

/// A single rejected request field.
///
/// `code` is a message key; it is resolved into text only when the response
/// is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub code: String,
    pub args: Vec<String>,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

/// Closed set of failure kinds the API reports.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{entity} with {field} '{value}' already exists")]
    AlreadyExists {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("{entity} with {field} '{value}' does not exist")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    /// No route accepts the request's path and method.
    #[error("no route for {method} {path}")]
    RouteNotFound { method: String, path: String },
    /// The request body could not be parsed.
    #[error("malformed request body: {0}")]
    MalformedRequestBody(String),
    /// Query or path parameters are missing, of the wrong type or out of range.
    #[error("invalid request parameters: {0}")]
    InvalidRequestParameters(String),
    #[error("validation failed for {} field(s)", .0.len())]
    ValidationFailed(Vec<FieldViolation>),
    /// Anything else; the detail is logged, never returned.
    #[error("unmapped internal error: {0}")]
    UnmappedInternal(String),
}

impl ApiError {
    /// Fixed status table.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::AlreadyExists { .. } => StatusCode::CONFLICT,
            ApiError::NotFound { .. } | ApiError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MalformedRequestBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidRequestParameters(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::UnmappedInternal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::AlreadyExists {
                entity,
                field,
                value,
            } => ApiError::AlreadyExists {
                entity,
                field,
                value,
            },
            ServiceError::NotFound {
                entity,
                field,
                value,
            } => ApiError::NotFound {
                entity,
                field,
                value,
            },
            ServiceError::Repository(e) => ApiError::UnmappedInternal(e.to_string()),
        }
    }
}

impl From<CategoryFormError> for ApiError {
    fn from(value: CategoryFormError) -> Self {
        ApiError::ValidationFailed(value.0)
    }
}

impl From<ListCategoriesQueryError> for ApiError {
    fn from(value: ListCategoriesQueryError) -> Self {
        ApiError::InvalidRequestParameters(value.0)
    }
}

/// `{field, message}` entry of a validation failure payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Stateless translator from [`ApiError`] to [`ErrorResponse`].
///
/// Owns logging of failures; services only raise typed errors.
#[derive(Clone)]
pub struct ErrorResponder {
    messages: Arc<dyn MessageSource>,
}

impl ErrorResponder {
    pub fn new(messages: Arc<dyn MessageSource>) -> Self {
        Self { messages }
    }

    /// Build the payload for `error` raised while serving `path`.
    pub fn payload(&self, error: &ApiError, path: &str) -> ErrorResponse {
        let status = error.status();
        let message = match error {
            ApiError::AlreadyExists {
                entity,
                field,
                value,
            } => self
                .messages
                .message(messages::ERROR_ENTITY_EXISTS, &[*entity, *field, value.as_str()]),
            ApiError::NotFound {
                entity,
                field,
                value,
            } => self
                .messages
                .message(messages::ERROR_ENTITY_NOT_FOUND, &[*entity, *field, value.as_str()]),
            ApiError::RouteNotFound { method, path } => self
                .messages
                .message(messages::ERROR_ROUTE_NOT_FOUND, &[method.as_str(), path.as_str()]),
            ApiError::MalformedRequestBody(_) => {
                self.messages.message(messages::ERROR_MALFORMED_JSON, &[])
            }
            ApiError::InvalidRequestParameters(_) => {
                self.messages.message(messages::ERROR_INVALID_PARAMETERS, &[])
            }
            ApiError::ValidationFailed(_) => {
                self.messages.message(messages::ERROR_VALIDATION_FAILED, &[])
            }
            ApiError::UnmappedInternal(_) => self.messages.message(messages::ERROR_INTERNAL, &[]),
        };

        let errors = match error {
            ApiError::ValidationFailed(violations) => Some(
                violations
                    .iter()
                    .map(|violation| {
                        let args: Vec<&str> = violation.args.iter().map(String::as_str).collect();
                        FieldError {
                            field: violation.field.clone(),
                            message: self.messages.message(&violation.code, &args),
                        }
                    })
                    .collect(),
            ),
            _ => None,
        };

        ErrorResponse {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message,
            path: path.to_string(),
            errors,
        }
    }

    /// Log `error` and render it as an HTTP response for `req`.
    pub fn respond(&self, error: &ApiError, req: &HttpRequest) -> HttpResponse {
        let path = req.path();
        if error.status().is_server_error() {
            log::error!("{} {path} failed: {error}", req.method());
        } else {
            log::warn!("{} {path} rejected: {error}", req.method());
        }

        HttpResponse::build(error.status()).json(self.payload(error, path))
    }
}

impl Default for ErrorResponder {
    fn default() -> Self {
        Self::new(Arc::new(MessageCatalog::default()))
    }
}
