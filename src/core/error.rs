//! Typed error handling for the library API
//!
//! Handlers return [`LibraryError`], which maps every failure onto an HTTP
//! status and a JSON body of the form
//! `{ "code": "...", "message": "...", "details": {...} }`.
//!
//! # Error Categories
//!
//! - [`ResourceError`]: missing or conflicting resources
//! - [`QueryError`]: rejected `fields` / `orderBy` query parameters
//! - [`ValidationError`]: invalid request bodies
//! - [`LinkError`]: hypermedia link targets that could not be built
//! - [`StorageError`]: repository failures
//! - [`ConfigError`]: configuration loading and validation
//!
//! # Example
//!
//! ```rust,ignore
//! let author = repository
//!     .get_author(&id)
//!     .await?
//!     .ok_or(ResourceError::NotFound { resource: "author", id })?;
//! ```

use crate::core::property_mapping::OrderByError;
use crate::core::shaping::ShapeError;
use crate::links::routes::RouteError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type for the library API
#[derive(Debug)]
pub enum LibraryError {
    /// Missing or conflicting resources
    Resource(ResourceError),

    /// Rejected query parameters
    Query(QueryError),

    /// Invalid request bodies
    Validation(ValidationError),

    /// Link generation failures
    Link(LinkError),

    /// Shaping invariant violations
    Shaping(ShapeError),

    /// Storage backend errors
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Resource(e) => write!(f, "{}", e),
            LibraryError::Query(e) => write!(f, "{}", e),
            LibraryError::Validation(e) => write!(f, "{}", e),
            LibraryError::Link(e) => write!(f, "{}", e),
            LibraryError::Shaping(e) => write!(f, "Shaping failed: {}", e),
            LibraryError::Storage(e) => write!(f, "{}", e),
            LibraryError::Config(e) => write!(f, "{}", e),
            LibraryError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for LibraryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LibraryError::Resource(e) => Some(e),
            LibraryError::Query(e) => Some(e),
            LibraryError::Validation(e) => Some(e),
            LibraryError::Link(e) => Some(e),
            LibraryError::Shaping(e) => Some(e),
            LibraryError::Storage(e) => Some(e),
            LibraryError::Config(e) => Some(e),
            LibraryError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LibraryError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LibraryError::Resource(e) => e.status_code(),
            LibraryError::Query(_) => StatusCode::BAD_REQUEST,
            LibraryError::Validation(e) => e.status_code(),
            LibraryError::Link(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LibraryError::Shaping(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LibraryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LibraryError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LibraryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            LibraryError::Resource(e) => e.error_code(),
            LibraryError::Query(e) => e.error_code(),
            LibraryError::Validation(e) => e.error_code(),
            LibraryError::Link(e) => e.error_code(),
            LibraryError::Shaping(_) => "SHAPING_ERROR",
            LibraryError::Storage(_) => "STORAGE_ERROR",
            LibraryError::Config(_) => "CONFIG_ERROR",
            LibraryError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error is a server fault rather than a client mistake
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Convert to an error response
    ///
    /// Internal faults get a generic message so implementation details do
    /// not leak to clients.
    pub fn to_response(&self) -> ErrorResponse {
        let message = if self.is_internal() {
            "An unexpected fault happened. Try again later.".to_string()
        } else {
            self.to_string()
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            LibraryError::Resource(
                ResourceError::NotFound { resource, id }
                | ResourceError::AlreadyExists { resource, id },
            ) => Some(serde_json::json!({
                "resource": resource,
                "id": id.to_string()
            })),
            LibraryError::Query(QueryError::InvalidFields { resource, fields }) => {
                Some(serde_json::json!({ "resource": resource, "fields": fields }))
            }
            LibraryError::Query(QueryError::InvalidOrderBy {
                resource,
                order_by,
                ..
            }) => Some(serde_json::json!({ "resource": resource, "orderBy": order_by })),
            LibraryError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_internal() {
            tracing::error!(code = self.error_code(), error = %self, "Request failed");
        } else {
            tracing::warn!(code = self.error_code(), error = %self, "Request rejected");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Resource Errors
// =============================================================================

/// Errors related to resource lookups
#[derive(Debug)]
pub enum ResourceError {
    /// Resource was not found
    NotFound { resource: &'static str, id: Uuid },

    /// Resource already exists (conflict)
    AlreadyExists { resource: &'static str, id: Uuid },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::NotFound { resource, id } => {
                write!(f, "{} with id '{}' not found", resource, id)
            }
            ResourceError::AlreadyExists { resource, id } => {
                write!(f, "{} with id '{}' already exists", resource, id)
            }
        }
    }
}

impl std::error::Error for ResourceError {}

impl ResourceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ResourceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ResourceError::AlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ResourceError::NotFound { .. } => "RESOURCE_NOT_FOUND",
            ResourceError::AlreadyExists { .. } => "RESOURCE_ALREADY_EXISTS",
        }
    }
}

impl From<ResourceError> for LibraryError {
    fn from(err: ResourceError) -> Self {
        LibraryError::Resource(err)
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors for rejected query parameters
#[derive(Debug)]
pub enum QueryError {
    /// The `fields` parameter names a field the resource does not declare
    InvalidFields {
        resource: &'static str,
        fields: String,
    },

    /// The `orderBy` parameter cannot be mapped onto backing properties
    InvalidOrderBy {
        resource: &'static str,
        order_by: String,
        reason: OrderByError,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::InvalidFields { resource, fields } => {
                write!(f, "Invalid field selection '{}' for {}", fields, resource)
            }
            QueryError::InvalidOrderBy {
                resource,
                order_by,
                reason,
            } => {
                write!(
                    f,
                    "Invalid sort expression '{}' for {}: {}",
                    order_by, resource, reason
                )
            }
        }
    }
}

impl std::error::Error for QueryError {}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::InvalidFields { .. } => "INVALID_FIELDS",
            QueryError::InvalidOrderBy { .. } => "INVALID_ORDER_BY",
        }
    }
}

impl From<QueryError> for LibraryError {
    fn from(err: QueryError) -> Self {
        LibraryError::Query(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors for invalid request bodies
#[derive(Debug)]
pub enum ValidationError {
    /// No (or unparsable) body was sent
    MissingBody { message: String },

    /// One or more fields failed validation
    FieldErrors(Vec<FieldValidationError>),

    /// A JSON Patch document could not be applied
    InvalidPatch { message: String },

    /// The request body media type is not accepted by this route
    UnsupportedMediaType { media_type: String },
}

/// A single field validation failure
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingBody { message } => {
                write!(f, "Request body is missing or invalid: {}", message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidPatch { message } => {
                write!(f, "Invalid patch document: {}", message)
            }
            ValidationError::UnsupportedMediaType { media_type } => {
                write!(f, "Unsupported media type '{}'", media_type)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::MissingBody { .. } => StatusCode::BAD_REQUEST,
            ValidationError::FieldErrors(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ValidationError::InvalidPatch { .. } => StatusCode::BAD_REQUEST,
            ValidationError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingBody { .. } => "MISSING_BODY",
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::InvalidPatch { .. } => "INVALID_PATCH",
            ValidationError::UnsupportedMediaType { .. } => "UNSUPPORTED_MEDIA_TYPE",
        }
    }
}

impl From<ValidationError> for LibraryError {
    fn from(err: ValidationError) -> Self {
        LibraryError::Validation(err)
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ValidationError::FieldErrors(flatten_field_errors(&errors))
    }
}

/// Every failure in `errors` as `path: message` pairs, sorted by path
pub fn flatten_field_errors(errors: &validator::ValidationErrors) -> Vec<FieldValidationError> {
    let mut fields = Vec::new();
    collect_field_errors("", errors, &mut fields);
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Flatten nested validator errors into `path: message` pairs
///
/// Nested structs are addressed as `parent.field`, list items as
/// `parent[index].field`.
fn collect_field_errors(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<FieldValidationError>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    FieldValidationError::new(path.clone(), message)
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

impl From<validator::ValidationErrors> for LibraryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        LibraryError::Validation(errors.into())
    }
}

// =============================================================================
// Link Errors
// =============================================================================

/// A link target could not be produced
///
/// Partial link sets are never returned, so these are server faults.
#[derive(Debug)]
pub enum LinkError {
    /// Route resolution failed
    Resolution { rel: String, source: RouteError },
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::Resolution { rel, source } => {
                write!(f, "Cannot build link '{}': {}", rel, source)
            }
        }
    }
}

impl std::error::Error for LinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkError::Resolution { source, .. } => Some(source),
        }
    }
}

impl LinkError {
    pub fn error_code(&self) -> &'static str {
        match self {
            LinkError::Resolution { .. } => "LINK_RESOLUTION_FAILED",
        }
    }
}

impl From<LinkError> for LibraryError {
    fn from(err: LinkError) -> Self {
        LibraryError::Link(err)
    }
}

impl From<ShapeError> for LibraryError {
    fn from(err: ShapeError) -> Self {
        LibraryError::Shaping(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the repository
#[derive(Debug)]
pub enum StorageError {
    /// A lock guarding the in-memory store was poisoned
    LockPoisoned,

    /// Storage operation failed
    OperationFailed { operation: String, message: String },

    /// A record with this key already exists elsewhere
    DuplicateKey { resource: &'static str, id: Uuid },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::LockPoisoned => write!(f, "Storage lock poisoned"),
            StorageError::OperationFailed { operation, message } => {
                write!(f, "Storage {} failed: {}", operation, message)
            }
            StorageError::DuplicateKey { resource, id } => {
                write!(f, "{} key '{}' is already taken", resource, id)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for LibraryError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateKey { resource, id } => {
                LibraryError::Resource(ResourceError::AlreadyExists { resource, id })
            }
            err => LibraryError::Storage(err),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read or parse the configuration
    Load { path: String, message: String },

    /// Configuration values are inconsistent
    Invalid { field: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load { path, message } => {
                write!(f, "Failed to load configuration from '{}': {}", path, message)
            }
            ConfigError::Invalid { field, message } => {
                write!(f, "Invalid configuration for '{}': {}", field, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for LibraryError {
    fn from(err: ConfigError) -> Self {
        LibraryError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::Internal(format!("JSON serialization failed: {}", err))
    }
}

impl From<anyhow::Error> for LibraryError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<LibraryError>() {
            Ok(library_error) => library_error,
            Err(err) => LibraryError::Internal(err.to_string()),
        }
    }
}

/// Result type alias using LibraryError
pub type LibraryResult<T> = std::result::Result<T, LibraryError>;
