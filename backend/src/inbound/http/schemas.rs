//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested ebook does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The store or translation provider is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "ebook failed validation")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as schema violations.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Ebook`].
///
/// Cached translations appear as extra `description_<lang>` string
/// properties, e.g. `description_fr`.
#[derive(ToSchema)]
#[schema(as = crate::domain::Ebook)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EbookSchema {
    /// Identity key.
    #[schema(example = 1)]
    id: i64,
    /// Indexed grouping.
    #[schema(example = "fiction")]
    category: String,
    /// Title.
    #[schema(example = "The Time Traveler's Tale")]
    title: String,
    /// Author.
    #[schema(example = "John Doe")]
    author: String,
    /// English description.
    #[schema(example = "A thrilling story about a man who travels through time.")]
    description: String,
    /// Publication flag.
    published: bool,
    /// Rating, conventionally 0.0 to 5.0.
    #[schema(example = 4.5)]
    rating: f64,
}
