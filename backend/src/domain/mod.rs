//! Domain primitives, services, and ports for the ebook catalogue.
//!
//! Purpose: define the record types, update and validation rules, and the
//! services that drive them. Adapters depend on this module; it depends on
//! no adapter.
//!
//! Public surface:
//! - `Ebook`, `EbookId`, `Category`, `Translations`, `EbookChanges`: the
//!   record and its field-level changes.
//! - `LanguageCode`: validated translation target.
//! - `PartialUpdateBuilder`, `validate_new_ebook`, `MinimumRating`: input
//!   rules for update, add, and category listings.
//! - `EbookService`, `TranslationCacheService`: driving port implementations.
//! - `Error`, `ErrorCode`, `TraceId`: error payload and request correlation.

pub mod ebook;
pub mod ebook_service;
pub mod ebook_validation;
pub mod error;
pub mod language;
pub mod partial_update;
pub mod ports;
pub mod rating_filter;
pub mod trace_id;
pub mod translation_cache;

pub use self::ebook::{
    Category, CategoryValidationError, Ebook, EbookChanges, EbookId, Translations,
};
pub use self::ebook_service::EbookService;
pub use self::ebook_validation::{FieldViolation, ViolationCode, validate_new_ebook};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::language::{
    DEFAULT_TARGET_LANGUAGE, LanguageCode, LanguageCodeValidationError, SOURCE_LANGUAGE,
    TRANSLATION_FIELD_PREFIX,
};
pub use self::partial_update::PartialUpdateBuilder;
pub use self::rating_filter::MinimumRating;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::translation_cache::TranslationCacheService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use ebooks::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u32> {
///     Err(Error::not_found("ebook 7 not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
