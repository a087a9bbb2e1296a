//! Driving port for translated ebook descriptions.

use async_trait::async_trait;

use crate::domain::{EbookId, Error, LanguageCode};

/// Request for the description of `id` in `language`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateDescriptionRequest {
    /// Record whose description is translated.
    pub id: EbookId,
    /// Target language.
    pub language: LanguageCode,
}

/// Translated description and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateDescriptionResponse {
    /// Description in the requested language.
    pub translated: String,
    /// Whether the text was served from the record's cache field.
    pub cached: bool,
}

/// Driving port for translate-or-serve-cached descriptions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DescriptionTranslation: Send + Sync {
    /// Return the cached translation or compute and cache it.
    ///
    /// # Errors
    ///
    /// - `not_found` when the record does not exist.
    /// - `service_unavailable` or `internal_error` when the store or the
    ///   translation provider fails. Nothing is cached on failure.
    async fn translate_description(
        &self,
        request: TranslateDescriptionRequest,
    ) -> Result<TranslateDescriptionResponse, Error>;
}

/// Fixture implementation returning a tagged placeholder.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDescriptionTranslation;

#[async_trait]
impl DescriptionTranslation for FixtureDescriptionTranslation {
    async fn translate_description(
        &self,
        request: TranslateDescriptionRequest,
    ) -> Result<TranslateDescriptionResponse, Error> {
        Ok(TranslateDescriptionResponse {
            translated: format!("[{}] ebook {}", request.language, request.id),
            cached: false,
        })
    }
}
