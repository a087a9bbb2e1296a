//! Translate-or-serve-cached orchestration for ebook descriptions.
//!
//! The read, decide, write sequence is not atomic against the store. Two
//! concurrent first requests for the same `(id, language)` may both call the
//! provider and both write; the last write wins and either value is a valid
//! translation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ebook_service::map_repository_error;
use crate::domain::ports::{
    DescriptionTranslation, EbookRepository, TranslateDescriptionRequest,
    TranslateDescriptionResponse, TranslationService, TranslationServiceError,
};
use crate::domain::{EbookChanges, Error, LanguageCode};

/// Map provider failures onto the domain error taxonomy.
fn map_translation_error(error: TranslationServiceError) -> Error {
    warn!(error = %error, "translation provider failed");
    match error {
        TranslationServiceError::Transport { message }
        | TranslationServiceError::Timeout { message }
        | TranslationServiceError::RateLimited { message } => {
            Error::service_unavailable(format!("translation service unavailable: {message}"))
        }
        TranslationServiceError::Rejected { message }
        | TranslationServiceError::Decode { message } => {
            Error::internal(format!("translation failed: {message}"))
        }
    }
}

/// Caches provider translations in `description_<lang>` record fields.
#[derive(Clone)]
pub struct TranslationCacheService<R: ?Sized, T: ?Sized> {
    repo: Arc<R>,
    translator: Arc<T>,
}

impl<R: ?Sized, T: ?Sized> TranslationCacheService<R, T> {
    /// Create a service over the record store and translation provider.
    pub fn new(repo: Arc<R>, translator: Arc<T>) -> Self {
        Self { repo, translator }
    }
}

#[async_trait]
impl<R, T> DescriptionTranslation for TranslationCacheService<R, T>
where
    R: EbookRepository + ?Sized,
    T: TranslationService + ?Sized,
{
    async fn translate_description(
        &self,
        request: TranslateDescriptionRequest,
    ) -> Result<TranslateDescriptionResponse, Error> {
        let TranslateDescriptionRequest { id, language } = request;
        let ebook = self
            .repo
            .get_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("ebook {id} not found")))?;

        if let Some(cached) = ebook.translations.get(&language) {
            debug!(%id, language = %language, "translation cache hit");
            return Ok(TranslateDescriptionResponse {
                translated: cached.to_owned(),
                cached: true,
            });
        }

        let translated = self
            .translator
            .translate(&ebook.description, &LanguageCode::source(), &language)
            .await
            .map_err(map_translation_error)?;

        let field = language.cache_field();
        self.repo
            .update_fields(id, &EbookChanges::translation(language, translated.clone()))
            .await
            .map_err(map_repository_error)?;
        info!(%id, %field, "translation cached");

        Ok(TranslateDescriptionResponse {
            translated,
            cached: false,
        })
    }
}

#[cfg(test)]
#[path = "translation_cache_tests.rs"]
mod tests;
