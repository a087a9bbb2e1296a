//! Translator used when no provider endpoint is configured.

use async_trait::async_trait;

use crate::domain::LanguageCode;
use crate::domain::ports::{TranslationService, TranslationServiceError};

/// Fails every call with a transport error, which the domain reports as
/// `service_unavailable`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredTranslationService;

#[async_trait]
impl TranslationService for UnconfiguredTranslationService {
    async fn translate(
        &self,
        _text: &str,
        _source: &LanguageCode,
        _target: &LanguageCode,
    ) -> Result<String, TranslationServiceError> {
        Err(TranslationServiceError::transport(
            "translation endpoint not configured",
        ))
    }
}
