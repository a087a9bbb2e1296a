//! Port for machine translation providers.

use async_trait::async_trait;

use crate::domain::LanguageCode;

use super::define_port_error;

define_port_error! {
    /// Errors raised by translation adapters.
    pub enum TranslationServiceError {
        /// The provider could not be reached or is not configured.
        Transport { message: String } =>
            "translation transport failed: {message}",
        /// The provider did not answer in time.
        Timeout { message: String } =>
            "translation timed out: {message}",
        /// The provider throttled the request.
        RateLimited { message: String } =>
            "translation rate limited: {message}",
        /// The provider refused the request.
        Rejected { message: String } =>
            "translation rejected: {message}",
        /// The provider answered with an unreadable payload.
        Decode { message: String } =>
            "translation response could not be decoded: {message}",
    }
}

/// Translates text between languages.
///
/// Adapters perform at most one provider call per invocation and do not
/// retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Translate `text` from `source` into `target`.
    async fn translate(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<String, TranslationServiceError>;
}

/// Deterministic translator that tags the text with the target language.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTranslationService;

#[async_trait]
impl TranslationService for FixtureTranslationService {
    async fn translate(
        &self,
        text: &str,
        _source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<String, TranslationServiceError> {
        Ok(format!("[{target}] {text}"))
    }
}
