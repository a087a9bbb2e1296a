//! Reqwest-backed translation adapter.
//!
//! Speaks the LibreTranslate `/translate` protocol: one JSON POST per call,
//! no retries. Transport, status, and decoding failures are mapped onto
//! [`TranslationServiceError`] so the domain can decide how to surface them.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{TranslateRequestDto, TranslateResponseDto};
use crate::domain::LanguageCode;
use crate::domain::ports::{TranslationService, TranslationServiceError};

const USER_AGENT: &str = concat!("ebooks-backend/", env!("CARGO_PKG_VERSION"));

/// Translation adapter for a single LibreTranslate-compatible endpoint.
pub struct HttpTranslationService {
    client: Client,
    translate_url: Url,
    api_key: Option<String>,
}

impl HttpTranslationService {
    /// Build an adapter posting to `{endpoint}/translate` with a request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Fails when the endpoint cannot take a `translate` path segment or the
    /// reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, HttpTranslationBuildError> {
        let translate_url = translate_url(endpoint)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            translate_url,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }
}

/// Construction failures for [`HttpTranslationService`].
#[derive(Debug, thiserror::Error)]
pub enum HttpTranslationBuildError {
    #[error("invalid translation endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[async_trait]
impl TranslationService for HttpTranslationService {
    async fn translate(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<String, TranslationServiceError> {
        let body = TranslateRequestDto {
            q: text,
            source: source.as_str(),
            target: target.as_str(),
            format: "text",
            api_key: self.api_key.as_deref(),
        };
        debug!(%source, %target, chars = text.chars().count(), "requesting translation");
        let response = self
            .client
            .post(self.translate_url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }
        parse_translation(bytes.as_ref(), text)
    }
}

fn translate_url(mut endpoint: Url) -> Result<Url, url::ParseError> {
    if !endpoint.path().ends_with('/') {
        let path = format!("{}/", endpoint.path());
        endpoint.set_path(&path);
    }
    endpoint.join("translate")
}

/// Blank output for non-blank input means the provider dropped the text.
fn parse_translation(body: &[u8], source_text: &str) -> Result<String, TranslationServiceError> {
    let decoded: TranslateResponseDto = serde_json::from_slice(body).map_err(|error| {
        TranslationServiceError::decode(format!("invalid translation payload: {error}"))
    })?;
    if decoded.translated_text.trim().is_empty() && !source_text.trim().is_empty() {
        return Err(TranslationServiceError::decode(
            "provider returned an empty translation",
        ));
    }
    Ok(decoded.translated_text)
}

fn map_transport_error(error: reqwest::Error) -> TranslationServiceError {
    if error.is_timeout() {
        TranslationServiceError::timeout(error.to_string())
    } else {
        TranslationServiceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> TranslationServiceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => TranslationServiceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            TranslationServiceError::timeout(message)
        }
        _ if status.is_client_error() => TranslationServiceError::rejected(message),
        _ => TranslationServiceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > LIMIT {
        let head: String = compact.chars().take(LIMIT).collect();
        format!("{head}...")
    } else {
        compact
    }
}
