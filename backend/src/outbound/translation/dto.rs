//! Wire types for LibreTranslate-compatible `/translate` calls.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct TranslateRequestDto<'a> {
    pub(super) q: &'a str,
    pub(super) source: &'a str,
    pub(super) target: &'a str,
    pub(super) format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TranslateResponseDto {
    #[serde(rename = "translatedText")]
    pub(super) translated_text: String,
}
