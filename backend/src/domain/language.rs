//! Language codes accepted for description translations.
//!
//! A code becomes part of a persisted field name (`description_<code>`), so
//! the alphabet is restricted at construction: 2–3 ASCII letters, optionally
//! followed by `-` and a 2–4 character ASCII alphanumeric region/script
//! subtag. Case is preserved.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Source language of every stored description.
pub const SOURCE_LANGUAGE: &str = "en";

/// Target language used when a caller does not name one.
pub const DEFAULT_TARGET_LANGUAGE: &str = "zh";

/// Prefix of the per-language cache field on a record.
pub const TRANSLATION_FIELD_PREFIX: &str = "description_";

/// Validation failure for [`LanguageCode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageCodeValidationError {
    /// The code was empty.
    #[error("language code must not be empty")]
    Empty,
    /// The code contained characters or a shape outside the allowed grammar.
    #[error("language code `{0}` must look like `fr` or `zh-TW`")]
    Malformed(String),
}

/// Validated language code such as `fr` or `zh-TW`.
///
/// # Examples
/// ```
/// use ebooks::domain::LanguageCode;
///
/// let code = LanguageCode::new("zh-TW").expect("valid code");
/// assert_eq!(code.cache_field(), "description_zh-TW");
/// assert!(LanguageCode::new("fr}; DROP").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Validate and wrap a language code.
    pub fn new(raw: impl Into<String>) -> Result<Self, LanguageCodeValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(LanguageCodeValidationError::Empty);
        }
        if !is_well_formed(&raw) {
            return Err(LanguageCodeValidationError::Malformed(raw));
        }
        Ok(Self(raw))
    }

    /// The default target language (`zh`).
    #[must_use]
    pub fn default_target() -> Self {
        Self(DEFAULT_TARGET_LANGUAGE.to_owned())
    }

    /// The language every description is written in (`en`).
    #[must_use]
    pub fn source() -> Self {
        Self(SOURCE_LANGUAGE.to_owned())
    }

    /// Borrow the code.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Name of the record field caching the translation for this language.
    pub fn cache_field(&self) -> String {
        format!("{TRANSLATION_FIELD_PREFIX}{}", self.0)
    }

    /// Recover a language code from a cache field name.
    ///
    /// Returns `None` for names without the prefix or with an invalid code.
    pub fn from_cache_field(field: &str) -> Option<Self> {
        field
            .strip_prefix(TRANSLATION_FIELD_PREFIX)
            .and_then(|code| Self::new(code).ok())
    }
}

fn is_well_formed(raw: &str) -> bool {
    let (primary, subtag) = match raw.split_once('-') {
        Some((primary, subtag)) => (primary, Some(subtag)),
        None => (raw, None),
    };
    let primary_ok =
        (2..=3).contains(&primary.len()) && primary.bytes().all(|b| b.is_ascii_alphabetic());
    let subtag_ok = subtag.is_none_or(|tag| {
        (2..=4).contains(&tag.len()) && tag.bytes().all(|b| b.is_ascii_alphanumeric())
    });
    primary_ok && subtag_ok
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = LanguageCodeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = LanguageCodeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LanguageCode> for String {
    fn from(value: LanguageCode) -> Self {
        value.0
    }
}
