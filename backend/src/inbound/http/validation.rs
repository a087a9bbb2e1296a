//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Category, EbookId, Error, LanguageCode};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    InvalidCategory,
    InvalidLanguage,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidCategory => "invalid_category",
            ErrorCode::InvalidLanguage => "invalid_language",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn invalid_value_error(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_ebook_id(value: &str, field: FieldName) -> Result<EbookId, Error> {
    value.trim().parse::<i64>().map(EbookId::new).map_err(|_| {
        invalid_value_error(
            field,
            ErrorCode::InvalidId,
            format!("{} must be an integer", field.as_str()),
            value,
        )
    })
}

pub(crate) fn parse_category(value: String, field: FieldName) -> Result<Category, Error> {
    Category::new(value.clone()).map_err(|err| {
        invalid_value_error(field, ErrorCode::InvalidCategory, err.to_string(), &value)
    })
}

/// Parse an optional language code.
///
/// An absent or blank value selects the default target language.
pub(crate) fn parse_language(
    value: Option<String>,
    field: FieldName,
) -> Result<LanguageCode, Error> {
    match value {
        Some(raw) if !raw.trim().is_empty() => LanguageCode::new(raw.clone()).map_err(|err| {
            invalid_value_error(field, ErrorCode::InvalidLanguage, err.to_string(), &raw)
        }),
        _ => Ok(LanguageCode::default_target()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ID: FieldName = FieldName::new("id");
    const LANGUAGE: FieldName = FieldName::new("language");

    #[rstest]
    #[case("1", 1)]
    #[case(" 42 ", 42)]
    #[case("-3", -3)]
    fn parses_integer_ids(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(parse_ebook_id(raw, ID).expect("valid id"), EbookId::new(expected));
    }

    #[rstest]
    fn rejects_non_integer_ids() {
        let err = parse_ebook_id("abc", ID).expect_err("invalid id");
        assert_eq!(err.message(), "id must be an integer");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "id", "value": "abc", "code": "invalid_id"}))
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn absent_or_blank_language_defaults_to_chinese(#[case] raw: Option<&str>) {
        let code = parse_language(raw.map(str::to_owned), LANGUAGE).expect("default");
        assert_eq!(code.as_str(), "zh");
    }

    #[rstest]
    fn rejects_malformed_language() {
        let err = parse_language(Some("fr\"}".to_owned()), LANGUAGE).expect_err("malformed");
        let details = err.details().expect("details");
        assert_eq!(details["code"], "invalid_language");
        assert_eq!(details["field"], "language");
    }

    #[rstest]
    fn rejects_blank_category() {
        let err = parse_category(" ".to_owned(), FieldName::new("category"))
            .expect_err("blank category");
        assert_eq!(err.details().expect("details")["code"], "invalid_category");
    }
}
