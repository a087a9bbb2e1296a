//! Structural validation of inbound ebook documents.
//!
//! Every violation is collected before failing so callers can correct the
//! whole payload in one round trip.

use serde::Serialize;
use serde_json::{Map, Value, json};

use super::{Category, Ebook, EbookId, Error, LanguageCode, TRANSLATION_FIELD_PREFIX, Translations};

/// Machine-readable reason attached to each [`FieldViolation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// The payload was not a JSON object.
    InvalidBody,
    /// A required field was absent.
    MissingField,
    /// The field held the wrong JSON type.
    InvalidType,
    /// A string field that must carry text was blank.
    EmptyValue,
    /// The field is not part of the record schema.
    UnexpectedField,
    /// A `description_<lang>` field named an invalid language code.
    InvalidLanguage,
    /// The field exists but cannot be written by this operation.
    ReadOnlyField,
}

/// One schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Offending field, or `body` for the payload as a whole.
    pub field: String,
    /// Reason code.
    pub code: ViolationCode,
    /// Human-readable explanation.
    pub message: String,
}

/// Accumulates violations while typed values are read out of a JSON object.
#[derive(Debug, Default)]
pub(crate) struct ViolationCollector {
    violations: Vec<FieldViolation>,
}

impl ViolationCollector {
    pub(crate) fn push(&mut self, field: &str, code: ViolationCode, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.to_owned(),
            code,
            message: message.into(),
        });
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub(crate) fn into_error(self, message: &str) -> Error {
        Error::invalid_request(message).with_details(json!({ "violations": self.violations }))
    }

    fn wrong_type(&mut self, field: &str, expected: &str) {
        self.push(
            field,
            ViolationCode::InvalidType,
            format!("{field} must be {expected}"),
        );
    }

    pub(crate) fn id(&mut self, field: &str, value: &Value) -> Option<EbookId> {
        let id = value.as_i64().map(EbookId::new);
        if id.is_none() {
            self.wrong_type(field, "an integer");
        }
        id
    }

    pub(crate) fn text(&mut self, field: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(text) => Some(text.clone()),
            _ => {
                self.wrong_type(field, "a string");
                None
            }
        }
    }

    pub(crate) fn category(&mut self, field: &str, value: &Value) -> Option<Category> {
        let raw = self.text(field, value)?;
        match Category::new(raw) {
            Ok(category) => Some(category),
            Err(err) => {
                self.push(field, ViolationCode::EmptyValue, err.to_string());
                None
            }
        }
    }

    pub(crate) fn flag(&mut self, field: &str, value: &Value) -> Option<bool> {
        let flag = value.as_bool();
        if flag.is_none() {
            self.wrong_type(field, "a boolean");
        }
        flag
    }

    pub(crate) fn number(&mut self, field: &str, value: &Value) -> Option<f64> {
        let number = value.as_f64().filter(|n| n.is_finite());
        if number.is_none() {
            self.wrong_type(field, "a number");
        }
        number
    }

    fn missing(&mut self, field: &str) {
        self.push(
            field,
            ViolationCode::MissingField,
            format!("{field} is required"),
        );
    }

    fn required<T>(
        &mut self,
        object: &Map<String, Value>,
        field: &str,
        read: impl FnOnce(&mut Self, &str, &Value) -> Option<T>,
    ) -> Option<T> {
        match object.get(field) {
            Some(value) => read(self, field, value),
            None => {
                self.missing(field);
                None
            }
        }
    }
}

/// Fields of the record schema other than cache fields.
pub(crate) const RECORD_FIELDS: [&str; 7] = [
    "id",
    "category",
    "title",
    "author",
    "description",
    "published",
    "rating",
];

/// Validate a complete ebook document and convert it into the domain type.
///
/// Accepts `description_<lang>` cache fields when the code is valid and the
/// value is a string; every other extra key is rejected.
///
/// # Examples
/// ```
/// use ebooks::domain::validate_new_ebook;
/// use serde_json::json;
///
/// let err = validate_new_ebook(&json!({"id": 1})).expect_err("incomplete");
/// assert_eq!(err.details().expect("details")["violations"][0]["field"], "category");
/// ```
pub fn validate_new_ebook(body: &Value) -> Result<Ebook, Error> {
    let mut collector = ViolationCollector::default();
    let Some(object) = body.as_object() else {
        collector.push(
            "body",
            ViolationCode::InvalidBody,
            "ebook must be a JSON object",
        );
        return Err(collector.into_error("ebook failed validation"));
    };

    let id = collector.required(object, "id", ViolationCollector::id);
    let category = collector.required(object, "category", ViolationCollector::category);
    let title = collector.required(object, "title", ViolationCollector::text);
    let author = collector.required(object, "author", ViolationCollector::text);
    let description = collector.required(object, "description", ViolationCollector::text);
    let published = collector.required(object, "published", ViolationCollector::flag);
    let rating = collector.required(object, "rating", ViolationCollector::number);
    let translations = read_cache_fields(object, &mut collector);

    match (id, category, title, author, description, published, rating) {
        (
            Some(id),
            Some(category),
            Some(title),
            Some(author),
            Some(description),
            Some(published),
            Some(rating),
        ) if collector.is_empty() => Ok(Ebook {
            id,
            category,
            title,
            author,
            description,
            published,
            rating,
            translations,
        }),
        _ => Err(collector.into_error("ebook failed validation")),
    }
}

fn read_cache_fields(object: &Map<String, Value>, collector: &mut ViolationCollector) -> Translations {
    let mut translations = Translations::default();
    for (key, value) in object {
        if RECORD_FIELDS.contains(&key.as_str()) {
            continue;
        }
        if !key.starts_with(TRANSLATION_FIELD_PREFIX) {
            collector.push(
                key,
                ViolationCode::UnexpectedField,
                format!("{key} is not an ebook field"),
            );
            continue;
        }
        let Some(code) = LanguageCode::from_cache_field(key) else {
            collector.push(
                key,
                ViolationCode::InvalidLanguage,
                format!("{key} does not name a valid language code"),
            );
            continue;
        };
        if let Some(text) = collector.text(key, value) {
            translations.insert(code, text);
        }
    }
    translations
}
