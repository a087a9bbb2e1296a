//! Conversion of a sparse update body into typed [`EbookChanges`].

use serde_json::{Map, Value, json};

use super::ebook_validation::{ViolationCode, ViolationCollector};
use super::{EbookChanges, EbookId, Error, TRANSLATION_FIELD_PREFIX};

/// Builds field-level changes for the record addressed by a request path.
///
/// The body must repeat the identity (`id`) and it must match the path.
/// Identity fields are never written; everything else present in the body
/// is validated and becomes part of the change set.
///
/// # Examples
/// ```
/// use ebooks::domain::{EbookId, PartialUpdateBuilder};
/// use serde_json::json;
///
/// let builder = PartialUpdateBuilder::new(EbookId::new(1));
/// let changes = builder.build(&json!({"id": 1, "rating": 4.9})).expect("valid update");
/// assert_eq!(changes.rating, Some(4.9));
///
/// let err = builder.build(&json!({"id": 1})).expect_err("nothing to update");
/// assert_eq!(err.message(), "no updatable fields");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialUpdateBuilder {
    expected: EbookId,
}

impl PartialUpdateBuilder {
    /// Builder for the record identified by `expected`.
    pub fn new(expected: EbookId) -> Self {
        Self { expected }
    }

    /// Identity the body must match.
    pub fn expected(&self) -> EbookId {
        self.expected
    }

    /// Validate `body` and produce the change set.
    pub fn build(&self, body: &Value) -> Result<EbookChanges, Error> {
        let object = body
            .as_object()
            .ok_or_else(|| Error::invalid_request("update body must be a JSON object"))?;
        self.check_identity(object)?;

        let mut collector = ViolationCollector::default();
        let mut changes = EbookChanges::default();
        for (key, value) in object {
            match key.as_str() {
                "id" => {}
                "category" => changes.category = collector.category(key, value),
                "title" => changes.title = collector.text(key, value),
                "author" => changes.author = collector.text(key, value),
                "description" => changes.description = collector.text(key, value),
                "published" => changes.published = collector.flag(key, value),
                "rating" => changes.rating = collector.number(key, value),
                _ if key.starts_with(TRANSLATION_FIELD_PREFIX) => collector.push(
                    key,
                    ViolationCode::ReadOnlyField,
                    format!("{key} is managed by the translation cache"),
                ),
                _ => collector.push(
                    key,
                    ViolationCode::UnexpectedField,
                    format!("{key} is not an ebook field"),
                ),
            }
        }

        if !collector.is_empty() {
            return Err(collector.into_error("update body failed validation"));
        }
        if changes.is_empty() {
            return Err(Error::invalid_request("no updatable fields"));
        }
        Ok(changes)
    }

    fn check_identity(&self, object: &Map<String, Value>) -> Result<(), Error> {
        let received = object.get("id").cloned().unwrap_or(Value::Null);
        if body_id(&received) == Some(self.expected) {
            return Ok(());
        }
        Err(
            Error::invalid_request("body identity does not match the request path").with_details(
                json!({
                    "expected": { "id": self.expected.get() },
                    "received": { "id": received },
                }),
            ),
        )
    }
}

/// Body identities may arrive as JSON integers, whole floats, or numeric
/// strings.
fn body_id(value: &Value) -> Option<EbookId> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(whole_f64_to_i64))
            .map(EbookId::new),
        Value::String(text) => text.trim().parse::<i64>().ok().map(EbookId::new),
        _ => None,
    }
}

/// `Some` only for finite values with no fractional part inside `i64` range.
fn whole_f64_to_i64(value: f64) -> Option<i64> {
    // 2^63 is exactly representable; `i64::MAX as f64` rounds up to it.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let in_range = value >= -LIMIT && value < LIMIT;
    (value.is_finite() && value.fract() == 0.0 && in_range).then(|| value as i64)
}
