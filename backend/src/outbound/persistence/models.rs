//! Diesel row types for the `ebooks` table and their mapping to domain
//! records.

use diesel::prelude::*;
use serde_json::{Map, Value};

use crate::domain::Ebook;

use super::schema::ebooks;

/// Row as read from the table.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = ebooks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct EbookRow {
    pub id: i64,
    pub category: String,
    pub document: Value,
}

/// Row for inserts and full replacements.
#[derive(Debug, Insertable)]
#[diesel(table_name = ebooks)]
pub(super) struct NewEbookRow<'a> {
    pub id: i64,
    pub category: &'a str,
    pub document: Value,
}

/// Failure to turn stored JSON back into an [`Ebook`].
#[derive(Debug, thiserror::Error)]
pub(super) enum RowDecodeError {
    #[error("stored document for ebook {id} is not a JSON object")]
    NotAnObject { id: i64 },
    #[error("stored document for ebook {id} is malformed: {source}")]
    Malformed {
        id: i64,
        #[source]
        source: serde_json::Error,
    },
    #[error("ebook {id} could not be encoded: {source}")]
    Encode {
        id: i64,
        #[source]
        source: serde_json::Error,
    },
}

impl<'a> NewEbookRow<'a> {
    pub fn from_domain(ebook: &'a Ebook) -> Result<Self, RowDecodeError> {
        let document = serde_json::to_value(ebook).map_err(|source| RowDecodeError::Encode {
            id: ebook.id.get(),
            source,
        })?;
        Ok(Self {
            id: ebook.id.get(),
            category: ebook.category.as_str(),
            document,
        })
    }
}

impl TryFrom<EbookRow> for Ebook {
    type Error = RowDecodeError;

    /// The key columns win over whatever the document says about them.
    fn try_from(row: EbookRow) -> Result<Self, Self::Error> {
        let EbookRow {
            id,
            category,
            document,
        } = row;
        let mut fields: Map<String, Value> = match document {
            Value::Object(fields) => fields,
            _ => return Err(RowDecodeError::NotAnObject { id }),
        };
        fields.insert("id".to_owned(), Value::from(id));
        fields.insert("category".to_owned(), Value::from(category));
        serde_json::from_value(Value::Object(fields))
            .map_err(|source| RowDecodeError::Malformed { id, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EbookId, LanguageCode};
    use rstest::rstest;
    use serde_json::json;

    fn stored(document: Value) -> EbookRow {
        EbookRow {
            id: 2,
            category: "non-fiction".to_owned(),
            document,
        }
    }

    #[rstest]
    fn row_with_cached_translation_decodes() {
        let row = stored(json!({
            "title": "Mastering AWS",
            "author": "Jane Smith",
            "description": "Comprehensive guide to using AWS services.",
            "published": true,
            "rating": 4.8,
            "description_fr": "Guide complet"
        }));

        let ebook = Ebook::try_from(row).expect("decodes");
        assert_eq!(ebook.id, EbookId::new(2));
        assert_eq!(ebook.category.as_str(), "non-fiction");
        let fr = LanguageCode::new("fr").expect("code");
        assert_eq!(ebook.translations.get(&fr), Some("Guide complet"));
    }

    #[rstest]
    fn key_columns_override_document_members() {
        let row = stored(json!({
            "id": 99,
            "category": "stale",
            "title": "t",
            "author": "a",
            "description": "d",
            "published": false,
            "rating": 1.0
        }));

        let ebook = Ebook::try_from(row).expect("decodes");
        assert_eq!(ebook.id, EbookId::new(2));
        assert_eq!(ebook.category.as_str(), "non-fiction");
    }

    #[rstest]
    #[case(json!(["not", "an", "object"]))]
    #[case(json!({"title": "missing the rest"}))]
    fn broken_documents_are_reported(#[case] document: Value) {
        assert!(Ebook::try_from(stored(document)).is_err());
    }
}
