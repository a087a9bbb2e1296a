//! Ebook records and the field-level changes applied to them.
//!
//! The record's wire and persisted JSON shape is flat:
//!
//! ```json
//! {"id": 1, "category": "fiction", "title": "…", "author": "…",
//!  "description": "…", "published": true, "rating": 4.5,
//!  "description_fr": "…"}
//! ```
//!
//! Cached translations live in [`Translations`] inside the domain type and
//! are flattened back to `description_<lang>` keys by serde.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::LanguageCode;

/// Identity key of an ebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EbookId(i64);

impl EbookId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EbookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EbookId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Validation failure for [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryValidationError {
    /// The category was blank.
    #[error("category must not be empty")]
    Empty,
}

/// Secondary, independently indexed grouping of ebooks.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// Validate and wrap a category name.
    pub fn new(raw: impl Into<String>) -> Result<Self, CategoryValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(CategoryValidationError::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the category name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Category {
    type Error = CategoryValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0
    }
}

/// Cached description translations keyed by language.
///
/// Serialises as `description_<lang>` entries so it can be flattened into
/// the record object. On decode, keys that are not valid cache fields are
/// skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations(BTreeMap<LanguageCode, String>);

impl Translations {
    /// Cached text for `language`, ignoring empty entries.
    pub fn get(&self, language: &LanguageCode) -> Option<&str> {
        self.0
            .get(language)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Store `text` for `language`, replacing any previous value.
    pub fn insert(&mut self, language: LanguageCode, text: impl Into<String>) {
        self.0.insert(language, text.into());
    }

    /// Number of cached languages.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no translation is cached.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over cached entries in language order.
    pub fn iter(&self) -> impl Iterator<Item = (&LanguageCode, &str)> {
        self.0.iter().map(|(code, text)| (code, text.as_str()))
    }
}

impl Serialize for Translations {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (code, text) in &self.0 {
            map.serialize_entry(&code.cache_field(), text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Translations {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TranslationsVisitor;

        impl<'de> Visitor<'de> for TranslationsVisitor {
            type Value = Translations;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of description_<lang> fields")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut translations = Translations::default();
                while let Some(key) = access.next_key::<String>()? {
                    match LanguageCode::from_cache_field(&key) {
                        Some(code) => {
                            let text: String = access.next_value()?;
                            translations.insert(code, text);
                        }
                        None => {
                            access.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(translations)
            }
        }

        deserializer.deserialize_map(TranslationsVisitor)
    }
}

/// One ebook record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ebook {
    /// Immutable identity.
    pub id: EbookId,
    /// Indexed grouping; mutable.
    pub category: Category,
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
    /// English description; the source text for translations.
    pub description: String,
    /// Publication flag.
    pub published: bool,
    /// Rating, conventionally within `[0.0, 5.0]` but not enforced.
    pub rating: f64,
    /// Cached translations of `description`.
    #[serde(flatten)]
    pub translations: Translations,
}

impl Ebook {
    /// Apply `changes` in place. Identity is never touched.
    pub fn apply(&mut self, changes: &EbookChanges) {
        if let Some(category) = &changes.category {
            self.category = category.clone();
        }
        if let Some(title) = &changes.title {
            self.title.clone_from(title);
        }
        if let Some(author) = &changes.author {
            self.author.clone_from(author);
        }
        if let Some(description) = &changes.description {
            self.description.clone_from(description);
        }
        if let Some(published) = changes.published {
            self.published = published;
        }
        if let Some(rating) = changes.rating {
            self.rating = rating;
        }
        for (code, text) in changes.translations.iter() {
            self.translations.insert(code.clone(), text);
        }
    }
}

/// Sparse set of non-identity field assignments.
///
/// Produced by [`super::PartialUpdateBuilder`] for caller updates and by the
/// translation cache for single-field cache writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EbookChanges {
    /// New category.
    pub category: Option<Category>,
    /// New title.
    pub title: Option<String>,
    /// New author.
    pub author: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New publication flag.
    pub published: Option<bool>,
    /// New rating.
    pub rating: Option<f64>,
    /// Translation cache entries to set.
    pub translations: Translations,
}

impl EbookChanges {
    /// A change that only sets the cached translation for `language`.
    pub fn translation(language: LanguageCode, text: impl Into<String>) -> Self {
        let mut translations = Translations::default();
        translations.insert(language, text);
        Self {
            translations,
            ..Self::default()
        }
    }

    /// Whether no field would be written.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.title.is_none()
            && self.author.is_none()
            && self.description.is_none()
            && self.published.is_none()
            && self.rating.is_none()
            && self.translations.is_empty()
    }

    /// Names of the record fields this change writes, in wire form.
    pub fn field_names(&self) -> Vec<String> {
        self.to_document_patch().into_iter().map(|(key, _)| key).collect()
    }

    /// JSON object holding only the assigned fields, keyed as on the wire.
    ///
    /// Document stores merge this object into the stored record.
    pub fn to_document_patch(&self) -> Map<String, Value> {
        let mut patch = Map::new();
        if let Some(category) = &self.category {
            patch.insert("category".to_owned(), Value::from(category.as_str()));
        }
        if let Some(title) = &self.title {
            patch.insert("title".to_owned(), Value::from(title.as_str()));
        }
        if let Some(author) = &self.author {
            patch.insert("author".to_owned(), Value::from(author.as_str()));
        }
        if let Some(description) = &self.description {
            patch.insert("description".to_owned(), Value::from(description.as_str()));
        }
        if let Some(published) = self.published {
            patch.insert("published".to_owned(), Value::Bool(published));
        }
        if let Some(rating) = self.rating {
            patch.insert("rating".to_owned(), Value::from(rating));
        }
        for (code, text) in self.translations.iter() {
            patch.insert(code.cache_field(), Value::from(text));
        }
        patch
    }
}
