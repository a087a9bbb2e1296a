//! `EbookRepository` backed by a mutex-guarded ordered map.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{EbookRepository, EbookRepositoryError};
use crate::domain::{Category, Ebook, EbookChanges, EbookId};

/// Volatile ebook table.
///
/// Every operation takes the lock once, so partial updates are atomic with
/// respect to other calls on the same instance.
#[derive(Debug, Default)]
pub struct InMemoryEbookRepository {
    records: Mutex<BTreeMap<EbookId, Ebook>>,
}

impl InMemoryEbookRepository {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table pre-populated with `ebooks`.
    pub fn with_records(ebooks: impl IntoIterator<Item = Ebook>) -> Self {
        let records = ebooks.into_iter().map(|ebook| (ebook.id, ebook)).collect();
        Self {
            records: Mutex::new(records),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<EbookId, Ebook>>, EbookRepositoryError> {
        self.records
            .lock()
            .map_err(|_| EbookRepositoryError::query("in-memory ebook table lock poisoned"))
    }
}

#[async_trait]
impl EbookRepository for InMemoryEbookRepository {
    async fn get_by_id(&self, id: EbookId) -> Result<Option<Ebook>, EbookRepositoryError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn put(&self, ebook: &Ebook) -> Result<(), EbookRepositoryError> {
        self.lock()?.insert(ebook.id, ebook.clone());
        Ok(())
    }

    async fn update_fields(
        &self,
        id: EbookId,
        changes: &EbookChanges,
    ) -> Result<Ebook, EbookRepositoryError> {
        let mut records = self.lock()?;
        let record = records
            .get_mut(&id)
            .ok_or_else(|| EbookRepositoryError::not_found(id.get()))?;
        record.apply(changes);
        Ok(record.clone())
    }

    async fn scan_all(&self) -> Result<Vec<Ebook>, EbookRepositoryError> {
        Ok(self.lock()?.values().cloned().collect())
    }

    async fn query_by_category(
        &self,
        category: &Category,
    ) -> Result<Vec<Ebook>, EbookRepositoryError> {
        Ok(self
            .lock()?
            .values()
            .filter(|ebook| &ebook.category == category)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LanguageCode, Translations};
    use rstest::{fixture, rstest};

    fn ebook(id: i64, category: &str) -> Ebook {
        Ebook {
            id: EbookId::new(id),
            category: Category::new(category).expect("category"),
            title: format!("Book {id}"),
            author: "John Doe".to_owned(),
            description: "A thrilling story.".to_owned(),
            published: true,
            rating: 4.5,
            translations: Translations::default(),
        }
    }

    #[fixture]
    fn repo() -> InMemoryEbookRepository {
        InMemoryEbookRepository::with_records([
            ebook(2, "non-fiction"),
            ebook(1, "fiction"),
            ebook(3, "fiction"),
        ])
    }

    #[rstest]
    #[tokio::test]
    async fn scan_is_ordered_by_id(repo: InMemoryEbookRepository) {
        let ids: Vec<i64> = repo
            .scan_all()
            .await
            .expect("scan")
            .iter()
            .map(|b| b.id.get())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[rstest]
    #[tokio::test]
    async fn query_by_category_uses_exact_match(repo: InMemoryEbookRepository) {
        let fiction = Category::new("fiction").expect("category");
        let ids: Vec<i64> = repo
            .query_by_category(&fiction)
            .await
            .expect("query")
            .iter()
            .map(|b| b.id.get())
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[rstest]
    #[tokio::test]
    async fn put_overwrites_existing_identity(repo: InMemoryEbookRepository) {
        let mut replacement = ebook(1, "history");
        replacement.title = "Replaced".to_owned();

        repo.put(&replacement).await.expect("put");

        let stored = repo
            .get_by_id(EbookId::new(1))
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(stored, replacement);
    }

    #[rstest]
    #[tokio::test]
    async fn update_fields_merges_changes(repo: InMemoryEbookRepository) {
        let fr = LanguageCode::new("fr").expect("code");
        let changes = EbookChanges::translation(fr.clone(), "Une histoire");

        let updated = repo
            .update_fields(EbookId::new(3), &changes)
            .await
            .expect("update");

        assert_eq!(updated.translations.get(&fr), Some("Une histoire"));
        assert_eq!(updated.title, "Book 3");
        let stored = repo
            .get_by_id(EbookId::new(3))
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(stored, updated);
    }

    #[rstest]
    #[tokio::test]
    async fn update_fields_never_creates(repo: InMemoryEbookRepository) {
        let changes = EbookChanges {
            rating: Some(1.0),
            ..EbookChanges::default()
        };

        let err = repo
            .update_fields(EbookId::new(99), &changes)
            .await
            .expect_err("missing record");

        assert_eq!(err, EbookRepositoryError::not_found(99_i64));
        assert!(repo.get_by_id(EbookId::new(99)).await.expect("lookup").is_none());
    }
}
