//! Port for ebook record storage.
//!
//! The [`EbookRepository`] trait is the document-table contract the domain
//! relies on: keyed reads, unconditional upserts, atomic partial updates,
//! full scans, and category lookups through a secondary index.

use async_trait::async_trait;

use crate::domain::{Category, Ebook, EbookChanges, EbookId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ebook repository adapters.
    pub enum EbookRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "ebook repository connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } =>
            "ebook repository query failed: {message}",
        /// A partial update targeted a record that does not exist.
        NotFound { id: i64 } =>
            "ebook {id} not found",
    }
}

/// Port for ebook persistence.
///
/// # Update semantics
///
/// [`EbookRepository::update_fields`] writes every assignment in one atomic
/// operation and returns the record as stored afterwards. It never creates a
/// record; a missing key yields [`EbookRepositoryError::NotFound`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EbookRepository: Send + Sync {
    /// Fetch one record by identity.
    async fn get_by_id(&self, id: EbookId) -> Result<Option<Ebook>, EbookRepositoryError>;

    /// Insert or fully replace a record.
    async fn put(&self, ebook: &Ebook) -> Result<(), EbookRepositoryError>;

    /// Apply `changes` to the record identified by `id`.
    async fn update_fields(
        &self,
        id: EbookId,
        changes: &EbookChanges,
    ) -> Result<Ebook, EbookRepositoryError>;

    /// Every stored record, ordered by identity.
    async fn scan_all(&self) -> Result<Vec<Ebook>, EbookRepositoryError>;

    /// Records whose category equals `category`, ordered by identity.
    async fn query_by_category(
        &self,
        category: &Category,
    ) -> Result<Vec<Ebook>, EbookRepositoryError>;
}

/// Fixture implementation for tests that do not exercise storage.
///
/// Reads see an empty table, writes are discarded, and updates report the
/// record as missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEbookRepository;

#[async_trait]
impl EbookRepository for FixtureEbookRepository {
    async fn get_by_id(&self, _id: EbookId) -> Result<Option<Ebook>, EbookRepositoryError> {
        Ok(None)
    }

    async fn put(&self, _ebook: &Ebook) -> Result<(), EbookRepositoryError> {
        Ok(())
    }

    async fn update_fields(
        &self,
        id: EbookId,
        _changes: &EbookChanges,
    ) -> Result<Ebook, EbookRepositoryError> {
        Err(EbookRepositoryError::not_found(id.get()))
    }

    async fn scan_all(&self) -> Result<Vec<Ebook>, EbookRepositoryError> {
        Ok(Vec::new())
    }

    async fn query_by_category(
        &self,
        _category: &Category,
    ) -> Result<Vec<Ebook>, EbookRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_repository_reads_nothing() {
        let repo = FixtureEbookRepository;

        assert!(repo.get_by_id(EbookId::new(1)).await.expect("lookup").is_none());
        assert!(repo.scan_all().await.expect("scan").is_empty());
        let fiction = Category::new("fiction").expect("category");
        assert!(repo.query_by_category(&fiction).await.expect("query").is_empty());
    }

    #[tokio::test]
    async fn fixture_repository_never_creates_on_update() {
        let repo = FixtureEbookRepository;
        let changes = EbookChanges {
            rating: Some(1.0),
            ..EbookChanges::default()
        };

        let err = repo
            .update_fields(EbookId::new(9), &changes)
            .await
            .expect_err("update of missing record");

        assert_eq!(err, EbookRepositoryError::not_found(9_i64));
    }

    #[rstest]
    fn not_found_message_names_the_id() {
        assert_eq!(EbookRepositoryError::not_found(7_i64).to_string(), "ebook 7 not found");
    }
}
