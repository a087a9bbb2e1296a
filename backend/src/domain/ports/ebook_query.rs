//! Driving port for ebook reads.

use async_trait::async_trait;

use crate::domain::{Category, Ebook, EbookId, Error, MinimumRating};

/// Driving port for listing and fetching ebooks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EbookQuery: Send + Sync {
    /// Every ebook, ordered by identity.
    async fn list(&self) -> Result<Vec<Ebook>, Error>;

    /// One ebook; `not_found` when absent.
    async fn get(&self, id: EbookId) -> Result<Ebook, Error>;

    /// Ebooks in `category` whose rating meets `minimum`.
    async fn list_by_category(
        &self,
        category: &Category,
        minimum: MinimumRating,
    ) -> Result<Vec<Ebook>, Error>;
}

/// Fixture implementation backed by an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEbookQuery;

#[async_trait]
impl EbookQuery for FixtureEbookQuery {
    async fn list(&self) -> Result<Vec<Ebook>, Error> {
        Ok(Vec::new())
    }

    async fn get(&self, id: EbookId) -> Result<Ebook, Error> {
        Err(Error::not_found(format!("ebook {id} not found")))
    }

    async fn list_by_category(
        &self,
        _category: &Category,
        _minimum: MinimumRating,
    ) -> Result<Vec<Ebook>, Error> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn fixture_query_has_no_records() {
        let query = FixtureEbookQuery;

        assert!(query.list().await.expect("list").is_empty());
        let err = query.get(EbookId::new(1)).await.expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
