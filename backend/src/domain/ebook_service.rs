//! Ebook catalogue service implementing the read and write driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    EbookCommand, EbookQuery, EbookRepository, EbookRepositoryError, UpdateEbookRequest,
};
use crate::domain::{Category, Ebook, EbookId, Error, MinimumRating};

/// Map store failures onto the domain error taxonomy.
pub(crate) fn map_repository_error(error: EbookRepositoryError) -> Error {
    match error {
        EbookRepositoryError::Connection { message } => {
            warn!(%message, "ebook repository unavailable");
            Error::service_unavailable(format!("ebook repository unavailable: {message}"))
        }
        EbookRepositoryError::Query { message } => {
            warn!(%message, "ebook repository query failed");
            Error::internal(format!("ebook repository error: {message}"))
        }
        EbookRepositoryError::NotFound { id } => Error::not_found(format!("ebook {id} not found")),
    }
}

/// Catalogue service over an [`EbookRepository`].
#[derive(Clone)]
pub struct EbookService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> EbookService<R> {
    /// Create a service over `repo`.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> EbookCommand for EbookService<R>
where
    R: EbookRepository + ?Sized,
{
    async fn add(&self, ebook: Ebook) -> Result<Ebook, Error> {
        self.repo.put(&ebook).await.map_err(map_repository_error)?;
        debug!(id = %ebook.id, "ebook stored");
        Ok(ebook)
    }

    async fn update(&self, request: UpdateEbookRequest) -> Result<Ebook, Error> {
        let UpdateEbookRequest { id, changes } = request;
        if changes.is_empty() {
            return Err(Error::invalid_request("no updatable fields"));
        }
        let updated = self
            .repo
            .update_fields(id, &changes)
            .await
            .map_err(map_repository_error)?;
        debug!(%id, fields = ?changes.field_names(), "ebook updated");
        Ok(updated)
    }
}

#[async_trait]
impl<R> EbookQuery for EbookService<R>
where
    R: EbookRepository + ?Sized,
{
    async fn list(&self) -> Result<Vec<Ebook>, Error> {
        self.repo.scan_all().await.map_err(map_repository_error)
    }

    async fn get(&self, id: EbookId) -> Result<Ebook, Error> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("ebook {id} not found")))
    }

    async fn list_by_category(
        &self,
        category: &Category,
        minimum: MinimumRating,
    ) -> Result<Vec<Ebook>, Error> {
        let ebooks = self
            .repo
            .query_by_category(category)
            .await
            .map_err(map_repository_error)?;
        Ok(minimum.apply(ebooks))
    }
}

#[cfg(test)]
#[path = "ebook_service_tests.rs"]
mod tests;
