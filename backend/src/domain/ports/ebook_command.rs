//! Driving port for ebook writes.
//!
//! Inbound adapters validate payloads into domain values first
//! ([`crate::domain::validate_new_ebook`], [`crate::domain::PartialUpdateBuilder`])
//! and then call [`EbookCommand`] to persist them.

use async_trait::async_trait;

use crate::domain::{Ebook, EbookChanges, EbookId, Error};

/// Request to change fields of an existing ebook.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateEbookRequest {
    /// Record to update.
    pub id: EbookId,
    /// Non-empty set of field assignments.
    pub changes: EbookChanges,
}

/// Driving port for creating and updating ebooks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EbookCommand: Send + Sync {
    /// Store `ebook`, replacing any record with the same identity.
    async fn add(&self, ebook: Ebook) -> Result<Ebook, Error>;

    /// Apply a partial update and return the stored result.
    ///
    /// # Errors
    ///
    /// - `not_found` when no record has the requested identity.
    /// - `service_unavailable` or `internal_error` when the store fails.
    async fn update(&self, request: UpdateEbookRequest) -> Result<Ebook, Error>;
}

/// Fixture implementation that echoes requests without storing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEbookCommand;

#[async_trait]
impl EbookCommand for FixtureEbookCommand {
    async fn add(&self, ebook: Ebook) -> Result<Ebook, Error> {
        Ok(ebook)
    }

    async fn update(&self, request: UpdateEbookRequest) -> Result<Ebook, Error> {
        Err(Error::not_found(format!("ebook {} not found", request.id)))
    }
}
