//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DescriptionTranslation, EbookCommand, EbookQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub ebooks: Arc<dyn EbookCommand>,
    pub ebooks_query: Arc<dyn EbookQuery>,
    pub translations: Arc<dyn DescriptionTranslation>,
}

impl HttpState {
    /// Construct state from the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use ebooks::domain::ports::{
    ///     FixtureDescriptionTranslation, FixtureEbookCommand, FixtureEbookQuery,
    /// };
    /// use ebooks::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureEbookCommand),
    ///     Arc::new(FixtureEbookQuery),
    ///     Arc::new(FixtureDescriptionTranslation),
    /// );
    /// let _query = state.ebooks_query.clone();
    /// ```
    pub fn new(
        ebooks: Arc<dyn EbookCommand>,
        ebooks_query: Arc<dyn EbookQuery>,
        translations: Arc<dyn DescriptionTranslation>,
    ) -> Self {
        Self {
            ebooks,
            ebooks_query,
            translations,
        }
    }
}
