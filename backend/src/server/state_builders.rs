//! Builders turning configured adapters into HTTP state.

use std::sync::Arc;

use actix_web::web;

use ebooks::domain::ports::{EbookRepository, TranslationService};
use ebooks::domain::{EbookService, TranslationCacheService};
use ebooks::inbound::http::state::HttpState;

/// One [`EbookService`] serves both the command and query ports; the
/// translation cache shares the same repository.
pub(super) fn build_http_state(
    repository: Arc<dyn EbookRepository>,
    translator: Arc<dyn TranslationService>,
) -> web::Data<HttpState> {
    let catalogue = Arc::new(EbookService::new(repository.clone()));
    let translations = Arc::new(TranslationCacheService::new(repository, translator));
    web::Data::new(HttpState::new(
        catalogue.clone(),
        catalogue,
        translations,
    ))
}
