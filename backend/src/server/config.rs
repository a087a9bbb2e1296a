//! Server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use ebooks::domain::ports::{EbookRepository, TranslationService};

/// Everything [`super::create_server`] needs: where to listen and which
/// adapters back the domain services.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) repository: Arc<dyn EbookRepository>,
    pub(crate) translator: Arc<dyn TranslationService>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        repository: Arc<dyn EbookRepository>,
        translator: Arc<dyn TranslationService>,
    ) -> Self {
        Self {
            bind_addr,
            repository,
            translator,
        }
    }
}
