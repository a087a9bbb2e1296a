//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod description_translation;
mod ebook_command;
mod ebook_query;
mod ebook_repository;
mod translation_service;

#[cfg(test)]
pub use description_translation::MockDescriptionTranslation;
pub use description_translation::{
    DescriptionTranslation, FixtureDescriptionTranslation, TranslateDescriptionRequest,
    TranslateDescriptionResponse,
};
#[cfg(test)]
pub use ebook_command::MockEbookCommand;
pub use ebook_command::{EbookCommand, FixtureEbookCommand, UpdateEbookRequest};
#[cfg(test)]
pub use ebook_query::MockEbookQuery;
pub use ebook_query::{EbookQuery, FixtureEbookQuery};
#[cfg(test)]
pub use ebook_repository::MockEbookRepository;
pub use ebook_repository::{EbookRepository, EbookRepositoryError, FixtureEbookRepository};
#[cfg(test)]
pub use translation_service::MockTranslationService;
pub use translation_service::{
    FixtureTranslationService, TranslationService, TranslationServiceError,
};
