//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{
    DescriptionTranslation, EbookCommand, EbookQuery, FixtureDescriptionTranslation,
    FixtureEbookCommand, FixtureEbookQuery,
};
use crate::domain::{Category, Ebook, EbookId, Translations};
use crate::inbound::http::state::HttpState;

/// Builder for [`HttpState`] defaulting every port to its fixture.
pub struct TestState {
    ebooks: Arc<dyn EbookCommand>,
    ebooks_query: Arc<dyn EbookQuery>,
    translations: Arc<dyn DescriptionTranslation>,
}

impl Default for TestState {
    fn default() -> Self {
        Self {
            ebooks: Arc::new(FixtureEbookCommand),
            ebooks_query: Arc::new(FixtureEbookQuery),
            translations: Arc::new(FixtureDescriptionTranslation),
        }
    }
}

impl TestState {
    pub fn with_command(mut self, command: impl EbookCommand + 'static) -> Self {
        self.ebooks = Arc::new(command);
        self
    }

    pub fn with_query(mut self, query: impl EbookQuery + 'static) -> Self {
        self.ebooks_query = Arc::new(query);
        self
    }

    pub fn with_translations(mut self, translations: impl DescriptionTranslation + 'static) -> Self {
        self.translations = Arc::new(translations);
        self
    }

    pub fn build(self) -> HttpState {
        HttpState::new(self.ebooks, self.ebooks_query, self.translations)
    }
}

/// App with the ebook routes mounted over `state`.
pub fn ebooks_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(super::configure)
}

/// The first sample ebook.
pub fn sample_ebook() -> Ebook {
    Ebook {
        id: EbookId::new(1),
        category: Category::new("fiction").expect("category"),
        title: "The Time Traveler's Tale".to_owned(),
        author: "John Doe".to_owned(),
        description: "A thrilling story about a man who travels through time.".to_owned(),
        published: true,
        rating: 4.5,
        translations: Translations::default(),
    }
}
