//! HTTP inbound adapter exposing REST endpoints.

pub mod caller;
pub mod ebooks;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the ebook endpoints and their extractor error handlers.
///
/// The category route is registered ahead of the `/ebooks/{id}` routes so
/// that `/ebooks/category/{category}` is never read as an identifier.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(ebooks::list_ebooks)
        .service(ebooks::add_ebook)
        .service(ebooks::list_ebooks_by_category)
        .service(ebooks::get_ebook)
        .service(ebooks::update_ebook)
        .service(ebooks::translate_description);
}
