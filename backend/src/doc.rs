//! OpenAPI documentation for the ebook API.
//!
//! [`ApiDoc`] collects the ebook and health endpoints plus the schema
//! wrappers from `inbound::http::schemas`, which keep domain types free of
//! utoipa derives. Swagger UI serves it in debug builds.

use crate::inbound::http::ebooks::{
    EbookAddedResponse, EbookListResponse, EbookResponse, EbookUpdatedResponse,
    TranslationResponse,
};
use crate::inbound::http::health::{Lifecycle, ProbeStatus};
use crate::inbound::http::schemas::{EbookSchema, ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ebooks API",
        description = "CRUD access to ebook records with cached machine translation of descriptions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::ebooks::list_ebooks,
        crate::inbound::http::ebooks::add_ebook,
        crate::inbound::http::ebooks::list_ebooks_by_category,
        crate::inbound::http::ebooks::get_ebook,
        crate::inbound::http::ebooks::update_ebook,
        crate::inbound::http::ebooks::translate_description,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        EbookSchema,
        ErrorSchema,
        ErrorCodeSchema,
        EbookResponse,
        EbookListResponse,
        EbookAddedResponse,
        EbookUpdatedResponse,
        TranslationResponse,
        ProbeStatus,
        Lifecycle,
    )),
    tags(
        (name = "ebooks", description = "Ebook records and description translations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_has_field(schema: &RefOr<Schema>, field: &str) -> bool {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.contains_key(field),
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/ebooks")]
    #[case("/ebooks/category/{category}")]
    #[case("/ebooks/{id}")]
    #[case("/ebooks/{id}/translation")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn ebook_schema_carries_record_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let ebook = schemas.get("crate.domain.Ebook").expect("Ebook schema");

        for field in ["id", "category", "title", "author", "description", "published", "rating"] {
            assert!(object_has_field(ebook, field), "missing {field}");
        }
    }

    #[test]
    fn error_schema_carries_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get("crate.domain.Error").expect("Error schema");

        assert!(object_has_field(error, "code"));
        assert!(object_has_field(error, "message"));
    }
}
