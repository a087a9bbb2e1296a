//! Ebook catalogue HTTP handlers.
//!
//! ```text
//! GET  /ebooks
//! POST /ebooks
//! GET  /ebooks/category/{category}?rating=<n>
//! GET  /ebooks/{id}
//! PUT  /ebooks/{id}
//! GET  /ebooks/{id}/translation?language=<code>
//! ```
//!
//! Register `list_ebooks_by_category` before the `/ebooks/{id}` routes.

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{TranslateDescriptionRequest, UpdateEbookRequest};
use crate::domain::{Ebook, MinimumRating, PartialUpdateBuilder, validate_new_ebook};
use crate::inbound::http::ApiResult;
use crate::inbound::http::caller::CallerIdentity;
use crate::inbound::http::schemas::{EbookSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_category, parse_ebook_id, parse_language,
};

const ID: FieldName = FieldName::new("id");
const CATEGORY: FieldName = FieldName::new("category");
const LANGUAGE: FieldName = FieldName::new("language");

/// Single-record envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct EbookResponse {
    #[schema(value_type = EbookSchema)]
    pub data: Ebook,
}

/// Record list envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct EbookListResponse {
    #[schema(value_type = Vec<EbookSchema>)]
    pub data: Vec<Ebook>,
}

/// Body returned by `POST /ebooks`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EbookAddedResponse {
    #[schema(example = "Ebook added")]
    pub message: String,
    #[schema(value_type = EbookSchema)]
    pub data: Ebook,
}

/// Body returned by `PUT /ebooks/{id}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EbookUpdatedResponse {
    #[schema(example = "Ebook updated successfully")]
    pub message: String,
    #[schema(value_type = EbookSchema)]
    pub updated_item: Ebook,
}

/// Body returned by the translation endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct TranslationResponse {
    #[schema(example = "穿越时空的男人的惊险故事。")]
    pub translated: String,
}

/// Query for category listings.
///
/// `rating` stays a string so unparseable values disable the filter rather
/// than failing extraction.
#[derive(Debug, Deserialize, IntoParams)]
pub struct CategoryQuery {
    /// Minimum rating; ignored unless it parses as a finite number.
    pub rating: Option<String>,
}

/// Query for the translation endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct TranslationQuery {
    /// Target language code such as `fr` or `zh-TW`; defaults to `zh`.
    pub language: Option<String>,
}

/// List every ebook.
#[utoipa::path(
    get,
    path = "/ebooks",
    responses(
        (status = 200, description = "All ebooks", body = EbookListResponse),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ebooks"],
    operation_id = "listEbooks"
)]
#[get("/ebooks")]
pub async fn list_ebooks(
    state: web::Data<HttpState>,
    caller: CallerIdentity,
) -> ApiResult<web::Json<EbookListResponse>> {
    debug!(caller = ?caller.id(), "listing ebooks");
    let data = state.ebooks_query.list().await?;
    Ok(web::Json(EbookListResponse { data }))
}

/// Add or replace an ebook.
#[utoipa::path(
    post,
    path = "/ebooks",
    request_body = EbookSchema,
    responses(
        (status = 201, description = "Ebook stored", body = EbookAddedResponse),
        (status = 400, description = "Schema violations", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["ebooks"],
    operation_id = "addEbook"
)]
#[post("/ebooks")]
pub async fn add_ebook(
    state: web::Data<HttpState>,
    caller: CallerIdentity,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let ebook = validate_new_ebook(&payload)?;
    debug!(caller = ?caller.id(), id = %ebook.id, "adding ebook");
    let data = state.ebooks.add(ebook).await?;
    Ok(HttpResponse::Created().json(EbookAddedResponse {
        message: "Ebook added".to_owned(),
        data,
    }))
}

/// List ebooks in a category, optionally filtered by minimum rating.
#[utoipa::path(
    get,
    path = "/ebooks/category/{category}",
    params(
        ("category" = String, Path, description = "Category to list"),
        CategoryQuery
    ),
    responses(
        (status = 200, description = "Matching ebooks", body = EbookListResponse),
        (status = 400, description = "Invalid category", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["ebooks"],
    operation_id = "listEbooksByCategory"
)]
#[get("/ebooks/category/{category}")]
pub async fn list_ebooks_by_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<CategoryQuery>,
) -> ApiResult<web::Json<EbookListResponse>> {
    let category = parse_category(path.into_inner(), CATEGORY)?;
    let minimum = MinimumRating::parse(query.rating.as_deref());
    let data = state
        .ebooks_query
        .list_by_category(&category, minimum)
        .await?;
    Ok(web::Json(EbookListResponse { data }))
}

/// Fetch one ebook.
#[utoipa::path(
    get,
    path = "/ebooks/{id}",
    params(("id" = i64, Path, description = "Ebook identifier")),
    responses(
        (status = 200, description = "The ebook", body = EbookResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "No such ebook", body = ErrorSchema)
    ),
    tags = ["ebooks"],
    operation_id = "getEbook"
)]
#[get("/ebooks/{id}")]
pub async fn get_ebook(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EbookResponse>> {
    let id = parse_ebook_id(&path, ID)?;
    let data = state.ebooks_query.get(id).await?;
    Ok(web::Json(EbookResponse { data }))
}

/// Update selected fields of an ebook.
///
/// The body must repeat the path `id`; every other key is written.
#[utoipa::path(
    put,
    path = "/ebooks/{id}",
    params(("id" = i64, Path, description = "Ebook identifier")),
    request_body(content = serde_json::Value, description = "`id` plus the fields to change"),
    responses(
        (status = 200, description = "Updated ebook", body = EbookUpdatedResponse),
        (status = 400, description = "Invalid update", body = ErrorSchema),
        (status = 404, description = "No such ebook", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["ebooks"],
    operation_id = "updateEbook"
)]
#[put("/ebooks/{id}")]
pub async fn update_ebook(
    state: web::Data<HttpState>,
    caller: CallerIdentity,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<EbookUpdatedResponse>> {
    let id = parse_ebook_id(&path, ID)?;
    let changes = PartialUpdateBuilder::new(id).build(&payload)?;
    debug!(caller = ?caller.id(), %id, "updating ebook");
    let updated_item = state
        .ebooks
        .update(UpdateEbookRequest { id, changes })
        .await?;
    Ok(web::Json(EbookUpdatedResponse {
        message: "Ebook updated successfully".to_owned(),
        updated_item,
    }))
}

/// Translate an ebook's description, caching the result per language.
#[utoipa::path(
    get,
    path = "/ebooks/{id}/translation",
    params(
        ("id" = i64, Path, description = "Ebook identifier"),
        TranslationQuery
    ),
    responses(
        (status = 200, description = "Translated description", body = TranslationResponse),
        (status = 400, description = "Invalid identifier or language", body = ErrorSchema),
        (status = 404, description = "No such ebook", body = ErrorSchema),
        (status = 503, description = "Translator or store unavailable", body = ErrorSchema)
    ),
    tags = ["ebooks"],
    operation_id = "translateEbookDescription"
)]
#[get("/ebooks/{id}/translation")]
pub async fn translate_description(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<TranslationQuery>,
) -> ApiResult<web::Json<TranslationResponse>> {
    let id = parse_ebook_id(&path, ID)?;
    let language = parse_language(query.into_inner().language, LANGUAGE)?;
    let response = state
        .translations
        .translate_description(TranslateDescriptionRequest { id, language })
        .await?;
    debug!(%id, cached = response.cached, "description translated");
    Ok(web::Json(TranslationResponse {
        translated: response.translated,
    }))
}

#[cfg(test)]
#[path = "ebooks_tests.rs"]
mod tests;
