//! Handler tests for the ebook endpoints, driven through mocked ports.

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::json;

use crate::domain::ports::{
    MockDescriptionTranslation, MockEbookCommand, MockEbookQuery, TranslateDescriptionResponse,
};
use crate::domain::{EbookId, Error, LanguageCode};
use crate::inbound::http::caller::CALLER_ID_HEADER;
use crate::inbound::http::test_utils::{TestState, ebooks_app, sample_ebook};

#[actix_web::test]
async fn list_wraps_records_in_data() {
    let mut query = MockEbookQuery::new();
    query
        .expect_list()
        .times(1)
        .return_once(|| Ok(vec![sample_ebook()]));
    let app = test::init_service(ebooks_app(TestState::default().with_query(query).build())).await;

    let request = test::TestRequest::get()
        .uri("/ebooks")
        .insert_header((CALLER_ID_HEADER, "svc-catalogue"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["data"][0]["id"], 1);
    assert_eq!(body["data"][0]["title"], "The Time Traveler's Tale");
}

#[actix_web::test]
async fn add_returns_created_with_record() {
    let mut command = MockEbookCommand::new();
    command
        .expect_add()
        .withf(|ebook| ebook.id == EbookId::new(1))
        .times(1)
        .return_once(Ok);
    let app =
        test::init_service(ebooks_app(TestState::default().with_command(command).build())).await;

    let request = test::TestRequest::post()
        .uri("/ebooks")
        .set_json(serde_json::to_value(sample_ebook()).expect("serialise"))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Ebook added");
    assert_eq!(body["data"]["category"], "fiction");
}

#[actix_web::test]
async fn add_with_missing_title_lists_violation_and_never_writes() {
    let mut command = MockEbookCommand::new();
    command.expect_add().never();
    let app =
        test::init_service(ebooks_app(TestState::default().with_command(command).build())).await;
    let mut body = serde_json::to_value(sample_ebook()).expect("serialise");
    body.as_object_mut().expect("object").remove("title");

    let request = test::TestRequest::post()
        .uri("/ebooks")
        .set_json(body)
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(error["code"], "invalid_request");
    assert_eq!(
        error["details"]["violations"],
        json!([{"field": "title", "code": "missing_field", "message": "title is required"}])
    );
}

#[actix_web::test]
async fn malformed_json_is_invalid_request() {
    let app = test::init_service(ebooks_app(TestState::default().build())).await;

    let request = test::TestRequest::post()
        .uri("/ebooks")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(error["code"], "invalid_request");
}

#[rstest]
#[case("/ebooks/category/fiction?rating=4.0", Some(4.0))]
#[case("/ebooks/category/fiction?rating=abc", None)]
#[case("/ebooks/category/fiction", None)]
#[actix_web::test]
async fn category_route_passes_permissive_threshold(
    #[case] uri: &str,
    #[case] expected: Option<f64>,
) {
    let mut query = MockEbookQuery::new();
    query
        .expect_list_by_category()
        .withf(move |category, minimum| {
            category.as_str() == "fiction" && minimum.threshold() == expected
        })
        .times(1)
        .return_once(|_, _| Ok(vec![sample_ebook()]));
    let app = test::init_service(ebooks_app(TestState::default().with_query(query).build())).await;

    let request = test::TestRequest::get().uri(uri).to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn get_maps_not_found() {
    let mut query = MockEbookQuery::new();
    query
        .expect_get()
        .return_once(|id| Err(Error::not_found(format!("ebook {id} not found"))));
    let app = test::init_service(ebooks_app(TestState::default().with_query(query).build())).await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/ebooks/7").to_request()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn non_integer_id_is_rejected_before_reaching_ports() {
    let mut query = MockEbookQuery::new();
    query.expect_get().never();
    let app = test::init_service(ebooks_app(TestState::default().with_query(query).build())).await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/ebooks/abc").to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(error["details"]["code"], "invalid_id");
}

#[actix_web::test]
async fn update_returns_updated_item() {
    let mut command = MockEbookCommand::new();
    command
        .expect_update()
        .withf(|request| request.id == EbookId::new(1) && request.changes.rating == Some(4.9))
        .times(1)
        .return_once(|request| {
            let mut updated = sample_ebook();
            updated.apply(&request.changes);
            Ok(updated)
        });
    let app =
        test::init_service(ebooks_app(TestState::default().with_command(command).build())).await;

    let request = test::TestRequest::put()
        .uri("/ebooks/1")
        .set_json(json!({"id": 1, "rating": 4.9}))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Ebook updated successfully");
    assert_eq!(body["updatedItem"]["rating"], 4.9);
    assert_eq!(body["updatedItem"]["title"], "The Time Traveler's Tale");
}

#[rstest]
#[case(json!({"id": 2, "rating": 4.9}))]
#[case(json!({"id": 1}))]
#[case(json!({"id": 1, "isbn": "123"}))]
#[actix_web::test]
async fn invalid_updates_never_reach_the_command(#[case] body: serde_json::Value) {
    let mut command = MockEbookCommand::new();
    command.expect_update().never();
    let app =
        test::init_service(ebooks_app(TestState::default().with_command(command).build())).await;

    let request = test::TestRequest::put()
        .uri("/ebooks/1")
        .set_json(body)
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn translation_defaults_to_chinese() {
    let mut translations = MockDescriptionTranslation::new();
    translations
        .expect_translate_description()
        .withf(|request| request.id == EbookId::new(1) && request.language.as_str() == "zh")
        .times(1)
        .return_once(|_| {
            Ok(TranslateDescriptionResponse {
                translated: "一个惊险的故事".to_owned(),
                cached: false,
            })
        });
    let app = test::init_service(ebooks_app(
        TestState::default().with_translations(translations).build(),
    ))
    .await;

    let request = test::TestRequest::get()
        .uri("/ebooks/1/translation")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body, json!({"translated": "一个惊险的故事"}));
}

#[actix_web::test]
async fn translation_passes_requested_language() {
    let mut translations = MockDescriptionTranslation::new();
    translations
        .expect_translate_description()
        .withf(|request| request.language == LanguageCode::new("zh-TW").expect("code"))
        .times(1)
        .return_once(|_| {
            Ok(TranslateDescriptionResponse {
                translated: "一個驚險的故事".to_owned(),
                cached: true,
            })
        });
    let app = test::init_service(ebooks_app(
        TestState::default().with_translations(translations).build(),
    ))
    .await;

    let request = test::TestRequest::get()
        .uri("/ebooks/1/translation?language=zh-TW")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn malformed_language_is_rejected() {
    let mut translations = MockDescriptionTranslation::new();
    translations.expect_translate_description().never();
    let app = test::init_service(ebooks_app(
        TestState::default().with_translations(translations).build(),
    ))
    .await;

    let request = test::TestRequest::get()
        .uri("/ebooks/1/translation?language=fr%2Etitle")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn translator_outage_is_service_unavailable() {
    let mut translations = MockDescriptionTranslation::new();
    translations
        .expect_translate_description()
        .return_once(|_| Err(Error::service_unavailable("translation service unavailable")));
    let app = test::init_service(ebooks_app(
        TestState::default().with_translations(translations).build(),
    ))
    .await;

    let request = test::TestRequest::get()
        .uri("/ebooks/1/translation?language=fr")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
