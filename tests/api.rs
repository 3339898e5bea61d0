use std::collections::HashMap;
use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use pushkind_catalog::errors::ErrorResponder;
use pushkind_catalog::messages::MessageCatalog;
use pushkind_catalog::routes;
use serde_json::{Value, json};

mod common;

macro_rules! init_app {
    ($test_db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($test_db.repository()))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn category_lifecycle() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    // Create.
    let req = test::TestRequest::post()
        .uri("/api/v1/categories")
        .set_json(json!({"name": "Electronics", "description": "Devices and gadgets"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("Location header")
        .to_string();
    let id = location
        .rsplit_once("/api/v1/categories/")
        .map(|(_, id)| id)
        .expect("Location points at the new category");
    assert!(uuid::Uuid::parse_str(id).is_ok(), "{location}");

    // Read back.
    let req = test::TestRequest::get()
        .uri("/api/v1/categories/Electronics")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"name": "Electronics", "description": "Devices and gadgets"})
    );

    // Blank description is rejected with field errors.
    let req = test::TestRequest::put()
        .uri("/api/v1/categories/electronics")
        .set_json(json!({"description": "  "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Validation failed for one or more fields.");
    assert_eq!(
        body["errors"],
        json!([{"field": "description", "message": "must not be blank"}])
    );

    // Update matches the name ignoring case.
    let req = test::TestRequest::put()
        .uri("/api/v1/categories/electronics")
        .set_json(json!({"description": "Gadgets"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/api/v1/categories/Electronics")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["description"], "Gadgets");

    // Delete, then the category is gone.
    let req = test::TestRequest::delete()
        .uri("/api/v1/categories?name=Electronics")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/api/v1/categories/Electronics")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["message"], "Category with name Electronics does not exist.");
    assert_eq!(body["path"], "/api/v1/categories/Electronics");
    assert!(body["timestamp"].is_string());
    assert!(body.get("errors").is_none());
}

#[actix_web::test]
async fn duplicate_name_is_a_conflict() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/api/v1/categories")
            .set_json(json!({"name": "Books", "description": "Paper"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
        if expected == StatusCode::CONFLICT {
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], "Category with name Books already exists.");
        }
    }
}

#[actix_web::test]
async fn create_reports_every_invalid_field() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/v1/categories")
        .set_json(json!({"name": "", "description": " "}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"],
        json!([
            {"field": "name", "message": "must not be blank"},
            {"field": "description", "message": "must not be blank"}
        ])
    );
}

#[actix_web::test]
async fn malformed_body_is_a_bad_request() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/v1/categories")
        .insert_header(header::ContentType::json())
        .set_payload(r#"{"name": "Books","#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Request JSON is malformed or invalid.");
    assert_eq!(body["path"], "/api/v1/categories");
}

#[actix_web::test]
async fn invalid_pagination_is_a_bad_request() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    for uri in [
        "/api/v1/categories?page=-1",
        "/api/v1/categories?size=0",
        "/api/v1/categories?size=abc",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[actix_web::test]
async fn missing_delete_name_is_a_bad_request() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let req = test::TestRequest::delete()
        .uri("/api/v1/categories")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn list_returns_hal_page() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);
    for name in ["Books", "Music", "Video Games"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/categories")
            .set_json(json!({"name": name}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/categories?page=0&size=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let categories = body["_embedded"]["categories"]
        .as_array()
        .expect("embedded categories");
    let names: Vec<_> = categories.iter().map(|c| c["name"].as_str()).collect();
    assert_eq!(names, vec![Some("Books"), Some("Music")]);
    assert!(
        categories[0]["_links"]["self"]["href"]
            .as_str()
            .is_some_and(|href| href.ends_with("/api/v1/categories/Books"))
    );
    assert!(
        categories[0]["_links"]["delete"]["href"]
            .as_str()
            .is_some_and(|href| href.ends_with("/api/v1/categories?name=Books"))
    );
    assert_eq!(
        body["page"],
        json!({"size": 2, "totalElements": 3, "totalPages": 2, "number": 0})
    );
    assert!(body["_links"]["next"]["href"].is_string());
    assert!(body["_links"].get("prev").is_none());

    let req = test::TestRequest::get()
        .uri("/api/v1/categories?page=1&size=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(
        body["_embedded"]["categories"][0]["_links"]["self"]["href"]
            .as_str()
            .is_some_and(|href| href.contains("/api/v1/categories/Video"))
    );
    assert!(body["_links"].get("next").is_none());
    assert!(body["_links"]["prev"]["href"].is_string());
}

#[actix_web::test]
async fn empty_list_uses_default_page() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let req = test::TestRequest::get().uri("/api/v1/categories").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["_embedded"]["categories"], json!([]));
    assert_eq!(
        body["page"],
        json!({"size": 10, "totalElements": 0, "totalPages": 0, "number": 0})
    );
}

#[actix_web::test]
async fn configured_messages_override_defaults() {
    let test_db = common::TestDb::new();
    let catalog = MessageCatalog::with_overrides(HashMap::from([(
        "error.entity.notfound".to_string(),
        "No {0} named {2}.".to_string(),
    )]));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_db.repository()))
            .app_data(web::Data::new(ErrorResponder::new(Arc::new(catalog))))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/categories/France")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "No Category named France.");
}

#[actix_web::test]
async fn item_links_resolve_for_names_with_reserved_characters() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);
    let names = ["A/B", "C#", "50%", "Q?x", "Video Games"];
    for name in names {
        let req = test::TestRequest::post()
            .uri("/api/v1/categories")
            .set_json(json!({"name": name, "description": "Reserved"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/api/v1/categories").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let categories = body["_embedded"]["categories"]
        .as_array()
        .expect("embedded categories")
        .clone();
    assert_eq!(categories.len(), names.len());

    for category in categories {
        let name = category["name"].as_str().expect("category name");
        let href = category["_links"]["self"]["href"]
            .as_str()
            .expect("self link");
        assert_eq!(href, category["_links"]["update"]["href"].as_str().unwrap());

        let req = test::TestRequest::get().uri(href).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{name} -> {href}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["name"], name, "{href}");
    }
}

#[actix_web::test]
async fn unrouted_requests_use_the_error_shape() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db);

    let requests = [
        test::TestRequest::get().uri("/api/v1/categories/A/B"),
        test::TestRequest::patch().uri("/api/v1/categories/A"),
        test::TestRequest::get().uri("/nowhere"),
    ];
    for req in requests {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], "Not Found");
        assert!(body["timestamp"].is_string());
        assert!(body["path"].is_string());
        assert!(
            body["message"]
                .as_str()
                .is_some_and(|message| message.starts_with("No resource handles")),
            "{body}"
        );
    }
}
