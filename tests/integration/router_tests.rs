//! Router tests that never reach the database

use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;

use crate::common::{app, get, json_request, lazy_pool, multipart, send};

#[tokio::test]
async fn test_root_welcome() {
    let app = app(lazy_pool());
    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Summer Shelter"));
}

#[tokio::test]
async fn test_health_check() {
    let app = app(lazy_pool());
    let (status, body) = send(&app, get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_fails_without_database() {
    let app = app(lazy_pool());
    let (status, body) = send(&app, get("/api/v1/ready")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "DbFailure");
    assert_eq!(body["message"], "Database error");
}

#[tokio::test]
async fn test_fallback_statistics_without_database() {
    let app = app(lazy_pool());
    let (status, body) = send(&app, get("/api/v1/statistics/fallback")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "total_animals": 300,
            "adopted_animals": 120,
            "new_admissions": 50,
            "rescued_animals": 150
        })
    );
}

#[tokio::test]
async fn test_housing_options() {
    let app = app(lazy_pool());
    let (status, body) = send(&app, get("/api/v1/adoptions/housing-options")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "housing_situations": ["House", "Apartment", "Condo", "Mobile Home", "Other"],
            "home_ownership": ["Own", "Rent", "Other"]
        })
    );
}

#[tokio::test]
async fn test_create_animal_requires_fields() {
    let app = app(lazy_pool());
    let request = multipart("POST", "/api/v1/animals", &[("name", "Buddy"), ("age", "2")], None);
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
    assert!(body["message"].as_str().unwrap().contains("type"));
}

#[tokio::test]
async fn test_create_animal_rejects_malformed_age() {
    let app = app(lazy_pool());
    let mut fields = crate::common::animal_fields("Buddy", "Dog");
    fields.retain(|(name, _)| *name != "age");
    fields.push(("age", "two"));
    let (status, _) = send(&app, multipart("POST", "/api/v1/animals", &fields, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_animal_rejects_negative_age() {
    let app = app(lazy_pool());
    let mut fields = crate::common::animal_fields("Buddy", "Dog");
    fields.retain(|(name, _)| *name != "age");
    fields.push(("age", "-1"));
    let (status, body) = send(&app, multipart("POST", "/api/v1/animals", &fields, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);
}

#[tokio::test]
async fn test_negative_pagination_is_rejected() {
    let app = app(lazy_pool());

    let (status, _) = send(&app, get("/api/v1/animals?skip=-1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/api/v1/adoptions?limit=-5")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_rejects_invalid_email() {
    let app = app(lazy_pool());
    let mut body = crate::common::application_body(1);
    body["email"] = json!("not-an-email");
    let (status, body) = send(&app, json_request("POST", "/api/v1/adoptions", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_submit_rejects_unknown_housing_situation() {
    let app = app(lazy_pool());
    let mut body = crate::common::application_body(1);
    body["housing_situation"] = json!("Castle");
    let (status, _) = send(&app, json_request("POST", "/api/v1/adoptions", &body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let app = app(lazy_pool());
    let (status, _) = send(&app, get("/api/v1/animals/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cors_preflight_for_dev_frontend() {
    let app = app(lazy_pool());
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/animals")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_cors_ignores_unknown_origin() {
    let app = app(lazy_pool());
    let request = Request::builder()
        .uri("/api/v1/health")
        .header(header::ORIGIN, "http://evil.example")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = app(lazy_pool());
    let (status, body) = send(&app, get("/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Summer Shelter API");
    assert!(body["paths"]["/adoptions/{id}/approve"].is_object());
}
