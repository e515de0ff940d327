//! Integration tests for routing, extraction and request validation
//!
//! These run against the full router with a lazy pool: every assertion here
//! is about behavior that rejects a request before any query executes.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use tower::ServiceExt;

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_malformed_uuid_path_is_rejected() {
    let app = common::test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/api/categories/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_uuid_rejected_even_with_valid_body() {
    let app = common::test_app();

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/v1/api/categories/not-a-uuid",
            common::fixtures::category_body("rust"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_required_field_is_rejected() {
    let app = common::test_app();

    // NewCategory requires `name`
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/v1/api/categories",
            serde_json::json!({ "description": "no name" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_invalid_json_body_is_rejected() {
    let app = common::test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/v1/api/tags")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_content_type_is_rejected() {
    let app = common::test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/v1/api/tags")
                .body(Body::from(r#"{"name": "rust"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_negative_pagination_is_rejected() {
    let app = common::test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/api/categories?skip=-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "INVALID_QUERY_PARAM");
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let app = common::test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::PATCH)
                .uri("/v1/api/categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_short_password_is_rejected_before_persistence() {
    let app = common::test_app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/v1/api/users",
            serde_json::json!({
                "email": "ada@example.com",
                "full_name": "Ada Lovelace",
                "password": "short",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
