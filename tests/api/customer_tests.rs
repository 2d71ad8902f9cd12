//! Customer API Tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{body_json, body_text, TestApp};

fn customer_body(cpf: &str, email: &str) -> String {
    json!({
        "firstName": "John",
        "lastName": "Doe",
        "cpf": cpf,
        "email": email,
        "password": "secret-password",
        "zipCode": "12345-678",
        "street": "Main Street",
    })
    .to_string()
}

#[tokio::test]
async fn test_save_customer_then_find_it() {
    let app = TestApp::new();

    let response = app
        .post_json("/customers", &customer_body("28475934625", "john@email.com"))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_text(response).await, "Customer john@email.com saved!");

    let response = app.get("/customers/1").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["email"], "john@email.com");
    assert_eq!(json["zipCode"], "12345-678");
    assert!(json.get("password").is_none());
    assert!(json.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_save_customer_with_invalid_fields_returns_bad_request() {
    let app = TestApp::new();

    let response = app
        .post_json("/customers", &customer_body("123", "not-an-email"))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let fields: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["cpf", "email"]);
}

#[tokio::test]
async fn test_save_duplicate_customer_returns_conflict() {
    let app = TestApp::new();
    app.seed_customer("28475934625", "john@email.com").await;

    let response = app
        .post_json("/customers", &customer_body("28475934625", "john@email.com"))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_find_unknown_customer_returns_not_found() {
    let app = TestApp::new();

    let response = app.get("/customers/7").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_find_customer_with_non_numeric_id_returns_json_error() {
    let app = TestApp::new();

    let response = app.get("/customers/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10002);
    assert_eq!(json["message"], "Invalid customer ID");
}
