//! Credit API Tests

use std::str::FromStr;

use axum::http::StatusCode;
use bigdecimal::BigDecimal;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{body_json, body_text, months_ahead, TestApp};

fn credit_body(customer_id: i64, value: &str, installments: i32) -> String {
    json!({
        "creditValue": value,
        "dayFirstOfInstallment": months_ahead(2),
        "numberOfInstallments": installments,
        "customerId": customer_id,
    })
    .to_string()
}

/// Save a credit and return its generated code
async fn save_credit(app: &TestApp, customer_id: i64, value: &str) -> String {
    let response = app
        .post_json("/credits", &credit_body(customer_id, value, 12))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let text = body_text(response).await;
    text.strip_prefix("Credit ")
        .and_then(|rest| rest.split(' ').next())
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_save_credit_returns_created_with_message() {
    let app = TestApp::new();
    let customer = app.seed_customer("28475934625", "john@email.com").await;

    let response = app
        .post_json("/credits", &credit_body(customer.id, "1000.00", 15))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let text = body_text(response).await;
    assert!(text.starts_with("Credit "));
    assert!(text.ends_with(" - Customer john@email.com saved!"));
}

#[tokio::test]
async fn test_save_credit_reports_every_violation() {
    let app = TestApp::new();
    let body = json!({
        "creditValue": null,
        "dayFirstOfInstallment": "2000-01-01",
        "numberOfInstallments": 0,
        "customerId": null,
    })
    .to_string();

    let response = app.post_json("/credits", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Bad Request! Consult the documentation");

    let mut fields: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    fields.dedup();
    assert_eq!(
        fields,
        vec![
            "creditValue",
            "customerId",
            "dayFirstOfInstallment",
            "numberOfInstallments"
        ]
    );
}

#[tokio::test]
async fn test_save_credit_with_too_many_installments_is_rejected() {
    let app = TestApp::new();
    let customer = app.seed_customer("28475934625", "john@email.com").await;

    let response = app
        .post_json("/credits", &credit_body(customer.id, "1000.00", 49))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["field"], "numberOfInstallments");
    assert_eq!(json["errors"][0]["message"], "deve ser menor que ou igual à 48");
}

#[tokio::test]
async fn test_save_credit_for_unknown_customer_returns_not_found() {
    let app = TestApp::new();

    let response = app
        .post_json("/credits", &credit_body(99, "1000.00", 12))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_returns_bad_request() {
    let app = TestApp::new();

    let response = app.post_json("/credits", "{not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_find_by_credit_code_returns_saved_credit() {
    let app = TestApp::new();
    let customer = app.seed_customer("28475934625", "john@email.com").await;
    let code = save_credit(&app, customer.id, "500.50").await;

    let response = app
        .get(&format!("/credits/{}?customerId={}", code, customer.id))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["creditCode"], code);
    assert_eq!(
        BigDecimal::from_str(json["creditValue"].as_str().unwrap()).unwrap(),
        BigDecimal::from_str("500.50").unwrap()
    );
    assert_eq!(json["numberOfInstallments"], 12);
    assert_eq!(json["status"], "IN_PROGRESS");
    assert_eq!(json["dayFirstInstallment"], months_ahead(2));
    assert_eq!(json["emailCustomer"], "john@email.com");
}

#[tokio::test]
async fn test_find_by_credit_code_of_another_customer_returns_not_found() {
    let app = TestApp::new();
    let owner = app.seed_customer("28475934625", "john@email.com").await;
    let other = app.seed_customer("11122233344", "jane@email.com").await;
    let code = save_credit(&app, owner.id, "1000.00").await;

    let response = app
        .get(&format!("/credits/{}?customerId={}", code, other.id))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_find_by_unknown_credit_code_returns_not_found() {
    let app = TestApp::new();
    let customer = app.seed_customer("28475934625", "john@email.com").await;

    let response = app
        .get(&format!(
            "/credits/{}?customerId={}",
            uuid::Uuid::new_v4(),
            customer.id
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_find_all_by_customer_lists_only_that_customer() {
    let app = TestApp::new();
    let customer = app.seed_customer("28475934625", "john@email.com").await;
    let other = app.seed_customer("11122233344", "jane@email.com").await;
    let first = save_credit(&app, customer.id, "1000.00").await;
    let second = save_credit(&app, customer.id, "2000.00").await;
    save_credit(&app, other.id, "3000.00").await;

    let response = app
        .get(&format!("/credits?customerId={}", customer.id))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let codes: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["creditCode"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec![first.as_str(), second.as_str()]);
    assert!(json[0].get("emailCustomer").is_none());
}

#[tokio::test]
async fn test_find_all_for_customer_without_credits_is_empty() {
    let app = TestApp::new();

    let response = app.get("/credits?customerId=42").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_json_number_credit_value_round_trips_exactly() {
    let app = TestApp::new();
    let customer = app.seed_customer("28475934625", "john@email.com").await;
    let body = format!(
        r#"{{"creditValue": 1000.1, "dayFirstOfInstallment": "{}", "numberOfInstallments": 12, "customerId": {}}}"#,
        months_ahead(2),
        customer.id
    );

    let response = app.post_json("/credits", &body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let text = body_text(response).await;
    let code = text
        .strip_prefix("Credit ")
        .and_then(|rest| rest.split(' ').next())
        .unwrap();

    let response = app
        .get(&format!("/credits/{}?customerId={}", code, customer.id))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["creditValue"], "1000.1");
}

#[tokio::test]
async fn test_credit_value_beyond_storage_limits_is_rejected() {
    let app = TestApp::new();
    let customer = app.seed_customer("28475934625", "john@email.com").await;

    for value in ["1000.001", "12345678901234567.891"] {
        let response = app
            .post_json("/credits", &credit_body(customer.id, value, 12))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "value {}", value);
        let json = body_json(response).await;
        assert_eq!(json["errors"][0]["field"], "creditValue");
        assert_eq!(
            json["errors"][0]["message"],
            "valor numérico fora do limite (<13 dígitos>.<2 dígitos> esperado)"
        );
    }

    let response = app
        .get(&format!("/credits?customerId={}", customer.id))
        .await;
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_find_all_without_customer_id_returns_json_error() {
    let app = TestApp::new();

    let response = app.get("/credits").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let json = body_json(response).await;
    assert_eq!(json["code"], 10002);
    assert!(json["message"].as_str().unwrap().contains("customerId"));
}

#[tokio::test]
async fn test_find_by_malformed_credit_code_returns_json_error() {
    let app = TestApp::new();

    let response = app.get("/credits/not-a-uuid?customerId=1").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 10002);
    assert_eq!(json["message"], "Invalid credit code");
}

#[tokio::test]
async fn test_find_by_credit_code_without_customer_id_returns_json_error() {
    let app = TestApp::new();

    let response = app
        .get(&format!("/credits/{}", uuid::Uuid::new_v4()))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], 10002);
}
