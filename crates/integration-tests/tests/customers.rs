//! Integration tests for the customer API.

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use credit_application_api::routes::customers::CustomerView;
use credit_application_integration_tests::{CPF_A, CPF_B, TestApp, customer_body};

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_customer_returns_201() {
    let app = TestApp::new();

    let response = app
        .post("/api/customers", customer_body(CPF_A, "camila@email.com"))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let view: CustomerView = response.json();
    assert!(view.id.is_some());
    assert_eq!(view.first_name, "Cami");
    assert_eq!(view.cpf.as_str(), CPF_A);
    assert_eq!(view.email.as_str(), "camila@email.com");
    assert_eq!(view.zip_code, "000000");

    let body: Value = response.json();
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_create_customer_with_duplicate_cpf_returns_409() {
    let app = TestApp::new();
    app.create_customer(CPF_A, "first@email.com").await;

    let response = app
        .post("/api/customers", customer_body(CPF_A, "second@email.com"))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["title"], "Conflict! Consult the documentation");
    assert_eq!(body["status"], 409);
    assert_eq!(body["exception"], "ConflictError");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_create_customer_with_blank_name_returns_400() {
    let app = TestApp::new();
    let mut body = customer_body(CPF_A, "camila@email.com");
    body["firstName"] = json!("");

    let response = app.post("/api/customers", body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["title"], "Bad Request! Consult the documentation");
    assert_eq!(body["exception"], "ValidationError");
    assert_eq!(body["details"][0], "firstName: must not be blank");
}

#[tokio::test]
async fn test_create_customer_with_invalid_cpf_returns_400() {
    let app = TestApp::new();

    let response = app
        .post("/api/customers", customer_body("12345678900", "camila@email.com"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["exception"], "ValidationError");
}

#[tokio::test]
async fn test_create_customer_with_malformed_json_returns_400() {
    let app = TestApp::new();

    let response = app
        .post("/api/customers", json!({ "income": "not a number" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["exception"], "ValidationError");
}

// ============================================================================
// Read
// ============================================================================

#[tokio::test]
async fn test_find_customer_by_id() {
    let app = TestApp::new();
    let id = app.create_customer(CPF_A, "camila@email.com").await;

    let response = app.get(&format!("/api/customers/{id}")).await;

    assert_eq!(response.status, StatusCode::OK);
    let view: CustomerView = response.json();
    assert_eq!(view.id.map(i64::from), Some(id));
    assert_eq!(view.last_name, "Cavalcante");
    assert_eq!(view.street, "Rua da Cami, 123");
}

#[tokio::test]
async fn test_find_unknown_customer_returns_404() {
    let app = TestApp::new();

    let response = app.get("/api/customers/2").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["title"], "Not Found!");
    assert_eq!(body["exception"], "NotFoundError");
    assert_eq!(body["details"][0], "Id 2 not found");
}

#[tokio::test]
async fn test_find_customer_with_malformed_id_returns_400() {
    let app = TestApp::new();

    let response = app.get("/api/customers/abc").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_customer() {
    let app = TestApp::new();
    let id = app.create_customer(CPF_A, "camila@email.com").await;

    let response = app
        .send(
            Method::PATCH,
            &format!("/api/customers?customerId={id}"),
            Some(json!({
                "firstName": "CamiUpdate",
                "lastName": "CavalcanteUpdate",
                "income": "5000.0",
                "zipCode": "45656",
                "street": "Rua Updated"
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.text());
    let view: CustomerView = response.json();
    assert_eq!(view.first_name, "CamiUpdate");
    assert_eq!(view.street, "Rua Updated");
    assert_eq!(view.cpf.as_str(), CPF_A);
    assert_eq!(view.email.as_str(), "camila@email.com");

    let fetched: CustomerView = app.get(&format!("/api/customers/{id}")).await.json();
    assert_eq!(fetched, view);
}

#[tokio::test]
async fn test_update_unknown_customer_returns_404() {
    let app = TestApp::new();

    let response = app
        .send(
            Method::PATCH,
            "/api/customers?customerId=9",
            Some(json!({
                "firstName": "A",
                "lastName": "B",
                "income": "1",
                "zipCode": "1",
                "street": "C"
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_without_customer_id_returns_400() {
    let app = TestApp::new();

    let response = app
        .send(Method::PATCH, "/api/customers", Some(json!({})))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_customer_returns_204() {
    let app = TestApp::new();
    let id = app.create_customer(CPF_A, "camila@email.com").await;

    let response = app
        .send(Method::DELETE, &format!("/api/customers/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_empty());

    let response = app.get(&format!("/api/customers/{id}")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_customer_returns_404() {
    let app = TestApp::new();

    let response = app.send(Method::DELETE, "/api/customers/1", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_cpf_can_be_registered_again() {
    let app = TestApp::new();
    let id = app.create_customer(CPF_A, "camila@email.com").await;
    app.create_customer(CPF_B, "other@email.com").await;

    app.send(Method::DELETE, &format!("/api/customers/{id}"), None)
        .await;

    let response = app
        .post("/api/customers", customer_body(CPF_A, "again@email.com"))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();

    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "ok");

    let response = app.get("/health/ready").await;
    assert_eq!(response.status, StatusCode::OK);
}
