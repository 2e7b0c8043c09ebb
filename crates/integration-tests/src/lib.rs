//! Integration tests for the credit application service.
//!
//! The tests drive the full router in-process with `tower::ServiceExt`,
//! backed by the in-memory store and a clock fixed at [`TODAY`].
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p credit-application-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `customers` - Customer API tests
//! - `credits` - Credit API tests

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tower::ServiceExt;

use credit_application_api::services::FixedClock;
use credit_application_api::state::AppState;

/// Date the test clock is fixed at.
pub const TODAY: (i32, u32, u32) = (2026, 1, 15);

/// Valid CPFs for test customers.
pub const CPF_A: &str = "27571884020";
pub const CPF_B: &str = "52998224725";

/// Response captured from the router.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Decode the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON for `T`.
    #[must_use]
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "invalid JSON body ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    /// The body as text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// An application instance over a fresh in-memory store.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Build an app whose clock reads [`TODAY`].
    ///
    /// # Panics
    ///
    /// Panics if [`TODAY`] is not a valid date.
    #[must_use]
    pub fn new() -> Self {
        let (y, m, d) = TODAY;
        let today = NaiveDate::from_ymd_opt(y, m, d).expect("TODAY is a valid date");
        let state = AppState::in_memory(Arc::new(FixedClock(today)));
        Self {
            router: credit_application_api::app(state),
        }
    }

    /// Send a request with an optional JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body")
            .to_vec();

        TestResponse { status, body }
    }

    /// GET `uri`.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// POST a JSON body to `uri`.
    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    /// Create a customer and return its id.
    ///
    /// # Panics
    ///
    /// Panics if creation does not return 201.
    pub async fn create_customer(&self, cpf: &str, email: &str) -> i64 {
        let response = self.post("/api/customers", customer_body(cpf, email)).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "create customer failed: {}",
            response.text()
        );
        response.json::<Value>()["id"]
            .as_i64()
            .expect("customer id in response")
    }

    /// Create a credit and return its code.
    ///
    /// # Panics
    ///
    /// Panics if creation does not return 201.
    pub async fn create_credit(&self, customer_id: i64, day: &str, installments: i32) -> String {
        let response = self
            .post("/api/credits", credit_body(customer_id, day, installments))
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "create credit failed: {}",
            response.text()
        );
        // "Credit {code} - Customer {email} saved!"
        response
            .text()
            .split_whitespace()
            .nth(1)
            .expect("credit code in response")
            .to_string()
    }
}

/// Valid customer creation body.
#[must_use]
pub fn customer_body(cpf: &str, email: &str) -> Value {
    json!({
        "firstName": "Cami",
        "lastName": "Cavalcante",
        "cpf": cpf,
        "email": email,
        "income": "1000.0",
        "password": "1234",
        "zipCode": "000000",
        "street": "Rua da Cami, 123"
    })
}

/// Valid credit creation body.
#[must_use]
pub fn credit_body(customer_id: i64, day: &str, installments: i32) -> Value {
    json!({
        "creditValue": "500.00",
        "dayFirstOfInstallment": day,
        "numberOfInstallments": installments,
        "customerId": customer_id
    })
}
