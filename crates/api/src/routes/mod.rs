//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                  - Liveness check
//! GET    /health/ready                            - Readiness check (store ping)
//!
//! # Customers
//! POST   /api/customers                           - Create customer
//! GET    /api/customers/{id}                      - Fetch customer
//! PATCH  /api/customers?customerId={id}           - Update customer
//! DELETE /api/customers/{id}                      - Delete customer
//!
//! # Credits
//! POST   /api/credits                             - Create credit
//! GET    /api/credits?customerId={id}             - List a customer's credits
//! GET    /api/credits/{creditCode}?customerId={id} - Fetch one credit
//! ```

pub mod credits;
pub mod customers;
pub mod extract;
mod validate;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/customers",
            post(customers::create).patch(customers::update),
        )
        .route(
            "/api/customers/{id}",
            get(customers::find_by_id).delete(customers::delete),
        )
}

/// Create the credit routes router.
pub fn credit_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/credits",
            post(credits::create).get(credits::find_all_by_customer),
        )
        .route(
            "/api/credits/{credit_code}",
            get(credits::find_by_credit_code),
        )
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(customer_routes())
        .merge(credit_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
