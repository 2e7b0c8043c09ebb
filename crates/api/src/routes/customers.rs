//! Customer routes.
//!
//! ```text
//! POST   /api/customers                 - Create customer
//! GET    /api/customers/{id}            - Fetch customer
//! PATCH  /api/customers?customerId={id} - Update customer
//! DELETE /api/customers/{id}            - Delete customer
//! ```

use axum::{Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use credit_application_core::{CustomerId, Email, TaxId};

use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::validate::Violations;
use crate::error::Result;
use crate::models::{Address, Customer, CustomerUpdate};
use crate::services::password::hash_password;
use crate::state::AppState;

// =============================================================================
// Requests
// =============================================================================

/// Body of a customer creation request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub cpf: Option<String>,
    pub email: Option<String>,
    pub income: Option<Decimal>,
    pub password: Option<String>,
    pub zip_code: Option<String>,
    pub street: Option<String>,
}

impl CustomerDto {
    /// Validate the request. The returned customer still carries the raw
    /// password.
    fn into_customer(self) -> Result<Customer> {
        let mut v = Violations::default();

        let first_name = v.not_blank("firstName", self.first_name);
        let last_name = v.not_blank("lastName", self.last_name);
        let tax_id = v.parse("cpf", self.cpf, TaxId::parse);
        let email = v.parse("email", self.email, Email::parse);
        let income = v.required("income", self.income);
        let password = v.not_blank("password", self.password);
        let zip_code = v.not_blank("zipCode", self.zip_code);
        let street = v.not_blank("street", self.street);

        let customer = match (tax_id, email, income) {
            (Some(tax_id), Some(email), Some(income)) => Some(Customer {
                id: None,
                first_name,
                last_name,
                tax_id,
                email,
                income,
                password,
                address: Address { zip_code, street },
            }),
            _ => None,
        };

        v.finish(customer)
    }
}

/// Body of a customer update request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdateDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub income: Option<Decimal>,
    pub zip_code: Option<String>,
    pub street: Option<String>,
}

impl CustomerUpdateDto {
    fn into_update(self) -> Result<CustomerUpdate> {
        let mut v = Violations::default();

        let first_name = v.not_blank("firstName", self.first_name);
        let last_name = v.not_blank("lastName", self.last_name);
        let income = v.required("income", self.income);
        let zip_code = v.not_blank("zipCode", self.zip_code);
        let street = v.not_blank("street", self.street);

        let update = income.map(|income| CustomerUpdate {
            first_name,
            last_name,
            income,
            zip_code,
            street,
        });

        v.finish(update)
    }
}

/// `?customerId=` query parameter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerIdQuery {
    pub customer_id: CustomerId,
}

// =============================================================================
// Responses
// =============================================================================

/// Customer as returned by the API. Never includes the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
    pub cpf: TaxId,
    pub income: Decimal,
    pub email: Email,
    pub zip_code: String,
    pub street: String,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            cpf: customer.tax_id,
            income: customer.income,
            email: customer.email,
            zip_code: customer.address.zip_code,
            street: customer.address.street,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a customer.
///
/// POST /api/customers
///
/// # Errors
///
/// Returns `AppError` if the body is invalid or the cpf is already registered.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<CustomerDto>,
) -> Result<(StatusCode, Json<CustomerView>)> {
    let mut customer = dto.into_customer()?;
    customer.password = hash_password(&customer.password)?;

    let saved = state.customer_service().save(customer).await?;
    Ok((StatusCode::CREATED, Json(saved.into())))
}

/// Fetch a customer.
///
/// GET /api/customers/{id}
///
/// # Errors
///
/// Returns `AppError` if the customer does not exist.
pub async fn find_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CustomerId>,
) -> Result<Json<CustomerView>> {
    let customer = state.customer_service().find_by_id(id).await?;
    Ok(Json(customer.into()))
}

/// Update a customer's mutable fields.
///
/// PATCH /api/customers?customerId={id}
///
/// # Errors
///
/// Returns `AppError` if the body is invalid or the customer does not exist.
pub async fn update(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CustomerIdQuery>,
    ApiJson(dto): ApiJson<CustomerUpdateDto>,
) -> Result<Json<CustomerView>> {
    let update = dto.into_update()?;
    let customer = state
        .customer_service()
        .update(query.customer_id, update)
        .await?;
    Ok(Json(customer.into()))
}

/// Delete a customer.
///
/// DELETE /api/customers/{id}
///
/// # Errors
///
/// Returns `AppError` if the customer does not exist.
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CustomerId>,
) -> Result<StatusCode> {
    state.customer_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
