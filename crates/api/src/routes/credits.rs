//! Credit routes.
//!
//! ```text
//! POST /api/credits                                  - Create credit
//! GET  /api/credits?customerId={id}                  - List a customer's credits
//! GET  /api/credits/{creditCode}?customerId={id}     - Fetch one credit
//! ```

use axum::{Json, extract::State, http::StatusCode};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use credit_application_core::{CreditCode, CreditStatus, CustomerId, Email, Money};

use super::customers::CustomerIdQuery;
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::validate::Violations;
use crate::error::Result;
use crate::models::Credit;
use crate::services::rules;
use crate::state::AppState;

// =============================================================================
// Requests
// =============================================================================

/// Body of a credit creation request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditDto {
    pub credit_value: Option<Decimal>,
    pub day_first_of_installment: Option<NaiveDate>,
    pub number_of_installments: Option<i32>,
    pub customer_id: Option<CustomerId>,
}

impl CreditDto {
    /// Validate the request against `today`. The first installment must be
    /// in the future; the upper bound is a business rule left to the service.
    fn into_credit(self, today: NaiveDate) -> Result<Credit> {
        let mut v = Violations::default();

        let credit_value = v
            .required("creditValue", self.credit_value)
            .and_then(|value| Money::new(value).map_err(|e| v.push("creditValue", e)).ok());

        let day = v
            .required("dayFirstOfInstallment", self.day_first_of_installment)
            .filter(|day| {
                let future = *day > today;
                if !future {
                    v.push("dayFirstOfInstallment", "must be a future date");
                }
                future
            });

        let installments = v
            .required("numberOfInstallments", self.number_of_installments)
            .filter(|n| {
                let in_range = rules::installments_in_range(*n);
                if !in_range {
                    v.push(
                        "numberOfInstallments",
                        format!(
                            "must be between {} and {}",
                            rules::INSTALLMENT_RANGE.start(),
                            rules::INSTALLMENT_RANGE.end()
                        ),
                    );
                }
                in_range
            });

        let customer_id = v.required("customerId", self.customer_id);

        let credit = match (credit_value, day, installments, customer_id) {
            (Some(value), Some(day), Some(installments), Some(customer_id)) => {
                Some(Credit::new(value, day, installments, customer_id))
            }
            _ => None,
        };

        v.finish(credit)
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Summary row of a customer's credit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditViewList {
    pub credit_code: CreditCode,
    pub credit_value: Money,
    pub number_of_installments: i32,
}

impl From<Credit> for CreditViewList {
    fn from(credit: Credit) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
        }
    }
}

/// Detail of one credit. Owner fields are empty when the owner no longer
/// exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditView {
    pub credit_code: CreditCode,
    pub credit_value: Money,
    pub number_of_installment: i32,
    pub status: CreditStatus,
    pub email_customer: Option<Email>,
    pub income_customer: Option<Decimal>,
}

impl From<Credit> for CreditView {
    fn from(credit: Credit) -> Self {
        let owner = credit.customer.customer();
        Self {
            email_customer: owner.map(|c| c.email.clone()),
            income_customer: owner.map(|c| c.income),
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installment: credit.number_of_installments,
            status: credit.status,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a credit.
///
/// POST /api/credits
///
/// # Errors
///
/// Returns `AppError` if the body is invalid, the date is outside the allowed
/// window, or the customer does not exist.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<CreditDto>,
) -> Result<(StatusCode, String)> {
    let credit = dto.into_credit(state.today())?;
    let saved = state.credit_service().save(credit).await?;

    let email = saved
        .customer
        .customer()
        .map_or_else(String::new, |c| c.email.to_string());
    Ok((
        StatusCode::CREATED,
        format!("Credit {} - Customer {email} saved!", saved.credit_code),
    ))
}

/// List a customer's credits.
///
/// GET /api/credits?customerId={id}
///
/// # Errors
///
/// Returns `AppError` if the customer does not exist.
pub async fn find_all_by_customer(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CustomerIdQuery>,
) -> Result<Json<Vec<CreditViewList>>> {
    let credits = state
        .credit_service()
        .find_all_by_customer(query.customer_id)
        .await?;
    Ok(Json(credits.into_iter().map(Into::into).collect()))
}

/// Fetch a credit on behalf of its owner.
///
/// GET /api/credits/{creditCode}?customerId={id}
///
/// # Errors
///
/// Returns `AppError` if the code is unknown or the caller is not the owner.
pub async fn find_by_credit_code(
    State(state): State<AppState>,
    ApiPath(code): ApiPath<CreditCode>,
    ApiQuery(query): ApiQuery<CustomerIdQuery>,
) -> Result<Json<CreditView>> {
    let credit = state
        .credit_service()
        .find_by_credit_code(query.customer_id, code)
        .await?;
    Ok(Json(credit.into()))
}
