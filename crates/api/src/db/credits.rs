//! `PostgreSQL` credit storage.
//!
//! Reads join the owning customer so credits come back with a loaded
//! [`CustomerRef`]. A credit whose customer has been deleted comes back with
//! an unresolved reference instead.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use credit_application_core::{CreditCode, CreditId, CreditStatus, CustomerId, Money};

use super::customers::CustomerRow;
use super::{CreditStore, PgStore, RepositoryError};
use crate::models::{Credit, Customer, CustomerRef};

const CREDIT_CODE_UNIQUE_INDEX: &str = "idx_credit_code";

/// Columns selected by every credit read, owner columns prefixed with `c_`.
const CREDIT_SELECT: &str = r"
    SELECT cr.id, cr.credit_code, cr.credit_value, cr.day_first_installment,
           cr.number_of_installments, cr.status, cr.customer_id,
           c.id AS c_id, c.first_name AS c_first_name, c.last_name AS c_last_name,
           c.cpf AS c_cpf, c.email AS c_email, c.income AS c_income,
           c.password AS c_password, c.zip_code AS c_zip_code, c.street AS c_street
    FROM credit cr
    LEFT JOIN customer c ON c.id = cr.customer_id
";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for credit reads with the owner joined in.
#[derive(Debug, sqlx::FromRow)]
struct CreditRow {
    id: i64,
    credit_code: CreditCode,
    credit_value: Decimal,
    day_first_installment: NaiveDate,
    number_of_installments: i32,
    status: CreditStatus,
    customer_id: i64,
    c_id: Option<i64>,
    c_first_name: Option<String>,
    c_last_name: Option<String>,
    c_cpf: Option<String>,
    c_email: Option<String>,
    c_income: Option<Decimal>,
    c_password: Option<String>,
    c_zip_code: Option<String>,
    c_street: Option<String>,
}

impl CreditRow {
    /// The joined owner, if the customer row still exists.
    fn owner(&mut self) -> Option<CustomerRow> {
        Some(CustomerRow {
            id: self.c_id?,
            first_name: self.c_first_name.take()?,
            last_name: self.c_last_name.take()?,
            cpf: self.c_cpf.take()?,
            email: self.c_email.take()?,
            income: self.c_income?,
            password: self.c_password.take()?,
            zip_code: self.c_zip_code.take()?,
            street: self.c_street.take()?,
        })
    }
}

impl TryFrom<CreditRow> for Credit {
    type Error = RepositoryError;

    fn try_from(mut row: CreditRow) -> Result<Self, Self::Error> {
        let credit_value = Money::new(row.credit_value).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid credit value in database: {e}"))
        })?;

        let customer = match row.owner() {
            Some(owner) => CustomerRef::from(Customer::try_from(owner)?),
            None => CustomerRef::Id(CustomerId::new(row.customer_id)),
        };

        Ok(Self {
            id: Some(CreditId::new(row.id)),
            credit_code: row.credit_code,
            credit_value,
            day_first_installment: row.day_first_installment,
            number_of_installments: row.number_of_installments,
            status: row.status,
            customer,
        })
    }
}

// =============================================================================
// Store
// =============================================================================

#[async_trait]
impl CreditStore for PgStore {
    #[tracing::instrument(skip(self, credit), fields(credit_code = %credit.credit_code))]
    async fn create(&self, credit: Credit) -> Result<Credit, RepositoryError> {
        let customer_id = credit.customer.id().ok_or(RepositoryError::NotFound)?;

        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO credit
                (credit_code, credit_value, day_first_installment,
                 number_of_installments, status, customer_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            ",
        )
        .bind(credit.credit_code)
        .bind(credit.credit_value.amount())
        .bind(credit.day_first_installment)
        .bind(credit.number_of_installments)
        .bind(credit.status)
        .bind(customer_id)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some(CREDIT_CODE_UNIQUE_INDEX)
            {
                return RepositoryError::Conflict(format!(
                    "credit code {} already exists",
                    credit.credit_code
                ));
            }
            RepositoryError::Database(e)
        })?;

        Ok(Credit {
            id: Some(CreditId::new(id)),
            ..credit
        })
    }

    async fn list_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Credit>, RepositoryError> {
        let rows = sqlx::query_as::<_, CreditRow>(&format!(
            "{CREDIT_SELECT} WHERE cr.customer_id = $1 ORDER BY cr.id"
        ))
        .bind(customer_id)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn get_by_code(&self, code: CreditCode) -> Result<Option<Credit>, RepositoryError> {
        let row = sqlx::query_as::<_, CreditRow>(&format!(
            "{CREDIT_SELECT} WHERE cr.credit_code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool())
        .await?;

        row.map(TryInto::try_into).transpose()
    }
}
