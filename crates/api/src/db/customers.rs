//! `PostgreSQL` customer storage.

use async_trait::async_trait;
use rust_decimal::Decimal;

use credit_application_core::{CustomerId, Email, TaxId};

use super::{CustomerStore, PgStore, RepositoryError};
use crate::models::{Address, Customer};

/// Name of the unique index guarding the tax id.
const CPF_UNIQUE_INDEX: &str = "idx_customer_cpf";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `customer` queries.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct CustomerRow {
    pub(super) id: i64,
    pub(super) first_name: String,
    pub(super) last_name: String,
    pub(super) cpf: String,
    pub(super) email: String,
    pub(super) income: Decimal,
    pub(super) password: String,
    pub(super) zip_code: String,
    pub(super) street: String,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let tax_id = TaxId::parse(&row.cpf).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid cpf in database: {e}"))
        })?;
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: Some(CustomerId::new(row.id)),
            first_name: row.first_name,
            last_name: row.last_name,
            tax_id,
            email,
            income: row.income,
            password: row.password,
            address: Address {
                zip_code: row.zip_code,
                street: row.street,
            },
        })
    }
}

/// Map a write error, turning a cpf unique violation into a conflict.
fn map_write_error(e: sqlx::Error, cpf: &TaxId) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.constraint() == Some(CPF_UNIQUE_INDEX)
    {
        return RepositoryError::Conflict(format!("cpf {cpf} already registered"));
    }
    RepositoryError::Database(e)
}

// =============================================================================
// Store
// =============================================================================

#[async_trait]
impl CustomerStore for PgStore {
    #[tracing::instrument(skip(self, customer), fields(customer_id = ?customer.id))]
    async fn save(&self, customer: Customer) -> Result<Customer, RepositoryError> {
        let row = match customer.id {
            None => sqlx::query_as::<_, CustomerRow>(
                r"
                INSERT INTO customer
                    (first_name, last_name, cpf, email, income, password, zip_code, street)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id, first_name, last_name, cpf, email, income, password,
                          zip_code, street
                ",
            )
            .bind(&customer.first_name)
            .bind(&customer.last_name)
            .bind(customer.tax_id.as_str())
            .bind(customer.email.as_str())
            .bind(customer.income)
            .bind(&customer.password)
            .bind(&customer.address.zip_code)
            .bind(&customer.address.street)
            .fetch_one(self.pool())
            .await
            .map_err(|e| map_write_error(e, &customer.tax_id))?,
            Some(id) => sqlx::query_as::<_, CustomerRow>(
                r"
                UPDATE customer
                SET first_name = $2, last_name = $3, email = $4, income = $5,
                    password = $6, zip_code = $7, street = $8, updated_at = NOW()
                WHERE id = $1
                RETURNING id, first_name, last_name, cpf, email, income, password,
                          zip_code, street
                ",
            )
            .bind(id)
            .bind(&customer.first_name)
            .bind(&customer.last_name)
            .bind(customer.email.as_str())
            .bind(customer.income)
            .bind(&customer.password)
            .bind(&customer.address.zip_code)
            .bind(&customer.address.street)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| map_write_error(e, &customer.tax_id))?
            .ok_or(RepositoryError::NotFound)?,
        };

        row.try_into()
    }

    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, first_name, last_name, cpf, email, income, password,
                   zip_code, street
            FROM customer
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn delete(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let Some(id) = customer.id else {
            return Ok(());
        };

        sqlx::query("DELETE FROM customer WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(self.pool()).await?;
        Ok(())
    }
}
