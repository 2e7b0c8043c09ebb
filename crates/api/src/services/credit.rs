//! Credit service.

use tracing::instrument;

use credit_application_core::{CreditCode, CustomerId};

use super::rules;
use super::{BusinessRule, Clock, CustomerService, ServiceError};
use crate::db::{CreditStore, RepositoryError};
use crate::models::{Credit, CustomerRef};

/// Credit application operations.
pub struct CreditService<'a> {
    credits: &'a dyn CreditStore,
    customers: CustomerService<'a>,
    clock: &'a dyn Clock,
}

impl<'a> CreditService<'a> {
    /// Create a new credit service.
    #[must_use]
    pub const fn new(
        credits: &'a dyn CreditStore,
        customers: CustomerService<'a>,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            credits,
            customers,
            clock,
        }
    }

    /// Persist a new credit for an existing customer.
    ///
    /// The customer reference on `credit` is replaced by the stored customer,
    /// so only its id is taken from the caller.
    ///
    /// # Errors
    ///
    /// Returns `BusinessRule::InvalidInstallmentDate` if the first installment
    /// is not before today plus three months.
    /// Returns `ServiceError::CustomerNotFound` if the owner does not exist.
    #[instrument(skip(self, credit), fields(credit_code = %credit.credit_code))]
    pub async fn save(&self, mut credit: Credit) -> Result<Credit, ServiceError> {
        let today = self.clock.today();
        if !rules::is_valid_first_installment(credit.day_first_installment, today) {
            tracing::warn!(
                day_first_installment = %credit.day_first_installment,
                %today,
                "First installment outside window"
            );
            return Err(BusinessRule::InvalidInstallmentDate.into());
        }

        let customer_id = credit.customer.id().ok_or(RepositoryError::NotFound)?;
        let customer = self.customers.find_by_id(customer_id).await?;
        credit.customer = CustomerRef::from(customer);

        let saved = self.credits.create(credit).await?;

        tracing::info!(%customer_id, credit_code = %saved.credit_code, "Credit saved");
        Ok(saved)
    }

    /// List the credits of an existing customer.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::CustomerNotFound` if the customer does not exist.
    #[instrument(skip(self))]
    pub async fn find_all_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Credit>, ServiceError> {
        self.customers.find_by_id(customer_id).await?;
        Ok(self.credits.list_by_customer(customer_id).await?)
    }

    /// Get a credit by code on behalf of a customer.
    ///
    /// # Errors
    ///
    /// Returns `BusinessRule::UnknownCreditCode` if no credit has this code.
    /// Returns `ServiceError::Ownership` if the credit belongs to someone else.
    #[instrument(skip(self))]
    pub async fn find_by_credit_code(
        &self,
        customer_id: CustomerId,
        code: CreditCode,
    ) -> Result<Credit, ServiceError> {
        let credit = self
            .credits
            .get_by_code(code)
            .await?
            .ok_or(BusinessRule::UnknownCreditCode(code))?;

        if !rules::is_owned_by(&credit, customer_id) {
            tracing::warn!(%customer_id, credit_code = %code, "Credit requested by non-owner");
            return Err(ServiceError::Ownership);
        }

        Ok(credit)
    }
}
