//! Customer service.

use tracing::instrument;

use credit_application_core::CustomerId;

use super::ServiceError;
use crate::db::{CustomerStore, RepositoryError};
use crate::models::{Customer, CustomerUpdate};

/// Customer lifecycle operations.
#[derive(Clone, Copy)]
pub struct CustomerService<'a> {
    customers: &'a dyn CustomerStore,
}

impl<'a> CustomerService<'a> {
    /// Create a new customer service.
    #[must_use]
    pub const fn new(customers: &'a dyn CustomerStore) -> Self {
        Self { customers }
    }

    /// Create a customer (no id) or overwrite an existing one.
    ///
    /// Tax id uniqueness is left to the store; there is no check before the
    /// write.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Conflict` if the tax id is already registered.
    /// Returns `ServiceError::CustomerNotFound` if the customer's id does not exist.
    #[instrument(skip(self, customer), fields(customer_id = ?customer.id))]
    pub async fn save(&self, customer: Customer) -> Result<Customer, ServiceError> {
        let id = customer.id;
        let saved = self.customers.save(customer).await.map_err(|e| match e {
            RepositoryError::Conflict(msg) => ServiceError::Conflict(msg),
            RepositoryError::NotFound => id.map_or(
                ServiceError::Repository(RepositoryError::NotFound),
                ServiceError::CustomerNotFound,
            ),
            other => ServiceError::Repository(other),
        })?;

        tracing::info!(customer_id = ?saved.id, "Customer saved");
        Ok(saved)
    }

    /// Get a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::CustomerNotFound` if no customer has this id.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: CustomerId) -> Result<Customer, ServiceError> {
        self.customers
            .get(id)
            .await?
            .ok_or(ServiceError::CustomerNotFound(id))
    }

    /// Delete a customer. Its credits are left in place.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::CustomerNotFound` if no customer has this id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: CustomerId) -> Result<(), ServiceError> {
        let customer = self.find_by_id(id).await?;
        self.customers.delete(&customer).await?;

        tracing::info!(customer_id = %id, "Customer deleted");
        Ok(())
    }

    /// Apply a partial update to an existing customer.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::CustomerNotFound` if no customer has this id.
    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<Customer, ServiceError> {
        let mut customer = self.find_by_id(id).await?;
        customer.apply(update);
        self.save(customer).await
    }
}
