//! Store wrapper that counts writes, for asserting a failed operation
//! touched nothing.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use credit_application_core::{CreditCode, CustomerId};

use crate::db::{CreditStore, CustomerStore, MemoryStore, RepositoryError};
use crate::models::{Credit, Customer};

#[derive(Debug, Default)]
pub(crate) struct RecordingStore {
    inner: MemoryStore,
    writes: AtomicUsize,
}

impl RecordingStore {
    /// Number of write calls (save, delete, create) received.
    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CustomerStore for RecordingStore {
    async fn save(&self, customer: Customer) -> Result<Customer, RepositoryError> {
        self.record();
        self.inner.save(customer).await
    }

    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        self.inner.get(id).await
    }

    async fn delete(&self, customer: &Customer) -> Result<(), RepositoryError> {
        self.record();
        CustomerStore::delete(&self.inner, customer).await
    }
}

#[async_trait]
impl CreditStore for RecordingStore {
    async fn create(&self, credit: Credit) -> Result<Credit, RepositoryError> {
        self.record();
        self.inner.create(credit).await
    }

    async fn list_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Credit>, RepositoryError> {
        self.inner.list_by_customer(customer_id).await
    }

    async fn get_by_code(&self, code: CreditCode) -> Result<Option<Credit>, RepositoryError> {
        self.inner.get_by_code(code).await
    }
}
