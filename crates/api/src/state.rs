//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::{CreditStore, CustomerStore, MemoryStore, PgStore};
use crate::services::{Clock, CreditService, CustomerService, SystemClock};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and hands out services bound to
/// the configured stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    customers: Arc<dyn CustomerStore>,
    credits: Arc<dyn CreditStore>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create a new application state from explicit stores and clock.
    #[must_use]
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        credits: Arc<dyn CreditStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                customers,
                credits,
                clock,
            }),
        }
    }

    /// State backed by `PostgreSQL`.
    #[must_use]
    pub fn postgres(store: PgStore) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store, Arc::new(SystemClock))
    }

    /// State backed by an in-memory store, with a custom clock.
    #[must_use]
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store, clock)
    }

    /// Customer service over the configured store.
    #[must_use]
    pub fn customer_service(&self) -> CustomerService<'_> {
        CustomerService::new(self.inner.customers.as_ref())
    }

    /// Credit service over the configured stores and clock.
    #[must_use]
    pub fn credit_service(&self) -> CreditService<'_> {
        CreditService::new(
            self.inner.credits.as_ref(),
            self.customer_service(),
            self.inner.clock.as_ref(),
        )
    }

    /// Today's date according to the configured clock.
    #[must_use]
    pub fn today(&self) -> chrono::NaiveDate {
        self.inner.clock.today()
    }

    /// Check that the customer store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be reached.
    pub async fn ping(&self) -> Result<(), crate::db::RepositoryError> {
        self.inner.customers.ping().await
    }
}
