//! In-process storage.
//!
//! Backs the HTTP tests and `CREDIT_STORE=memory`. Behaves like the
//! `PostgreSQL` store: the tax id is unique, ids are assigned sequentially,
//! credits keep insertion order and are returned with their owner loaded when
//! it still exists.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use credit_application_core::{CreditCode, CreditId, CustomerId};

use super::{CreditStore, CustomerStore, RepositoryError};
use crate::models::{Credit, Customer, CustomerRef};

/// In-memory implementation of both stores.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    customers: BTreeMap<CustomerId, Customer>,
    credits: Vec<Credit>,
    last_customer_id: i64,
    last_credit_id: i64,
}

impl Tables {
    /// Attach the current owner record to a stored credit.
    fn resolve(&self, credit: &Credit) -> Credit {
        let customer = credit
            .customer
            .id()
            .and_then(|id| self.customers.get(&id))
            .map_or_else(|| credit.customer.clone(), |c| CustomerRef::from(c.clone()));

        Credit {
            customer,
            ..credit.clone()
        }
    }
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn save(&self, mut customer: Customer) -> Result<Customer, RepositoryError> {
        let mut tables = self.inner.write().await;

        match customer.id {
            None => {
                if tables
                    .customers
                    .values()
                    .any(|c| c.tax_id == customer.tax_id)
                {
                    return Err(RepositoryError::Conflict(format!(
                        "cpf {} already registered",
                        customer.tax_id
                    )));
                }
                tables.last_customer_id += 1;
                let id = CustomerId::new(tables.last_customer_id);
                customer.id = Some(id);
                tables.customers.insert(id, customer.clone());
            }
            Some(id) => {
                let stored = tables
                    .customers
                    .get_mut(&id)
                    .ok_or(RepositoryError::NotFound)?;
                customer.tax_id = stored.tax_id.clone();
                *stored = customer.clone();
            }
        }

        Ok(customer)
    }

    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        Ok(self.inner.read().await.customers.get(&id).cloned())
    }

    async fn delete(&self, customer: &Customer) -> Result<(), RepositoryError> {
        if let Some(id) = customer.id {
            self.inner.write().await.customers.remove(&id);
        }
        Ok(())
    }
}

#[async_trait]
impl CreditStore for MemoryStore {
    async fn create(&self, credit: Credit) -> Result<Credit, RepositoryError> {
        let mut tables = self.inner.write().await;

        if tables
            .credits
            .iter()
            .any(|c| c.credit_code == credit.credit_code)
        {
            return Err(RepositoryError::Conflict(format!(
                "credit code {} already exists",
                credit.credit_code
            )));
        }

        let customer_id = credit.customer.id().ok_or(RepositoryError::NotFound)?;

        tables.last_credit_id += 1;
        let id = CreditId::new(tables.last_credit_id);
        tables.credits.push(Credit {
            id: Some(id),
            customer: CustomerRef::Id(customer_id),
            ..credit.clone()
        });

        Ok(Credit {
            id: Some(id),
            ..credit
        })
    }

    async fn list_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Credit>, RepositoryError> {
        let tables = self.inner.read().await;
        Ok(tables
            .credits
            .iter()
            .filter(|c| c.customer.id() == Some(customer_id))
            .map(|c| tables.resolve(c))
            .collect())
    }

    async fn get_by_code(&self, code: CreditCode) -> Result<Option<Credit>, RepositoryError> {
        let tables = self.inner.read().await;
        Ok(tables
            .credits
            .iter()
            .find(|c| c.credit_code == code)
            .map(|c| tables.resolve(c)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use credit_application_core::{Money, TaxId};

    use super::*;
    use crate::models::customer::tests::build_customer;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let first = store.save(build_customer()).await.unwrap();

        let mut other = build_customer();
        other.tax_id = TaxId::parse("52998224725").unwrap();
        let second = store.save(other).await.unwrap();

        assert_eq!(first.id, Some(CustomerId::new(1)));
        assert_eq!(second.id, Some(CustomerId::new(2)));
    }

    #[tokio::test]
    async fn test_duplicate_cpf_conflicts() {
        let store = MemoryStore::new();
        store.save(build_customer()).await.unwrap();

        let result = store.save(build_customer()).await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_stored_cpf() {
        let store = MemoryStore::new();
        let mut saved = store.save(build_customer()).await.unwrap();

        saved.first_name = "Maria".to_string();
        saved.tax_id = TaxId::parse("52998224725").unwrap();
        let updated = store.save(saved).await.unwrap();

        assert_eq!(updated.first_name, "Maria");
        assert_eq!(updated.tax_id.as_str(), "27571884020");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let mut customer = build_customer();
        customer.id = Some(CustomerId::new(99));

        let result = store.save(customer).await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_credits_keep_insertion_order_and_resolve_owner() {
        let store = MemoryStore::new();
        let owner = store.save(build_customer()).await.unwrap();
        let owner_id = owner.id.unwrap();

        let first = store
            .create(Credit::new(Money::ZERO, day(), 1, owner_id))
            .await
            .unwrap();
        let second = store
            .create(Credit::new(Money::ZERO, day(), 2, owner_id))
            .await
            .unwrap();
        store
            .create(Credit::new(Money::ZERO, day(), 3, CustomerId::new(42)))
            .await
            .unwrap();

        let listed = store.list_by_customer(owner_id).await.unwrap();
        let codes: Vec<_> = listed.iter().map(|c| c.credit_code).collect();
        assert_eq!(codes, vec![first.credit_code, second.credit_code]);
        assert_eq!(listed[0].customer.customer(), Some(&owner));
    }

    #[tokio::test]
    async fn test_deleted_owner_leaves_orphan_credit() {
        let store = MemoryStore::new();
        let owner = store.save(build_customer()).await.unwrap();
        let owner_id = owner.id.unwrap();
        let credit = store
            .create(Credit::new(Money::ZERO, day(), 6, owner_id))
            .await
            .unwrap();

        store.delete(&owner).await.unwrap();

        let orphan = store.get_by_code(credit.credit_code).await.unwrap().unwrap();
        assert_eq!(orphan.customer, CustomerRef::Id(owner_id));
        assert!(store.get(owner_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_unknown_code() {
        let store = MemoryStore::new();
        let found = store.get_by_code(CreditCode::generate()).await.unwrap();
        assert!(found.is_none());
    }
}
