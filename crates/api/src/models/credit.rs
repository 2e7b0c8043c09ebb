//! Credit domain types.

use chrono::NaiveDate;

use credit_application_core::{CreditCode, CreditId, CreditStatus, CustomerId, Money};

use super::Customer;

/// The customer a credit belongs to.
///
/// Callers submit only an id; the credit service swaps it for the stored
/// customer before persisting, so no caller-supplied customer fields ever
/// reach storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerRef {
    /// Reference by id, not yet resolved.
    Id(CustomerId),
    /// Fully loaded customer record.
    Loaded(Box<Customer>),
}

impl CustomerRef {
    /// The referenced customer's id, if known.
    #[must_use]
    pub fn id(&self) -> Option<CustomerId> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Loaded(customer) => customer.id,
        }
    }

    /// The loaded customer, if the reference has been resolved.
    #[must_use]
    pub fn customer(&self) -> Option<&Customer> {
        match self {
            Self::Id(_) => None,
            Self::Loaded(customer) => Some(customer),
        }
    }
}

impl From<Customer> for CustomerRef {
    fn from(customer: Customer) -> Self {
        Self::Loaded(Box::new(customer))
    }
}

/// A credit application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credit {
    /// Internal sequence, `None` until persisted.
    pub id: Option<CreditId>,
    /// Public natural code, fixed at construction.
    pub credit_code: CreditCode,
    pub credit_value: Money,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub status: CreditStatus,
    pub customer: CustomerRef,
}

impl Credit {
    /// Build a new, unsaved credit for a customer id with a fresh code.
    #[must_use]
    pub fn new(
        credit_value: Money,
        day_first_installment: NaiveDate,
        number_of_installments: i32,
        customer_id: CustomerId,
    ) -> Self {
        Self {
            id: None,
            credit_code: CreditCode::generate(),
            credit_value,
            day_first_installment,
            number_of_installments,
            status: CreditStatus::InProgress,
            customer: CustomerRef::Id(customer_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::customer::tests::build_customer;

    #[test]
    fn test_new_credit_defaults() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap_or_default();
        let credit = Credit::new(Money::ZERO, day, 12, CustomerId::new(1));

        assert_eq!(credit.id, None);
        assert_eq!(credit.status, CreditStatus::InProgress);
        assert_eq!(credit.customer, CustomerRef::Id(CustomerId::new(1)));
        assert_ne!(
            credit.credit_code,
            Credit::new(Money::ZERO, day, 12, CustomerId::new(1)).credit_code
        );
    }

    #[test]
    fn test_customer_ref_id() {
        let mut customer = build_customer();
        customer.id = Some(CustomerId::new(9));
        customer.income = Decimal::ONE;

        let loaded = CustomerRef::from(customer);
        assert_eq!(loaded.id(), Some(CustomerId::new(9)));
        assert!(loaded.customer().is_some());
        assert!(CustomerRef::Id(CustomerId::new(2)).customer().is_none());
    }
}
