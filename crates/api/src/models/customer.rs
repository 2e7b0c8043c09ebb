//! Customer domain types.

use rust_decimal::Decimal;

use credit_application_core::{CustomerId, Email, TaxId};

/// Postal address embedded in a customer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub zip_code: String,
    pub street: String,
}

/// A customer who can apply for credit.
///
/// `id` is `None` until the customer has been saved; the store assigns it.
#[derive(Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
    /// CPF; unique across all customers.
    pub tax_id: TaxId,
    pub email: Email,
    /// Declared income used for credit analysis.
    pub income: Decimal,
    /// Stored credential (an Argon2id PHC string when written by the API).
    pub password: String,
    pub address: Address,
}

impl Customer {
    /// Apply a partial update. Identity, tax id, email and credential are
    /// never touched.
    pub fn apply(&mut self, update: CustomerUpdate) {
        self.first_name = update.first_name;
        self.last_name = update.last_name;
        self.income = update.income;
        self.address = Address {
            zip_code: update.zip_code,
            street: update.street,
        };
    }
}

impl std::fmt::Debug for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Customer")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("tax_id", &self.tax_id)
            .field("email", &self.email)
            .field("income", &self.income)
            .field("password", &"[REDACTED]")
            .field("address", &self.address)
            .finish()
    }
}

/// Mutable customer fields accepted by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub first_name: String,
    pub last_name: String,
    pub income: Decimal,
    pub zip_code: String,
    pub street: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// A valid, unsaved customer used across the crate's tests.
    pub(crate) fn build_customer() -> Customer {
        Customer {
            id: None,
            first_name: "João".to_string(),
            last_name: "Silva".to_string(),
            tax_id: TaxId::parse("27571884020").unwrap(),
            email: Email::parse("joao.silva@example.com").unwrap(),
            income: Decimal::new(500_000, 1),
            password: "1234".to_string(),
            address: Address {
                zip_code: "12345-678".to_string(),
                street: "Rua das Flores, 123".to_string(),
            },
        }
    }

    #[test]
    fn test_apply_keeps_identity_fields() {
        let mut customer = build_customer();
        customer.id = Some(CustomerId::new(3));

        customer.apply(CustomerUpdate {
            first_name: "JoãoUpdate".to_string(),
            last_name: "SilvaUpdate".to_string(),
            income: Decimal::new(5_000, 0),
            zip_code: "12345-678".to_string(),
            street: "Rua Updated".to_string(),
        });

        assert_eq!(customer.id, Some(CustomerId::new(3)));
        assert_eq!(customer.tax_id.as_str(), "27571884020");
        assert_eq!(customer.email.as_str(), "joao.silva@example.com");
        assert_eq!(customer.first_name, "JoãoUpdate");
        assert_eq!(customer.address.street, "Rua Updated");
    }

    #[test]
    fn test_debug_redacts_password() {
        let mut customer = build_customer();
        customer.password = "super-secret-value".to_string();
        let debug_output = format!("{customer:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-value"));
    }
}
