//! Service error types.

use thiserror::Error;

use credit_application_core::{CreditCode, CustomerId};

use crate::db::RepositoryError;

/// A business rule that rejected an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusinessRule {
    /// The first installment falls outside the allowed window.
    #[error("Invalid Date")]
    InvalidInstallmentDate,

    /// No credit has the requested code.
    #[error("Credit code {0} not found")]
    UnknownCreditCode(CreditCode),
}

/// Errors that can occur during service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No customer has the requested id.
    #[error("Id {0} not found")]
    CustomerNotFound(CustomerId),

    /// A business rule was violated.
    #[error(transparent)]
    Business(#[from] BusinessRule),

    /// The credit belongs to another customer. The message is kept generic
    /// so it does not confirm the credit exists.
    #[error("Contact admin")]
    Ownership,

    /// A uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
