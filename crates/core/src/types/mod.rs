//! Core types for the credit application service.
//!
//! This module provides type-safe wrappers for the domain's value objects.

pub mod credit_code;
pub mod email;
pub mod id;
pub mod money;
pub mod status;
pub mod tax_id;

pub use credit_code::{CreditCode, CreditCodeError};
pub use email::{Email, EmailError};
pub use id::*;
pub use money::{Money, MoneyError};
pub use status::*;
pub use tax_id::{TaxId, TaxIdError};
