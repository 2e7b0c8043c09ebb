//! Business logic services.
//!
//! # Services
//!
//! - `customer` - Customer lifecycle (create, lookup, update, delete)
//! - `credit` - Credit applications (create, list, lookup by code)
//! - `rules` - Pure validation rules shared by the services
//! - `clock` - Source of "today" for the installment date window
//! - `password` - Credential hashing
//!
//! Services borrow their stores from the application state and are built
//! per request.

pub mod clock;
pub mod credit;
pub mod customer;
mod error;
pub mod password;
pub mod rules;
#[cfg(test)]
mod test_support;

pub use clock::{Clock, FixedClock, SystemClock};
pub use credit::CreditService;
pub use customer::CustomerService;
pub use error::{BusinessRule, ServiceError};
