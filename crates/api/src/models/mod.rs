//! Domain models for customers and credits.
//!
//! These types are separate from both the database row types in [`crate::db`]
//! and the JSON request/response types in [`crate::routes`].

pub mod credit;
pub mod customer;

pub use credit::{Credit, CustomerRef};
pub use customer::{Address, Customer, CustomerUpdate};
