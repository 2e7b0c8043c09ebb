//! Credit Application Core - Shared domain types.
//!
//! This crate provides the value types used across the credit application
//! workspace:
//! - `api` - HTTP service for customers and their credit applications
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. Validation that depends only on a value's shape (email structure,
//! CPF check digits, currency scale) lives next to the type.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, credit codes, emails, tax ids,
//!   money and credit statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
