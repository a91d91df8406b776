//! Core types for Clientele.
//!
//! This module provides the customer document model and type-safe wrappers
//! for identifiers and email addresses.

pub mod customer;
pub mod draft;
pub mod email;
pub mod id;

pub use customer::{Address, Customer, CustomerError, NO_PRIMARY_ADDRESS, NewCustomer};
pub use draft::{AddressDraft, CustomerDraft, ValidCustomer, ValidationError};
pub use email::{Email, EmailError};
pub use id::{AddressId, CustomerId};
