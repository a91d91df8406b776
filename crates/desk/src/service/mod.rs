//! Customer REST service client.
//!
//! The service owns customer documents; this client only reads and writes
//! whole documents:
//!
//! - `GET /customers` - every customer (no server-side paging)
//! - `GET /customers/{id}` - one customer
//! - `POST /customers` - create, the service assigns the ID
//! - `PUT /customers/{id}` - replace the whole document, addresses included
//! - `DELETE /customers/{id}` - remove
//!
//! [`CustomerApi`] is the seam the desk pages are written against, so they
//! can run over the HTTP client or an in-memory double.

mod client;

pub use client::CustomerService;

use std::future::Future;

use clientele_core::{Customer, CustomerId, NewCustomer};
use thiserror::Error;

/// Errors that can occur when talking to the customer service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// HTTP request failed (connection refused, timeout, TLS...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Customer does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request URL could not be built from the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Operations offered by the customer service.
pub trait CustomerApi {
    /// Fetch every customer.
    fn list_customers(&self) -> impl Future<Output = Result<Vec<Customer>, ServiceError>> + Send;

    /// Fetch one customer by ID.
    fn get_customer(
        &self,
        id: &CustomerId,
    ) -> impl Future<Output = Result<Customer, ServiceError>> + Send;

    /// Create a customer and return it with its assigned ID.
    fn create_customer(
        &self,
        customer: &NewCustomer,
    ) -> impl Future<Output = Result<Customer, ServiceError>> + Send;

    /// Replace a customer document.
    fn update_customer(
        &self,
        id: &CustomerId,
        customer: &Customer,
    ) -> impl Future<Output = Result<Customer, ServiceError>> + Send;

    /// Delete a customer.
    fn delete_customer(
        &self,
        id: &CustomerId,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display() {
        let err = ServiceError::NotFound("customer 42".to_string());
        assert_eq!(err.to_string(), "Not found: customer 42");

        let err = ServiceError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - boom");
    }
}
