//! `reqwest` implementation of [`CustomerApi`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use clientele_core::{Customer, CustomerId, NewCustomer};

use super::{CustomerApi, ServiceError};
use crate::config::DeskConfig;

/// Collection path segment.
const CUSTOMERS: &str = "customers";

/// Longest error body kept in [`ServiceError::Api`].
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP client for the customer REST service.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CustomerService {
    inner: Arc<CustomerServiceInner>,
}

struct CustomerServiceInner {
    client: reqwest::Client,
    base_url: Url,
}

impl CustomerService {
    /// Create a client from the desk configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &DeskConfig) -> Result<Self, ServiceError> {
        Self::with_base_url(config.api_base_url.clone(), config.http_timeout)
    }

    /// Create a client for an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn with_base_url(base_url: Url, timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(CustomerServiceInner { client, base_url }),
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// `{base}/customers`
    fn collection_url(&self) -> Result<Url, ServiceError> {
        self.url_with_segments(&[CUSTOMERS])
    }

    /// `{base}/customers/{id}`, with the ID percent-encoded.
    fn customer_url(&self, id: &CustomerId) -> Result<Url, ServiceError> {
        self.url_with_segments(&[CUSTOMERS, id.as_str()])
    }

    fn url_with_segments(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ServiceError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Decode a successful JSON response or turn the status into an error.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
        subject: &str,
    ) -> Result<T, ServiceError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ServiceError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response, subject).await)
    }

    /// Map an error response to a [`ServiceError`].
    async fn parse_error(response: reqwest::Response, subject: &str) -> ServiceError {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return ServiceError::NotFound(subject.to_string());
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect()
        };

        ServiceError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

impl CustomerApi for CustomerService {
    #[instrument(skip(self))]
    async fn list_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        let url = self.collection_url()?;
        let response = self.inner.client.get(url).send().await?;
        let customers: Vec<Customer> = Self::handle_response(response, "customers").await?;
        tracing::debug!(count = customers.len(), "Fetched customers");
        Ok(customers)
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, ServiceError> {
        let url = self.customer_url(id)?;
        let response = self.inner.client.get(url).send().await?;
        Self::handle_response(response, &format!("customer {id}")).await
    }

    #[instrument(skip(self, customer), fields(name = %customer.name))]
    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, ServiceError> {
        let url = self.collection_url()?;
        let response = self.inner.client.post(url).json(customer).send().await?;
        let created: Customer = Self::handle_response(response, "customers").await?;
        tracing::info!(customer_id = %created.id, "Customer created");
        Ok(created)
    }

    #[instrument(skip(self, customer), fields(customer_id = %id, addresses = customer.addresses.len()))]
    async fn update_customer(
        &self,
        id: &CustomerId,
        customer: &Customer,
    ) -> Result<Customer, ServiceError> {
        let url = self.customer_url(id)?;
        let response = self.inner.client.put(url).json(customer).send().await?;
        let updated = Self::handle_response(response, &format!("customer {id}")).await?;
        tracing::info!("Customer updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn delete_customer(&self, id: &CustomerId) -> Result<(), ServiceError> {
        let url = self.customer_url(id)?;
        let response = self.inner.client.delete(url).send().await?;

        if response.status().is_success() {
            tracing::info!("Customer deleted");
            return Ok(());
        }

        Err(Self::parse_error(response, &format!("customer {id}")).await)
    }
}
