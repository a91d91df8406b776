//! Unified error handling for the desk.

use thiserror::Error;

use clientele_core::{CustomerError, ValidationError};

use crate::config::ConfigError;
use crate::service::ServiceError;

/// Application-level error type for the desk.
#[derive(Debug, Error)]
pub enum AppError {
    /// Customer service call failed.
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Form input rejected before submission.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Local customer mutation failed.
    #[error("Customer error: {0}")]
    Customer(#[from] CustomerError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found locally.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Log the error and forward server-side failures to Sentry.
    ///
    /// Sentry capture is a no-op when Sentry was never initialised.
    pub fn report(&self, context: &str) {
        if matches!(self, Self::Service(_)) {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "{context}"
            );
        } else {
            tracing::warn!(error = %self, "{context}");
        }
    }
}
