//! Clientele desk: the customer workflows behind the `crm` frontend.
//!
//! This crate talks to the customer REST service and drives the list and
//! profile screens:
//! - [`service`] - `reqwest` client and the [`CustomerApi`] seam
//! - [`pages`] - list and profile flows with notifications and rollback
//! - [`debounce`] - settles keystroke-level search input
//! - [`config`] - environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod debounce;
pub mod error;
pub mod notify;
pub mod pages;
pub mod service;

pub use config::{ConfigError, DeskConfig, LogFormat};
pub use debounce::DebouncedQueries;
pub use error::AppError;
pub use notify::{
    AutoConfirm, Confirm, Level, Notification, Notifier, RecordingNotifier, TracingNotifier,
};
pub use pages::{CustomerProfile, CustomersPage, Outcome};
pub use service::{CustomerApi, CustomerService, ServiceError};
