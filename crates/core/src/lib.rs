//! Clientele Core - customer types and client-local list logic.
//!
//! This crate provides everything the Clientele console computes locally:
//! - [`types`] - Customer/address documents, IDs, email, form drafts
//! - [`search`] - Case-insensitive customer search
//! - [`pagination`] - Fixed-size page slicing and clamped navigation
//! - [`listing`] - Immutable list state and the recompute step tying both together
//! - [`debounce`] - Trailing debounce buffer for search input
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! client, no async runtime. The REST client and the CRUD flows live in
//! `clientele-desk`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod debounce;
pub mod listing;
pub mod pagination;
pub mod search;
pub mod types;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use listing::{CustomerListing, ListState, recompute};
pub use pagination::{DEFAULT_PAGE_SIZE, Page, PageState, page_numbers, paginate, total_pages};
pub use search::filter_customers;
pub use types::*;
