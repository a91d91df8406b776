//! Case-insensitive customer search.

use crate::types::Customer;

/// Customers whose name, email or phone contains `query`, ignoring case.
///
/// Input order is preserved. An empty query matches every customer; a query
/// that matches nothing yields an empty vector.
#[must_use]
pub fn filter_customers<'a>(customers: &'a [Customer], query: &str) -> Vec<&'a Customer> {
    let lowered = query.to_lowercase();
    customers
        .iter()
        .filter(|customer| customer.matches_lowered(&lowered))
        .collect()
}
