//! Screen models for the customer desk.
//!
//! - [`CustomersPage`] - searchable, paginated customer list with
//!   create/edit/delete
//! - [`CustomerProfile`] - one customer and its addresses
//!
//! Every flow follows the same policy: validate locally, apply the change
//! to local state, persist the whole customer document, and on failure
//! restore the previous local state, log, and notify. Service errors are
//! never propagated to the caller; the returned [`Outcome`] says what
//! happened.

mod customers;
mod profile;
#[cfg(test)]
mod testing;

pub use customers::CustomersPage;
pub use profile::CustomerProfile;

/// Result of a page flow.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The service accepted the change (or the data was loaded).
    Saved,
    /// The service call failed; local state was restored.
    Failed,
    /// The user declined the confirmation prompt.
    Cancelled,
    /// Nothing to do (e.g. the target no longer exists locally).
    Unchanged,
}

impl Outcome {
    /// Whether the flow ended in a service failure.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failed)
    }
}

const SUCCESS: &str = "Success";
const ERROR: &str = "Error";
const CONFIRM_TITLE: &str = "Are you sure?";
