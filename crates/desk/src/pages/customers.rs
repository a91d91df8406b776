//! Customer list page.

use tracing::instrument;

use clientele_core::{
    Customer, CustomerId, CustomerListing, ListState, NewCustomer, ValidCustomer, recompute,
};

use super::{CONFIRM_TITLE, ERROR, Outcome, SUCCESS};
use crate::error::AppError;
use crate::notify::{Confirm, Notification, Notifier};
use crate::service::CustomerApi;

/// The customer list: full collection, current search and page.
pub struct CustomersPage<A, N> {
    api: A,
    notifier: N,
    customers: Vec<Customer>,
    state: ListState,
}

impl<A: CustomerApi, N: Notifier> CustomersPage<A, N> {
    /// Empty page; call [`load`](Self::load) to fetch customers.
    #[must_use]
    pub fn new(api: A, notifier: N, page_size: usize) -> Self {
        Self {
            api,
            notifier,
            customers: Vec::new(),
            state: ListState::new(page_size),
        }
    }

    /// Every loaded customer, unfiltered.
    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Current search and page.
    #[must_use]
    pub const fn state(&self) -> &ListState {
        &self.state
    }

    /// The filtered, paginated view for the current state.
    #[must_use]
    pub fn listing(&self) -> CustomerListing<'_> {
        recompute(&self.customers, &self.state)
    }

    /// Fetch every customer from the service.
    ///
    /// The active search is kept and re-applied. On failure the previously
    /// loaded customers stay in place.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Outcome {
        match self.api.list_customers().await {
            Ok(customers) => {
                tracing::debug!(count = customers.len(), "Customers loaded");
                self.customers = customers;
                Outcome::Saved
            }
            Err(e) => {
                AppError::from(e).report("Failed to load customers");
                self.notifier
                    .notify(Notification::error(ERROR, "Failed to load customers."));
                Outcome::Failed
            }
        }
    }

    /// Apply a settled search query; resets to page 1.
    pub fn search(&mut self, query: impl Into<String>) {
        self.state = self.state.with_query(query);
    }

    /// Move to the next page, if any.
    pub fn next_page(&mut self) {
        let next = self.state.next_page(&self.listing());
        self.state = next;
    }

    /// Move to the previous page, if any.
    pub fn previous_page(&mut self) {
        let previous = self.state.previous_page(&self.listing());
        self.state = previous;
    }

    /// Jump to a page, clamped to the available pages.
    pub fn go_to_page(&mut self, page: usize) {
        let target = self.state.go_to_page(page, &self.listing());
        self.state = target;
    }

    /// Create a customer, then reload the list.
    #[instrument(skip(self, customer), fields(name = %customer.name))]
    pub async fn add(&mut self, customer: NewCustomer) -> Outcome {
        match self.api.create_customer(&customer).await {
            Ok(created) => {
                tracing::info!(customer_id = %created.id, "Customer added");
                self.notifier
                    .notify(Notification::success(SUCCESS, "Customer successfully added."));
                // The toast already reported success; a failed reload notifies on its own.
                let _ = self.load().await;
                Outcome::Saved
            }
            Err(e) => {
                AppError::from(e).report("Failed to add customer");
                self.notifier
                    .notify(Notification::error(ERROR, "Failed to add the customer."));
                Outcome::Failed
            }
        }
    }

    /// Overwrite name, email and phone of a loaded customer.
    ///
    /// The local copy is replaced before the request; if the service
    /// rejects the update the previous copy is restored.
    #[instrument(skip(self, form), fields(customer_id = %id))]
    pub async fn edit(&mut self, id: &CustomerId, form: ValidCustomer) -> Outcome {
        let Some(index) = self.customers.iter().position(|c| &c.id == id) else {
            tracing::debug!("Customer not loaded, nothing to edit");
            return Outcome::Unchanged;
        };
        let Some(slot) = self.customers.get_mut(index) else {
            return Outcome::Unchanged;
        };

        let updated = form.apply_to(slot);
        let previous = std::mem::replace(slot, updated.clone());

        match self.api.update_customer(id, &updated).await {
            Ok(confirmed) => {
                if let Some(slot) = self.customers.get_mut(index) {
                    *slot = confirmed;
                }
                self.notifier
                    .notify(Notification::success(SUCCESS, "Customer updated successfully."));
                Outcome::Saved
            }
            Err(e) => {
                if let Some(slot) = self.customers.get_mut(index) {
                    *slot = previous;
                }
                AppError::from(e).report("Failed to update customer");
                self.notifier
                    .notify(Notification::error(ERROR, "Failed to update the customer."));
                Outcome::Failed
            }
        }
    }

    /// Delete a customer after confirmation, then reload the list.
    #[instrument(skip(self, confirm), fields(customer_id = %id))]
    pub async fn delete(&mut self, id: &CustomerId, confirm: &impl Confirm) -> Outcome {
        if !confirm.confirm(
            CONFIRM_TITLE,
            "This action will permanently delete the customer.",
        ) {
            return Outcome::Cancelled;
        }

        match self.api.delete_customer(id).await {
            Ok(()) => {
                self.notifier
                    .notify(Notification::success(SUCCESS, "Customer deleted successfully."));
                let _ = self.load().await;
                Outcome::Saved
            }
            Err(e) => {
                AppError::from(e).report("Failed to delete customer");
                self.notifier
                    .notify(Notification::error(ERROR, "Failed to delete the customer."));
                Outcome::Failed
            }
        }
    }
}
