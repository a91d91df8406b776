//! Search + pagination state for the customer list.
//!
//! [`ListState`] is an immutable value. Each user action produces a new
//! state, and [`recompute`] derives the visible listing from the customer
//! collection and a state. Nothing is cached, so recomputing with the same
//! inputs always yields the same listing.

use crate::pagination::{PageState, paginate, total_pages};
use crate::search::filter_customers;
use crate::types::Customer;

/// Current query and page of the customer list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListState {
    query: String,
    page: PageState,
}

impl ListState {
    /// Empty query, page 1, with the given page size.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            page: PageState::new(page_size),
        }
    }

    /// The active search query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The requested page.
    #[must_use]
    pub const fn page(&self) -> PageState {
        self.page
    }

    /// New query; always resets to page 1.
    #[must_use]
    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: self.page.first(),
        }
    }

    /// Next page of `listing`, or unchanged on the last page.
    #[must_use]
    pub fn next_page(&self, listing: &CustomerListing<'_>) -> Self {
        self.with_page(self.page.go_to(listing.page, listing.total_pages).next(listing.total_pages))
    }

    /// Previous page of `listing`, or unchanged on page 1.
    #[must_use]
    pub fn previous_page(&self, listing: &CustomerListing<'_>) -> Self {
        self.with_page(self.page.go_to(listing.page, listing.total_pages).previous())
    }

    /// Jump to `page`, clamped to the pages of `listing`.
    #[must_use]
    pub fn go_to_page(&self, page: usize, listing: &CustomerListing<'_>) -> Self {
        self.with_page(self.page.go_to(page, listing.total_pages))
    }

    fn with_page(&self, page: PageState) -> Self {
        Self {
            query: self.query.clone(),
            page,
        }
    }
}

/// The derived view of the customer list for one [`ListState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerListing<'a> {
    /// Every customer matching the query, in collection order.
    pub matches: Vec<&'a Customer>,
    /// Page actually shown (the requested page clamped to `total_pages`).
    pub page: usize,
    /// `ceil(matches / page_size)`.
    pub total_pages: usize,
    /// Items per page.
    pub page_size: usize,
}

impl<'a> CustomerListing<'a> {
    /// Customers on the current page.
    #[must_use]
    pub fn visible(&self) -> &[&'a Customer] {
        let state = PageState::new(self.page_size).go_to(self.page, self.total_pages);
        paginate(&self.matches, state).items
    }

    /// Whether nothing matched the query.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Filter `customers` by the state's query and cut the requested page.
#[must_use]
pub fn recompute<'a>(customers: &'a [Customer], state: &ListState) -> CustomerListing<'a> {
    let matches = filter_customers(customers, &state.query);
    let total_pages = total_pages(matches.len(), state.page.size());
    let page = state.page.clamped(total_pages).current();

    CustomerListing {
        matches,
        page,
        total_pages,
        page_size: state.page.size(),
    }
}
