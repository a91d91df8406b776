//! `list`, `show`, `create`, `update` and `delete`.

use clientele_core::{CustomerDraft, CustomerId};
use clientele_desk::{CustomerApi, CustomerProfile, CustomersPage, Outcome};

use super::{CommandError, Confirmation, ConsoleNotifier, check, finish};
use crate::output;

/// Print one page of customers matching `query`.
pub async fn list(
    api: impl CustomerApi,
    page_size: usize,
    query: &str,
    page: usize,
) -> Result<(), CommandError> {
    let mut customers = CustomersPage::new(api, ConsoleNotifier, page_size);
    finish(customers.load().await)?;

    customers.search(query);
    customers.go_to_page(page);

    let mut out = std::io::stdout().lock();
    output::write_listing(&mut out, &customers.listing())?;
    Ok(())
}

/// Print a customer with its addresses.
pub async fn show(api: impl CustomerApi, id: &CustomerId) -> Result<(), CommandError> {
    let mut profile = CustomerProfile::new(api, ConsoleNotifier);
    finish(profile.open(id).await)?;

    let customer = profile
        .customer()
        .ok_or_else(|| CommandError::CustomerNotFound(id.clone()))?;
    let mut out = std::io::stdout().lock();
    output::write_customer(&mut out, customer)?;
    Ok(())
}

/// Validate the form and create a customer.
pub async fn create(
    api: impl CustomerApi,
    name: String,
    email: String,
    phone: String,
) -> Result<(), CommandError> {
    let form = CustomerDraft { name, email, phone }.validate()?;

    let mut customers = CustomersPage::new(api, ConsoleNotifier, 1);
    finish(customers.add(form.into_new_customer()).await)
}

/// Change the given contact fields, keeping the rest.
pub async fn update(
    api: impl CustomerApi,
    id: &CustomerId,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
) -> Result<(), CommandError> {
    let mut customers = CustomersPage::new(api, ConsoleNotifier, 1);
    finish(customers.load().await)?;

    let existing = customers
        .customers()
        .iter()
        .find(|c| &c.id == id)
        .ok_or_else(|| CommandError::CustomerNotFound(id.clone()))?;

    let mut draft = CustomerDraft::from_customer(existing);
    if let Some(name) = name {
        draft.name = name;
    }
    if let Some(email) = email {
        draft.email = email;
    }
    if let Some(phone) = phone {
        draft.phone = phone;
    }
    let form = draft.validate()?;

    match check(customers.edit(id, form).await)? {
        Outcome::Unchanged => Err(CommandError::CustomerNotFound(id.clone())),
        _ => Ok(()),
    }
}

/// Delete a customer after confirmation.
pub async fn delete(
    api: impl CustomerApi,
    id: &CustomerId,
    confirmation: Confirmation,
) -> Result<(), CommandError> {
    let mut customers = CustomersPage::new(api, ConsoleNotifier, 1);
    if check(customers.delete(id, &confirmation).await)? == Outcome::Cancelled {
        tracing::info!(customer_id = %id, "Delete cancelled");
    }
    Ok(())
}
