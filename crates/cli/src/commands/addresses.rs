//! `address add`, `address update`, `address delete` and
//! `address set-primary`.

use clientele_core::{AddressDraft, AddressId, CustomerId};
use clientele_desk::{CustomerApi, CustomerProfile, Outcome};

use super::{AddressFields, CommandError, Confirmation, ConsoleNotifier, check, finish};

/// Load the customer's profile or fail the command.
async fn open<A: CustomerApi>(
    api: A,
    id: &CustomerId,
) -> Result<CustomerProfile<A, ConsoleNotifier>, CommandError> {
    let mut profile = CustomerProfile::new(api, ConsoleNotifier);
    finish(profile.open(id).await)?;
    Ok(profile)
}

pub async fn add(
    api: impl CustomerApi,
    customer: &CustomerId,
    fields: AddressFields,
) -> Result<(), CommandError> {
    let mut profile = open(api, customer).await?;
    let draft = fields.apply(AddressDraft::default());
    finish(profile.add_address(&draft).await?)
}

pub async fn update(
    api: impl CustomerApi,
    customer: &CustomerId,
    address: &AddressId,
    fields: AddressFields,
) -> Result<(), CommandError> {
    let mut profile = open(api, customer).await?;
    let existing = profile
        .customer()
        .and_then(|c| c.address(address))
        .ok_or_else(|| CommandError::AddressNotFound(address.clone()))?;

    let draft = fields.apply(AddressDraft::from_address(existing));
    finish(profile.edit_address(address, &draft).await?)
}

pub async fn delete(
    api: impl CustomerApi,
    customer: &CustomerId,
    address: &AddressId,
    confirmation: Confirmation,
) -> Result<(), CommandError> {
    let mut profile = open(api, customer).await?;
    if check(profile.delete_address(address, &confirmation).await?)? == Outcome::Cancelled {
        tracing::info!(address_id = %address, "Delete cancelled");
    }
    Ok(())
}

pub async fn set_primary(
    api: impl CustomerApi,
    customer: &CustomerId,
    address: &AddressId,
) -> Result<(), CommandError> {
    let mut profile = open(api, customer).await?;
    finish(profile.toggle_primary(address).await?)
}
