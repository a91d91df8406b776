//! Customer and address domain types.
//!
//! These mirror the JSON documents served by the customer REST service.
//! A customer owns its addresses; the address's `customer_id` is only a
//! back-reference and never used for lookups.

use serde::{Deserialize, Serialize};

use super::id::{AddressId, CustomerId};

/// Label shown when a customer has no primary address.
pub const NO_PRIMARY_ADDRESS: &str = "Not set";

/// Errors from local customer mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomerError {
    /// No address with this ID belongs to the customer.
    #[error("address {0} not found")]
    AddressNotFound(AddressId),
}

// =============================================================================
// Address
// =============================================================================

/// A postal address belonging to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    #[serde(rename = "customerID", default)]
    pub customer_id: CustomerId,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    pub country: String,
    #[serde(default)]
    pub full_address: String,
    #[serde(default)]
    pub is_primary: bool,
}

impl Address {
    /// Compose the one-line form of this address from its parts.
    ///
    /// Empty parts are skipped, so an address without a zip code renders
    /// as `"Main St 1, Springfield, IL, USA"`.
    #[must_use]
    pub fn compose_full_address(&self) -> String {
        let region = [self.state.trim(), self.zip_code.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        [
            self.street.trim(),
            self.city.trim(),
            region.as_str(),
            self.country.trim(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Recompute `full_address` from the other fields.
    pub fn refresh_full_address(&mut self) {
        self.full_address = self.compose_full_address();
    }

    /// Short label used in customer lists: `"{name}: {street}, {city}"`.
    #[must_use]
    pub fn short_label(&self) -> String {
        format!("{}: {}, {}", self.name, self.street, self.city)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record as stored by the customer service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub addresses: Vec<Address>,
}

impl Customer {
    /// Whether `name`, `email` or `phone` contains `lowered_query`.
    ///
    /// The query must already be lowercased; an empty query matches.
    #[must_use]
    pub fn matches_lowered(&self, lowered_query: &str) -> bool {
        [&self.name, &self.email, &self.phone]
            .into_iter()
            .any(|field| field.to_lowercase().contains(lowered_query))
    }

    /// The customer's primary address, if one is flagged.
    #[must_use]
    pub fn primary_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|address| address.is_primary)
    }

    /// Label for the primary address, or [`NO_PRIMARY_ADDRESS`].
    #[must_use]
    pub fn primary_address_label(&self) -> String {
        self.primary_address()
            .map_or_else(|| NO_PRIMARY_ADDRESS.to_string(), Address::short_label)
    }

    /// Look up an address by ID.
    #[must_use]
    pub fn address(&self, id: &AddressId) -> Option<&Address> {
        self.addresses.iter().find(|address| &address.id == id)
    }

    /// Whether at most one address is flagged primary.
    #[must_use]
    pub fn has_single_primary(&self) -> bool {
        self.addresses
            .iter()
            .filter(|address| address.is_primary)
            .count()
            <= 1
    }

    /// Make `id` the only primary address.
    ///
    /// Every other address is cleared before the target is set.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::AddressNotFound`] without touching any
    /// address if `id` does not belong to this customer.
    pub fn set_primary_address(&mut self, id: &AddressId) -> Result<&Address, CustomerError> {
        let index = self
            .addresses
            .iter()
            .position(|address| &address.id == id)
            .ok_or_else(|| CustomerError::AddressNotFound(id.clone()))?;

        self.clear_primary();
        let target = self
            .addresses
            .get_mut(index)
            .ok_or_else(|| CustomerError::AddressNotFound(id.clone()))?;
        target.is_primary = true;
        Ok(target)
    }

    /// Append an address, taking ownership of it.
    ///
    /// The back-reference is pointed at this customer and `full_address` is
    /// refreshed. A primary incoming address demotes the existing one.
    pub fn add_address(&mut self, mut address: Address) {
        address.customer_id = self.id.clone();
        address.refresh_full_address();
        if address.is_primary {
            self.clear_primary();
        }
        self.addresses.push(address);
    }

    /// Replace the address with the same ID, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::AddressNotFound`] if no address has that ID.
    pub fn update_address(&mut self, mut address: Address) -> Result<&Address, CustomerError> {
        let index = self
            .addresses
            .iter()
            .position(|existing| existing.id == address.id)
            .ok_or_else(|| CustomerError::AddressNotFound(address.id.clone()))?;

        address.customer_id = self.id.clone();
        address.refresh_full_address();
        if address.is_primary {
            self.clear_primary();
        }

        let slot = self
            .addresses
            .get_mut(index)
            .ok_or_else(|| CustomerError::AddressNotFound(address.id.clone()))?;
        *slot = address;
        Ok(slot)
    }

    /// Remove an address and return it.
    ///
    /// Removing the primary address leaves the customer without one.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::AddressNotFound`] if no address has that ID.
    pub fn remove_address(&mut self, id: &AddressId) -> Result<Address, CustomerError> {
        let index = self
            .addresses
            .iter()
            .position(|address| &address.id == id)
            .ok_or_else(|| CustomerError::AddressNotFound(id.clone()))?;
        Ok(self.addresses.remove(index))
    }

    fn clear_primary(&mut self) {
        for address in &mut self.addresses {
            address.is_primary = false;
        }
    }
}

/// Request body for creating a customer. The service assigns the ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub addresses: Vec<Address>,
}
