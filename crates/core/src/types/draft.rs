//! Unvalidated form input for customers and addresses.
//!
//! Drafts are what a user types. They only become domain values after
//! [`CustomerDraft::validate`] / [`AddressDraft::validate`] succeed, so the
//! service never receives a record with a blank required field.

use super::customer::{Address, Customer, NewCustomer};
use super::email::{Email, EmailError};
use super::id::{AddressId, CustomerId};

/// Form validation failures, reported before anything is submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is blank.
    #[error("{field} is required")]
    Required {
        /// Field name as shown to the user.
        field: &'static str,
    },
    /// The email field is not a valid address.
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(trimmed.to_string())
}

// =============================================================================
// Customer draft
// =============================================================================

/// Customer form: name, email and phone are all required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// A customer draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCustomer {
    pub name: String,
    pub email: Email,
    pub phone: String,
}

impl CustomerDraft {
    /// Pre-fill the form from an existing customer (edit mode).
    #[must_use]
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
        }
    }

    /// Validate the form, trimming every field.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] in field order.
    pub fn validate(&self) -> Result<ValidCustomer, ValidationError> {
        let name = required("name", &self.name)?;
        required("email", &self.email)?;
        let email = Email::parse(&self.email)?;
        let phone = required("phone", &self.phone)?;
        Ok(ValidCustomer { name, email, phone })
    }
}

impl ValidCustomer {
    /// Body for `POST /customers`: no ID and no addresses yet.
    #[must_use]
    pub fn into_new_customer(self) -> NewCustomer {
        NewCustomer {
            name: self.name,
            email: self.email.into_inner(),
            phone: self.phone,
            addresses: Vec::new(),
        }
    }

    /// Overlay the form values on an existing customer.
    ///
    /// ID and addresses are kept from `existing`.
    #[must_use]
    pub fn apply_to(self, existing: &Customer) -> Customer {
        Customer {
            id: existing.id.clone(),
            name: self.name,
            email: self.email.into_inner(),
            phone: self.phone,
            addresses: existing.addresses.clone(),
        }
    }
}

// =============================================================================
// Address draft
// =============================================================================

/// Address form. Everything except the zip code is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressDraft {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub is_primary: bool,
}

impl AddressDraft {
    /// Pre-fill the form from an existing address (edit mode).
    #[must_use]
    pub fn from_address(address: &Address) -> Self {
        Self {
            name: address.name.clone(),
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            zip_code: address.zip_code.clone(),
            country: address.country.clone(),
            is_primary: address.is_primary,
        }
    }

    /// Validate the form and build an address with the given identity.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] for the first blank required field.
    pub fn validate(
        &self,
        id: AddressId,
        customer_id: CustomerId,
    ) -> Result<Address, ValidationError> {
        let mut address = Address {
            id,
            customer_id,
            name: required("name", &self.name)?,
            street: required("street", &self.street)?,
            city: required("city", &self.city)?,
            state: required("state", &self.state)?,
            zip_code: self.zip_code.trim().to_string(),
            country: required("country", &self.country)?,
            full_address: String::new(),
            is_primary: self.is_primary,
        };
        address.refresh_full_address();
        Ok(address)
    }
}
