//! Customer profile page: one customer and its addresses.
//!
//! Address edits have no endpoint of their own. Each flow mutates the local
//! customer document, then `PUT`s the whole document; a failed `PUT` puts
//! the pre-mutation snapshot back.

use tracing::instrument;

use clientele_core::{AddressDraft, AddressId, Customer, CustomerId};

use super::{CONFIRM_TITLE, ERROR, Outcome, SUCCESS};
use crate::error::AppError;
use crate::notify::{Confirm, Notification, Notifier};
use crate::service::CustomerApi;

/// Detail view of a single customer.
pub struct CustomerProfile<A, N> {
    api: A,
    notifier: N,
    customer: Option<Customer>,
}

impl<A: CustomerApi, N: Notifier> CustomerProfile<A, N> {
    #[must_use]
    pub const fn new(api: A, notifier: N) -> Self {
        Self {
            api,
            notifier,
            customer: None,
        }
    }

    /// The loaded customer, if any.
    #[must_use]
    pub const fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    /// Fetch a customer by ID.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn open(&mut self, id: &CustomerId) -> Outcome {
        match self.api.get_customer(id).await {
            Ok(customer) => {
                self.customer = Some(customer);
                Outcome::Saved
            }
            Err(e) => {
                AppError::from(e).report("Failed to load customer");
                self.notifier
                    .notify(Notification::error(ERROR, "Failed to load the customer."));
                Outcome::Failed
            }
        }
    }

    /// Make `address_id` the customer's only primary address.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no customer is open and
    /// `AppError::Customer` if the address does not belong to it. Service
    /// failures are reported through the notifier, not returned.
    #[instrument(skip(self), fields(address_id = %address_id))]
    pub async fn toggle_primary(&mut self, address_id: &AddressId) -> Result<Outcome, AppError> {
        let customer = self.loaded_mut()?;
        let snapshot = customer.clone();
        let name = customer.set_primary_address(address_id)?.name.clone();

        Ok(self
            .persist(
                snapshot,
                Notification::success(
                    "Update Successful",
                    format!("The address \"{name}\" has been set as the primary address"),
                ),
                Notification::error(
                    "Update Failed",
                    "Failed to set the primary address. Please try again.",
                ),
            )
            .await)
    }

    /// Validate and append a new address.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no customer is open and
    /// `AppError::Validation` if the draft is incomplete.
    #[instrument(skip(self, draft), fields(name = %draft.name, primary = draft.is_primary))]
    pub async fn add_address(&mut self, draft: &AddressDraft) -> Result<Outcome, AppError> {
        let customer = self.loaded_mut()?;
        let address = draft.validate(AddressId::generate(), customer.id.clone())?;
        let snapshot = customer.clone();
        customer.add_address(address);

        Ok(self
            .persist(
                snapshot,
                Notification::success(SUCCESS, "Address added successfully."),
                Notification::error(ERROR, "Failed to add the address."),
            )
            .await)
    }

    /// Replace an existing address with the validated draft.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no customer is open,
    /// `AppError::Validation` if the draft is incomplete, and
    /// `AppError::Customer` if the address does not exist.
    #[instrument(skip(self, draft), fields(address_id = %address_id))]
    pub async fn edit_address(
        &mut self,
        address_id: &AddressId,
        draft: &AddressDraft,
    ) -> Result<Outcome, AppError> {
        let customer = self.loaded_mut()?;
        let address = draft.validate(address_id.clone(), customer.id.clone())?;
        let snapshot = customer.clone();
        customer.update_address(address)?;

        Ok(self
            .persist(
                snapshot,
                Notification::success(SUCCESS, "Address updated successfully."),
                Notification::error(ERROR, "Failed to update the address."),
            )
            .await)
    }

    /// Remove an address after confirmation.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no customer is open and
    /// `AppError::Customer` if the address does not exist.
    #[instrument(skip(self, confirm), fields(address_id = %address_id))]
    pub async fn delete_address(
        &mut self,
        address_id: &AddressId,
        confirm: &impl Confirm,
    ) -> Result<Outcome, AppError> {
        let customer = self.loaded_mut()?;
        if customer.address(address_id).is_none() {
            return Err(clientele_core::CustomerError::AddressNotFound(address_id.clone()).into());
        }

        if !confirm.confirm(
            CONFIRM_TITLE,
            "This action will permanently delete the address.",
        ) {
            return Ok(Outcome::Cancelled);
        }

        let customer = self.loaded_mut()?;
        let snapshot = customer.clone();
        customer.remove_address(address_id)?;

        Ok(self
            .persist(
                snapshot,
                Notification::success(SUCCESS, "Address deleted successfully."),
                Notification::error(ERROR, "Failed to delete the address."),
            )
            .await)
    }

    fn loaded_mut(&mut self) -> Result<&mut Customer, AppError> {
        self.customer
            .as_mut()
            .ok_or_else(|| AppError::NotFound("no customer loaded".to_string()))
    }

    /// `PUT` the current document; restore `snapshot` if that fails.
    async fn persist(
        &mut self,
        snapshot: Customer,
        on_success: Notification,
        on_failure: Notification,
    ) -> Outcome {
        let Some(customer) = self.customer.as_ref() else {
            return Outcome::Unchanged;
        };

        let result = self.api.update_customer(&customer.id, customer).await;
        match result {
            Ok(confirmed) => {
                self.customer = Some(confirmed);
                self.notifier.notify(on_success);
                Outcome::Saved
            }
            Err(e) => {
                tracing::warn!(customer_id = %snapshot.id, "Rolling back local changes");
                self.customer = Some(snapshot);
                AppError::from(e).report(&on_failure.message);
                self.notifier.notify(on_failure);
                Outcome::Failed
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::notify::{AutoConfirm, Level, RecordingNotifier};
    use crate::pages::testing::FakeApi;

    async fn opened(api: &FakeApi) -> (CustomerProfile<FakeApi, RecordingNotifier>, RecordingNotifier) {
        let notifier = RecordingNotifier::default();
        let mut profile = CustomerProfile::new(api.clone(), notifier.clone());
        assert_eq!(profile.open(&CustomerId::new("1")).await, Outcome::Saved);
        (profile, notifier)
    }

    fn office(primary: bool) -> AddressDraft {
        AddressDraft {
            name: "Office".to_string(),
            street: "500 Market St".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            zip_code: "94105".to_string(),
            country: "USA".to_string(),
            is_primary: primary,
        }
    }

    fn primaries(profile: &CustomerProfile<FakeApi, RecordingNotifier>) -> Vec<bool> {
        profile
            .customer()
            .unwrap()
            .addresses
            .iter()
            .map(|a| a.is_primary)
            .collect()
    }

    #[tokio::test]
    async fn test_toggle_primary_persists() {
        let api = FakeApi::with_customers(1);
        let (mut profile, notifier) = opened(&api).await;
        assert_eq!(primaries(&profile), [false, true]);

        let outcome = profile.toggle_primary(&AddressId::new("1-1")).await.unwrap();

        assert_eq!(outcome, Outcome::Saved);
        assert_eq!(primaries(&profile), [true, false]);
        let stored = api.stored(&CustomerId::new("1")).unwrap();
        assert!(stored.addresses[0].is_primary);
        assert!(!stored.addresses[1].is_primary);
        assert_eq!(
            notifier.last().unwrap().message,
            "The address \"Address 1\" has been set as the primary address"
        );
    }

    #[tokio::test]
    async fn test_toggle_primary_rolls_back_on_failure() {
        let api = FakeApi::with_customers(1);
        let (mut profile, notifier) = opened(&api).await;
        api.fail_requests(true);

        let outcome = profile.toggle_primary(&AddressId::new("1-1")).await.unwrap();

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(primaries(&profile), [false, true]);
        let last = notifier.last().unwrap();
        assert_eq!(last.level, Level::Error);
        assert_eq!(last.title, "Update Failed");
    }

    #[tokio::test]
    async fn test_toggle_unknown_address_is_error() {
        let api = FakeApi::with_customers(1);
        let (mut profile, _) = opened(&api).await;
        let calls = api.calls();

        let err = profile
            .toggle_primary(&AddressId::new("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Customer(_)));
        assert_eq!(api.calls(), calls);
        assert_eq!(primaries(&profile), [false, true]);
    }

    #[tokio::test]
    async fn test_actions_require_open_customer() {
        let api = FakeApi::with_customers(1);
        let mut profile = CustomerProfile::new(api, RecordingNotifier::default());
        let err = profile.add_address(&office(false)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_open_missing_customer_fails() {
        let api = FakeApi::with_customers(1);
        let notifier = RecordingNotifier::default();
        let mut profile = CustomerProfile::new(api, notifier.clone());

        assert_eq!(profile.open(&CustomerId::new("404")).await, Outcome::Failed);
        assert!(profile.customer().is_none());
        assert_eq!(notifier.last().unwrap().level, Level::Error);
    }

    #[tokio::test]
    async fn test_add_primary_address_demotes_others() {
        let api = FakeApi::with_customers(1);
        let (mut profile, _) = opened(&api).await;

        let outcome = profile.add_address(&office(true)).await.unwrap();

        assert_eq!(outcome, Outcome::Saved);
        assert_eq!(primaries(&profile), [false, false, true]);
        let added = &profile.customer().unwrap().addresses[2];
        assert_eq!(added.customer_id.as_str(), "1");
        assert_eq!(added.full_address, "500 Market St, San Francisco, CA 94105, USA");
    }

    #[tokio::test]
    async fn test_add_invalid_address_sends_nothing() {
        let api = FakeApi::with_customers(1);
        let (mut profile, _) = opened(&api).await;
        let calls = api.calls();

        let mut draft = office(false);
        draft.city = String::new();
        let err = profile.add_address(&draft).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(api.calls(), calls);
        assert_eq!(profile.customer().unwrap().addresses.len(), 2);
    }

    #[tokio::test]
    async fn test_add_address_rolls_back_on_failure() {
        let api = FakeApi::with_customers(1);
        let (mut profile, _) = opened(&api).await;
        api.fail_requests(true);

        let outcome = profile.add_address(&office(true)).await.unwrap();
        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(primaries(&profile), [false, true]);
    }

    #[tokio::test]
    async fn test_edit_address() {
        let api = FakeApi::with_customers(1);
        let (mut profile, notifier) = opened(&api).await;

        let outcome = profile
            .edit_address(&AddressId::new("1-1"), &office(false))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Saved);
        let edited = &profile.customer().unwrap().addresses[0];
        assert_eq!(edited.id.as_str(), "1-1");
        assert_eq!(edited.city, "San Francisco");
        assert_eq!(
            notifier.last(),
            Some(Notification::success("Success", "Address updated successfully."))
        );
    }

    #[tokio::test]
    async fn test_edit_address_rolls_back_on_failure() {
        let api = FakeApi::with_customers(1);
        let (mut profile, _) = opened(&api).await;
        let before = profile.customer().unwrap().clone();
        api.fail_requests(true);

        let outcome = profile
            .edit_address(&AddressId::new("1-1"), &office(true))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(profile.customer(), Some(&before));
    }

    #[tokio::test]
    async fn test_delete_address_flow() {
        let api = FakeApi::with_customers(1);
        let (mut profile, _) = opened(&api).await;
        let id = AddressId::new("1-2");

        let declined = profile.delete_address(&id, &AutoConfirm(false)).await.unwrap();
        assert_eq!(declined, Outcome::Cancelled);
        assert_eq!(profile.customer().unwrap().addresses.len(), 2);

        let deleted = profile.delete_address(&id, &AutoConfirm(true)).await.unwrap();
        assert_eq!(deleted, Outcome::Saved);
        assert_eq!(profile.customer().unwrap().addresses.len(), 1);
        assert!(profile.customer().unwrap().primary_address().is_none());
        assert_eq!(
            api.stored(&CustomerId::new("1")).unwrap().addresses.len(),
            1
        );
    }

    #[tokio::test]
    async fn test_delete_address_rolls_back_on_failure() {
        let api = FakeApi::with_customers(1);
        let (mut profile, notifier) = opened(&api).await;
        api.fail_requests(true);

        let outcome = profile
            .delete_address(&AddressId::new("1-2"), &AutoConfirm(true))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(profile.customer().unwrap().addresses.len(), 2);
        assert_eq!(
            notifier.last(),
            Some(Notification::error("Error", "Failed to delete the address."))
        );
    }
}
