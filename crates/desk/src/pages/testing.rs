//! In-memory [`CustomerApi`] double for page tests.

use std::sync::{Arc, Mutex, PoisonError};

use clientele_core::{Address, AddressId, Customer, CustomerId, NewCustomer};

use crate::service::{CustomerApi, ServiceError};

#[derive(Default)]
struct FakeState {
    customers: Vec<Customer>,
    next_id: u32,
    fail: bool,
    calls: usize,
}

/// Shared-state fake; clones observe the same store.
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

pub fn sample_address(customer: u32, n: u32, primary: bool) -> Address {
    let mut address = Address {
        id: AddressId::new(format!("{customer}-{n}")),
        customer_id: CustomerId::new(customer.to_string()),
        name: format!("Address {n}"),
        street: format!("{n} Main St"),
        city: "Portland".to_string(),
        state: "OR".to_string(),
        zip_code: "97201".to_string(),
        country: "USA".to_string(),
        full_address: String::new(),
        is_primary: primary,
    };
    address.refresh_full_address();
    address
}

impl FakeApi {
    pub fn with_customers(n: u32) -> Self {
        let customers = (1..=n)
            .map(|i| Customer {
                id: CustomerId::new(i.to_string()),
                name: format!("Customer {i}"),
                email: format!("customer{i}@example.com"),
                phone: format!("555-{i:04}"),
                addresses: vec![sample_address(i, 1, false), sample_address(i, 2, true)],
            })
            .collect();

        Self {
            state: Arc::new(Mutex::new(FakeState {
                customers,
                next_id: n + 1,
                fail: false,
                calls: 0,
            })),
        }
    }

    pub fn fail_requests(&self, fail: bool) {
        self.lock().fail = fail;
    }

    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    pub fn stored(&self, id: &CustomerId) -> Option<Customer> {
        self.lock().customers.iter().find(|c| &c.id == id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> Result<std::sync::MutexGuard<'_, FakeState>, ServiceError> {
        let mut state = self.lock();
        state.calls += 1;
        if state.fail {
            return Err(ServiceError::Api {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        Ok(state)
    }
}

impl CustomerApi for FakeApi {
    async fn list_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        Ok(self.begin()?.customers.clone())
    }

    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, ServiceError> {
        self.begin()?
            .customers
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("customer {id}")))
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, ServiceError> {
        let mut state = self.begin()?;
        let created = Customer {
            id: CustomerId::new(state.next_id.to_string()),
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            addresses: customer.addresses.clone(),
        };
        state.next_id += 1;
        state.customers.push(created.clone());
        Ok(created)
    }

    async fn update_customer(
        &self,
        id: &CustomerId,
        customer: &Customer,
    ) -> Result<Customer, ServiceError> {
        let mut state = self.begin()?;
        let slot = state
            .customers
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("customer {id}")))?;
        *slot = customer.clone();
        Ok(customer.clone())
    }

    async fn delete_customer(&self, id: &CustomerId) -> Result<(), ServiceError> {
        let mut state = self.begin()?;
        let before = state.customers.len();
        state.customers.retain(|c| &c.id != id);
        if state.customers.len() == before {
            return Err(ServiceError::NotFound(format!("customer {id}")));
        }
        Ok(())
    }
}
