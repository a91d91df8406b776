//! Integration tests for Clientele.
//!
//! [`MockCustomerService`] is an in-process stand-in for the customer REST
//! service, served by axum on `127.0.0.1:0`. It stores raw JSON documents
//! and assigns numeric IDs on create, the way json-server does, so the
//! tests exercise the real wire format.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p clientele-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::oneshot;
use url::Url;

use clientele_desk::{CustomerService, ServiceError};

/// Body returned by every failing route.
pub const FAILURE_BODY: &str = "database unavailable";

#[derive(Default)]
struct Store {
    customers: Vec<Value>,
    next_id: u64,
}

#[derive(Clone, Default)]
struct ServerState {
    store: Arc<Mutex<Store>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl ServerState {
    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_read(&self) -> Result<(), Failure> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(internal_error());
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), Failure> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(internal_error());
        }
        Ok(())
    }
}

type Failure = (StatusCode, String);
type Reply = Result<(StatusCode, Json<Value>), Failure>;

fn internal_error() -> Failure {
    (StatusCode::INTERNAL_SERVER_ERROR, FAILURE_BODY.to_string())
}

fn not_found() -> Failure {
    (StatusCode::NOT_FOUND, String::new())
}

/// Whether a stored document's `id` (string or number) equals `id`.
fn has_id(document: &Value, id: &str) -> bool {
    match document.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}

async fn list_customers(State(state): State<ServerState>) -> Reply {
    state.check_read()?;
    let customers = state.store().customers.clone();
    Ok((StatusCode::OK, Json(Value::Array(customers))))
}

async fn get_customer(State(state): State<ServerState>, Path(id): Path<String>) -> Reply {
    state.check_read()?;
    let store = state.store();
    let customer = store
        .customers
        .iter()
        .find(|c| has_id(c, &id))
        .cloned()
        .ok_or_else(not_found)?;
    Ok((StatusCode::OK, Json(customer)))
}

async fn create_customer(State(state): State<ServerState>, Json(mut body): Json<Value>) -> Reply {
    state.check_write()?;
    let Some(fields) = body.as_object_mut() else {
        return Err((StatusCode::BAD_REQUEST, "expected an object".to_string()));
    };

    let mut store = state.store();
    store.next_id += 1;
    fields.insert("id".to_string(), json!(store.next_id));
    store.customers.push(body.clone());
    Ok((StatusCode::CREATED, Json(body)))
}

async fn update_customer(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Reply {
    state.check_write()?;
    let mut store = state.store();
    let slot = store
        .customers
        .iter_mut()
        .find(|c| has_id(c, &id))
        .ok_or_else(not_found)?;

    // The stored id wins over whatever the body carries.
    if let (Some(fields), Some(existing)) = (body.as_object_mut(), slot.get("id")) {
        fields.insert("id".to_string(), existing.clone());
    }
    *slot = body.clone();
    Ok((StatusCode::OK, Json(body)))
}

async fn delete_customer(State(state): State<ServerState>, Path(id): Path<String>) -> Reply {
    state.check_write()?;
    let mut store = state.store();
    let before = store.customers.len();
    store.customers.retain(|c| !has_id(c, &id));
    if store.customers.len() == before {
        return Err(not_found());
    }
    Ok((StatusCode::OK, Json(json!({}))))
}

/// In-process customer REST service for tests.
pub struct MockCustomerService {
    base_url: Url,
    state: ServerState,
    shutdown_tx: Option<oneshot::Sender<()>>,
    _task: tokio::task::JoinHandle<()>,
}

impl std::fmt::Debug for MockCustomerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCustomerService")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl MockCustomerService {
    /// Start the service on `127.0.0.1:0` with `customers` as its data.
    ///
    /// New IDs continue after the largest numeric seed ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start(customers: Vec<Value>) -> std::io::Result<Self> {
        let next_id = customers
            .iter()
            .filter_map(|c| c.get("id").and_then(Value::as_u64))
            .max()
            .unwrap_or(0);
        let state = ServerState {
            store: Arc::new(Mutex::new(Store { customers, next_id })),
            ..ServerState::default()
        };

        let app = Router::new()
            .route("/customers", get(list_customers).post(create_customer))
            .route(
                "/customers/{id}",
                get(get_customer)
                    .put(update_customer)
                    .delete(delete_customer),
            )
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let base_url = Url::parse(&format!("http://{addr}")).map_err(std::io::Error::other)?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });

        Ok(Self {
            base_url,
            state,
            shutdown_tx: Some(shutdown_tx),
            _task: task,
        })
    }

    /// Server base URL (e.g., `http://127.0.0.1:12345/`).
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// A desk client pointed at this service.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn client(&self) -> Result<CustomerService, ServiceError> {
        CustomerService::with_base_url(self.base_url.clone(), Duration::from_secs(5))
    }

    /// Make `GET` routes answer 500.
    pub fn fail_reads(&self, fail: bool) {
        self.state.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make `POST`, `PUT` and `DELETE` routes answer 500.
    pub fn fail_writes(&self, fail: bool) {
        self.state.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of write requests received, failed ones included.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.state.writes.load(Ordering::SeqCst)
    }

    /// Stored document for `id`, exactly as the service holds it.
    #[must_use]
    pub fn customer(&self, id: &str) -> Option<Value> {
        self.state
            .store()
            .customers
            .iter()
            .find(|c| has_id(c, id))
            .cloned()
    }

    /// Number of stored customers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.store().customers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for MockCustomerService {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// A stored address document with camelCase keys and a numeric owner ID.
#[must_use]
pub fn address_json(customer: u64, n: u64, name: &str, primary: bool) -> Value {
    let street = format!("{n} Main St");
    json!({
        "id": format!("{customer}-{n}"),
        "customerID": customer,
        "name": name,
        "street": street,
        "city": "Portland",
        "state": "OR",
        "zipCode": "97201",
        "country": "USA",
        "fullAddress": format!("{street}, Portland, OR 97201, USA"),
        "isPrimary": primary,
    })
}

/// A stored customer document with a numeric ID.
#[must_use]
pub fn customer_json(id: u64, name: &str, email: &str, addresses: Vec<Value>) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": email,
        "phone": format!("555-{id:04}"),
        "addresses": addresses,
    })
}

/// `n` customers named `Customer 1`..`Customer n`, each with a non-primary
/// "Home" and a primary "Office" address.
#[must_use]
pub fn sample_customers(n: u64) -> Vec<Value> {
    (1..=n)
        .map(|i| {
            customer_json(
                i,
                &format!("Customer {i}"),
                &format!("customer{i}@example.com"),
                vec![
                    address_json(i, 1, "Home", false),
                    address_json(i, 2, "Office", true),
                ],
            )
        })
        .collect()
}
