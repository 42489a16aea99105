// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use shop_api::{ApiClient, ApiConfig, EnvelopePolicy};
use shop_cart::CartStore;
use shop_data::{FetchError, Method, RequestBuilder, Response, Transport};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub const BASE_URL: &str = "http://shop.test/api";

pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("shop_cart=debug")
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone)]
struct Line {
    id: i64,
    product_id: i64,
    quantity: i64,
}

#[derive(Debug, Clone)]
struct Failure {
    method: Method,
    path: String,
    status: u16,
    message: Option<String>,
}

/// Lets a test hold one response until released.
pub struct Hold {
    pub entered: oneshot::Receiver<()>,
    pub release: oneshot::Sender<()>,
}

struct PendingHold {
    method: Method,
    path: String,
    entered: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

#[derive(Default)]
struct State {
    products: BTreeMap<i64, (String, f64)>,
    lines: Vec<Line>,
    next_line_id: i64,
    failures: VecDeque<Failure>,
    log: Vec<(Method, String)>,
}

/// In-memory cart backend keyed by nothing but itself (one session).
///
/// Behaves like the shop backend: adds merge into an existing line for the
/// same product, a quantity update of zero or less deletes the line and
/// answers `204`, and `GET /cart/count` sums quantities.
#[derive(Default)]
pub struct Backend {
    state: Mutex<State>,
    hold: Mutex<Option<PendingHold>>,
    wrapped: bool,
    list_shape: bool,
}

impl Backend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Backend that wraps every body in `{data, message, success}`.
    pub fn wrapped() -> Arc<Self> {
        Arc::new(Self {
            wrapped: true,
            ..Self::default()
        })
    }

    /// Backend that returns the cart as a bare list of lines.
    pub fn list_shaped() -> Arc<Self> {
        Arc::new(Self {
            list_shape: true,
            ..Self::default()
        })
    }

    pub fn with_product(self: Arc<Self>, id: i64, name: &str, price: f64) -> Arc<Self> {
        self.state
            .lock()
            .unwrap()
            .products
            .insert(id, (name.to_string(), price));
        self
    }

    /// Put a line in the cart directly, bypassing the API.
    pub fn seed_line(&self, product_id: i64, quantity: i64) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_line_id += 1;
        let id = state.next_line_id;
        state.lines.push(Line {
            id,
            product_id,
            quantity,
        });
        id
    }

    /// Fail the next request matching `method` and `path` (relative to the base URL).
    pub fn fail_next(&self, method: Method, path: &str, status: u16, message: Option<&str>) {
        self.state.lock().unwrap().failures.push_back(Failure {
            method,
            path: path.to_string(),
            status,
            message: message.map(str::to_string),
        });
    }

    /// Hold the next response to `method path`. The response is computed
    /// when the request arrives and delivered once `release` fires.
    pub fn hold_next(&self, method: Method, path: &str) -> Hold {
        let (entered_tx, entered_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        *self.hold.lock().unwrap() = Some(PendingHold {
            method,
            path: path.to_string(),
            entered: entered_tx,
            release: release_rx,
        });
        Hold {
            entered: entered_rx,
            release: release_tx,
        }
    }

    /// Requests received, as `(method, path)`.
    pub fn log(&self) -> Vec<(Method, String)> {
        self.state.lock().unwrap().log.clone()
    }

    /// Requests to exactly `method path`.
    pub fn requests_to(&self, method: Method, path: &str) -> usize {
        self.log()
            .iter()
            .filter(|(m, p)| *m == method && p == path)
            .count()
    }

    pub fn requests_matching(&self, method: Method, prefix: &str) -> usize {
        self.log()
            .iter()
            .filter(|(m, p)| *m == method && p.starts_with(prefix))
            .count()
    }

    pub fn quantity_of(&self, product_id: i64) -> Option<i64> {
        let state = self.state.lock().unwrap();
        state
            .lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.quantity)
    }

    fn item_json(state: &State, line: &Line) -> Value {
        let (name, price) = state
            .products
            .get(&line.product_id)
            .cloned()
            .unwrap_or_else(|| ("Unknown".to_string(), 0.0));
        json!({
            "id": line.id,
            "product": {"id": line.product_id, "name": name, "price": price, "stock": 10},
            "quantity": line.quantity,
            "subtotal": price * line.quantity as f64,
        })
    }

    fn cart_json(&self, state: &State) -> Value {
        let items: Vec<Value> = state.lines.iter().map(|l| Self::item_json(state, l)).collect();
        if self.list_shape {
            return Value::Array(items);
        }
        let total_amount: f64 = items.iter().filter_map(|i| i["subtotal"].as_f64()).sum();
        let total_items: i64 = state.lines.iter().map(|l| l.quantity).sum();
        json!({"items": items, "totalAmount": total_amount, "totalItems": total_items})
    }

    fn ok(&self, status: u16, body: Value) -> Response {
        if self.wrapped {
            Response::json_body(status, &json!({"data": body, "message": "OK", "success": true}))
        } else {
            Response::json_body(status, &body)
        }
    }

    fn error(status: u16, message: &str) -> Response {
        Response::json_body(status, &json!({"message": message}))
    }

    fn handle(
        &self,
        state: &mut State,
        method: Method,
        path: &str,
        request: &RequestBuilder,
    ) -> Response {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match (method, segments.as_slice()) {
            (Method::Get, ["cart"]) => self.ok(200, self.cart_json(state)),
            (Method::Get, ["cart", "count"]) => {
                let count: i64 = state.lines.iter().map(|l| l.quantity).sum();
                self.ok(200, json!({"count": count}))
            }
            (Method::Post, ["cart", "items"]) => {
                let body: Value = match request.json_body() {
                    Ok(body) => body,
                    Err(_) => return Self::error(400, "Invalid body"),
                };
                let product_id = body["productId"].as_i64().unwrap_or_default();
                let quantity = body["quantity"].as_i64().unwrap_or_default();
                if !state.products.contains_key(&product_id) {
                    return Self::error(404, "Product not found");
                }
                if quantity <= 0 {
                    return Self::error(400, "Quantity must be positive");
                }
                let index = match state.lines.iter().position(|l| l.product_id == product_id) {
                    Some(index) => {
                        state.lines[index].quantity += quantity;
                        index
                    }
                    None => {
                        state.next_line_id += 1;
                        state.lines.push(Line {
                            id: state.next_line_id,
                            product_id,
                            quantity,
                        });
                        state.lines.len() - 1
                    }
                };
                let line = state.lines[index].clone();
                self.ok(200, Self::item_json(state, &line))
            }
            (Method::Put, ["cart", "items", id]) => {
                let id: i64 = id.parse().unwrap_or_default();
                let quantity = request
                    .json_body::<Value>()
                    .ok()
                    .and_then(|b| b["quantity"].as_i64())
                    .unwrap_or_default();
                let Some(index) = state.lines.iter().position(|l| l.id == id) else {
                    return Self::error(404, "Cart item not found");
                };
                if quantity <= 0 {
                    state.lines.remove(index);
                    return Response::no_content();
                }
                state.lines[index].quantity = quantity;
                let line = state.lines[index].clone();
                self.ok(200, Self::item_json(state, &line))
            }
            (Method::Delete, ["cart", "items", id]) => {
                let id: i64 = id.parse().unwrap_or_default();
                let before = state.lines.len();
                state.lines.retain(|l| l.id != id);
                if state.lines.len() == before {
                    return Self::error(404, "Cart item not found");
                }
                Response::no_content()
            }
            (Method::Delete, ["cart"]) => {
                state.lines.clear();
                Response::no_content()
            }
            _ => Self::error(404, "Not found"),
        }
    }
}

#[async_trait]
impl Transport for Backend {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let method = request.method();
        let path = request
            .url()
            .strip_prefix(BASE_URL)
            .unwrap_or(request.url())
            .to_string();

        let response = {
            let mut state = self.state.lock().unwrap();
            state.log.push((method, path.clone()));

            let failure = state
                .failures
                .iter()
                .position(|f| f.method == method && f.path == path)
                .and_then(|i| state.failures.remove(i));
            match failure {
                Some(Failure {
                    status: 0, message, ..
                }) => {
                    return Err(FetchError::RequestError(
                        message.unwrap_or_else(|| "connection reset".to_string()),
                    ))
                }
                Some(Failure { status, message, .. }) => match message {
                    Some(message) => Self::error(status, &message),
                    None => Response::new(status, Default::default(), Vec::new()),
                },
                None => self.handle(&mut state, method, &path, &request),
            }
        };

        let pending = {
            let mut hold = self.hold.lock().unwrap();
            match hold.as_ref() {
                Some(h) if h.method == method && h.path == path => hold.take(),
                _ => None,
            }
        };
        if let Some(pending) = pending {
            let _ = pending.entered.send(());
            let _ = pending.release.await;
        }

        Ok(response)
    }
}

pub fn config_for(backend: &Backend) -> ApiConfig {
    let envelope = if backend.wrapped {
        EnvelopePolicy::Wrapped
    } else {
        EnvelopePolicy::Bare
    };
    ApiConfig::new(BASE_URL).with_envelope(envelope)
}

/// A store wired to `backend`.
pub fn store_for(backend: &Arc<Backend>) -> CartStore {
    store_with(backend, config_for(backend))
}

pub fn store_with(backend: &Arc<Backend>, config: ApiConfig) -> CartStore {
    let api = ApiClient::with_transport(config, backend.clone()).expect("valid test config");
    CartStore::new(api)
}

/// Backend with a few products, used by most tests.
pub fn catalog() -> Arc<Backend> {
    Backend::new()
        .with_product(1, "Coffee Mug", 100.0)
        .with_product(2, "Tea Pot", 45.5)
        .with_product(3, "Spoon", 2.25)
}
