//! The shared cart store.

use crate::{CartError, CartEvent, CartOp, Notice};
use parking_lot::Mutex;
use shop_api::{ApiClient, ApiError};
use shop_commerce::{AddQuantity, Cart, CartItemId, ProductId, QuantityChange};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, instrument, warn};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Default)]
struct State {
    /// Ticket of the load whose result is currently displayed.
    applied_load: u64,
    /// Ticket of the count currently displayed.
    applied_count: u64,
    loads_in_flight: usize,
    adding: HashMap<ProductId, usize>,
    updating: HashMap<CartItemId, usize>,
    last_error: Option<String>,
}

struct Inner {
    api: ApiClient,
    state: Mutex<State>,
    cart: watch::Sender<Cart>,
    count: watch::Sender<i64>,
    events: broadcast::Sender<CartEvent>,
    next_load: AtomicU64,
    next_count: AtomicU64,
}

/// Process-wide cart state.
///
/// Holds the last cart fetched from the server, the server item count and
/// per-product / per-item "in progress" flags. The server owns the cart: every
/// mutation is followed by a full refetch and a count refresh, and the
/// snapshot is only ever replaced wholesale.
///
/// Views either read [`snapshot`](Self::snapshot) / [`count`](Self::count),
/// follow the watch channels, or [`subscribe`](Self::subscribe) to
/// [`CartEvent`]s. Failures are turned into error [`Notice`]s for the user
/// and also returned to the caller.
///
/// Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &*self.inner.state.lock())
            .field("count", &*self.inner.count.borrow())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create a store with an empty cart. Call [`load`](Self::load) to fetch
    /// the session's cart.
    pub fn new(api: ApiClient) -> Self {
        let (cart, _) = watch::channel(Cart::empty());
        let (count, _) = watch::channel(0);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                api,
                state: Mutex::new(State::default()),
                cart,
                count,
                events,
                next_load: AtomicU64::new(0),
                next_count: AtomicU64::new(0),
            }),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    // === Reads ===

    /// Last applied cart snapshot.
    pub fn snapshot(&self) -> Cart {
        self.inner.cart.borrow().clone()
    }

    /// Last known server item count.
    pub fn count(&self) -> i64 {
        *self.inner.count.borrow()
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.inner.events.subscribe()
    }

    /// Follow the cart snapshot.
    pub fn watch_cart(&self) -> watch::Receiver<Cart> {
        self.inner.cart.subscribe()
    }

    /// Follow the item count.
    pub fn watch_count(&self) -> watch::Receiver<i64> {
        self.inner.count.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.lock().loads_in_flight > 0
    }

    /// Whether an add for this product is in flight. Advisory only.
    pub fn is_adding(&self, product_id: ProductId) -> bool {
        self.inner.state.lock().adding.contains_key(&product_id)
    }

    /// Whether an update or removal of this item is in flight. Advisory only.
    pub fn is_updating(&self, item_id: CartItemId) -> bool {
        self.inner.state.lock().updating.contains_key(&item_id)
    }

    /// Message of the most recent failure, cleared when the next operation
    /// starts.
    pub fn last_error(&self) -> Option<String> {
        self.inner.state.lock().last_error.clone()
    }

    pub fn clear_error(&self) {
        self.inner.state.lock().last_error = None;
    }

    // === Operations ===

    /// Fetch the cart and replace the snapshot.
    ///
    /// Each call takes a ticket; a response is applied only when no
    /// later-issued load has been applied already. On failure the previous
    /// snapshot stays in place.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Cart, CartError> {
        let ticket = self.inner.next_load.fetch_add(1, Ordering::SeqCst) + 1;
        let result = {
            let _busy = Busy::load(self);
            self.inner.api.cart().get().await
        };

        match result {
            Ok(cart) => {
                let mut state = self.inner.state.lock();
                if ticket < state.applied_load {
                    debug!(ticket, applied = state.applied_load, "discarding stale cart response");
                    drop(state);
                    return Ok(self.snapshot());
                }
                state.applied_load = ticket;
                self.inner.cart.send_replace(cart.clone());
                drop(state);

                debug!(
                    items = cart.unique_item_count(),
                    total_items = cart.total_items,
                    "cart loaded"
                );
                self.emit(CartEvent::Loaded { cart: cart.clone() });
                Ok(cart)
            }
            Err(err) => Err(self.fail(CartOp::Load, err)),
        }
    }

    /// Fetch the server item count and publish it.
    #[instrument(skip(self))]
    pub async fn refresh_count(&self) -> Result<i64, CartError> {
        let ticket = self.inner.next_count.fetch_add(1, Ordering::SeqCst) + 1;
        let count = match self.inner.api.cart().count().await {
            Ok(count) => count,
            Err(err) => return Err(self.fail(CartOp::Count, err)),
        };

        let mut state = self.inner.state.lock();
        if ticket < state.applied_count {
            debug!(ticket, applied = state.applied_count, "discarding stale count response");
            return Ok(self.count());
        }
        state.applied_count = ticket;
        let changed = self.inner.count.send_replace(count) != count;
        drop(state);

        if changed {
            self.emit(CartEvent::CountChanged { count });
        }
        Ok(count)
    }

    /// Add `quantity` of a product. The server merges it into an existing
    /// line for the same product.
    #[instrument(skip(self, quantity), fields(quantity = quantity.get()))]
    pub async fn add(
        &self,
        product_id: ProductId,
        quantity: AddQuantity,
    ) -> Result<Cart, CartError> {
        let op = CartOp::Add(product_id);
        let result = {
            let _busy = Busy::adding(self, product_id);
            self.inner.api.cart().add_item(product_id, quantity.get()).await
        };
        if let Err(err) = result {
            return Err(self.fail(op, err));
        }

        let message = format!("Added {} item(s) to cart", quantity.get());
        Ok(self.after_mutation(op, message).await)
    }

    /// Set the quantity of a line. Zero or less removes the line.
    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        item_id: CartItemId,
        quantity: i64,
    ) -> Result<Cart, CartError> {
        let quantity = match QuantityChange::from_requested(quantity) {
            QuantityChange::Remove => return self.remove(item_id).await,
            QuantityChange::Set(quantity) => quantity,
        };

        let op = CartOp::Update(item_id);
        let result = {
            let _busy = Busy::updating(self, item_id);
            self.inner.api.cart().update_item(item_id, quantity).await
        };
        if let Err(err) = result {
            return Err(self.fail(op, err));
        }

        Ok(self.after_mutation(op, "Item quantity updated").await)
    }

    /// Raise the quantity of a line by one.
    pub async fn increment(&self, item_id: CartItemId) -> Result<Cart, CartError> {
        let current = self.quantity_of(item_id)?;
        self.set_quantity(item_id, current.saturating_add(1)).await
    }

    /// Lower the quantity of a line by one, removing it at zero.
    pub async fn decrement(&self, item_id: CartItemId) -> Result<Cart, CartError> {
        let current = self.quantity_of(item_id)?;
        self.set_quantity(item_id, current.saturating_sub(1)).await
    }

    /// Remove a line.
    #[instrument(skip(self))]
    pub async fn remove(&self, item_id: CartItemId) -> Result<Cart, CartError> {
        let op = CartOp::Remove(item_id);
        let result = {
            let _busy = Busy::start(self, op);
            self.inner.api.cart().remove_item(item_id).await
        };
        if let Err(err) = result {
            return Err(self.fail(op, err));
        }

        Ok(self.after_mutation(op, "Item removed from cart").await)
    }

    /// Empty the cart. The snapshot is refetched rather than zeroed locally.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<Cart, CartError> {
        let op = CartOp::Clear;
        let result = {
            let _busy = Busy::start(self, op);
            self.inner.api.cart().clear().await
        };
        if let Err(err) = result {
            return Err(self.fail(op, err));
        }

        Ok(self.after_mutation(op, "Cart cleared").await)
    }

    // === Internals ===

    fn quantity_of(&self, item_id: CartItemId) -> Result<i64, CartError> {
        let quantity = self.inner.cart.borrow().get_item(item_id).map(|item| item.quantity);
        quantity.ok_or_else(|| {
            let err = CartError::NotInCart(item_id);
            self.report(CartOp::Update(item_id), &err);
            err
        })
    }

    /// Announce a successful mutation, then refetch the cart and the count.
    ///
    /// Refresh failures publish their own notices; the mutation itself
    /// already succeeded, so the current snapshot is returned either way.
    async fn after_mutation(&self, op: CartOp, message: impl Into<String>) -> Cart {
        self.emit(CartEvent::Mutated { op });
        self.notify(Notice::success(message));

        let (cart, _count) = tokio::join!(self.load(), self.refresh_count());
        cart.unwrap_or_else(|_| self.snapshot())
    }

    fn fail(&self, op: CartOp, err: ApiError) -> CartError {
        let err = CartError::from(err);
        self.report(op, &err);
        err
    }

    fn report(&self, op: CartOp, err: &CartError) {
        let message = err.server_message().unwrap_or(op.failure_message()).to_string();
        warn!(%op, error = %err, "cart operation failed");
        self.inner.state.lock().last_error = Some(message.clone());
        self.notify(Notice::error(message));
    }

    fn notify(&self, notice: Notice) {
        self.emit(CartEvent::Notice { notice });
    }

    fn emit(&self, event: CartEvent) {
        // No receivers is fine.
        let _ = self.inner.events.send(event);
    }

    fn begin(&self, op: CartOp) {
        {
            let mut state = self.inner.state.lock();
            state.last_error = None;
            match op {
                CartOp::Load => state.loads_in_flight += 1,
                CartOp::Add(id) => *state.adding.entry(id).or_default() += 1,
                CartOp::Update(id) | CartOp::Remove(id) => {
                    *state.updating.entry(id).or_default() += 1
                }
                CartOp::Count | CartOp::Clear => {}
            }
        }
        self.emit(CartEvent::Busy { op, busy: true });
    }

    fn end(&self, op: CartOp) {
        {
            let mut state = self.inner.state.lock();
            match op {
                CartOp::Load => state.loads_in_flight = state.loads_in_flight.saturating_sub(1),
                CartOp::Add(id) => release(&mut state.adding, id),
                CartOp::Update(id) | CartOp::Remove(id) => release(&mut state.updating, id),
                CartOp::Count | CartOp::Clear => {}
            }
        }
        self.emit(CartEvent::Busy { op, busy: false });
    }
}

fn release<K: Eq + Hash>(flags: &mut HashMap<K, usize>, key: K) {
    if let Some(n) = flags.get_mut(&key) {
        *n -= 1;
        if *n == 0 {
            flags.remove(&key);
        }
    }
}

/// Marks an operation in flight until dropped, so flags are cleared on
/// success, failure and cancellation alike.
struct Busy<'a> {
    store: &'a CartStore,
    op: CartOp,
}

impl<'a> Busy<'a> {
    fn start(store: &'a CartStore, op: CartOp) -> Self {
        store.begin(op);
        Self { store, op }
    }

    fn load(store: &'a CartStore) -> Self {
        Self::start(store, CartOp::Load)
    }

    fn adding(store: &'a CartStore, product_id: ProductId) -> Self {
        Self::start(store, CartOp::Add(product_id))
    }

    fn updating(store: &'a CartStore, item_id: CartItemId) -> Self {
        Self::start(store, CartOp::Update(item_id))
    }
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        self.store.end(self.op);
    }
}
