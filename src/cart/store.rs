//! The cart store.
//!
//! [`CartStore`] owns the authoritative local cart. Every mutation applies to
//! the in-memory lines first and is persisted to durable storage before any
//! network traffic; when a session is active, the same mutation is mirrored
//! to the remote cart on a best-effort basis. Remote failures are logged and
//! swallowed so the cart stays usable offline; the only operation that ever
//! replaces local state with server state is the final step of a successful
//! [`CartStore::sync_with_remote`] pass.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    api::{ApiError, CartLineUpsert, EntryId, MenuItem, NewOrder, StorefrontApi},
    auth::{AuthSession, BearerToken},
    cart::{
        errors::{OrderError, SyncError},
        models::{CartLine, ItemId},
    },
    checkout::{OrderTotals, PaymentMethod, ShippingInfo},
    money::Price,
    orders::{Order, OrderLine},
    storage::CartStorage,
};

/// Locally-durable cart state, reconciled with the remote cart on login.
pub struct CartStore {
    lines: Vec<CartLine>,
    storage: Box<dyn CartStorage>,
    api: Arc<dyn StorefrontApi>,
    session: AuthSession,
    sync_in_flight: bool,
}

impl CartStore {
    /// Creates a store, loading any persisted cart.
    ///
    /// Absent or unreadable state starts as an empty cart; startup never
    /// fails on storage problems.
    #[must_use]
    pub fn new(storage: Box<dyn CartStorage>, api: Arc<dyn StorefrontApi>) -> Self {
        let mut lines = match storage.load() {
            Ok(lines) => lines,
            Err(error) => {
                warn!(%error, "failed to load persisted cart, starting empty");

                Vec::new()
            }
        };

        // A zero-quantity line is invalid and is never kept.
        lines.retain(|line| line.quantity > 0);

        CartStore {
            lines,
            storage,
            api,
            session: AuthSession::Guest,
            sync_in_flight: false,
        }
    }

    /// The current cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The current authentication state.
    #[must_use]
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Sum of all line quantities, for badge counts.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Sum of `unit price x quantity` over all lines, in exact cents.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines
            .iter()
            .fold(Price::ZERO, |total, line| total.plus(line.line_total()))
    }

    /// Stores the session and, on the guest-to-logged-in transition, runs a
    /// reconciliation pass. Sync failure is logged, never surfaced; the local
    /// cart stays authoritative.
    pub async fn login(&mut self, token: BearerToken) {
        let was_guest = !self.session.is_logged_in();
        self.session = AuthSession::LoggedIn(token);

        if was_guest
            && let Err(error) = self.sync_with_remote().await
        {
            warn!(%error, "cart sync after login failed");
        }
    }

    /// Adopts a session restored from a previous run without triggering the
    /// login reconciliation pass.
    pub fn restore_session(&mut self, session: AuthSession) {
        self.session = session;
    }

    /// Drops the session. The local cart is kept as-is for guest browsing.
    pub fn logout(&mut self) {
        self.session = AuthSession::Guest;
    }

    /// Adds one of `item` to the cart.
    ///
    /// If a line with the same id exists its quantity is incremented,
    /// otherwise a new line with quantity 1 is appended. The remote cart is
    /// updated best-effort; a failure there never rolls back the local add.
    pub async fn add_item(&mut self, item: MenuItem) {
        let id = item.id.clone();

        match self.lines.iter_mut().find(|line| line.id == id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(item.into_cart_line()),
        }

        self.persist();

        let Some(quantity) = self.quantity_of(&id) else {
            return;
        };

        if let Some(token) = self.session.token().cloned()
            && let Err(error) = self.push_line(token, id.clone(), quantity).await
        {
            warn!(%error, item = %id, "remote cart add failed");
        }
    }

    /// Removes the line with the given id; no-op when absent.
    pub async fn remove_item(&mut self, id: &ItemId) {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != *id);

        if self.lines.len() == before {
            return;
        }

        self.persist();

        if let Some(token) = self.session.token().cloned()
            && let Err(error) = self.delete_remote_line(token, id).await
        {
            warn!(%error, item = %id, "remote cart remove failed");
        }
    }

    /// Sets a line's quantity to an absolute value.
    ///
    /// A quantity of 0 removes the line entirely; an id with no line is a
    /// no-op. The remote mirror is an update or a delete accordingly.
    pub async fn set_quantity(&mut self, id: &ItemId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id).await;

            return;
        }

        let Some(line) = self.lines.iter_mut().find(|line| line.id == *id) else {
            return;
        };

        line.quantity = quantity;
        self.persist();

        if let Some(token) = self.session.token().cloned()
            && let Err(error) = self.update_remote_line(token, id, quantity).await
        {
            warn!(%error, item = %id, "remote cart update failed");
        }
    }

    /// Adjusts a line's quantity by a signed delta; at or below zero the line
    /// is removed.
    pub async fn adjust_quantity(&mut self, id: &ItemId, delta: i64) {
        let Some(current) = self.quantity_of(id) else {
            return;
        };

        let adjusted = i64::from(current).saturating_add(delta);
        let quantity = u32::try_from(adjusted.max(0)).unwrap_or(u32::MAX);

        self.set_quantity(id, quantity).await;
    }

    /// Empties the cart locally and, best-effort, remotely.
    pub async fn clear(&mut self) {
        self.lines.clear();
        self.persist();

        if let Some(token) = self.session.token().cloned()
            && let Err(error) = self.api.clear_cart(token).await
        {
            warn!(%error, "remote cart clear failed");
        }
    }

    /// Reconciles the local cart with the remote cart.
    ///
    /// The remote cart is the base; local quantities are added on id
    /// collision and local-only lines are appended, reflecting guest
    /// browsing followed by login. The merged cart is pushed line by line,
    /// then the server's canonical cart is re-fetched and replaces local
    /// state. Re-entrant calls while a pass is in flight are no-ops.
    ///
    /// # Errors
    ///
    /// Returns an error when logged out or when any backend request fails;
    /// in the latter case the pre-sync local cart is left fully intact.
    pub async fn sync_with_remote(&mut self) -> Result<(), SyncError> {
        if self.sync_in_flight {
            debug!("cart sync already in flight, skipping");

            return Ok(());
        }

        let Some(token) = self.session.token().cloned() else {
            return Err(SyncError::NotLoggedIn);
        };

        self.sync_in_flight = true;
        let result = self.sync_pass(token).await;
        self.sync_in_flight = false;

        result
    }

    async fn sync_pass(&mut self, token: BearerToken) -> Result<(), SyncError> {
        let remote = self.api.fetch_cart(token.clone()).await?;

        let mut merged: Vec<CartLine> = remote
            .iter()
            .map(|line| line.to_cart_line())
            .filter(|line| line.quantity > 0)
            .collect();

        for local in &self.lines {
            match merged.iter_mut().find(|line| line.id == local.id) {
                Some(line) => line.quantity = line.quantity.saturating_add(local.quantity),
                None => merged.push(local.clone()),
            }
        }

        debug!(
            local = self.lines.len(),
            remote = remote.len(),
            merged = merged.len(),
            "pushing merged cart"
        );

        for line in &merged {
            self.api
                .upsert_cart_line(
                    token.clone(),
                    CartLineUpsert {
                        menu_item_id: line.id.clone(),
                        quantity: line.quantity,
                    },
                )
                .await?;
        }

        // The server is the source of truth after the push.
        let canonical = self.api.fetch_cart(token).await?;

        self.lines = canonical
            .iter()
            .map(|line| line.to_cart_line())
            .filter(|line| line.quantity > 0)
            .collect();
        self.persist();

        Ok(())
    }

    /// Validates the checkout forms, submits the order, and clears the cart
    /// on a confirmed success.
    ///
    /// # Errors
    ///
    /// Validation and submission failures are surfaced and leave the cart
    /// untouched so the order can be retried.
    pub async fn place_order(
        &mut self,
        shipping: ShippingInfo,
        payment: PaymentMethod,
        delivery_fee: Price,
    ) -> Result<Order, OrderError> {
        shipping.validate()?;
        payment.validate()?;

        if self.lines.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let Some(token) = self.session.token().cloned() else {
            return Err(OrderError::NotLoggedIn);
        };

        let totals = OrderTotals::compute(self.subtotal(), delivery_fee);

        let request = NewOrder {
            items: self.lines.iter().map(OrderLine::from).collect(),
            shipping_info: shipping,
            payment_method: payment.label().to_string(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            delivery_fee: totals.delivery_fee,
            total: totals.total,
        };

        let order = self
            .api
            .submit_order(token, request)
            .await
            .map_err(OrderError::Submit)?;

        self.clear().await;

        Ok(order)
    }

    fn quantity_of(&self, id: &ItemId) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.id == *id)
            .map(|line| line.quantity)
    }

    fn persist(&self) {
        if let Err(error) = self.storage.save(&self.lines) {
            warn!(%error, "failed to persist cart, in-memory state kept");
        }
    }

    async fn push_line(
        &self,
        token: BearerToken,
        id: ItemId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        self.api
            .upsert_cart_line(
                token,
                CartLineUpsert {
                    menu_item_id: id,
                    quantity,
                },
            )
            .await
    }

    async fn update_remote_line(
        &self,
        token: BearerToken,
        id: &ItemId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        match self.resolve_entry(&token, id).await? {
            Some(entry) => {
                self.api
                    .set_cart_line_quantity(token, entry, quantity)
                    .await
            }
            // Not on the server yet; converge with an upsert instead.
            None => self.push_line(token, id.clone(), quantity).await,
        }
    }

    async fn delete_remote_line(&self, token: BearerToken, id: &ItemId) -> Result<(), ApiError> {
        let Some(entry) = self.resolve_entry(&token, id).await? else {
            return Ok(());
        };

        self.api.delete_cart_line(token, entry).await
    }

    /// Finds the server-assigned entry id for a product by fetching the
    /// remote cart and matching; the mapping is never cached.
    async fn resolve_entry(
        &self,
        token: &BearerToken,
        id: &ItemId,
    ) -> Result<Option<EntryId>, ApiError> {
        let remote = self.api.fetch_cart(token.clone()).await?;

        Ok(remote
            .into_iter()
            .find(|line| line.menu_item.id == *id)
            .map(|line| line.entry_id))
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("session", &self.session)
            .field("sync_in_flight", &self.sync_in_flight)
            .finish_non_exhaustive()
    }
}
