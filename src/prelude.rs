//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    api::{ApiError, HttpStorefrontClient, MenuItem, StorefrontApi},
    auth::{AuthSession, BearerToken},
    cart::{CartLine, CartStore, ItemId, OrderError, SyncError},
    checkout::{CheckoutError, OrderTotals, PaymentMethod, ShippingInfo},
    money::Price,
    orders::{Order, OrderStatus},
    storage::{CartStorage, JsonFileStorage},
};
