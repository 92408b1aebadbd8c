//! Trolley
//!
//! Client-side cart, checkout, and order-history library for a food-ordering
//! storefront. The local cart is authoritative and durably persisted; a
//! remote cart held by the storefront backend is reconciled with it on login
//! and mirrored best-effort after every mutation. Persistence, business
//! rules, and payment processing all live behind the backend's REST API.

pub mod api;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod money;
pub mod orders;
pub mod prelude;
pub mod storage;
