//! Storefront REST API client and wire records.

pub mod client;
pub mod records;

pub use client::{ApiError, HttpStorefrontClient, MockStorefrontApi, StorefrontApi};
pub use records::{
    Banner, CartLineUpsert, Category, EntryId, MenuItem, NewOrder, RemoteCartLine,
};
