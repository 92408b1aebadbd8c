//! Cart store errors.

use thiserror::Error;

use crate::{api::ApiError, checkout::CheckoutError};

/// Errors from an explicit cart reconciliation pass.
///
/// Callers that trigger sync in the background (e.g. on login) log these and
/// move on; the local cart is untouched whenever sync fails.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Sync requires an authenticated session.
    #[error("cannot sync the cart while logged out")]
    NotLoggedIn,

    /// A backend request failed; no partial merge was applied.
    #[error("cart sync aborted")]
    Api(#[from] ApiError),
}

/// Errors placing an order. All of these are surfaced to the user and leave
/// the cart intact so the order can be retried.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A checkout form field failed validation.
    #[error(transparent)]
    Validation(#[from] CheckoutError),

    /// There is nothing in the cart to order.
    #[error("the cart is empty")]
    EmptyCart,

    /// Ordering requires an authenticated session.
    #[error("log in to place an order")]
    NotLoggedIn,

    /// The backend rejected or failed the submission.
    #[error("order submission failed")]
    Submit(#[source] ApiError),
}
