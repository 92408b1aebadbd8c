//! Authentication session state.
//!
//! The backend owns accounts and token issuance; this module only carries the
//! bearer token and login flag the cart needs. The logged-out to logged-in
//! transition is what triggers cart reconciliation.

use std::fmt;

/// A bearer token for the storefront API.
///
/// The token value is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        BearerToken(token.into())
    }

    /// Returns the raw token for an `Authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

/// The user's authentication state as seen by the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthSession {
    /// Browsing without an account.
    #[default]
    Guest,

    /// Logged in with a bearer token.
    LoggedIn(BearerToken),
}

impl AuthSession {
    /// Whether the session is authenticated.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(self, AuthSession::LoggedIn(_))
    }

    /// Returns the bearer token when logged in.
    #[must_use]
    pub fn token(&self) -> Option<&BearerToken> {
        match self {
            AuthSession::Guest => None,
            AuthSession::LoggedIn(token) => Some(token),
        }
    }
}
