//! HTTP client for the storefront REST API.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, Response};
use thiserror::Error;

use crate::{
    api::records::{
        Banner, CartLineUpsert, Category, EntryId, MenuItem, NewOrder, QuantityUpdate,
        RemoteCartLine,
    },
    auth::BearerToken,
    cart::models::ItemId,
    orders::Order,
};

/// Every backend operation the storefront consumes.
///
/// Implemented over HTTP by [`HttpStorefrontClient`]; the cart store only
/// depends on this trait so tests run against a mock backend.
#[automock]
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Fetch the menu catalog.
    async fn menu_items(&self) -> Result<Vec<MenuItem>, ApiError>;

    /// Fetch the menu categories.
    async fn categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Fetch active and inactive storefront banners.
    async fn banners(&self) -> Result<Vec<Banner>, ApiError>;

    /// Fetch the authenticated user's remote cart.
    async fn fetch_cart(&self, token: BearerToken) -> Result<Vec<RemoteCartLine>, ApiError>;

    /// Set the remote line for a product to an absolute quantity.
    async fn upsert_cart_line(
        &self,
        token: BearerToken,
        line: CartLineUpsert,
    ) -> Result<(), ApiError>;

    /// Set an existing remote entry's quantity.
    async fn set_cart_line_quantity(
        &self,
        token: BearerToken,
        entry: EntryId,
        quantity: u32,
    ) -> Result<(), ApiError>;

    /// Remove a remote cart entry.
    async fn delete_cart_line(&self, token: BearerToken, entry: EntryId) -> Result<(), ApiError>;

    /// Empty the remote cart.
    async fn clear_cart(&self, token: BearerToken) -> Result<(), ApiError>;

    /// Submit a completed order.
    async fn submit_order(&self, token: BearerToken, order: NewOrder) -> Result<Order, ApiError>;

    /// Fetch the authenticated user's order history.
    async fn my_orders(&self, token: BearerToken) -> Result<Vec<Order>, ApiError>;

    /// Fetch a single order for confirmation display.
    async fn order(&self, token: BearerToken, id: ItemId) -> Result<Order, ApiError>;
}

/// `reqwest`-backed implementation of [`StorefrontApi`].
#[derive(Debug, Clone)]
pub struct HttpStorefrontClient {
    base_url: String,
    http: Client,
}

impl HttpStorefrontClient {
    /// Creates a client for the given API base URL, e.g.
    /// `"https://re-eat-backend.onrender.com"`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        HttpStorefrontClient {
            base_url,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        Err(ApiError::UnexpectedResponse(format!(
            "request failed with status {status}: {body}"
        )))
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontClient {
    async fn menu_items(&self) -> Result<Vec<MenuItem>, ApiError> {
        let response = self.http.get(self.url("/api/menu-items")).send().await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let response = self.http.get(self.url("/api/categories")).send().await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn banners(&self) -> Result<Vec<Banner>, ApiError> {
        let response = self.http.get(self.url("/api/banners")).send().await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn fetch_cart(&self, token: BearerToken) -> Result<Vec<RemoteCartLine>, ApiError> {
        let response = self
            .http
            .get(self.url("/api/orders/cart"))
            .bearer_auth(token.as_str())
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn upsert_cart_line(
        &self,
        token: BearerToken,
        line: CartLineUpsert,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/orders/cart"))
            .bearer_auth(token.as_str())
            .json(&line)
            .send()
            .await?;

        Self::check(response).await?;

        Ok(())
    }

    async fn set_cart_line_quantity(
        &self,
        token: BearerToken,
        entry: EntryId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/orders/cart/{}", entry.as_str()));

        let response = self
            .http
            .put(url)
            .bearer_auth(token.as_str())
            .json(&QuantityUpdate { quantity })
            .send()
            .await?;

        Self::check(response).await?;

        Ok(())
    }

    async fn delete_cart_line(&self, token: BearerToken, entry: EntryId) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/orders/cart/{}", entry.as_str()));

        let response = self
            .http
            .delete(url)
            .bearer_auth(token.as_str())
            .send()
            .await?;

        Self::check(response).await?;

        Ok(())
    }

    async fn clear_cart(&self, token: BearerToken) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url("/api/orders/cart"))
            .bearer_auth(token.as_str())
            .send()
            .await?;

        Self::check(response).await?;

        Ok(())
    }

    async fn submit_order(&self, token: BearerToken, order: NewOrder) -> Result<Order, ApiError> {
        let response = self
            .http
            .post(self.url("/api/orders"))
            .bearer_auth(token.as_str())
            .json(&order)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn my_orders(&self, token: BearerToken) -> Result<Vec<Order>, ApiError> {
        let response = self
            .http
            .get(self.url("/api/orders/my-orders"))
            .bearer_auth(token.as_str())
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn order(&self, token: BearerToken, id: ItemId) -> Result<Order, ApiError> {
        let url = self.url(&format!("/api/orders/{}", id.as_str()));

        let response = self
            .http
            .get(url)
            .bearer_auth(token.as_str())
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }
}

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-2xx response or unexpected body.
    #[error("unexpected response from backend: {0}")]
    UnexpectedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = HttpStorefrontClient::new("http://localhost:5000/");

        assert_eq!(client.url("/api/orders/cart"), "http://localhost:5000/api/orders/cart");
    }
}
