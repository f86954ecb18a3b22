//! Add-to-cart client.
//!
//! A right swipe ends in one `POST /cart/add/{id}/` against the store. The
//! request carries the CSRF token twice, as the `csrfmiddlewaretoken` form
//! field and as the `X-CSRFToken` header. The response only decides which
//! toast is shown; it never holds up or reverses the swipe.
//!
//! [`CartDispatcher`] runs each request as its own background task with a
//! result channel, so the deck can move on immediately and the owner can
//! cancel everything still in flight on teardown.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use reqwest::cookie::Jar;
use reqwest::header::REFERER;
use reqwest::Url;
use serde::Deserialize;
use tokio::sync::oneshot;
use tokio::task::AbortHandle;

use crate::config::{join_url, AppConfig};
use crate::csrf::{extract_csrf_token, CSRF_FIELD, CSRF_HEADER};
use crate::error::{CartError, CartResult};
use crate::types::ItemId;

/// Fallback text when the store gives no usable message
pub const GENERIC_CART_ERROR: &str = "Error adding to cart";

/// Body of a 2xx add-to-cart response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddToCartResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub cart_count: Option<u32>,
}

/// The store's logical answer to an add-to-cart request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOutcome {
    Added {
        message: String,
        cart_count: Option<u32>,
    },
    Rejected {
        error: String,
    },
}

impl CartOutcome {
    pub fn from_response(response: AddToCartResponse) -> Self {
        if response.success {
            CartOutcome::Added {
                message: response
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Added to cart".to_string()),
                cart_count: response.cart_count,
            }
        } else {
            CartOutcome::Rejected {
                error: response
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| GENERIC_CART_ERROR.to_string()),
            }
        }
    }
}

/// HTTP client for the store's cart endpoints.
pub struct CartClient {
    http: reqwest::Client,
    base_url: String,
    browse_url: String,
    csrf_token: RwLock<Option<String>>,
}

impl std::fmt::Debug for CartClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartClient")
            .field("base_url", &self.base_url)
            .field("has_csrf_token", &self.csrf_token.read().is_some())
            .finish()
    }
}

impl CartClient {
    /// Build a client for the store at `config.base_url`.
    ///
    /// `session_id` seeds the store's `sessionid` cookie so requests run as
    /// a logged-in user.
    pub fn new(config: &AppConfig, session_id: Option<&str>) -> CartResult<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| CartError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let jar = Jar::default();
        if let Some(session_id) = session_id {
            jar.add_cookie_str(&format!("sessionid={}; Path=/", session_id), &base);
        }

        let http = reqwest::Client::builder()
            .cookie_provider(Arc::new(jar))
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            browse_url: config.browse_url(),
            csrf_token: RwLock::new(None),
        })
    }

    pub fn with_csrf_token(self, token: impl Into<String>) -> Self {
        self.set_csrf_token(token);
        self
    }

    pub fn set_csrf_token(&self, token: impl Into<String>) {
        *self.csrf_token.write() = Some(token.into());
    }

    pub fn csrf_token(&self) -> Option<String> {
        self.csrf_token.read().clone()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the add endpoint for one item
    pub fn add_url(&self, item_id: ItemId) -> String {
        join_url(&self.base_url, &format!("/cart/add/{}/", item_id))
    }

    /// Load the browse page and keep the CSRF token rendered into it.
    ///
    /// Also primes the cookie jar with the store's `csrftoken` cookie.
    pub async fn fetch_csrf_token(&self) -> CartResult<Option<String>> {
        let response = self.http.get(&self.browse_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CartError::Http(status.as_u16()));
        }

        let html = response.text().await?;
        let token = extract_csrf_token(&html);
        match &token {
            Some(token) => {
                tracing::debug!(url = %self.browse_url, "Found CSRF token on browse page");
                self.set_csrf_token(token.clone());
            }
            None => tracing::warn!(url = %self.browse_url, "Browse page has no CSRF field"),
        }
        Ok(token)
    }

    /// Ask the store to add one item to the cart.
    pub async fn add_to_cart(&self, item_id: ItemId) -> CartResult<CartOutcome> {
        let url = self.add_url(item_id);
        let token = self.csrf_token().unwrap_or_default();
        if token.is_empty() {
            tracing::warn!(%item_id, "Posting to cart without a CSRF token");
        }

        tracing::debug!(%url, "Adding item to cart");
        let response = self
            .http
            .post(&url)
            .header(CSRF_HEADER, token.as_str())
            .header(REFERER, self.browse_url.as_str())
            .form(&[(CSRF_FIELD, token.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CartError::Http(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: AddToCartResponse =
            serde_json::from_str(&body).map_err(|e| CartError::Decode(e.to_string()))?;
        Ok(CartOutcome::from_response(parsed))
    }
}

/// An add-to-cart call running in the background
#[derive(Debug)]
pub struct CartRequest {
    pub item_id: ItemId,
    rx: oneshot::Receiver<CartResult<CartOutcome>>,
}

impl CartRequest {
    /// Wait for the result. A cancelled task reports [`CartError::Cancelled`].
    pub async fn outcome(self) -> CartResult<CartOutcome> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(CartError::Cancelled),
        }
    }
}

/// Fire-and-forget dispatch of cart requests, cancellable as a group.
pub struct CartDispatcher {
    client: Arc<CartClient>,
    in_flight: Mutex<Vec<AbortHandle>>,
}

impl CartDispatcher {
    pub fn new(client: Arc<CartClient>) -> Self {
        Self {
            client,
            in_flight: Mutex::new(Vec::new()),
        }
    }

    pub fn client(&self) -> &Arc<CartClient> {
        &self.client
    }

    /// Start one request. Must be called from within a tokio runtime.
    pub fn dispatch(&self, item_id: ItemId) -> CartRequest {
        let (tx, rx) = oneshot::channel();
        let client = Arc::clone(&self.client);

        let handle = tokio::spawn(async move {
            let result = client.add_to_cart(item_id).await;
            // Receiver may be gone if nobody cares about the toast anymore
            let _ = tx.send(result);
        });

        let mut in_flight = self.in_flight.lock();
        in_flight.retain(|h| !h.is_finished());
        in_flight.push(handle.abort_handle());

        CartRequest { item_id, rx }
    }

    /// Number of requests not yet finished
    pub fn in_flight(&self) -> usize {
        let mut in_flight = self.in_flight.lock();
        in_flight.retain(|h| !h.is_finished());
        in_flight.len()
    }

    /// Abort every unfinished request, returning how many were aborted.
    pub fn cancel_all(&self) -> usize {
        let handles: Vec<AbortHandle> = self.in_flight.lock().drain(..).collect();
        let mut cancelled = 0;
        for handle in handles {
            if !handle.is_finished() {
                handle.abort();
                cancelled += 1;
            }
        }
        if cancelled > 0 {
            tracing::debug!(cancelled, "Cancelled in-flight cart requests");
        }
        cancelled
    }
}

impl Drop for CartDispatcher {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
