//! Integration tests for Tienda.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tienda-integration-tests
//! ```
//!
//! Each test starts its own storefront on an ephemeral port with the sample
//! catalog and an in-memory session store, then drives it over HTTP with a
//! cookie-keeping client, the way a browser would.
//!
//! # Test Categories
//!
//! - `storefront_cart` - Grid, cart and checkout flows
//! - `storefront_contact` - Contact form delivery and its effect on the cart

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use reqwest::Client;
use serde_json::Value;
use tienda_core::Catalog;
use tienda_storefront::catalog::CatalogStore;
use tienda_storefront::config::StorefrontConfig;
use tienda_storefront::services::{ContactSink, WebhookClient};
use tienda_storefront::state::AppState;
use tower_sessions::MemoryStore;
use url::Url;

/// A running storefront and a client with its own cookie jar.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Start a storefront that logs contact submissions.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind a local port.
    pub async fn start() -> Self {
        Self::start_with(ContactSink::Log, CatalogStore::ready(Catalog::fallback())).await
    }

    /// Start a storefront posting contact submissions to `webhook`.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind a local port.
    pub async fn with_webhook(webhook: &Url) -> Self {
        let sink = ContactSink::Webhook(
            WebhookClient::new(webhook.clone()).expect("Failed to build webhook client"),
        );
        Self::start_with(sink, CatalogStore::ready(Catalog::fallback())).await
    }

    /// Start a storefront from explicit parts.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind a local port.
    pub async fn start_with(contact: ContactSink, catalog: CatalogStore) -> Self {
        let state = AppState::with_parts(StorefrontConfig::default(), catalog, contact);
        let addr = serve(tienda_storefront::app(state, MemoryStore::default())).await;

        Self {
            client: new_client(),
            base_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL for a path on the storefront.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A second browser against the same storefront.
    #[must_use]
    pub fn other_browser(&self) -> Self {
        Self {
            client: new_client(),
            base_url: self.base_url.clone(),
        }
    }

    /// POST a form and return the response.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Request failed")
    }

    /// GET a path and return the body text.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not text.
    pub async fn get_text(&self, path: &str) -> String {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed")
            .text()
            .await
            .expect("Body was not text")
    }

    /// Current value of the cart count badge.
    ///
    /// # Panics
    ///
    /// Panics if the badge does not contain a number.
    pub async fn cart_count(&self) -> u32 {
        let badge = self.get_text("/cart/count").await;
        let digits = badge
            .split("</span>")
            .next()
            .and_then(|head| head.rsplit('>').next())
            .unwrap_or_default()
            .trim();
        digits.parse().expect("Cart count badge has no number")
    }
}

/// Parse the `HX-Trigger` header of a response.
///
/// # Panics
///
/// Panics if the header is missing or not JSON.
#[must_use]
pub fn hx_trigger(response: &reqwest::Response) -> Value {
    hx_events(response, "hx-trigger")
}

/// Parse the `HX-Trigger-After-Swap` header of a response.
///
/// # Panics
///
/// Panics if the header is missing or not JSON.
#[must_use]
pub fn hx_trigger_after_swap(response: &reqwest::Response) -> Value {
    hx_events(response, "hx-trigger-after-swap")
}

fn hx_events(response: &reqwest::Response, header: &str) -> Value {
    let raw = response
        .headers()
        .get(header)
        .unwrap_or_else(|| panic!("Missing {header} header"))
        .to_str()
        .unwrap_or_else(|_| panic!("{header} is not ASCII"));
    serde_json::from_str(raw).unwrap_or_else(|_| panic!("{header} is not JSON"))
}

/// A local webhook endpoint that records what it receives.
pub struct WebhookRecorder {
    pub url: Url,
    received: Arc<Mutex<Vec<Value>>>,
}

impl WebhookRecorder {
    /// Start a webhook that answers every POST with `status`.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind a local port.
    pub async fn start(status: StatusCode) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route("/hook", post(record))
            .with_state((received.clone(), status));
        let addr = serve(router).await;

        Self {
            url: Url::parse(&format!("http://{addr}/hook")).expect("Invalid webhook URL"),
            received,
        }
    }

    /// Records received so far.
    #[must_use]
    pub fn received(&self) -> Vec<Value> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

type RecorderState = (Arc<Mutex<Vec<Value>>>, StatusCode);

async fn record(
    State((received, status)): State<RecorderState>,
    Json(body): Json<Value>,
) -> StatusCode {
    received
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(body);
    status
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
