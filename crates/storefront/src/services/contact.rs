//! Contact submission delivery.
//!
//! The storefront never places orders. A contact submission (customer details
//! plus a cart snapshot) is handed to a sink: by default it is only logged;
//! when a webhook is configured it is POSTed there as JSON.

use thiserror::Error;
use tienda_core::ContactSubmission;
use tracing::{info, instrument};
use url::Url;

/// User agent sent with webhook requests.
const USER_AGENT: &str = concat!("tienda-storefront/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when delivering a submission.
#[derive(Debug, Error)]
pub enum ContactSinkError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Webhook returned an error response.
    #[error("Webhook error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Where contact submissions go.
#[derive(Clone, Debug)]
pub enum ContactSink {
    /// Log the submission and do nothing else.
    Log,
    /// POST the submission to an external endpoint.
    Webhook(WebhookClient),
}

impl ContactSink {
    /// Build the sink for an optional webhook URL.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn from_webhook(url: Option<&Url>) -> Result<Self, ContactSinkError> {
        Ok(match url {
            Some(url) => Self::Webhook(WebhookClient::new(url.clone())?),
            None => Self::Log,
        })
    }

    /// Deliver a submission.
    ///
    /// # Errors
    ///
    /// Returns error if the webhook cannot be reached or rejects the record.
    #[instrument(skip_all, fields(email = %submission.details.email))]
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<(), ContactSinkError> {
        match self {
            Self::Log => {
                let record = serde_json::to_string(submission).unwrap_or_default();
                info!(
                    name = %submission.details.name,
                    total = %submission.total,
                    lines = submission.cart.items().len(),
                    record = %record,
                    "Contact form submitted"
                );
                Ok(())
            }
            Self::Webhook(client) => client.post(submission).await,
        }
    }
}

/// HTTP client for the contact webhook.
#[derive(Clone, Debug)]
pub struct WebhookClient {
    client: reqwest::Client,
    url: Url,
}

impl WebhookClient {
    /// Create a new webhook client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(url: Url) -> Result<Self, ContactSinkError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, url })
    }

    async fn post(&self, submission: &ContactSubmission) -> Result<(), ContactSinkError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(submission)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ContactSinkError::Api {
                status: status.as_u16(),
                message,
            });
        }

        info!(url = %self.url, "Contact submission delivered");
        Ok(())
    }
}
