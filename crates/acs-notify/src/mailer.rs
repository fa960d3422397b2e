//! Outbound email delivery.
//!
//! The handler composes an [`OutboundEmail`] and hands it to a [`Mailer`].
//! The trait exists so the event handler can be tested against a recording
//! mock; production uses [`HttpMailer`] against the provider's send API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// A fully composed email, ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    /// Destination address.
    pub to: String,
    /// Verified sender address.
    pub from: String,
    /// Reply-To address, so replying goes to the form submitter.
    pub reply_to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Something that can deliver an [`OutboundEmail`].
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one email.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails; the caller decides whether that
    /// is fatal.
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}

/// Mailer backed by an HTTP send API.
#[derive(Debug)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpMailer {
    /// Create a mailer for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token,
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let mut request = self.client.post(&self.endpoint).json(email);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(to = %email.to, "email accepted by API");
        Ok(())
    }
}
