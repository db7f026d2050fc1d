//! gazette-mailgun
//!
//! Mailgun messages-API client. Submits one HTML message per call using
//! basic authentication (`api:<key>`); acceptance is the only success
//! signal, and every failure surfaces as a tagged
//! [`gazette_core::GazetteError`] for the notifier to absorb.
#![warn(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use gazette_core::{GazetteError, MailRelay, OutboundEmail, send_with_deadline};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.mailgun.net";

/// Deadline for one delivery call.
const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Messages-API client bound to one sending domain.
#[derive(Clone)]
pub struct MailgunClient {
    http: reqwest::Client,
    base_url: String,
    domain: String,
    api_key: String,
    deadline: Duration,
}

impl MailgunClient {
    /// Build a client for the given sending domain and API key.
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        domain: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            domain: domain.into(),
            api_key: api_key.into(),
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Point the client at a different base URL (tests, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        let trimmed = self.base_url.trim_end_matches('/').len();
        self.base_url.truncate(trimmed);
        self
    }

    /// Override the per-call deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

#[async_trait]
impl MailRelay for MailgunClient {
    async fn deliver(&self, email: &OutboundEmail) -> Result<(), GazetteError> {
        debug!(to = %email.to, subject = %email.subject, "submitting message");

        send_with_deadline(
            "mailgun messages",
            self.http
                .post(format!("{}/v3/{}/messages", self.base_url, self.domain))
                .basic_auth("api", Some(&self.api_key))
                .form(&[
                    ("from", email.from.as_str()),
                    ("to", email.to.as_str()),
                    ("subject", email.subject.as_str()),
                    ("html", email.html.as_str()),
                ]),
            self.deadline,
        )
        .await
        .map_err(|e| GazetteError::mail_relay(e.to_string()))?;

        Ok(())
    }
}
