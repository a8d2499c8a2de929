//! REST client for the remote content backend.
//!
//! # Architecture
//!
//! - The backend is the source of truth - no local sync, no caching, direct
//!   API calls on every page load
//! - Every read endpoint returns a `{success, data}` envelope; a false
//!   `success` is treated identically to a transport error
//! - Raw documents are normalized into the canonical types in [`types`] at
//!   this boundary
//!
//! # Failure contract
//!
//! Reads fail soft: any transport error, malformed body, non-2xx status, or
//! false envelope is logged and degrades to an empty collection (or `None`
//! for single-item lookups). An empty list renders as a "no content" state,
//! which is the intended degradation for a marketing page.
//!
//! The single write, [`ApiClient::send_message`], fails loud: a silent
//! failure would leave the visitor believing their message was sent, so the
//! error carries text the contact page must surface.

mod types;

pub use types::{
    Category, CategoryRef, Certificate, ContactEntry, MessagePayload, Product, TeamMember,
};

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use crate::config::BackendApiConfig;
use types::{Envelope, MessageResponse, RawCategory, RawCertificate, RawContactChannel,
    RawProduct, RawTeamMember};

/// Fallback text when a failed message submission carries no detail.
const GENERIC_SEND_FAILURE: &str = "Failed to send message. Please try again later.";

/// Errors that can occur when talking to the content backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status code.
    #[error("HTTP status {0}")]
    Status(u16),

    /// Response body was not the expected JSON shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Read envelope carried `success: false`.
    #[error("backend reported failure")]
    Envelope,

    /// Write rejected with a message intended for the end user.
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// Text safe to show to the visitor after a failed submission.
    ///
    /// Only [`ApiError::Rejected`] carries backend-provided wording; every
    /// other failure collapses to a generic message.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected(message) => message,
            _ => GENERIC_SEND_FAILURE,
        }
    }
}

/// Client for the content backend REST API.
///
/// Cheaply cloneable; the single point of contact with the backend. Owns no
/// state beyond the base URL and the connection pool inside `reqwest`.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    api_url: String,
}

impl ApiClient {
    /// Create a new backend API client.
    #[must_use]
    pub fn new(config: &BackendApiConfig) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.trim_end_matches('/').to_string(),
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.api_url)
    }

    /// Fetch a read endpoint and unwrap its `{success, data}` envelope.
    async fn fetch_list<R: DeserializeOwned>(&self, path: &str) -> Result<Vec<R>, ApiError> {
        let response = self.inner.client.get(self.endpoint(path)).send().await?;

        let status = response.status();
        // Body text is read before the status check so parse failures on
        // error pages don't mask the status itself
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let envelope: Envelope<R> = serde_json::from_str(&body)?;
        if !envelope.success {
            return Err(ApiError::Envelope);
        }

        Ok(envelope.data)
    }

    /// Fetch a read endpoint, normalizing documents and degrading to an
    /// empty list on any failure.
    async fn read_soft<R, T>(&self, path: &str) -> Vec<T>
    where
        R: DeserializeOwned,
        T: From<R>,
    {
        match self.fetch_list::<R>(path).await {
            Ok(raw) => raw.into_iter().map(T::from).collect(),
            Err(e) => {
                tracing::error!(endpoint = path, error = %e, "backend read failed");
                Vec::new()
            }
        }
    }

    // =========================================================================
    // Read Operations (fail soft)
    // =========================================================================

    /// List all product categories.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Vec<Category> {
        self.read_soft::<RawCategory, _>("categories").await
    }

    /// List all products.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Vec<Product> {
        self.read_soft::<RawProduct, _>("products").await
    }

    /// Look up a single product by its backend-assigned identifier.
    ///
    /// List-then-find; O(n) per call is acceptable because there is no
    /// caching layer. Returns the first match on (pathological) duplicate
    /// ids, and `None` both when absent and when the list itself fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product_by_id(&self, id: &str) -> Option<Product> {
        self.list_products()
            .await
            .into_iter()
            .find(|product| product.id == id)
    }

    /// List the products belonging to a category slug. List-then-filter.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn list_products_by_category(&self, slug: &str) -> Vec<Product> {
        self.list_products()
            .await
            .into_iter()
            .filter(|product| product.category.slug == slug)
            .collect()
    }

    /// List all certificates.
    #[instrument(skip(self))]
    pub async fn list_certificates(&self) -> Vec<Certificate> {
        self.read_soft::<RawCertificate, _>("certificates").await
    }

    /// List all team members.
    #[instrument(skip(self))]
    pub async fn list_team_members(&self) -> Vec<TeamMember> {
        self.read_soft::<RawTeamMember, _>("team").await
    }

    /// Fetch contact information as a mapping from channel type to its
    /// `{label, value}` entry. Degrades to an empty map on failure.
    #[instrument(skip(self))]
    pub async fn get_contact_info(&self) -> HashMap<String, ContactEntry> {
        match self.fetch_list::<RawContactChannel>("contact").await {
            Ok(channels) => fold_channels(channels),
            Err(e) => {
                tracing::error!(endpoint = "contact", error = %e, "backend read failed");
                HashMap::new()
            }
        }
    }

    // =========================================================================
    // Write Operations (fail loud)
    // =========================================================================

    /// Submit a contact message.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport failure or non-success envelope.
    /// When the backend supplies a `message` it is carried verbatim in
    /// [`ApiError::Rejected`] for display to the visitor.
    #[instrument(skip(self, payload), fields(email = %payload.email))]
    pub async fn send_message(&self, payload: &MessagePayload) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("messages"))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // The backend responds with a JSON body even on rejection; prefer
        // its message over the bare status code when one is present
        let parsed: Result<MessageResponse, _> = serde_json::from_str(&body);

        match parsed {
            Ok(ack) if ack.success => Ok(()),
            Ok(ack) => Err(ApiError::Rejected(
                ack.message
                    .unwrap_or_else(|| GENERIC_SEND_FAILURE.to_string()),
            )),
            Err(_) if !status.is_success() => Err(ApiError::Status(status.as_u16())),
            Err(e) => Err(ApiError::Parse(e)),
        }
    }
}

// =============================================================================
// Pure Helpers
// =============================================================================

/// Fold the flat contact-channel list into a per-type mapping.
///
/// Duplicate types silently overwrite: last wins. The backend dashboard is
/// expected to keep types unique, so the fold does not warn.
fn fold_channels(channels: Vec<RawContactChannel>) -> HashMap<String, ContactEntry> {
    let mut info = HashMap::new();
    for channel in channels {
        info.insert(
            channel.channel_type,
            ContactEntry {
                label: channel.label,
                value: channel.value,
            },
        );
    }
    info
}

/// Format an RFC 3339 timestamp as a long human-readable date,
/// e.g. "January 5, 2026".
///
/// Pure formatting helper, no I/O. Unparsable input is returned unchanged
/// rather than rendered as a placeholder.
#[must_use]
pub fn format_date(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp).map_or_else(
        |_| timestamp.to_string(),
        |date| date.format("%B %-d, %Y").to_string(),
    )
}
