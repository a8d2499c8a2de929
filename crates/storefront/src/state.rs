//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::ApiClient;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration and the content
/// backend client. There is no other shared mutable state - every page
/// fetches fresh data and discards it with the response.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    backend: ApiClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let backend = ApiClient::new(&config.backend);
        Self {
            inner: Arc::new(AppStateInner { config, backend }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the content backend client.
    #[must_use]
    pub fn backend(&self) -> &ApiClient {
        &self.inner.backend
    }
}
