use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use filelight_core::Browser;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub browser: Arc<Browser>,
    /// Revoked JWT token IDs (jti). Tokens in this map are rejected by the admin extractor.
    pub revoked_tokens: Arc<DashMap<String, Instant>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let browser = Browser::new(&config.browse)?;
        tracing::info!(root = %browser.root().path().display(), "browsing root ready");
        Ok(Self {
            config: Arc::new(config),
            browser: Arc::new(browser),
            revoked_tokens: Arc::new(DashMap::new()),
        })
    }
}
