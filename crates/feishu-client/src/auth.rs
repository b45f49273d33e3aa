//! Tenant access token caching.
//!
//! Self-built apps exchange their `app_id` / `app_secret` for a tenant
//! access token valid for about two hours. The token is cached and reused
//! until it gets close to expiry, so a demo run fetches it once.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use feishu_shared::constants::TOKEN_REFRESH_MARGIN_SECS;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct TenantTokenRequest<'a> {
    pub app_id: &'a str,
    pub app_secret: &'a str,
}

/// The token endpoint does not use the `data` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct TenantTokenResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub tenant_access_token: Option<String>,
    /// Remaining validity in seconds.
    pub expire: Option<i64>,
}

// ---------------------------------------------------------------------------
// Cached entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Usable while more than the refresh margin remains.
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) < self.expires_at
    }
}

// ---------------------------------------------------------------------------
// Token cache
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    inner: Arc<RwLock<Option<CachedToken>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached token if it is still fresh.
    pub async fn get(&self) -> Option<String> {
        let guard = self.inner.read().await;
        guard
            .as_ref()
            .filter(|token| token.is_fresh(Utc::now()))
            .map(|token| token.value.clone())
    }

    /// Cache a token that stays valid for `expire_secs` from now.
    pub async fn store(&self, value: String, expire_secs: i64) {
        let expires_at = Utc::now() + Duration::seconds(expire_secs);
        let mut guard = self.inner.write().await;
        *guard = Some(CachedToken { value, expires_at });
        debug!(%expires_at, "Cached tenant access token");
    }

    /// Forget the cached token; the next call fetches a new one.
    pub async fn invalidate(&self) {
        let mut guard = self.inner.write().await;
        if guard.take().is_some() {
            debug!("Tenant access token invalidated");
        }
    }
}
