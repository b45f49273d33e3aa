//! HTTP client for the Feishu / Lark open platform.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use feishu_shared::constants::{
    API_SUCCESS_CODE, DEFAULT_TIMEOUT_SECS, FEISHU_BASE_URL, TENANT_TOKEN_PATH,
};

use crate::auth::{TenantTokenRequest, TenantTokenResponse, TokenCache};
use crate::error::{ClientError, Result};
use crate::types::Envelope;

/// Client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Open platform host, e.g. `https://open.feishu.cn`.
    pub base_url: String,
    pub app_id: String,
    pub app_secret: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: FEISHU_BASE_URL.to_string(),
            app_id: String::new(),
            app_secret: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            ..Default::default()
        }
    }
}

/// Thin transport over the open platform REST API.
///
/// Each call obtains (or reuses) a tenant access token, sends one request,
/// and checks the envelope's `code`. Errors are returned as-is: there is no
/// retry or backoff.
///
/// Bitable operations live in [`crate::bitable`], Docx operations in
/// [`crate::docx`].
#[derive(Debug, Clone)]
pub struct FeishuClient {
    config: ClientConfig,
    http: Client,
    tokens: TokenCache,
}

impl FeishuClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Use a preconfigured `reqwest::Client` (proxies, custom TLS, ...).
    pub fn with_http_client(mut config: ClientConfig, http: Client) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            config,
            http,
            tokens: TokenCache::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    // ==================== Auth ====================

    /// Current tenant access token, fetching a new one when the cached
    /// token is missing or about to expire.
    pub async fn tenant_access_token(&self) -> Result<String> {
        if let Some(token) = self.tokens.get().await {
            return Ok(token);
        }

        let body = TenantTokenRequest {
            app_id: &self.config.app_id,
            app_secret: &self.config.app_secret,
        };
        let response = self
            .http
            .post(self.url(TENANT_TOKEN_PATH))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        let parsed: TenantTokenResponse = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    body: text,
                })
            }
            Err(e) => return Err(e.into()),
        };

        if parsed.code != API_SUCCESS_CODE {
            warn!(code = parsed.code, msg = %parsed.msg, "Tenant token request rejected");
            return Err(ClientError::Auth {
                code: parsed.code,
                msg: parsed.msg,
            });
        }

        let token = parsed
            .tenant_access_token
            .ok_or(ClientError::MissingData("tenant_access_token"))?;
        let expire = parsed.expire.unwrap_or(0);
        self.tokens.store(token.clone(), expire).await;
        info!(expires_in = expire, "Obtained tenant access token");

        Ok(token)
    }

    /// Drop the cached token so the next call re-authenticates.
    pub async fn invalidate_token(&self) {
        self.tokens.invalidate().await;
    }

    // ==================== Request plumbing ====================

    pub(crate) async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.tenant_access_token().await?;
        debug!(%method, path, "Calling open platform");
        Ok(self
            .http
            .request(method, self.url(path))
            .bearer_auth(token))
    }

    /// Send and return the envelope's `data` decoded as `T`.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &'static str,
    ) -> Result<T> {
        let data = self.send_raw(request).await?.ok_or(ClientError::MissingData(what))?;
        Ok(serde_json::from_value(data)?)
    }

    /// Send when only the success flag matters.
    pub(crate) async fn send_ack(&self, request: RequestBuilder) -> Result<()> {
        self.send_raw(request).await.map(|_| ())
    }

    async fn send_raw(&self, request: RequestBuilder) -> Result<Option<serde_json::Value>> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let envelope: Envelope = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    body: text,
                })
            }
            Err(e) => return Err(e.into()),
        };

        if envelope.code != API_SUCCESS_CODE {
            debug!(code = envelope.code, msg = %envelope.msg, "Open platform returned an error");
            return Err(ClientError::Api {
                code: envelope.code,
                msg: envelope.msg,
            });
        }

        Ok(envelope.data.filter(|data| !data.is_null()))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        what: &'static str,
    ) -> Result<T> {
        let request = self.request(Method::GET, path).await?.query(query);
        self.send(request, what).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
        what: &'static str,
    ) -> Result<T> {
        let request = self.request(Method::POST, path).await?.query(query).json(body);
        self.send(request, what).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feishu_shared::constants::LARK_BASE_URL;

    #[test]
    fn test_default_config_targets_feishu() {
        let config = ClientConfig::new("cli_a", "secret");
        assert_eq!(config.base_url, FEISHU_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.app_id, "cli_a");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ClientConfig {
            base_url: format!("{LARK_BASE_URL}/"),
            ..ClientConfig::new("a", "b")
        };
        let client = FeishuClient::new(config).unwrap();
        assert_eq!(
            client.url(TENANT_TOKEN_PATH),
            "https://open.larksuite.com/open-apis/auth/v3/tenant_access_token/internal"
        );
    }
}
