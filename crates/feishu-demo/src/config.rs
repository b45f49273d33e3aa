//! Demo configuration loaded from a YAML file, then environment variables.
//!
//! Every setting except the app credentials has a default, so a config
//! file only needs the `feishu.app_id` / `feishu.app_secret` pair (or the
//! matching env vars) to run the scenarios that create their own tables
//! and documents.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use feishu_client::ClientConfig;
use feishu_shared::constants::{DEFAULT_TIMEOUT_SECS, FEISHU_BASE_URL};
use feishu_shared::{AppToken, TableId};

use crate::error::ConfigError;

const APP_ID_PLACEHOLDER: &str = "your_app_id_here";
const APP_SECRET_PLACEHOLDER: &str = "your_app_secret_here";

/// Demo configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub feishu: FeishuSection,
    #[serde(default)]
    pub demo: DemoSection,
}

/// App credentials and the resources the demos operate on.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct FeishuSection {
    /// Env: `FEISHU_APP_ID`
    pub app_id: String,

    /// Env: `FEISHU_APP_SECRET`
    pub app_secret: String,

    /// Existing Bitable app used by the `records` scenario.
    /// Env: `FEISHU_APP_TOKEN`
    pub app_token: String,

    /// Existing table inside `app_token`.
    /// Env: `FEISHU_TABLE_ID`
    pub table_id: String,

    /// Drive folder for created apps/documents. Empty = root folder.
    /// Env: `FEISHU_FOLDER_TOKEN`
    pub folder_token: String,

    /// Env: `FEISHU_BASE_URL`
    /// Default: `https://open.feishu.cn`
    pub base_url: String,
}

impl Default for FeishuSection {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            app_secret: String::new(),
            app_token: String::new(),
            table_id: String::new(),
            folder_token: String::new(),
            base_url: FEISHU_BASE_URL.to_string(),
        }
    }
}

// Keep the secret out of `?config` log lines.
impl std::fmt::Debug for FeishuSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeishuSection")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field("app_token", &self.app_token)
            .field("table_id", &self.table_id)
            .field("folder_token", &self.folder_token)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Pacing and sizing of the demo runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoSection {
    /// Pause after writing records, before reading them back.
    pub record_settle_ms: u64,

    /// Pause after creating a table, before writing to it.
    pub table_settle_ms: u64,

    /// Pause after creating or writing a document, before the next call
    /// that depends on it.
    pub document_settle_ms: u64,

    /// Page size for record listings.
    pub page_size: u32,

    pub timeout_secs: u64,

    /// Web host used to print links to created documents and tables.
    pub web_url: String,
}

impl Default for DemoSection {
    fn default() -> Self {
        Self {
            record_settle_ms: 1000,
            table_settle_ms: 2000,
            document_settle_ms: 1000,
            page_size: 20,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            web_url: "https://feishu.cn".to_string(),
        }
    }
}

impl DemoSection {
    pub fn record_settle(&self) -> Duration {
        Duration::from_millis(self.record_settle_ms)
    }

    pub fn table_settle(&self) -> Duration {
        Duration::from_millis(self.table_settle_ms)
    }

    pub fn document_settle(&self) -> Duration {
        Duration::from_millis(self.document_settle_ms)
    }
}

impl DemoConfig {
    /// Read `path` (if it exists), then layer environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_yaml(&text)?
        } else {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults and environment"
            );
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // An empty file parses as YAML null.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Apply `FEISHU_*` overrides. Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let section = &mut self.feishu;
        let targets: [(&str, &mut String); 6] = [
            ("FEISHU_APP_ID", &mut section.app_id),
            ("FEISHU_APP_SECRET", &mut section.app_secret),
            ("FEISHU_APP_TOKEN", &mut section.app_token),
            ("FEISHU_TABLE_ID", &mut section.table_id),
            ("FEISHU_FOLDER_TOKEN", &mut section.folder_token),
            ("FEISHU_BASE_URL", &mut section.base_url),
        ];
        for (key, slot) in targets {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                *slot = value;
            }
        }
    }

    /// Reject missing or example credentials before any network call.
    pub fn validate_credentials(&self) -> Result<(), ConfigError> {
        let checks = [
            ("app_id", &self.feishu.app_id, APP_ID_PLACEHOLDER),
            ("app_secret", &self.feishu.app_secret, APP_SECRET_PLACEHOLDER),
        ];
        for (name, value, placeholder) in checks {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(name));
            }
            if value == placeholder {
                return Err(ConfigError::Placeholder(name));
            }
        }
        Ok(())
    }

    /// The existing table the `records` and `export` scenarios work on.
    pub fn target_table(&self) -> Result<(AppToken, TableId), ConfigError> {
        if self.feishu.app_token.is_empty() {
            return Err(ConfigError::Missing("app_token"));
        }
        if self.feishu.table_id.is_empty() {
            return Err(ConfigError::Missing("table_id"));
        }
        Ok((
            AppToken::new(self.feishu.app_token.clone()),
            TableId::new(self.feishu.table_id.clone()),
        ))
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.feishu.base_url.clone(),
            app_id: self.feishu.app_id.clone(),
            app_secret: self.feishu.app_secret.clone(),
            timeout_secs: self.demo.timeout_secs,
        }
    }
}
