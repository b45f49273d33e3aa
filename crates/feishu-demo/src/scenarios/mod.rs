//! Runnable walkthroughs of the Bitable and Docx APIs.
//!
//! Each scenario is a linear sequence of steps against the live platform.
//! A failing step aborts the scenario with context; cleanup steps only
//! warn, so one stuck record does not hide the rest of the run.

pub mod create;
pub mod docs;
pub mod export;
pub mod outline;
pub mod records;
pub mod styles;

use std::time::Duration;

use anyhow::Context;
use tracing::{debug, info};

use feishu_client::FeishuClient;
use feishu_shared::{AppToken, Block, DocumentId, TableId};

use crate::config::DemoConfig;

/// Shared state for one scenario run.
pub struct Demo {
    pub client: FeishuClient,
    pub config: DemoConfig,
}

impl Demo {
    pub fn new(config: DemoConfig) -> anyhow::Result<Self> {
        let client =
            FeishuClient::new(config.client_config()).context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    /// Give the platform time to make a write visible to reads.
    pub async fn settle(&self, pause: Duration) {
        if pause.is_zero() {
            return;
        }
        debug!(ms = pause.as_millis() as u64, "Waiting for writes to settle");
        tokio::time::sleep(pause).await;
    }

    pub fn folder_token(&self) -> &str {
        &self.config.feishu.folder_token
    }

    pub fn document_url(&self, document: &DocumentId) -> String {
        format!("{}/docx/{document}", self.web_url())
    }

    pub fn table_url(&self, app: &AppToken, table: &TableId) -> String {
        format!("{}/base/{app}?table={table}", self.web_url())
    }

    fn web_url(&self) -> &str {
        self.config.demo.web_url.trim_end_matches('/')
    }

    /// Create a document titled `title` and return its id.
    pub async fn new_document(&self, title: &str) -> anyhow::Result<DocumentId> {
        let document = self
            .client
            .create_document(title, self.folder_token())
            .await
            .with_context(|| format!("Failed to create document {title:?}"))?;
        info!(document = %document.document_id, title, "Created document");
        Ok(document.document_id)
    }

    /// Append `blocks` to the end of the document body.
    pub async fn write_blocks(
        &self,
        document: &DocumentId,
        what: &str,
        blocks: &[Block],
    ) -> anyhow::Result<()> {
        let created = self
            .client
            .create_document_blocks(
                document,
                &document.page_block(),
                feishu_shared::constants::APPEND_INDEX,
                blocks,
            )
            .await
            .with_context(|| format!("Failed to write {what}"))?;
        info!(what, blocks = created.len(), "Wrote blocks");
        Ok(())
    }
}

/// Suffix for names of created resources, e.g. `20250101_120000`.
pub fn timestamp_suffix() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// First `max` characters of `text`, with an ellipsis when cut.
pub fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> Demo {
        let mut config = DemoConfig::default();
        config.demo.web_url = "https://acme.feishu.cn/".into();
        Demo::new(config).unwrap()
    }

    #[test]
    fn test_links() {
        let demo = demo();
        assert_eq!(
            demo.document_url(&DocumentId::from("doxABC")),
            "https://acme.feishu.cn/docx/doxABC"
        );
        assert_eq!(
            demo.table_url(&AppToken::from("bascn1"), &TableId::from("tbl1")),
            "https://acme.feishu.cn/base/bascn1?table=tbl1"
        );
    }

    #[test]
    fn test_preview_cuts_on_char_boundary() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("飞书云文档", 2), "飞书...");
    }

    #[test]
    fn test_timestamp_suffix_shape() {
        let suffix = timestamp_suffix();
        assert_eq!(suffix.len(), 15);
        assert_eq!(&suffix[8..9], "_");
    }
}
