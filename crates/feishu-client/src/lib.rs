//! # feishu-client
//!
//! Minimal async transport for the Feishu / Lark open platform, covering
//! the Bitable and Docx endpoints the demos use.
//!
//! ```rust,no_run
//! use feishu_client::{ClientConfig, FeishuClient};
//! use feishu_shared::fields::{encode_checkbox, encode_text};
//! use feishu_shared::{AppToken, Fields, TableId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FeishuClient::new(ClientConfig::new("cli_xxx", "secret"))?;
//! let fields = Fields::new()
//!     .with("name", encode_text("iPhone 15 Pro"))
//!     .with("listed", encode_checkbox(true));
//! let id = client
//!     .create_record(&AppToken::from("bascn..."), &TableId::from("tbl..."), &fields)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod bitable;
pub mod client;
pub mod docx;
pub mod error;
pub mod types;

pub use client::{ClientConfig, FeishuClient};
pub use error::{ClientError, Result};
pub use types::{
    AppInfo, BlockInfo, DocumentInfo, Page, Record, RecordPage, RecordUpdate, TableInfo,
};
