//! # feishu-shared
//!
//! Value encoding for the Feishu / Lark open platform: record field values
//! for Bitable tables, and styled text elements plus block containers for
//! Docx documents. Everything here is pure and infallible; the transport
//! lives in `feishu-client`.

pub mod blocks;
pub mod constants;
pub mod fields;
pub mod rich_text;
pub mod types;

pub use blocks::{Block, BlockKind};
pub use fields::{FieldSpec, FieldType, FieldValue, Fields};
pub use rich_text::{build_rich_text_elements, StyleSet, TextElement, TextSegment};
pub use types::{AppToken, BlockId, DocumentId, RecordId, TableId};
