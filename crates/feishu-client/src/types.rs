//! Request bodies and response payloads of the endpoints the client uses.
//!
//! Only the fields the demos read are modelled; unknown fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use feishu_shared::{
    AppToken, Block, BlockId, BlockKind, DocumentId, FieldSpec, Fields, RecordId, TableId,
};

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// `{"code": .., "msg": .., "data": ..}` wrapper around every response.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub page_token: Option<String>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> Page<T> {
    /// Token for the next request, if the listing continues.
    pub fn next_page_token(&self) -> Option<&str> {
        if self.has_more {
            self.page_token.as_deref().filter(|t| !t.is_empty())
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Bitable
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct CreateAppRequest<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_token: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppInfo {
    pub app_token: AppToken,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateAppData {
    pub app: AppInfo,
}

#[derive(Debug, Serialize)]
pub(crate) struct TableSpec<'a> {
    pub name: &'a str,
    pub fields: &'a [FieldSpec],
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateTableRequest<'a> {
    pub table: TableSpec<'a>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateTableData {
    pub table_id: TableId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableInfo {
    pub table_id: TableId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub revision: Option<i64>,
}

/// A record as returned by the platform. Field values come back in the
/// platform's own (untyped) representation.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    pub record_id: RecordId,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

pub type RecordPage = Page<Record>;

#[derive(Debug, Deserialize)]
pub(crate) struct RecordData {
    pub record: Record,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordsData {
    #[serde(default)]
    pub records: Vec<Record>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecordBody<'a> {
    pub fields: &'a Fields,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchCreateRequest<'a> {
    pub records: Vec<RecordBody<'a>>,
}

/// One entry of a batch update.
#[derive(Debug, Clone, Serialize)]
pub struct RecordUpdate {
    pub record_id: RecordId,
    pub fields: Fields,
}

impl RecordUpdate {
    pub fn new(record_id: RecordId, fields: Fields) -> Self {
        Self { record_id, fields }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchUpdateRequest<'a> {
    pub records: &'a [RecordUpdate],
}

// ---------------------------------------------------------------------------
// Docx
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct CreateDocumentRequest<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_token: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentInfo {
    pub document_id: DocumentId,
    #[serde(default)]
    pub revision_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentData {
    pub document: DocumentInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawContentData {
    pub content: String,
}

/// A block as listed by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockInfo {
    pub block_id: BlockId,
    pub block_type: u16,
    #[serde(default)]
    pub parent_id: Option<BlockId>,
    #[serde(default)]
    pub children: Vec<BlockId>,
}

impl BlockInfo {
    /// `None` for block types outside the known tag table.
    pub fn kind(&self) -> Option<BlockKind> {
        BlockKind::from_tag(self.block_type)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateChildrenRequest<'a> {
    pub children: &'a [Block],
    pub index: i32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateChildrenData {
    #[serde(default)]
    pub children: Vec<BlockInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_next_token_only_when_more() {
        let page: RecordPage = serde_json::from_value(json!({
            "items": [{"record_id": "rec1", "fields": {"name": "A"}}],
            "page_token": "tok",
            "has_more": false,
            "total": 1
        }))
        .unwrap();
        assert_eq!(page.next_page_token(), None);
        assert_eq!(page.items[0].fields["name"], json!("A"));

        let page: RecordPage =
            serde_json::from_value(json!({"page_token": "tok", "has_more": true})).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_page_token(), Some("tok"));
    }

    #[test]
    fn test_create_app_omits_missing_folder() {
        let body = CreateAppRequest {
            name: "inventory",
            folder_token: None,
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"name": "inventory"}));
    }

    #[test]
    fn test_block_info_kind() {
        let info: BlockInfo =
            serde_json::from_value(json!({"block_id": "doxcn1", "block_type": 1, "children": ["b1"]}))
                .unwrap();
        assert_eq!(info.kind(), Some(BlockKind::Page));
        assert_eq!(info.children, vec![BlockId::from("b1")]);
    }
}
