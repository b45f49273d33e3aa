//! Docx (cloud document) operations.

use tracing::{debug, warn};

use feishu_shared::constants::{APPEND_INDEX, DOCX_PREFIX};
use feishu_shared::{Block, BlockId, DocumentId};

use crate::client::FeishuClient;
use crate::error::Result;
use crate::types::{
    BlockInfo, CreateChildrenData, CreateChildrenRequest, CreateDocumentRequest, DocumentData,
    DocumentInfo, Page, RawContentData,
};

fn document_path(document: &DocumentId) -> String {
    format!("{DOCX_PREFIX}/documents/{document}")
}

impl FeishuClient {
    /// Create an empty document. An empty `folder_token` creates it in the
    /// root folder of the app's drive.
    pub async fn create_document(&self, title: &str, folder_token: &str) -> Result<DocumentInfo> {
        let body = CreateDocumentRequest {
            title,
            folder_token: (!folder_token.is_empty()).then_some(folder_token),
        };
        let data: DocumentData = self
            .post(&format!("{DOCX_PREFIX}/documents"), &[], &body, "document")
            .await?;
        debug!(document = %data.document.document_id, "Created document");
        Ok(data.document)
    }

    pub async fn get_document(&self, document: &DocumentId) -> Result<DocumentInfo> {
        let data: DocumentData = self.get(&document_path(document), &[], "document").await?;
        Ok(data.document)
    }

    /// Plain-text rendering of the whole document.
    pub async fn get_document_raw_content(&self, document: &DocumentId) -> Result<String> {
        let path = format!("{}/raw_content", document_path(document));
        let data: RawContentData = self.get(&path, &[], "content").await?;
        Ok(data.content)
    }

    /// All blocks of the document, page block first.
    pub async fn list_document_blocks(&self, document: &DocumentId) -> Result<Vec<BlockInfo>> {
        let path = format!("{}/blocks", document_path(document));
        let mut blocks = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut query = Vec::new();
            if let Some(token) = &page_token {
                query.push(("page_token", token.clone()));
            }
            let page: Page<BlockInfo> = self.get(&path, &query, "blocks").await?;
            let next = page.next_page_token().map(str::to_string);
            blocks.extend(page.items);
            match next {
                Some(token) if page_token.as_deref() == Some(token.as_str()) => {
                    warn!(page_token = %token, "Listing repeated its page token, stopping");
                    break;
                }
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        Ok(blocks)
    }

    /// Insert `children` under `parent` at `index`; `-1` appends after the
    /// last existing child. Returns the created blocks in order.
    pub async fn create_document_blocks(
        &self,
        document: &DocumentId,
        parent: &BlockId,
        index: i32,
        children: &[Block],
    ) -> Result<Vec<BlockInfo>> {
        let path = format!("{}/blocks/{parent}/children", document_path(document));
        let body = CreateChildrenRequest { children, index };
        let data: CreateChildrenData = self.post(&path, &[], &body, "children").await?;
        debug!(%document, %parent, created = data.children.len(), "Inserted blocks");
        Ok(data.children)
    }

    /// "Update" a document by appending `block` as the last child of
    /// `parent`.
    ///
    /// This is a workaround: the block API used here has no in-place
    /// update, so existing blocks are left untouched and the new content
    /// lands after them.
    pub async fn append_block(
        &self,
        document: &DocumentId,
        parent: &BlockId,
        block: Block,
    ) -> Result<()> {
        self.create_document_blocks(document, parent, APPEND_INDEX, &[block])
            .await
            .map(|_| ())
    }
}
