//! Document basics: create, write, read back, append.

use anyhow::Context;
use tracing::{info, warn};

use feishu_shared::{Block, BlockKind};

use super::{preview, timestamp_suffix, Demo};

fn info_paragraph(title: &str, created_at: &str) -> String {
    format!(
        "Document \"{title}\" was created by feishu-demo at {created_at}. \
         This paragraph was written through the block API."
    )
}

pub async fn run(demo: &Demo) -> anyhow::Result<()> {
    let client = &demo.client;
    let title = format!("Demo document_{}", timestamp_suffix());

    // -----------------------------------------------------------------------
    // 1. Create and write
    // -----------------------------------------------------------------------
    let document = demo.new_document(&title).await?;
    demo.settle(demo.config.demo.document_settle()).await;

    let created_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let paragraph = Block::plain_text(info_paragraph(&title, &created_at));
    // A missing edit permission should not stop the read-only steps.
    if let Err(e) = demo
        .write_blocks(&document, "info paragraph", &[paragraph])
        .await
    {
        warn!(error = %e, "Could not write to the document; check the app's docx edit scope");
    }

    // -----------------------------------------------------------------------
    // 2. Read back
    // -----------------------------------------------------------------------
    let meta = client
        .get_document(&document)
        .await
        .context("Failed to get document info")?;
    info!(
        document = %meta.document_id,
        title = meta.title.as_deref().unwrap_or(""),
        revision = meta.revision_id.unwrap_or_default(),
        "Document info"
    );

    let blocks = client
        .list_document_blocks(&document)
        .await
        .context("Failed to list document blocks")?;
    for block in &blocks {
        let kind = block
            .kind()
            .map(|k| k.key())
            .unwrap_or("other");
        info!(block = %block.block_id, block_type = block.block_type, kind, "Block");
    }
    info!(count = blocks.len(), "Listed blocks");

    let content = client
        .get_document_raw_content(&document)
        .await
        .context("Failed to get raw content")?;
    info!(content = %preview(&content, 200), "Raw content");

    // -----------------------------------------------------------------------
    // 3. "Update" by appending
    // -----------------------------------------------------------------------
    let page = blocks
        .iter()
        .find(|b| b.kind() == Some(BlockKind::Page))
        .map(|b| b.block_id.clone())
        .unwrap_or_else(|| document.page_block());
    client
        .append_block(
            &document,
            &page,
            Block::plain_text(format!("Appended at {created_at}.")),
        )
        .await
        .context("Failed to append block")?;
    info!("Appended paragraph");

    println!("Document: {}", demo.document_url(&document));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_paragraph_mentions_title() {
        let text = info_paragraph("Weekly", "2025-01-01 09:00:00");
        assert!(text.starts_with("Document \"Weekly\""));
        assert!(text.contains("2025-01-01 09:00:00"));
    }
}
