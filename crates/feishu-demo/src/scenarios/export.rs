//! Export the records of a table into a report document.

use anyhow::Context;
use tracing::info;

use feishu_client::Record;
use feishu_shared::{Block, TextSegment};

use super::{timestamp_suffix, Demo};
use crate::render::render_fields;

// Larger bodies are rejected by the children endpoint.
const BLOCKS_PER_REQUEST: usize = 50;

fn report(table_label: &str, generated_at: &str, records: &[Record]) -> Vec<Block> {
    let mut blocks = vec![
        Block::heading1(format!("Export of {table_label}")),
        Block::styled_text(&[
            TextSegment::plain("Generated at "),
            TextSegment::bold(generated_at),
            TextSegment::plain(format!(" from {} records.", records.len())),
        ]),
        Block::heading2("Records"),
    ];

    if records.is_empty() {
        blocks.push(Block::quote("The table has no records."));
        return blocks;
    }

    blocks.extend(records.iter().map(|record| {
        let line = render_fields(&record.fields);
        Block::styled_bullet(&[
            TextSegment::inline_code(record.record_id.as_str()),
            TextSegment::plain(format!(" {line}")),
        ])
    }));
    blocks
}

pub async fn run(demo: &Demo) -> anyhow::Result<()> {
    let (app, table) = demo.config.target_table()?;

    let records = demo
        .client
        .list_all_records(&app, &table, demo.config.demo.page_size)
        .await
        .context("Failed to read records")?;
    info!(count = records.len(), %table, "Read records");

    let document = demo
        .new_document(&format!("Table export_{}", timestamp_suffix()))
        .await?;
    demo.settle(demo.config.demo.document_settle()).await;

    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let blocks = report(table.as_str(), &generated_at, &records);
    for chunk in blocks.chunks(BLOCKS_PER_REQUEST) {
        demo.write_blocks(&document, "report", chunk).await?;
    }
    info!(records = records.len(), blocks = blocks.len(), "Export written");

    println!("Document: {}", demo.document_url(&document));
    Ok(())
}
