//! Rich-text showcase: inline styles, colours, links and styled blocks.

use tracing::info;

use feishu_shared::constants::{color, language};
use feishu_shared::{Block, TextSegment};

use super::{timestamp_suffix, Demo};

const COLORS: [(&str, i32); 8] = [
    ("red", color::RED),
    ("orange", color::ORANGE),
    ("yellow", color::YELLOW),
    ("green", color::GREEN),
    ("blue", color::BLUE),
    ("purple", color::PURPLE),
    ("pink", color::PINK),
    ("grey", color::GREY),
];

const SAMPLE_CODE: &str = r#"use feishu_client::{ClientConfig, FeishuClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = FeishuClient::new(ClientConfig::new("cli_xxx", "secret"))?;
    let doc = client.create_document("Hello, Feishu!", "").await?;
    println!("{}", doc.document_id);
    Ok(())
}"#;

fn emphasis_paragraph() -> Block {
    Block::styled_text(&[
        TextSegment::plain("This paragraph mixes "),
        TextSegment::bold("bold"),
        TextSegment::plain(", "),
        TextSegment::italic("italic"),
        TextSegment::plain(", "),
        TextSegment::strikethrough("strikethrough"),
        TextSegment::plain(" and "),
        TextSegment::underline("underlined"),
        TextSegment::plain(" text."),
    ])
}

fn code_and_link_paragraph() -> Block {
    Block::styled_text(&[
        TextSegment::plain("Call "),
        TextSegment::inline_code("create_document_blocks()"),
        TextSegment::plain(" to insert blocks; see the "),
        TextSegment::link("open platform docs", "https://open.feishu.cn/document"),
        TextSegment::plain("."),
    ])
}

/// One run per palette colour. The second half also sets the background
/// to the same palette index.
fn color_paragraph() -> Block {
    let mut segments = vec![TextSegment::plain("Colours: ")];
    for (i, (name, code)) in COLORS.iter().enumerate() {
        let background = if i >= COLORS.len() / 2 { *code } else { 0 };
        segments.push(TextSegment::colored(*name, *code, background));
        segments.push(TextSegment::plain(" "));
    }
    Block::styled_text(&segments)
}

fn blocks() -> Vec<Block> {
    vec![
        Block::heading1("Rich text styles"),
        emphasis_paragraph(),
        code_and_link_paragraph(),
        color_paragraph(),
        Block::heading2("Styled blocks"),
        Block::code(SAMPLE_CODE, language::RUST),
        Block::quote("Blocks carry the same inline styles as paragraphs."),
        Block::styled_bullet(&[TextSegment::bold("Bold"), TextSegment::plain(" bullet")]),
        Block::bullet("Plain bullet"),
        Block::ordered("First step"),
        Block::ordered("Second step"),
    ]
}

pub async fn run(demo: &Demo) -> anyhow::Result<()> {
    let document = demo
        .new_document(&format!("Rich text styles_{}", timestamp_suffix()))
        .await?;
    demo.settle(demo.config.demo.document_settle()).await;

    let blocks = blocks();
    demo.write_blocks(&document, "styled blocks", &blocks).await?;
    info!(count = blocks.len(), "Styles written");

    println!("Document: {}", demo.document_url(&document));
    Ok(())
}
