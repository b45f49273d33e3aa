//! Tour of every block container, written section by section.

use anyhow::Context;
use tracing::{info, warn};

use feishu_shared::constants::language;
use feishu_shared::{Block, TextSegment};

use super::{preview, timestamp_suffix, Demo};

const TITLE: &str = "Document outline";

const GO_SAMPLE: &str = r#"package main

import "fmt"

func main() {
    fmt.Println("Hello, Feishu!")
}"#;

/// `(section name, blocks)` in document order.
fn sections() -> Vec<(&'static str, Vec<Block>)> {
    vec![
        ("title", vec![Block::heading1(TITLE)]),
        (
            "intro",
            vec![Block::styled_text(&[
                TextSegment::plain("Every container below is a "),
                TextSegment::bold("text-bearing block"),
                TextSegment::plain(" with its own tag."),
            ])],
        ),
        ("lists heading", vec![Block::heading2("Lists")]),
        (
            "bullets",
            vec![
                Block::bullet("First item"),
                Block::bullet("Second item"),
                Block::bullet("Third item"),
            ],
        ),
        (
            "ordered list",
            vec![
                Block::ordered("Initialise the client"),
                Block::ordered("Create the document"),
                Block::ordered("Write the content"),
            ],
        ),
        ("code heading", vec![Block::heading2("Code")]),
        ("code", vec![Block::code(GO_SAMPLE, language::GO)]),
        (
            "quote",
            vec![Block::quote("An important quotation, set apart from the body.")],
        ),
        ("todo heading", vec![Block::heading2("Checklist")]),
        (
            "todos",
            vec![
                Block::todo("Write the document", true),
                Block::todo("Review the code", false),
                Block::todo("Ship it", false),
            ],
        ),
    ]
}

pub async fn run(demo: &Demo) -> anyhow::Result<()> {
    let client = &demo.client;
    let document = demo
        .new_document(&format!("Outline_{}", timestamp_suffix()))
        .await?;
    demo.settle(demo.config.demo.document_settle()).await;

    for (name, blocks) in sections() {
        demo.write_blocks(&document, name, &blocks).await?;
    }

    demo.settle(demo.config.demo.document_settle()).await;
    let content = client
        .get_document_raw_content(&document)
        .await
        .context("Failed to get raw content")?;
    let chars = content.chars().count();
    if content.contains(TITLE) {
        info!(chars, preview = %preview(&content, 200), "Raw content verified");
    } else {
        warn!(
            chars,
            "Raw content does not show the title yet; the index may still be catching up"
        );
    }

    println!("Document: {}", demo.document_url(&document));
    Ok(())
}
