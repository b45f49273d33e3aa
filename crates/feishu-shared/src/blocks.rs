//! Typed block containers for the Docx block-children endpoint.
//!
//! A block wraps one sequence of [`TextElement`]s under a kind-specific key
//! and carries the platform's integer `block_type` tag:
//!
//! ```json
//! {"block_type": 3, "heading1": {"elements": [...]}}
//! ```

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::rich_text::{build_rich_text_elements, TextElement, TextSegment};

/// Block kinds and their wire tags.
///
/// The tags are defined by the remote platform, not derived here. A stale
/// tag is only caught by the remote side rejecting the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Page,
    Text,
    Heading1,
    Heading2,
    Bullet,
    Ordered,
    Code,
    Quote,
    Todo,
}

impl BlockKind {
    pub const ALL: [BlockKind; 9] = [
        BlockKind::Page,
        BlockKind::Text,
        BlockKind::Heading1,
        BlockKind::Heading2,
        BlockKind::Bullet,
        BlockKind::Ordered,
        BlockKind::Code,
        BlockKind::Quote,
        BlockKind::Todo,
    ];

    pub fn tag(self) -> u16 {
        match self {
            BlockKind::Page => 1,
            BlockKind::Text => 2,
            BlockKind::Heading1 => 3,
            BlockKind::Heading2 => 4,
            BlockKind::Bullet => 6,
            BlockKind::Ordered => 7,
            BlockKind::Code => 8,
            BlockKind::Quote => 10,
            BlockKind::Todo => 17,
        }
    }

    /// JSON key holding the block body.
    pub fn key(self) -> &'static str {
        match self {
            BlockKind::Page => "page",
            BlockKind::Text => "text",
            BlockKind::Heading1 => "heading1",
            BlockKind::Heading2 => "heading2",
            BlockKind::Bullet => "bullet",
            BlockKind::Ordered => "ordered",
            BlockKind::Code => "code",
            BlockKind::Quote => "quote",
            BlockKind::Todo => "todo",
        }
    }

    pub fn from_tag(tag: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

/// Block-level style. Only code blocks (language) and todos (done) use it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextBlockStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl TextBlockStyle {
    fn is_empty(&self) -> bool {
        self.language.is_none() && self.done.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextBody {
    pub elements: Vec<TextElement>,
    #[serde(skip_serializing_if = "TextBlockStyle::is_empty")]
    pub style: TextBlockStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    kind: BlockKind,
    body: TextBody,
}

impl Block {
    fn with_style(kind: BlockKind, elements: Vec<TextElement>, style: TextBlockStyle) -> Self {
        Self {
            kind,
            body: TextBody { elements, style },
        }
    }

    fn new(kind: BlockKind, elements: Vec<TextElement>) -> Self {
        Self::with_style(kind, elements, TextBlockStyle::default())
    }

    fn plain(kind: BlockKind, content: impl Into<String>) -> Self {
        Self::new(kind, build_rich_text_elements(&[TextSegment::plain(content)]))
    }

    /// Paragraph made of prebuilt elements.
    pub fn text(elements: Vec<TextElement>) -> Self {
        Self::new(BlockKind::Text, elements)
    }

    pub fn plain_text(content: impl Into<String>) -> Self {
        Self::plain(BlockKind::Text, content)
    }

    pub fn styled_text(segments: &[TextSegment]) -> Self {
        Self::text(build_rich_text_elements(segments))
    }

    pub fn heading1(content: impl Into<String>) -> Self {
        Self::plain(BlockKind::Heading1, content)
    }

    pub fn heading2(content: impl Into<String>) -> Self {
        Self::plain(BlockKind::Heading2, content)
    }

    pub fn bullet(content: impl Into<String>) -> Self {
        Self::plain(BlockKind::Bullet, content)
    }

    pub fn styled_bullet(segments: &[TextSegment]) -> Self {
        Self::new(BlockKind::Bullet, build_rich_text_elements(segments))
    }

    /// Numbering is assigned by the document, not the caller.
    pub fn ordered(content: impl Into<String>) -> Self {
        Self::plain(BlockKind::Ordered, content)
    }

    /// `language` is one of [`crate::constants::language`].
    pub fn code(code: impl Into<String>, language: i32) -> Self {
        Self::with_style(
            BlockKind::Code,
            build_rich_text_elements(&[TextSegment::plain(code)]),
            TextBlockStyle {
                language: Some(language),
                done: None,
            },
        )
    }

    pub fn quote(content: impl Into<String>) -> Self {
        Self::plain(BlockKind::Quote, content)
    }

    pub fn todo(content: impl Into<String>, done: bool) -> Self {
        Self::with_style(
            BlockKind::Todo,
            build_rich_text_elements(&[TextSegment::plain(content)]),
            TextBlockStyle {
                language: None,
                done: Some(done),
            },
        )
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn elements(&self) -> &[TextElement] {
        &self.body.elements
    }

    pub fn style(&self) -> &TextBlockStyle {
        &self.body.style
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("block_type", &self.kind.tag())?;
        map.serialize_entry(self.kind.key(), &self.body)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::language;
    use serde_json::json;

    #[test]
    fn test_block_tags_are_pinned() {
        // Platform-defined values. A failure here means the table drifted.
        let pinned = [
            (BlockKind::Text, 2),
            (BlockKind::Heading1, 3),
            (BlockKind::Heading2, 4),
            (BlockKind::Bullet, 6),
            (BlockKind::Ordered, 7),
            (BlockKind::Code, 8),
            (BlockKind::Quote, 10),
            (BlockKind::Todo, 17),
        ];
        for (kind, tag) in pinned {
            assert_eq!(kind.tag(), tag, "{kind:?}");
            assert_eq!(BlockKind::from_tag(tag), Some(kind));
        }
        assert_eq!(BlockKind::from_tag(5), None);
    }

    #[test]
    fn test_heading_wire_shape() {
        let block = Block::heading1("Guide");
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({
                "block_type": 3,
                "heading1": {
                    "elements": [
                        {"text_run": {"content": "Guide", "text_element_style": {}}}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_styled_text_keeps_segment_order() {
        let block = Block::styled_text(&[
            TextSegment::plain("use "),
            TextSegment::inline_code("fmt.Println()"),
            TextSegment::link("docs", "https://pkg.go.dev/fmt"),
        ]);
        let contents: Vec<&str> = block.elements().iter().map(|e| e.content()).collect();

        assert_eq!(block.kind(), BlockKind::Text);
        assert_eq!(contents, ["use ", "fmt.Println()", "docs"]);
    }

    #[test]
    fn test_code_block_carries_language() {
        let value = serde_json::to_value(Block::code("fn main() {}", language::RUST)).unwrap();
        assert_eq!(value["block_type"], json!(8));
        assert_eq!(value["code"]["style"], json!({"language": 53}));
    }

    #[test]
    fn test_todo_block_carries_done_flag() {
        let value = serde_json::to_value(Block::todo("ship it", false)).unwrap();
        assert_eq!(value["block_type"], json!(17));
        assert_eq!(value["todo"]["style"], json!({"done": false}));
        assert_eq!(value["todo"]["elements"][0]["text_run"]["content"], json!("ship it"));
    }

    #[test]
    fn test_style_omitted_when_unset() {
        let value = serde_json::to_value(Block::quote("q")).unwrap();
        assert!(value["quote"].get("style").is_none());
    }
}
