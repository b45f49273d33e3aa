//! Styled text segments and the text elements the Docx block API accepts.
//!
//! A [`TextSegment`] is a run of literal content plus a [`StyleSet`].
//! [`build_rich_text_elements`] turns an ordered list of segments into the
//! same number of [`TextElement`]s, one per segment, in the same order.
//! Adjacent segments with identical styles are never merged.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Caller-side styling
// ---------------------------------------------------------------------------

/// Independent style flags for one segment.
///
/// Every combination is legal. Colours `<= 0` mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSet {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub inline_code: bool,
    pub text_color: Option<i32>,
    pub background_color: Option<i32>,
    pub link: Option<String>,
}

/// Literal content with its style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub content: String,
    pub style: StyleSet,
}

impl TextSegment {
    pub fn new(content: impl Into<String>, style: StyleSet) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(content, StyleSet::default())
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self::new(
            content,
            StyleSet {
                bold: true,
                ..Default::default()
            },
        )
    }

    pub fn italic(content: impl Into<String>) -> Self {
        Self::new(
            content,
            StyleSet {
                italic: true,
                ..Default::default()
            },
        )
    }

    pub fn strikethrough(content: impl Into<String>) -> Self {
        Self::new(
            content,
            StyleSet {
                strikethrough: true,
                ..Default::default()
            },
        )
    }

    pub fn underline(content: impl Into<String>) -> Self {
        Self::new(
            content,
            StyleSet {
                underline: true,
                ..Default::default()
            },
        )
    }

    pub fn inline_code(content: impl Into<String>) -> Self {
        Self::new(
            content,
            StyleSet {
                inline_code: true,
                ..Default::default()
            },
        )
    }

    /// Pass `0` for a colour that should stay unset.
    pub fn colored(content: impl Into<String>, text_color: i32, background_color: i32) -> Self {
        Self::new(
            content,
            StyleSet {
                text_color: Some(text_color),
                background_color: Some(background_color),
                ..Default::default()
            },
        )
    }

    pub fn link(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(
            content,
            StyleSet {
                link: Some(url.into()),
                ..Default::default()
            },
        )
    }
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

/// Hyperlink attribute of a text run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

/// Resolved style of a text run. Only attributes that are set serialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextElementStyle {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub inline_code: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl TextElementStyle {
    /// Resolve a caller [`StyleSet`]. Flags carry over one to one,
    /// non-positive colours and empty links are dropped.
    pub fn resolve(style: &StyleSet) -> Self {
        Self {
            bold: style.bold,
            italic: style.italic,
            strikethrough: style.strikethrough,
            underline: style.underline,
            inline_code: style.inline_code,
            text_color: style.text_color.filter(|c| *c > 0),
            background_color: style.background_color.filter(|c| *c > 0),
            link: style
                .link
                .as_ref()
                .filter(|url| !url.is_empty())
                .map(|url| Link { url: url.clone() }),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub content: String,
    #[serde(default)]
    pub text_element_style: TextElementStyle,
}

/// One element of a block's `elements` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextElement {
    pub text_run: TextRun,
}

impl TextElement {
    pub fn content(&self) -> &str {
        &self.text_run.content
    }

    pub fn style(&self) -> &TextElementStyle {
        &self.text_run.text_element_style
    }
}

impl From<&TextSegment> for TextElement {
    fn from(segment: &TextSegment) -> Self {
        TextElement {
            text_run: TextRun {
                content: segment.content.clone(),
                text_element_style: TextElementStyle::resolve(&segment.style),
            },
        }
    }
}

/// One element per segment, in input order.
pub fn build_rich_text_elements(segments: &[TextSegment]) -> Vec<TextElement> {
    segments.iter().map(TextElement::from).collect()
}
