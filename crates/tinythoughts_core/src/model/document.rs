//! Structured rich-text document tree.
//!
//! # Responsibility
//! - Model the `RichTextAST` input shape expected by store write mutations.
//! - Provide constructors used by HTML conversion and fallback paths.
//!
//! # Invariants
//! - A valid document has at least one child element (the store rejects
//!   documents with an empty `children` array).
//! - Serialization is deterministic: identical trees produce identical JSON.
//! - Mark fields are omitted from JSON when unset.

use serde::{Deserialize, Serialize};

/// Element kinds accepted by the store's rich-text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Paragraph,
    HeadingOne,
    HeadingTwo,
    HeadingThree,
    HeadingFour,
    HeadingFive,
    HeadingSix,
    BlockQuote,
    BulletedList,
    NumberedList,
    ListItem,
    Link,
}

/// One node in the document tree: an element or a text leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentNode {
    Element(ElementNode),
    Text(TextNode),
}

/// Element node carrying a kind, optional link target, and children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementNode {
    /// Serialized as `type` to match the store schema.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Link target; meaningful only when `kind == ElementKind::Link`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub children: Vec<DocumentNode>,
}

impl ElementNode {
    /// Creates a non-link element node.
    pub fn new(kind: ElementKind, children: Vec<DocumentNode>) -> Self {
        Self {
            kind,
            href: None,
            children,
        }
    }

    /// Creates a link element wrapping inline children.
    pub fn link(href: impl Into<String>, children: Vec<DocumentNode>) -> Self {
        Self {
            kind: ElementKind::Link,
            href: Some(href.into()),
            children,
        }
    }
}

/// Text leaf with optional formatting marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
}

impl TextNode {
    /// Creates an unformatted text leaf.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            underline: false,
            code: false,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Document tree submitted as the store's rich-text mutation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextDocument {
    pub children: Vec<DocumentNode>,
}

impl RichTextDocument {
    pub fn new(children: Vec<DocumentNode>) -> Self {
        Self { children }
    }

    /// Minimal valid document: one paragraph holding one empty text leaf.
    ///
    /// Used when conversion input is empty or yields no usable content.
    pub fn empty_paragraph() -> Self {
        Self::new(vec![DocumentNode::Element(ElementNode::new(
            ElementKind::Paragraph,
            vec![DocumentNode::Text(TextNode::plain(""))],
        ))])
    }

    /// Best-effort fallback tree: one paragraph of plain text.
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self::new(vec![DocumentNode::Element(ElementNode::new(
            ElementKind::Paragraph,
            vec![DocumentNode::Text(TextNode::plain(text))],
        ))])
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
