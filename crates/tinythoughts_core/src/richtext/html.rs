//! HTML fragment parsing into the store document tree.
//!
//! # Responsibility
//! - Map the editor widget's HTML output onto `RichTextDocument` nodes.
//! - Keep the mapping total: unknown markup falls back to plain paragraphs.
//!
//! # Invariants
//! - Identical HTML input produces an identical tree (no randomized state).
//! - The returned document always has at least one child element.
//! - Parsing never fails; the html5ever recovery path handles malformed input.

use crate::model::document::{DocumentNode, ElementKind, ElementNode, RichTextDocument, TextNode};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Maximum characters retained in a derived preview.
pub const PREVIEW_MAX_CHARS: usize = 100;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Inline formatting state accumulated while descending mark elements.
#[derive(Debug, Clone, Copy, Default)]
struct Marks {
    bold: bool,
    italic: bool,
    underline: bool,
    code: bool,
}

impl Marks {
    fn apply(self, text: impl Into<String>) -> TextNode {
        TextNode {
            text: text.into(),
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            code: self.code,
        }
    }
}

/// Converts an editor HTML fragment into the store document tree.
///
/// The editor widget emits well-formed fragments under normal use, so the
/// mapping aims for fidelity on the tag set the editor produces (paragraphs,
/// headings, lists, block quotes, links, and the four inline marks) and
/// degrades to plain-text paragraphs for anything else. Empty or blank input
/// yields a single empty paragraph, the minimal document the store accepts.
pub fn html_to_document(html: &str) -> RichTextDocument {
    let fragment = Html::parse_fragment(html);
    let mut blocks = Vec::new();

    for child in fragment.root_element().children() {
        match child.value() {
            Node::Text(text) => {
                let raw: &str = text;
                if !raw.trim().is_empty() {
                    blocks.push(paragraph_of(vec![DocumentNode::Text(TextNode::plain(
                        raw.trim(),
                    ))]));
                }
            }
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    convert_block(element, &mut blocks);
                }
            }
            _ => {}
        }
    }

    if blocks.is_empty() {
        let salvage = extract_text(html);
        if salvage.is_empty() {
            return RichTextDocument::empty_paragraph();
        }
        return RichTextDocument::plain_text(salvage);
    }

    RichTextDocument::new(blocks)
}

/// Derives a plain-text preview from stored note HTML.
///
/// Tags are stripped, whitespace collapsed, and the result capped at
/// [`PREVIEW_MAX_CHARS`] characters. Returns `None` when nothing but
/// whitespace remains.
pub fn derive_html_preview(html: &str) -> Option<String> {
    let text = extract_text(html);
    if text.is_empty() {
        return None;
    }
    Some(text.chars().take(PREVIEW_MAX_CHARS).collect())
}

fn extract_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let joined = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    WHITESPACE_RE.replace_all(&joined, " ").trim().to_string()
}

fn convert_block(element: ElementRef<'_>, blocks: &mut Vec<DocumentNode>) {
    let kind = match element.value().name() {
        "p" | "div" => ElementKind::Paragraph,
        "h1" => ElementKind::HeadingOne,
        "h2" => ElementKind::HeadingTwo,
        "h3" => ElementKind::HeadingThree,
        "h4" => ElementKind::HeadingFour,
        "h5" => ElementKind::HeadingFive,
        "h6" => ElementKind::HeadingSix,
        "blockquote" => ElementKind::BlockQuote,
        "ul" => {
            blocks.push(convert_list(element, ElementKind::BulletedList));
            return;
        }
        "ol" => {
            blocks.push(convert_list(element, ElementKind::NumberedList));
            return;
        }
        // Unknown container: flatten to a paragraph of its inline content.
        _ => ElementKind::Paragraph,
    };

    let mut inlines = Vec::new();
    collect_inlines(element, Marks::default(), &mut inlines);
    blocks.push(DocumentNode::Element(ElementNode::new(
        kind,
        ensure_leaf(inlines),
    )));
}

fn convert_list(element: ElementRef<'_>, kind: ElementKind) -> DocumentNode {
    let mut items = Vec::new();
    for child in element.children() {
        let Some(item) = ElementRef::wrap(child) else {
            continue;
        };
        if item.value().name() != "li" {
            continue;
        }
        let mut inlines = Vec::new();
        collect_inlines(item, Marks::default(), &mut inlines);
        items.push(DocumentNode::Element(ElementNode::new(
            ElementKind::ListItem,
            ensure_leaf(inlines),
        )));
    }
    DocumentNode::Element(ElementNode::new(kind, ensure_leaf(items)))
}

fn collect_inlines(element: ElementRef<'_>, marks: Marks, out: &mut Vec<DocumentNode>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let raw: &str = text;
                if !raw.is_empty() {
                    out.push(DocumentNode::Text(marks.apply(raw)));
                }
            }
            Node::Element(_) => {
                let Some(inner) = ElementRef::wrap(child) else {
                    continue;
                };
                match inner.value().name() {
                    "b" | "strong" => collect_inlines(inner, Marks { bold: true, ..marks }, out),
                    "i" | "em" => collect_inlines(inner, Marks { italic: true, ..marks }, out),
                    "u" => collect_inlines(inner, Marks { underline: true, ..marks }, out),
                    "code" => collect_inlines(inner, Marks { code: true, ..marks }, out),
                    "a" => {
                        let mut children = Vec::new();
                        collect_inlines(inner, marks, &mut children);
                        let href = inner.value().attr("href").unwrap_or_default();
                        out.push(DocumentNode::Element(ElementNode::link(
                            href,
                            ensure_leaf(children),
                        )));
                    }
                    "br" => out.push(DocumentNode::Text(marks.apply("\n"))),
                    // Spans and other inline wrappers are transparent.
                    _ => collect_inlines(inner, marks, out),
                }
            }
            _ => {}
        }
    }
}

/// The store rejects element nodes without children; pad with an empty leaf.
fn ensure_leaf(children: Vec<DocumentNode>) -> Vec<DocumentNode> {
    if children.is_empty() {
        vec![DocumentNode::Text(TextNode::plain(""))]
    } else {
        children
    }
}

fn paragraph_of(children: Vec<DocumentNode>) -> DocumentNode {
    DocumentNode::Element(ElementNode::new(ElementKind::Paragraph, children))
}
