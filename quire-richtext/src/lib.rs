//! # quire-richtext - rich-text rendering for the Quire publication portal
//!
//! Renders the JSON content trees stored by the CMS rich-text editor into
//! HTML. Text runs are escaped and wrapped in their formatting marks, elements
//! are dispatched on their `type`, and callers can take over any type with an
//! override renderer.
//!
//! ## Quick Start
//!
//! ```rust
//! use quire_richtext::{Serializer, parse_content};
//!
//! let content = parse_content(
//!   r#"[{ "type": "h1", "children": [{ "text": "Volume 7" }] },
//!       { "text": "Call for <papers>", "bold": true }]"#,
//!   None,
//! )
//! .unwrap_or_default();
//!
//! let result = Serializer::default().render_document(&content, None);
//!
//! assert!(result.html.contains("<strong>Call for &lt;papers&gt;</strong>"));
//! assert_eq!(result.title.as_deref(), Some("Volume 7"));
//! ```
//!
//! ## Overrides
//!
//! ```rust
//! use quire_richtext::{ContentNode, Element, Overrides, Serializer};
//!
//! let overrides = Overrides::new().with("callout", |args| {
//!   Element::new("aside")
//!     .class("note")
//!     .children(args.render.render(Some(&args.node.children)))
//!     .into()
//! });
//!
//! let content = [Some(ContentNode::element("callout", [ContentNode::text(
//!   "Deadline extended",
//! )]))];
//!
//! let html = Serializer::default().render_html(Some(&content), Some(&overrides));
//! assert_eq!(html, r#"<aside class="note">Deadline extended</aside>"#);
//! ```
//!
//! ## Features
//!
//! - **Fail-soft input**: malformed nodes fall back to defaults and unknown
//!   types render as paragraphs, nothing in the render path returns an error
//! - **Fixed mark order**: bold, code, italic, underline, strikethrough from
//!   the innermost wrapper out
//! - **Injected escaping** through the [`Escaper`] trait
//! - **Bounded nesting** with [`RenderOptions::max_depth`]

pub mod error;
pub mod escape;
pub mod markup;
pub mod node;
pub mod serializer;
mod types;
pub mod utils;

pub use crate::{
  error::{Error, Result},
  escape::{Escaper, HtmlEscaper},
  markup::{Element, RenderedUnit, units_to_html},
  node::{
    ContentNode,
    ElementNode,
    ElementTag,
    HeadingLevel,
    MarkSet,
    TextNode,
    Upload,
  },
  serializer::{
    OverrideArgs,
    Overrides,
    RenderContext,
    RenderOptions,
    RenderOptionsBuilder,
    Serializer,
    Theme,
    parse_content,
    render,
  },
  types::{Heading, RenderResult},
};
