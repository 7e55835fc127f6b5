//! Types for quire-richtext public API and internal use.
use serde::{Deserialize, Serialize};

/// Represents a heading in a rich-text document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
  /// Heading text (inline content, no formatting).
  pub text:  String,
  /// Heading level (1-6).
  pub level: u8,
  /// Anchor ID carried by the rendered heading. Empty when no anchor was
  /// emitted.
  pub id:    String,
}

/// Result of rendering a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderResult {
  /// Rendered HTML output.
  pub html: String,

  /// Headings rendered by the serializer, in document order (for `ToC`,
  /// navigation, etc).
  pub headings: Vec<Heading>,

  /// Title of the document, if found (first h1).
  pub title: Option<String>,
}
