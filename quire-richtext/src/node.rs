//! Content tree model for documents authored in the CMS rich-text editor.
//!
//! The editor stores a document as a JSON array of nodes. A node is either a
//! text run (an object carrying a string `text` field plus optional mark
//! flags) or an element with a `type` and nested `children`. Conversion from
//! that wire shape never fails: missing or mistyped fields fall back to
//! defaults so that a single bad node cannot take the whole document down.
//!
//! ```
//! use quire_richtext::{ContentNode, ElementTag, HeadingLevel};
//! use serde_json::json;
//!
//! let node = ContentNode::from_value(&json!({
//!   "type": "h2",
//!   "children": [{ "text": "Editorial board", "bold": true }]
//! }))
//! .unwrap_or_else(|| ContentNode::text(""));
//!
//! let ContentNode::Element(element) = node else {
//!   unreachable!()
//! };
//! assert_eq!(element.tag, ElementTag::Heading(HeadingLevel::H2));
//! assert_eq!(element.children.len(), 1);
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Keys of the wire shape that are lifted into typed fields. Anything else an
/// element carries ends up in [`ElementNode::extra`].
const ELEMENT_KEYS: &[&str] = &["type", "children", "url", "newTab", "value"];

/// Formatting marks carried by a text run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "One flag per editor mark, mirrors the stored document"
)]
pub struct MarkSet {
  pub bold:          bool,
  pub italic:        bool,
  pub underline:     bool,
  pub strikethrough: bool,
  pub code:          bool,
}

impl MarkSet {
  /// Read the marks of a text object. A mark is set when its flag is truthy.
  fn from_object(object: &Map<String, Value>) -> Self {
    let flag = |key: &str| object.get(key).is_some_and(is_truthy);
    Self {
      bold:          flag("bold"),
      italic:        flag("italic"),
      underline:     flag("underline"),
      strikethrough: flag("strikethrough"),
      code:          flag("code"),
    }
  }

  /// Whether no mark is set.
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    !(self.bold
      || self.italic
      || self.underline
      || self.strikethrough
      || self.code)
  }
}

/// Heading level of an `h1`..`h6` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingLevel {
  H1 = 1,
  H2 = 2,
  H3 = 3,
  H4 = 4,
  H5 = 5,
  H6 = 6,
}

impl HeadingLevel {
  /// All levels, from the heaviest to the lightest.
  pub const ALL: [Self; 6] =
    [Self::H1, Self::H2, Self::H3, Self::H4, Self::H5, Self::H6];

  /// Convert a numeric level (1-6).
  #[must_use]
  pub const fn from_u8(level: u8) -> Option<Self> {
    match level {
      1 => Some(Self::H1),
      2 => Some(Self::H2),
      3 => Some(Self::H3),
      4 => Some(Self::H4),
      5 => Some(Self::H5),
      6 => Some(Self::H6),
      _ => None,
    }
  }

  #[must_use]
  pub const fn as_u8(self) -> u8 {
    self as u8
  }

  /// Zero-based position, used to index per-level tables.
  #[must_use]
  pub const fn index(self) -> usize {
    self as usize - 1
  }

  /// The element name, `h1` through `h6`.
  #[must_use]
  pub const fn tag_name(self) -> &'static str {
    match self {
      Self::H1 => "h1",
      Self::H2 => "h2",
      Self::H3 => "h3",
      Self::H4 => "h4",
      Self::H5 => "h5",
      Self::H6 => "h6",
    }
  }
}

/// Structural role of an element node, parsed from its `type` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementTag {
  Upload,
  Indent,
  Br,
  Heading(HeadingLevel),
  Quote,
  UnorderedList,
  OrderedList,
  ListItem,
  Link,
  /// Any `type` without built-in handling. Rendered through overrides or the
  /// paragraph fallback.
  Other(String),
  /// The element had no string `type` at all.
  Untyped,
}

impl ElementTag {
  /// Parse a wire `type` string.
  #[must_use]
  pub fn from_type(name: &str) -> Self {
    match name {
      "upload" => Self::Upload,
      "indent" => Self::Indent,
      "br" => Self::Br,
      "h1" => Self::Heading(HeadingLevel::H1),
      "h2" => Self::Heading(HeadingLevel::H2),
      "h3" => Self::Heading(HeadingLevel::H3),
      "h4" => Self::Heading(HeadingLevel::H4),
      "h5" => Self::Heading(HeadingLevel::H5),
      "h6" => Self::Heading(HeadingLevel::H6),
      "quote" => Self::Quote,
      "ul" => Self::UnorderedList,
      "ol" => Self::OrderedList,
      "li" => Self::ListItem,
      "link" => Self::Link,
      other => Self::Other(other.to_string()),
    }
  }

  /// The wire `type` string this tag was parsed from, if any.
  #[must_use]
  pub fn type_name(&self) -> Option<&str> {
    Some(match self {
      Self::Upload => "upload",
      Self::Indent => "indent",
      Self::Br => "br",
      Self::Heading(level) => level.tag_name(),
      Self::Quote => "quote",
      Self::UnorderedList => "ul",
      Self::OrderedList => "ol",
      Self::ListItem => "li",
      Self::Link => "link",
      Self::Other(name) => name.as_str(),
      Self::Untyped => return None,
    })
  }
}

impl From<&str> for ElementTag {
  fn from(name: &str) -> Self {
    Self::from_type(name)
  }
}

/// Media reference attached to an `upload` element under its `value` key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Upload {
  pub url: Option<String>,
  pub alt: Option<String>,
}

impl Upload {
  fn from_object(object: &Map<String, Value>) -> Self {
    Self {
      url: string_field(object, "url"),
      alt: string_field(object, "alt"),
    }
  }
}

/// A run of text with its marks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextNode {
  pub text:  String,
  pub marks: MarkSet,
}

/// A structural node with ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
  pub tag:      ElementTag,
  /// Children in document order. `None` marks a `null` entry.
  pub children: Vec<Option<ContentNode>>,
  /// Target of a `link` element.
  pub url:      Option<String>,
  /// Whether a `link` opens in a new browsing context.
  pub new_tab:  bool,
  /// Media of an `upload` element.
  pub upload:   Option<Upload>,
  /// Remaining wire fields, left for overrides to interpret.
  pub extra:    Map<String, Value>,
}

impl ElementNode {
  #[must_use]
  pub fn new(tag: impl Into<ElementTag>) -> Self {
    Self {
      tag:      tag.into(),
      children: Vec::new(),
      url:      None,
      new_tab:  false,
      upload:   None,
      extra:    Map::new(),
    }
  }

  /// Append present children.
  #[must_use]
  pub fn with_children(
    mut self,
    children: impl IntoIterator<Item = ContentNode>,
  ) -> Self {
    self.children.extend(children.into_iter().map(Some));
    self
  }

  #[must_use]
  pub fn with_url(mut self, url: impl Into<String>) -> Self {
    self.url = Some(url.into());
    self
  }

  #[must_use]
  pub const fn with_new_tab(mut self, new_tab: bool) -> Self {
    self.new_tab = new_tab;
    self
  }

  #[must_use]
  pub fn with_upload(mut self, upload: Upload) -> Self {
    self.upload = Some(upload);
    self
  }

  fn from_object(object: &Map<String, Value>) -> Self {
    let tag = object
      .get("type")
      .and_then(Value::as_str)
      .map_or(ElementTag::Untyped, ElementTag::from_type);

    let children = object
      .get("children")
      .and_then(Value::as_array)
      .map(|items| items.iter().map(ContentNode::from_value).collect())
      .unwrap_or_default();

    let extra = object
      .iter()
      .filter(|(key, _)| !ELEMENT_KEYS.contains(&key.as_str()))
      .map(|(key, value)| (key.clone(), value.clone()))
      .collect();

    Self {
      tag,
      children,
      url: string_field(object, "url"),
      new_tab: object.get("newTab").is_some_and(is_truthy),
      upload: object
        .get("value")
        .and_then(Value::as_object)
        .map(Upload::from_object),
      extra,
    }
  }
}

/// One node of a rich-text document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
  Text(TextNode),
  Element(ElementNode),
}

impl ContentNode {
  /// A text run without marks.
  #[must_use]
  pub fn text(text: impl Into<String>) -> Self {
    Self::Text(TextNode {
      text:  text.into(),
      marks: MarkSet::default(),
    })
  }

  /// A text run with the given marks.
  #[must_use]
  pub fn marked(text: impl Into<String>, marks: MarkSet) -> Self {
    Self::Text(TextNode {
      text: text.into(),
      marks,
    })
  }

  /// An element of the given type with present children.
  #[must_use]
  pub fn element(
    tag: impl Into<ElementTag>,
    children: impl IntoIterator<Item = Self>,
  ) -> Self {
    Self::Element(ElementNode::new(tag).with_children(children))
  }

  /// Convert one wire value. Falsy values (`null`, `false`, `0`, `""`) are
  /// absent nodes.
  ///
  /// An object with a string `text` field is a text run, every other object
  /// is an element. Remaining values become an untyped, childless element
  /// so that they still render through the fallback path.
  #[must_use]
  pub fn from_value(value: &Value) -> Option<Self> {
    match value {
      value if !is_truthy(value) => None,
      Value::Object(object) => {
        Some(match object.get("text") {
          Some(Value::String(text)) => {
            Self::Text(TextNode {
              text:  text.clone(),
              marks: MarkSet::from_object(object),
            })
          },
          _ => Self::Element(ElementNode::from_object(object)),
        })
      },
      _ => Some(Self::Element(ElementNode::new(ElementTag::Untyped))),
    }
  }

  /// Children of an element; empty for text runs.
  #[must_use]
  pub fn children(&self) -> &[Option<Self>] {
    match self {
      Self::Text(_) => &[],
      Self::Element(element) => &element.children,
    }
  }

  #[must_use]
  pub const fn as_element(&self) -> Option<&ElementNode> {
    match self {
      Self::Element(element) => Some(element),
      Self::Text(_) => None,
    }
  }
}

impl From<TextNode> for ContentNode {
  fn from(node: TextNode) -> Self {
    Self::Text(node)
  }
}

impl From<ElementNode> for ContentNode {
  fn from(node: ElementNode) -> Self {
    Self::Element(node)
  }
}

impl<'de> Deserialize<'de> for ContentNode {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    // `Option<ContentNode>` handles `null` before reaching this impl. Other
    // falsy values land here and become untyped elements; sequences that
    // must skip them go through `deserialize_content`.
    let value = Value::deserialize(deserializer)?;
    Ok(
      Self::from_value(&value)
        .unwrap_or_else(|| Self::Element(ElementNode::new(ElementTag::Untyped))),
    )
  }
}

/// Deserialize a node sequence the way the loader reads it, with every falsy
/// entry absent. For use with `#[serde(deserialize_with = "...")]`.
///
/// # Errors
///
/// Returns an error if the input is not a sequence.
pub fn deserialize_content<'de, D>(
  deserializer: D,
) -> Result<Vec<Option<ContentNode>>, D::Error>
where
  D: Deserializer<'de>,
{
  let values = Vec::<Value>::deserialize(deserializer)?;
  Ok(values.iter().map(ContentNode::from_value).collect())
}

/// Truthiness of a wire value as the editor reads it: `null`, `false`, zero
/// and the empty string are false, everything else is true.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(flag) => *flag,
    Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
    Value::String(text) => !text.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
  object.get(key).and_then(Value::as_str).map(ToOwned::to_owned)
}
