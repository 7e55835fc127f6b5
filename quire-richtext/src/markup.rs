//! Rendered output units and their HTML form.
//!
//! Units are built by the serializer (and by caller overrides) and emitted
//! with [`std::fmt::Display`]. Text and attribute values are stored already
//! escaped, so emission writes them verbatim.
use std::{borrow::Cow, fmt};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img"];

/// One piece of rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedUnit {
  /// Markup-safe text. Must already be escaped.
  Text(String),
  /// A line break.
  LineBreak,
  /// A container or void element.
  Element(Element),
  /// Several units with no wrapper of their own.
  Fragment(Vec<RenderedUnit>),
}

impl RenderedUnit {
  #[must_use]
  pub const fn as_element(&self) -> Option<&Element> {
    match self {
      Self::Element(element) => Some(element),
      _ => None,
    }
  }

  /// Render this unit to an HTML string.
  #[must_use]
  pub fn to_html(&self) -> String {
    self.to_string()
  }
}

impl From<Element> for RenderedUnit {
  fn from(element: Element) -> Self {
    Self::Element(element)
  }
}

impl fmt::Display for RenderedUnit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Text(text) => f.write_str(text),
      Self::LineBreak => f.write_str("<br>"),
      Self::Element(element) => write!(f, "{element}"),
      Self::Fragment(units) => {
        units.iter().try_for_each(|unit| write!(f, "{unit}"))
      },
    }
  }
}

/// A named element with attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
  pub name:       Cow<'static, str>,
  /// Attribute pairs in emission order. Values are markup-safe.
  pub attributes: Vec<(Cow<'static, str>, String)>,
  pub children:   Vec<RenderedUnit>,
}

impl Element {
  #[must_use]
  pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
    Self {
      name:       name.into(),
      attributes: Vec::new(),
      children:   Vec::new(),
    }
  }

  /// Add an attribute. The value must already be escaped.
  #[must_use]
  pub fn attr(
    mut self,
    name: impl Into<Cow<'static, str>>,
    value: impl Into<String>,
  ) -> Self {
    self.attributes.push((name.into(), value.into()));
    self
  }

  /// Add a `class` attribute unless `class` is empty.
  #[must_use]
  pub fn class(self, class: &str) -> Self {
    if class.is_empty() {
      self
    } else {
      self.attr("class", class)
    }
  }

  #[must_use]
  pub fn child(mut self, unit: impl Into<RenderedUnit>) -> Self {
    self.children.push(unit.into());
    self
  }

  #[must_use]
  pub fn children(
    mut self,
    units: impl IntoIterator<Item = RenderedUnit>,
  ) -> Self {
    self.children.extend(units);
    self
  }

  /// Look up an attribute value by name.
  #[must_use]
  pub fn attribute(&self, name: &str) -> Option<&str> {
    self
      .attributes
      .iter()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value.as_str())
  }

  #[must_use]
  pub fn is_void(&self) -> bool {
    VOID_ELEMENTS.contains(&&*self.name)
  }
}

impl fmt::Display for Element {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "<{}", self.name)?;
    for (key, value) in &self.attributes {
      write!(f, " {key}=\"{value}\"")?;
    }
    f.write_str(">")?;

    if self.is_void() {
      return Ok(());
    }

    for child in &self.children {
      write!(f, "{child}")?;
    }
    write!(f, "</{}>", self.name)
  }
}

/// Concatenate the HTML of a unit sequence.
#[must_use]
pub fn units_to_html(units: &[RenderedUnit]) -> String {
  units.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_element_with_attributes() {
    let unit: RenderedUnit = Element::new("a")
      .attr("href", "/about")
      .class("text-primary-400")
      .child(RenderedUnit::Text("About".to_string()))
      .into();
    assert_eq!(
      unit.to_html(),
      r#"<a href="/about" class="text-primary-400">About</a>"#
    );
  }

  #[test]
  fn test_empty_class_is_omitted() {
    let element = Element::new("p").class("");
    assert_eq!(element.attribute("class"), None);
    assert_eq!(element.to_string(), "<p></p>");
  }

  #[test]
  fn test_void_elements_have_no_closing_tag() {
    let img = Element::new("img").attr("src", "/a.png");
    assert_eq!(img.to_string(), r#"<img src="/a.png">"#);
    assert_eq!(RenderedUnit::LineBreak.to_html(), "<br>");
  }

  #[test]
  fn test_text_is_written_verbatim() {
    // Already escaped upstream; emitting must not escape again.
    let unit = RenderedUnit::Text("&lt;b&gt;".to_string());
    assert_eq!(unit.to_html(), "&lt;b&gt;");
  }

  #[test]
  fn test_fragment_concatenates() {
    let units = vec![
      RenderedUnit::Fragment(vec![
        RenderedUnit::Text("a".to_string()),
        RenderedUnit::LineBreak,
      ]),
      RenderedUnit::Text("b".to_string()),
    ];
    assert_eq!(units_to_html(&units), "a<br>b");
  }
}
