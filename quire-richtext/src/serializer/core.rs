//! Core implementation of the serializer.
//!
//! This module contains the `Serializer` constructors and entry points, and
//! the per-node dispatch run by [`RenderContext`].
use std::{cell::RefCell, sync::Arc};

use log::{debug, trace, warn};

use super::types::{
  Outline,
  OverrideArgs,
  Overrides,
  RenderContext,
  RenderOptions,
  Serializer,
};
use crate::{
  escape::{Escaper, HtmlEscaper},
  markup::{Element, RenderedUnit, units_to_html},
  node::{ContentNode, ElementNode, ElementTag, HeadingLevel, TextNode},
  types::{Heading, RenderResult},
  utils,
};

impl Serializer {
  /// Create a serializer that escapes with [`HtmlEscaper`].
  #[must_use]
  pub fn new(options: RenderOptions) -> Self {
    Self::with_escaper(options, HtmlEscaper)
  }

  /// Create a serializer with a custom escaping capability.
  #[must_use]
  pub fn with_escaper(
    options: RenderOptions,
    escaper: impl Escaper + 'static,
  ) -> Self {
    let escaper: Arc<dyn Escaper> = Arc::new(escaper);
    let classes = options
      .theme
      .map(|class| escaper.escape(class).into_owned());
    Self {
      options,
      classes,
      escaper,
    }
  }

  /// Access serializer options.
  #[must_use]
  pub const fn options(&self) -> &RenderOptions {
    &self.options
  }

  /// The escaping capability, for overrides that emit content themselves.
  #[must_use]
  pub fn escaper(&self) -> &dyn Escaper {
    self.escaper.as_ref()
  }

  /// A context for rendering top-level content. Anchor IDs are unique within
  /// one `outline`.
  fn context<'a>(
    &'a self,
    overrides: Option<&'a Overrides>,
    outline: &'a RefCell<Outline>,
  ) -> RenderContext<'a> {
    RenderContext {
      serializer: self,
      overrides,
      outline,
      depth: 0,
    }
  }

  /// Render a content sequence into one unit per present node.
  ///
  /// Absent content renders as an empty sequence; `None` entries are skipped.
  #[must_use]
  pub fn render(
    &self,
    content: Option<&[Option<ContentNode>]>,
    overrides: Option<&Overrides>,
  ) -> Vec<RenderedUnit> {
    let outline = RefCell::new(Outline::default());
    self.context(overrides, &outline).render(content)
  }

  /// Render a content sequence straight to HTML.
  #[must_use]
  pub fn render_html(
    &self,
    content: Option<&[Option<ContentNode>]>,
    overrides: Option<&Overrides>,
  ) -> String {
    units_to_html(&self.render(content, overrides))
  }

  /// Render a document to HTML, collecting its headings and title.
  ///
  /// `headings` lists the headings the serializer rendered itself, with the
  /// anchor IDs it emitted. Headings taken over by an override or dropped by
  /// the depth bound are left out.
  #[must_use]
  pub fn render_document(
    &self,
    content: &[Option<ContentNode>],
    overrides: Option<&Overrides>,
  ) -> RenderResult {
    let outline = RefCell::new(Outline::default());
    let units = self.context(overrides, &outline).render(Some(content));

    RenderResult {
      html:     units_to_html(&units),
      headings: outline.into_inner().headings,
      title:    utils::extract_title(content),
    }
  }
}

impl Default for Serializer {
  fn default() -> Self {
    Self::new(RenderOptions::default())
  }
}

impl RenderContext<'_> {
  /// Render a node sequence at this context's depth.
  ///
  /// This is the same entry point the serializer uses for element children,
  /// so overrides calling it get identical treatment for nested content.
  #[must_use]
  pub fn render(
    &self,
    content: Option<&[Option<ContentNode>]>,
  ) -> Vec<RenderedUnit> {
    let Some(content) = content else {
      return Vec::new();
    };

    if self.depth > self.serializer.options.max_depth {
      if !content.is_empty() {
        warn!(
          "Content nested deeper than {} levels, dropping {} node(s)",
          self.serializer.options.max_depth,
          content.len()
        );
      }
      return Vec::new();
    }

    content
      .iter()
      .enumerate()
      .filter_map(|(index, node)| {
        node.as_ref().map(|node| self.render_node(node, index))
      })
      .collect()
  }

  /// Nesting depth of the nodes this context renders.
  #[must_use]
  pub const fn depth(&self) -> usize {
    self.depth
  }

  /// The serializer driving this render.
  #[must_use]
  pub const fn serializer(&self) -> &Serializer {
    self.serializer
  }

  /// Escape a string with the serializer's escaper.
  #[must_use]
  pub fn escape(&self, input: &str) -> String {
    self.serializer.escaper.escape(input).into_owned()
  }

  const fn nested(&self) -> Self {
    Self {
      depth: self.depth + 1,
      ..*self
    }
  }

  fn render_node(&self, node: &ContentNode, index: usize) -> RenderedUnit {
    match node {
      ContentNode::Text(text) => self.render_text(text),
      ContentNode::Element(element) => self.render_element(element, index),
    }
  }

  fn render_text(&self, node: &TextNode) -> RenderedUnit {
    if node.text.is_empty() {
      return RenderedUnit::LineBreak;
    }

    let marks = node.marks;
    let mut unit = RenderedUnit::Text(self.escape(&node.text));

    if marks.bold {
      unit = Element::new("strong").child(unit).into();
    }
    if marks.code {
      unit = Element::new("code").child(unit).into();
    }
    if marks.italic {
      unit = Element::new("em").child(unit).into();
    }
    if marks.underline {
      unit = Element::new("span")
        .attr("style", "text-decoration: underline")
        .child(unit)
        .into();
    }
    if marks.strikethrough {
      unit = Element::new("span")
        .attr("style", "text-decoration: line-through")
        .child(unit)
        .into();
    }

    unit
  }

  fn render_element(&self, node: &ElementNode, index: usize) -> RenderedUnit {
    if let Some(renderer) = node
      .tag
      .type_name()
      .and_then(|name| self.overrides?.get(name))
    {
      trace!("Rendering {:?} at index {index} through override", node.tag);
      let nested = self.nested();
      return renderer(OverrideArgs {
        node,
        render: &nested,
        index,
      });
    }

    let classes = &self.serializer.classes;
    let element = match &node.tag {
      ElementTag::Upload => {
        let upload = node.upload.as_ref();
        let mut img = Element::new("img");
        if let Some(url) = upload.and_then(|u| u.url.as_deref()) {
          img = img.attr("src", self.escape(url));
        }
        if let Some(alt) = upload.and_then(|u| u.alt.as_deref()) {
          img = img.attr("alt", self.escape(alt));
        }
        return img.class(&classes.upload).into();
      },
      ElementTag::Br => return RenderedUnit::LineBreak,
      ElementTag::Indent => Element::new("div").class(&classes.indent),
      ElementTag::Heading(level) => self.heading(*level, node),
      ElementTag::Quote => Element::new("blockquote"),
      ElementTag::UnorderedList => Element::new("ul"),
      ElementTag::OrderedList => Element::new("ol"),
      ElementTag::ListItem => {
        Element::new("li").class(&classes.list_item).child(
          Element::new("span")
            .child(RenderedUnit::Text(classes.bullet.clone())),
        )
      },
      ElementTag::Link => {
        let href = node
          .url
          .as_deref()
          .map(|url| self.escape(url))
          .unwrap_or_default();
        let link = Element::new("a").attr("href", href);
        let link = if node.new_tab {
          link
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
        } else {
          link
        };
        link.class(&classes.link)
      },
      ElementTag::Other(_) | ElementTag::Untyped => {
        debug!("No renderer for {:?}, rendering as paragraph", node.tag);
        Element::new("p").class(&classes.paragraph)
      },
    };

    element
      .children(self.nested().render(Some(&node.children)))
      .into()
  }

  fn heading(&self, level: HeadingLevel, node: &ElementNode) -> Element {
    let text = utils::inline_text(&node.children);
    let id = if self.serializer.options.heading_anchors {
      self.outline.borrow_mut().slugs.claim(utils::slugify(&text))
    } else {
      String::new()
    };

    let mut heading = Element::new(level.tag_name());
    if !id.is_empty() {
      heading = heading.attr("id", self.escape(&id));
    }
    self.outline.borrow_mut().headings.push(Heading {
      text,
      level: level.as_u8(),
      id,
    });

    heading.class(&self.serializer.classes.headings[level.index()])
  }
}

/// Render content with a default serializer.
///
/// Shorthand for `Serializer::default().render(content, overrides)`.
#[must_use]
pub fn render(
  content: Option<&[Option<ContentNode>]>,
  overrides: Option<&Overrides>,
) -> Vec<RenderedUnit> {
  Serializer::default().render(content, overrides)
}
