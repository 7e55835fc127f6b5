//! Type definitions for the content serializer.
//!
//! Contains the configuration ([`RenderOptions`], [`Theme`]), the
//! [`Serializer`] itself, and the override table that lets callers take over
//! rendering of individual node types.
//!
//! # Examples
//!
//! ```
//! use quire_richtext::{RenderOptions, Serializer, Theme};
//!
//! let options = RenderOptions {
//!   theme: Theme::plain(),
//!   heading_anchors: true,
//!   ..Default::default()
//! };
//!
//! let serializer = Serializer::new(options);
//! ```

use std::{cell::RefCell, collections::HashMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
  escape::Escaper,
  markup::RenderedUnit,
  node::ElementNode,
  types::Heading,
  utils::SlugSet,
};

/// Default bound on element nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Class names applied by the built-in renderers.
///
/// The defaults are the utility classes used by the portal's pages. Empty
/// strings suppress the `class` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
  /// Classes for `h1` through `h6`, heaviest first.
  pub headings:  [String; 6],
  pub paragraph: String,
  pub link:      String,
  pub list_item: String,
  pub indent:    String,
  pub upload:    String,
  /// Marker glyph placed before list item content.
  pub bullet:    String,
}

impl Theme {
  /// A theme without any classes. The bullet glyph is kept.
  #[must_use]
  pub fn plain() -> Self {
    Self {
      headings:  Default::default(),
      paragraph: String::new(),
      link:      String::new(),
      list_item: String::new(),
      indent:    String::new(),
      upload:    String::new(),
      bullet:    "•".to_string(),
    }
  }

  /// Apply `f` to every class string and the bullet.
  #[must_use]
  pub(crate) fn map(&self, mut f: impl FnMut(&str) -> String) -> Self {
    Self {
      headings:  self.headings.each_ref().map(|class| f(class)),
      paragraph: f(&self.paragraph),
      link:      f(&self.link),
      list_item: f(&self.list_item),
      indent:    f(&self.indent),
      upload:    f(&self.upload),
      bullet:    f(&self.bullet),
    }
  }
}

impl Default for Theme {
  fn default() -> Self {
    Self {
      headings:  [
        "text-dark-500 text-5xl font-bold mb-3 mt-4".to_string(),
        "text-dark-500 text-4xl font-bold mb-3 mt-4".to_string(),
        "text-dark-500 text-3xl font-semibold mb-3 mt-4".to_string(),
        "text-dark-500 text-2xl font-semibold mb-1 mt-3".to_string(),
        "text-dark-500 text-xl font-semibold mb-1 mt-3".to_string(),
        "text-dark-500 text-lg font-semibold mb-1".to_string(),
      ],
      paragraph: "text-dark-500 my-1".to_string(),
      link:      "text-primary-400".to_string(),
      list_item: "flex gap-x-2".to_string(),
      indent:    "ml-5".to_string(),
      upload:    "rounded-md".to_string(),
      bullet:    "•".to_string(),
    }
  }
}

/// Options for configuring the serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
  /// Class names for built-in elements.
  pub theme: Theme,

  /// Deepest element nesting that is descended into. Children below this
  /// depth are dropped and a warning is logged.
  pub max_depth: usize,

  /// Give headings an `id` derived from their text.
  pub heading_anchors: bool,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      theme:           Theme::default(),
      max_depth:       DEFAULT_MAX_DEPTH,
      heading_anchors: false,
    }
  }
}

/// Builder for constructing `RenderOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct RenderOptionsBuilder {
  options: RenderOptions,
}

impl RenderOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Set the class theme.
  #[must_use]
  pub fn theme(mut self, theme: Theme) -> Self {
    self.options.theme = theme;
    self
  }

  /// Set the nesting bound.
  #[must_use]
  pub const fn max_depth(mut self, depth: usize) -> Self {
    self.options.max_depth = depth;
    self
  }

  /// Enable or disable heading anchors.
  #[must_use]
  pub const fn heading_anchors(mut self, enabled: bool) -> Self {
    self.options.heading_anchors = enabled;
    self
  }

  /// Build the final `RenderOptions`.
  #[must_use]
  pub fn build(self) -> RenderOptions {
    self.options
  }
}

/// Rich-text serializer.
///
/// Cheap to clone; the escaper is shared.
#[derive(Clone)]
pub struct Serializer {
  pub(crate) options: RenderOptions,
  /// Theme with every class already escaped.
  pub(crate) classes: Theme,
  pub(crate) escaper: Arc<dyn Escaper>,
}

impl fmt::Debug for Serializer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Serializer")
      .field("options", &self.options)
      .finish_non_exhaustive()
  }
}

/// Signature of an override renderer.
pub type OverrideFn = dyn Fn(OverrideArgs<'_>) -> RenderedUnit + Send + Sync;

/// Arguments handed to an override renderer.
pub struct OverrideArgs<'a> {
  /// The element being rendered.
  pub node:   &'a ElementNode,
  /// Entry point for rendering the element's children with the same rules.
  pub render: &'a RenderContext<'a>,
  /// Position of the node within its parent sequence.
  pub index:  usize,
}

/// Table of caller-supplied renderers keyed by node `type`.
///
/// A renderer registered for a type takes precedence over the built-in
/// handling of that type.
#[derive(Clone, Default)]
pub struct Overrides {
  renderers: HashMap<String, Arc<OverrideFn>>,
}

impl Overrides {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a renderer, returning the one it replaces.
  pub fn insert<F>(
    &mut self,
    node_type: impl Into<String>,
    renderer: F,
  ) -> Option<Arc<OverrideFn>>
  where
    F: Fn(OverrideArgs<'_>) -> RenderedUnit + Send + Sync + 'static,
  {
    self.renderers.insert(node_type.into(), Arc::new(renderer))
  }

  /// Chaining form of [`Overrides::insert`].
  #[must_use]
  pub fn with<F>(mut self, node_type: impl Into<String>, renderer: F) -> Self
  where
    F: Fn(OverrideArgs<'_>) -> RenderedUnit + Send + Sync + 'static,
  {
    self.insert(node_type, renderer);
    self
  }

  pub fn remove(&mut self, node_type: &str) -> Option<Arc<OverrideFn>> {
    self.renderers.remove(node_type)
  }

  #[must_use]
  pub fn get(&self, node_type: &str) -> Option<&OverrideFn> {
    self.renderers.get(node_type).map(AsRef::as_ref)
  }

  #[must_use]
  pub fn contains(&self, node_type: &str) -> bool {
    self.renderers.contains_key(node_type)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.renderers.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.renderers.is_empty()
  }
}

impl fmt::Debug for Overrides {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut types: Vec<&str> =
      self.renderers.keys().map(String::as_str).collect();
    types.sort_unstable();
    f.debug_struct("Overrides").field("types", &types).finish()
  }
}

/// Headings rendered so far in one pass, and the anchor IDs they took.
#[derive(Debug, Default)]
pub(crate) struct Outline {
  pub(crate) headings: Vec<Heading>,
  pub(crate) slugs:    SlugSet,
}

/// A position in an ongoing render: the serializer, the override table and
/// the nesting depth of the nodes about to be rendered.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
  pub(crate) serializer: &'a Serializer,
  pub(crate) overrides:  Option<&'a Overrides>,
  pub(crate) outline:    &'a RefCell<Outline>,
  pub(crate) depth:      usize,
}

impl fmt::Debug for RenderContext<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RenderContext")
      .field("overrides", &self.overrides)
      .field("depth", &self.depth)
      .finish_non_exhaustive()
  }
}
