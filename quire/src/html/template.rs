use std::{fs, path::Path};

use quire_richtext::RenderResult;
use tera::Tera;

use crate::{config::Config, error::ConfigError};

/// Built-in page template, used when no template is configured.
pub const PAGE_TEMPLATE: &str = include_str!("../../templates/page.html");

/// Name the page template is registered under. The `.html` suffix turns on
/// Tera's autoescaping for everything except `content`.
const PAGE_TEMPLATE_NAME: &str = "page.html";

/// Page template shared by every document in a build.
#[derive(Debug)]
pub struct PageTemplate {
  tera: Tera,
}

impl PageTemplate {
  /// Load the configured template, or the built-in one.
  ///
  /// # Errors
  ///
  /// Returns an error if a custom template cannot be read or fails to parse.
  pub fn load(config: &Config) -> Result<Self, ConfigError> {
    let source = match &config.template_path {
      Some(path) => {
        fs::read_to_string(path).map_err(|e| {
          ConfigError::Template(format!(
            "Failed to read custom template file: {}: {e}",
            path.display()
          ))
        })?
      },
      None => PAGE_TEMPLATE.to_string(),
    };

    let mut tera = Tera::default();
    tera.add_raw_template(PAGE_TEMPLATE_NAME, &source)?;
    Ok(Self { tera })
  }

  /// Wrap a rendered document in a full page.
  ///
  /// `rel_path` is the page's path relative to the output root and is used
  /// to build links back to the root. `title` defaults to the document's
  /// first `h1`.
  ///
  /// # Errors
  ///
  /// Returns an error if the template fails to render.
  pub fn render(
    &self,
    config: &Config,
    document: &RenderResult,
    title: Option<&str>,
    rel_path: &Path,
  ) -> Result<String, ConfigError> {
    let mut context = tera::Context::new();
    context.insert("content", &document.html);
    context.insert("title", &title.or(document.title.as_deref()));
    context.insert("headings", &document.headings);
    context.insert("anchors", &config.heading_anchors);
    context.insert("site_title", &config.title);
    context.insert("footer_text", &config.footer_text);
    context.insert("root", &calculate_root_relative_path(rel_path));
    context.insert("version", env!("CARGO_PKG_VERSION"));

    Ok(self.tera.render(PAGE_TEMPLATE_NAME, &context)?)
  }
}

/// Calculate the relative path prefix needed to reach the root from a given
/// file path. For example: "volumes/7/about.html" would return "../../"
#[must_use]
pub fn calculate_root_relative_path(file_rel_path: &Path) -> String {
  let depth = file_rel_path.components().count();
  if depth <= 1 {
    String::new()
  } else {
    "../".repeat(depth - 1)
  }
}
