use std::{fmt::Write, fs, path::Path};

use color_eyre::eyre::{Context, Result};
use log::info;
use quire_richtext::RenderResult;

use super::BuiltPage;
use crate::{config::Config, html::template::PageTemplate};

/// Write a page, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_page(path: &Path, html: &str) -> Result<()> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create directory: {}", parent.display())
    })?;
  }
  fs::write(path, html)
    .wrap_err_with(|| format!("Failed to write {}", path.display()))
}

/// Create a fallback index listing every page.
#[must_use]
pub fn create_fallback_index(config: &Config, pages: &[BuiltPage]) -> String {
  let mut html = format!(
    "<h1>{}</h1>\n<ul>\n",
    html_escape::encode_text(&config.title)
  );

  for page in pages {
    let href = page.rel_path.to_string_lossy().replace('\\', "/");
    let label = page.title.as_deref().unwrap_or(&href);
    let _ = writeln!(
      html,
      "<li><a href=\"{}\">{}</a></li>",
      html_escape::encode_double_quoted_attribute(&href),
      html_escape::encode_text(label)
    );
  }

  html.push_str("</ul>");
  html
}

/// Write `index.html` unless a content document already produced one.
///
/// # Errors
///
/// Returns an error if the page cannot be rendered or written.
pub fn ensure_index(
  config: &Config,
  template: &PageTemplate,
  pages: &[BuiltPage],
) -> Result<()> {
  let index_path = config.output_dir.join("index.html");
  if index_path.exists() {
    return Ok(());
  }

  let document = RenderResult {
    html:     create_fallback_index(config, pages),
    headings: Vec::new(),
    title:    None,
  };
  let html = template
    .render(config, &document, None, Path::new("index.html"))
    .wrap_err("Failed to render fallback index")?;

  write_page(&index_path, &html)?;
  info!("Created fallback index: {}", index_path.display());
  Ok(())
}
