use crate::error::ConfigError;

/// Default configuration template in TOML, with every field explained.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# Quire Configuration File

# Directory containing JSON content documents
input_dir = "content"

# Output directory for generated pages
output_dir = "build"

# Path of the node array inside each document. Dots descend into nested
# objects, e.g. "data.Guideline.content" for a raw API response.
# content_field = "content"

# Site title and footer shown on every page
title = "Journal Portal"
footer_text = "Rendered with quire"

# Path to a custom page template (Tera syntax)
# template_path = "templates/page.html"

# Number of threads to use for parallel processing (defaults to number of CPU cores)
# jobs = 4

# Deepest element nesting that is rendered. Deeper content is dropped with a
# warning.
max_depth = 256

# Give headings an id derived from their text
heading_anchors = true

# Class names for the built-in elements. Empty strings remove the attribute.
[theme]
headings = [
  "text-dark-500 text-5xl font-bold mb-3 mt-4",
  "text-dark-500 text-4xl font-bold mb-3 mt-4",
  "text-dark-500 text-3xl font-semibold mb-3 mt-4",
  "text-dark-500 text-2xl font-semibold mb-1 mt-3",
  "text-dark-500 text-xl font-semibold mb-1 mt-3",
  "text-dark-500 text-lg font-semibold mb-1",
]
paragraph = "text-dark-500 my-1"
link = "text-primary-400"
list_item = "flex gap-x-2"
indent = "ml-5"
upload = "rounded-md"
bullet = "•"

# Render node types without built-in handling as a wrapper element
# [overrides.callout]
# tag = "aside"
# class = "callout"
"#;

/// Default configuration template in JSON format.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "input_dir": "content",
  "output_dir": "build",
  "title": "Journal Portal",
  "footer_text": "Rendered with quire",
  "max_depth": 256,
  "heading_anchors": true,
  "theme": {
    "headings": [
      "text-dark-500 text-5xl font-bold mb-3 mt-4",
      "text-dark-500 text-4xl font-bold mb-3 mt-4",
      "text-dark-500 text-3xl font-semibold mb-3 mt-4",
      "text-dark-500 text-2xl font-semibold mb-1 mt-3",
      "text-dark-500 text-xl font-semibold mb-1 mt-3",
      "text-dark-500 text-lg font-semibold mb-1"
    ],
    "paragraph": "text-dark-500 my-1",
    "link": "text-primary-400",
    "list_item": "flex gap-x-2",
    "indent": "ml-5",
    "upload": "rounded-md",
    "bullet": "•"
  },
  "overrides": {
    "callout": {
      "tag": "aside",
      "class": "callout"
    }
  }
}
"#;

/// Get the correct configuration template based on the requested format.
///
/// # Errors
///
/// Returns an error if the requested format is not supported.
pub fn get_template(format: &str) -> Result<&'static str, ConfigError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => {
      Err(ConfigError::Template(format!(
        "Unsupported config format: {format}"
      )))
    },
  }
}
