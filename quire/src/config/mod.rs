pub mod templates;

use std::{
  collections::BTreeMap,
  fs,
  path::{Path, PathBuf},
};

use quire_richtext::{
  Element,
  HeadingLevel,
  Overrides,
  RenderOptions,
  Theme,
  serializer::DEFAULT_MAX_DEPTH,
};
use serde::{Deserialize, Serialize};

use crate::{cli::Commands, error::ConfigError};

/// Configuration file names looked up in the working directory, in order.
const CONFIG_FILENAMES: &[&str] = &[
  "quire.toml",
  "quire.json",
  ".quire.toml",
  ".quire.json",
  ".config/quire.toml",
  ".config/quire.json",
];

/// A static wrapper installed as a serializer override for one node type.
///
/// ```toml
/// [overrides.callout]
/// tag = "aside"
/// class = "callout"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideConfig {
  /// Element name to render the node as.
  pub tag:   String,
  /// Class attribute for the element.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub class: Option<String>,
}

/// Configuration for the quire renderer.
///
/// Fields are usually loaded from a TOML or JSON file, then adjusted with
/// `--config KEY=VALUE` overrides and command line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Directory containing JSON content documents.
  pub input_dir: Option<PathBuf>,

  /// Output directory for generated pages.
  pub output_dir: PathBuf,

  /// Dot-separated path of the node array inside each document.
  pub content_field: Option<String>,

  /// Site title.
  pub title: String,

  /// Text to be inserted in the footer.
  pub footer_text: String,

  /// Path to a custom page template.
  pub template_path: Option<PathBuf>,

  /// Number of threads to use for parallel processing.
  pub jobs: Option<usize>,

  /// Deepest element nesting that is rendered.
  pub max_depth: usize,

  /// Whether headings get slug anchors.
  pub heading_anchors: bool,

  /// Class names for built-in elements.
  pub theme: Theme,

  /// Wrappers for node types without built-in handling, keyed by type.
  pub overrides: BTreeMap<String, OverrideConfig>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      input_dir:       None,
      output_dir:      PathBuf::from("build"),
      content_field:   None,
      title:           "Quire".to_string(),
      footer_text:     "Rendered with quire".to_string(),
      template_path:   None,
      jobs:            None,
      max_depth:       DEFAULT_MAX_DEPTH,
      heading_anchors: true,
      theme:           Theme::default(),
      overrides:       BTreeMap::new(),
    }
  }
}

impl Config {
  /// Load configuration from a file (TOML or JSON).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {}",
        path.display(),
        e
      ))
    })?;

    let ext = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);

    match ext.as_deref() {
      Some("json") => {
        serde_json::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse JSON config from {}: {}",
            path.display(),
            e
          ))
        })
      },
      Some("toml") => {
        toml::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse TOML config from {}: {}",
            path.display(),
            e
          ))
        })
      },
      Some(_) => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
      None => {
        Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load configuration from the given files, or a discovered one, and apply
  /// `KEY=VALUE` overrides.
  ///
  /// Multiple files are merged in order. With no files given, the working
  /// directory is searched (see [`Config::find_config_file`]); if nothing is
  /// found the defaults are used.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded, an override is malformed,
  /// or the result fails validation.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some((first, rest)) = config_files.split_first() {
      let mut merged = Self::from_file(first)?;
      for config_path in rest {
        merged.merge(Self::from_file(config_path)?);
      }

      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }
      merged
    } else if let Some(discovered) = Self::find_config_file() {
      log::info!("Using discovered config file: {}", discovered.display());
      Self::from_file(&discovered)?
    } else {
      Self::default()
    };

    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }

    config.validate()?;
    Ok(config)
  }

  /// Merge another config into this one, with the other config's values taking
  /// precedence.
  ///
  /// # Merge Rules
  ///
  /// - [`Option<T>`] fields: Other's [`Some`] value replaces this config's
  ///   value
  /// - Plain fields (String, bool, etc.): Other's value always replaces
  /// - `overrides`: Other's entries are merged in (can override individual
  ///   types)
  pub fn merge(&mut self, other: Self) {
    if other.input_dir.is_some() {
      self.input_dir = other.input_dir;
    }
    if other.content_field.is_some() {
      self.content_field = other.content_field;
    }
    if other.template_path.is_some() {
      self.template_path = other.template_path;
    }
    if other.jobs.is_some() {
      self.jobs = other.jobs;
    }

    self.output_dir = other.output_dir;
    self.title = other.title;
    self.footer_text = other.footer_text;
    self.max_depth = other.max_depth;
    self.heading_anchors = other.heading_anchors;
    self.theme = other.theme;
    self.overrides.extend(other.overrides);
  }

  /// Apply configuration overrides from KEY=VALUE strings.
  ///
  /// Nested keys use dots: `theme.link=underline`,
  /// `overrides.callout.tag=aside`.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  ///
  /// - An override string is not in KEY=VALUE format
  /// - A key is not recognized
  /// - A value cannot be parsed as the expected type
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Apply a single override.
  ///
  /// # Errors
  ///
  /// Returns an error if the key is unknown or the value does not parse.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    match key {
      "input_dir" => self.input_dir = optional(value).map(PathBuf::from),
      "output_dir" => self.output_dir = PathBuf::from(value),
      "content_field" => self.content_field = optional(value).map(String::from),
      "title" => self.title = value.to_string(),
      "footer_text" => self.footer_text = value.to_string(),
      "template_path" => {
        self.template_path = optional(value).map(PathBuf::from);
      },
      "jobs" => {
        self.jobs = optional(value)
          .map(|value| parse_usize(key, value))
          .transpose()?;
      },
      "max_depth" => self.max_depth = parse_usize(key, value)?,
      "heading_anchors" => self.heading_anchors = parse_bool(key, value)?,
      _ => {
        if let Some(field) = key.strip_prefix("theme.") {
          return self.apply_theme_override(key, field, value);
        }
        if let Some(rest) = key.strip_prefix("overrides.") {
          return self.apply_wrapper_override(key, rest, value);
        }
        return Err(unknown_key(key));
      },
    }

    Ok(())
  }

  fn apply_theme_override(
    &mut self,
    key: &str,
    field: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    let theme = &mut self.theme;
    let slot = match field {
      "paragraph" => &mut theme.paragraph,
      "link" => &mut theme.link,
      "list_item" => &mut theme.list_item,
      "indent" => &mut theme.indent,
      "upload" => &mut theme.upload,
      "bullet" => &mut theme.bullet,
      _ => {
        let level = field
          .strip_prefix('h')
          .and_then(|level| level.parse::<u8>().ok())
          .and_then(HeadingLevel::from_u8)
          .ok_or_else(|| unknown_key(key))?;
        &mut theme.headings[level.index()]
      },
    };
    *slot = value.to_string();
    Ok(())
  }

  fn apply_wrapper_override(
    &mut self,
    key: &str,
    rest: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    let (node_type, field) =
      rest.rsplit_once('.').ok_or_else(|| unknown_key(key))?;

    match field {
      "tag" => {
        self
          .overrides
          .entry(node_type.to_string())
          .and_modify(|wrapper| wrapper.tag = value.to_string())
          .or_insert_with(|| {
            OverrideConfig {
              tag:   value.to_string(),
              class: None,
            }
          });
      },
      "class" => {
        let wrapper = self.overrides.get_mut(node_type).ok_or_else(|| {
          ConfigError::Config(format!(
            "Cannot set '{key}' before 'overrides.{node_type}.tag'"
          ))
        })?;
        wrapper.class = optional(value).map(String::from);
      },
      _ => return Err(unknown_key(key)),
    }

    Ok(())
  }

  /// Merge command line flags into this config, prioritizing CLI values when
  /// present.
  pub fn merge_with_cli(&mut self, command: &Commands) {
    match command {
      Commands::Build {
        input_dir,
        output_dir,
        jobs,
        field,
        template,
        title,
      } => {
        if let Some(input_dir) = input_dir {
          self.input_dir = Some(input_dir.clone());
        }
        if let Some(output_dir) = output_dir {
          self.output_dir.clone_from(output_dir);
        }
        self.jobs = jobs.or(self.jobs);
        if let Some(field) = field {
          self.content_field = Some(field.clone());
        }
        if let Some(template) = template {
          self.template_path = Some(template.clone());
        }
        if let Some(title) = title {
          self.title.clone_from(title);
        }
      },
      Commands::Render { field, .. } => {
        if let Some(field) = field {
          self.content_field = Some(field.clone());
        }
      },
      Commands::Init { .. } => {},
    }
  }

  /// Check values that cannot be expressed in the types.
  ///
  /// # Errors
  ///
  /// Returns an error listing every invalid value.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if self.max_depth == 0 {
      errors.push("max_depth must be at least 1".to_string());
    }

    if self.jobs == Some(0) {
      errors.push("jobs must be at least 1".to_string());
    }

    for (node_type, wrapper) in &self.overrides {
      if !is_valid_tag(&wrapper.tag) {
        errors.push(format!(
          "Override for '{node_type}' has an invalid tag: '{}'",
          wrapper.tag
        ));
      }
    }

    if let Some(ref template_path) = self.template_path
      && !template_path.is_file()
    {
      errors.push(format!(
        "Template file does not exist: {}",
        template_path.display()
      ));
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(ConfigError::Config(format!(
        "Configuration validation errors:\n{}",
        errors.join("\n")
      )))
    }
  }

  /// Search for config files in common locations
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;

    for filename in CONFIG_FILENAMES {
      let config_path = current_dir.join(filename);
      if config_path.exists() {
        return Some(config_path);
      }
    }

    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
      let xdg_config_dir = PathBuf::from(xdg_config_home);
      for filename in &["quire.toml", "quire.json"] {
        let config_path = xdg_config_dir.join(filename);
        if config_path.exists() {
          return Some(config_path);
        }
      }
    }

    if let Ok(home) = std::env::var("HOME") {
      let home_config_dir = PathBuf::from(home).join(".config").join("quire");
      for filename in &["config.toml", "config.json"] {
        let config_path = home_config_dir.join(filename);
        if config_path.exists() {
          return Some(config_path);
        }
      }
    }

    None
  }

  /// Serializer options described by this config.
  #[must_use]
  pub fn render_options(&self) -> RenderOptions {
    RenderOptions {
      theme:           self.theme.clone(),
      max_depth:       self.max_depth,
      heading_anchors: self.heading_anchors,
    }
  }

  /// Build the override table for the configured wrappers.
  ///
  /// Each wrapper renders its node as `<tag class="...">children</tag>`.
  #[must_use]
  pub fn build_overrides(&self) -> Overrides {
    let mut overrides = Overrides::new();

    for (node_type, wrapper) in &self.overrides {
      let tag = wrapper.tag.clone();
      let class = wrapper.class.clone().unwrap_or_default();
      overrides.insert(node_type.clone(), move |args| {
        Element::new(tag.clone())
          .class(&args.render.escape(&class))
          .children(args.render.render(Some(&args.node.children)))
          .into()
      });
    }

    overrides
  }

  /// Generate a default configuration file with commented explanations
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = templates::get_template(format)?;

    fs::write(path, config_content).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to write default config to {}: {}",
        path.display(),
        e
      ))
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}

fn optional(value: &str) -> Option<&str> {
  (!value.is_empty()).then_some(value)
}

fn unknown_key(key: &str) -> ConfigError {
  ConfigError::Config(format!(
    "Unknown configuration key: '{key}'. See documentation for supported keys."
  ))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "1" => Ok(true),
    "false" | "no" | "0" => Ok(false),
    _ => {
      Err(ConfigError::Config(format!(
        "Invalid boolean value for '{key}': '{value}'. Expected true/false, \
         yes/no, or 1/0"
      )))
    },
  }
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
  value.parse().map_err(|_| {
    ConfigError::Config(format!(
      "Invalid value for '{key}': '{value}'. Expected a positive integer"
    ))
  })
}

/// Element names a wrapper may use: ASCII letters first, then letters,
/// digits or dashes.
fn is_valid_tag(tag: &str) -> bool {
  let mut chars = tag.chars();
  chars.next().is_some_and(|c| c.is_ascii_alphabetic())
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::unwrap_used,
    clippy::field_reassign_with_default,
    reason = "Fine in tests"
  )]

  use quire_richtext::{ContentNode, Serializer};

  use super::*;

  fn apply(config: &mut Config, overrides: &[&str]) -> Result<(), ConfigError> {
    let overrides: Vec<String> =
      overrides.iter().map(ToString::to_string).collect();
    config.apply_overrides(&overrides)
  }

  #[test]
  fn test_config_merge_option_fields() {
    let mut base = Config::default();
    base.input_dir = Some(PathBuf::from("content"));

    let mut other = Config::default();
    other.content_field = Some("data.Page.body".to_string());

    base.merge(other);

    assert_eq!(base.input_dir, Some(PathBuf::from("content")));
    assert_eq!(base.content_field.as_deref(), Some("data.Page.body"));
  }

  #[test]
  fn test_config_merge_overrides_by_type() {
    let wrapper = |tag: &str| {
      OverrideConfig {
        tag:   tag.to_string(),
        class: None,
      }
    };

    let mut base = Config::default();
    base.overrides.insert("callout".to_string(), wrapper("aside"));
    base.overrides.insert("pullquote".to_string(), wrapper("figure"));

    let mut other = Config::default();
    other.overrides.insert("callout".to_string(), wrapper("section"));

    base.merge(other);

    assert_eq!(base.overrides.len(), 2);
    assert_eq!(base.overrides["callout"].tag, "section");
    assert_eq!(base.overrides["pullquote"].tag, "figure");
  }

  #[test]
  fn test_apply_overrides_scalars() {
    let mut config = Config::default();
    apply(&mut config, &[
      "title=Journal of Things",
      "output_dir=/tmp/site",
      "jobs=4",
      "max_depth=32",
      "heading_anchors=no",
    ])
    .unwrap();

    assert_eq!(config.title, "Journal of Things");
    assert_eq!(config.output_dir, PathBuf::from("/tmp/site"));
    assert_eq!(config.jobs, Some(4));
    assert_eq!(config.max_depth, 32);
    assert!(!config.heading_anchors);
  }

  #[test]
  fn test_apply_override_empty_clears_option() {
    let mut config = Config::default();
    config.jobs = Some(2);
    config.input_dir = Some(PathBuf::from("content"));

    apply(&mut config, &["jobs=", "input_dir="]).unwrap();

    assert_eq!(config.jobs, None);
    assert_eq!(config.input_dir, None);
  }

  #[test]
  fn test_apply_overrides_theme() {
    let mut config = Config::default();
    apply(&mut config, &["theme.link=underline", "theme.h3=", "theme.bullet=-"])
      .unwrap();

    assert_eq!(config.theme.link, "underline");
    assert_eq!(config.theme.headings[2], "");
    assert_eq!(config.theme.bullet, "-");

    let err = apply(&mut config, &["theme.h7=x"]).unwrap_err();
    assert!(err.to_string().contains("Unknown configuration key"));
  }

  #[test]
  fn test_apply_overrides_wrappers() {
    let mut config = Config::default();
    apply(&mut config, &[
      "overrides.callout.tag=aside",
      "overrides.callout.class=note",
    ])
    .unwrap();

    assert_eq!(
      config.overrides.get("callout"),
      Some(&OverrideConfig {
        tag:   "aside".to_string(),
        class: Some("note".to_string()),
      })
    );

    let err = apply(&mut config, &["overrides.other.class=x"]).unwrap_err();
    assert!(err.to_string().contains("before 'overrides.other.tag'"));
  }

  #[test]
  fn test_apply_overrides_errors() {
    let mut config = Config::default();

    let err = apply(&mut config, &["no_equals_sign"]).unwrap_err();
    assert!(err.to_string().contains("Expected KEY=VALUE"));

    let err = apply(&mut config, &["unknown_key=value"]).unwrap_err();
    assert!(err.to_string().contains("Unknown configuration key"));

    let err = apply(&mut config, &["heading_anchors=maybe"]).unwrap_err();
    assert!(err.to_string().contains("Invalid boolean"));

    let err = apply(&mut config, &["max_depth=deep"]).unwrap_err();
    assert!(err.to_string().contains("Invalid value"));
  }

  #[test]
  fn test_validate_rejects_bad_values() {
    let mut config = Config::default();
    config.max_depth = 0;
    config.overrides.insert("callout".to_string(), OverrideConfig {
      tag:   "div onclick=x".to_string(),
      class: None,
    });

    let message = config.validate().unwrap_err().to_string();
    assert!(message.contains("max_depth"));
    assert!(message.contains("invalid tag"));
  }

  #[test]
  fn test_is_valid_tag() {
    assert!(is_valid_tag("aside"));
    assert!(is_valid_tag("h2"));
    assert!(is_valid_tag("x-callout"));
    assert!(!is_valid_tag(""));
    assert!(!is_valid_tag("2col"));
    assert!(!is_valid_tag("a href"));
  }

  #[test]
  fn test_merge_with_build_command() {
    let mut config = Config::default();
    config.title = "From file".to_string();
    config.jobs = Some(8);

    config.merge_with_cli(&Commands::Build {
      input_dir:  Some(PathBuf::from("pages")),
      output_dir: None,
      jobs:       None,
      field:      Some("body".to_string()),
      template:   None,
      title:      Some("From flag".to_string()),
    });

    assert_eq!(config.input_dir, Some(PathBuf::from("pages")));
    assert_eq!(config.output_dir, PathBuf::from("build"));
    assert_eq!(config.jobs, Some(8));
    assert_eq!(config.content_field.as_deref(), Some("body"));
    assert_eq!(config.title, "From flag");
  }

  #[test]
  fn test_render_options_follow_config() {
    let mut config = Config::default();
    config.max_depth = 3;
    config.heading_anchors = false;
    config.theme = Theme::plain();

    let options = config.render_options();
    assert_eq!(options.max_depth, 3);
    assert!(!options.heading_anchors);
    assert_eq!(options.theme, Theme::plain());
  }

  #[test]
  fn test_build_overrides_wraps_children() {
    let mut config = Config::default();
    config.overrides.insert("callout".to_string(), OverrideConfig {
      tag:   "aside".to_string(),
      class: Some("note \"x\"".to_string()),
    });

    let overrides = config.build_overrides();
    let content = [Some(ContentNode::element("callout", [
      ContentNode::text("Deadline"),
    ]))];

    let html = Serializer::default().render_html(Some(&content), Some(&overrides));
    assert!(html.starts_with("<aside class=\"note &quot;x&quot;\">"));
    assert!(html.ends_with("Deadline</aside>"));
  }
}
