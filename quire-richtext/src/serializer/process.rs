//! Loading and processing functions for content documents.
//!
//! Content arrives as JSON, either as a bare node array or wrapped in the
//! object returned by the content API (`{ "content": [...] }`, or deeper, as
//! in `{ "data": { "Guideline": { "content": [...] } } }`).
use std::{
  fs,
  path::{Path, PathBuf},
};

use log::error;
use serde_json::Value;

use super::types::{Overrides, Serializer};
use crate::{
  error::{Error, Result},
  node::ContentNode,
  types::RenderResult,
};

/// Field holding the node array when none is given.
pub const DEFAULT_CONTENT_FIELD: &str = "content";

/// Extract the node sequence from a decoded document.
///
/// `field` is a dot-separated path into nested objects. It is ignored when
/// the document is already an array. A `null` document or field is empty
/// content.
///
/// # Errors
///
/// Returns an error if the field is missing or does not hold an array.
pub fn content_from_value(
  value: &Value,
  field: Option<&str>,
) -> Result<Vec<Option<ContentNode>>> {
  let path = field.unwrap_or(DEFAULT_CONTENT_FIELD);

  let target = match value {
    Value::Array(_) | Value::Null => value,
    _ => {
      path.split('.').try_fold(value, |current, key| {
        current
          .as_object()
          .and_then(|object| object.get(key))
          .ok_or_else(|| Error::MissingField(path.to_string()))
      })?
    },
  };

  match target {
    Value::Null => Ok(Vec::new()),
    Value::Array(items) => {
      Ok(items.iter().map(ContentNode::from_value).collect())
    },
    _ => Err(Error::NotASequence(path.to_string())),
  }
}

/// Decode a JSON content document.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or holds no node array at
/// `field`.
pub fn parse_content(
  json: &str,
  field: Option<&str>,
) -> Result<Vec<Option<ContentNode>>> {
  let value: Value = serde_json::from_str(json)?;
  content_from_value(&value, field)
}

/// Render content with error recovery.
///
/// Rendering does not fail on malformed content, but overrides are caller
/// code. A panic inside one is caught and logged, and an error block is
/// returned in place of the document.
#[must_use]
pub fn process_with_recovery(
  serializer: &Serializer,
  content: &[Option<ContentNode>],
  overrides: Option<&Overrides>,
) -> RenderResult {
  match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    serializer.render_document(content, overrides)
  })) {
    Ok(result) => result,
    Err(panic_err) => {
      if let Some(message) = panic_err.downcast_ref::<String>() {
        error!("Panic while rendering content: {message}");
      } else if let Some(message) = panic_err.downcast_ref::<&str>() {
        error!("Panic while rendering content: {message}");
      } else {
        error!("Unknown panic while rendering content");
      }
      RenderResult {
        html:     "<div class=\"error\">Critical error rendering content</div>"
          .to_string(),
        headings: Vec::new(),
        title:    None,
      }
    },
  }
}

/// Decode and render a JSON content document.
///
/// # Errors
///
/// Returns an error if the document cannot be decoded.
pub fn process_json_str(
  serializer: &Serializer,
  json: &str,
  field: Option<&str>,
  overrides: Option<&Overrides>,
) -> Result<RenderResult> {
  let content = parse_content(json, field)?;
  Ok(process_with_recovery(serializer, &content, overrides))
}

/// Read, decode and render a JSON content file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn process_json_file(
  serializer: &Serializer,
  path: &Path,
  field: Option<&str>,
  overrides: Option<&Overrides>,
) -> Result<RenderResult> {
  let json = fs::read_to_string(path).map_err(|source| {
    Error::Read {
      path: path.to_path_buf(),
      source,
    }
  })?;
  process_json_str(serializer, &json, field, overrides)
}

/// Process a batch of content files with consistent error handling.
///
/// # Arguments
/// * `serializer` - The configured serializer
/// * `files` - Iterator of file paths to process
/// * `read_file_fn` - Function to read file content from path
/// * `field` - Path of the node array inside each document
///
/// # Returns
/// Vector of tuples containing (`file_path`, `processing_result`)
pub fn process_batch<I, F>(
  serializer: &Serializer,
  files: I,
  read_file_fn: F,
  field: Option<&str>,
  overrides: Option<&Overrides>,
) -> Vec<(PathBuf, Result<RenderResult>)>
where
  I: Iterator<Item = PathBuf>,
  F: Fn(&Path) -> std::io::Result<String>,
{
  files
    .map(|path| {
      let result = read_file_fn(&path)
        .map_err(|source| {
          Error::Read {
            path: path.clone(),
            source,
          }
        })
        .and_then(|json| {
          process_json_str(serializer, &json, field, overrides)
        });
      (path, result)
    })
    .collect()
}
