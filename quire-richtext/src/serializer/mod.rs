//! Rich-text serialization with a modular organization.
//!
//! # Architecture
//!
//! - [`core`]: `Serializer` entry points and per-node dispatch
//! - [`process`]: JSON loading and processing functions with error recovery
//! - [`types`]: options, theme, override table and render context
pub mod core;
pub mod process;
pub mod types;

pub use core::render;

pub use process::{
  DEFAULT_CONTENT_FIELD,
  content_from_value,
  parse_content,
  process_batch,
  process_json_file,
  process_json_str,
  process_with_recovery,
};
pub use types::{
  DEFAULT_MAX_DEPTH,
  OverrideArgs,
  OverrideFn,
  Overrides,
  RenderContext,
  RenderOptions,
  RenderOptionsBuilder,
  Serializer,
  Theme,
};
