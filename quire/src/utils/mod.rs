pub mod output;

use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use quire_richtext::{
  Overrides,
  RenderResult,
  Serializer,
  serializer::process_json_file,
};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::{config::Config, html::template::PageTemplate};

/// A page written by [`build_site`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPage {
  /// Path of the HTML file relative to the output directory.
  pub rel_path: PathBuf,
  /// Title taken from the document's first `h1`.
  pub title:    Option<String>,
}

/// Outcome of a directory build.
#[derive(Debug, Default)]
pub struct BuildSummary {
  pub pages:  Vec<BuiltPage>,
  /// Documents that could not be rendered, with the reason.
  pub failed: Vec<(PathBuf, String)>,
}

/// Serializer and overrides described by a config.
#[must_use]
pub fn create_serializer(config: &Config) -> (Serializer, Overrides) {
  (
    Serializer::new(config.render_options()),
    config.build_overrides(),
  )
}

/// Collect every `.json` file below `input_dir`, sorted by path.
#[must_use]
pub fn collect_content_files(input_dir: &Path) -> Vec<PathBuf> {
  let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
    .follow_links(true)
    .into_iter()
    .filter_map(|entry| entry.ok())
    .filter(|entry| {
      entry.file_type().is_file()
        && entry.path().extension().is_some_and(|ext| ext == "json")
    })
    .map(walkdir::DirEntry::into_path)
    .collect();

  files.sort();
  debug!("Found {} content files to process", files.len());
  files
}

/// Render one content document.
///
/// With `template`, the fragment is wrapped in a full page; `rel_path` is the
/// page's location below the output root.
///
/// # Errors
///
/// Returns an error if the document cannot be read or decoded, or if the
/// page template fails.
pub fn render_content_file(
  config: &Config,
  serializer: &Serializer,
  overrides: &Overrides,
  input: &Path,
  page: Option<(&PageTemplate, &Path)>,
  title: Option<&str>,
) -> Result<(String, RenderResult)> {
  let document = process_json_file(
    serializer,
    input,
    config.content_field.as_deref(),
    Some(overrides),
  )
  .wrap_err_with(|| format!("Failed to render {}", input.display()))?;

  let html = match page {
    Some((template, rel_path)) => {
      template
        .render(config, &document, title, rel_path)
        .wrap_err_with(|| {
          format!("Failed to apply page template to {}", input.display())
        })?
    },
    None => document.html.clone(),
  };

  Ok((html, document))
}

/// Render every document below the configured input directory into the
/// output directory, mirroring the directory layout.
///
/// Documents are rendered in parallel. A document that fails is logged and
/// reported in the summary; the others are still written.
///
/// # Errors
///
/// Returns an error if the input directory is missing, the template cannot
/// be loaded, or the output directory cannot be created.
pub fn build_site(config: &Config) -> Result<BuildSummary> {
  let Some(input_dir) = config.input_dir.as_deref() else {
    bail!("No input directory configured. Use --input-dir or set input_dir.");
  };
  if !input_dir.is_dir() {
    bail!("Input directory does not exist: {}", input_dir.display());
  }

  info!("Input directory: {}", input_dir.display());
  fs::create_dir_all(&config.output_dir).wrap_err_with(|| {
    format!(
      "Failed to create output directory: {}",
      config.output_dir.display()
    )
  })?;

  let files = collect_content_files(input_dir);
  info!("Found {} content files", files.len());

  let template = PageTemplate::load(config)?;
  let (serializer, overrides) = create_serializer(config);

  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(config.jobs.unwrap_or_else(num_cpus::get))
    .build()
    .wrap_err("Failed to create thread pool")?;

  let progress =
    ProgressBar::new(u64::try_from(files.len()).unwrap_or(u64::MAX));
  progress.set_style(
    ProgressStyle::with_template(
      "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {wide_msg}",
    )?
    .progress_chars("=> "),
  );

  let results: Vec<(PathBuf, Result<BuiltPage>)> = pool.install(|| {
    files
      .par_iter()
      .map(|file| {
        let result = build_page(
          config,
          &serializer,
          &overrides,
          &template,
          input_dir,
          file,
        );
        progress.set_message(file.display().to_string());
        progress.inc(1);
        (file.clone(), result)
      })
      .collect()
  });
  progress.finish_and_clear();

  let mut summary = BuildSummary::default();
  for (file, result) in results {
    match result {
      Ok(page) => summary.pages.push(page),
      Err(e) => {
        error!("{e:?}");
        summary.failed.push((file, format!("{e:#}")));
      },
    }
  }

  output::ensure_index(config, &template, &summary.pages)?;

  info!(
    "Rendered {} page(s) into {}",
    summary.pages.len(),
    config.output_dir.display()
  );
  Ok(summary)
}

fn build_page(
  config: &Config,
  serializer: &Serializer,
  overrides: &Overrides,
  template: &PageTemplate,
  input_dir: &Path,
  file: &Path,
) -> Result<BuiltPage> {
  let rel_path = file
    .strip_prefix(input_dir)
    .unwrap_or(file)
    .with_extension("html");

  let (html, document) = render_content_file(
    config,
    serializer,
    overrides,
    file,
    Some((template, &rel_path)),
    None,
  )?;

  let output_path = config.output_dir.join(&rel_path);
  output::write_page(&output_path, &html)?;
  debug!("Wrote {}", output_path.display());

  Ok(BuiltPage {
    rel_path,
    title: document.title,
  })
}
