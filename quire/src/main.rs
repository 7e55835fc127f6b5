use std::{
  fs,
  io::{self, Write},
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};
use quire::{
  cli::{Cli, Commands},
  config::Config,
  html::template::PageTemplate,
  utils,
};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .parse_default_env()
    .init();

  if let Commands::Init {
    output,
    format,
    force,
  } = &cli.command
  {
    return init_config(output, format, *force);
  }

  let mut config = Config::load(&cli.config_files, &cli.config_overrides)
    .wrap_err("Failed to load configuration")?;
  config.merge_with_cli(&cli.command);
  config.validate()?;

  match &cli.command {
    Commands::Render {
      input,
      output,
      standalone,
      title,
      ..
    } => {
      render_single(
        &config,
        input,
        output.as_deref(),
        *standalone,
        title.as_deref(),
      )
    },
    Commands::Build { .. } => {
      let summary = utils::build_site(&config)?;
      if !summary.failed.is_empty() {
        bail!(
          "{} of {} document(s) failed to render",
          summary.failed.len(),
          summary.failed.len() + summary.pages.len()
        );
      }
      Ok(())
    },
    Commands::Init { .. } => Ok(()),
  }
}

fn init_config(output: &Path, format: &str, force: bool) -> Result<()> {
  // Check if file already exists and that we're not forcing overwrite
  if output.exists() && !force {
    bail!(
      "Configuration file already exists: {}. Use --force to overwrite.",
      output.display()
    );
  }

  if let Some(parent) = output.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create directory: {}", parent.display())
    })?;
    info!("Created directory: {}", parent.display());
  }

  Config::generate_default_config(format, output).wrap_err_with(|| {
    format!("Failed to generate configuration file: {}", output.display())
  })?;

  info!(
    "Configuration file created successfully. Edit it to customize your \
     pages."
  );
  Ok(())
}

fn render_single(
  config: &Config,
  input: &Path,
  output: Option<&Path>,
  standalone: bool,
  title: Option<&str>,
) -> Result<()> {
  let (serializer, overrides) = utils::create_serializer(config);

  let template = if standalone {
    Some(PageTemplate::load(config)?)
  } else {
    None
  };
  let rel_path = output
    .and_then(Path::file_name)
    .map_or_else(|| PathBuf::from("index.html"), PathBuf::from);

  let (html, _) = utils::render_content_file(
    config,
    &serializer,
    &overrides,
    input,
    template.as_ref().map(|template| (template, rel_path.as_path())),
    title,
  )?;

  match output {
    Some(path) => {
      utils::output::write_page(path, &html)?;
      info!("Wrote {}", path.display());
    },
    None => {
      let mut stdout = io::stdout().lock();
      stdout.write_all(html.as_bytes())?;
      stdout.write_all(b"\n")?;
    },
  }

  Ok(())
}
