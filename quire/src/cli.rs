use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for quire
#[derive(Parser, Debug)]
#[command(author, version, about = "Quire: rich-text page renderer")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times) Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(
    short = 'c',
    long = "config-file",
    global = true,
    action = clap::ArgAction::Append
  )]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the quire CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new quire configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "quire.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Render a single content document.
  Render {
    /// JSON document holding the content tree.
    input: PathBuf,

    /// Write the HTML here instead of standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dot-separated path of the node array inside the document.
    #[arg(long)]
    field: Option<String>,

    /// Wrap the fragment in a complete page.
    #[arg(short, long)]
    standalone: bool,

    /// Page title, used with `--standalone`. Defaults to the first `h1`.
    #[arg(short = 'T', long)]
    title: Option<String>,
  },

  /// Render every JSON document under a directory into HTML pages.
  Build {
    /// Directory containing JSON content documents.
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Output directory for the generated pages.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of threads to use for parallel processing.
    #[arg(short = 'p', long = "jobs")]
    jobs: Option<usize>,

    /// Dot-separated path of the node array inside each document.
    #[arg(long)]
    field: Option<String>,

    /// Path to a custom page template.
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Site title shown on every page.
    #[arg(short = 'T', long)]
    title: Option<String>,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
