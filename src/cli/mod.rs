//! Command-line interface for kubectl-save.
//!
//! ```text
//! kubectl-save [OPTIONS] [OUTPUT_PATH] [FILE]...
//! ```
//!
//! Reads Kubernetes YAML from the given files (or stdin) and writes every
//! resource to its own file under `OUTPUT_PATH`. Installed on the `PATH`, the
//! binary is also available as `kubectl save`.
//!
//! # Configuration
//!
//! There is no configuration file. Settings come from the command line and
//! the environment:
//!
//! - `KUBECTL_SAVE_TEMPLATE` - default for `--template`
//! - `RUST_LOG` - log filter; overrides `--verbose` and `--quiet`
//!
//! # Output
//!
//! Each written path is printed on stdout unless `--quiet` is given. Logs and
//! errors go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_OUTPUT_PATH, DEFAULT_TEMPLATE, TEMPLATE_ENV};
use crate::input::InputSource;
use crate::pipeline::save_stream;
use crate::writer::{ResourceWriter, WriterOptions};


const STDIN_NOTE: &str = "\
NOTE: kubectl-save is currently reading from stdin.
      Other options include passing a filename, e.g:
          $ kubectl save out/ resources.yaml
      or piping input, e.g:
          $ kubectl get all -o yaml | kubectl save out/
Press Ctrl+C to exit";

/// Resolved runtime configuration, built from [`Cli`] by [`Cli::build_config`].
///
/// Kept separate from the parsed arguments so tests can run the command
/// without going through argument parsing or touching global logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Root directory for rendered paths.
    pub output_path: PathBuf,
    /// Filename template source.
    pub template: String,
    /// Inputs in processing order; never empty.
    pub inputs: Vec<InputSource>,
    /// Suppress progress lines and the stdin note.
    pub quiet: bool,
    /// Default log filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

/// Save Kubernetes resources to one file each.
#[derive(Parser, Debug)]
#[command(
    name = "kubectl-save",
    about = "Save Kubernetes resources to one file each",
    version,
    long_about = "Reads Kubernetes YAML (single resources, v1/List documents and ketall output) \
                  and writes every resource to its own file at a templated path.\n\n\
                  Example:\n  kubectl get all -o yaml | kubectl save backup/"
)]
pub struct Cli {
    /// Directory the rendered filenames are created under.
    #[arg(value_name = "OUTPUT_PATH", default_value = DEFAULT_OUTPUT_PATH)]
    output_path: PathBuf,

    /// Input files; "-" reads stdin. Stdin is used when no input is given.
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Additional input file, may be repeated; "-" reads stdin.
    #[arg(short = 'f', long = "input", value_name = "FILE")]
    inputs: Vec<String>,

    /// Filename template, relative to OUTPUT_PATH.
    ///
    /// Placeholders: {{apiVersion}}, {{kind}}, {{namespace}}, {{name}}. Each value
    /// is sanitized to [A-Za-z0-9.-] (anything else becomes "_") and an absent
    /// namespace becomes "default". The Go form {{.name}} is accepted as well.
    #[arg(short, long, env = TEMPLATE_ENV, default_value = DEFAULT_TEMPLATE)]
    template: String,

    /// Only print errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Resolve the parsed arguments into a [`CliConfig`].
    ///
    /// Positional files come first, then `--input` files, each in the order
    /// given. With neither, stdin is read.
    pub fn build_config(&self) -> CliConfig {
        let mut inputs: Vec<InputSource> =
            self.files.iter().chain(&self.inputs).map(|arg| InputSource::from_arg(arg)).collect();
        if inputs.is_empty() {
            inputs.push(InputSource::Stdin);
        }

        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            output_path: self.output_path.clone(),
            template: self.template.clone(),
            inputs,
            quiet: self.quiet,
            log_level: log_level.to_string(),
        }
    }

    /// Initialise logging and run the command.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        init_logging(&config.log_level);
        execute_with_config(&config)?;
        Ok(())
    }
}

/// Install the global `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this twice is
/// harmless; the second subscriber is ignored.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the command described by `config` and return the number of files written.
///
/// The template is validated before any input is opened. Inputs are processed
/// one after another and the first error stops the run; errors carry the input
/// name (`<stdin>` or the file path) as context.
pub fn execute_with_config(config: &CliConfig) -> Result<usize> {
    let mut options = WriterOptions::new(&config.output_path).with_template(&config.template);
    if !config.quiet {
        options = options.with_start_file_hook(|path| println!("{}", path.display()));
    }
    let writer = ResourceWriter::new(options)?;

    let mut total = 0;
    for source in &config.inputs {
        if !config.quiet && source.is_interactive() {
            eprintln!("{STDIN_NOTE}");
        }

        let _span = tracing::info_span!("input", source = %source).entered();
        let input = source.read().with_context(|| source.to_string())?;
        total += save_stream(&input, &writer).with_context(|| source.to_string())?;
    }

    tracing::debug!(files = total, inputs = config.inputs.len(), output = %writer.output_path().display(), "done");
    Ok(total)
}
