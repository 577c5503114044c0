//! kubectl-save - save Kubernetes resources to one file each
//!
//! Takes the YAML printed by `kubectl get -o yaml` (single resources, `v1/List`
//! documents, lists of lists and the output of the
//! [ketall](https://github.com/corneliusweig/ketall) plugin) and writes every
//! resource it contains to its own file, at a path rendered from a template.
//!
//! # Architecture Overview
//!
//! ```text
//! input text  ──> input::read_documents ──> walker::walk ──> writer::ResourceWriter::save
//!                 (YAML documents)          (resources)       (one file each)
//! ```
//!
//! - [`input`] - input sources and multi-document YAML decoding
//! - [`walker`] - flattening of documents into individual resources
//! - [`writer`] - identity extraction, sanitizing, filename templates, file output
//! - [`pipeline`] - one stream from bytes to files
//! - [`cli`] - command-line interface and logging setup
//! - [`core`] - error types and user-facing error presentation
//! - [`constants`] - defaults shared by the CLI and the library
//!
//! # Default layout
//!
//! With the default template `{{apiVersion}}--{{kind}}/{{namespace}}--{{name}}.yaml`:
//!
//! ```text
//! out/
//! ├── apps_v1--Deployment/
//! │   └── shop--web.yaml
//! └── v1--Service/
//!     └── shop--web.yaml
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use kubectl_save::pipeline::save_stream;
//! use kubectl_save::writer::{ResourceWriter, WriterOptions};
//!
//! # fn main() -> anyhow::Result<()> {
//! let writer = ResourceWriter::new(WriterOptions::new("out"))?;
//! let input = std::io::read_to_string(std::io::stdin())?;
//! let saved = save_stream(&input, &writer)?;
//! eprintln!("saved {saved} resources");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod constants;
pub mod core;
pub mod input;
pub mod pipeline;
pub mod walker;
pub mod writer;

// test_utils is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
