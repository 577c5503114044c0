//! Error handling for kubectl-save
//!
//! This module provides the error type shared by the walker and the writer, and
//! the user-facing presentation used by the binary. The error system follows two
//! rules:
//! 1. **Strongly-typed errors** ([`SaveError`]) so callers and tests can match on
//!    the failure category
//! 2. **User-friendly messages** ([`ErrorContext`]) with a suggestion where the
//!    cause is a common mistake
//!
//! # Error Categories
//!
//! - **Input shape**: [`SaveError::NotAResource`], [`SaveError::NotAListResource`],
//!   [`SaveError::UnexpectedType`]
//! - **Resource identity**: [`SaveError::InvalidResource`]
//! - **Templates and paths**: [`SaveError::InvalidTemplate`], [`SaveError::UnsafePath`]
//! - **YAML**: [`SaveError::YamlDecode`], [`SaveError::YamlSerialize`]
//! - **File system**: [`SaveError::Io`]
//!
//! Every error is fatal. Processing stops at the first one and the binary exits
//! with status 1.
//!
//! # Examples
//!
//! ```rust,no_run
//! use kubectl_save::core::{SaveError, user_friendly_error};
//!
//! let error = anyhow::Error::from(SaveError::NotAListResource).context("<stdin>");
//! let ctx = user_friendly_error(error);
//! ctx.display(); // error: <stdin>: object is not a list resource ...
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::walker::ValueShape;

/// The error type for walking and saving resources
///
/// # Error Categories
///
/// ## Input shape
/// - [`NotAResource`] - a document mapping lacks string `apiVersion`/`kind`
/// - [`NotAListResource`] - a `v1/List` without an `items` sequence
/// - [`UnexpectedType`] - a value that must be a mapping is something else
///
/// ## Saving
/// - [`InvalidResource`] - an identity field is missing or has the wrong type
/// - [`InvalidTemplate`] - the filename template failed to compile or render
/// - [`UnsafePath`] - the rendered path would escape the output directory
/// - [`Io`] - directory creation or file write failed
///
/// [`NotAResource`]: SaveError::NotAResource
/// [`NotAListResource`]: SaveError::NotAListResource
/// [`UnexpectedType`]: SaveError::UnexpectedType
/// [`InvalidResource`]: SaveError::InvalidResource
/// [`InvalidTemplate`]: SaveError::InvalidTemplate
/// [`UnsafePath`]: SaveError::UnsafePath
/// [`Io`]: SaveError::Io
#[derive(Error, Debug)]
pub enum SaveError {
    /// A document is a mapping but has no string `apiVersion` or `kind`
    #[error("object is not a resource (missing apiVersion or kind)")]
    NotAResource,

    /// A `v1/List` document whose `items` is missing or not a sequence
    #[error("object is not a list resource (v1/List without an items sequence)")]
    NotAListResource,

    /// A value expected to be a mapping has another shape
    #[error("unexpected type: expected a mapping, found {found}")]
    UnexpectedType {
        /// The shape that was actually observed
        found: ValueShape,
    },

    /// An identity field needed to compute the destination path is missing or
    /// has the wrong type
    #[error("invalid resource: {reason}")]
    InvalidResource {
        /// Which field is wrong, e.g. "name is missing or not a string"
        reason: String,
    },

    /// The filename template failed to compile or render
    #[error("invalid filename template: {message}")]
    InvalidTemplate {
        /// Cleaned-up message from the template engine
        message: String,
    },

    /// A rendered filename that is empty, absolute, or climbs out of the
    /// output directory
    #[error("unsafe output path '{path}': {reason}")]
    UnsafePath {
        /// The rendered relative path
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// A document in the input stream is not valid YAML
    #[error("failed to decode YAML document {document}")]
    YamlDecode {
        /// 1-based index of the document in its stream
        document: usize,
        /// Decoder error
        #[source]
        source: serde_yaml::Error,
    },

    /// A resource could not be serialized back to YAML
    #[error("failed to serialize resource")]
    YamlSerialize(#[source] serde_yaml::Error),

    /// File system failure while writing a resource
    #[error("failed to {operation} {}", path.display())]
    Io {
        /// What was being attempted ("create directory", "write file", ...)
        operation: &'static str,
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying error, surfaced verbatim
        #[source]
        source: std::io::Error,
    },
}

impl SaveError {
    /// Shorthand for [`SaveError::InvalidResource`]
    pub fn invalid_resource(reason: impl Into<String>) -> Self {
        Self::InvalidResource {
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors that usually mean the input was not YAML at all,
    /// e.g. `kubectl get` output without `-o yaml`.
    pub fn suggests_non_yaml_input(&self) -> bool {
        matches!(
            self,
            Self::YamlDecode { .. }
                | Self::UnexpectedType {
                    found: ValueShape::String | ValueShape::Number | ValueShape::Boolean,
                }
        )
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show:
/// 1. **error**: the full message chain in red
/// 2. **details**: additional context in yellow (optional)
/// 3. **suggestion**: actionable steps in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The error message, including any outer context such as the input name
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`]
///
/// The message keeps the whole context chain on one line (`<stdin>: object is
/// not a resource ...`). Known [`SaveError`] categories gain a suggestion.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let message = format!("{error:#}");

    if let Some(save_error) = error.downcast_ref::<SaveError>() {
        return create_error_context(save_error, message);
    }

    if let Some(clap_error) = error.downcast_ref::<clap::Error>() {
        return clap_error_context(clap_error);
    }

    ErrorContext::new(message)
}

/// Split clap's rendered error into the one-line message and the usage block
fn clap_error_context(error: &clap::Error) -> ErrorContext {
    let rendered = error.to_string();
    let rendered = rendered.trim();
    let rendered = rendered.strip_prefix("error: ").unwrap_or(rendered);

    match rendered.split_once("\n\n") {
        Some((message, rest)) => ErrorContext::new(message.trim_end()).with_details(rest.trim()),
        None => ErrorContext::new(rendered),
    }
}

/// Attach the suggestion and details that fit a specific [`SaveError`]
fn create_error_context(error: &SaveError, message: String) -> ErrorContext {
    let ctx = ErrorContext::new(message);

    if error.suggests_non_yaml_input() {
        return ctx
            .with_suggestion("Is your input in YAML format? `kubectl get` can output YAML with the `-o yaml` option")
            .with_details("Every input document must be a YAML mapping describing a Kubernetes resource or a v1/List");
    }

    match error {
        SaveError::NotAResource => ctx
            .with_details("Each document needs string `apiVersion` and `kind` fields")
            .with_suggestion("Check that the input is Kubernetes resource YAML, e.g. from `kubectl get <kind> -o yaml`"),

        SaveError::NotAListResource => ctx
            .with_details("A document with `apiVersion: v1` and `kind: List` must have an `items` sequence"),

        SaveError::InvalidResource { .. } => ctx
            .with_details("Resources need string `apiVersion`, `kind` and `metadata.name` fields; `metadata.namespace` is optional"),

        SaveError::InvalidTemplate { .. } => ctx
            .with_suggestion("Templates may use {{apiVersion}}, {{kind}}, {{namespace}} and {{name}}")
            .with_details("The template is checked before any input is read"),

        SaveError::UnsafePath { .. } => ctx
            .with_details("Rendered filenames must stay inside the output path")
            .with_suggestion("Remove `..` segments and leading `/` from the template"),

        SaveError::Io { source, .. } => match source.kind() {
            std::io::ErrorKind::PermissionDenied => ctx
                .with_suggestion("Check the permissions of the output path or choose another one"),
            std::io::ErrorKind::NotADirectory | std::io::ErrorKind::AlreadyExists => ctx
                .with_suggestion("A file is in the way of a directory the template needs; remove it or change the template"),
            _ => ctx,
        },

        _ => ctx,
    }
}
