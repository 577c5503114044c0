//! Filename templates.
//!
//! Templates are rendered with [Tera](https://keats.github.io/tera/) against a
//! context holding exactly four variables: `apiVersion`, `kind`, `namespace`
//! and `name`. Referencing any other variable is an error, so a typo in a
//! template fails loudly instead of producing an empty path segment.
//!
//! Templates written for the Go `text/template` syntax (`{{.kind}}`) are
//! accepted too; the leading dot is dropped before compiling.

use regex::Regex;
use tera::{Context as TeraContext, Tera};

use crate::constants::TEMPLATE_PLACEHOLDERS;
use crate::core::SaveError;

use super::ResourceIdentity;

/// Name the template is registered under inside its Tera instance.
const TEMPLATE_NAME: &str = "filename";

/// A compiled filename template.
#[derive(Debug, Clone)]
pub struct FilenameTemplate {
    source: String,
    tera: Tera,
}

impl FilenameTemplate {
    /// Parse `source` into a reusable template.
    ///
    /// Only syntax is checked here. Unknown placeholders surface on the first
    /// render, which [`ResourceWriter::new`](super::ResourceWriter::new) performs
    /// with a sample resource before any input is read.
    pub fn compile(source: &str) -> Result<Self, SaveError> {
        let normalized = normalize_go_syntax(source);

        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, &normalized).map_err(|e| SaveError::InvalidTemplate {
            message: format_tera_error(&e),
        })?;

        tracing::debug!(template = %source, "compiled filename template");
        Ok(Self {
            source: source.to_string(),
            tera,
        })
    }

    /// The template text as given by the user.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render the template for one resource.
    ///
    /// `identity` is used as-is; callers sanitize it first.
    pub fn render(&self, identity: &ResourceIdentity) -> Result<String, SaveError> {
        let mut context = TeraContext::new();
        context.insert("apiVersion", &identity.api_version);
        context.insert("kind", &identity.kind);
        context.insert("namespace", &identity.namespace);
        context.insert("name", &identity.name);

        self.tera.render(TEMPLATE_NAME, &context).map_err(|e| {
            let mut message = format_tera_error(&e);
            if let Some(hint) = suggest_placeholder(&message) {
                message.push_str(&format!(" ({hint})"));
            }
            SaveError::InvalidTemplate {
                message,
            }
        })
    }
}

/// Rewrite `{{.field}}` and `{{- .field}}` to `{{field}}`.
fn normalize_go_syntax(source: &str) -> String {
    if let Ok(re) = Regex::new(r"\{\{(-?\s*)\.([A-Za-z_][A-Za-z0-9_]*)") {
        return re.replace_all(source, "{{${1}${2}").into_owned();
    }
    source.to_string()
}

/// Collapse a Tera error chain into one line without internal template names.
fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }

    let cleaned: Vec<String> = messages
        .iter()
        .map(|msg| {
            msg.replace(&format!(" while rendering '{TEMPLATE_NAME}'"), "")
                .replace(&format!("Failed to render '{TEMPLATE_NAME}'"), "")
                .replace(&format!("Failed to parse '{TEMPLATE_NAME}'"), "")
                .trim()
                .to_string()
        })
        .filter(|msg| !msg.is_empty())
        .collect();

    if cleaned.is_empty() {
        "template rendering failed".to_string()
    } else {
        cleaned.join(": ")
    }
}

/// Suggest the closest known placeholder for an undefined-variable message.
fn suggest_placeholder(message: &str) -> Option<String> {
    let re = Regex::new(r"Variable `([^`]+)` not found").ok()?;
    let unknown = re.captures(message)?.get(1)?.as_str();

    let (closest, distance) = TEMPLATE_PLACEHOLDERS
        .iter()
        .map(|candidate| (*candidate, strsim::levenshtein(unknown, candidate)))
        .min_by_key(|(_, distance)| *distance)?;

    // Only suggest when at least half the characters already match
    if distance * 2 <= unknown.len().max(closest.len()) {
        Some(format!("did you mean `{closest}`?"))
    } else {
        Some(format!("available placeholders: {}", TEMPLATE_PLACEHOLDERS.join(", ")))
    }
}
