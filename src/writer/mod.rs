//! Writing resources to files at templated paths.
//!
//! A [`ResourceWriter`] owns an output root and a compiled
//! [`FilenameTemplate`]. For every resource it:
//!
//! 1. extracts the [`ResourceIdentity`] (`apiVersion`, `kind`,
//!    `metadata.namespace`, `metadata.name`), defaulting an absent namespace
//!    to `default`
//! 2. [`sanitize`]s each field so it is a single safe path segment
//! 3. renders the template and checks the result stays under the output root
//! 4. creates missing parent directories and writes the resource as YAML
//!
//! Nothing is written unless every earlier step succeeds. An existing file at
//! the destination is overwritten.
//!
//! # Examples
//!
//! ```rust,no_run
//! use kubectl_save::writer::{ResourceWriter, WriterOptions};
//!
//! # fn example() -> Result<(), kubectl_save::core::SaveError> {
//! let writer = ResourceWriter::new(WriterOptions::new("out"))?;
//!
//! let pod: serde_yaml::Mapping =
//!     serde_yaml::from_str("{apiVersion: v1, kind: Pod, metadata: {name: nginx}}").unwrap();
//! let path = writer.save(&pod)?;
//! assert_eq!(path, std::path::Path::new("out/v1--Pod/default--nginx.yaml"));
//! # Ok(())
//! # }
//! ```

pub mod sanitize;
pub mod template;


pub use sanitize::sanitize;
pub use template::FilenameTemplate;

use serde_yaml::{Mapping, Value};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use crate::constants::{DEFAULT_NAMESPACE, DEFAULT_TEMPLATE};
use crate::core::SaveError;

/// Callback invoked with the destination path just before a file is written.
pub type StartFileHook = Box<dyn Fn(&Path)>;

/// The four fields that decide where a resource is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentity {
    pub api_version: String,
    pub kind: String,
    pub namespace: String,
    pub name: String,
}

impl ResourceIdentity {
    /// Extract the identity of `resource`.
    ///
    /// `metadata.namespace` falls back to `default` only when the key is
    /// absent. A namespace that is present but not a string is an error, and
    /// an empty string is kept as-is.
    pub fn from_resource(resource: &Mapping) -> Result<Self, SaveError> {
        let api_version = required_str(resource, "apiVersion")?;
        let kind = required_str(resource, "kind")?;

        let metadata = resource
            .get("metadata")
            .and_then(Value::as_mapping)
            .ok_or_else(|| SaveError::invalid_resource("metadata is missing or not a map"))?;

        let namespace = match metadata.get("namespace") {
            None => DEFAULT_NAMESPACE,
            Some(value) => value
                .as_str()
                .ok_or_else(|| SaveError::invalid_resource("namespace is not a string"))?,
        };
        let name = required_str(metadata, "name")?;

        Ok(Self {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }

    /// Identity used to validate a template before any input is read.
    pub fn sample() -> Self {
        Self {
            api_version: "v1".to_string(),
            kind: "Test".to_string(),
            namespace: "namespace".to_string(),
            name: "name".to_string(),
        }
    }

    /// Copy with every field passed through [`sanitize`].
    pub fn sanitized(&self) -> Self {
        Self {
            api_version: sanitize(&self.api_version),
            kind: sanitize(&self.kind),
            namespace: sanitize(&self.namespace),
            name: sanitize(&self.name),
        }
    }
}

fn required_str<'a>(map: &'a Mapping, key: &str) -> Result<&'a str, SaveError> {
    map.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| SaveError::invalid_resource(format!("{key} is missing or not a string")))
}

/// Construction options for [`ResourceWriter`].
pub struct WriterOptions {
    /// Root directory all rendered paths are joined onto.
    pub output_path: PathBuf,
    /// Filename template source, see [`FilenameTemplate`].
    pub filename_template: String,
    /// Called with each destination path before the file is written.
    pub on_start_file: Option<StartFileHook>,
}

impl WriterOptions {
    /// Options with the default template and no hook.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            filename_template: DEFAULT_TEMPLATE.to_string(),
            on_start_file: None,
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.filename_template = template.into();
        self
    }

    pub fn with_start_file_hook(mut self, hook: impl Fn(&Path) + 'static) -> Self {
        self.on_start_file = Some(Box::new(hook));
        self
    }
}

/// Saves resources to files under an output root.
pub struct ResourceWriter {
    output_path: PathBuf,
    template: FilenameTemplate,
    on_start_file: Option<StartFileHook>,
}

impl std::fmt::Debug for ResourceWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceWriter")
            .field("output_path", &self.output_path)
            .field("template", &self.template.source())
            .field("on_start_file", &self.on_start_file.is_some())
            .finish()
    }
}

impl ResourceWriter {
    /// Compile the template and check it by rendering a sample identity.
    ///
    /// A template that references an unknown placeholder, or that renders to
    /// an empty, absolute or `..` path, is rejected here rather than on the
    /// first resource.
    pub fn new(options: WriterOptions) -> Result<Self, SaveError> {
        let template = FilenameTemplate::compile(&options.filename_template)?;

        let writer = Self {
            output_path: options.output_path,
            template,
            on_start_file: options.on_start_file,
        };
        writer.path_for(&ResourceIdentity::sample())?;

        tracing::debug!(
            output_path = %writer.output_path.display(),
            template = %writer.template.source(),
            "resource writer ready"
        );
        Ok(writer)
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// The path `resource` would be written to. Touches nothing on disk.
    pub fn filename_for(&self, resource: &Mapping) -> Result<PathBuf, SaveError> {
        let identity = ResourceIdentity::from_resource(resource)?;
        self.path_for(&identity)
    }

    fn path_for(&self, identity: &ResourceIdentity) -> Result<PathBuf, SaveError> {
        let rendered = self.template.render(&identity.sanitized())?;
        check_relative(&rendered)?;
        Ok(self.output_path.join(rendered))
    }

    /// Write `resource` as YAML to its templated path and return that path.
    ///
    /// Parent directories are created as needed (mode `0755` on Unix). An
    /// existing file is replaced.
    pub fn save(&self, resource: &Mapping) -> Result<PathBuf, SaveError> {
        let path = self.filename_for(resource)?;

        if let Some(hook) = &self.on_start_file {
            hook(&path);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dirs(parent)?;
        }

        let file = File::create(&path).map_err(|source| SaveError::Io {
            operation: "create file",
            path: path.clone(),
            source,
        })?;
        let mut out = BufWriter::new(file);
        serde_yaml::to_writer(&mut out, resource).map_err(SaveError::YamlSerialize)?;
        out.flush().map_err(|source| SaveError::Io {
            operation: "write file",
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "saved resource");
        Ok(path)
    }
}

/// Reject rendered paths that could land outside the output root.
fn check_relative(rendered: &str) -> Result<(), SaveError> {
    let unsafe_path = |reason: &str| SaveError::UnsafePath {
        path: rendered.to_string(),
        reason: reason.to_string(),
    };

    if rendered.trim().is_empty() {
        return Err(unsafe_path("rendered filename is empty"));
    }

    for component in Path::new(rendered).components() {
        match component {
            Component::ParentDir => return Err(unsafe_path("contains a `..` segment")),
            Component::RootDir | Component::Prefix(_) => return Err(unsafe_path("is an absolute path")),
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}

fn create_dirs(dir: &Path) -> Result<(), SaveError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(crate::constants::DIR_MODE);
    }

    builder.create(dir).map_err(|source| SaveError::Io {
        operation: "create directory",
        path: dir.to_path_buf(),
        source,
    })
}
