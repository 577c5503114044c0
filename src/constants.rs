//! Global constants used throughout the kubectl-save codebase.
//!
//! Defaults for the command line live here so the CLI, the writer and the
//! tests agree on a single value.

/// Default filename template, relative to the output path.
///
/// Produces one directory per `apiVersion`/`kind` pair and one file per
/// namespaced name, e.g. `v1--Pod/default--nginx.yaml`.
pub const DEFAULT_TEMPLATE: &str = "{{apiVersion}}--{{kind}}/{{namespace}}--{{name}}.yaml";

/// Namespace substituted when a resource's metadata has no `namespace` key.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Output root used when no output path argument is given.
pub const DEFAULT_OUTPUT_PATH: &str = ".";

/// Input argument that selects standard input.
pub const STDIN_ARG: &str = "-";

/// Display name for standard input in progress and error messages.
pub const STDIN_NAME: &str = "<stdin>";

/// Environment variable overriding the default filename template.
pub const TEMPLATE_ENV: &str = "KUBECTL_SAVE_TEMPLATE";

/// Permission bits for directories created under the output path (Unix only).
pub const DIR_MODE: u32 = 0o755;

/// Placeholder names available to filename templates.
pub const TEMPLATE_PLACEHOLDERS: [&str; 4] = ["apiVersion", "kind", "namespace", "name"];
