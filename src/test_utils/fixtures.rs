//! Test fixtures for building Kubernetes resource YAML
//!
//! Builders produce resources, `v1/List` documents and ketall-style wrapped
//! lists, and know where the default template will put each resource.

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Sequence, Value};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::constants::DEFAULT_NAMESPACE;
use crate::writer::sanitize;

/// A minimal Kubernetes resource
#[derive(Clone, Debug)]
pub struct ResourceFixture {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub namespace: Option<String>,
}

impl ResourceFixture {
    pub fn new(api_version: &str, kind: &str, name: &str) -> Self {
        Self {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
            name: name.to_string(),
            namespace: None,
        }
    }

    /// A `v1/Pod` without a namespace
    pub fn pod(name: &str) -> Self {
        Self::new("v1", "Pod", name)
    }

    pub fn in_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    pub fn to_mapping(&self) -> Mapping {
        let mut metadata = Mapping::new();
        metadata.insert("name".into(), self.name.as_str().into());
        if let Some(namespace) = &self.namespace {
            metadata.insert("namespace".into(), namespace.as_str().into());
        }

        let mut resource = Mapping::new();
        resource.insert("apiVersion".into(), self.api_version.as_str().into());
        resource.insert("kind".into(), self.kind.as_str().into());
        resource.insert("metadata".into(), Value::Mapping(metadata));
        resource
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.to_mapping()).context("Failed to serialize resource fixture")
    }

    /// Path relative to the output root under the default template
    pub fn expected_path(&self) -> PathBuf {
        let namespace = self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE);
        PathBuf::from(format!("{}--{}", sanitize(&self.api_version), sanitize(&self.kind)))
            .join(format!("{}--{}.yaml", sanitize(namespace), sanitize(&self.name)))
    }
}

/// A `v1/List` holding `items`
pub fn list_yaml(items: &[ResourceFixture]) -> Result<String> {
    let items = items.iter().map(|item| Value::Mapping(item.to_mapping())).collect();
    serde_yaml::to_string(&list(items)).context("Failed to serialize list fixture")
}

/// A `v1/List` whose items are ketall wrappers, one per group
pub fn ketall_yaml(groups: &[Vec<ResourceFixture>]) -> Result<String> {
    let wrappers = groups
        .iter()
        .map(|group| {
            let inner: Sequence = group.iter().map(|item| Value::Mapping(item.to_mapping())).collect();
            let mut wrapper = Mapping::new();
            wrapper.insert("items".into(), Value::Sequence(inner));
            Value::Mapping(wrapper)
        })
        .collect();
    serde_yaml::to_string(&list(wrappers)).context("Failed to serialize ketall fixture")
}

fn list(items: Sequence) -> Value {
    let mut list = Mapping::new();
    list.insert("apiVersion".into(), "v1".into());
    list.insert("kind".into(), "List".into());
    list.insert("items".into(), Value::Sequence(items));
    Value::Mapping(list)
}

/// All files under `root`, relative to it, sorted
pub fn relative_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.path().strip_prefix(root)?.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
