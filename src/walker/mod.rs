//! Flattening of decoded YAML documents into individual Kubernetes resources.
//!
//! `kubectl get -o yaml` prints either a single resource or a `v1/List` whose
//! `items` are resources. Lists may nest, and the
//! [ketall](https://github.com/corneliusweig/ketall) plugin emits an extra
//! headerless wrapper layer inside the list:
//!
//! ```yaml
//! # kubectl                     # ketall
//! apiVersion: v1                apiVersion: v1
//! kind: List                    kind: List
//! items:                        items:
//! - AAA                         - items:
//! - BBB                           - AAA
//!                                 - BBB
//! ```
//!
//! [`walk`] recovers the flat stream `AAA, BBB` from either shape and hands each
//! resource to a visitor in document order. The walker keeps no state between
//! calls and never accumulates resources.

use serde_yaml::{Mapping, Sequence, Value};
use std::fmt;

use crate::core::SaveError;


/// Observed shape of a YAML value, used in [`SaveError::UnexpectedType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Null,
    Boolean,
    Number,
    String,
    Sequence,
    Mapping,
    Tagged,
}

impl ValueShape {
    /// Shape of `value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Sequence(_) => Self::Sequence,
            Value::Mapping(_) => Self::Mapping,
            Value::Tagged(_) => Self::Tagged,
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::Tagged => "tagged value",
        })
    }
}

/// What a mapping represents, decided from its `apiVersion`, `kind` and `items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceShape<'a> {
    /// Has string `apiVersion` and `kind`, and is not a `v1/List`.
    Standard,
    /// `apiVersion: v1`, `kind: List`. Whether `items` is usable is checked
    /// when the list is walked.
    List,
    /// No string `apiVersion`, no string `kind`, and an `items` sequence,
    /// which is carried along.
    KetallWrapper(&'a Sequence),
    /// None of the above.
    Unrecognized,
}

/// Classify a mapping without visiting anything.
pub fn classify(map: &Mapping) -> ResourceShape<'_> {
    let api_version = string_field(map, "apiVersion");
    let kind = string_field(map, "kind");

    match (api_version, kind) {
        (Some("v1"), Some("List")) => ResourceShape::List,
        (Some(_), Some(_)) => ResourceShape::Standard,
        (None, None) => match sequence_field(map, "items") {
            Some(items) => ResourceShape::KetallWrapper(items),
            None => ResourceShape::Unrecognized,
        },
        _ => ResourceShape::Unrecognized,
    }
}

/// Call `visitor` once for every resource contained in `value`.
///
/// `value` must be a mapping. A `v1/List` is expanded recursively (lists of
/// lists are supported), ketall wrapper items are unwrapped one level, and any
/// other resource is passed to `visitor` unchanged. The first error, from the
/// input or from `visitor`, stops the walk and is returned.
///
/// # Examples
///
/// ```rust
/// use kubectl_save::walker::walk;
///
/// let doc: serde_yaml::Value = serde_yaml::from_str(
///     "apiVersion: v1\nkind: List\nitems:\n- {apiVersion: v1, kind: Pod, metadata: {name: a}}\n",
/// )?;
///
/// let mut names = Vec::new();
/// walk(&doc, |resource| {
///     let name = resource.get("metadata").and_then(|m| m.get("name")).and_then(|n| n.as_str());
///     names.push(name.unwrap_or_default().to_string());
///     Ok(())
/// })?;
/// assert_eq!(names, ["a"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn walk<F>(value: &Value, mut visitor: F) -> Result<(), SaveError>
where
    F: FnMut(&Mapping) -> Result<(), SaveError>,
{
    walk_value(value, &mut visitor)
}

fn walk_value<F>(value: &Value, visitor: &mut F) -> Result<(), SaveError>
where
    F: FnMut(&Mapping) -> Result<(), SaveError>,
{
    let map = expect_mapping(value)?;

    match classify(map) {
        ResourceShape::Standard => visitor(map),
        ResourceShape::List => walk_list(map, visitor),
        // Ketall wrappers only make sense inside a list
        ResourceShape::KetallWrapper(_) | ResourceShape::Unrecognized => Err(SaveError::NotAResource),
    }
}

fn walk_list<F>(list: &Mapping, visitor: &mut F) -> Result<(), SaveError>
where
    F: FnMut(&Mapping) -> Result<(), SaveError>,
{
    let items = sequence_field(list, "items").ok_or(SaveError::NotAListResource)?;
    tracing::debug!(items = items.len(), "walking v1/List");

    for item in items {
        match classify(expect_mapping(item)?) {
            ResourceShape::KetallWrapper(inner) => walk_ketall_items(inner, visitor)?,
            _ => walk_value(item, visitor)?,
        }
    }
    Ok(())
}

/// Inner ketall items are terminal resources; they are not re-walked as lists.
fn walk_ketall_items<F>(items: &Sequence, visitor: &mut F) -> Result<(), SaveError>
where
    F: FnMut(&Mapping) -> Result<(), SaveError>,
{
    tracing::debug!(items = items.len(), "unwrapping ketall item");

    for item in items {
        visitor(expect_mapping(item)?)?;
    }
    Ok(())
}

fn expect_mapping(value: &Value) -> Result<&Mapping, SaveError> {
    value.as_mapping().ok_or_else(|| SaveError::UnexpectedType {
        found: ValueShape::of(value),
    })
}

fn string_field<'a>(map: &'a Mapping, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

fn sequence_field<'a>(map: &'a Mapping, key: &str) -> Option<&'a Sequence> {
    map.get(key).and_then(Value::as_sequence)
}
