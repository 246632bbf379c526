//! Class-label catalogs for the classifier output layer.
//!
//! Labels are injected at startup from a JSON or YAML file and addressed by
//! model output index. The catalog is validated once at load time so the hot
//! path never sees an empty or duplicated label.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
struct JsonClassesDoc {
    classes: Vec<String>,
}

#[derive(Deserialize)]
struct YamlNamesDoc {
    names: Vec<String>,
}

/// Ordered, index-addressed label list matching the model's output layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCatalog {
    labels: Vec<String>,
}

impl LabelCatalog {
    /// Build a catalog from an in-memory list, rejecting empty or duplicate
    /// entries.
    pub fn from_labels(labels: Vec<String>) -> Result<Self> {
        if labels.is_empty() {
            bail!("label catalog must contain at least one label");
        }
        for (index, label) in labels.iter().enumerate() {
            if label.trim().is_empty() {
                bail!("label at index {index} is empty or blank");
            }
            if labels[..index].contains(label) {
                bail!("duplicate label '{label}' at index {index}");
            }
        }
        Ok(Self { labels })
    }

    /// Parse a JSON catalog: either a bare array or `{ "classes": [...] }`.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        if let Ok(labels) = serde_json::from_str::<Vec<String>>(raw) {
            return Self::from_labels(labels);
        }
        let doc: JsonClassesDoc =
            serde_json::from_str(raw).context("label file is neither a JSON array nor a {\"classes\": [...]} object")?;
        Self::from_labels(doc.classes)
    }

    /// Parse a YAML catalog with a `names:` list (dataset metadata format).
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let doc: YamlNamesDoc =
            serde_yaml::from_str(raw).context("label file has no `names:` list")?;
        Self::from_labels(doc.names)
    }

    /// Load a catalog from disk, dispatching on the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read label file '{}'", path.display()))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        let catalog = match extension.as_str() {
            "json" => Self::from_json_str(&raw),
            "yaml" | "yml" => Self::from_yaml_str(&raw),
            other => bail!(
                "unsupported label file extension '{other}' for '{}' (expected json, yaml, or yml)",
                path.display()
            ),
        };
        catalog.with_context(|| format!("invalid label file '{}'", path.display()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label for a model output index, falling back to a deterministic
    /// placeholder when the model emits more classes than the catalog names.
    pub fn name_for(&self, index: usize) -> String {
        match self.get(index) {
            Some(label) => label.to_string(),
            None => format!("class {index}"),
        }
    }
}
