//! Component descriptor types and structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{Result, WrikkaError};

/// Category a component belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentCategory {
    /// Authentication surfaces (login forms, session widgets)
    Auth,
    /// Data display (tables, lists, badges)
    Data,
    /// Form inputs and controls
    Form,
    /// Page and section layout
    Layout,
    /// Navigation (navbars, sidebars, breadcrumbs)
    Navigation,
    /// User feedback (alerts, toasts, progress)
    Feedback,
    /// Overlays (modals, popovers, drawers)
    Overlay,
    /// Media (images, video, avatars)
    Media,
    /// Charts and visualization
    Chart,
    /// Developer tooling components
    Developer,
    /// General utilities
    Utility,
    /// Anything that fits nowhere else
    Other,
}

impl ComponentCategory {
    /// All categories, in display order
    pub fn all() -> &'static [ComponentCategory] {
        &[
            ComponentCategory::Auth,
            ComponentCategory::Data,
            ComponentCategory::Form,
            ComponentCategory::Layout,
            ComponentCategory::Navigation,
            ComponentCategory::Feedback,
            ComponentCategory::Overlay,
            ComponentCategory::Media,
            ComponentCategory::Chart,
            ComponentCategory::Developer,
            ComponentCategory::Utility,
            ComponentCategory::Other,
        ]
    }

    /// Lowercase name used in manifests and CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentCategory::Auth => "auth",
            ComponentCategory::Data => "data",
            ComponentCategory::Form => "form",
            ComponentCategory::Layout => "layout",
            ComponentCategory::Navigation => "navigation",
            ComponentCategory::Feedback => "feedback",
            ComponentCategory::Overlay => "overlay",
            ComponentCategory::Media => "media",
            ComponentCategory::Chart => "chart",
            ComponentCategory::Developer => "developer",
            ComponentCategory::Utility => "utility",
            ComponentCategory::Other => "other",
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComponentCategory {
    type Err = WrikkaError;

    fn from_str(raw: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|category| category.as_str() == raw)
            .ok_or_else(|| WrikkaError::InvalidParam {
                name: "category".to_string(),
                reason: format!("unknown category '{raw}'"),
            })
    }
}

/// Maturity status of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Stable,
    Beta,
    Alpha,
    Deprecated,
    Experimental,
}

impl ComponentStatus {
    /// All statuses, in display order
    pub fn all() -> &'static [ComponentStatus] {
        &[
            ComponentStatus::Stable,
            ComponentStatus::Beta,
            ComponentStatus::Alpha,
            ComponentStatus::Deprecated,
            ComponentStatus::Experimental,
        ]
    }

    /// Lowercase name used in manifests and CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentStatus::Stable => "stable",
            ComponentStatus::Beta => "beta",
            ComponentStatus::Alpha => "alpha",
            ComponentStatus::Deprecated => "deprecated",
            ComponentStatus::Experimental => "experimental",
        }
    }
}

impl fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComponentStatus {
    type Err = WrikkaError;

    fn from_str(raw: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == raw)
            .ok_or_else(|| WrikkaError::InvalidParam {
                name: "status".to_string(),
                reason: format!("unknown status '{raw}'"),
            })
    }
}

/// A usage snippet attached to a descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentExample {
    /// Short title shown above the snippet
    pub title: String,
    /// Optional longer explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The snippet itself
    pub code: String,
    /// Snippet language; manifests usually omit it
    #[serde(default = "default_example_language")]
    pub language: String,
    /// Target framework tag, when the snippet is framework-specific
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
}

fn default_example_language() -> String {
    "vue".to_string()
}

impl ComponentExample {
    /// Create a title + code example with the default language
    pub fn new(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            code: code.into(),
            language: default_example_language(),
            framework: None,
        }
    }
}

/// Metadata record describing one UI component
///
/// `id` is the stable identity; everything else is descriptive. `related`
/// holds unenforced references to other descriptor ids — dangling ids are
/// tolerated and filtered when read, not rejected when written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    /// Unique id (e.g. "base-button")
    pub id: String,
    /// Display name (e.g. "Button")
    pub name: String,
    /// One-paragraph description
    pub description: String,
    /// Category for grouping
    pub category: ComponentCategory,
    /// Maturity status
    pub status: ComponentStatus,
    /// Free-form tags, insertion order preserved for display
    #[serde(default)]
    pub tags: Vec<String>,
    /// Usage snippets
    #[serde(default)]
    pub examples: Vec<ComponentExample>,
    /// Ids of related descriptors
    #[serde(default)]
    pub related: Vec<String>,
}

impl ComponentDescriptor {
    /// Create a descriptor with empty tags, examples, and relations
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: ComponentCategory,
        status: ComponentStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category,
            status,
            tags: Vec::new(),
            examples: Vec::new(),
            related: Vec::new(),
        }
    }

    /// Set the tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the examples
    pub fn with_examples(mut self, examples: Vec<ComponentExample>) -> Self {
        self.examples = examples;
        self
    }

    /// Set the related descriptor ids
    pub fn with_related(mut self, related: Vec<String>) -> Self {
        self.related = related;
        self
    }
}

/// Load a descriptor manifest (a JSON array of descriptors) from disk.
///
/// This is the startup-time descriptor source: the host registers the whole
/// list into a registry in one pass.
pub fn load_descriptors(path: impl AsRef<Path>) -> Result<Vec<ComponentDescriptor>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let descriptors: Vec<ComponentDescriptor> =
        serde_json::from_str(&content).map_err(|e| WrikkaError::InvalidManifest {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_roundtrip() {
        let descriptor = ComponentDescriptor::new(
            "base-button",
            "Button",
            "A versatile button component",
            ComponentCategory::Form,
            ComponentStatus::Stable,
        )
        .with_tags(vec!["button".to_string(), "interactive".to_string()])
        .with_examples(vec![ComponentExample::new(
            "Primary Button",
            "<WButton variant=\"primary\">Click me</WButton>",
        )])
        .with_related(vec!["base-icon-button".to_string()]);

        let json = serde_json::to_string(&descriptor).unwrap();
        let back: ComponentDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, descriptor);
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&ComponentCategory::Navigation).unwrap();
        assert_eq!(json, "\"navigation\"");
        let json = serde_json::to_string(&ComponentStatus::Deprecated).unwrap();
        assert_eq!(json, "\"deprecated\"");
    }

    #[test]
    fn test_example_language_defaults() {
        let json = r#"{"title": "Basic", "code": "<WCard />"}"#;
        let example: ComponentExample = serde_json::from_str(json).unwrap();
        assert_eq!(example.language, "vue");
        assert!(example.description.is_none());
    }

    #[test]
    fn test_load_descriptors_rejects_bad_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("components.json");
        std::fs::write(&path, "{\"not\": \"an array\"}").unwrap();

        let err = load_descriptors(&path).unwrap_err();
        assert!(matches!(err, WrikkaError::InvalidManifest { .. }));
    }
}
