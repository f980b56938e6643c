//! Configuration management for the wrikka engine
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (wrikka.toml)
//! - Environment variables (WRIKKA_*)
//!
//! ## Example config file (wrikka.toml):
//! ```toml
//! [registry]
//! manifest = "./config/components.json"
//!
//! [content]
//! dir = "./content"
//! default_type = "docs"
//! extension = "md"
//!
//! [content.types]
//! docs = "docs"
//! blog = "blog"
//!
//! [blog_index]
//! enabled = true
//! content_type = "blog"
//! sort_field = "date"
//! sort_direction = "desc"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::content::SortDirection;

/// Main configuration for the wrikka engine
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WrikkaConfig {
    /// Registry settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Content store settings
    #[serde(default)]
    pub content: ContentConfig,

    /// Blog index aggregation settings
    #[serde(default)]
    pub blog_index: BlogIndexConfig,
}

/// Registry configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegistryConfig {
    /// Descriptor manifest registered at startup
    #[serde(default)]
    pub manifest: Option<PathBuf>,
}

/// Content store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Root directory of the content store
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,

    /// Content type used when a request names none
    #[serde(default = "default_content_type")]
    pub default_type: String,

    /// Document file extension (without the dot)
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Content type → sub-directory mapping; unmapped types pass through
    /// as their own directory name
    #[serde(default = "default_content_types")]
    pub types: HashMap<String, String>,
}

/// Blog index aggregation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogIndexConfig {
    /// Whether requesting the blog index aggregates its sibling posts
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// The content type whose index aggregates
    #[serde(default = "default_blog_type")]
    pub content_type: String,

    /// Front-matter field the post list is sorted by
    #[serde(default = "default_sort_field")]
    pub sort_field: String,

    /// Post list sort direction
    #[serde(default)]
    pub sort_direction: SortDirection,
}

// Default value functions
fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_content_type() -> String {
    "docs".to_string()
}

fn default_extension() -> String {
    "md".to_string()
}

fn default_content_types() -> HashMap<String, String> {
    HashMap::from([
        ("docs".to_string(), "docs".to_string()),
        ("blog".to_string(), "blog".to_string()),
    ])
}

fn default_true() -> bool {
    true
}

fn default_blog_type() -> String {
    "blog".to_string()
}

fn default_sort_field() -> String {
    "date".to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            default_type: default_content_type(),
            extension: default_extension(),
            types: default_content_types(),
        }
    }
}

impl Default for BlogIndexConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            content_type: default_blog_type(),
            sort_field: default_sort_field(),
            sort_direction: SortDirection::Desc,
        }
    }
}

impl WrikkaConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = ["wrikka.toml", ".wrikka.toml", "config/wrikka.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "wrikka", "wrikka") {
            let xdg_config = config_dir.config_dir().join("wrikka.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (WRIKKA_*)
        builder = builder.add_source(
            Environment::with_prefix("WRIKKA")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Get the content root directory (resolves relative paths)
    pub fn content_dir(&self) -> PathBuf {
        if self.content.dir.is_absolute() {
            self.content.dir.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.content.dir)
        }
    }

    /// Get the descriptor manifest path (resolves relative paths)
    pub fn manifest_path(&self) -> Option<PathBuf> {
        self.registry.manifest.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                std::env::current_dir().unwrap_or_default().join(p)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WrikkaConfig::default();
        assert_eq!(config.content.default_type, "docs");
        assert_eq!(config.content.extension, "md");
        assert_eq!(config.content.types.len(), 2);
        assert!(config.blog_index.enabled);
        assert_eq!(config.blog_index.sort_field, "date");
        assert_eq!(config.blog_index.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn test_serialize_config() {
        let config = WrikkaConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[content]"));
        assert!(toml_str.contains("[blog_index]"));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: WrikkaConfig = toml::from_str(
            r#"
            [content]
            dir = "site/content"

            [blog_index]
            sort_direction = "asc"
            "#,
        )
        .unwrap();
        assert_eq!(config.content.dir, PathBuf::from("site/content"));
        // Omitted fields fall back to defaults
        assert_eq!(config.content.default_type, "docs");
        assert_eq!(config.blog_index.sort_direction, SortDirection::Asc);
        assert!(config.blog_index.enabled);
    }
}
