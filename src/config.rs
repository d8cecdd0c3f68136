//! Locator configuration: which base names index a directory and which extensions mark a
//! template.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name searched for by [`LocatorConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "page-locator.json";

/// Naming conventions used when resolving URLs to templates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocatorConfig {
    /// Base names tried, in order, when a URL refers to a directory.
    pub index_names: Vec<String>,
    /// Accepted template extensions without the leading dot, in priority order.
    pub template_extensions: Vec<String>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            index_names: vec!["index".into()],
            template_extensions: vec!["tri".into(), "html".into()],
        }
    }
}

impl LocatorConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// A missing or unparsable file yields the defaults.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::load(path).ok()
    }

    /// Read configuration from a specific JSON file, reporting why it could not be used.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config.normalised())
    }

    /// Strip leading dots from extensions and drop blank entries.
    pub fn normalised(self) -> Self {
        let index_names = self
            .index_names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        let template_extensions = self
            .template_extensions
            .into_iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();

        Self {
            index_names,
            template_extensions,
        }
    }
}
