//! Terminal configuration
//!
//! Settings live under a `terminal` namespace so the file can be shared with
//! other backend configuration:
//!
//! ```yaml
//! terminal:
//!   enabled: true
//!   cacheRegistry: true
//!   commands: [echo, context]
//!   grantedPrivileges: [terminal:execute]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings consumed by [`TerminalService`](crate::TerminalService)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TerminalConfig {
    /// Gate for every terminal operation
    pub enabled: bool,

    /// Keep the discovered command map between requests
    pub cache_registry: bool,

    /// Catalog commands to expose; all of them when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<String>>,

    /// Privileges held by the caller; every privilege when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granted_privileges: Option<Vec<String>>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cache_registry: true,
            commands: None,
            granted_privileges: None,
        }
    }
}

impl TerminalConfig {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    terminal: Option<TerminalConfig>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Read the terminal namespace from a YAML file
    pub fn load(path: &Path) -> Result<TerminalConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Like [`load`](Self::load), falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<TerminalConfig> {
        if !path.exists() {
            tracing::debug!(
                "No terminal configuration at {}, using defaults",
                path.display()
            );
            return Ok(TerminalConfig::default());
        }
        Self::load(path)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<TerminalConfig> {
        // An empty document is valid YAML but deserializes to null
        if content.trim().is_empty() {
            return Ok(TerminalConfig::default());
        }
        let file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(file.terminal.unwrap_or_default())
    }
}
