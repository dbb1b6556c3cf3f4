//! Catalog of known commands, filtered by a configured allowlist

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use super::source::{CommandSource, validate_registration};
use crate::command::TerminalCommand;
use crate::error::DiscoveryError;

/// Every command this process knows how to run, keyed by name
#[derive(Default, Clone)]
pub struct CommandCatalog {
    entries: BTreeMap<String, Arc<dyn TerminalCommand>>,
}

impl CommandCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: impl TerminalCommand + 'static) -> &mut Self {
        let command: Arc<dyn TerminalCommand> = Arc::new(command);
        self.entries.insert(command.name().to_string(), command);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn TerminalCommand>> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Discovers catalog commands, optionally restricted to an allowlist
pub struct CatalogSource {
    catalog: CommandCatalog,
    enabled: Option<Vec<String>>,
}

impl CatalogSource {
    /// `enabled: None` exposes the whole catalog
    pub fn new(catalog: CommandCatalog, enabled: Option<Vec<String>>) -> Self {
        Self { catalog, enabled }
    }
}

impl CommandSource for CatalogSource {
    fn discover(&self) -> Result<Vec<Arc<dyn TerminalCommand>>, DiscoveryError> {
        let commands: Vec<Arc<dyn TerminalCommand>> = match &self.enabled {
            None => self.catalog.entries.values().cloned().collect(),
            Some(names) => names
                .iter()
                .map(|name| {
                    self.catalog
                        .get(name)
                        .cloned()
                        .ok_or_else(|| DiscoveryError::UnknownCommand { name: name.clone() })
                })
                .collect::<Result<_, _>>()?,
        };

        for command in &commands {
            validate_registration(command.as_ref())?;
        }

        debug!(
            "Discovered {} of {} catalog commands",
            commands.len(),
            self.catalog.len()
        );
        Ok(commands)
    }
}
