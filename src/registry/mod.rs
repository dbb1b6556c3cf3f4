//! Command registry
//!
//! The registry turns a [`CommandSource`] into a name-indexed [`CommandMap`].
//! It either rediscovers on every call or keeps one snapshot that is built
//! exactly once and only replaced by an explicit [`CommandRegistry::reload`].

mod catalog;
mod source;

use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

pub use catalog::{CatalogSource, CommandCatalog};
pub use source::{CommandSource, StaticSource};

use crate::access::AccessPolicy;
use crate::command::{CommandDescriptor, TerminalCommand};
use crate::error::{DiscoveryError, TerminalError};

/// Commands keyed by their dispatch name
pub type CommandMap = HashMap<String, Arc<dyn TerminalCommand>>;

/// How long a discovered command map is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryMode {
    /// Discover once, reuse until [`CommandRegistry::reload`]
    Cached,
    /// Discover again on every call
    PerRequest,
}

pub struct CommandRegistry {
    source: Arc<dyn CommandSource>,
    mode: RegistryMode,
    snapshot: RwLock<Arc<OnceCell<Arc<CommandMap>>>>,
}

impl CommandRegistry {
    pub fn new(source: Arc<dyn CommandSource>, mode: RegistryMode) -> Self {
        Self {
            source,
            mode,
            snapshot: RwLock::new(Arc::new(OnceCell::new())),
        }
    }

    pub fn cached(source: impl CommandSource + 'static) -> Self {
        Self::new(Arc::new(source), RegistryMode::Cached)
    }

    pub fn per_request(source: impl CommandSource + 'static) -> Self {
        Self::new(Arc::new(source), RegistryMode::PerRequest)
    }

    pub fn mode(&self) -> RegistryMode {
        self.mode
    }

    /// All discovered commands keyed by name
    pub fn list_commands(&self) -> Result<Arc<CommandMap>, TerminalError> {
        match self.mode {
            RegistryMode::PerRequest => Ok(Arc::new(self.build()?)),
            RegistryMode::Cached => {
                // Clone the cell handle so a concurrent reload cannot swap it mid-init
                let cell = self
                    .snapshot
                    .read()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .clone();
                let map = cell.get_or_try_init(|| self.build().map(Arc::new))?;
                Ok(Arc::clone(map))
            }
        }
    }

    /// Name, description and usage of every command, sorted by name
    pub fn describe_commands(&self) -> Result<Vec<CommandDescriptor>, TerminalError> {
        self.describe_permitted(&crate::access::AllowAll)
    }

    /// Like [`describe_commands`](Self::describe_commands), skipping commands
    /// the policy does not grant
    pub fn describe_permitted(
        &self,
        policy: &dyn AccessPolicy,
    ) -> Result<Vec<CommandDescriptor>, TerminalError> {
        let commands = self.list_commands()?;

        let mut descriptors: Vec<CommandDescriptor> = commands
            .values()
            .map(Arc::as_ref)
            .filter(|command| policy.permits(*command))
            .map(|command| CommandDescriptor::of(command))
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(descriptors)
    }

    /// Drop the cached snapshot; the next lookup rediscovers
    pub fn reload(&self) {
        let mut snapshot = self
            .snapshot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *snapshot = Arc::new(OnceCell::new());
        debug!("Command registry snapshot invalidated");
    }

    fn build(&self) -> Result<CommandMap, DiscoveryError> {
        let commands = self.source.discover()?;

        let mut map = CommandMap::with_capacity(commands.len());
        for command in commands {
            let name = command.name().to_string();
            if map.insert(name.clone(), command).is_some() {
                warn!("Command \"{name}\" registered more than once; keeping the last registration");
            }
        }

        debug!("Built command registry with {} commands", map.len());
        Ok(map)
    }
}
