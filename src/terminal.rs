//! Feature-gated entry point used by every transport

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::access::{AccessPolicy, AllowAll, GrantedPrivileges};
use crate::command::{CommandDescriptor, InvocationResult, NodeContext, NodeRef};
use crate::config::TerminalConfig;
use crate::dispatcher::CommandDispatcher;
use crate::error::TerminalError;
use crate::registry::{
    CatalogSource, CommandCatalog, CommandRegistry, CommandSource, RegistryMode,
};

/// Response of the "list commands" operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandListResponse {
    pub success: bool,
    pub result: BTreeMap<String, CommandDescriptor>,
}

/// Parameters of the "invoke command" operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeRequest {
    pub command_name: String,

    #[serde(default)]
    pub argument: Option<String>,

    #[serde(default)]
    pub site_node: Option<NodeRef>,

    #[serde(default)]
    pub document_node: Option<NodeRef>,

    #[serde(default)]
    pub focused_node: Option<NodeRef>,
}

impl InvokeRequest {
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            ..Self::default()
        }
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = Some(argument.into());
        self
    }

    pub fn context(&self) -> NodeContext {
        NodeContext::new(
            self.site_node.clone(),
            self.document_node.clone(),
            self.focused_node.clone(),
        )
    }
}

/// One shared instance per process, built by the composition root
pub struct TerminalService {
    enabled: bool,
    dispatcher: CommandDispatcher,
}

impl TerminalService {
    pub fn new(enabled: bool, dispatcher: CommandDispatcher) -> Self {
        Self {
            enabled,
            dispatcher,
        }
    }

    /// Wire a service from configuration and a command catalog
    pub fn from_config(config: &TerminalConfig, catalog: CommandCatalog) -> Self {
        let source = CatalogSource::new(catalog, config.commands.clone());
        Self::with_source(config, Arc::new(source))
    }

    pub fn with_source(config: &TerminalConfig, source: Arc<dyn CommandSource>) -> Self {
        let mode = if config.cache_registry {
            RegistryMode::Cached
        } else {
            RegistryMode::PerRequest
        };
        let policy: Arc<dyn AccessPolicy> = match &config.granted_privileges {
            Some(privileges) => Arc::new(GrantedPrivileges::new(privileges.iter().cloned())),
            None => Arc::new(AllowAll),
        };

        let registry = Arc::new(CommandRegistry::new(source, mode));
        Self::new(
            config.enabled,
            CommandDispatcher::with_policy(registry, policy),
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    /// Descriptors of every command the caller may use, keyed by name
    pub fn list_commands(&self) -> Result<CommandListResponse, TerminalError> {
        self.ensure_enabled()?;

        let result = self
            .dispatcher
            .registry()
            .describe_permitted(self.dispatcher.policy())?
            .into_iter()
            .map(|descriptor| (descriptor.name.clone(), descriptor))
            .collect();

        Ok(CommandListResponse {
            success: true,
            result,
        })
    }

    pub fn describe_commands(&self) -> Result<Vec<CommandDescriptor>, TerminalError> {
        self.ensure_enabled()?;
        self.dispatcher
            .registry()
            .describe_permitted(self.dispatcher.policy())
    }

    pub fn invoke_command(&self, request: &InvokeRequest) -> Result<InvocationResult, TerminalError> {
        self.ensure_enabled()?;
        self.dispatcher.dispatch(
            &request.command_name,
            request.argument.as_deref(),
            &request.context(),
        )
    }

    /// Rediscover commands on the next request
    pub fn reload(&self) -> Result<(), TerminalError> {
        self.ensure_enabled()?;
        self.dispatcher.registry().reload();
        Ok(())
    }

    fn ensure_enabled(&self) -> Result<(), TerminalError> {
        if !self.enabled {
            debug!("Rejecting terminal request: terminal is disabled");
            return Err(TerminalError::Disabled);
        }
        Ok(())
    }
}
