//! Routes a named invocation to the matching command

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::access::{AccessPolicy, AllowAll};
use crate::command::{InvocationResult, NodeContext};
use crate::error::TerminalError;
use crate::registry::CommandRegistry;

pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
    policy: Arc<dyn AccessPolicy>,
}

impl CommandDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self::with_policy(registry, Arc::new(AllowAll))
    }

    pub fn with_policy(registry: Arc<CommandRegistry>, policy: Arc<dyn AccessPolicy>) -> Self {
        Self { registry, policy }
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    pub fn policy(&self) -> &dyn AccessPolicy {
        self.policy.as_ref()
    }

    /// Invoke `command_name` and return its result unmodified
    ///
    /// An unknown name yields a failed [`InvocationResult`], not an error.
    /// Errors are reserved for discovery failures, denied privileges and
    /// commands that fail unexpectedly.
    pub fn dispatch(
        &self,
        command_name: &str,
        argument: Option<&str>,
        context: &NodeContext,
    ) -> Result<InvocationResult, TerminalError> {
        let commands = self.registry.list_commands()?;

        let Some(command) = commands.get(command_name) else {
            debug!("No command registered as \"{command_name}\"");
            return Ok(InvocationResult::not_found(command_name));
        };

        if let Some(privilege) = command.privilege()
            && !self.policy.is_granted(privilege)
        {
            warn!("Denied command \"{command_name}\": privilege \"{privilege}\" not granted");
            return Err(TerminalError::AccessDenied {
                command: command_name.to_string(),
                privilege: privilege.to_string(),
            });
        }

        info!("Invoking command \"{command_name}\"");
        command
            .invoke(argument, context)
            .map_err(|source| TerminalError::CommandFailed {
                name: command_name.to_string(),
                source,
            })
    }
}
