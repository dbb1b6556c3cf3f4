//! Discovery sources for terminal commands

use std::sync::Arc;

use crate::command::TerminalCommand;
use crate::error::DiscoveryError;

/// Finds every registered implementation of [`TerminalCommand`]
///
/// Discovery is all-or-nothing: either every command is returned or the
/// whole pass fails.
pub trait CommandSource: Send + Sync {
    fn discover(&self) -> Result<Vec<Arc<dyn TerminalCommand>>, DiscoveryError>;
}

/// Explicit registration list
#[derive(Default, Clone)]
pub struct StaticSource {
    commands: Vec<Arc<dyn TerminalCommand>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command; later registrations shadow earlier ones with the same name
    pub fn register(mut self, command: impl TerminalCommand + 'static) -> Self {
        self.commands.push(Arc::new(command));
        self
    }

    pub fn register_arc(mut self, command: Arc<dyn TerminalCommand>) -> Self {
        self.commands.push(command);
        self
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl CommandSource for StaticSource {
    fn discover(&self) -> Result<Vec<Arc<dyn TerminalCommand>>, DiscoveryError> {
        for command in &self.commands {
            validate_registration(command.as_ref())?;
        }
        Ok(self.commands.clone())
    }
}

/// Reject registrations that could never be dispatched
pub(crate) fn validate_registration(command: &dyn TerminalCommand) -> Result<(), DiscoveryError> {
    if command.name().trim().is_empty() {
        return Err(DiscoveryError::InvalidCommand {
            name: command.name().to_string(),
            reason: "command name must not be empty".to_string(),
        });
    }
    Ok(())
}
