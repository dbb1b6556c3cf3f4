//! Request-level error types

use miette::Diagnostic;
use thiserror::Error;

/// Structural failures that abort a terminal request
///
/// An unknown command name is not one of these; it is reported through
/// [`InvocationResult::not_found`](crate::InvocationResult::not_found).
#[derive(Error, Debug, Diagnostic)]
pub enum TerminalError {
    #[error("Terminal commands are disabled")]
    #[diagnostic(
        code(nodeterm::disabled),
        help("Set `terminal.enabled: true` in the terminal configuration")
    )]
    Disabled,

    #[error("Command discovery failed")]
    #[diagnostic(code(nodeterm::discovery))]
    Discovery(#[from] DiscoveryError),

    #[error("Access to command \"{command}\" denied: missing privilege \"{privilege}\"")]
    #[diagnostic(
        code(nodeterm::access_denied),
        help("Add the privilege to `terminal.grantedPrivileges`")
    )]
    AccessDenied { command: String, privilege: String },

    #[error("Command \"{name}\" failed")]
    #[diagnostic(code(nodeterm::command_failed))]
    CommandFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Failures raised while building the command map
#[derive(Error, Debug, Diagnostic)]
pub enum DiscoveryError {
    #[error("Unknown command \"{name}\" in registration list")]
    #[diagnostic(
        code(nodeterm::discovery::unknown_command),
        help("Remove it from `terminal.commands` or register a factory for it")
    )]
    UnknownCommand { name: String },

    #[error("Invalid command registration \"{name}\": {reason}")]
    #[diagnostic(code(nodeterm::discovery::invalid_command))]
    InvalidCommand { name: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(nodeterm::discovery::source))]
    Source(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_disabled_message() {
        assert_eq!(
            TerminalError::Disabled.to_string(),
            "Terminal commands are disabled"
        );
    }

    #[test]
    fn test_discovery_error_is_chained() {
        let error = TerminalError::from(DiscoveryError::UnknownCommand {
            name: "flush".to_string(),
        });

        let source = error.source().expect("discovery error should be the source");
        assert_eq!(
            source.to_string(),
            "Unknown command \"flush\" in registration list"
        );
    }

    #[test]
    fn test_command_failure_keeps_underlying_error() {
        let error = TerminalError::CommandFailed {
            name: "echo".to_string(),
            source: anyhow::anyhow!("disk on fire"),
        };

        assert_eq!(error.to_string(), "Command \"echo\" failed");
        assert_eq!(error.source().unwrap().to_string(), "disk on fire");
    }
}
