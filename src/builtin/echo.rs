use anyhow::Result;

use crate::command::{InvocationResult, NodeContext, TerminalCommand};

/// Replies with its argument
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoCommand;

impl TerminalCommand for EchoCommand {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Print the given text"
    }

    fn usage(&self) -> &str {
        "echo <text>"
    }

    fn invoke(&self, argument: Option<&str>, _context: &NodeContext) -> Result<InvocationResult> {
        Ok(InvocationResult::success(argument.unwrap_or_default()))
    }
}
