use anyhow::Result;

use crate::command::{InvocationResult, NodeContext, TerminalCommand};

#[derive(Debug, Default, Clone, Copy)]
pub struct VersionCommand;

impl TerminalCommand for VersionCommand {
    fn name(&self) -> &str {
        "version"
    }

    fn description(&self) -> &str {
        "Print the nodeterm version"
    }

    fn usage(&self) -> &str {
        "version"
    }

    fn invoke(&self, _argument: Option<&str>, _context: &NodeContext) -> Result<InvocationResult> {
        Ok(InvocationResult::success(env!("CARGO_PKG_VERSION")))
    }
}
