use anyhow::Result;
use serde_json::json;

use crate::command::{InvocationResult, NodeContext, TerminalCommand};

/// Needed to read node identifiers of the current request
pub const INSPECT_PRIVILEGE: &str = "terminal:inspect";

/// Reports which nodes the request carried
#[derive(Debug, Default, Clone, Copy)]
pub struct ContextCommand;

impl TerminalCommand for ContextCommand {
    fn name(&self) -> &str {
        "context"
    }

    fn description(&self) -> &str {
        "Show the site, document and focused node of the current request"
    }

    fn usage(&self) -> &str {
        "context"
    }

    fn privilege(&self) -> Option<&str> {
        Some(INSPECT_PRIVILEGE)
    }

    fn invoke(&self, _argument: Option<&str>, context: &NodeContext) -> Result<InvocationResult> {
        let message = if context.is_empty() {
            "No node context".to_string()
        } else {
            let described: Vec<String> = [
                ("site", &context.site_node),
                ("document", &context.document_node),
                ("focused", &context.focused_node),
            ]
            .into_iter()
            .filter_map(|(label, node)| node.as_ref().map(|node| format!("{label}={node}")))
            .collect();
            described.join(" ")
        };

        Ok(InvocationResult::success(message).with_payload(json!({
            "siteNode": context.site_node,
            "documentNode": context.document_node,
            "focusedNode": context.focused_node,
        })))
    }
}
