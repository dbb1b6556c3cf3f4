//! The terminal command capability and the values that flow through a dispatch

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named, invocable unit of backend functionality
///
/// Implementations are registered explicitly through a
/// [`CommandSource`](crate::registry::CommandSource) and live for the whole
/// process. Metadata must not change after registration.
pub trait TerminalCommand: Send + Sync {
    /// Unique key used for dispatch
    fn name(&self) -> &str;

    /// One-line summary shown in command listings
    fn description(&self) -> &str;

    /// Usage hint, e.g. `echo <text>`
    fn usage(&self) -> &str;

    /// Privilege identifier required to list or invoke this command
    ///
    /// `None` means the command is available to every caller.
    fn privilege(&self) -> Option<&str> {
        None
    }

    /// Execute the command
    ///
    /// Business-level failures should be returned as
    /// [`InvocationResult::failure`]. An `Err` is treated as an unexpected
    /// failure and aborts the request.
    fn invoke(&self, argument: Option<&str>, context: &NodeContext) -> Result<InvocationResult>;
}

/// Opaque reference into the content graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeRef(String);

impl NodeRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeRef {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Nodes the caller was looking at when the command was issued
///
/// The core never interprets these; they are handed to the command as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeContext {
    #[serde(default)]
    pub site_node: Option<NodeRef>,

    #[serde(default)]
    pub document_node: Option<NodeRef>,

    #[serde(default)]
    pub focused_node: Option<NodeRef>,
}

impl NodeContext {
    pub fn new(
        site_node: Option<NodeRef>,
        document_node: Option<NodeRef>,
        focused_node: Option<NodeRef>,
    ) -> Self {
        Self {
            site_node,
            document_node,
            focused_node,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.site_node.is_none() && self.document_node.is_none() && self.focused_node.is_none()
    }
}

/// Outcome of a command invocation
///
/// Serialized as `{ "success": bool, "message": string, "payload"?: any }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
    success: bool,
    message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<serde_json::Value>,
}

impl InvocationResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: None,
        }
    }

    /// Result synthesized by the dispatcher when no command matches
    pub fn not_found(command_name: &str) -> Self {
        Self::failure(format!("Command \"{command_name}\" not found"))
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn payload(&self) -> Option<&serde_json::Value> {
        self.payload.as_ref()
    }
}

/// Static metadata of a registered command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    pub name: String,
    pub description: String,
    pub usage: String,
}

impl CommandDescriptor {
    pub fn of(command: &dyn TerminalCommand) -> Self {
        Self {
            name: command.name().to_string(),
            description: command.description().to_string(),
            usage: command.usage().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_without_payload_omits_field() {
        let result = InvocationResult::success("hi");
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value, json!({ "success": true, "message": "hi" }));
    }

    #[test]
    fn test_result_with_payload_serializes_it() {
        let result = InvocationResult::failure("nope").with_payload(json!({ "code": 3 }));
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(
            value,
            json!({ "success": false, "message": "nope", "payload": { "code": 3 } })
        );
    }

    #[test]
    fn test_not_found_message() {
        let result = InvocationResult::not_found("missing");

        assert!(!result.is_success());
        assert_eq!(result.message(), "Command \"missing\" not found");
        assert!(result.payload().is_none());
    }

    #[test]
    fn test_node_context_uses_camel_case_keys() {
        let context: NodeContext =
            serde_json::from_value(json!({ "siteNode": "site", "focusedNode": "n1" })).unwrap();

        assert_eq!(context.site_node, Some(NodeRef::new("site")));
        assert_eq!(context.document_node, None);
        assert_eq!(context.focused_node.as_ref().map(NodeRef::as_str), Some("n1"));
        assert!(!context.is_empty());
        assert!(NodeContext::default().is_empty());
    }
}
