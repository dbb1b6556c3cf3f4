use anyhow::Result;
use nodeterm::{InvokeRequest, NodeRef, TerminalService};

/// Node context passed along with an invocation
#[derive(Debug, Clone, Default, clap::Args)]
pub struct NodeArgs {
    /// Identifier of the current site node
    #[arg(long)]
    site_node: Option<String>,

    /// Identifier of the current document node
    #[arg(long)]
    document_node: Option<String>,

    /// Identifier of the focused node
    #[arg(long)]
    focused_node: Option<String>,
}

pub fn invoke_command(
    service: &TerminalService,
    command_name: String,
    argument: Option<String>,
    nodes: NodeArgs,
) -> Result<()> {
    let request = InvokeRequest {
        command_name,
        argument,
        site_node: nodes.site_node.map(NodeRef::from),
        document_node: nodes.document_node.map(NodeRef::from),
        focused_node: nodes.focused_node.map(NodeRef::from),
    };

    // A failed result (e.g. unknown command) is still a normal response
    let result = service.invoke_command(&request)?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
