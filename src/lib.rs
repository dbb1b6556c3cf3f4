//! Terminal command registry and dispatcher
//!
//! Commands implement [`TerminalCommand`] and are registered explicitly
//! through a [`CommandSource`]. A [`TerminalService`] gates every request on
//! the configured `enabled` flag, lists command metadata and dispatches
//! invocations by name.

pub mod access;
pub mod builtin;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod terminal;

pub use access::{AccessPolicy, AllowAll, GrantedPrivileges};
pub use command::{CommandDescriptor, InvocationResult, NodeContext, NodeRef, TerminalCommand};
pub use config::{ConfigLoader, TerminalConfig};
pub use dispatcher::CommandDispatcher;
pub use error::{DiscoveryError, TerminalError};
pub use registry::{
    CatalogSource, CommandCatalog, CommandMap, CommandRegistry, CommandSource, RegistryMode,
    StaticSource,
};
pub use terminal::{CommandListResponse, InvokeRequest, TerminalService};
