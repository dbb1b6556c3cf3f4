//! Commands bundled with nodeterm

mod context;
mod echo;
mod version;

pub use context::{ContextCommand, INSPECT_PRIVILEGE};
pub use echo::EchoCommand;
pub use version::VersionCommand;

use crate::registry::CommandCatalog;

/// Catalog holding every bundled command
pub fn catalog() -> CommandCatalog {
    let mut catalog = CommandCatalog::new();
    catalog
        .register(EchoCommand)
        .register(ContextCommand)
        .register(VersionCommand);
    catalog
}
