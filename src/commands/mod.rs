mod invoke;
mod list;
mod serve;

pub use invoke::{NodeArgs, invoke_command};
pub use list::{ListFormat, list_command};
pub use serve::serve_command;
