//! Privilege checks applied before a command is listed or invoked

use std::collections::HashSet;

use crate::command::TerminalCommand;

/// Decides whether the current caller holds a privilege
pub trait AccessPolicy: Send + Sync {
    fn is_granted(&self, privilege: &str) -> bool;

    /// Commands without a privilege requirement are always permitted
    fn permits(&self, command: &dyn TerminalCommand) -> bool {
        command
            .privilege()
            .is_none_or(|privilege| self.is_granted(privilege))
    }
}

/// Grants every privilege
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn is_granted(&self, _privilege: &str) -> bool {
        true
    }
}

/// Grants a fixed set of privilege identifiers
#[derive(Debug, Default, Clone)]
pub struct GrantedPrivileges {
    granted: HashSet<String>,
}

impl GrantedPrivileges {
    pub fn new<I, S>(privileges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: privileges.into_iter().map(Into::into).collect(),
        }
    }
}

impl AccessPolicy for GrantedPrivileges {
    fn is_granted(&self, privilege: &str) -> bool {
        self.granted.contains(privilege)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{InvocationResult, NodeContext};

    struct Guarded(Option<&'static str>);

    impl TerminalCommand for Guarded {
        fn name(&self) -> &str {
            "guarded"
        }

        fn description(&self) -> &str {
            ""
        }

        fn usage(&self) -> &str {
            "guarded"
        }

        fn privilege(&self) -> Option<&str> {
            self.0
        }

        fn invoke(
            &self,
            _argument: Option<&str>,
            _context: &NodeContext,
        ) -> anyhow::Result<InvocationResult> {
            Ok(InvocationResult::success(""))
        }
    }

    #[test]
    fn test_allow_all_permits_everything() {
        assert!(AllowAll.permits(&Guarded(Some("terminal:admin"))));
        assert!(AllowAll.permits(&Guarded(None)));
    }

    #[test]
    fn test_granted_privileges() {
        let policy = GrantedPrivileges::new(["terminal:execute"]);

        assert!(policy.permits(&Guarded(Some("terminal:execute"))));
        assert!(!policy.permits(&Guarded(Some("terminal:admin"))));
        assert!(policy.permits(&Guarded(None)));
    }
}
