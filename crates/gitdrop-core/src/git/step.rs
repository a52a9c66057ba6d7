use std::fmt;

use serde::{Deserialize, Serialize};

/// The git subcommand an operation was running when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GitStep {
    Clone,
    Pull,
    Add,
    Commit,
    Push,
    Config,
}

impl GitStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            GitStep::Clone => "clone",
            GitStep::Pull => "pull",
            GitStep::Add => "add",
            GitStep::Commit => "commit",
            GitStep::Push => "push",
            GitStep::Config => "config",
        }
    }
}

impl fmt::Display for GitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
