//! Repository options and the `gitdrop.toml` store.

mod store;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use store::ConfigStore;

pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_BRANCH: &str = "master";

/// How a finished git invocation is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureDetection {
    /// Look for `fatal` (clone/pull) or `error` (add/commit/push) in the
    /// combined output and ignore exit codes.
    #[default]
    OutputMarker,
    /// Any non-zero exit code is a failure.
    ExitStatus,
}

/// Settings shared by every operation on a repository handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoOptions {
    /// Remote used by pull and push
    pub remote: String,
    /// Branch used by pull and push
    pub branch: String,
    pub failure_detection: FailureDetection,
    /// Start handles in verbose mode
    pub verbose: bool,
    /// Git executable
    pub git: PathBuf,
}

impl Default for RepoOptions {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            failure_detection: FailureDetection::default(),
            verbose: false,
            git: PathBuf::from("git"),
        }
    }
}

impl RepoOptions {
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_failure_detection(mut self, detection: FailureDetection) -> Self {
        self.failure_detection = detection;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_git(mut self, git: impl Into<PathBuf>) -> Self {
        self.git = git.into();
        self
    }
}
