//! Gitdrop Core Library
//!
//! Keeps a local working copy of a remote git repository in step with the
//! remote: clone or pull it, drop a file into it as a commit, and push the
//! result back. All repository work is delegated to the `git` executable.

pub mod config;
pub mod error;
pub mod fs;
pub mod git;
pub mod repo;

pub use error::{RepoError, Result};

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigStore, FailureDetection, RepoOptions};

    // Errors
    pub use crate::error::{RepoError, Result};

    // Git
    pub use crate::git::{GitOutput, GitRunner, GitStep, SystemGit};

    // Repository
    pub use crate::repo::{
        RepoHandle, Verbosity, derive_repo_folder, remote_origin_url, remote_origin_url_with,
    };
}
