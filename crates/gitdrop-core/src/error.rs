//! Error types for repository operations.
//!
//! `RepoError` separates the three ways an operation can fail:
//! - `Io`: the filesystem or the process spawn failed
//! - `Operation`: git ran and its output carried a failure marker
//! - `Exit`: git ran and exited with a non-zero status

use std::io;

use thiserror::Error;

use crate::git::GitStep;

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("{}", describe_operation(.step, .output))]
    Operation { step: GitStep, output: String },

    #[error("git {} exited with {}: {}", .step, describe_code(.code), trimmed(.output))]
    Exit {
        step: GitStep,
        code: Option<i32>,
        output: String,
    },
}

impl RepoError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        RepoError::Io {
            context: context.into(),
            source,
        }
    }

    /// The git step that failed, if the failure came from git itself.
    pub fn step(&self) -> Option<GitStep> {
        match self {
            RepoError::Io { .. } => None,
            RepoError::Operation { step, .. } | RepoError::Exit { step, .. } => Some(*step),
        }
    }

    /// Combined git output captured for the failing step.
    pub fn output(&self) -> Option<&str> {
        match self {
            RepoError::Io { .. } => None,
            RepoError::Operation { output, .. } | RepoError::Exit { output, .. } => Some(output),
        }
    }
}

fn describe_operation(step: &GitStep, output: &str) -> String {
    match step {
        GitStep::Clone | GitStep::Pull => format!("could not {} repo", step),
        _ => output.to_string(),
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

fn trimmed(output: &str) -> &str {
    output.trim()
}

pub type Result<T> = std::result::Result<T, RepoError>;
