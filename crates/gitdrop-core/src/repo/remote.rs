use std::path::Path;

use crate::error::{RepoError, Result};
use crate::git::{GitRunner, GitStep, SystemGit};

/// Read `remote.origin.url` from the repository in `folder`.
pub fn remote_origin_url(folder: impl AsRef<Path>) -> Result<String> {
    remote_origin_url_with(&SystemGit::default(), folder)
}

/// Same as [`remote_origin_url`] with an explicit runner.
///
/// The trimmed output is returned as-is; only a failure to start git or a
/// non-zero exit (no origin configured, not a repository) is an error.
pub fn remote_origin_url_with<R: GitRunner>(runner: &R, folder: impl AsRef<Path>) -> Result<String> {
    let folder = folder.as_ref();
    let output = runner
        .run(folder, &["config", "--get", "remote.origin.url"])
        .map_err(|e| {
            RepoError::io(
                format!("Failed to run git config in {}", folder.display()),
                e,
            )
        })?;

    if !output.success() {
        return Err(RepoError::Exit {
            step: GitStep::Config,
            code: output.code,
            output: output.text,
        });
    }

    Ok(output.text.trim().to_string())
}
