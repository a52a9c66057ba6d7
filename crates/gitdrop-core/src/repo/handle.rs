//! Repository handle for syncing, committing and pushing a working copy.

use std::path::{Component, Path, PathBuf};

use crate::config::{FailureDetection, RepoOptions};
use crate::error::{RepoError, Result};
use crate::fs;
use crate::git::{GitOutput, GitRunner, GitStep, SystemGit};

use super::derive_repo_folder;

/// Directory whose presence marks a cloned working copy.
const METADATA_DIR: &str = ".git";

/// Output marker for failed clone and pull.
const FATAL_MARKER: &str = "fatal";

/// Output marker for failed add, commit and push.
const ERROR_MARKER: &str = "error";

/// Logging level of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Warnings only.
    #[default]
    Quiet,
    /// Commands, their output, and file writes are logged too.
    Verbose,
}

impl Verbosity {
    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

impl From<bool> for Verbosity {
    fn from(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Quiet
        }
    }
}

/// A remote repository bound to a local working copy.
///
/// Holds no open resources between calls; every operation runs fresh git
/// processes with the working copy as their working directory.
#[derive(Debug)]
pub struct RepoHandle<R = SystemGit> {
    remote_url: String,
    local_path: PathBuf,
    options: RepoOptions,
    verbosity: Verbosity,
    runner: R,
}

impl RepoHandle<SystemGit> {
    /// Bind `remote_url` to `local_path` with default options.
    ///
    /// Without a local path the folder name is derived from the URL and
    /// resolved against the current directory. The folder is created if
    /// it does not exist.
    pub fn create(remote_url: impl Into<String>, local_path: Option<&Path>) -> Result<Self> {
        Self::create_with_options(remote_url, local_path, RepoOptions::default())
    }

    /// Like [`RepoHandle::create`], running the git executable named in `options`.
    pub fn create_with_options(
        remote_url: impl Into<String>,
        local_path: Option<&Path>,
        options: RepoOptions,
    ) -> Result<Self> {
        let runner = SystemGit::new(&options.git);
        Self::create_with(remote_url, local_path, options, runner)
    }
}

impl<R: GitRunner> RepoHandle<R> {
    pub fn create_with(
        remote_url: impl Into<String>,
        local_path: Option<&Path>,
        options: RepoOptions,
        runner: R,
    ) -> Result<Self> {
        let remote_url = remote_url.into();
        let folder = match local_path {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(derive_repo_folder(&remote_url)),
        };
        let local_path = resolve_absolute(&folder)?;

        if !local_path.is_dir() {
            fs::create_dir_all(&local_path)?;
        }

        let verbosity = Verbosity::from(options.verbose);
        Ok(Self {
            remote_url,
            local_path,
            options,
            verbosity,
            runner,
        })
    }

    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    pub fn options(&self) -> &RepoOptions {
        &self.options
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Switch between verbose and quiet logging.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbosity = Verbosity::from(verbose);
    }

    /// Whether the working copy already holds git metadata.
    pub fn is_cloned(&self) -> bool {
        fs::exists(&self.local_path.join(METADATA_DIR))
    }

    /// Clone the remote into the working copy, or rebase-pull it when it
    /// is already cloned.
    pub fn sync(&self) -> Result<()> {
        let (step, output) = if self.is_cloned() {
            let args = [
                "pull",
                "--rebase",
                self.options.remote.as_str(),
                self.options.branch.as_str(),
            ];
            (GitStep::Pull, self.git(GitStep::Pull, &args)?)
        } else {
            let args = ["clone", self.remote_url.as_str(), "."];
            (GitStep::Clone, self.git(GitStep::Clone, &args)?)
        };
        self.judge(step, FATAL_MARKER, output)
    }

    /// Write `data` to `file_path` inside the working copy and commit it as
    /// `Add <file name>`.
    ///
    /// `file_path` is relative to the working copy root; missing parent
    /// directories are created. The file stays on disk even when staging
    /// or committing fails.
    pub fn add_data(&self, data: &[u8], file_path: impl AsRef<Path>) -> Result<()> {
        let file_path = file_path.as_ref();
        let (dir, file_name, path_arg) = split_repo_path(file_path)?;
        self.log_info(format_args!(
            "Got file '{}' in path '{}'",
            file_name,
            dir.map(|d| d.display().to_string()).unwrap_or_default()
        ));

        if let Some(dir) = dir {
            self.log_info(format_args!("Created directory {}", dir.display()));
            fs::create_dir_all(&self.local_path.join(dir))?;
        }
        fs::write_file(&self.local_path.join(file_path), data)?;
        self.log_info(format_args!("Wrote {} bytes", data.len()));

        let message = format!("Add {}", file_name);
        let staged = self.git(GitStep::Add, &["add", path_arg])?;

        match self.options.failure_detection {
            FailureDetection::ExitStatus => {
                self.judge(GitStep::Add, ERROR_MARKER, staged)?;
                let args = ["commit", "-m", message.as_str(), path_arg];
                let committed = self.git(GitStep::Commit, &args)?;
                self.judge(GitStep::Commit, ERROR_MARKER, committed)
            }
            FailureDetection::OutputMarker => {
                if staged.contains(ERROR_MARKER) {
                    return self.judge(GitStep::Add, ERROR_MARKER, staged);
                }

                // Only the commit output is inspected; its process result is not.
                let args = ["commit", "-m", message.as_str(), path_arg];
                self.log_info(format_args!("Running: git {}", args.join(" ")));
                match self.runner.run(&self.local_path, &args) {
                    Ok(committed) => {
                        self.log_info(format_args!("Output: [{}]", committed.text));
                        self.judge(GitStep::Commit, ERROR_MARKER, committed)?;
                    }
                    Err(e) => tracing::warn!(
                        source = "gitdrop",
                        path = %self.local_path.display(),
                        error = %e,
                        "git commit could not be started"
                    ),
                }

                if !staged.success() {
                    return Err(self.exit_error(GitStep::Add, staged));
                }
                Ok(())
            }
        }
    }

    /// Push the configured branch to the configured remote.
    pub fn push(&self) -> Result<()> {
        let args = [
            "push",
            self.options.remote.as_str(),
            self.options.branch.as_str(),
        ];
        let output = self.git(GitStep::Push, &args)?;
        self.judge(GitStep::Push, ERROR_MARKER, output)
    }

    /// Run one git step in the working copy.
    fn git(&self, step: GitStep, args: &[&str]) -> Result<GitOutput> {
        self.log_info(format_args!("Running: git {}", args.join(" ")));
        let output = self.runner.run(&self.local_path, args).map_err(|e| {
            RepoError::io(
                format!("Failed to run git {} in {}", step, self.local_path.display()),
                e,
            )
        })?;
        self.log_info(format_args!("Output: [{}]", output.text));
        Ok(output)
    }

    /// Decide whether a finished step failed, per the configured detection.
    fn judge(&self, step: GitStep, marker: &str, output: GitOutput) -> Result<()> {
        match self.options.failure_detection {
            FailureDetection::OutputMarker => {
                if output.contains(marker) {
                    tracing::warn!(
                        source = "gitdrop",
                        path = %self.local_path.display(),
                        step = %step,
                        "git output contains '{}'",
                        marker
                    );
                    return Err(RepoError::Operation {
                        step,
                        output: output.text,
                    });
                }
                Ok(())
            }
            FailureDetection::ExitStatus => {
                if !output.success() {
                    return Err(self.exit_error(step, output));
                }
                Ok(())
            }
        }
    }

    fn exit_error(&self, step: GitStep, output: GitOutput) -> RepoError {
        tracing::warn!(
            source = "gitdrop",
            path = %self.local_path.display(),
            step = %step,
            code = ?output.code,
            "git exited unsuccessfully"
        );
        RepoError::Exit {
            step,
            code: output.code,
            output: output.text,
        }
    }

    fn log_info(&self, message: std::fmt::Arguments<'_>) {
        if self.verbosity.is_verbose() {
            tracing::info!(
                source = "gitdrop",
                path = %self.local_path.display(),
                "{}",
                message
            );
        }
    }
}

/// Make `folder` absolute against the current directory.
fn resolve_absolute(folder: &Path) -> Result<PathBuf> {
    let resolved = if folder.as_os_str().is_empty() {
        std::env::current_dir()
    } else {
        std::path::absolute(folder)
    };
    resolved.map(|path| normalize_lexically(&path)).map_err(|e| {
        RepoError::io(
            format!("Failed to resolve absolute path: {}", folder.display()),
            e,
        )
    })
}

/// Drop `.` components and fold `..` into its parent without touching the
/// filesystem, so symlinks are not followed.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Split a working-copy relative path into its directory (if any), file
/// name, and the string passed to git.
fn split_repo_path(file_path: &Path) -> Result<(Option<&Path>, &str, &str)> {
    let invalid = |reason: &str| {
        RepoError::io(
            format!("Invalid repository file path: {}", file_path.display()),
            std::io::Error::new(std::io::ErrorKind::InvalidInput, reason.to_string()),
        )
    };

    if file_path.is_absolute() {
        return Err(invalid("path must be relative to the working copy"));
    }
    let path_arg = file_path
        .to_str()
        .ok_or_else(|| invalid("path is not valid UTF-8"))?;
    let file_name = file_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| invalid("path has no file name"))?;
    let dir = file_path.parent().filter(|d| !d.as_os_str().is_empty());

    Ok((dir, file_name, path_arg))
}
