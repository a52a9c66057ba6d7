//! Runner trait and the `git` executable implementation.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Variables that would point git at a repository other than `cwd`.
const GIT_ENV_OVERRIDES: [&str; 4] = [
    "GIT_DIR",
    "GIT_WORK_TREE",
    "GIT_INDEX_FILE",
    "GIT_COMMON_DIR",
];

/// Result of a git invocation that was started successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    /// Standard output followed by standard error
    pub text: String,
}

impl GitOutput {
    pub fn new(code: Option<i32>, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn contains(&self, marker: &str) -> bool {
        self.text.contains(marker)
    }
}

/// Runs git subcommands.
///
/// `Err` is reserved for invocations that never started (missing binary,
/// missing working directory). A git process that exits non-zero is still
/// an `Ok` carrying its exit code.
pub trait GitRunner {
    fn run(&self, cwd: &Path, args: &[&str]) -> io::Result<GitOutput>;
}

impl<R: GitRunner + ?Sized> GitRunner for &R {
    fn run(&self, cwd: &Path, args: &[&str]) -> io::Result<GitOutput> {
        (**self).run(cwd, args)
    }
}

/// Runs the git executable as a child process.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: PathBuf,
}

impl SystemGit {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitRunner for SystemGit {
    fn run(&self, cwd: &Path, args: &[&str]) -> io::Result<GitOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).current_dir(cwd);
        for key in GIT_ENV_OVERRIDES {
            cmd.env_remove(key);
        }
        let output = cmd.output()?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(GitOutput {
            code: output.status.code(),
            text,
        })
    }
}
