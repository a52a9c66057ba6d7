//! Repository handle bound to a remote URL and a local working copy.
//!
//! This module provides:
//! - [`RepoHandle`]: clone-or-pull, commit a file, push
//! - [`remote_origin_url`]: read the configured origin of any folder
//! - [`derive_repo_folder`]: default folder name for a remote URL

mod folder;
mod handle;
mod remote;

pub use folder::{REPO_SUFFIX, derive_repo_folder};
pub use handle::{RepoHandle, Verbosity};
pub use remote::{remote_origin_url, remote_origin_url_with};
