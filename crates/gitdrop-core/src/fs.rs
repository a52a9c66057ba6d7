//! Filesystem helpers that apply the working copy's permission modes.
//!
//! On Unix, directories are created `0775` and written files `0755`. Modes
//! only apply to entries this module creates; an existing file keeps its
//! permissions when it is overwritten. Other platforms use the defaults.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{RepoError, Result};

pub const DIR_MODE: u32 = 0o775;
pub const FILE_MODE: u32 = 0o755;

/// Create `path` and any missing parents.
pub fn create_dir_all(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder
        .create(path)
        .map_err(|e| RepoError::io(format!("Failed to create directory: {}", path.display()), e))
}

/// Write `data` to `path`, truncating any existing content.
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    let context = || format!("Failed to write file: {}", path.display());
    let mut file = options.open(path).map_err(|e| RepoError::io(context(), e))?;
    file.write_all(data).map_err(|e| RepoError::io(context(), e))?;
    Ok(())
}

/// Whether anything exists at `path`.
///
/// Errors other than "not found" (permission denied, for instance) count as
/// existing, so callers never try to recreate something they cannot see.
pub fn exists(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != std::io::ErrorKind::NotFound,
    }
}
