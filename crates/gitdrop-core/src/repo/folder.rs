/// Suffix that marks the end of the repository name in a remote URL.
pub const REPO_SUFFIX: &str = ".git";

/// Derive the default working-copy folder name from a remote URL.
///
/// Everything from the first `.git` onwards is dropped, then the last
/// `/`-separated segment is kept and trimmed. Degenerate input yields an
/// empty string.
pub fn derive_repo_folder(remote_url: &str) -> String {
    let prefix = remote_url
        .split_once(REPO_SUFFIX)
        .map_or(remote_url, |(prefix, _)| prefix);
    prefix.rsplit('/').next().unwrap_or_default().trim().to_string()
}
