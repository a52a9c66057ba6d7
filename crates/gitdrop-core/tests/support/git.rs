use std::path::{Path, PathBuf};
use std::process::Command;

const GIT_ENV_OVERRIDES: [&str; 4] = [
    "GIT_DIR",
    "GIT_WORK_TREE",
    "GIT_INDEX_FILE",
    "GIT_COMMON_DIR",
];

pub fn git_command() -> Command {
    let mut cmd = Command::new("git");
    for key in GIT_ENV_OVERRIDES {
        cmd.env_remove(key);
    }
    cmd
}

pub fn run_git(dir: &Path, args: &[&str]) {
    let status = git_command()
        .args(args)
        .current_dir(dir)
        .status()
        .expect("Failed to invoke git");
    assert!(status.success(), "git command failed: {:?}", args);
}

/// Give a working copy a committer identity and disable signing.
pub fn configure_identity(repo: &Path) {
    run_git(repo, &["config", "user.email", "test@example.com"]);
    run_git(repo, &["config", "user.name", "Test User"]);
    run_git(repo, &["config", "commit.gpgsign", "false"]);
}

/// Create a bare remote under `root` whose `master` holds one commit.
///
/// Returns the bare repository path and its `file://` URL.
pub fn init_remote(root: &Path) -> (PathBuf, String) {
    let seed = root.join("seed");
    std::fs::create_dir_all(&seed).expect("Failed to create seed dir");
    run_git(&seed, &["init"]);
    run_git(&seed, &["symbolic-ref", "HEAD", "refs/heads/master"]);
    configure_identity(&seed);
    std::fs::write(seed.join("README.md"), "# remote\n").expect("Failed to write README");
    run_git(&seed, &["add", "README.md"]);
    run_git(&seed, &["commit", "-m", "init"]);

    let bare = root.join("remote.git");
    run_git(
        root,
        &[
            "clone",
            "--bare",
            seed.to_str().expect("seed path should be UTF-8"),
            bare.to_str().expect("bare path should be UTF-8"),
        ],
    );

    let url = url::Url::from_directory_path(&bare)
        .expect("bare repo should convert to file URL")
        .to_string();
    (bare, url)
}
