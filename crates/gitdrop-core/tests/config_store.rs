use tempfile::TempDir;

use gitdrop_core::config::{ConfigStore, FailureDetection, RepoOptions};

#[test]
fn missing_file_loads_defaults() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_path(temp.path().join("gitdrop.toml"));

    let options = store.load().unwrap();

    assert_eq!(options, RepoOptions::default());
}

#[test]
fn save_then_load_preserves_options() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_path(temp.path().join("nested/dir/gitdrop.toml"));
    let options = RepoOptions::default()
        .with_branch("main")
        .with_remote("upstream")
        .with_failure_detection(FailureDetection::ExitStatus)
        .with_verbose(true)
        .with_git("/usr/local/bin/git");

    store.save(&options).unwrap();
    let loaded = store.load().unwrap();

    assert!(store.config_path().exists());
    assert_eq!(loaded, options);
}

#[test]
fn detection_mode_is_kebab_case_on_disk() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_path(temp.path().join("gitdrop.toml"));

    store
        .save(&RepoOptions::default().with_failure_detection(FailureDetection::ExitStatus))
        .unwrap();

    let content = std::fs::read_to_string(store.config_path()).unwrap();
    assert!(content.contains("failure_detection = \"exit-status\""));
}

#[test]
fn invalid_toml_reports_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gitdrop.toml");
    std::fs::write(&path, "branch = [").unwrap();
    let store = ConfigStore::from_path(&path);

    let err = store.load().unwrap_err();

    assert!(format!("{:#}", err).contains("gitdrop.toml"));
}
