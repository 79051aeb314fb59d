use std::fs;

use psdk_core::config::{
    find_project_root, ConfigLayout, ConfigScope, ConfigStore, RetryPolicy, DEFAULT_GLOBAL_ATTEMPTS,
};
use tempfile::tempdir;

#[test]
fn missing_files_yield_empty_records() {
    let temp = tempdir().unwrap();
    let mut store = ConfigStore::new(ConfigLayout::new(temp.path().join("home"), None));

    assert!(!store.is_loaded(ConfigScope::Global));
    let global = store.get(ConfigScope::Global);
    assert_eq!(global.scope, ConfigScope::Global);
    assert!(!global.has_studio_path());
    assert!(store.is_loaded(ConfigScope::Global));

    let local = store.get(ConfigScope::Local);
    assert_eq!(local.scope, ConfigScope::Local);
    assert!(local.project_path.is_none());
    assert!(store.project_path().is_none());
}

#[test]
fn corrupt_file_yields_empty_record() {
    let temp = tempdir().unwrap();
    let layout = ConfigLayout::new(temp.path(), None);
    fs::write(&layout.global_config_path, "studio_path: [unterminated").unwrap();

    let mut store = ConfigStore::new(layout);
    assert_eq!(store.get(ConfigScope::Global).studio_path, "");
}

#[test]
fn save_persists_global_record_and_creates_directory() {
    let temp = tempdir().unwrap();
    let global_dir = temp.path().join("nested").join(".psdk-cli");
    let mut store = ConfigStore::new(ConfigLayout::new(&global_dir, None));
    store.get(ConfigScope::Global).studio_path = "/opt/studio".into();
    store.save().expect("save");

    let body = fs::read_to_string(global_dir.join("cli_config.yml")).unwrap();
    assert!(body.contains("studio_path: /opt/studio"), "unexpected body: {body}");

    let mut reloaded = ConfigStore::new(ConfigLayout::new(&global_dir, None));
    assert_eq!(reloaded.get(ConfigScope::Global).studio_path, "/opt/studio");
}

#[test]
fn save_skips_records_that_were_never_loaded() {
    let temp = tempdir().unwrap();
    let project = temp.path().join("game");
    fs::create_dir_all(&project).unwrap();
    let layout = ConfigLayout::new(temp.path().join("home"), Some(project.clone()));
    let store = ConfigStore::new(layout.clone());

    store.save().expect("save");
    assert!(!layout.global_config_path.exists());
    assert!(!project.join(".psdk-cli.yml").exists());
}

#[test]
fn local_record_carries_project_path_and_saves_next_to_it() {
    let temp = tempdir().unwrap();
    let project = temp.path().join("game");
    fs::create_dir_all(&project).unwrap();
    let mut store = ConfigStore::new(ConfigLayout::new(temp.path().join("home"), Some(project.clone())));

    assert_eq!(store.get(ConfigScope::Local).project_path.as_deref(), Some(project.as_path()));
    assert_eq!(store.project_path(), Some(project.as_path()));

    store.save().expect("save");
    assert!(project.join(".psdk-cli.yml").is_file());
}

#[test]
fn project_root_is_found_from_nested_directory() {
    let temp = tempdir().unwrap();
    let project = temp.path().join("game");
    let nested = project.join("Data").join("Events");
    fs::create_dir_all(&nested).unwrap();
    fs::write(project.join("project.studio"), "{}").unwrap();

    assert_eq!(find_project_root(&nested), Some(project.clone()));
    assert_eq!(find_project_root(&project), Some(project));
}

#[test]
fn project_root_requires_marker_file() {
    let temp = tempdir().unwrap();
    let project = temp.path().join("game");
    // A directory with the marker name does not count.
    fs::create_dir_all(project.join("project.studio")).unwrap();

    assert_eq!(find_project_root(&project), None);
}

#[test]
fn retry_policy_reads_prompt_cap_from_global_config() {
    let temp = tempdir().unwrap();
    let layout = ConfigLayout::new(temp.path(), None);
    fs::write(&layout.global_config_path, "studio_path: ''\nmax_prompt_attempts: 4\n").unwrap();

    let mut store = ConfigStore::new(layout);
    let policy = RetryPolicy::from_config(store.get(ConfigScope::Global));
    assert_eq!(policy.prompt_attempts, Some(4));
    assert_eq!(policy.global_attempts, DEFAULT_GLOBAL_ATTEMPTS);

    assert_eq!(RetryPolicy::default().prompt_attempts, None);
}
