use std::fs;
use std::io::Cursor;

use psdk_cli::commands::run_version;
use psdk_core::config::{ConfigLayout, ConfigScope, ConfigStore};
use tempfile::tempdir;

fn input(text: &str) -> Box<Cursor<String>> {
    Box::new(Cursor::new(text.to_string()))
}

#[test]
fn run_version_skips_lookup_when_asked() {
    let temp = tempdir().unwrap();
    let layout = ConfigLayout::new(temp.path().join("home"), None);
    let mut out: Vec<u8> = Vec::new();

    run_version(true, layout, input(""), &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("psdk-cli v"));
}

#[test]
fn run_version_saves_prompted_path_and_reports_both_versions() {
    let temp = tempdir().unwrap();
    let studio = temp.path().join("studio");
    let psdk = studio.join("psdk-binaries").join("pokemonsdk");
    fs::create_dir_all(&psdk).unwrap();
    fs::write(psdk.join("version.txt"), "4256").unwrap();

    let project = temp.path().join("game");
    fs::create_dir_all(project.join("pokemonsdk")).unwrap();
    fs::write(project.join("pokemonsdk").join("version.txt"), "65793").unwrap();

    let layout = ConfigLayout::new(temp.path().join("home"), Some(project));
    let mut out: Vec<u8> = Vec::new();
    run_version(false, layout.clone(), input(&format!("{}\n", studio.display())), &mut out)
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Global PSDK version: 16.160"));
    assert!(text.contains("Project PSDK version: 1.1.1\n"));

    let mut store = ConfigStore::new(layout);
    assert_eq!(store.get(ConfigScope::Global).studio_path, studio.to_string_lossy());
}

#[test]
fn run_version_surfaces_closed_input_as_error() {
    let temp = tempdir().unwrap();
    let layout = ConfigLayout::new(temp.path().join("home"), None);
    let mut out: Vec<u8> = Vec::new();

    let err = run_version(false, layout, input("/nowhere\n"), &mut out).unwrap_err();
    assert!(format!("{err:#}").contains("Input closed"));
}
