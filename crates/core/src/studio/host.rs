use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Environment variable pointing at the Windows roaming AppData directory.
pub const APP_DATA_ENV: &str = "AppData";

/// Source of host facts used to build Studio candidate locations.
pub trait HostEnvironment {
    /// Value of the `AppData` environment variable, if set.
    fn app_data(&self) -> Option<String>;

    /// Mounted volumes / drives, in discovery order.
    fn volumes(&self) -> Vec<PathBuf>;
}

/// Host backed by the real process environment and filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl HostEnvironment for SystemHost {
    fn app_data(&self) -> Option<String> {
        env::var(APP_DATA_ENV).ok().filter(|value| !value.is_empty())
    }

    fn volumes(&self) -> Vec<PathBuf> {
        let mut volumes = list_dir_sorted(Path::new("/Volumes"), |name| !name.starts_with('.'));
        volumes.extend(list_dir_sorted(Path::new("/dev"), |name| name.starts_with("sd")));
        debug!(count = volumes.len(), "discovered volumes");
        volumes
    }
}

/// Sorted entries of `dir` whose file name passes `keep`. Unreadable dirs yield nothing.
fn list_dir_sorted(dir: &Path, keep: impl Fn(&str) -> bool) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_str().is_some_and(|name| keep(name)))
        .map(|entry| entry.path())
        .collect();
    paths.sort();
    paths
}

/// Host with fixed answers, for callers that already know the environment.
#[derive(Debug, Default, Clone)]
pub struct FixedHost {
    pub app_data: Option<String>,
    pub volumes: Vec<PathBuf>,
}

impl HostEnvironment for FixedHost {
    fn app_data(&self) -> Option<String> {
        self.app_data.clone()
    }

    fn volumes(&self) -> Vec<PathBuf> {
        self.volumes.clone()
    }
}
