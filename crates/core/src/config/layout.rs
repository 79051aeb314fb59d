use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the global configuration directory.
pub const HOME_OVERRIDE_ENV: &str = "PSDK_CLI_HOME";

/// Name of the global configuration directory under the user's home.
pub const GLOBAL_DIR_NAME: &str = ".psdk-cli";

/// File name of the global configuration record.
pub const GLOBAL_CONFIG_FILE: &str = "cli_config.yml";

/// File name of the project-local configuration record.
pub const LOCAL_CONFIG_FILE: &str = ".psdk-cli.yml";

/// Marker file identifying a Pokémon Studio project root.
pub const PROJECT_MARKER: &str = "project.studio";

/// Logical layout of the configuration files on disk.
///
/// This is derived from a global directory and an optional project root. It does
/// *not* create anything; the store writes files lazily on save.
#[derive(Debug, Clone)]
pub struct ConfigLayout {
    /// Directory holding machine-wide configuration.
    pub global_dir: PathBuf,
    /// Path to the global configuration file (YAML).
    pub global_config_path: PathBuf,
    /// Root of the current project, if one was discovered.
    pub project_root: Option<PathBuf>,
    /// Path to the project configuration file, if a project was discovered.
    pub local_config_path: Option<PathBuf>,
}

impl ConfigLayout {
    /// Compute a layout from an explicit global directory and project root.
    pub fn new(global_dir: impl AsRef<Path>, project_root: Option<PathBuf>) -> Self {
        let global_dir = global_dir.as_ref().to_path_buf();
        let global_config_path = global_dir.join(GLOBAL_CONFIG_FILE);
        let local_config_path = project_root.as_ref().map(|root| root.join(LOCAL_CONFIG_FILE));

        Self { global_dir, global_config_path, project_root, local_config_path }
    }

    /// Compute the layout for the running user, discovering the project from `start`.
    pub fn discover(start: impl AsRef<Path>) -> Self {
        Self::new(default_global_dir(), find_project_root(start))
    }
}

/// Resolve the global configuration directory.
///
/// `PSDK_CLI_HOME` wins; otherwise `<home>/.psdk-cli`, falling back to a
/// relative `.psdk-cli` when no home directory is known.
pub fn default_global_dir() -> PathBuf {
    if let Some(dir) = env::var_os(HOME_OVERRIDE_ENV) {
        return PathBuf::from(dir);
    }

    dirs::home_dir()
        .map(|home| home.join(GLOBAL_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(GLOBAL_DIR_NAME))
}

/// Walk up from `start` to the first directory containing `project.studio`.
pub fn find_project_root(start: impl AsRef<Path>) -> Option<PathBuf> {
    start
        .as_ref()
        .ancestors()
        .find(|dir| dir.join(PROJECT_MARKER).is_file())
        .map(Path::to_path_buf)
}
