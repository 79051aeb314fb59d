//! Persisted CLI configuration (global and project-local scopes).
//!
//! - `Configuration`: serializable record holding the Studio path.
//! - `ConfigLayout`: computed paths for the global and project files.
//! - `ConfigStore`: explicit context object that lazily loads each scope once
//!   and writes loaded records back on `save`.

mod layout;

pub use layout::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PsdkError, PsdkResult};

/// Which configuration record is being addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigScope {
    /// Machine-wide settings, stored under the user's home.
    #[default]
    Global,
    /// Settings of the project discovered from the working directory.
    Local,
}

impl ConfigScope {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigScope::Global => "global",
            ConfigScope::Local => "local",
        }
    }
}

/// Serializable configuration record.
///
/// Global lives at `~/.psdk-cli/cli_config.yml`, local at
/// `<project>/.psdk-cli.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(skip)]
    pub scope: ConfigScope,
    /// Pokémon Studio installation directory. Empty means unset.
    #[serde(default)]
    pub studio_path: String,
    /// Optional cap on interactive Studio path prompts (global scope only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_prompt_attempts: Option<usize>,
    /// Project root (local scope only); derived, never persisted.
    #[serde(skip)]
    pub project_path: Option<PathBuf>,
}

impl Configuration {
    /// Empty record for `scope`.
    pub fn new(scope: ConfigScope) -> Self {
        Self { scope, ..Self::default() }
    }

    pub fn has_studio_path(&self) -> bool {
        !self.studio_path.is_empty()
    }
}

/// Default number of passes through the global version lookup.
pub const DEFAULT_GLOBAL_ATTEMPTS: usize = 3;

/// Caps on the interactive prompt loop and the global lookup loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum prompts for a Studio path; `None` keeps asking until input closes.
    pub prompt_attempts: Option<usize>,
    /// Maximum passes through the global version lookup.
    pub global_attempts: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { prompt_attempts: None, global_attempts: DEFAULT_GLOBAL_ATTEMPTS }
    }
}

impl RetryPolicy {
    /// Default policy, with the prompt cap taken from the global record.
    pub fn from_config(global: &Configuration) -> Self {
        Self { prompt_attempts: global.max_prompt_attempts, ..Self::default() }
    }
}

/// Lazily-loaded configuration records, one per scope.
///
/// Callers own the store for as long as a logical operation runs; nothing
/// is shared through process-wide state.
#[derive(Debug)]
pub struct ConfigStore {
    layout: ConfigLayout,
    global: Option<Configuration>,
    local: Option<Configuration>,
}

impl ConfigStore {
    pub fn new(layout: ConfigLayout) -> Self {
        Self { layout, global: None, local: None }
    }

    /// Store for the running user, discovering the project from `start`.
    pub fn discover(start: impl AsRef<Path>) -> Self {
        Self::new(ConfigLayout::discover(start))
    }

    pub fn layout(&self) -> &ConfigLayout {
        &self.layout
    }

    /// Root of the current project, if any.
    pub fn project_path(&self) -> Option<&Path> {
        self.layout.project_root.as_deref()
    }

    /// Record for `scope`, loading it from disk on first access.
    pub fn get(&mut self, scope: ConfigScope) -> &mut Configuration {
        let (slot, path) = match scope {
            ConfigScope::Global => (&mut self.global, Some(self.layout.global_config_path.as_path())),
            ConfigScope::Local => (&mut self.local, self.layout.local_config_path.as_deref()),
        };

        slot.get_or_insert_with(|| {
            let mut config = path.map(|p| load_configuration(p, scope)).unwrap_or_default();
            config.scope = scope;
            if scope == ConfigScope::Local {
                config.project_path = self.layout.project_root.clone();
            }
            config
        })
    }

    /// Whether `scope` has been loaded during this store's lifetime.
    pub fn is_loaded(&self, scope: ConfigScope) -> bool {
        match scope {
            ConfigScope::Global => self.global.is_some(),
            ConfigScope::Local => self.local.is_some(),
        }
    }

    /// Persist every loaded record back to disk.
    pub fn save(&self) -> PsdkResult<()> {
        if let Some(global) = &self.global {
            write_configuration(&self.layout.global_config_path, global)?;
        }
        if let (Some(local), Some(path)) = (&self.local, &self.layout.local_config_path) {
            write_configuration(path, local)?;
        }
        Ok(())
    }
}

/// Load a configuration record, returning an empty record when the file is
/// missing or cannot be parsed.
pub fn load_configuration(path: &Path, scope: ConfigScope) -> Configuration {
    let body = match fs::read_to_string(path) {
        Ok(body) => body,
        Err(err) => {
            debug!(path = %path.display(), scope = scope.as_str(), %err, "no configuration file");
            return Configuration::new(scope);
        }
    };

    match serde_yaml::from_str::<Option<Configuration>>(&body) {
        Ok(config) => {
            debug!(path = %path.display(), scope = scope.as_str(), "loaded configuration");
            Configuration { scope, ..config.unwrap_or_default() }
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring corrupt configuration file");
            Configuration::new(scope)
        }
    }
}

/// Serialize `config` as YAML to `path`, creating parent directories.
pub fn write_configuration(path: &Path, config: &Configuration) -> PsdkResult<()> {
    let yaml = serde_yaml::to_string(config)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|source| PsdkError::ConfigWrite { path: path.to_path_buf(), source })?;
    }
    fs::write(path, yaml)
        .map_err(|source| PsdkError::ConfigWrite { path: path.to_path_buf(), source })?;
    debug!(path = %path.display(), scope = config.scope.as_str(), "saved configuration");
    Ok(())
}
