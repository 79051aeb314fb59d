//! Pokémon Studio discovery.
//!
//! Studio is recognised by a `psdk-binaries` folder under one of a few fixed
//! subpaths. Discovery probes a fixed, ordered list of install locations and
//! falls back to asking the user on the provided input.

mod host;

pub use host::*;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{ConfigScope, ConfigStore};
use crate::error::{PsdkError, PsdkResult};

/// macOS application bundle.
pub const APPLICATION_BUNDLE_PATH: &str = "/Applications/PokemonStudio.app";

/// Install directory relative to the roaming AppData directory.
pub const APP_DATA_STUDIO_SUBPATH: &str = "../Local/Programs/pokemon-studio";

/// Studio checkout relative to a mounted volume.
pub const VOLUME_STUDIO_SUBPATH: &str = "projects/PokemonStudio";

/// Last-resort Windows location.
pub const FALLBACK_STUDIO_PATH: &str = "C:/Projects/PokemonStudio";

/// Subpaths that mark a valid Studio install, in lookup order.
pub const PSDK_BINARIES_LOCATIONS: [&str; 3] =
    ["psdk-binaries", "Contents/Resources/psdk-binaries", "resources/psdk-binaries"];

pub const PROMPT_MESSAGE: &str = "Could not automatically find Pokémon Studio path, please enter it:";

pub const INVALID_PROVIDED_PATH_MESSAGE: &str = "Provided path does not contain psdk-binaries";

/// Every common Studio location, in probe order.
///
/// Bundle path, then the AppData install (when `AppData` is set), then one
/// entry per volume, then the fixed Windows path.
pub fn common_studio_location(host: &dyn HostEnvironment) -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(APPLICATION_BUNDLE_PATH)];
    locations.extend(host.app_data().map(|app_data| studio_app_data_location(&app_data)));
    locations.extend(host.volumes().into_iter().map(|volume| volume.join(VOLUME_STUDIO_SUBPATH)));
    locations.push(PathBuf::from(FALLBACK_STUDIO_PATH));
    locations
}

/// Studio install directory derived from the AppData directory.
pub fn studio_app_data_location(app_data: &str) -> PathBuf {
    Path::new(app_data).join(APP_DATA_STUDIO_SUBPATH)
}

pub fn psdk_binaries_locations() -> &'static [&'static str] {
    &PSDK_BINARIES_LOCATIONS
}

/// First psdk-binaries directory existing under `studio_path`.
pub fn psdk_binaries_path(studio_path: impl AsRef<Path>) -> Option<PathBuf> {
    let studio_path = studio_path.as_ref();
    psdk_binaries_locations()
        .iter()
        .map(|location| studio_path.join(location))
        .find(|candidate| candidate.is_dir())
}

/// Fail with `InvalidStudioPath` (after telling the user) when `path` has no psdk-binaries.
pub fn check_psdk_binaries_in_provided_location(
    path: impl AsRef<Path>,
    out: &mut dyn Write,
) -> PsdkResult<()> {
    let path = path.as_ref();
    if psdk_binaries_path(path).is_some() {
        return Ok(());
    }

    writeln!(out, "{INVALID_PROVIDED_PATH_MESSAGE}")?;
    Err(PsdkError::InvalidStudioPath(path.to_path_buf()))
}

/// Locates Studio and records its path in the global configuration.
pub struct StudioLocator {
    host: Box<dyn HostEnvironment>,
    input: Box<dyn BufRead>,
    prompt_attempts: Option<usize>,
}

impl StudioLocator {
    pub fn new(host: Box<dyn HostEnvironment>, input: Box<dyn BufRead>) -> Self {
        Self { host, input, prompt_attempts: None }
    }

    /// Cap the number of interactive prompts; `None` asks until input closes.
    pub fn with_prompt_attempts(mut self, attempts: Option<usize>) -> Self {
        self.prompt_attempts = attempts;
        self
    }

    pub fn common_studio_location(&self) -> Vec<PathBuf> {
        common_studio_location(self.host.as_ref())
    }

    /// Probe common locations; ask the user when none holds psdk-binaries.
    pub fn find_and_save_path(
        &mut self,
        store: &mut ConfigStore,
        out: &mut dyn Write,
    ) -> PsdkResult<PathBuf> {
        let found = self
            .common_studio_location()
            .into_iter()
            .filter(|location| location.is_dir())
            .find(|location| psdk_binaries_path(location).is_some());

        let Some(studio_path) = found else {
            debug!("no common location holds psdk-binaries");
            return self.ask_and_save_studio_path(store, out);
        };

        writeln!(out, "\rLocated Pokemon Studio in `{}`", studio_path.display())?;
        save_studio_path(store, &studio_path)?;
        Ok(studio_path)
    }

    /// Prompt until the user provides a path containing psdk-binaries.
    pub fn ask_and_save_studio_path(
        &mut self,
        store: &mut ConfigStore,
        out: &mut dyn Write,
    ) -> PsdkResult<PathBuf> {
        let mut attempts = 0;
        loop {
            if self.prompt_attempts.is_some_and(|limit| attempts >= limit) {
                return Err(PsdkError::RetriesExhausted {
                    what: "asking for the Pokémon Studio path",
                    attempts,
                });
            }
            attempts += 1;

            write!(out, "\r{PROMPT_MESSAGE}")?;
            out.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(PsdkError::InputClosed);
            }
            let path = PathBuf::from(line.trim_end_matches(['\r', '\n']));

            match check_psdk_binaries_in_provided_location(&path, out) {
                Ok(()) => {}
                Err(PsdkError::InvalidStudioPath(rejected)) => {
                    debug!(path = %rejected.display(), attempts, "rejected Studio path");
                    continue;
                }
                Err(other) => return Err(other),
            }

            save_studio_path(store, &path)?;
            return Ok(path);
        }
    }
}

fn save_studio_path(store: &mut ConfigStore, studio_path: &Path) -> PsdkResult<()> {
    store.get(ConfigScope::Global).studio_path = studio_path.to_string_lossy().into_owned();
    store.save()
}
