//! PSDK version lookup and reporting.
//!
//! Two independent flows:
//! - global: the PSDK shipped inside Pokémon Studio's psdk-binaries;
//! - local: the `pokemonsdk` folder of the current project, plus its git target.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{ConfigScope, ConfigStore, RetryPolicy};
use crate::error::{PsdkError, PsdkResult};
use crate::git::{load_git_data, GitInfo};
use crate::studio::{psdk_binaries_path, StudioLocator};

/// Directory holding PSDK, both inside psdk-binaries and inside a project.
pub const PSDK_DIR_NAME: &str = "pokemonsdk";

/// File holding the PSDK version integer as decimal text.
pub const VERSION_FILE_NAME: &str = "version.txt";

/// Render a version integer as its big-endian bytes joined by `.`,
/// dropping leading zero bytes (`4256` → `16.160`, `0` → `0`).
pub fn version_to_string(version: u32) -> String {
    let bytes = version.to_be_bytes();
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len() - 1);
    bytes[first..].iter().map(u8::to_string).collect::<Vec<_>>().join(".")
}

/// Version integer from `<dir>/version.txt`; 0 when the file is missing.
pub fn load_version_integer(dir: impl AsRef<Path>) -> u32 {
    let path = dir.as_ref().join(VERSION_FILE_NAME);
    match fs::read_to_string(&path) {
        Ok(body) => parse_version_integer(&body),
        Err(err) => {
            debug!(path = %path.display(), %err, "no version file");
            0
        }
    }
}

/// Leading decimal digits of `text`, truncated to 32 bits; 0 when there are none.
fn parse_version_integer(text: &str) -> u32 {
    text.trim_start()
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u32, |acc, digit| acc.wrapping_mul(10).wrapping_add(u32::from(digit - b'0')))
}

/// Drives Studio lookup and prints global and project PSDK versions.
pub struct VersionReporter {
    locator: StudioLocator,
    git: Box<dyn GitInfo>,
    policy: RetryPolicy,
}

impl VersionReporter {
    pub fn new(locator: StudioLocator, git: Box<dyn GitInfo>) -> Self {
        Self { locator, git, policy: RetryPolicy::default() }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self.locator = self.locator.with_prompt_attempts(policy.prompt_attempts);
        self
    }

    /// Print the CLI version and, unless skipped, both PSDK versions.
    pub fn run(
        &mut self,
        skip_sdk_version: bool,
        store: &mut ConfigStore,
        out: &mut dyn Write,
    ) -> PsdkResult<()> {
        writeln!(out, "psdk-cli v{}", crate::version())?;
        if skip_sdk_version {
            return Ok(());
        }

        write!(out, "Searching for PSDK version...")?;
        out.flush()?;
        self.search_and_show_psdk_version(store, out)
    }

    pub fn search_and_show_psdk_version(
        &mut self,
        store: &mut ConfigStore,
        out: &mut dyn Write,
    ) -> PsdkResult<()> {
        self.search_and_show_global_psdk_version(store, out)?;
        self.search_and_show_local_psdk_version(store, out)
    }

    /// Resolve Studio's psdk-binaries and print the global version.
    ///
    /// A configured Studio path without psdk-binaries is cleared and the lookup
    /// starts over, at most `RetryPolicy::global_attempts` times.
    pub fn search_and_show_global_psdk_version(
        &mut self,
        store: &mut ConfigStore,
        out: &mut dyn Write,
    ) -> PsdkResult<PathBuf> {
        for attempt in 1..=self.policy.global_attempts {
            if !store.get(ConfigScope::Global).has_studio_path() {
                self.locator.find_and_save_path(store, out)?;
            }

            let studio_path = store.get(ConfigScope::Global).studio_path.clone();
            if let Some(binaries) = psdk_binaries_path(&studio_path) {
                self.show_global_psdk_version(&binaries, out)?;
                return Ok(binaries);
            }

            debug!(studio_path = %studio_path, attempt, "configured Studio path has no psdk-binaries");
            writeln!(out, "\r[Error] Current Pokemon Studio path does not contain psdk-binaries")?;
            store.get(ConfigScope::Global).studio_path.clear();
        }

        Err(PsdkError::RetriesExhausted {
            what: "resolving the global PSDK version",
            attempts: self.policy.global_attempts,
        })
    }

    pub fn show_global_psdk_version(
        &self,
        psdk_binaries_path: &Path,
        out: &mut dyn Write,
    ) -> PsdkResult<()> {
        let version = load_version_integer(psdk_binaries_path.join(PSDK_DIR_NAME));
        writeln!(out, "\rGlobal PSDK version: {}       ", version_to_string(version))?;
        Ok(())
    }

    /// Print the project's own PSDK version and git target, if it has one.
    pub fn search_and_show_local_psdk_version(
        &mut self,
        store: &mut ConfigStore,
        out: &mut dyn Write,
    ) -> PsdkResult<()> {
        let Some(project_path) = store.get(ConfigScope::Local).project_path.clone() else {
            debug!("no project found, skipping local PSDK version");
            return Ok(());
        };

        let psdk_path = project_path.join(PSDK_DIR_NAME);
        if !psdk_path.is_dir() {
            return self.show_no_local_psdk_version(out);
        }

        let version = load_version_integer(&psdk_path);
        writeln!(out, "Project PSDK version: {}", version_to_string(version))?;

        let git_data = load_git_data(&psdk_path, self.git.as_ref());
        if !git_data.is_empty() {
            writeln!(out, "Project's PSDK git target: {git_data}")?;
        }
        Ok(())
    }

    pub fn show_no_local_psdk_version(&self, out: &mut dyn Write) -> PsdkResult<()> {
        writeln!(out, "Project PSDK Version: Studio's PSDK version")?;
        Ok(())
    }
}
