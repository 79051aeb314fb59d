use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use psdk_core::config::{ConfigLayout, ConfigScope, ConfigStore, RetryPolicy};
use psdk_core::git::GitCli;
use psdk_core::report::VersionReporter;
use psdk_core::studio::{StudioLocator, SystemHost};
use tracing::debug;

use crate::canonicalize_or_current;

/// Print the CLI version and, unless `no_psdk_version`, the PSDK versions.
///
/// The project is discovered by walking up from `root`.
pub fn version_command(root: &str, no_psdk_version: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let layout = ConfigLayout::discover(&root_path);
    debug!(
        root = %root_path.display(),
        global = %layout.global_config_path.display(),
        project = ?layout.project_root,
        "resolved configuration layout"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_version(no_psdk_version, layout, Box::new(io::stdin().lock()), &mut out)
}

/// `version` with explicit layout, input, and output.
pub fn run_version(
    no_psdk_version: bool,
    layout: ConfigLayout,
    input: Box<dyn BufRead>,
    out: &mut dyn Write,
) -> Result<()> {
    let mut store = ConfigStore::new(layout);
    let policy = if no_psdk_version {
        RetryPolicy::default()
    } else {
        RetryPolicy::from_config(store.get(ConfigScope::Global))
    };

    let locator = StudioLocator::new(Box::new(SystemHost), input);
    let mut reporter = VersionReporter::new(locator, Box::new(GitCli)).with_policy(policy);
    reporter.run(no_psdk_version, &mut store, out).context("Failed to report PSDK version")?;
    out.flush().context("Failed to flush output")?;

    Ok(())
}
