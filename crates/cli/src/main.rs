use anyhow::Result;
use clap::{Parser, Subcommand};
use psdk_cli::commands::version_command;
use psdk_cli::init_logging;

/// Pokémon SDK command-line helper.
///
/// This CLI is a thin wrapper around `psdk-core` (exposed in code as `psdk_core`).
/// Studio discovery, configuration, and version reporting live in the library.
#[derive(Parser, Debug)]
#[command(name = "psdk-cli", version, about = "Pokémon SDK command-line helper", long_about = None)]
struct Cli {
    /// Log debug information to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the psdk-cli version, then the PSDK versions.
    ///
    /// This will:
    /// - Locate Pokémon Studio (asking for its path if needed) and print the global PSDK version.
    /// - Print the PSDK version of the current project, with its git target.
    Version {
        /// Directory to search for a project from. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Only show the psdk-cli version.
        #[arg(long, default_value_t = false)]
        no_psdk_version: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Default to the Version command if none is provided.
    match cli.command.unwrap_or(Command::Version { root: ".".to_string(), no_psdk_version: false })
    {
        Command::Version { root, no_psdk_version } => version_command(&root, no_psdk_version)?,
    }

    Ok(())
}
