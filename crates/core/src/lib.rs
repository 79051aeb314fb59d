//! psdk-core
//!
//! Core library behind `psdk-cli`: locating Pokémon Studio, persisting its
//! path, and reporting the PSDK version shipped with Studio and the one
//! vendored in the current project.
//!
//! All collaborators with side effects (host probing, user input, git) are
//! injected so frontends and tests can substitute them.

pub mod config;
pub mod error;
pub mod git;
pub mod report;
pub mod studio;

pub use error::{PsdkError, PsdkResult};

/// Returns the library version as encoded at compile time.
///
/// Frontends print this as the CLI version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
