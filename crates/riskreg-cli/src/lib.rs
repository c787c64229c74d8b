//! Command-line front end for the risk register
//!
//! Parses arguments with [`args::command`], resolves a [`RegisterConfig`],
//! and runs one [`Action`] against the JSON store through a [`Session`].
//!
//! ```no_run
//! use riskreg_cli::{run, Invocation};
//!
//! let invocation = Invocation::try_parse_from(["riskreg", "list"]).unwrap();
//! let output = run(invocation, std::path::Path::new(".")).unwrap();
//! print!("{output}");
//! ```

pub mod args;
pub mod commands;
pub mod config;
pub mod logging;
pub mod table;

pub use args::{command, Invocation};
pub use commands::{Action, ListOptions, MatrixFormat, Session};
pub use config::{ConfigError, RegisterConfig, DEFAULT_CONFIG_FILE};
pub use table::SortColumn;

use std::path::Path;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolve configuration for `invocation`, relative to `dir`
///
/// A relative store path, from `--data` or from the config file, is taken
/// relative to `dir`.
///
/// # Errors
/// Returns [`ConfigError`] if a chosen config file cannot be used
pub fn configure(invocation: &Invocation, dir: &Path) -> Result<RegisterConfig, ConfigError> {
    let mut config = RegisterConfig::resolve(invocation.config.as_deref(), dir)?;
    if let Some(data) = &invocation.data {
        config.data_file.clone_from(data);
    }
    if config.data_file.is_relative() {
        config.data_file = dir.join(&config.data_file);
    }
    Ok(config)
}

/// Open the store, run the action and save on change
///
/// # Errors
/// Returns configuration, store and command errors
pub fn run(invocation: Invocation, dir: &Path) -> anyhow::Result<String> {
    let config = configure(&invocation, dir)?;
    run_with(config, invocation.action)
}

/// Run `action` against the store named by `config`
///
/// # Errors
/// Returns store and command errors
pub fn run_with(config: RegisterConfig, action: Action) -> anyhow::Result<String> {
    tracing::debug!(
        config_file = ?config.source(),
        data_file = %config.data_file.display(),
        "opening register"
    );
    let mut session = Session::open(config)?.with_color(console::colors_enabled());
    let output = session.execute(action)?;
    session.close()?;
    Ok(output)
}
