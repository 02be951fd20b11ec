//! Default path resolution for configuration files
//!
//! Uses XDG Base Directory specification when available, with sensible fallbacks.

use std::path::PathBuf;

/// File name of the site registry looked up by root discovery
pub const REGISTRY_FILE_NAME: &str = "sites.toml";

/// Returns the default path for the CLI configuration file.
///
/// - Linux/macOS: `~/.config/sitecmd/cli.toml`
/// - Fallback: `/etc/sitecmd/cli.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/etc"))
        .join("sitecmd")
        .join("cli.toml")
}

/// Returns the default site registry path, used when root discovery finds nothing.
///
/// - Linux/macOS: `~/.local/share/sitecmd/sites.toml`
/// - Fallback: `/var/lib/sitecmd/sites.toml`
pub fn default_registry_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("/var/lib"))
        .join("sitecmd")
        .join(REGISTRY_FILE_NAME)
}
