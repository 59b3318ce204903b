//! Configuration path utilities and defaults.
//!
//! This module provides functions for resolving the catalog file path
//! and expanding shell variables like `~` in paths.

/// Default path for the parameter catalog file
pub const DEFAULT_CATALOG_PATH: &str = "~/.jackfront/catalog.yml";

/// Server name used when the catalog does not give one
pub const DEFAULT_SERVER_NAME: &str = "default";

/// Prompt shown by the interactive command loop
pub const PROMPT: &str = "jack> ";

/// Resolves the catalog file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// catalog path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use jackfront_core::config::get_catalog_path;
///
/// // Use default path
/// let default_path = get_catalog_path(None);
///
/// // Use custom path
/// let custom_path = get_catalog_path(Some("/etc/jackfront/catalog.yml"));
/// assert_eq!(custom_path, "/etc/jackfront/catalog.yml");
/// ```
#[must_use]
pub fn get_catalog_path(catalog_path_arg: Option<&str>) -> String {
    let catalog_path = catalog_path_arg.unwrap_or(DEFAULT_CATALOG_PATH);

    shellexpand::tilde(catalog_path).to_string()
}
