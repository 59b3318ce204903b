//! Catalog file loading and validation.
//!
//! This module reads the YAML catalog describing the server parameters and
//! the available drivers, and falls back to the built-in catalog when the
//! default catalog file does not exist.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info};

use crate::catalog_definitions::CatalogDefinition;
use crate::config::DEFAULT_SERVER_NAME;
use crate::error::{Error, Result};
use crate::server::Server;

/// Catalog compiled into the binary.
pub const BUILTIN_CATALOG: &str = include_str!("default_catalog.yml");

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    match File::open(path) {
        Ok(reader) => Ok(reader),
        Err(e) => Err(Error::io_error(
            file_description.to_string(),
            path.to_string(),
            e,
        )),
    }
}

fn server_from_reader<R: Read>(reader: R, path: &str) -> Result<Server> {
    // This can't be shortcut with ? as the yaml error needs the file context
    let parsing_result: serde_yaml::Result<CatalogDefinition> = serde_yaml::from_reader(reader);

    let definition = parsing_result.map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "catalog".to_string(),
            path.to_string(),
            e,
        )
    })?;

    let server = definition.into_server(DEFAULT_SERVER_NAME)?;

    if server.drivers.is_empty() {
        return Err(Error::NoDrivers {
            path: path.to_string(),
        });
    }

    debug!(
        "Loaded catalog `{}` with {} server parameters and {} drivers",
        path,
        server.parameters.len(),
        server.drivers.len()
    );

    Ok(server)
}

/// Loads and validates a catalog file.
///
/// # Errors
///
/// Returns an error if:
/// - The catalog file cannot be read
/// - The YAML is malformed or doesn't match the expected structure
/// - Option keys or names are invalid or non-unique within one catalog
/// - The catalog defines no drivers
///
/// # Examples
///
/// ```no_run
/// use jackfront_core::file_handling::load_catalog;
///
/// let server = load_catalog("/etc/jackfront/catalog.yml")?;
/// println!("Loaded {} drivers", server.drivers.len());
/// # Ok::<(), jackfront_core::error::Error>(())
/// ```
pub fn load_catalog(catalog_path: &str) -> Result<Server> {
    let reader = get_reader("catalog", catalog_path)?;
    server_from_reader(reader, catalog_path)
}

/// Parses the built-in catalog.
///
/// # Errors
///
/// Only fails if the built-in catalog itself is malformed.
pub fn builtin_catalog() -> Result<Server> {
    server_from_reader(BUILTIN_CATALOG.as_bytes(), "<built-in>")
}

/// Loads the catalog at `catalog_path`, or the built-in one when the path was
/// not given explicitly and nothing exists there.
///
/// # Errors
///
/// Returns an error if the catalog exists but is invalid, or if an explicitly
/// given catalog cannot be read.
pub fn load_catalog_or_builtin(catalog_path: &str, explicit: bool) -> Result<Server> {
    if !explicit && !Path::exists(Path::new(catalog_path)) {
        info!("No catalog at `{catalog_path}`, using the built-in catalog");
        return builtin_catalog();
    }

    load_catalog(catalog_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::{Kind, ParamValue};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let server = builtin_catalog().unwrap();
        assert_eq!(server.name, DEFAULT_SERVER_NAME);
        assert_eq!(server.command, Some(vec!["jackd".to_string()]));
        assert!(server.parameters.iter().all(|p| p.key != 'd'));
        assert_eq!(
            server.parameters.get("realtime").unwrap().kind(),
            Kind::Boolean
        );

        let dummy = server.drivers.get("dummy").unwrap();
        assert_eq!(
            dummy.parameters.get("period").unwrap().value(),
            &ParamValue::UInt(1024)
        );

        let alsa = server.drivers.get("alsa").unwrap();
        assert_eq!(alsa.parameters.get("device").unwrap().key, 'd');
        assert_eq!(
            alsa.parameters.get("duplex").unwrap().value(),
            &ParamValue::Bool(true)
        );
    }

    #[test]
    fn test_load_catalog_valid_yaml() {
        let yaml_content = r#"
name: test
parameters:
  - key: "r"
    name: realtime
    type: bool
drivers:
  - name: dummy
    parameters:
      - key: "p"
        name: period
        type: string
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{yaml_content}").unwrap();
        let temp_path = temp_file.path().to_str().unwrap();

        let server = load_catalog(temp_path).unwrap();
        assert_eq!(server.name, "test");
        assert!(server.command.is_none());
        assert_eq!(server.parameters.len(), 1);
        assert_eq!(server.drivers.names().collect::<Vec<_>>(), vec!["dummy"]);
    }

    #[test]
    fn test_load_catalog_without_drivers() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "parameters: []").unwrap();
        let temp_path = temp_file.path().to_str().unwrap();

        let result = load_catalog(temp_path);
        assert!(matches!(result, Err(Error::NoDrivers { .. })));
    }

    #[test]
    fn test_load_catalog_invalid_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "invalid: yaml: content: [").unwrap();
        let temp_path = temp_file.path().to_str().unwrap();

        let result = load_catalog(temp_path);
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_load_catalog_duplicate_key() {
        let yaml_content = r#"
parameters:
  - key: "r"
    name: realtime
    type: bool
  - key: "r"
    name: rate
    type: uint
drivers:
  - name: dummy
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{yaml_content}").unwrap();
        let temp_path = temp_file.path().to_str().unwrap();

        let result = load_catalog(temp_path);
        assert!(matches!(result, Err(Error::DuplicateKey { key: 'r', .. })));
    }

    #[test]
    fn test_load_catalog_file_not_found() {
        let result = load_catalog("/this/path/does/not/exist.yml");
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_load_catalog_or_builtin() {
        let missing = "/this/path/does/not/exist.yml";
        let server = load_catalog_or_builtin(missing, false).unwrap();
        assert!(server.drivers.get("dummy").is_ok());

        assert!(load_catalog_or_builtin(missing, true).is_err());
    }
}
