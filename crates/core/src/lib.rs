//! jackfront Core Library
//!
//! This crate provides the core functionality for jackfront, a command front-end
//! that configures and controls an audio server through named, typed parameters
//! discovered from two catalogs: server-level parameters and per-driver
//! parameters.
//!
//! # Key Features
//!
//! - **Parameter Catalogs**: Typed parameters loaded from a YAML catalog, with unique option keys
//! - **Dynamic Option Grammar**: Short and long options derived from any catalog at runtime
//! - **Two-Phase Parsing**: Server options up to `-d <driver>`, then the driver's own options
//! - **Control Targets**: Start, switch and stop a backend server process, or dry-run it
//! - **Error Handling**: Comprehensive error types for all failure modes
//!
//! # Examples
//!
//! Parsing a command line against the built-in catalog:
//!
//! ```
//! use jackfront_core::file_handling::builtin_catalog;
//! use jackfront_core::phase::parse_command_line;
//!
//! let mut server = builtin_catalog()?;
//! let argv: Vec<String> = ["-R", "-d", "dummy", "-p", "256"]
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//!
//! let driver = parse_command_line(&mut server, &argv)?;
//! assert_eq!(driver, "dummy");
//! # Ok::<(), jackfront_core::error::Error>(())
//! ```

pub mod catalog;
pub mod catalog_definitions;
pub mod config;
pub mod control;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod grammar;
pub mod parameter;
pub mod phase;
pub mod scanner;
pub mod server;
