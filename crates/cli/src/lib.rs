//! jackfront CLI Library
//!
//! This crate provides the command-line interface for jackfront. It parses the
//! front-end's own options, hands the rest of the command line to the
//! two-phase parser, starts the server and then runs the interactive command
//! loop until the user quits.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`command_loop`]: The interactive `jack>` prompt with `switch` and `quit`
//! - [`listing`]: Plain-text catalog and parameter value listings
//!
//! # Examples
//!
//! The CLI binary (`jackfront`) can be used in several ways:
//!
//! ```bash
//! # Realtime server on the dummy driver with a 256 frame period
//! jackfront -R -d dummy -p 256
//!
//! # Long options work the same way
//! jackfront --realtime --driver=alsa --device hw:1
//!
//! # Show the command line without starting anything
//! jackfront --dry-run -d alsa
//!
//! # List every server and driver option
//! jackfront --catalog ~/studio.yml --list
//! ```

pub mod cli_args;
pub mod command_loop;
pub mod listing;
