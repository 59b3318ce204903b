//! Command-line argument parsing.
//!
//! Only the front-end's own options are declared here. They are long-only so
//! they never shadow a catalog's option letters. Everything from the first
//! token clap does not know is collected verbatim and handed to the
//! two-phase parser.

use clap::{ArgAction, Parser};

/// Command-line arguments for the jackfront CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use jackfront_cli::cli_args::Args;
///
/// let args = Args::parse_from(["jackfront", "--dry-run", "-R", "-d", "dummy"]);
/// assert!(args.dry_run);
/// assert_eq!(args.arguments, vec!["-R", "-d", "dummy"]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(
    version,
    about,
    term_width = 0, // Just to make testing across clap features easier
    disable_help_flag = true,
    disable_version_flag = true,
    override_usage = "jackfront [--catalog <PATH>] [--dry-run] [SERVER-OPTIONS] -d <DRIVER> [DRIVER-OPTIONS]"
)]
pub struct Args {
    /// Path to the parameter catalog YAML.
    ///
    /// If not provided, defaults to `~/.jackfront/catalog.yml`, falling back
    /// to the built-in catalog when that file does not exist.
    #[arg(long)]
    pub catalog: Option<String>,

    /// Print the command line the backend would run instead of running it.
    #[arg(long, action)]
    pub dry_run: bool,

    /// List the server options and every driver's options, then exit.
    #[arg(long, action)]
    pub list: bool,

    /// Print help.
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    /// Print version.
    #[arg(long, action = ArgAction::Version)]
    version: Option<bool>,

    /// Server options, `-d <DRIVER>`, then the driver's options.
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "ARGS"
    )]
    pub arguments: Vec<String>,
}
