use std::io::{stdin, stdout};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use jackfront_cli::cli_args::Args;
use jackfront_cli::command_loop::Session;
use jackfront_cli::listing::write_catalog_help;
use jackfront_core::error::{Error, Result};
use jackfront_core::{config, control, file_handling, phase};

fn execute() -> Result<()> {
    let args = Args::parse();

    let catalog_path = config::get_catalog_path(args.catalog.as_deref());
    debug!("Catalog path: `{}`", catalog_path);
    let mut server = file_handling::load_catalog_or_builtin(&catalog_path, args.catalog.is_some())?;

    if args.list {
        return write_catalog_help(&mut stdout().lock(), &server).map_err(Error::Stdio);
    }

    let driver = phase::parse_command_line(&mut server, &args.arguments)?;

    let mut target = control::for_server(&server, args.dry_run);
    target.start(&server, &driver)?;
    info!("Server `{}` started with driver `{}`", server.name, driver);

    Session::new(&mut server, target.as_mut(), driver).run(stdin().lock(), stdout())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            if e.is_usage_error() {
                eprintln!("Run `jackfront --list` to see the available options and drivers.");
            }
            ExitCode::FAILURE
        }
    }
}
