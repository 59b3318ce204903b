//! Two-phase argument parsing.
//!
//! The server phase applies server options until `-d <driver>` selects a
//! driver. The driver phase applies the selected driver's options to the
//! remaining arguments. The same driver phase is re-entered by the command
//! loop when the live driver is switched.

use itertools::Itertools;
use log::{debug, warn};

use crate::catalog::Catalog;
use crate::error::Error::{MissingOperand, NoDriverSelected, UnrecognizedOption};
use crate::error::Result;
use crate::grammar::{OptionGrammar, Target};
use crate::parameter::Kind;
use crate::scanner::{scan, ScannedOption};
use crate::server::{Driver, DriverRegistry, Server};

/// Which catalog a phase parses, and what `-d` means in it.
#[derive(Debug, Clone, Copy)]
pub enum Phase<'r> {
    /// `-d` resolves a driver in the registry and ends the phase.
    Server(&'r DriverRegistry),
    /// `-d` is accepted and ignored, unless the driver owns the key.
    Driver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseOutcome<'a> {
    /// Name of the selected driver. Only ever set in the server phase.
    pub driver: Option<String>,
    pub remaining: &'a [String],
}

/// Runs one parse phase over `argv`, mutating the catalog's parameters in place.
///
/// Options are applied in the order the scanner returns them. Parameter values
/// assigned before an error are kept.
///
/// # Errors
///
/// Returns an error on an unknown option, a missing or invalid operand, or a
/// driver name that is not in the registry.
pub fn parse_phase<'a>(
    catalog: &mut Catalog,
    argv: &'a [String],
    phase: Phase<'_>,
) -> Result<PhaseOutcome<'a>> {
    let strict = matches!(phase, Phase::Server(_));
    let grammar = OptionGrammar::from_catalog(catalog).with_driver_select(strict)?;

    let mut remaining = argv;
    let mut driver = None;

    while driver.is_none() {
        let batch = scan(remaining, &grammar)?;
        remaining = batch.remaining;

        if batch.options.is_empty() {
            break;
        }

        for option in batch.options {
            match &option.target {
                Target::DriverSelect => {
                    if let Phase::Server(drivers) = phase {
                        let name = option.operand.as_deref().unwrap_or_default();
                        driver = Some(drivers.get(name)?.name.clone());
                        debug!("Selected driver `{name}`");
                    } else {
                        debug!("Ignoring `{}` in driver options", option.spelling);
                    }
                }
                Target::Parameter(name) => apply_option(catalog, name, &option)?,
            }
        }
    }

    Ok(PhaseOutcome { driver, remaining })
}

fn apply_option(catalog: &mut Catalog, name: &str, option: &ScannedOption) -> Result<()> {
    let Some(parameter) = catalog.get_mut(name) else {
        return Err(UnrecognizedOption(option.spelling.clone()));
    };

    match parameter.kind() {
        Kind::Boolean => parameter.set_flag(),
        Kind::Valued => match &option.operand {
            Some(operand) => parameter.set_from_operand(operand),
            None => Err(MissingOperand(option.spelling.clone())),
        },
    }
}

/// Parses server options up to and including `-d <driver>`.
///
/// Returns the selected driver's name and the arguments that follow it.
///
/// # Errors
///
/// Returns [`NoDriverSelected`] when the arguments never select a driver, and
/// any error of [`parse_phase`].
pub fn parse_server_args<'a>(
    server: &mut Server,
    argv: &'a [String],
) -> Result<(String, &'a [String])> {
    let outcome = parse_phase(&mut server.parameters, argv, Phase::Server(&server.drivers))?;

    match outcome.driver {
        Some(driver) => Ok((driver, outcome.remaining)),
        None => Err(NoDriverSelected),
    }
}

/// Parses a driver's options and returns the unconsumed tail.
///
/// # Errors
///
/// Returns any error of [`parse_phase`].
pub fn parse_driver_args<'a>(driver: &mut Driver, argv: &'a [String]) -> Result<&'a [String]> {
    let outcome = parse_phase(&mut driver.parameters, argv, Phase::Driver)?;
    Ok(outcome.remaining)
}

/// Logs arguments that no phase consumed.
pub fn warn_unconsumed(remaining: &[String]) {
    if !remaining.is_empty() {
        warn!("Ignoring unused arguments: {}", remaining.iter().join(" "));
    }
}

/// Runs the server phase and then the driver phase over the process arguments.
///
/// Returns the name of the selected driver.
///
/// # Errors
///
/// Returns the first error of either phase.
pub fn parse_command_line(server: &mut Server, argv: &[String]) -> Result<String> {
    let (driver_name, rest) = parse_server_args(server, argv)?;
    let driver = server.drivers.get_mut(&driver_name)?;
    let rest = parse_driver_args(driver, rest)?;
    warn_unconsumed(rest);

    Ok(driver_name)
}
