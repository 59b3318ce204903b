//! Interactive command loop.
//!
//! Once the server is started, lines are read from the terminal and
//! dispatched until `quit` or end of input:
//!
//! - `quit` leaves the loop
//! - `switch <driver> [options...]` parses the driver's options and makes it
//!   the master driver
//! - `show` prints the current parameter values
//! - `reset [driver]` restores a driver's parameters to their defaults
//! - `help` lists the commands and drivers
//!
//! Anything else is ignored. A failed command is reported and the loop keeps
//! running with the previous driver. The server is stopped exactly once, after
//! the loop exits.

pub mod input;
pub mod types;

use std::io::{BufRead, Write};

use itertools::Itertools;
use log::{debug, error, info};

use jackfront_core::control::ControlTarget;
use jackfront_core::error::{Error, Result};
use jackfront_core::phase::{parse_driver_args, warn_unconsumed};
use jackfront_core::server::Server;

use crate::listing::write_parameter_values;

pub use input::read_command;
pub use types::{Command, LoopState};

/// Message printed once the loop has exited, before the server is stopped.
pub const SHUTDOWN_MESSAGE: &str = "shutting down";

/// A running server together with its control target.
pub struct Session<'a, T: ControlTarget + ?Sized> {
    server: &'a mut Server,
    target: &'a mut T,
    active_driver: String,
}

impl<'a, T: ControlTarget + ?Sized> Session<'a, T> {
    /// Wraps a server whose target was already started with `active_driver`.
    pub fn new(server: &'a mut Server, target: &'a mut T, active_driver: String) -> Self {
        Self {
            server,
            target,
            active_driver,
        }
    }

    #[must_use]
    pub fn active_driver(&self) -> &str {
        &self.active_driver
    }

    /// Carries out one command.
    ///
    /// Command failures are written to `output` and leave the loop running.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Stdio`] only if `output` cannot be written.
    pub fn dispatch<W: Write>(&mut self, command: Command, output: &mut W) -> Result<LoopState> {
        match command {
            Command::Quit => return Ok(LoopState::Terminated),
            Command::Switch { driver, args } => {
                if let Err(e) = self.switch(&driver, &args) {
                    error!("Switch to `{driver}` failed: {e}");
                    writeln!(output, "{e}").map_err(Error::Stdio)?;
                }
            }
            Command::Show => self.show(output).map_err(Error::Stdio)?,
            Command::Reset { driver } => {
                if let Err(e) = self.reset(driver.as_deref()) {
                    writeln!(output, "{e}").map_err(Error::Stdio)?;
                }
            }
            Command::Help => self.help(output).map_err(Error::Stdio)?,
            Command::Empty => {}
            Command::Ignored(line) => debug!("Ignoring `{line}`"),
        }

        Ok(LoopState::Running)
    }

    fn switch(&mut self, driver_name: &str, args: &[String]) -> Result<()> {
        let driver = self.server.drivers.get_mut(driver_name)?;
        let rest = parse_driver_args(driver, args)?;
        warn_unconsumed(rest);

        self.target.switch_master(self.server, driver_name)?;
        info!(
            "Master driver switched from `{}` to `{driver_name}`",
            self.active_driver
        );
        self.active_driver = driver_name.to_string();
        Ok(())
    }

    /// Values take effect at the next switch to that driver.
    fn reset(&mut self, driver_name: Option<&str>) -> Result<()> {
        let name = driver_name.unwrap_or(&self.active_driver);
        self.server.drivers.get_mut(name)?.parameters.reset_all();
        info!("Parameters of driver `{name}` reset to their defaults");
        Ok(())
    }

    fn show<W: Write>(&self, output: &mut W) -> std::io::Result<()> {
        write_parameter_values(output, "server", &self.server.parameters)?;
        if let Ok(driver) = self.server.drivers.get(&self.active_driver) {
            write_parameter_values(
                output,
                &format!("driver `{}` (active)", driver.name),
                &driver.parameters,
            )?;
        }
        Ok(())
    }

    fn help<W: Write>(&self, output: &mut W) -> std::io::Result<()> {
        writeln!(output, "Commands:")?;
        writeln!(output, "  switch <driver> [options...]  make <driver> the master driver")?;
        writeln!(output, "  show                          print the current parameter values")?;
        writeln!(output, "  reset [driver]                restore a driver's defaults")?;
        writeln!(output, "  help                          print this message")?;
        writeln!(output, "  quit                          stop the server and exit")?;
        writeln!(
            output,
            "Drivers: {}",
            self.server.drivers.names().join(", ")
        )
    }

    /// Reads and dispatches commands until `quit` or end of input, then stops
    /// the target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Stdio`] if the terminal fails, after the target has
    /// been stopped, or the error from stopping the target.
    pub fn run<R: BufRead, W: Write>(mut self, mut input: R, mut output: W) -> Result<()> {
        let mut state = LoopState::Running;
        let mut failure = None;

        while state == LoopState::Running {
            let step = read_command(&mut input, &mut output).and_then(|command| match command {
                Some(command) => self.dispatch(command, &mut output),
                None => {
                    debug!("End of input");
                    Ok(LoopState::Terminated)
                }
            });

            match step {
                Ok(next) => state = next,
                Err(e) => {
                    failure = Some(e);
                    state = LoopState::Terminated;
                }
            }
        }

        if let Err(e) = writeln!(output, "\n{SHUTDOWN_MESSAGE}") {
            failure.get_or_insert(Error::Stdio(e));
        }

        let stopped = self.target.stop();
        match failure {
            Some(e) => {
                if let Err(stop_error) = stopped {
                    error!("Failed to stop server: {stop_error}");
                }
                Err(e)
            }
            None => stopped,
        }
    }
}
