//! Control targets: the objects that start, switch and stop the audio server.

use std::io::{stdout, Stdout, Write};

use itertools::Itertools;
use log::info;

use crate::error::Error::{AlreadyRunning, NotRunning, Stdio};
use crate::error::Result;
use crate::execution::BackendProcess;
use crate::parameter::{ParamValue, Parameter};
use crate::server::Server;

/// Operations the front-end invokes on the running server.
///
/// Calls are made from a single thread, in order: one `start`, any number of
/// `switch_master`, then one `stop`.
pub trait ControlTarget {
    /// Starts the server with the named driver as master.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is already running or cannot be started.
    fn start(&mut self, server: &Server, driver: &str) -> Result<()>;

    /// Replaces the master driver of the running server.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is not running or the switch fails.
    fn switch_master(&mut self, server: &Server, driver: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the server is not running or does not stop cleanly.
    fn stop(&mut self) -> Result<()>;
}

fn push_option(args: &mut Vec<String>, parameter: &Parameter) {
    match parameter.value() {
        ParamValue::Bool(true) => args.push(format!("-{}", parameter.key)),
        // an unset flag is the backend's default
        ParamValue::Bool(false) => {}
        value => {
            args.push(format!("-{}", parameter.key));
            args.push(value.to_string());
        }
    }
}

/// Renders the backend arguments for the explicitly set parameters.
///
/// Server options come first, then `-d <driver>`, then the driver's options,
/// each in catalog order.
///
/// # Errors
///
/// Returns [`crate::error::Error::UnknownDriver`] if the driver is not in the registry.
pub fn render_arguments(server: &Server, driver: &str) -> Result<Vec<String>> {
    let driver = server.drivers.get(driver)?;
    let mut args = Vec::new();

    for parameter in server.parameters.set_parameters() {
        push_option(&mut args, parameter);
    }

    args.push("-d".to_string());
    args.push(driver.name.clone());

    for parameter in driver.parameters.set_parameters() {
        push_option(&mut args, parameter);
    }

    Ok(args)
}

/// Writes what would be run instead of running it.
#[derive(Debug)]
pub struct DryRun<W: Write = Stdout> {
    running: Option<String>,
    output: W,
}

impl DryRun {
    /// A dry run reporting to standard output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_output(stdout())
    }
}

impl Default for DryRun {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> DryRun<W> {
    #[must_use]
    pub fn with_output(output: W) -> Self {
        Self {
            running: None,
            output,
        }
    }

    /// The master driver, while the server is "running".
    #[must_use]
    pub fn running(&self) -> Option<&str> {
        self.running.as_deref()
    }

    #[must_use]
    pub fn output(&self) -> &W {
        &self.output
    }

    fn describe(server: &Server, driver: &str) -> Result<String> {
        let program = server
            .command
            .as_ref()
            .map_or_else(|| server.name.clone(), |command| command.join(" "));
        let args = render_arguments(server, driver)?;
        Ok(format!("{program} {}", args.iter().join(" ")))
    }
}

impl<W: Write> ControlTarget for DryRun<W> {
    fn start(&mut self, server: &Server, driver: &str) -> Result<()> {
        if self.running.is_some() {
            return Err(AlreadyRunning);
        }

        let command_line = Self::describe(server, driver)?;
        info!("Dry run, not starting `{command_line}`");
        writeln!(self.output, "Would start: {command_line}").map_err(Stdio)?;
        self.running = Some(driver.to_string());
        Ok(())
    }

    fn switch_master(&mut self, server: &Server, driver: &str) -> Result<()> {
        if self.running.is_none() {
            return Err(NotRunning);
        }

        let command_line = Self::describe(server, driver)?;
        writeln!(self.output, "Would switch master driver: {command_line}").map_err(Stdio)?;
        self.running = Some(driver.to_string());
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let Some(driver) = self.running.take() else {
            return Err(NotRunning);
        };

        writeln!(self.output, "Would stop server running driver `{driver}`").map_err(Stdio)
    }
}

/// Picks the control target for a server.
///
/// A catalog without a backend command can only be dry-run.
#[must_use]
pub fn for_server(server: &Server, dry_run: bool) -> Box<dyn ControlTarget> {
    match &server.command {
        Some(command) if !dry_run => Box::new(BackendProcess::new(command.clone())),
        _ => Box::new(DryRun::new()),
    }
}
