use std::io;
use std::process::{Child, Command, Stdio};

use itertools::Itertools;
use log::{error, info, warn};

use crate::control::{render_arguments, ControlTarget};
use crate::error::Error::{AlreadyRunning, NotRunning};
use crate::error::{Error, Result};
use crate::server::Server;

/// Runs the audio server as a child process.
///
/// Switching the master driver restarts the child with the new driver's
/// arguments, since the backend reads its configuration at startup. If the new
/// child cannot be spawned, the previous arguments are spawned again.
#[derive(Debug)]
pub struct BackendProcess {
    /// Program followed by its fixed leading arguments.
    command: Vec<String>,
    child: Option<Child>,
    /// Rendered arguments of the running child.
    arguments: Vec<String>,
}

impl BackendProcess {
    #[must_use]
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            child: None,
            arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }

    fn spawn(&mut self, args: Vec<String>) -> Result<()> {
        let Some((program, leading)) = self.command.split_first() else {
            return Err(Error::SubProcess(io::Error::new(
                io::ErrorKind::InvalidInput,
                "empty backend command",
            )));
        };

        info!(
            "Starting backend: {} {} {}",
            program,
            leading.iter().join(" "),
            args.iter().join(" ")
        );

        // stdin stays with the interactive prompt
        let child = Command::new(program)
            .args(leading)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?;

        self.child = Some(child);
        self.arguments = args;
        Ok(())
    }

    fn terminate(child: &mut Child) -> Result<()> {
        if let Some(status) = child.try_wait()? {
            warn!("Backend already exited with {status}");
            return if status.success() {
                Ok(())
            } else {
                Err(Error::SubProcessExit)
            };
        }

        child.kill()?;
        let status = child.wait()?;
        info!("Backend stopped ({status})");
        Ok(())
    }
}

impl ControlTarget for BackendProcess {
    fn start(&mut self, server: &Server, driver: &str) -> Result<()> {
        if self.child.is_some() {
            return Err(AlreadyRunning);
        }

        self.spawn(render_arguments(server, driver)?)
    }

    fn switch_master(&mut self, server: &Server, driver: &str) -> Result<()> {
        if self.child.is_none() {
            return Err(NotRunning);
        }

        // render first so an unknown driver leaves the old backend running
        let args = render_arguments(server, driver)?;

        if let Some(mut child) = self.child.take() {
            if let Err(e) = Self::terminate(&mut child) {
                warn!("Previous backend did not stop cleanly: {e}");
            }
        }

        let previous = std::mem::take(&mut self.arguments);
        if let Err(e) = self.spawn(args) {
            warn!(
                "Could not start backend with driver `{driver}`, restoring the previous one: {e}"
            );
            if let Err(restore_error) = self.spawn(previous) {
                error!("Failed to restore the previous backend: {restore_error}");
            }
            return Err(e);
        }

        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let Some(mut child) = self.child.take() else {
            return Err(NotRunning);
        };

        Self::terminate(&mut child)
    }
}

impl Drop for BackendProcess {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = Self::terminate(&mut child) {
                warn!("Failed to stop backend on exit: {e}");
            }
        }
    }
}
