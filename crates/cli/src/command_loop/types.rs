//! Type definitions for the interactive command loop.

/// One parsed line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Re-parse the named driver's options and make it the master driver.
    Switch { driver: String, args: Vec<String> },
    /// Print the current server and driver parameter values.
    Show,
    /// Restore a driver's parameters to their defaults, the active driver if none is named.
    Reset { driver: Option<String> },
    Help,
    /// A blank line.
    Empty,
    /// Anything else, including `switch` without a driver name.
    Ignored(String),
}

impl Command {
    /// Splits a line on whitespace and classifies it by its first token.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.as_slice() {
            [] => Command::Empty,
            ["quit", ..] => Command::Quit,
            ["switch", driver, args @ ..] => Command::Switch {
                driver: (*driver).to_string(),
                args: args.iter().map(ToString::to_string).collect(),
            },
            ["show", ..] => Command::Show,
            ["reset"] => Command::Reset { driver: None },
            ["reset", driver, ..] => Command::Reset {
                driver: Some((*driver).to_string()),
            },
            ["help", ..] => Command::Help,
            _ => Command::Ignored(line.trim().to_string()),
        }
    }
}

/// States of the command loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}
