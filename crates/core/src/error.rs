use log::error;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unrecognized option `{}`", .0)]
    UnrecognizedOption(String),

    #[error("Option `{}` requires a value", .0)]
    MissingOperand(String),

    #[error("Option `{}` does not take a value", .0)]
    UnexpectedOperand(String),

    #[error("Unknown driver: `{}`", .0)]
    UnknownDriver(String),

    #[error("No driver selected, use `-d <driver>` to choose one.")]
    NoDriverSelected,

    #[error("No drivers were found in the catalog. Is `{}` missing a `drivers` section?", .path)]
    NoDrivers { path: String },

    #[error("Found a non-unique driver name: `{}`", .0)]
    NonUniqueDriverName(String),

    #[error("Found a non-unique option key `{}` in the {} catalog", .key, .catalog)]
    DuplicateKey { catalog: String, key: char },

    #[error("Found a non-unique parameter name `{}` in the {} catalog", .name, .catalog)]
    DuplicateName { catalog: String, name: String },

    #[error("Option key `{}` is reserved for driver selection", .0)]
    ReservedKey(char),

    #[error("Invalid option key `{}` for parameter `{}`: keys must be a single alphanumeric character", .key, .name)]
    InvalidKey { name: String, key: char },

    #[error("Invalid value `{}` for parameter `{}`: expected {}", .value, .name, .expected)]
    InvalidValue {
        name: String,
        value: String,
        expected: String,
    },

    #[error("Default value for parameter `{}` does not match its type {}", .name, .expected)]
    DefaultTypeMismatch { name: String, expected: String },

    #[error("The server is already running.")]
    AlreadyRunning,

    #[error("The server is not running.")]
    NotRunning,

    #[error("The backend process exited with a non-success code.")]
    SubProcessExit,

    #[error("Error with backend process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("STDIO error: {}", .0)]
    Stdio(std::io::Error),
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn invalid_value(name: &str, value: &str, expected: &str) -> Self {
        let error = Self::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        };
        error!("{error}");
        error
    }

    /// Whether the error came from reading the command line rather than from
    /// the catalog or the backend.
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedOption(_)
                | Self::MissingOperand(_)
                | Self::UnexpectedOperand(_)
                | Self::UnknownDriver(_)
                | Self::NoDriverSelected
                | Self::InvalidValue { .. }
        )
    }
}
