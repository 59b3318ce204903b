//! Typed, named configuration parameters.
//!
//! Every parameter is addressable by a single-character option key and by a
//! long option name. Parameters are created when a catalog is loaded and are
//! mutated in place by the phase parser as options are recognized.

use std::fmt::{Display, Formatter};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The value types a parameter can hold.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Int,
    #[serde(rename = "uint")]
    UInt,
    Char,
    String,
    Bool,
}

impl ParamType {
    /// How the option is written on the command line.
    #[must_use]
    pub fn kind(self) -> Kind {
        match self {
            ParamType::Bool => Kind::Boolean,
            _ => Kind::Valued,
        }
    }

    /// The value a parameter of this type holds when the catalog gives no default.
    #[must_use]
    pub fn zero_value(self) -> ParamValue {
        match self {
            ParamType::Int => ParamValue::Int(0),
            ParamType::UInt => ParamValue::UInt(0),
            ParamType::Char => ParamValue::Char(' '),
            ParamType::String => ParamValue::String(String::new()),
            ParamType::Bool => ParamValue::Bool(false),
        }
    }

    fn expected(self) -> &'static str {
        match self {
            ParamType::Int => "a signed 32-bit integer",
            ParamType::UInt => "an unsigned 32-bit integer",
            ParamType::Char => "a single character",
            ParamType::String => "a string",
            ParamType::Bool => "a boolean",
        }
    }
}

impl Display for ParamType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ParamType::Int => "int",
            ParamType::UInt => "uint",
            ParamType::Char => "char",
            ParamType::String => "string",
            ParamType::Bool => "bool",
        };
        formatter.write_str(name)
    }
}

/// Boolean parameters are bare flags, every other type requires an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Boolean,
    Valued,
}

/// Which control object a parameter belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    Server,
    Driver(String),
}

impl Display for Owner {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Owner::Server => formatter.write_str("server"),
            Owner::Driver(name) => write!(formatter, "driver `{name}`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Int(i32),
    UInt(u32),
    Char(char),
    String(String),
    Bool(bool),
}

impl ParamValue {
    /// Converts the textual form of a value into the given type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] when `text` is not a valid `param_type`.
    pub fn parse(param_type: ParamType, name: &str, text: &str) -> Result<Self> {
        Self::convert(param_type, text)
            .ok_or_else(|| Error::invalid_value(name, text, param_type.expected()))
    }

    /// Like [`ParamValue::parse`], without building or logging an error.
    #[must_use]
    pub fn convert(param_type: ParamType, text: &str) -> Option<Self> {
        match param_type {
            ParamType::Int => text.parse().ok().map(ParamValue::Int),
            ParamType::UInt => text.parse().ok().map(ParamValue::UInt),
            ParamType::Char => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(ParamValue::Char(c)),
                    _ => None,
                }
            }
            ParamType::String => Some(ParamValue::String(text.to_string())),
            ParamType::Bool => match text {
                "true" | "yes" | "on" | "1" => Some(ParamValue::Bool(true)),
                "false" | "no" | "off" | "0" => Some(ParamValue::Bool(false)),
                _ => None,
            },
        }
    }

    #[must_use]
    pub fn param_type(&self) -> ParamType {
        match self {
            ParamValue::Int(_) => ParamType::Int,
            ParamValue::UInt(_) => ParamType::UInt,
            ParamValue::Char(_) => ParamType::Char,
            ParamValue::String(_) => ParamType::String,
            ParamValue::Bool(_) => ParamType::Bool,
        }
    }
}

impl Display for ParamValue {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Int(i) => write!(formatter, "{i}"),
            ParamValue::UInt(u) => write!(formatter, "{u}"),
            ParamValue::Char(c) => write!(formatter, "{c}"),
            ParamValue::String(s) => formatter.write_str(s),
            ParamValue::Bool(b) => write!(formatter, "{b}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub key: char,
    pub name: String,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub owner: Owner,
    param_type: ParamType,
    value: ParamValue,
    default: ParamValue,
    is_set: bool,
}

impl Parameter {
    /// Creates a parameter holding its default value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DefaultTypeMismatch`] if `default` is not of `param_type`.
    pub fn new(
        key: char,
        name: &str,
        param_type: ParamType,
        default: Option<ParamValue>,
        owner: Owner,
    ) -> Result<Self> {
        let default = default.unwrap_or_else(|| param_type.zero_value());

        if default.param_type() != param_type {
            return Err(Error::DefaultTypeMismatch {
                name: name.to_string(),
                expected: param_type.to_string(),
            });
        }

        Ok(Self {
            key,
            name: name.to_string(),
            short_description: None,
            long_description: None,
            owner,
            param_type,
            value: default.clone(),
            default,
            is_set: false,
        })
    }

    #[must_use]
    pub fn with_descriptions(
        mut self,
        short_description: Option<String>,
        long_description: Option<String>,
    ) -> Self {
        self.short_description = short_description;
        self.long_description = long_description;
        self
    }

    #[must_use]
    pub fn param_type(&self) -> ParamType {
        self.param_type
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.param_type.kind()
    }

    #[must_use]
    pub fn value(&self) -> &ParamValue {
        &self.value
    }

    #[must_use]
    pub fn default_value(&self) -> &ParamValue {
        &self.default
    }

    /// Whether the value was assigned since the catalog was loaded or last reset.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.is_set
    }

    /// Assigns a value of the parameter's own type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if the value has a different type.
    pub fn set_value(&mut self, value: ParamValue) -> Result<()> {
        if value.param_type() != self.param_type {
            return Err(Error::invalid_value(
                &self.name,
                &value.to_string(),
                self.param_type.expected(),
            ));
        }

        debug!("{} parameter `{}` = {}", self.owner, self.name, value);
        self.value = value;
        self.is_set = true;
        Ok(())
    }

    /// Marks a Boolean parameter as present on the command line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingOperand`] if the parameter is valued.
    pub fn set_flag(&mut self) -> Result<()> {
        match self.kind() {
            Kind::Boolean => self.set_value(ParamValue::Bool(true)),
            Kind::Valued => Err(Error::MissingOperand(format!("-{}", self.key))),
        }
    }

    /// Assigns a valued parameter from its textual operand.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if the operand does not convert to the
    /// parameter's type.
    pub fn set_from_operand(&mut self, operand: &str) -> Result<()> {
        let value = ParamValue::parse(self.param_type, &self.name, operand)?;
        self.set_value(value)
    }

    /// Restores the default value and clears the set marker.
    pub fn reset(&mut self) {
        self.value = self.default.clone();
        self.is_set = false;
    }
}

impl Display for Parameter {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "-{}, --{}", self.key, self.name)?;

        if self.kind() == Kind::Valued {
            write!(formatter, " <{}>", self.param_type)?;
        }

        Ok(())
    }
}
