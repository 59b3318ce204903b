use std::fmt::{Display, Formatter};

use serde::Deserialize;
use serde_yaml::Value;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::parameter::{Owner, ParamType, ParamValue, Parameter};
use crate::server::{Driver, DriverRegistry, Server};

#[derive(Deserialize, Debug, Clone)]
pub struct ParameterDefinition {
    pub key: char,
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub default: Option<Value>,
    pub description: Option<String>,
    pub long_description: Option<String>,
}

impl Display for ParameterDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "`{}` (-{})", self.name, self.key)
    }
}

impl ParameterDefinition {
    fn default_value(&self) -> Result<Option<ParamValue>> {
        let Some(default) = &self.default else {
            return Ok(None);
        };

        let mismatch = || Error::DefaultTypeMismatch {
            name: self.name.clone(),
            expected: self.param_type.to_string(),
        };

        let text = match default {
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            _ => return Err(mismatch()),
        };

        ParamValue::convert(self.param_type, &text)
            .map(Some)
            .ok_or_else(mismatch)
    }

    /// Builds the runtime parameter for the given owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the default does not convert to the declared type.
    pub fn to_parameter(&self, owner: &Owner) -> Result<Parameter> {
        let parameter = Parameter::new(
            self.key,
            &self.name,
            self.param_type,
            self.default_value()?,
            owner.clone(),
        )?;

        Ok(parameter.with_descriptions(self.description.clone(), self.long_description.clone()))
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct DriverDefinition {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
}

impl Display for DriverDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.name)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct CatalogDefinition {
    pub name: Option<String>,
    pub command: Option<Vec<String>>,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
    #[serde(default)]
    pub drivers: Vec<DriverDefinition>,
}

fn build_catalog(owner: Owner, definitions: &[ParameterDefinition]) -> Result<Catalog> {
    let parameters = definitions
        .iter()
        .map(|definition| definition.to_parameter(&owner))
        .collect::<Result<Vec<_>>>()?;

    Catalog::new(owner, parameters)
}

impl CatalogDefinition {
    /// Turns the parsed definition into the server context used at runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if any catalog has duplicate or invalid keys, a default
    /// has the wrong type, or two drivers share a name.
    pub fn into_server(self, default_name: &str) -> Result<Server> {
        let parameters = build_catalog(Owner::Server, &self.parameters)?;

        let drivers = self
            .drivers
            .iter()
            .map(|definition| {
                Ok(Driver {
                    name: definition.name.clone(),
                    description: definition.description.clone(),
                    parameters: build_catalog(
                        Owner::Driver(definition.name.clone()),
                        &definition.parameters,
                    )?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Server {
            name: self.name.unwrap_or_else(|| default_name.to_string()),
            command: self.command.filter(|command| !command.is_empty()),
            parameters,
            drivers: DriverRegistry::new(drivers)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> CatalogDefinition {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_into_server() {
        let definition = parse(
            r#"
name: studio
command: ["jackd", "--silent"]
parameters:
  - key: "R"
    name: realtime
    type: bool
  - key: "t"
    name: client-timeout
    type: int
    default: 500
drivers:
  - name: dummy
    description: Timer based backend
    parameters:
      - key: "p"
        name: period
        type: uint
        default: 1024
"#,
        );

        let server = definition.into_server("default").unwrap();
        assert_eq!(server.name, "studio");
        assert_eq!(
            server.command,
            Some(vec!["jackd".to_string(), "--silent".to_string()])
        );
        assert_eq!(server.parameters.len(), 2);
        assert_eq!(
            server.parameters.get("client-timeout").unwrap().value(),
            &ParamValue::Int(500)
        );

        let dummy = server.drivers.get("dummy").unwrap();
        assert_eq!(
            dummy.parameters.get("period").unwrap().value(),
            &ParamValue::UInt(1024)
        );
        assert_eq!(
            dummy.parameters.get("period").unwrap().owner,
            Owner::Driver("dummy".to_string())
        );
    }

    #[test]
    fn test_default_name_and_empty_command() {
        let definition = parse("command: []\ndrivers:\n  - name: dummy\n");
        let server = definition.into_server("default").unwrap();
        assert_eq!(server.name, "default");
        assert!(server.command.is_none());
    }

    #[test]
    fn test_default_type_mismatch() {
        let definition = parse(
            r#"
parameters:
  - key: "p"
    name: port-max
    type: uint
    default: lots
"#,
        );
        let result = definition.into_server("default");
        assert!(matches!(result, Err(Error::DefaultTypeMismatch { .. })));
    }

    #[test]
    fn test_non_scalar_default_is_rejected() {
        let definition = parse(
            r#"
parameters:
  - key: "n"
    name: name
    type: string
    default: [a, b]
"#,
        );
        let result = definition.into_server("default");
        assert!(matches!(
            result,
            Err(Error::DefaultTypeMismatch { name, .. }) if name == "name"
        ));
    }

    #[test]
    fn test_null_default_uses_zero_value() {
        let definition = parse(
            r#"
parameters:
  - key: "n"
    name: name
    type: string
    default: ~
"#,
        );
        let server = definition.into_server("default").unwrap();
        assert_eq!(
            server.parameters.get("name").unwrap().value(),
            &ParamValue::String(String::new())
        );
    }

    #[test]
    fn test_char_default() {
        let definition = parse(
            r#"
parameters:
  - key: "c"
    name: clock-source
    type: char
    default: s
"#,
        );
        let server = definition.into_server("default").unwrap();
        assert_eq!(
            server.parameters.get("clock-source").unwrap().value(),
            &ParamValue::Char('s')
        );
    }
}
