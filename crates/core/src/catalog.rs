//! Ordered parameter catalogs scoped to the server or to a single driver.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::Error::{DuplicateKey, DuplicateName, InvalidKey};
use crate::error::Result;
use crate::parameter::{Owner, Parameter};

/// Ordered mapping from parameter name to [`Parameter`].
///
/// Keys and names are unique within one catalog; construction fails fast
/// instead of letting a later entry shadow an earlier one.
#[derive(Debug, Clone)]
pub struct Catalog {
    parameters: IndexMap<String, Parameter>,
}

impl Catalog {
    /// Builds a catalog, keeping the order the parameters were given in.
    ///
    /// # Errors
    ///
    /// Returns an error if a key is not a single alphanumeric character, or if
    /// two parameters share a key or a name.
    pub fn new(owner: Owner, parameters: Vec<Parameter>) -> Result<Self> {
        let mut keys = HashSet::new();
        let mut ordered = IndexMap::with_capacity(parameters.len());

        for mut parameter in parameters {
            if !parameter.key.is_ascii_alphanumeric() {
                return Err(InvalidKey {
                    name: parameter.name,
                    key: parameter.key,
                });
            }

            if !keys.insert(parameter.key) {
                return Err(DuplicateKey {
                    catalog: owner.to_string(),
                    key: parameter.key,
                });
            }

            if ordered.contains_key(&parameter.name) {
                return Err(DuplicateName {
                    catalog: owner.to_string(),
                    name: parameter.name,
                });
            }

            parameter.owner = owner.clone();
            ordered.insert(parameter.name.clone(), parameter);
        }

        Ok(Self {
            parameters: ordered,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Parameter> {
        self.parameters.values_mut()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.parameters.get_mut(name)
    }

    /// Parameters that were assigned since loading, in catalog order.
    pub fn set_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.values().filter(|p| p.is_set())
    }

    /// Restores every parameter to its default.
    pub fn reset_all(&mut self) {
        self.iter_mut().for_each(Parameter::reset);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::parameter::{ParamType, ParamValue};

    fn param(key: char, name: &str, param_type: ParamType) -> Parameter {
        Parameter::new(key, name, param_type, None, Owner::Server).unwrap()
    }

    #[test]
    fn test_catalog_keeps_order() {
        let catalog = Catalog::new(
            Owner::Server,
            vec![
                param('v', "verbose", ParamType::Bool),
                param('R', "realtime", ParamType::Bool),
                param('t', "client-timeout", ParamType::Int),
            ],
        )
        .unwrap();

        let names: Vec<&str> = catalog.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["verbose", "realtime", "client-timeout"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_catalog_rejects_duplicate_key() {
        let result = Catalog::new(
            Owner::Server,
            vec![
                param('r', "realtime", ParamType::Bool),
                param('r', "rate", ParamType::UInt),
            ],
        );
        assert!(matches!(result, Err(Error::DuplicateKey { key: 'r', .. })));
    }

    #[test]
    fn test_catalog_rejects_duplicate_name() {
        let result = Catalog::new(
            Owner::Server,
            vec![
                param('r', "rate", ParamType::UInt),
                param('R', "rate", ParamType::UInt),
            ],
        );
        assert!(matches!(result, Err(Error::DuplicateName { .. })));
    }

    #[test]
    fn test_catalog_rejects_invalid_key() {
        let result = Catalog::new(Owner::Server, vec![param('-', "dash", ParamType::Bool)]);
        assert!(matches!(result, Err(Error::InvalidKey { key: '-', .. })));
    }

    #[test]
    fn test_catalog_assigns_owner() {
        let owner = Owner::Driver("dummy".to_string());
        let catalog =
            Catalog::new(owner.clone(), vec![param('p', "period", ParamType::UInt)]).unwrap();
        assert_eq!(catalog.get("period").unwrap().owner, owner);
    }

    #[test]
    fn test_set_parameters_and_reset() {
        let mut catalog = Catalog::new(
            Owner::Server,
            vec![
                param('v', "verbose", ParamType::Bool),
                param('p', "port-max", ParamType::UInt),
            ],
        )
        .unwrap();

        catalog.get_mut("port-max").unwrap().set_from_operand("512").unwrap();
        let set: Vec<&str> = catalog.set_parameters().map(|p| p.name.as_str()).collect();
        assert_eq!(set, vec!["port-max"]);

        catalog.reset_all();
        assert_eq!(catalog.set_parameters().count(), 0);
        assert_eq!(
            catalog.get("port-max").unwrap().value(),
            &ParamValue::UInt(0)
        );
    }
}
