//! Option grammars derived from parameter catalogs.
//!
//! A grammar is rebuilt every time a catalog is parsed. It owns copies of the
//! keys and names it needs, so later changes to parameter values never
//! invalidate it.

use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::error::Error::{DuplicateName, ReservedKey};
use crate::error::Result;
use crate::parameter::Kind;

/// Short option used to select a driver.
pub const DRIVER_SELECT_KEY: char = 'd';
/// Long option used to select a driver.
pub const DRIVER_SELECT_NAME: &str = "driver";

/// What a recognized option acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A catalog parameter, by name.
    Parameter(String),
    DriverSelect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub key: char,
    pub name: String,
    pub takes_value: bool,
    pub target: Target,
}

#[derive(Debug, Clone, Default)]
pub struct OptionGrammar {
    short_spec: String,
    long_spec: Vec<String>,
    options: Vec<OptionSpec>,
    by_key: HashMap<char, usize>,
    by_name: HashMap<String, usize>,
}

impl OptionGrammar {
    /// Derives the grammar for a catalog, in catalog order.
    ///
    /// Catalogs guarantee unique keys and names, so every parameter is
    /// reachable through exactly one short and one long option.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut grammar = Self::default();

        for parameter in catalog.iter() {
            grammar.push(OptionSpec {
                key: parameter.key,
                name: parameter.name.clone(),
                takes_value: parameter.kind() == Kind::Valued,
                target: Target::Parameter(parameter.name.clone()),
            });
        }

        grammar
    }

    /// Adds the reserved driver-selection option.
    ///
    /// With `strict`, a catalog entry already using the reserved key or name
    /// is an error. Otherwise the catalog entry keeps it and the reserved
    /// option is only reachable through whichever form is still free.
    ///
    /// # Errors
    ///
    /// Returns [`ReservedKey`] or [`DuplicateName`] on a clash in strict mode.
    pub fn with_driver_select(mut self, strict: bool) -> Result<Self> {
        let key_taken = self.by_key.contains_key(&DRIVER_SELECT_KEY);
        let name_taken = self.by_name.contains_key(DRIVER_SELECT_NAME);

        if strict && key_taken {
            return Err(ReservedKey(DRIVER_SELECT_KEY));
        }

        if strict && name_taken {
            return Err(DuplicateName {
                catalog: "server".to_string(),
                name: DRIVER_SELECT_NAME.to_string(),
            });
        }

        let index = self.options.len();
        self.options.push(OptionSpec {
            key: DRIVER_SELECT_KEY,
            name: DRIVER_SELECT_NAME.to_string(),
            takes_value: true,
            target: Target::DriverSelect,
        });

        if !key_taken {
            self.short_spec.push(DRIVER_SELECT_KEY);
            self.short_spec.push(':');
            self.by_key.insert(DRIVER_SELECT_KEY, index);
        }

        if !name_taken {
            self.long_spec.push(format!("{DRIVER_SELECT_NAME}="));
            self.by_name.insert(DRIVER_SELECT_NAME.to_string(), index);
        }

        Ok(self)
    }

    fn push(&mut self, spec: OptionSpec) {
        self.short_spec.push(spec.key);
        if spec.takes_value {
            self.short_spec.push(':');
            self.long_spec.push(format!("{}=", spec.name));
        } else {
            self.long_spec.push(spec.name.clone());
        }

        let index = self.options.len();
        self.by_key.insert(spec.key, index);
        self.by_name.insert(spec.name.clone(), index);
        self.options.push(spec);
    }

    /// getopt-style short option string, `:` marking a required value.
    #[must_use]
    pub fn short_spec(&self) -> &str {
        &self.short_spec
    }

    /// Long option names, `=` marking a required value.
    #[must_use]
    pub fn long_spec(&self) -> &[String] {
        &self.long_spec
    }

    #[must_use]
    pub fn lookup_short(&self, key: char) -> Option<&OptionSpec> {
        self.by_key.get(&key).map(|&index| &self.options[index])
    }

    #[must_use]
    pub fn lookup_long(&self, name: &str) -> Option<&OptionSpec> {
        self.by_name.get(name).map(|&index| &self.options[index])
    }

    /// Name of the parameter bound to a short option key.
    #[must_use]
    pub fn parameter_for(&self, key: char) -> Option<&str> {
        match &self.lookup_short(key)?.target {
            Target::Parameter(name) => Some(name),
            Target::DriverSelect => None,
        }
    }
}
