//! The server context: server catalog plus the registry of drivers.
//!
//! This is the one object the phase parser and the command loop share. It is
//! passed explicitly so parsing can be exercised in isolation.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;

use crate::catalog::Catalog;
use crate::error::Error::{NonUniqueDriverName, UnknownDriver};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Driver {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Catalog,
}

impl Display for Driver {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(desc) => write!(formatter, "{} ({})", self.name, desc),
            None => formatter.write_str(&self.name),
        }
    }
}

/// Drivers by name, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct DriverRegistry {
    drivers: IndexMap<String, Driver>,
}

impl DriverRegistry {
    /// # Errors
    ///
    /// Returns [`NonUniqueDriverName`] if two drivers share a name.
    pub fn new(drivers: Vec<Driver>) -> Result<Self> {
        let mut registry = IndexMap::with_capacity(drivers.len());

        for driver in drivers {
            if registry.contains_key(&driver.name) {
                return Err(NonUniqueDriverName(driver.name));
            }
            registry.insert(driver.name.clone(), driver);
        }

        Ok(Self { drivers: registry })
    }

    /// Looks a driver up by name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownDriver`] if no driver has that name. Callers decide
    /// whether that is fatal.
    pub fn get(&self, name: &str) -> Result<&Driver> {
        self.drivers
            .get(name)
            .ok_or_else(|| UnknownDriver(name.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`UnknownDriver`] if no driver has that name.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Driver> {
        self.drivers
            .get_mut(name)
            .ok_or_else(|| UnknownDriver(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.drivers.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Driver> {
        self.drivers.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Server {
    pub name: String,
    /// Backend program and its fixed leading arguments, if the catalog names one.
    pub command: Option<Vec<String>>,
    pub parameters: Catalog,
    pub drivers: DriverRegistry,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::parameter::Owner;

    fn driver(name: &str) -> Driver {
        Driver {
            name: name.to_string(),
            description: None,
            parameters: Catalog::new(Owner::Driver(name.to_string()), vec![]).unwrap(),
        }
    }

    #[test]
    fn test_registry_lookup() {
        let registry = DriverRegistry::new(vec![driver("dummy"), driver("alsa")]).unwrap();
        assert_eq!(registry.get("alsa").unwrap().name, "alsa");
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["dummy", "alsa"]);
    }

    #[test]
    fn test_registry_missing_driver() {
        let mut registry = DriverRegistry::new(vec![driver("dummy")]).unwrap();
        assert!(matches!(registry.get("oss"), Err(Error::UnknownDriver(name)) if name == "oss"));
        assert!(registry.get_mut("oss").is_err());
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let result = DriverRegistry::new(vec![driver("dummy"), driver("dummy")]);
        assert!(matches!(result, Err(Error::NonUniqueDriverName(_))));
    }

    #[test]
    fn test_driver_display() {
        let mut d = driver("dummy");
        assert_eq!(d.to_string(), "dummy");
        d.description = Some("Timer based backend".to_string());
        assert_eq!(d.to_string(), "dummy (Timer based backend)");
    }
}
