use crate::animals::{Animal, Cat, Dog};
use crate::error::FactoryError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categories the factory knows how to build
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AnimalKind {
    Dog,
    Cat,
}

impl AnimalKind {
    /// Every category the factory accepts
    pub const ALL: [AnimalKind; 2] = [AnimalKind::Dog, AnimalKind::Cat];

    /// Label accepted by [`FromStr`]
    pub fn label(self) -> &'static str {
        match self {
            AnimalKind::Dog => "dog",
            AnimalKind::Cat => "cat",
        }
    }

    /// Name given to animals built without an explicit one
    pub fn default_name(self) -> &'static str {
        match self {
            AnimalKind::Dog => "Fido",
            AnimalKind::Cat => "Whiskers",
        }
    }
}

impl fmt::Display for AnimalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a category label, ignoring case and surrounding whitespace
impl FromStr for AnimalKind {
    type Err = FactoryError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.trim().to_lowercase().as_str() {
            "dog" => Ok(AnimalKind::Dog),
            "cat" => Ok(AnimalKind::Cat),
            _ => Err(FactoryError::UnknownType(label.to_string())),
        }
    }
}

/// Builds animals from category labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalFactory {
    /// Breed assigned to every dog this factory builds
    default_breed: String,
}

impl Default for AnimalFactory {
    fn default() -> Self {
        Self::new("Mixed")
    }
}

impl AnimalFactory {
    pub fn new(default_breed: impl Into<String>) -> Self {
        Self {
            default_breed: default_breed.into(),
        }
    }

    pub fn default_breed(&self) -> &str {
        &self.default_breed
    }

    /// Build an animal of the category named by `label`
    ///
    /// # Errors
    ///
    /// Returns `FactoryError::UnknownType` if `label` names no known category.
    pub fn create(&self, label: &str, name: &str) -> Result<Box<dyn Animal>, FactoryError> {
        let kind = label.parse::<AnimalKind>()?;
        Ok(self.create_kind(kind, name))
    }

    /// Build an animal of a known category
    pub fn create_kind(&self, kind: AnimalKind, name: &str) -> Box<dyn Animal> {
        debug!("Creating {} named {}", kind, name);
        match kind {
            AnimalKind::Dog => Box::new(Dog::new(name, self.default_breed.as_str())),
            AnimalKind::Cat => Box::new(Cat::new(name)),
        }
    }
}

/// Build an animal from a label using the default factory and default names
///
/// # Example
/// ```
/// use idioms::animals::{create_animal, Animal};
///
/// assert_eq!(create_animal("dog").unwrap().speak(), "Woof!");
/// assert!(create_animal("unicorn").is_err());
/// ```
pub fn create_animal(label: &str) -> Result<Box<dyn Animal>, FactoryError> {
    let kind = label.parse::<AnimalKind>()?;
    Ok(AnimalFactory::default().create_kind(kind, kind.default_name()))
}
