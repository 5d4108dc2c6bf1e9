//! The `Animal` capability and its concrete implementations
//!
//! Every animal has a name and can speak. Types that do not override
//! [`Animal::speak`] produce the generic sound.

/// Sound produced by animals that do not override [`Animal::speak`]
pub const GENERIC_SOUND: &str = "Generic animal sound";

/// Polymorphic capability shared by every animal
pub trait Animal: Send + Sync {
    /// The animal's name
    fn name(&self) -> &str;

    /// What the animal says
    fn speak(&self) -> String {
        GENERIC_SOUND.to_string()
    }
}

/// A dog with a name and a breed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dog {
    name: String,
    breed: String,
}

impl Dog {
    pub fn new(name: impl Into<String>, breed: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            breed: breed.into(),
        }
    }

    pub fn breed(&self) -> &str {
        &self.breed
    }

    pub fn bark(&self) -> &'static str {
        "Woof!"
    }
}

impl Animal for Dog {
    fn name(&self) -> &str {
        &self.name
    }

    fn speak(&self) -> String {
        self.bark().to_string()
    }
}

/// A cat, which overrides the generic sound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cat {
    name: String,
}

impl Cat {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Animal for Cat {
    fn name(&self) -> &str {
        &self.name
    }

    fn speak(&self) -> String {
        "Meow!".to_string()
    }
}

/// An animal that keeps the default sound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericAnimal {
    name: String,
}

impl GenericAnimal {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Animal for GenericAnimal {
    fn name(&self) -> &str {
        &self.name
    }
}
