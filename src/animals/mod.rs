/// Animal capability and concrete animals
pub mod animal;

/// Category-label factory
pub mod factory;

/// Animals attached to a registry as observers
pub mod listener;

pub use animal::{Animal, Cat, Dog, GenericAnimal};
pub use factory::{create_animal, AnimalFactory, AnimalKind};
pub use listener::AnimalListener;
