use crate::animals::Animal;
use crate::error::ObserverError;
use crate::message::Notification;
use crate::observer::Observer;
use log::info;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// An animal that reacts to every broadcast by speaking
///
/// Each reaction is logged and kept in a transcript.
pub struct AnimalListener {
    animal: Box<dyn Animal>,
    transcript: Mutex<Vec<String>>,
}

impl fmt::Debug for AnimalListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimalListener")
            .field("name", &self.animal.name())
            .finish()
    }
}

impl AnimalListener {
    pub fn new(animal: Box<dyn Animal>) -> Self {
        Self {
            animal,
            transcript: Mutex::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        self.animal.name()
    }

    /// Reactions recorded so far, oldest first
    pub fn transcript(&self) -> Vec<String> {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Observer<String> for AnimalListener {
    fn update(&self, notification: &Notification<String>) -> Result<(), ObserverError> {
        let line = format!(
            "{} hears '{}' and says {}",
            self.animal.name(),
            notification.payload,
            self.animal.speak()
        );
        info!("{}", line);
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animals::{create_animal, Cat};
    use crate::observer::{ObserverHandle, ObserverRegistry};
    use std::sync::Arc;

    #[test]
    fn test_listener_reacts_with_its_sound() {
        let listener = AnimalListener::new(Box::new(Cat::new("Tom")));
        listener
            .update(&Notification::new(1, "dinner".to_string()))
            .unwrap();

        assert_eq!(listener.name(), "Tom");
        assert_eq!(listener.transcript(), vec!["Tom hears 'dinner' and says Meow!"]);
    }

    #[test]
    fn test_factory_animals_as_observers() {
        let dog = Arc::new(AnimalListener::new(create_animal("dog").unwrap()));
        let cat = Arc::new(AnimalListener::new(create_animal("cat").unwrap()));
        let dog_handle: ObserverHandle<String> = dog.clone();
        let cat_handle: ObserverHandle<String> = cat.clone();

        let mut registry = ObserverRegistry::new();
        registry.attach(dog_handle.clone());
        registry.attach(cat_handle);
        registry.notify("x".to_string()).unwrap();
        registry.detach(&dog_handle);
        registry.notify("y".to_string()).unwrap();

        assert_eq!(dog.transcript(), vec!["Fido hears 'x' and says Woof!"]);
        assert_eq!(
            cat.transcript(),
            vec![
                "Whiskers hears 'x' and says Meow!",
                "Whiskers hears 'y' and says Meow!",
            ]
        );
    }
}
