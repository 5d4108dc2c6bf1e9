/// Error types for the crate
pub mod error;

/// Notification envelope delivered to observers
pub mod message;

/// Observer capability and registries
pub mod observer;

/// Animal capability and the category factory
pub mod animals;

/// Process-wide registry instance
pub mod singleton;

/// Configuration management
pub mod config;

// Re-export commonly used types
pub use error::{ConfigError, FactoryError, NotifyError, ObserverError, SingletonError};
pub use message::Notification;
pub use observer::{DeliveryPolicy, Observer, ObserverHandle, ObserverRegistry, SharedRegistry};
