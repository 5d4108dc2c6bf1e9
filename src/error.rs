use thiserror::Error;

/// Errors that can occur when constructing animals from a category label
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    #[error("Unknown type: {0}")]
    UnknownType(String),
}

/// Errors raised by an observer while handling a notification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObserverError {
    #[error("Observer rejected notification: {0}")]
    Rejected(String),

    #[error("Failed to write notification: {0}")]
    WriteFailed(String),

    #[error("Failed to serialize notification: {0}")]
    SerializationFailed(String),
}

/// Errors that can occur while broadcasting a notification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Observer at position {index} failed: {source}")]
    ObserverFailed {
        index: usize,
        #[source]
        source: ObserverError,
    },
}

/// Errors that can occur when initializing the process-wide registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SingletonError {
    #[error("Global registry is already initialized")]
    AlreadyInitialized,
}

/// Errors that can occur during configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Invalid configuration value: {0}")]
    ValidationError(String),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}
