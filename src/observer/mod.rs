/// Observer capability and handle type
pub mod capability;

/// Single-owner observer registry
pub mod registry;

/// Mutex-guarded registry for multi-threaded callers
pub mod shared;

/// Stock observer implementations
pub mod observers;

pub use capability::{handle, Observer, ObserverHandle};
pub use observers::{JsonLinesObserver, LoggingObserver, RecordingObserver};
pub use registry::{DeliveryFailure, DeliveryPolicy, NotifyReport, ObserverRegistry};
pub use shared::SharedRegistry;
