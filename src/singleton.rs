//! Process-wide observer registry
//!
//! The registry is created on first use and lives for the rest of the
//! process. [`init`] lets the binary pick the delivery policy, but only
//! before anything else has touched the instance.

use crate::error::SingletonError;
use crate::observer::{DeliveryPolicy, SharedRegistry};
use log::debug;
use std::sync::OnceLock;

static GLOBAL: OnceLock<SharedRegistry<String>> = OnceLock::new();

/// The process-wide registry, created with the default policy on first use
pub fn global() -> &'static SharedRegistry<String> {
    GLOBAL.get_or_init(|| {
        debug!("Initializing global registry with default policy");
        SharedRegistry::new()
    })
}

/// Create the process-wide registry with `policy`
///
/// # Errors
///
/// Returns `SingletonError::AlreadyInitialized` if [`global`] or `init`
/// already created the instance.
pub fn init(policy: DeliveryPolicy) -> Result<&'static SharedRegistry<String>, SingletonError> {
    let mut created = false;
    let registry = GLOBAL.get_or_init(|| {
        created = true;
        debug!("Initializing global registry with {:?} policy", policy);
        SharedRegistry::with_policy(policy)
    });

    if created {
        Ok(registry)
    } else {
        Err(SingletonError::AlreadyInitialized)
    }
}

/// Whether the process-wide registry exists yet
pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}
