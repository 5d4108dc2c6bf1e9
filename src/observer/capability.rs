use crate::error::ObserverError;
use crate::message::Notification;
use std::sync::Arc;

/// Capability to receive broadcast notifications
///
/// Any type implementing this trait can be attached to an
/// [`ObserverRegistry`](crate::observer::ObserverRegistry).
pub trait Observer<M>: Send + Sync {
    /// Handle a single notification
    fn update(&self, notification: &Notification<M>) -> Result<(), ObserverError>;
}

/// Shared handle to an attached observer
///
/// The registry compares handles by identity, so callers keep a clone of the
/// handle they attached in order to detach it later.
pub type ObserverHandle<M> = Arc<dyn Observer<M>>;

/// Wrap an observer into a handle suitable for attaching
pub fn handle<M, O>(observer: O) -> ObserverHandle<M>
where
    O: Observer<M> + 'static,
{
    Arc::new(observer)
}

/// Closures can be attached directly
impl<M, F> Observer<M> for F
where
    F: Fn(&Notification<M>) -> Result<(), ObserverError> + Send + Sync,
{
    fn update(&self, notification: &Notification<M>) -> Result<(), ObserverError> {
        self(notification)
    }
}
