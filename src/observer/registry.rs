use crate::error::{NotifyError, ObserverError};
use crate::message::Notification;
use crate::observer::ObserverHandle;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// How a broadcast reacts when an observer returns an error
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPolicy {
    /// Stop at the first failing observer and return its error
    #[default]
    FailFast,
    /// Keep delivering to the remaining observers and report failures afterwards
    Isolate,
}

/// A failed delivery recorded under [`DeliveryPolicy::Isolate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    /// Position of the observer in registration order
    pub index: usize,
    /// Error returned by the observer
    pub error: ObserverError,
}

/// Outcome of a successful broadcast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyReport {
    /// Sequence number assigned to the broadcast
    pub sequence: u64,
    /// Number of observers that handled the notification without error
    pub delivered: usize,
    /// Failures isolated during delivery, empty under `FailFast`
    pub failures: Vec<DeliveryFailure>,
}

impl NotifyReport {
    /// Whether every attached observer handled the notification
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ordered collection of observers that receive every broadcast
///
/// Observers are notified synchronously in the order they were attached.
/// The same handle may be attached more than once, in which case it is
/// notified once per occurrence.
pub struct ObserverRegistry<M> {
    /// Attached observers in registration order
    observers: Vec<ObserverHandle<M>>,
    /// Failure handling for broadcasts
    policy: DeliveryPolicy,
    /// Sequence number of the last broadcast
    sequence: u64,
}

impl<M> Default for ObserverRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for ObserverRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .field("policy", &self.policy)
            .field("sequence", &self.sequence)
            .finish()
    }
}

impl<M> ObserverRegistry<M> {
    /// Create an empty registry with the default `FailFast` policy
    pub fn new() -> Self {
        Self::with_policy(DeliveryPolicy::default())
    }

    /// Create an empty registry with the given delivery policy
    pub fn with_policy(policy: DeliveryPolicy) -> Self {
        Self {
            observers: Vec::new(),
            policy,
            sequence: 0,
        }
    }

    /// Append an observer to the end of the notification order
    pub fn attach(&mut self, observer: ObserverHandle<M>) {
        self.observers.push(observer);
        debug!("Attached observer, {} now registered", self.observers.len());
    }

    /// Remove the first occurrence of `observer`
    ///
    /// Handles are compared by identity. Returns `false` and leaves the
    /// registry untouched when the handle is not attached.
    pub fn detach(&mut self, observer: &ObserverHandle<M>) -> bool {
        match self
            .observers
            .iter()
            .position(|attached| same_observer(attached, observer))
        {
            Some(index) => {
                self.observers.remove(index);
                debug!(
                    "Detached observer at position {}, {} remaining",
                    index,
                    self.observers.len()
                );
                true
            }
            None => {
                debug!("Detach requested for an observer that is not attached");
                false
            }
        }
    }

    /// Deliver `payload` to every attached observer in registration order
    ///
    /// # Errors
    ///
    /// Under `FailFast`, returns `NotifyError::ObserverFailed` for the first
    /// observer that fails; later observers are not called. Under `Isolate`
    /// this never fails and failures are listed in the report instead.
    pub fn notify(&mut self, payload: M) -> Result<NotifyReport, NotifyError> {
        let notification = self.next_notification(payload);
        deliver(&self.observers, self.policy, &notification)
    }

    /// Number of attached observers, counting duplicates
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observers are attached
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Whether `observer` is attached at least once
    pub fn contains(&self, observer: &ObserverHandle<M>) -> bool {
        self.observers
            .iter()
            .any(|attached| same_observer(attached, observer))
    }

    /// Detach every observer
    pub fn clear(&mut self) {
        self.observers.clear();
    }

    /// Current delivery policy
    pub fn policy(&self) -> DeliveryPolicy {
        self.policy
    }

    /// Change how subsequent broadcasts handle observer failures
    pub fn set_policy(&mut self, policy: DeliveryPolicy) {
        self.policy = policy;
    }

    /// Sequence number of the most recent broadcast, 0 before the first one
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Copy of the observer list for delivery outside a lock
    pub(crate) fn snapshot(&self) -> Vec<ObserverHandle<M>> {
        self.observers.clone()
    }

    /// Claim the next sequence number and wrap `payload`
    pub(crate) fn next_notification(&mut self, payload: M) -> Notification<M> {
        self.sequence += 1;
        Notification::new(self.sequence, payload)
    }
}

/// Identity comparison on the data pointer, ignoring vtables
fn same_observer<M>(a: &ObserverHandle<M>, b: &ObserverHandle<M>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// Run one broadcast over `observers` according to `policy`
pub(crate) fn deliver<M>(
    observers: &[ObserverHandle<M>],
    policy: DeliveryPolicy,
    notification: &Notification<M>,
) -> Result<NotifyReport, NotifyError> {
    let mut report = NotifyReport {
        sequence: notification.sequence,
        delivered: 0,
        failures: Vec::new(),
    };

    for (index, observer) in observers.iter().enumerate() {
        match observer.update(notification) {
            Ok(()) => report.delivered += 1,
            Err(error) => match policy {
                DeliveryPolicy::FailFast => {
                    return Err(NotifyError::ObserverFailed {
                        index,
                        source: error,
                    });
                }
                DeliveryPolicy::Isolate => {
                    warn!(
                        "Observer at position {} failed on notification {}: {}",
                        index, notification.sequence, error
                    );
                    report.failures.push(DeliveryFailure { index, error });
                }
            },
        }
    }

    debug!(
        "Notification {} delivered to {}/{} observers",
        notification.sequence,
        report.delivered,
        observers.len()
    );
    Ok(report)
}
