use crate::error::NotifyError;
use crate::observer::registry::{deliver, DeliveryPolicy, NotifyReport, ObserverRegistry};
use crate::observer::ObserverHandle;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Observer registry that can be shared between threads
///
/// Every operation takes the internal lock. Broadcasts copy the observer list
/// under the lock and deliver after releasing it, so observers may attach or
/// detach from inside `update`; such changes apply from the next broadcast.
/// Concurrent `notify` calls are not serialized against each other, so one
/// observer may be updated from two threads at once and may see their
/// sequence numbers in either order.
#[derive(Debug)]
pub struct SharedRegistry<M> {
    inner: Mutex<ObserverRegistry<M>>,
}

impl<M> Default for SharedRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> SharedRegistry<M> {
    pub fn new() -> Self {
        Self::with_policy(DeliveryPolicy::default())
    }

    pub fn with_policy(policy: DeliveryPolicy) -> Self {
        Self {
            inner: Mutex::new(ObserverRegistry::with_policy(policy)),
        }
    }

    /// See [`ObserverRegistry::attach`]
    pub fn attach(&self, observer: ObserverHandle<M>) {
        self.lock().attach(observer);
    }

    /// See [`ObserverRegistry::detach`]
    pub fn detach(&self, observer: &ObserverHandle<M>) -> bool {
        self.lock().detach(observer)
    }

    /// See [`ObserverRegistry::notify`]
    pub fn notify(&self, payload: M) -> Result<NotifyReport, NotifyError> {
        let (observers, policy, notification) = {
            let mut registry = self.lock();
            let notification = registry.next_notification(payload);
            (registry.snapshot(), registry.policy(), notification)
        };
        deliver(&observers, policy, &notification)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, observer: &ObserverHandle<M>) -> bool {
        self.lock().contains(observer)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn policy(&self) -> DeliveryPolicy {
        self.lock().policy()
    }

    pub fn set_policy(&self, policy: DeliveryPolicy) {
        self.lock().set_policy(policy);
    }

    // The registry holds no state a panicking observer could leave half-updated.
    fn lock(&self) -> MutexGuard<'_, ObserverRegistry<M>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<M> From<ObserverRegistry<M>> for SharedRegistry<M> {
    fn from(registry: ObserverRegistry<M>) -> Self {
        Self {
            inner: Mutex::new(registry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ObserverError;
    use crate::message::Notification;
    use crate::observer::{handle, RecordingObserver};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_shared_registry_basic_flow() {
        let registry: SharedRegistry<String> = SharedRegistry::new();
        let a = Arc::new(RecordingObserver::<String>::new());
        let b = Arc::new(RecordingObserver::<String>::new());
        let a_handle: ObserverHandle<String> = a.clone();
        let b_handle: ObserverHandle<String> = b.clone();

        registry.attach(a_handle.clone());
        registry.attach(b_handle);
        registry.notify("x".to_string()).unwrap();
        assert!(registry.detach(&a_handle));
        registry.notify("y".to_string()).unwrap();

        assert_eq!(a.received(), vec!["x".to_string()]);
        assert_eq!(b.received(), vec!["x".to_string(), "y".to_string()]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_attach() {
        let registry: Arc<SharedRegistry<u32>> = Arc::new(SharedRegistry::new());
        let recorder = Arc::new(RecordingObserver::<u32>::new());

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let recorder = Arc::clone(&recorder);
                thread::spawn(move || {
                    for _ in 0..10 {
                        let erased: ObserverHandle<u32> = recorder.clone();
                        registry.attach(erased);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(registry.len(), 80);
        let report = registry.notify(1).unwrap();
        assert_eq!(report.delivered, 80);
        assert_eq!(recorder.count(), 80);
    }

    #[test]
    fn test_concurrent_notify_reaches_observer_from_both_threads() {
        let registry: Arc<SharedRegistry<u32>> = Arc::new(SharedRegistry::new());
        let sequences = Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen = Arc::clone(&sequences);
        registry.attach(handle(
            move |n: &Notification<u32>| -> Result<(), ObserverError> {
                seen.lock().unwrap().push(n.sequence);
                Ok(())
            },
        ));

        let workers: Vec<_> = (0..2)
            .map(|payload| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.notify(payload).unwrap().sequence)
            })
            .collect();
        let mut assigned: Vec<u64> = workers.into_iter().map(|w| w.join().unwrap()).collect();
        assigned.sort_unstable();

        let mut received = sequences.lock().unwrap().clone();
        received.sort_unstable();
        assert_eq!(assigned, vec![1, 2]);
        assert_eq!(received, vec![1, 2]);
    }

    #[test]
    fn test_attach_during_notify_applies_next_time() {
        let registry: Arc<SharedRegistry<String>> = Arc::new(SharedRegistry::new());
        let late = Arc::new(RecordingObserver::<String>::new());

        let registry_for_observer = Arc::clone(&registry);
        let late_for_observer = Arc::clone(&late);
        registry.attach(handle(
            move |n: &Notification<String>| -> Result<(), ObserverError> {
                if n.sequence == 1 {
                    let erased: ObserverHandle<String> = late_for_observer.clone();
                    registry_for_observer.attach(erased);
                }
                Ok(())
            },
        ));

        let first = registry.notify("one".to_string()).unwrap();
        assert_eq!(first.delivered, 1);
        assert!(late.received().is_empty());

        let second = registry.notify("two".to_string()).unwrap();
        assert_eq!(second.delivered, 2);
        assert_eq!(late.received(), vec!["two".to_string()]);
    }

    #[test]
    fn test_from_registry_keeps_policy() {
        let registry: SharedRegistry<u8> =
            ObserverRegistry::with_policy(DeliveryPolicy::Isolate).into();
        assert_eq!(registry.policy(), DeliveryPolicy::Isolate);

        registry.set_policy(DeliveryPolicy::FailFast);
        assert_eq!(registry.policy(), DeliveryPolicy::FailFast);
        assert!(registry.is_empty());
    }
}
