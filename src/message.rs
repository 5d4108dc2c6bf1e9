//! Notification envelope delivered to observers
//!
//! Every broadcast wraps its payload into a [`Notification`] carrying the
//! registry's sequence number and the time the broadcast started.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp type for consistent time handling across the crate
pub type Timestamp = DateTime<Utc>;

/// A single broadcast as seen by an observer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification<M> {
    /// Position of this broadcast in the registry's history, starting at 1
    pub sequence: u64,
    /// When the broadcast started
    pub timestamp: Timestamp,
    /// The message being delivered
    pub payload: M,
}

impl<M> Notification<M> {
    /// Create a notification stamped with the current time
    pub fn new(sequence: u64, payload: M) -> Self {
        Self::at(sequence, Utc::now(), payload)
    }

    /// Create a notification with an explicit timestamp
    pub fn at(sequence: u64, timestamp: Timestamp, payload: M) -> Self {
        Self {
            sequence,
            timestamp,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_serialization() {
        let notification = Notification::new(3, "hello".to_string());

        let json = serde_json::to_string(&notification).unwrap();
        let deserialized: Notification<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(notification, deserialized);
    }

    #[test]
    fn test_notification_json_shape() {
        let timestamp = "2024-01-02T03:04:05Z".parse::<Timestamp>().unwrap();
        let notification = Notification::at(1, timestamp, 42u32);

        let value = serde_json::to_value(&notification).unwrap();
        assert_eq!(value["sequence"], 1);
        assert_eq!(value["payload"], 42);
        assert_eq!(value["timestamp"], "2024-01-02T03:04:05Z");
    }
}
