//! Stock observer implementations
//!
//! These cover the common needs of callers and tests: recording what was
//! received, logging it, or streaming it out as JSON lines.

use crate::error::ObserverError;
use crate::message::Notification;
use crate::observer::Observer;
use log::info;
use serde::Serialize;
use std::fmt::Debug;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Observer that keeps every payload it receives, in arrival order
///
/// A recorder built with [`RecordingObserver::failing`] rejects every
/// notification instead; it still records the attempt.
#[derive(Debug)]
pub struct RecordingObserver<M> {
    received: Arc<Mutex<Vec<M>>>,
    failure: Option<String>,
}

impl<M> Default for RecordingObserver<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> RecordingObserver<M> {
    /// Create a recorder that accepts every notification
    pub fn new() -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    /// Create a recorder that rejects every notification with `reason`
    pub fn failing(reason: &str) -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            failure: Some(reason.to_string()),
        }
    }

    /// Number of notifications seen so far
    pub fn count(&self) -> usize {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<M: Clone> RecordingObserver<M> {
    /// Payloads received so far
    pub fn received(&self) -> Vec<M> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<M: Clone + Send> Observer<M> for RecordingObserver<M> {
    fn update(&self, notification: &Notification<M>) -> Result<(), ObserverError> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.payload.clone());

        match &self.failure {
            Some(reason) => Err(ObserverError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}

/// Observer that writes each notification to the log at info level
#[derive(Debug, Clone)]
pub struct LoggingObserver {
    label: String,
}

impl LoggingObserver {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<M: Debug> Observer<M> for LoggingObserver {
    fn update(&self, notification: &Notification<M>) -> Result<(), ObserverError> {
        info!(
            "[{}] #{} {:?}",
            self.label, notification.sequence, notification.payload
        );
        Ok(())
    }
}

/// Observer that streams notifications as newline-delimited JSON
pub struct JsonLinesObserver<W> {
    writer: Mutex<W>,
}

impl<W: Write> JsonLinesObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<M, W> Observer<M> for JsonLinesObserver<W>
where
    M: Serialize,
    W: Write + Send,
{
    fn update(&self, notification: &Notification<M>) -> Result<(), ObserverError> {
        let line = serde_json::to_string(notification)
            .map_err(|e| ObserverError::SerializationFailed(e.to_string()))?;

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{}", line).map_err(|e| ObserverError::WriteFailed(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| ObserverError::WriteFailed(e.to_string()))
    }
}
