//! File-backed audit event log.
//!
//! Events live in a single JSON array file, rewritten whole under a mutex.
//! On the search path the log is write-only and best-effort: use
//! [`AuditLog::record_detached`], which never blocks or fails the request.

pub mod error;


pub use error::AuditError;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

/// One structured audit event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: String,
    pub device: String,
    pub action: String,
    #[serde(default)]
    pub details: Value,
    pub time: String,
}

impl AuditEvent {
    pub fn new<D: Into<String>, A: Into<String>>(device: D, action: A, details: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            device: device.into(),
            action: action.into(),
            details,
            time: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

struct AuditLogInner {
    path: PathBuf,
    lock: Mutex<()>,
}

/// Handle to the audit log file. Cheap to clone.
#[derive(Clone)]
pub struct AuditLog {
    inner: Arc<AuditLogInner>,
}

impl AuditLog {
    /// Opens (creating if needed) the audit log at `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Result<Self, AuditError> {
        let path = path.into();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        if !path.exists() {
            fs::write(&path, "[]")?;
        }

        Ok(Self {
            inner: Arc::new(AuditLogInner {
                path,
                lock: Mutex::new(()),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Appends one event (whole-file read-modify-write).
    pub fn record(&self, event: AuditEvent) -> Result<(), AuditError> {
        let _guard = self
            .inner
            .lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut events = self.read_events()?;
        events.push(event);
        fs::write(&self.inner.path, serde_json::to_vec_pretty(&events)?)?;

        Ok(())
    }

    /// Returns all recorded events, oldest first.
    pub fn entries(&self) -> Result<Vec<AuditEvent>, AuditError> {
        let _guard = self
            .inner
            .lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        self.read_events()
    }

    /// Fire-and-forget variant for the search path: the write happens on a
    /// blocking task and a failure is only logged.
    pub fn record_detached(&self, event: AuditEvent) {
        let log = self.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = log.record(event) {
                warn!(error = %e, "Audit write failed");
            }
        });
    }

    fn read_events(&self) -> Result<Vec<AuditEvent>, AuditError> {
        match fs::read_to_string(&self.inner.path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(AuditError::from),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(AuditError::from(e)),
        }
    }
}
