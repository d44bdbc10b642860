//! Static career-path data.
//!
//! A read-only JSON map of occupation title to an arbitrary path payload
//! (stages, skills, links). Loaded once at startup; absent file means an
//! empty store, and the endpoints degrade to an empty list / 404.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::CareersError;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

/// Read-only career-path store. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct CareerPathStore {
    paths: Arc<Map<String, Value>>,
}

impl CareerPathStore {
    /// Loads the store from a JSON object file. Fail-fast: a configured but
    /// unreadable source is a startup error.
    pub fn load(path: &Path) -> Result<Self, CareersError> {
        if !path.exists() {
            return Err(CareersError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }

        let raw = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| CareersError::Malformed {
            reason: e.to_string(),
        })?;

        let Value::Object(paths) = value else {
            return Err(CareersError::Malformed {
                reason: "expected a JSON object of title -> career path".to_string(),
            });
        };

        info!(path = %path.display(), titles = paths.len(), "Career paths loaded");

        Ok(Self {
            paths: Arc::new(paths),
        })
    }

    /// An empty store (used when no source is configured).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.paths.keys().map(String::as_str).collect()
    }

    pub fn get(&self, title: &str) -> Option<&Value> {
        self.paths.get(title)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
