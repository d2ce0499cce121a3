//! Append-only audit log of relay exchanges
//!
//! One JSON object per line. Write failures are reported through `tracing`
//! and never reach the caller.

use crate::config::AuditConfig;
use crate::protocol::ChatResponse;
use crate::relay::error::RelayError;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// File-backed audit log; a log without a path records nothing
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    path: Option<PathBuf>,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// An audit log that drops every record
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn from_config(config: &AuditConfig) -> Self {
        Self {
            path: config.path.clone(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record a completed request
    pub fn record_exchange(&self, request_id: Uuid, message: &str, response: &ChatResponse) {
        self.record(json!({
            "timestamp": response.timestamp,
            "level": "INFO",
            "request_id": request_id,
            "message": message,
            "response": response.response,
            "tokens_used": response.tokens_used,
        }));
    }

    /// Record a failed request with the full error description
    pub fn record_failure(&self, request_id: Uuid, message: &str, error: &RelayError) {
        self.record(json!({
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            "level": "ERROR",
            "request_id": request_id,
            "message": message,
            "kind": error.kind(),
            "error": error.to_string(),
        }));
    }

    fn record(&self, entry: Value) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        if let Err(e) = append_line(path, &entry) {
            warn!("Failed to write audit record to {}: {}", path.display(), e);
        }
    }
}

fn append_line(path: &Path, entry: &Value) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut line = serde_json::to_string(entry)?;
    line.push('\n');

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())
}
