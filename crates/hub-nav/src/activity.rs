//! Platform activity log.
//!
//! Records are fire-and-forget: a sink never reports failure back to the
//! caller, and navigation never waits on one.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use hub_model::{Metadata, Session};
use serde::Serialize;

/// Metadata keys that are never written to the activity log.
pub const REDACTED_KEYS: [&str; 3] = ["password", "token", "credential"];

/// Kind of logged activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    Upload,
    Delete,
    AiQuery,
    LoginEvent,
    DatabaseUpdate,
    GradeAssignment,
}

impl ActivityAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "UPLOAD",
            Self::Delete => "DELETE",
            Self::AiQuery => "AI_QUERY",
            Self::LoginEvent => "LOGIN_EVENT",
            Self::DatabaseUpdate => "DATABASE_UPDATE",
            Self::GradeAssignment => "GRADE_ASSIGNMENT",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One activity log entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRecord {
    pub user_id: String,
    pub user_email: String,
    pub action: ActivityAction,
    pub details: String,
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// New record stamped with the current time, with sanitized metadata.
    ///
    /// Without a session the user is logged as `anonymous`.
    pub fn new(
        session: Option<&Session>,
        action: ActivityAction,
        details: impl Into<String>,
        metadata: Metadata,
    ) -> Self {
        Self {
            user_id: session.map_or_else(|| "anonymous".to_string(), |s| s.user_id.clone()),
            user_email: session
                .and_then(|s| s.email.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            action,
            details: details.into(),
            metadata: sanitize_metadata(metadata),
            created_at: Utc::now(),
        }
    }
}

/// Drop credential-bearing keys from `metadata`.
pub fn sanitize_metadata(mut metadata: Metadata) -> Metadata {
    for key in REDACTED_KEYS {
        metadata.remove(key);
    }
    metadata
}

/// Destination for activity records.
pub trait ActivitySink {
    fn record(&self, record: ActivityRecord);
}

/// Sink that emits each record as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingActivitySink;

impl ActivitySink for TracingActivitySink {
    fn record(&self, record: ActivityRecord) {
        let metadata = serde_json::Value::Object(record.metadata);
        tracing::info!(
            target: "hub_nav::activity",
            user_id = %record.user_id,
            action = %record.action,
            details = %record.details,
            metadata = %metadata,
            created_at = %record.created_at.to_rfc3339(),
            "activity"
        );
    }
}

/// Sink that keeps records in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryActivitySink {
    records: Arc<Mutex<Vec<ActivityRecord>>>,
}

impl MemoryActivitySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<ActivityRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ActivityRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ActivitySink for MemoryActivitySink {
    fn record(&self, record: ActivityRecord) {
        self.lock().push(record);
    }
}
