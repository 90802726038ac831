// src/events/types.rs
//
// Domain events emitted by the import pipeline.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{MediaKind, Provenance};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// RESOLUTION EVENTS
// ============================================================================

/// Emitted when an import run starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportBatchStarted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub batch_id: Uuid,
    pub total_lines: usize,
    pub secondary_enabled: bool,
}

impl ImportBatchStarted {
    pub fn new(batch_id: Uuid, total_lines: usize, secondary_enabled: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            batch_id,
            total_lines,
            secondary_enabled,
        }
    }
}

impl DomainEvent for ImportBatchStarted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ImportBatchStarted" }
}

/// Emitted for every line once its resolution is known
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportEntryResolved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub batch_id: Uuid,
    pub line_index: usize,
    pub raw_line: String,
    pub provenance: Provenance,
    pub external_id: Option<i64>,
}

impl ImportEntryResolved {
    pub fn new(
        batch_id: Uuid,
        line_index: usize,
        raw_line: String,
        provenance: Provenance,
        external_id: Option<i64>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            batch_id,
            line_index,
            raw_line,
            provenance,
            external_id,
        }
    }
}

impl DomainEvent for ImportEntryResolved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ImportEntryResolved" }
}

/// Emitted once per batch, the first time the secondary provider reports
/// an exhausted quota
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondaryProviderExhausted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub batch_id: Uuid,
    pub line_index: usize,
}

impl SecondaryProviderExhausted {
    pub fn new(batch_id: Uuid, line_index: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            batch_id,
            line_index,
        }
    }
}

impl DomainEvent for SecondaryProviderExhausted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "SecondaryProviderExhausted" }
}

/// Emitted when every line of a batch has been resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportBatchCompleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub batch_id: Uuid,
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub duration_ms: u64,
}

impl ImportBatchCompleted {
    pub fn new(batch_id: Uuid, total: usize, matched: usize, duration_ms: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            batch_id,
            total,
            matched,
            unmatched: total.saturating_sub(matched),
            duration_ms,
        }
    }
}

impl DomainEvent for ImportBatchCompleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ImportBatchCompleted" }
}

// ============================================================================
// COMMIT EVENTS
// ============================================================================

/// Emitted when an accepted match has been written to the library.
///
/// The event id is derived from (external_id, kind) so re-importing the same
/// title yields the same id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaImported {
    pub occurred_at: DateTime<Utc>,
    pub batch_id: Uuid,
    pub media_id: Uuid,
    pub external_id: i64,
    pub media_kind: MediaKind,
    pub title: String,
}

impl MediaImported {
    pub fn new(
        batch_id: Uuid,
        media_id: Uuid,
        external_id: i64,
        media_kind: MediaKind,
        title: String,
    ) -> Self {
        Self {
            occurred_at: Utc::now(),
            batch_id,
            media_id,
            external_id,
            media_kind,
            title,
        }
    }

    pub fn fingerprint(&self) -> String {
        format!("media:{}:{}", self.media_kind, self.external_id)
    }
}

impl DomainEvent for MediaImported {
    fn event_id(&self) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, self.fingerprint().as_bytes())
    }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "MediaImported" }
}

/// Emitted when the commit phase finishes. Views listen to this to refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportCommitCompleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub batch_id: Uuid,
    pub succeeded: usize,
    pub failed: usize,
}

impl ImportCommitCompleted {
    pub fn new(batch_id: Uuid, succeeded: usize, failed: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            batch_id,
            succeeded,
            failed,
        }
    }
}

impl DomainEvent for ImportCommitCompleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ImportCommitCompleted" }
}
