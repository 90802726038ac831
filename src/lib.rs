// src/lib.rs
// MediaTrack - Personal movie and TV tracker
//
// Architecture:
// - Domain-centric: import values and media entities live in `domain`
// - Event-driven: the import session announces its progress on the event bus
// - Explicit: providers and storage are traits injected at construction
// - Application Layer: UI boundary, Tauri commands behind the `desktop` feature

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// BOUNDARIES
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    CandidateRecord, CommitSummary, ImportMatch, ImportProgress, MediaItem, MediaKind,
    NewMediaItem, ParsedEntry, Provenance, SecondaryStatus, SessionPhase, WatchStatus,
};

// ============================================================================
// PUBLIC API - Errors and Configuration
// ============================================================================

pub use config::ImportSettings;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, register_import_audit_handlers, DomainEvent, EventBus, EventLogEntry,
    ImportBatchCompleted, ImportBatchStarted, ImportCommitCompleted, ImportEntryResolved,
    MediaImported, SecondaryProviderExhausted,
};

// ============================================================================
// PUBLIC API - Database and Repositories
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};
pub use repositories::{MediaRepository, SqliteMediaRepository};

// ============================================================================
// PUBLIC API - Services and Integrations
// ============================================================================

pub use integrations::{
    ForeignMatch, OmdbClient, PrimaryProvider, ProviderError, ProviderResult, SecondaryProvider,
    TmdbClient,
};
pub use services::{BatchImportSession, LineParser, ResolutionEngine, SecondaryBreaker};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;
pub use application::dto;
