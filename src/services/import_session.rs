// src/services/import_session.rs
//
// Batch Import Session - drives one smart import from pasted text to library
//
// CRITICAL RULES:
// - Lines are resolved strictly one after another, in input order
// - Nothing is persisted until commit()
// - A failing item never aborts the commit of the others
// - Events are emitted only after the fact they describe

use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::config::ImportSettings;
use crate::domain::{
    CommitSummary, DomainError, ImportMatch, ImportProgress, NewMediaItem, SecondaryStatus,
    SessionPhase, WatchStatus,
};
use crate::error::{AppError, AppResult};
use crate::events::{
    EventBus, ImportBatchCompleted, ImportBatchStarted, ImportCommitCompleted, ImportEntryResolved,
    MediaImported, SecondaryProviderExhausted,
};
use crate::integrations::{OmdbClient, PrimaryProvider, SecondaryProvider, TmdbClient};
use crate::repositories::MediaRepository;
use crate::services::circuit_breaker::SecondaryBreaker;
use crate::services::line_parser::LineParser;
use crate::services::resolution_engine::ResolutionEngine;

pub struct BatchImportSession {
    parser: LineParser,
    engine: ResolutionEngine,
    repository: Arc<dyn MediaRepository>,
    event_bus: EventBus,
    default_status: WatchStatus,

    phase: SessionPhase,
    batch_id: Option<Uuid>,
    matches: Vec<ImportMatch>,
    progress: ImportProgress,
    secondary_exhausted: bool,
}

impl BatchImportSession {
    pub fn new(
        engine: ResolutionEngine,
        repository: Arc<dyn MediaRepository>,
        event_bus: EventBus,
        default_status: WatchStatus,
    ) -> AppResult<Self> {
        Ok(Self {
            parser: LineParser::new()?,
            engine,
            repository,
            event_bus,
            default_status,
            phase: SessionPhase::Idle,
            batch_id: None,
            matches: Vec::new(),
            progress: ImportProgress::default(),
            secondary_exhausted: false,
        })
    }

    /// Build a session with the HTTP providers configured in `settings`.
    ///
    /// Fails with a configuration error when no primary key is set.
    /// No network traffic happens here.
    pub fn from_settings(
        settings: &ImportSettings,
        repository: Arc<dyn MediaRepository>,
        event_bus: EventBus,
    ) -> AppResult<Self> {
        let timeout = settings.request_timeout();

        let primary: Arc<dyn PrimaryProvider> = Arc::new(TmdbClient::new(
            settings.require_tmdb_key()?,
            &settings.language,
            timeout,
        )?);

        let secondary: Option<Arc<dyn SecondaryProvider>> = match settings.omdb_key() {
            Some(key) => Some(Arc::new(OmdbClient::new(key, timeout)?)),
            None => None,
        };

        let engine = ResolutionEngine::new(primary, secondary, settings.courtesy_delay());
        Self::new(engine, repository, event_bus, settings.default_status)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn batch_id(&self) -> Option<Uuid> {
        self.batch_id
    }

    pub fn matches(&self) -> &[ImportMatch] {
        &self.matches
    }

    pub fn progress(&self) -> ImportProgress {
        self.progress
    }

    pub fn accepted_count(&self) -> usize {
        self.matches.iter().filter(|m| m.is_accepted()).count()
    }

    pub fn secondary_status(&self) -> SecondaryStatus {
        if !self.engine.has_secondary() {
            SecondaryStatus::Disabled
        } else if self.secondary_exhausted {
            SecondaryStatus::Exhausted
        } else {
            SecondaryStatus::Active
        }
    }

    // ========================================================================
    // RESOLUTION PHASE
    // ========================================================================

    /// Parse and resolve every non-blank line of `raw_text`.
    ///
    /// `on_progress` is called once per line, after that line is resolved,
    /// with the running count and the new match.
    pub async fn run<F>(&mut self, raw_text: &str, mut on_progress: F) -> AppResult<Vec<ImportMatch>>
    where
        F: FnMut(ImportProgress, &ImportMatch) + Send,
    {
        self.phase = self.phase.transition(SessionPhase::Running)?;

        let entries = self.parser.parse_batch(raw_text);
        let batch_id = Uuid::new_v4();
        let started = Instant::now();

        self.batch_id = Some(batch_id);
        self.matches = Vec::with_capacity(entries.len());
        self.progress = ImportProgress {
            current: 0,
            total: entries.len(),
        };
        self.secondary_exhausted = false;

        log::info!(
            "Import batch {} started: {} lines, secondary {}",
            batch_id,
            entries.len(),
            if self.engine.has_secondary() { "enabled" } else { "disabled" }
        );
        self.event_bus.emit(ImportBatchStarted::new(
            batch_id,
            entries.len(),
            self.engine.has_secondary(),
        ));

        let mut breaker = SecondaryBreaker::new();

        for (index, entry) in entries.iter().enumerate() {
            let was_open = breaker.is_open();
            let import_match = self.engine.resolve(entry, &mut breaker).await;

            if breaker.is_open() && !was_open {
                self.secondary_exhausted = true;
                self.event_bus
                    .emit(SecondaryProviderExhausted::new(batch_id, index));
            }

            self.event_bus.emit(ImportEntryResolved::new(
                batch_id,
                index,
                entry.raw_line.clone(),
                import_match.provenance,
                import_match.candidate.as_ref().map(|c| c.external_id),
            ));

            self.progress.current = index + 1;
            on_progress(self.progress, &import_match);
            self.matches.push(import_match);
        }

        let matched = self.matches.iter().filter(|m| m.is_matched()).count();
        let duration_ms = duration_millis(started.elapsed());

        log::info!(
            "Import batch {} resolved: {}/{} matched in {}ms",
            batch_id,
            matched,
            self.matches.len(),
            duration_ms
        );
        self.event_bus.emit(ImportBatchCompleted::new(
            batch_id,
            self.matches.len(),
            matched,
            duration_ms,
        ));

        self.phase = self.phase.transition(SessionPhase::Reviewable)?;
        Ok(self.matches.clone())
    }

    // ========================================================================
    // REVIEW PHASE
    // ========================================================================

    /// Flip acceptance of the match at `index`. Returns the new acceptance.
    /// Unmatched entries stay rejected.
    pub fn toggle(&mut self, index: usize) -> AppResult<bool> {
        if self.phase != SessionPhase::Reviewable {
            return Err(AppError::Domain(DomainError::InvalidStateTransition(format!(
                "cannot change selection while {}",
                self.phase
            ))));
        }

        let import_match = self.matches.get_mut(index).ok_or(AppError::NotFound)?;
        Ok(import_match.toggle())
    }

    /// Drop the current results and go back to an empty session
    pub fn discard(&mut self) -> AppResult<()> {
        if self.phase == SessionPhase::Idle {
            return Ok(());
        }

        self.phase = self.phase.transition(SessionPhase::Idle)?;
        self.batch_id = None;
        self.matches.clear();
        self.progress = ImportProgress::default();
        Ok(())
    }

    // ========================================================================
    // COMMIT PHASE
    // ========================================================================

    /// Persist every accepted match. Items are written one at a time and a
    /// failed write only counts against the summary.
    pub async fn commit(&mut self) -> AppResult<CommitSummary> {
        self.phase = self.phase.transition(SessionPhase::Committing)?;

        let batch_id = self.batch_id.unwrap_or_else(Uuid::nil);
        let mut summary = CommitSummary::default();

        for import_match in self.matches.iter().filter(|m| m.is_accepted()) {
            let Some(candidate) = &import_match.candidate else {
                continue;
            };

            let item = NewMediaItem {
                external_id: candidate.external_id,
                media_kind: candidate.media_kind,
                title: candidate.title.clone(),
                year: candidate.year,
                poster_path: candidate.poster_path.clone(),
                backdrop_path: candidate.backdrop_path.clone(),
                status: self.default_status,
                notes: import_match.notes.clone(),
            };

            match self.repository.create(&item) {
                Ok(stored) => {
                    summary.succeeded += 1;
                    self.event_bus.emit(MediaImported::new(
                        batch_id,
                        stored.id,
                        stored.external_id,
                        stored.media_kind,
                        stored.title,
                    ));
                }
                Err(e) => {
                    summary.failed += 1;
                    log::warn!(
                        "Failed to import '{}' ({} {}): {}",
                        item.title,
                        item.media_kind,
                        item.external_id,
                        e
                    );
                }
            }
        }

        self.phase = self.phase.transition(SessionPhase::Done)?;

        log::info!(
            "Import batch {} committed: {} succeeded, {} failed",
            batch_id,
            summary.succeeded,
            summary.failed
        );
        self.event_bus.emit(ImportCommitCompleted::new(
            batch_id,
            summary.succeeded,
            summary.failed,
        ));

        Ok(summary)
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
