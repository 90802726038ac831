// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs

use serde::{Deserialize, Serialize};

use crate::config::ImportSettings;
use crate::domain::{
    CandidateRecord, ImportMatch, ImportProgress, MediaItem, SecondaryStatus, SessionPhase,
    WatchStatus,
};
use crate::error::{AppError, AppResult};

// ============================================================================
// MEDIA DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItemDto {
    pub id: String,
    pub external_id: i64,
    pub media_kind: String,
    pub title: String,
    pub year: Option<i32>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<MediaItem> for MediaItemDto {
    fn from(item: MediaItem) -> Self {
        Self {
            id: item.id.to_string(),
            external_id: item.external_id,
            media_kind: item.media_kind.to_string(),
            title: item.title,
            year: (item.year > 0).then_some(item.year),
            poster_path: item.poster_path,
            backdrop_path: item.backdrop_path,
            status: item.status.to_string(),
            notes: item.notes,
            created_at: item.created_at.to_rfc3339(),
            updated_at: item.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// IMPORT DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDto {
    pub external_id: i64,
    pub title: String,
    pub year: Option<i32>,
    pub media_kind: String,
    pub poster_path: Option<String>,
    pub overview: String,
    pub community_rating: f64,
}

impl From<&CandidateRecord> for CandidateDto {
    fn from(candidate: &CandidateRecord) -> Self {
        Self {
            external_id: candidate.external_id,
            title: candidate.title.clone(),
            year: (candidate.year > 0).then_some(candidate.year),
            media_kind: candidate.media_kind.to_string(),
            poster_path: candidate.poster_path.clone(),
            overview: candidate.overview.clone(),
            community_rating: candidate.community_rating,
        }
    }
}

/// One row of the review list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportMatchDto {
    pub index: usize,
    pub raw_line: String,
    pub parsed_title: String,
    pub notes: Option<String>,
    /// "primary", "secondary" or "none"
    pub source: String,
    pub accepted: bool,
    pub candidate: Option<CandidateDto>,
}

impl ImportMatchDto {
    pub fn from_match(index: usize, import_match: &ImportMatch) -> Self {
        Self {
            index,
            raw_line: import_match.source_entry.raw_line.clone(),
            parsed_title: import_match.source_entry.title.clone(),
            notes: import_match.notes.clone(),
            source: import_match.provenance.to_string(),
            accepted: import_match.is_accepted(),
            candidate: import_match.candidate.as_ref().map(CandidateDto::from),
        }
    }
}

/// Payload of the `import-progress` window event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportProgressDto {
    pub current: usize,
    pub total: usize,
    pub entry: ImportMatchDto,
}

impl ImportProgressDto {
    pub fn new(progress: ImportProgress, import_match: &ImportMatch) -> Self {
        Self {
            current: progress.current,
            total: progress.total,
            entry: ImportMatchDto::from_match(progress.current.saturating_sub(1), import_match),
        }
    }
}

/// Snapshot of the import session for the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportStateDto {
    pub phase: SessionPhase,
    pub current: usize,
    pub total: usize,
    pub accepted_count: usize,
    pub secondary_status: SecondaryStatus,
    pub matches: Vec<ImportMatchDto>,
}

impl ImportStateDto {
    /// State shown before any import was started
    pub fn idle(secondary_status: SecondaryStatus) -> Self {
        Self {
            phase: SessionPhase::Idle,
            current: 0,
            total: 0,
            accepted_count: 0,
            secondary_status,
            matches: Vec::new(),
        }
    }
}

// ============================================================================
// SETTINGS DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsDto {
    pub tmdb_api_key: Option<String>,
    pub omdb_api_key: Option<String>,
    pub language: String,
    pub courtesy_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub default_status: String,
}

impl From<ImportSettings> for SettingsDto {
    fn from(settings: ImportSettings) -> Self {
        Self {
            tmdb_api_key: settings.tmdb_api_key,
            omdb_api_key: settings.omdb_api_key,
            language: settings.language,
            courtesy_delay_ms: settings.courtesy_delay_ms,
            request_timeout_secs: settings.request_timeout_secs,
            default_status: settings.default_status.to_string(),
        }
    }
}

impl SettingsDto {
    pub fn into_settings(self) -> AppResult<ImportSettings> {
        let default_status = self
            .default_status
            .parse::<WatchStatus>()
            .map_err(|_| AppError::Configuration(format!("Invalid status: {}", self.default_status)))?;

        Ok(ImportSettings {
            tmdb_api_key: self.tmdb_api_key.filter(|k| !k.trim().is_empty()),
            omdb_api_key: self.omdb_api_key.filter(|k| !k.trim().is_empty()),
            language: self.language,
            courtesy_delay_ms: self.courtesy_delay_ms,
            request_timeout_secs: self.request_timeout_secs,
            default_status,
        })
    }
}
