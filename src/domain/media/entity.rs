use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A movie or series stored in the user's library.
/// Created by the import commit phase (or manual add) and owned by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Identifier issued by the primary metadata provider
    pub external_id: i64,

    pub media_kind: MediaKind,

    pub title: String,

    /// Release year, 0 if unknown
    pub year: i32,

    pub poster_path: Option<String>,

    pub backdrop_path: Option<String>,

    pub status: WatchStatus,

    /// Free text carried from the import line (platform, year, remarks)
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Kind of media. Every record is exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaKind {
    Movie,
    Series,
}

/// Where the user is with a given title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum WatchStatus {
    #[default]
    Planned,
    Watching,
    Watched,
    Dropped,
}

/// Request to persist a new media item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMediaItem {
    pub external_id: i64,
    pub media_kind: MediaKind,
    pub title: String,
    pub year: i32,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub status: WatchStatus,
    pub notes: Option<String>,
}

impl MediaItem {
    /// Materialize a stored item from a creation request
    pub fn from_new(request: &NewMediaItem) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            external_id: request.external_id,
            media_kind: request.media_kind,
            title: request.title.clone(),
            year: request.year,
            poster_path: request.poster_path.clone(),
            backdrop_path: request.backdrop_path.clone(),
            status: request.status,
            notes: request.notes.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "MOVIE"),
            MediaKind::Series => write!(f, "SERIES"),
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MOVIE" => Ok(MediaKind::Movie),
            "SERIES" => Ok(MediaKind::Series),
            other => Err(format!("Unknown media kind: {}", other)),
        }
    }
}

impl std::fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatchStatus::Planned => write!(f, "PLANNED"),
            WatchStatus::Watching => write!(f, "WATCHING"),
            WatchStatus::Watched => write!(f, "WATCHED"),
            WatchStatus::Dropped => write!(f, "DROPPED"),
        }
    }
}

impl std::str::FromStr for WatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLANNED" => Ok(WatchStatus::Planned),
            "WATCHING" => Ok(WatchStatus::Watching),
            "WATCHED" => Ok(WatchStatus::Watched),
            "DROPPED" => Ok(WatchStatus::Dropped),
            other => Err(format!("Unknown watch status: {}", other)),
        }
    }
}
