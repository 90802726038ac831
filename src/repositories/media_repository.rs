// src/repositories/media_repository.rs
//
// Media library persistence - the storage collaborator of the import commit

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::media::{validate_new_media_item, MediaItem, MediaKind, NewMediaItem, WatchStatus};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait MediaRepository: Send + Sync {
    /// Persist a new item. A duplicate (external_id, media_kind) returns the
    /// item already stored instead of failing.
    fn create(&self, item: &NewMediaItem) -> AppResult<MediaItem>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<MediaItem>>;
    fn find_by_external(&self, external_id: i64, kind: MediaKind) -> AppResult<Option<MediaItem>>;
    fn list_all(&self) -> AppResult<Vec<MediaItem>>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct SqliteMediaRepository {
    pool: Arc<ConnectionPool>,
}

const SELECT_COLUMNS: &str = "SELECT id, external_id, media_kind, title, year, poster_path, backdrop_path,
        status, notes, created_at, updated_at FROM media_items";

impl SqliteMediaRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to MediaItem - returns rusqlite::Error for query_map compatibility
    fn row_to_media(row: &Row) -> Result<MediaItem, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let kind_str: String = row.get("media_kind")?;
        let media_kind = kind_str
            .parse::<MediaKind>()
            .map_err(|_| rusqlite::Error::InvalidQuery)?;

        let status_str: String = row.get("status")?;
        let status = status_str
            .parse::<WatchStatus>()
            .map_err(|_| rusqlite::Error::InvalidQuery)?;

        let created_at = parse_timestamp(row.get("created_at")?)?;
        let updated_at = parse_timestamp(row.get("updated_at")?)?;

        Ok(MediaItem {
            id,
            external_id: row.get("external_id")?,
            media_kind,
            title: row.get("title")?,
            year: row.get("year")?,
            poster_path: row.get("poster_path")?,
            backdrop_path: row.get("backdrop_path")?,
            status,
            notes: row.get("notes")?,
            created_at,
            updated_at,
        })
    }
}

fn parse_timestamp(value: String) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

impl MediaRepository for SqliteMediaRepository {
    fn create(&self, item: &NewMediaItem) -> AppResult<MediaItem> {
        validate_new_media_item(item)?;

        let media = MediaItem::from_new(item);
        let conn = self.pool.get()?;

        let inserted = conn.execute(
            "INSERT INTO media_items (
                id, external_id, media_kind, title, year, poster_path, backdrop_path,
                status, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT(external_id, media_kind) DO NOTHING",
            params![
                media.id.to_string(),
                media.external_id,
                media.media_kind.to_string(),
                media.title,
                media.year,
                media.poster_path,
                media.backdrop_path,
                media.status.to_string(),
                media.notes,
                media.created_at.to_rfc3339(),
                media.updated_at.to_rfc3339(),
            ],
        )?;

        if inserted == 0 {
            log::debug!(
                "Media {} {} already in library, returning existing item",
                media.media_kind,
                media.external_id
            );
        }

        let sql = format!("{} WHERE external_id = ?1 AND media_kind = ?2", SELECT_COLUMNS);
        let stored = conn.query_row(
            &sql,
            params![media.external_id, media.media_kind.to_string()],
            Self::row_to_media,
        )?;

        Ok(stored)
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<MediaItem>> {
        let conn = self.pool.get()?;
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);

        let media = conn
            .query_row(&sql, params![id.to_string()], Self::row_to_media)
            .optional()?;

        Ok(media)
    }

    fn find_by_external(&self, external_id: i64, kind: MediaKind) -> AppResult<Option<MediaItem>> {
        let conn = self.pool.get()?;
        let sql = format!("{} WHERE external_id = ?1 AND media_kind = ?2", SELECT_COLUMNS);

        let media = conn
            .query_row(&sql, params![external_id, kind.to_string()], Self::row_to_media)
            .optional()?;

        Ok(media)
    }

    fn list_all(&self) -> AppResult<Vec<MediaItem>> {
        let conn = self.pool.get()?;
        let sql = format!("{} ORDER BY created_at DESC, title ASC", SELECT_COLUMNS);

        let mut stmt = conn.prepare(&sql)?;
        let items = stmt
            .query_map([], Self::row_to_media)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM media_items WHERE id = ?1", params![id.to_string()])?;
        Ok(())
    }
}
