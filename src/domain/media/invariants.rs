use super::entity::NewMediaItem;
use crate::domain::{DomainError, DomainResult};

/// Validates a media item before it is written to storage
pub fn validate_new_media_item(item: &NewMediaItem) -> DomainResult<()> {
    validate_title(&item.title)?;
    validate_external_id(item.external_id)?;
    Ok(())
}

fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Media title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Provider ids are positive integers
fn validate_external_id(external_id: i64) -> DomainResult<()> {
    if external_id <= 0 {
        return Err(DomainError::InvariantViolation(format!(
            "External id {} is not a valid provider id",
            external_id
        )));
    }
    Ok(())
}

/// Invariants that must hold true for MediaItem:
///
/// 1. Identity (UUID) is immutable
/// 2. Title cannot be empty
/// 3. External id is a positive provider id
/// 4. (external_id, media_kind) is unique per library; enforced by storage

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::{MediaKind, WatchStatus};

    fn item(title: &str, external_id: i64) -> NewMediaItem {
        NewMediaItem {
            external_id,
            media_kind: MediaKind::Movie,
            title: title.to_string(),
            year: 2010,
            poster_path: None,
            backdrop_path: None,
            status: WatchStatus::Planned,
            notes: None,
        }
    }

    #[test]
    fn test_valid_item() {
        assert!(validate_new_media_item(&item("Inception", 27205)).is_ok());
    }

    #[test]
    fn test_blank_title_fails() {
        assert!(validate_new_media_item(&item("  ", 27205)).is_err());
    }

    #[test]
    fn test_non_positive_id_fails() {
        assert!(validate_new_media_item(&item("Inception", 0)).is_err());
    }
}
