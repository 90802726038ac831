// src/domain/import/value_objects.rs
//
// Import Value Objects
//
// Pure data structures flowing through the smart import pipeline:
// raw line -> ParsedEntry -> ImportMatch -> (commit) -> MediaItem
//
// CRITICAL INVARIANTS:
// - ParsedEntry and CandidateRecord are immutable once built
// - ImportMatch.accepted is true only when a candidate exists
// - SessionPhase only moves along the documented transitions

use serde::{Deserialize, Serialize};

use crate::domain::media::MediaKind;
use crate::domain::{DomainError, DomainResult};

// ============================================================================
// PARSED ENTRY
// ============================================================================

/// Structured reading of one line of user-typed import text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEntry {
    /// The original (trimmed) line, kept for display
    pub raw_line: String,

    /// Cleaned candidate title. Empty means the line is not resolvable.
    pub title: String,

    /// Four digit year found on the line, used for year-aware search
    pub year_hint: Option<u16>,

    pub type_hint: Option<MediaKind>,

    /// Streaming platform mentioned on the line. Metadata only, never matched on.
    pub platform_note: Option<String>,

    /// Residual free text (structured notes field, or the year in heuristic mode)
    pub notes: Option<String>,
}

impl ParsedEntry {
    /// Entry for a line that yielded no usable title
    pub fn empty(raw_line: impl Into<String>) -> Self {
        Self {
            raw_line: raw_line.into(),
            title: String::new(),
            year_hint: None,
            type_hint: None,
            platform_note: None,
            notes: None,
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// Platform and notes joined for persistence: "Netflix - classic"
    pub fn combined_notes(&self) -> Option<String> {
        match (&self.platform_note, &self.notes) {
            (Some(platform), Some(notes)) => Some(format!("{} - {}", platform, notes)),
            (Some(platform), None) => Some(platform.clone()),
            (None, Some(notes)) => Some(notes.clone()),
            (None, None) => None,
        }
    }
}

// ============================================================================
// CANDIDATE RECORD
// ============================================================================

/// A normalized search result from a metadata provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub external_id: i64,
    pub title: String,
    /// 0 if the provider had no usable date
    pub year: i32,
    pub media_kind: MediaKind,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: String,
    pub community_rating: f64,
}

// ============================================================================
// PROVENANCE
// ============================================================================

/// Which strategy produced a match. Shown to the user as a trust signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    /// Direct primary provider search
    Primary,
    /// Secondary lookup, then primary cross-reference
    Secondary,
    None,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::Primary => write!(f, "primary"),
            Provenance::Secondary => write!(f, "secondary"),
            Provenance::None => write!(f, "none"),
        }
    }
}

// ============================================================================
// IMPORT MATCH
// ============================================================================

/// The unit of user review: one input line and what it resolved to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportMatch {
    pub source_entry: ParsedEntry,
    pub candidate: Option<CandidateRecord>,
    pub provenance: Provenance,
    /// Combined free-text notes carried to persistence
    pub notes: Option<String>,
    accepted: bool,
}

impl ImportMatch {
    /// A resolved line. Accepted by default.
    pub fn found(entry: ParsedEntry, candidate: CandidateRecord, provenance: Provenance) -> Self {
        let notes = entry.combined_notes();
        Self {
            source_entry: entry,
            candidate: Some(candidate),
            provenance,
            notes,
            accepted: true,
        }
    }

    /// A line with no match. Never accepted.
    pub fn unmatched(entry: ParsedEntry) -> Self {
        let notes = entry.combined_notes();
        Self {
            source_entry: entry,
            candidate: None,
            provenance: Provenance::None,
            notes,
            accepted: false,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn is_matched(&self) -> bool {
        self.candidate.is_some()
    }

    /// Flip acceptance. Unmatched entries stay unaccepted.
    /// Returns the acceptance after the call.
    pub fn toggle(&mut self) -> bool {
        if self.candidate.is_some() {
            self.accepted = !self.accepted;
        }
        self.accepted
    }
}

// ============================================================================
// PROGRESS / SUMMARY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportProgress {
    pub current: usize,
    pub total: usize,
}

/// Outcome of the commit phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommitSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Availability of the secondary provider for the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryStatus {
    /// No key configured
    Disabled,
    Active,
    /// Quota exhausted during the last run
    Exhausted,
}

// ============================================================================
// SESSION PHASE
// ============================================================================

/// Idle -> Running -> Reviewable -> Committing -> Done
///
/// A new run may start from Reviewable or Done. Discarding returns to Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Running,
    Reviewable,
    Committing,
    Done,
}

impl SessionPhase {
    pub fn can_transition_to(self, next: SessionPhase) -> bool {
        use SessionPhase::*;
        matches!(
            (self, next),
            (Idle, Running)
                | (Running, Reviewable)
                | (Reviewable, Committing)
                | (Committing, Done)
                | (Reviewable, Running)
                | (Done, Running)
                | (Reviewable, Idle)
                | (Done, Idle)
        )
    }

    pub fn transition(self, next: SessionPhase) -> DomainResult<SessionPhase> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::InvalidStateTransition(format!(
                "import session cannot move from {} to {}",
                self, next
            )))
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "idle"),
            SessionPhase::Running => write!(f, "running"),
            SessionPhase::Reviewable => write!(f, "reviewable"),
            SessionPhase::Committing => write!(f, "committing"),
            SessionPhase::Done => write!(f, "done"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> ParsedEntry {
        ParsedEntry {
            raw_line: title.to_string(),
            title: title.to_string(),
            year_hint: None,
            type_hint: None,
            platform_note: None,
            notes: None,
        }
    }

    fn candidate() -> CandidateRecord {
        CandidateRecord {
            external_id: 27205,
            title: "Inception".to_string(),
            year: 2010,
            media_kind: MediaKind::Movie,
            poster_path: None,
            backdrop_path: None,
            overview: String::new(),
            community_rating: 8.4,
        }
    }

    #[test]
    fn test_combined_notes() {
        let mut e = entry("Inception");
        assert_eq!(e.combined_notes(), None);

        e.platform_note = Some("Netflix".to_string());
        assert_eq!(e.combined_notes().as_deref(), Some("Netflix"));

        e.notes = Some("classic".to_string());
        assert_eq!(e.combined_notes().as_deref(), Some("Netflix - classic"));

        e.platform_note = None;
        assert_eq!(e.combined_notes().as_deref(), Some("classic"));
    }

    #[test]
    fn test_found_match_is_accepted() {
        let m = ImportMatch::found(entry("Inception"), candidate(), Provenance::Primary);
        assert!(m.is_accepted());
        assert!(m.is_matched());
    }

    #[test]
    fn test_toggle_flips_matched_entry() {
        let mut m = ImportMatch::found(entry("Inception"), candidate(), Provenance::Primary);
        assert!(!m.toggle());
        assert!(m.toggle());
    }

    #[test]
    fn test_toggle_ignores_unmatched_entry() {
        let mut m = ImportMatch::unmatched(entry("Nothing"));
        assert!(!m.toggle());
        assert!(!m.toggle());
        assert!(!m.is_accepted());
        assert_eq!(m.provenance, Provenance::None);
    }

    #[test]
    fn test_phase_transitions() {
        use SessionPhase::*;
        assert!(Idle.can_transition_to(Running));
        assert!(Reviewable.can_transition_to(Committing));
        assert!(Done.can_transition_to(Running));

        assert!(Idle.transition(Committing).is_err());
        assert!(Running.transition(Committing).is_err());
        assert!(Done.transition(Committing).is_err());
        assert!(Committing.transition(Running).is_err());
    }
}
