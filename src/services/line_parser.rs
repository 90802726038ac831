// src/services/line_parser.rs
//
// Line Parser - turns one line of user-typed import text into a ParsedEntry
//
// CRITICAL RULES:
// - Pure: no I/O, no provider calls
// - Never fails: an unreadable line yields an entry with an empty title
// - Rules are explicit and applied in a fixed order

use regex::Regex;

use crate::domain::{MediaKind, ParsedEntry};

/// Field separator that switches a line into structured mode
const FIELD_SEPARATOR: char = ';';

/// Words people append after a title to say they saw it
const NOISE_WORDS: &[&str] = &["angesehen", "gesehen", "watched"];

/// Deterministic rules for reading a free-form import line.
///
/// Two modes:
/// - structured: `title;type;platform;notes`
/// - heuristic: free text like `Matrix 1999 Netflix Film angesehen`
pub struct LineParser {
    year_pattern: Regex,
    platform_pattern: Regex,
    type_pattern: Regex,
    separator_pattern: Regex,
}

impl LineParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            year_pattern: Regex::new(r"\b(?:19|20)\d{2}\b")?,
            // Longer names first so "Amazon Prime" wins over a bare "Prime"
            platform_pattern: Regex::new(
                r"(?i)\b(amazon prime|prime video|apple tv\+|paramount\+|disney\+|netflix|hulu|hbo|sky|wow)(?:\b|\W|$)",
            )?,
            type_pattern: Regex::new(
                r"(?i)\b(mini series|mini-serie|miniserie|series|serie|movie|film|show)\b",
            )?,
            // A separator left dangling at the end by year removal still counts
            separator_pattern: Regex::new(r"(?i)\s(?:oder|or|von|from)(?:\s|$)")?,
        })
    }

    /// Parse every non-blank line of a pasted block, in order
    pub fn parse_batch(&self, raw_text: &str) -> Vec<ParsedEntry> {
        raw_text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.parse(line))
            .collect()
    }

    pub fn parse(&self, line: &str) -> ParsedEntry {
        let line = line.trim();
        if line.is_empty() {
            return ParsedEntry::empty(line);
        }

        if line.contains(FIELD_SEPARATOR) {
            self.parse_structured(line)
        } else {
            self.parse_heuristic(line)
        }
    }

    // ========================================================================
    // STRUCTURED MODE
    // ========================================================================

    fn parse_structured(&self, line: &str) -> ParsedEntry {
        let mut fields = line
            .split(FIELD_SEPARATOR)
            .take(4)
            .map(|field| field.trim().trim_matches('"').trim().to_string());

        let title = fields.next().unwrap_or_default();
        let type_field = fields.next().unwrap_or_default();
        let platform = fields.next().unwrap_or_default();
        let notes = fields.next().unwrap_or_default();

        let year_hint = self.find_year(&notes);

        ParsedEntry {
            raw_line: line.to_string(),
            title: collapse_whitespace(&title),
            year_hint,
            type_hint: detect_type(&type_field),
            platform_note: non_empty(platform),
            notes: non_empty(notes),
        }
    }

    // ========================================================================
    // HEURISTIC MODE
    // ========================================================================

    fn parse_heuristic(&self, line: &str) -> ParsedEntry {
        let mut working = line.to_string();

        // 1. Year
        let year = self
            .year_pattern
            .find(&working)
            .map(|m| (m.range(), m.as_str().to_string()));
        if let Some((range, _)) = &year {
            working.replace_range(range.clone(), " ");
        }
        let year = year.map(|(_, text)| text);

        // 2. Platform
        let platform = self.platform_pattern.captures(&working).and_then(|caps| {
            let whole = caps.get(0)?.range();
            Some((whole, caps.get(1)?.as_str().to_string()))
        });
        if let Some((range, _)) = &platform {
            working.replace_range(range.clone(), " ");
        }
        let platform = platform.map(|(_, name)| name);

        // 3. Type keyword
        let type_hint = self
            .type_pattern
            .find(&working)
            .map(|m| (m.range(), keyword_kind(m.as_str())));
        if let Some((range, _)) = &type_hint {
            working.replace_range(range.clone(), " ");
        }
        let type_hint = type_hint.map(|(_, kind)| kind);

        let mut title = collapse_whitespace(&working);

        // 4. "Title A oder Title B" keeps Title A
        if let Some(m) = self.separator_pattern.find(&title) {
            title.truncate(m.start());
        }

        // 5. Punctuation and trailing noise words
        let title = strip_noise(&title);

        ParsedEntry {
            raw_line: line.to_string(),
            title,
            year_hint: year.as_deref().and_then(|y| y.parse().ok()),
            type_hint,
            platform_note: platform,
            notes: year,
        }
    }

    fn find_year(&self, text: &str) -> Option<u16> {
        self.year_pattern
            .find(text)
            .and_then(|m| m.as_str().parse().ok())
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Type hint from a structured type field
fn detect_type(field: &str) -> Option<MediaKind> {
    let lower = field.to_lowercase();
    if lower.contains("film") || lower.contains("movie") {
        Some(MediaKind::Movie)
    } else if lower.contains("serie") || lower.contains("anime") {
        Some(MediaKind::Series)
    } else {
        None
    }
}

/// Type hint from a heuristic keyword. Anything that is not a film is a series.
fn keyword_kind(keyword: &str) -> MediaKind {
    let lower = keyword.to_lowercase();
    if lower.contains("film") || lower.contains("movie") {
        MediaKind::Movie
    } else {
        MediaKind::Series
    }
}

fn is_edge_noise(c: char) -> bool {
    matches!(c, '"' | '\'' | ':' | '-') || c.is_whitespace()
}

fn strip_noise(title: &str) -> String {
    let mut current = title.trim_matches(is_edge_noise).to_string();

    loop {
        let before = current.len();

        for word in NOISE_WORDS {
            if let Some(stripped) = strip_trailing_word(&current, word) {
                current = stripped.trim_matches(is_edge_noise).to_string();
            }
        }

        if current.len() == before {
            return current;
        }
    }
}

/// Removes `word` from the end of `text` when it stands as a whole word
fn strip_trailing_word<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let start = text.len().checked_sub(word.len())?;
    let tail = text.get(start..)?;
    if !tail.eq_ignore_ascii_case(word) {
        return None;
    }

    let head = &text[..start];
    match head.chars().next_back() {
        Some(c) if c.is_alphanumeric() => None,
        _ => Some(head),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> LineParser {
        LineParser::new().unwrap()
    }

    #[test]
    fn test_heuristic_full_line() {
        let entry = parser().parse("Inception 2010 Netflix Film angesehen");

        assert_eq!(entry.title, "Inception");
        assert_eq!(entry.year_hint, Some(2010));
        assert_eq!(entry.type_hint, Some(MediaKind::Movie));
        assert_eq!(entry.platform_note.as_deref(), Some("Netflix"));
        assert_eq!(entry.notes.as_deref(), Some("2010"));
        assert_eq!(entry.combined_notes().as_deref(), Some("Netflix - 2010"));
        assert_eq!(entry.raw_line, "Inception 2010 Netflix Film angesehen");
    }

    #[test]
    fn test_heuristic_matrix_line() {
        let entry = parser().parse("The Matrix 1999 Netflix Film angesehen");

        assert_eq!(entry.title, "The Matrix");
        assert_eq!(entry.year_hint, Some(1999));
        assert_eq!(entry.platform_note.as_deref(), Some("Netflix"));
        assert_eq!(entry.type_hint, Some(MediaKind::Movie));
    }

    #[test]
    fn test_structured_inception_line() {
        let entry = parser().parse("Inception;Film;Netflix;classic");

        assert_eq!(entry.title, "Inception");
        assert_eq!(entry.type_hint, Some(MediaKind::Movie));
        assert_eq!(entry.platform_note.as_deref(), Some("Netflix"));
        assert_eq!(entry.notes.as_deref(), Some("classic"));
        assert_eq!(entry.year_hint, None);
    }

    #[test]
    fn test_parse_is_repeatable() {
        let parser = parser();
        for line in [
            "The Matrix 1999 Netflix Film angesehen",
            "Inception;Film;Netflix;classic",
            "Der Pate oder The Godfather",
            "   ",
        ] {
            assert_eq!(parser.parse(line), parser.parse(line));
        }
    }

    #[test]
    fn test_structured_line() {
        let entry = parser().parse(r#""Dark";Serie;Netflix;seen 2019"#);

        assert_eq!(entry.title, "Dark");
        assert_eq!(entry.type_hint, Some(MediaKind::Series));
        assert_eq!(entry.platform_note.as_deref(), Some("Netflix"));
        assert_eq!(entry.notes.as_deref(), Some("seen 2019"));
        assert_eq!(entry.year_hint, Some(2019));
    }

    #[test]
    fn test_structured_missing_fields() {
        let entry = parser().parse("Breaking Bad;");

        assert_eq!(entry.title, "Breaking Bad");
        assert_eq!(entry.type_hint, None);
        assert_eq!(entry.platform_note, None);
        assert_eq!(entry.notes, None);
        assert_eq!(entry.year_hint, None);
    }

    #[test]
    fn test_structured_anime_is_series() {
        let entry = parser().parse("Naruto;Anime;Crunchyroll;");
        assert_eq!(entry.type_hint, Some(MediaKind::Series));
        assert_eq!(entry.platform_note.as_deref(), Some("Crunchyroll"));
    }

    #[test]
    fn test_disjunction_keeps_left_title() {
        let entry = parser().parse("Der Pate oder The Godfather");
        assert_eq!(entry.title, "Der Pate");

        let entry = parser().parse("If Only von 2004");
        assert_eq!(entry.title, "If Only");
        assert_eq!(entry.year_hint, Some(2004));
    }

    #[test]
    fn test_earliest_separator_wins() {
        let entry = parser().parse("Alpha from Beta or Gamma");
        assert_eq!(entry.title, "Alpha");
    }

    #[test]
    fn test_noise_words_removed_repeatedly() {
        let entry = parser().parse("Interstellar - gesehen watched");
        assert_eq!(entry.title, "Interstellar");
    }

    #[test]
    fn test_noise_word_inside_title_is_kept() {
        let entry = parser().parse("Unwatched");
        assert_eq!(entry.title, "Unwatched");
    }

    #[test]
    fn test_platform_requires_whole_word() {
        let entry = parser().parse("Skyfall");
        assert_eq!(entry.title, "Skyfall");
        assert_eq!(entry.platform_note, None);
    }

    #[test]
    fn test_platform_with_plus_sign() {
        let entry = parser().parse("The Mandalorian Disney+ Serie");
        assert_eq!(entry.title, "The Mandalorian");
        assert_eq!(entry.platform_note.as_deref(), Some("Disney+"));
        assert_eq!(entry.type_hint, Some(MediaKind::Series));
    }

    #[test]
    fn test_multi_word_type_keyword() {
        let entry = parser().parse("Chernobyl Mini Series HBO");
        assert_eq!(entry.title, "Chernobyl");
        assert_eq!(entry.type_hint, Some(MediaKind::Series));
        assert_eq!(entry.platform_note.as_deref(), Some("HBO"));
    }

    #[test]
    fn test_year_only_line_has_empty_title() {
        let entry = parser().parse("2019");
        assert_eq!(entry.title, "");
        assert!(!entry.has_title());
        assert_eq!(entry.year_hint, Some(2019));
    }

    #[test]
    fn test_only_first_year_extracted() {
        let entry = parser().parse("Blade Runner 2049 1982");
        assert_eq!(entry.year_hint, Some(2049));
        assert_eq!(entry.title, "Blade Runner 1982");
    }

    #[test]
    fn test_quotes_and_colons_trimmed() {
        let entry = parser().parse(r#""Amélie": "#);
        assert_eq!(entry.title, "Amélie");
    }

    #[test]
    fn test_batch_skips_blank_lines() {
        let entries = parser().parse_batch("Matrix\n\n   \nDark;Serie\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Matrix");
        assert_eq!(entries[1].title, "Dark");
    }
}
