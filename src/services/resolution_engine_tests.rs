// src/services/resolution_engine_tests.rs
//
// Resolution Engine Tests
//
// INVARIANTS TESTED:
// - Strategies run in order and stop at the first hit
// - Lines without a title never reach a provider
// - Rate limiting trips the breaker and later lines skip the secondary provider
// - Provider failures degrade to "no match" instead of failing the line

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use crate::domain::{CandidateRecord, MediaKind, ParsedEntry, Provenance};
    use crate::integrations::{
        ForeignMatch, MockPrimaryProvider, MockSecondaryProvider, ProviderError,
    };
    use crate::services::circuit_breaker::SecondaryBreaker;
    use crate::services::resolution_engine::ResolutionEngine;

    // ========================================================================
    // TEST HELPERS
    // ========================================================================

    fn candidate(external_id: i64, title: &str, year: i32, kind: MediaKind) -> CandidateRecord {
        CandidateRecord {
            external_id,
            title: title.to_string(),
            year,
            media_kind: kind,
            poster_path: Some(format!("/{}.jpg", external_id)),
            backdrop_path: None,
            overview: String::new(),
            community_rating: 7.5,
        }
    }

    fn entry(title: &str, year: Option<u16>, kind: Option<MediaKind>) -> ParsedEntry {
        ParsedEntry {
            raw_line: title.to_string(),
            title: title.to_string(),
            year_hint: year,
            type_hint: kind,
            platform_note: None,
            notes: year.map(|y| y.to_string()),
        }
    }

    fn engine(primary: MockPrimaryProvider, secondary: Option<MockSecondaryProvider>) -> ResolutionEngine {
        ResolutionEngine::new(
            Arc::new(primary),
            secondary.map(|s| Arc::new(s) as Arc<dyn crate::integrations::SecondaryProvider>),
            Duration::ZERO,
        )
    }

    fn transport_error() -> ProviderError {
        ProviderError::Transport {
            provider: "TMDB",
            message: "connection reset".to_string(),
        }
    }

    // ========================================================================
    // PRIMARY STRATEGIES
    // ========================================================================

    #[tokio::test]
    async fn test_primary_hit_with_year() {
        let mut primary = MockPrimaryProvider::new();
        primary
            .expect_search()
            .withf(|title, year| title == "The Matrix" && *year == Some(1999))
            .times(1)
            .returning(|_, _| Ok(vec![candidate(603, "The Matrix", 1999, MediaKind::Movie)]));
        primary.expect_cross_reference().never();

        let engine = engine(primary, None);
        let mut breaker = SecondaryBreaker::new();

        let result = engine
            .resolve(&entry("The Matrix", Some(1999), None), &mut breaker)
            .await;

        assert_eq!(result.provenance, Provenance::Primary);
        assert!(result.is_accepted());
        assert_eq!(result.candidate.as_ref().map(|c| c.external_id), Some(603));
        assert_eq!(result.notes.as_deref(), Some("1999"));
    }

    #[tokio::test]
    async fn test_retry_without_year() {
        let mut primary = MockPrimaryProvider::new();
        primary
            .expect_search()
            .withf(|title, year| title == "Dune" && *year == Some(2021))
            .times(1)
            .returning(|_, _| Ok(vec![]));
        primary
            .expect_search()
            .withf(|title, year| title == "Dune" && year.is_none())
            .times(1)
            .returning(|_, _| Ok(vec![candidate(438631, "Dune", 2021, MediaKind::Movie)]));

        let mut secondary = MockSecondaryProvider::new();
        secondary.expect_lookup().never();

        let engine = engine(primary, Some(secondary));
        let mut breaker = SecondaryBreaker::new();

        let result = engine
            .resolve(&entry("Dune", Some(2021), None), &mut breaker)
            .await;

        assert_eq!(result.provenance, Provenance::Primary);
        assert!(result.is_accepted());
        assert_eq!(result.candidate.map(|c| c.external_id), Some(438631));
    }

    #[tokio::test]
    async fn test_no_retry_without_year_hint() {
        let mut primary = MockPrimaryProvider::new();
        primary.expect_search().times(1).returning(|_, _| Ok(vec![]));

        let engine = engine(primary, None);
        let mut breaker = SecondaryBreaker::new();

        let result = engine
            .resolve(&entry("Nonexistent Title", None, None), &mut breaker)
            .await;

        assert_eq!(result.provenance, Provenance::None);
        assert!(!result.is_accepted());
    }

    #[tokio::test]
    async fn test_type_hint_filters_results() {
        let mut primary = MockPrimaryProvider::new();
        primary.expect_search().times(1).returning(|_, _| {
            Ok(vec![
                candidate(1, "Fargo", 1996, MediaKind::Movie),
                candidate(60622, "Fargo", 2014, MediaKind::Series),
            ])
        });

        let engine = engine(primary, None);
        let mut breaker = SecondaryBreaker::new();

        let result = engine
            .resolve(&entry("Fargo", None, Some(MediaKind::Series)), &mut breaker)
            .await;

        let chosen = result.candidate.expect("series match");
        assert_eq!(chosen.external_id, 60622);
        assert_eq!(chosen.media_kind, MediaKind::Series);
    }

    #[tokio::test]
    async fn test_empty_title_makes_no_calls() {
        let mut primary = MockPrimaryProvider::new();
        primary.expect_search().never();
        primary.expect_cross_reference().never();
        let mut secondary = MockSecondaryProvider::new();
        secondary.expect_lookup().never();

        let engine = ResolutionEngine::new(
            Arc::new(primary),
            Some(Arc::new(secondary)),
            Duration::from_secs(5),
        );
        let mut breaker = SecondaryBreaker::new();

        let started = Instant::now();
        let result = engine.resolve(&ParsedEntry::empty("2019"), &mut breaker).await;

        assert!(result.candidate.is_none());
        assert!(!result.is_accepted());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    // ========================================================================
    // SECONDARY STRATEGY
    // ========================================================================

    #[tokio::test]
    async fn test_secondary_cross_reference() {
        let mut primary = MockPrimaryProvider::new();
        primary.expect_search().times(2).returning(|_, _| Ok(vec![]));
        primary
            .expect_cross_reference()
            .withf(|id| id == "tt0111161")
            .times(1)
            .returning(|_| {
                Ok(Some(candidate(278, "The Shawshank Redemption", 1994, MediaKind::Movie)))
            });

        let mut secondary = MockSecondaryProvider::new();
        secondary
            .expect_lookup()
            .withf(|title, year, kind| {
                title == "Die Verurteilten" && *year == Some(1994) && *kind == Some(MediaKind::Movie)
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(Some(ForeignMatch {
                    foreign_id: "tt0111161".to_string(),
                    title: Some("The Shawshank Redemption".to_string()),
                }))
            });

        let engine = engine(primary, Some(secondary));
        let mut breaker = SecondaryBreaker::new();

        let result = engine
            .resolve(
                &entry("Die Verurteilten", Some(1994), Some(MediaKind::Movie)),
                &mut breaker,
            )
            .await;

        assert_eq!(result.provenance, Provenance::Secondary);
        assert!(result.is_accepted());
        assert_eq!(result.candidate.map(|c| c.external_id), Some(278));
        assert!(!breaker.is_open());
    }

    #[tokio::test]
    async fn test_secondary_id_unknown_to_primary() {
        let mut primary = MockPrimaryProvider::new();
        primary.expect_search().times(1).returning(|_, _| Ok(vec![]));
        primary.expect_cross_reference().times(1).returning(|_| Ok(None));

        let mut secondary = MockSecondaryProvider::new();
        secondary.expect_lookup().times(1).returning(|_, _, _| {
            Ok(Some(ForeignMatch {
                foreign_id: "tt9999999".to_string(),
                title: None,
            }))
        });

        let engine = engine(primary, Some(secondary));
        let mut breaker = SecondaryBreaker::new();

        let result = engine.resolve(&entry("Obscure", None, None), &mut breaker).await;

        assert_eq!(result.provenance, Provenance::None);
        assert!(result.candidate.is_none());
    }

    #[tokio::test]
    async fn test_rate_limit_trips_breaker_and_skips_later_lookups() {
        let mut primary = MockPrimaryProvider::new();
        primary.expect_search().times(2).returning(|_, _| Ok(vec![]));
        primary.expect_cross_reference().never();

        let mut secondary = MockSecondaryProvider::new();
        secondary
            .expect_lookup()
            .times(1)
            .returning(|_, _, _| Err(ProviderError::RateLimitExceeded));

        let engine = engine(primary, Some(secondary));
        let mut breaker = SecondaryBreaker::new();

        let first = engine.resolve(&entry("First", None, None), &mut breaker).await;
        assert!(first.candidate.is_none());
        assert!(breaker.is_open());

        let second = engine.resolve(&entry("Second", None, None), &mut breaker).await;
        assert!(second.candidate.is_none());
    }

    #[tokio::test]
    async fn test_open_breaker_skips_secondary_even_after_primary_failure() {
        let mut primary = MockPrimaryProvider::new();
        primary.expect_search().times(1).returning(|_, _| Err(transport_error()));

        let mut secondary = MockSecondaryProvider::new();
        secondary.expect_lookup().never();

        let engine = engine(primary, Some(secondary));
        let mut breaker = SecondaryBreaker::new();
        breaker.trip();

        let result = engine.resolve(&entry("Anything", None, None), &mut breaker).await;
        assert!(result.candidate.is_none());
    }

    // ========================================================================
    // FAILURE HANDLING
    // ========================================================================

    #[tokio::test]
    async fn test_primary_transport_error_degrades_to_unmatched() {
        let mut primary = MockPrimaryProvider::new();
        primary.expect_search().times(1).returning(|_, _| Err(transport_error()));
        let mut secondary = MockSecondaryProvider::new();
        secondary.expect_lookup().never();

        let engine = engine(primary, Some(secondary));
        let mut breaker = SecondaryBreaker::new();

        let result = engine
            .resolve(&entry("Alien", Some(1979), None), &mut breaker)
            .await;

        assert_eq!(result.provenance, Provenance::None);
        assert!(!result.is_accepted());
        assert!(!breaker.is_open());
    }

    #[tokio::test]
    async fn test_secondary_transport_error_keeps_breaker_closed() {
        let mut primary = MockPrimaryProvider::new();
        primary.expect_search().times(1).returning(|_, _| Ok(vec![]));

        let mut secondary = MockSecondaryProvider::new();
        secondary.expect_lookup().times(1).returning(|_, _, _| {
            Err(ProviderError::Status {
                provider: "OMDb",
                status: 503,
            })
        });

        let engine = engine(primary, Some(secondary));
        let mut breaker = SecondaryBreaker::new();

        let result = engine.resolve(&entry("Heat", None, None), &mut breaker).await;

        assert!(result.candidate.is_none());
        assert!(!breaker.is_open());
    }

    #[tokio::test]
    async fn test_courtesy_delay_after_each_line() {
        let mut primary = MockPrimaryProvider::new();
        primary
            .expect_search()
            .times(2)
            .returning(|_, _| Ok(vec![candidate(1, "X", 2000, MediaKind::Movie)]));

        let engine = ResolutionEngine::new(Arc::new(primary), None, Duration::from_millis(30));
        let mut breaker = SecondaryBreaker::new();

        let started = Instant::now();
        engine.resolve(&entry("A", None, None), &mut breaker).await;
        engine.resolve(&entry("B", None, None), &mut breaker).await;

        assert!(started.elapsed() >= Duration::from_millis(60));
    }
}
