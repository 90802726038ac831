// src/services/resolution_engine.rs
//
// Resolution Engine - tiered lookup of one parsed import line
//
// CRITICAL RULES:
// - Never fails: every provider error degrades the line to "no match"
// - Strategies run in a fixed order and stop at the first hit
// - The secondary provider is consulted only while the breaker is closed
// - One courtesy delay after each line that reached the network

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{CandidateRecord, ImportMatch, MediaKind, ParsedEntry, Provenance};
use crate::integrations::{PrimaryProvider, ProviderError, SecondaryProvider};
use crate::services::circuit_breaker::SecondaryBreaker;

pub struct ResolutionEngine {
    primary: Arc<dyn PrimaryProvider>,
    secondary: Option<Arc<dyn SecondaryProvider>>,
    courtesy_delay: Duration,
}

impl ResolutionEngine {
    pub fn new(
        primary: Arc<dyn PrimaryProvider>,
        secondary: Option<Arc<dyn SecondaryProvider>>,
        courtesy_delay: Duration,
    ) -> Self {
        Self {
            primary,
            secondary,
            courtesy_delay,
        }
    }

    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }

    /// Resolve one entry against the providers.
    ///
    /// 1. primary search with the year hint
    /// 2. primary search without the year (only if a year was given)
    /// 3. secondary lookup, then primary cross-reference of its id
    pub async fn resolve(&self, entry: &ParsedEntry, breaker: &mut SecondaryBreaker) -> ImportMatch {
        if !entry.has_title() {
            log::debug!("Skipping line without title: '{}'", entry.raw_line);
            return ImportMatch::unmatched(entry.clone());
        }

        let outcome = self.run_strategies(entry, breaker).await;

        tokio::time::sleep(self.courtesy_delay).await;

        match outcome {
            Ok(Some((candidate, provenance))) => {
                log::debug!(
                    "Resolved '{}' -> {} ({}, {})",
                    entry.title,
                    candidate.title,
                    candidate.external_id,
                    provenance
                );
                ImportMatch::found(entry.clone(), candidate, provenance)
            }
            Ok(None) => {
                log::debug!("No match for '{}'", entry.title);
                ImportMatch::unmatched(entry.clone())
            }
            Err(e) => {
                log::warn!("Lookup for '{}' failed, leaving it unmatched: {}", entry.title, e);
                ImportMatch::unmatched(entry.clone())
            }
        }
    }

    async fn run_strategies(
        &self,
        entry: &ParsedEntry,
        breaker: &mut SecondaryBreaker,
    ) -> Result<Option<(CandidateRecord, Provenance)>, ProviderError> {
        // Strategy A: year-aware primary search
        let results = self.primary.search(&entry.title, entry.year_hint).await?;
        if let Some(candidate) = first_of_kind(results, entry.type_hint) {
            return Ok(Some((candidate, Provenance::Primary)));
        }

        // Strategy B: retry without the year
        if entry.year_hint.is_some() {
            let results = self.primary.search(&entry.title, None).await?;
            if let Some(candidate) = first_of_kind(results, entry.type_hint) {
                return Ok(Some((candidate, Provenance::Primary)));
            }
        }

        // Strategy C: secondary lookup bridged back to the primary catalogue
        let Some(secondary) = &self.secondary else {
            return Ok(None);
        };
        if breaker.is_open() {
            return Ok(None);
        }

        let foreign = match secondary
            .lookup(&entry.title, entry.year_hint, entry.type_hint)
            .await
        {
            Ok(Some(foreign)) => foreign,
            Ok(None) => return Ok(None),
            Err(ProviderError::RateLimitExceeded) => {
                breaker.trip();
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let record = self.primary.cross_reference(&foreign.foreign_id).await?;
        Ok(record.map(|candidate| (candidate, Provenance::Secondary)))
    }
}

/// First result matching the type hint, or simply the first without a hint
fn first_of_kind(results: Vec<CandidateRecord>, kind: Option<MediaKind>) -> Option<CandidateRecord> {
    results
        .into_iter()
        .find(|candidate| kind.map_or(true, |k| candidate.media_kind == k))
}
