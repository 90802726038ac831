// src/integrations/provider.rs
//
// Metadata provider contracts used by the import engine.
//
// The engine only depends on these traits; the HTTP clients in
// `integrations::tmdb` and `integrations::omdb` are one implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{CandidateRecord, MediaKind};

/// Failure talking to an external metadata provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Provider reported quota exhaustion. Distinct from "no match".
    #[error("Provider request limit reached")]
    RateLimitExceeded,

    #[error("{provider} request failed: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} returned status {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("Failed to parse {provider} response: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Best match returned by the secondary provider: an identifier issued by
/// a foreign catalogue (IMDb style `tt0111161`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignMatch {
    pub foreign_id: String,
    pub title: Option<String>,
}

/// Rich multi-type search provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrimaryProvider: Send + Sync {
    /// Search movies and series. Results keep the provider's relevance order.
    /// When a year is given only records released that year are returned.
    async fn search(&self, title: &str, year_hint: Option<u16>) -> ProviderResult<Vec<CandidateRecord>>;

    /// Resolve an identifier issued by the secondary provider into a
    /// canonical primary record
    async fn cross_reference(&self, foreign_id: &str) -> ProviderResult<Option<CandidateRecord>>;
}

/// Simple single-result lookup provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecondaryProvider: Send + Sync {
    /// Returns at most one match.
    /// Fails with `ProviderError::RateLimitExceeded` when the quota is spent.
    async fn lookup(
        &self,
        title: &str,
        year_hint: Option<u16>,
        kind_hint: Option<MediaKind>,
    ) -> ProviderResult<Option<ForeignMatch>>;
}
