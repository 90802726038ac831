// src/integrations/tmdb/client.rs
//
// TMDB API Integration - primary metadata provider
//
// ARCHITECTURE:
// - REST client for the TMDB v3 API
// - Maps external data -> CandidateRecord (NO domain mutation)
// - Used by ResolutionEngine through the PrimaryProvider trait
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never touches storage
// - Only movie and tv results leave this module

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::{CandidateRecord, MediaKind};
use crate::error::{AppError, AppResult};
use crate::integrations::provider::{PrimaryProvider, ProviderError, ProviderResult};

const PROVIDER: &str = "TMDB";

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// `/search/multi` response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Option<Vec<RawItem>>,
}

/// `/find/{external_id}` response
#[derive(Debug, Deserialize, Default)]
struct FindResponse {
    #[serde(default)]
    movie_results: Vec<RawItem>,
    #[serde(default)]
    tv_results: Vec<RawItem>,
}

/// Movie or tv entry as TMDB sends it. Movies carry `title`/`release_date`,
/// series carry `name`/`first_air_date`.
#[derive(Debug, Clone, Deserialize)]
struct RawItem {
    id: i64,
    title: Option<String>,
    name: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    media_type: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    overview: Option<String>,
    vote_average: Option<f64>,
}

impl RawItem {
    fn date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(self.first_air_date.as_deref())
    }

    fn is_known_kind(&self) -> bool {
        matches!(self.media_type.as_deref(), Some("movie") | Some("tv"))
    }
}

/// TMDB API Client
pub struct TmdbClient {
    base_url: String,
    http_client: Client,
    api_key: String,
    language: String,
}

impl TmdbClient {
    /// Create a new client. A blank key is a configuration error.
    pub fn new(api_key: &str, language: &str, timeout: Duration) -> AppResult<Self> {
        if api_key.trim().is_empty() {
            return Err(AppError::Configuration("TMDB API key is missing".to_string()));
        }

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: TMDB_BASE_URL.to_string(),
            http_client,
            api_key: api_key.trim().to_string(),
            language: language.to_string(),
        })
    }

    /// Point the client at another host (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> ProviderResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);

        self.http_client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .query(&[("api_key", self.api_key.as_str()), ("language", self.language.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| ProviderError::Transport {
                provider: PROVIDER,
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl PrimaryProvider for TmdbClient {
    async fn search(&self, title: &str, year_hint: Option<u16>) -> ProviderResult<Vec<CandidateRecord>> {
        let mut query = vec![("query", title.to_string())];
        if let Some(year) = year_hint {
            query.push(("year", year.to_string()));
        }

        let response = self.get("/search/multi", &query).await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: response.status().as_u16(),
            });
        }

        let body: SearchResponse = response.json().await.map_err(|e| ProviderError::Decode {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

        let candidates = filter_search_results(body.results.unwrap_or_default(), year_hint);
        log::debug!("TMDB search '{}' ({:?}): {} candidates", title, year_hint, candidates.len());

        Ok(candidates)
    }

    async fn cross_reference(&self, foreign_id: &str) -> ProviderResult<Option<CandidateRecord>> {
        let path = format!("/find/{}", foreign_id);
        let response = self
            .get(&path, &[("external_source", "imdb_id".to_string())])
            .await?;

        // An unknown id answers with an error status; that is "no record", not a failure
        if !response.status().is_success() {
            log::debug!("TMDB find {} returned {}", foreign_id, response.status());
            return Ok(None);
        }

        let body: FindResponse = response.json().await.map_err(|e| ProviderError::Decode {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

        Ok(pick_cross_reference(body))
    }
}

// ============================================================================
// INTERNAL: response mapping
// ============================================================================

/// Keep movie/tv items, then apply the year self-filter on the date prefix
fn filter_search_results(items: Vec<RawItem>, year_hint: Option<u16>) -> Vec<CandidateRecord> {
    let year_prefix = year_hint.map(|y| y.to_string());

    items
        .into_iter()
        .filter(RawItem::is_known_kind)
        .filter(|item| match &year_prefix {
            Some(prefix) => item.date().is_some_and(|d| d.starts_with(prefix.as_str())),
            None => true,
        })
        .map(map_item_to_candidate)
        .collect()
}

/// First movie result wins over tv results
fn pick_cross_reference(body: FindResponse) -> Option<CandidateRecord> {
    let FindResponse {
        movie_results,
        tv_results,
    } = body;

    if let Some(mut movie) = movie_results.into_iter().next() {
        movie.media_type = Some("movie".to_string());
        return Some(map_item_to_candidate(movie));
    }

    tv_results.into_iter().next().map(|mut tv| {
        tv.media_type = Some("tv".to_string());
        map_item_to_candidate(tv)
    })
}

fn map_item_to_candidate(item: RawItem) -> CandidateRecord {
    let is_movie = item.media_type.as_deref() == Some("movie") || item.title.is_some();

    let year = item
        .date()
        .and_then(|d| d.get(..4))
        .and_then(|y| y.parse::<i32>().ok())
        .unwrap_or(0);

    CandidateRecord {
        external_id: item.id,
        title: item.title.or(item.name).unwrap_or_default(),
        year,
        media_kind: if is_movie { MediaKind::Movie } else { MediaKind::Series },
        poster_path: item.poster_path,
        backdrop_path: item.backdrop_path,
        overview: item.overview.unwrap_or_default(),
        community_rating: item.vote_average.unwrap_or(0.0),
    }
}
