// src/integrations/omdb/client.rs
//
// OMDb API Integration - secondary metadata provider
//
// Single-result title lookup. Its only job in the import pipeline is to
// hand back an IMDb id that the primary provider can cross-reference.
//
// OMDb signals quota exhaustion in the body ("Request limit reached!"),
// usually with a 401. That must surface as RateLimitExceeded, never as a
// plain "no match".

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::MediaKind;
use crate::error::{AppError, AppResult};
use crate::integrations::provider::{
    ForeignMatch, ProviderError, ProviderResult, SecondaryProvider,
};

const PROVIDER: &str = "OMDb";

pub const OMDB_BASE_URL: &str = "http://www.omdbapi.com";

const RATE_LIMIT_MARKER: &str = "Request limit reached";

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

pub struct OmdbClient {
    base_url: String,
    http_client: Client,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: &str, timeout: Duration) -> AppResult<Self> {
        if api_key.trim().is_empty() {
            return Err(AppError::Configuration("OMDb API key is missing".to_string()));
        }

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: OMDB_BASE_URL.to_string(),
            http_client,
            api_key: api_key.trim().to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SecondaryProvider for OmdbClient {
    async fn lookup(
        &self,
        title: &str,
        year_hint: Option<u16>,
        kind_hint: Option<MediaKind>,
    ) -> ProviderResult<Option<ForeignMatch>> {
        let mut query = vec![("apikey", self.api_key.clone()), ("t", title.to_string())];
        if let Some(year) = year_hint {
            query.push(("y", year.to_string()));
        }
        if let Some(kind) = kind_hint {
            query.push(("type", omdb_type(kind).to_string()));
        }

        let response = self
            .http_client
            .get(format!("{}/", self.base_url))
            .query(&query)
            .send()
            .await
            .map_err(|e| ProviderError::Transport {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ProviderError::Transport {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

        classify_response(status, &body)
    }
}

fn omdb_type(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "movie",
        MediaKind::Series => "series",
    }
}

/// Turn an OMDb reply into match / no match / rate limit / failure.
/// The body is inspected before the status because the limit reply is a 401.
fn classify_response(status: u16, body: &str) -> ProviderResult<Option<ForeignMatch>> {
    let parsed: LookupResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            if body.contains(RATE_LIMIT_MARKER) {
                return Err(ProviderError::RateLimitExceeded);
            }
            if !(200..300).contains(&status) {
                return Err(ProviderError::Status {
                    provider: PROVIDER,
                    status,
                });
            }
            return Err(ProviderError::Decode {
                provider: PROVIDER,
                message: e.to_string(),
            });
        }
    };

    if parsed.response == "True" {
        return Ok(parsed
            .imdb_id
            .filter(|id| !id.is_empty())
            .map(|foreign_id| ForeignMatch {
                foreign_id,
                title: parsed.title,
            }));
    }

    match parsed.error.as_deref() {
        Some(error) if error.contains(RATE_LIMIT_MARKER) => Err(ProviderError::RateLimitExceeded),
        Some(error) => {
            log::debug!("OMDb lookup without result: {}", error);
            Ok(None)
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_requires_api_key() {
        assert!(OmdbClient::new("", Duration::from_secs(5)).is_err());
    }

    #[test]
    fn test_successful_lookup() {
        let body = r#"{"Title":"The Shawshank Redemption","Year":"1994","imdbID":"tt0111161","Type":"movie","Response":"True"}"#;
        let result = classify_response(200, body).unwrap().unwrap();
        assert_eq!(result.foreign_id, "tt0111161");
        assert_eq!(result.title.as_deref(), Some("The Shawshank Redemption"));
    }

    #[test]
    fn test_not_found_is_plain_no_match() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
        assert_eq!(classify_response(200, body), Ok(None));
    }

    #[test]
    fn test_rate_limit_is_distinguished() {
        let body = r#"{"Response":"False","Error":"Request limit reached!"}"#;
        assert_eq!(classify_response(401, body), Err(ProviderError::RateLimitExceeded));
        assert_eq!(classify_response(200, body), Err(ProviderError::RateLimitExceeded));
    }

    #[test]
    fn test_garbage_body_with_error_status() {
        let result = classify_response(503, "<html>Service Unavailable</html>");
        assert_eq!(
            result,
            Err(ProviderError::Status {
                provider: "OMDb",
                status: 503
            })
        );
    }

    #[test]
    fn test_garbage_body_with_ok_status() {
        assert!(matches!(
            classify_response(200, "not json"),
            Err(ProviderError::Decode { .. })
        ));
    }

    #[test]
    fn test_type_parameter() {
        assert_eq!(omdb_type(MediaKind::Movie), "movie");
        assert_eq!(omdb_type(MediaKind::Series), "series");
    }
}
