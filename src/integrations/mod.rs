// src/integrations/mod.rs
//
// External Integrations Module
//
// Metadata providers behind the traits in `provider`.

pub mod omdb;
pub mod provider;
pub mod tmdb;

pub use omdb::OmdbClient;
pub use provider::{
    ForeignMatch, PrimaryProvider, ProviderError, ProviderResult, SecondaryProvider,
};
pub use tmdb::TmdbClient;

#[cfg(test)]
pub use provider::{MockPrimaryProvider, MockSecondaryProvider};
