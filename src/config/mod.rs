// src/config/mod.rs
//
// Configuration
//
// Provides:
// - ImportSettings (API keys, language, pacing)
// - Settings file location

pub mod settings;

pub use settings::{get_settings_path, ImportSettings, OMDB_KEY_ENV, TMDB_KEY_ENV};
