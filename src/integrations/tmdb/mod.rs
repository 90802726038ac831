pub mod client;

pub use client::{TmdbClient, TMDB_BASE_URL};
