pub mod client;

pub use client::{OmdbClient, OMDB_BASE_URL};
