// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO event emission
// - Explicit SQL only

pub mod media_repository;

pub use media_repository::{MediaRepository, SqliteMediaRepository};

#[cfg(test)]
pub use media_repository::MockMediaRepository;
