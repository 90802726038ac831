// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// line_parser -> resolution_engine (+ circuit_breaker) -> import_session

pub mod circuit_breaker;
pub mod import_session;
pub mod line_parser;
pub mod resolution_engine;

#[cfg(test)]
mod resolution_engine_tests;

pub use circuit_breaker::SecondaryBreaker;
pub use import_session::BatchImportSession;
pub use line_parser::LineParser;
pub use resolution_engine::ResolutionEngine;
