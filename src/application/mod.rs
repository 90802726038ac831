// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between the UI (Tauri) and the import services
// - Translates between DTOs and domain values
// - Commands are compiled only with the `desktop` feature

pub mod dto;
pub mod error_handling;
pub mod state;

#[cfg(feature = "desktop")]
pub mod commands;

pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;

#[cfg(feature = "desktop")]
pub use commands::*;
