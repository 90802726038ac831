// src/application/commands/mod.rs
//
// Tauri Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between UI and AppState
// - Commands accept DTOs, return DTOs
// - Commands handle error conversion for Tauri
// - Commands NEVER contain business logic

pub mod import_commands;
pub mod media_commands;
pub mod settings_commands;

pub use import_commands::*;
pub use media_commands::*;
pub use settings_commands::*;
