// src/events/handlers/mod.rs
//
// Event Handlers - INTERNAL MODULE
//
// Handlers use closure-based subscription via EventBus::subscribe.

pub mod import_audit_handler;

// Only export the registration function, not handler functions
pub use import_audit_handler::register_import_audit_handlers;
