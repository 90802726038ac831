// src/events/handlers/import_audit_handler.rs
//
// Import audit trail
//
// Writes one info line per imported item and one per finished batch, so a
// user can see afterwards what a smart import added to the library.
//
// CRITICAL RULES:
// - Observes only, never touches storage
// - Uses closure-based subscription (EventHandler is internal to bus)

use crate::events::types::{
    ImportBatchCompleted, ImportCommitCompleted, MediaImported, SecondaryProviderExhausted,
};
use crate::events::EventBus;

pub fn register_import_audit_handlers(bus: &EventBus) {
    bus.subscribe::<ImportBatchCompleted, _>(|event| {
        log::info!(
            "[IMPORT] Batch {} resolved {} of {} lines ({} unmatched)",
            event.batch_id,
            event.matched,
            event.total,
            event.unmatched
        );
    });

    bus.subscribe::<SecondaryProviderExhausted, _>(|event| {
        log::info!(
            "[IMPORT] Batch {} lost the secondary provider at line {}",
            event.batch_id,
            event.line_index + 1
        );
    });

    bus.subscribe::<MediaImported, _>(|event| {
        log::info!(
            "[IMPORT] Added '{}' ({} {}) as {}",
            event.title,
            event.media_kind,
            event.external_id,
            event.media_id
        );
    });

    bus.subscribe::<ImportCommitCompleted, _>(|event| {
        log::info!(
            "[IMPORT] Batch {} committed: {} added, {} failed",
            event.batch_id,
            event.succeeded,
            event.failed
        );
    });

    log::debug!("[IMPORT] Audit handlers registered");
}
