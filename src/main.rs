// src/main.rs

#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

use std::sync::Arc;

use anyhow::Context;
use tauri::Emitter;

use mediatrack::application::commands::*;
use mediatrack::application::state::AppState;
use mediatrack::config::{get_settings_path, ImportSettings};
use mediatrack::db::{create_connection_pool, initialize_database};
use mediatrack::events::{register_import_audit_handlers, EventBus, ImportCommitCompleted};
use mediatrack::repositories::{MediaRepository, SqliteMediaRepository};

/// Window event telling views to reload the library
const LIBRARY_CHANGED_EVENT: &str = "library-changed";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. CONFIGURATION
    let settings = ImportSettings::load().context("failed to load settings")?;
    let settings_path = get_settings_path()?;

    // 2. INFRASTRUCTURE
    let event_bus = EventBus::new();
    let pool = Arc::new(create_connection_pool().context("failed to open database")?);
    {
        let conn = pool.get()?;
        initialize_database(&conn)?;
    }

    // 3. REPOSITORIES
    let media_repository: Arc<dyn MediaRepository> =
        Arc::new(SqliteMediaRepository::new(Arc::clone(&pool)));

    // 4. EVENT HANDLER REGISTRATION
    register_import_audit_handlers(&event_bus);

    // 5. APPLICATION STATE
    let app_state = AppState::new(settings, settings_path, media_repository, event_bus.clone());

    // 6. TAURI BOOTSTRAP
    tauri::Builder::default()
        .manage(app_state)
        .setup(move |app| {
            let handle = app.handle().clone();
            event_bus.subscribe::<ImportCommitCompleted, _>(move |event| {
                if let Err(e) = handle.emit(LIBRARY_CHANGED_EVENT, event.succeeded) {
                    log::warn!("Failed to emit {}: {}", LIBRARY_CHANGED_EVENT, e);
                }
            });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            run_import,
            toggle_import_match,
            commit_import,
            discard_import,
            get_import_state,
            list_media,
            get_settings,
            save_settings,
        ])
        .run(tauri::generate_context!())
        .context("error while running tauri application")?;

    Ok(())
}
