// src/application/commands/import_commands.rs
//
// Smart Import Command Handlers
//
// RULES:
// - Accept DTOs
// - Delegate to AppState
// - Return DTOs

use tauri::{AppHandle, Emitter, State};

use crate::application::dto::{ImportMatchDto, ImportProgressDto, ImportStateDto};
use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;
use crate::domain::CommitSummary;

/// Window event carrying an `ImportProgressDto` after each resolved line
pub const IMPORT_PROGRESS_EVENT: &str = "import-progress";

/// Parse and resolve pasted text. Progress is streamed as window events.
#[tauri::command]
pub async fn run_import(
    raw_text: String,
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<ImportStateDto, String> {
    state
        .start_import(&raw_text, move |progress, import_match| {
            let payload = ImportProgressDto::new(progress, import_match);
            if let Err(e) = app.emit(IMPORT_PROGRESS_EVENT, payload) {
                log::warn!("Failed to emit {}: {}", IMPORT_PROGRESS_EVENT, e);
            }
        })
        .await
        .to_error_response()
}

#[tauri::command]
pub async fn toggle_import_match(
    index: usize,
    state: State<'_, AppState>,
) -> Result<ImportMatchDto, String> {
    state.toggle_match(index).await.to_error_response()
}

#[tauri::command]
pub async fn commit_import(state: State<'_, AppState>) -> Result<CommitSummary, String> {
    state.commit_import().await.to_error_response()
}

#[tauri::command]
pub async fn discard_import(state: State<'_, AppState>) -> Result<(), String> {
    state.discard_import().await.to_error_response()
}

#[tauri::command]
pub async fn get_import_state(state: State<'_, AppState>) -> Result<ImportStateDto, String> {
    Ok(state.import_state().await)
}
