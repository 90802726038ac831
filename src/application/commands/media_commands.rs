// src/application/commands/media_commands.rs

use tauri::State;

use crate::application::dto::MediaItemDto;
use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;

/// List the whole library, newest first
#[tauri::command]
pub async fn list_media(state: State<'_, AppState>) -> Result<Vec<MediaItemDto>, String> {
    state.list_media().to_error_response()
}
