// src/application/commands/settings_commands.rs

use tauri::State;

use crate::application::dto::SettingsDto;
use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;

#[tauri::command]
pub async fn get_settings(state: State<'_, AppState>) -> Result<SettingsDto, String> {
    Ok(SettingsDto::from(state.settings()))
}

#[tauri::command]
pub async fn save_settings(
    dto: SettingsDto,
    state: State<'_, AppState>,
) -> Result<SettingsDto, String> {
    state.save_settings(dto).to_error_response()
}
