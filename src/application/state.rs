// src/application/state.rs
//
// Application state managed by Tauri.
//
// The import session lives behind an async mutex: a command that runs,
// toggles or commits holds it for its whole duration, so two imports never
// interleave.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;

use crate::application::dto::{ImportMatchDto, ImportStateDto, MediaItemDto, SettingsDto};
use crate::config::ImportSettings;
use crate::domain::{CommitSummary, ImportMatch, ImportProgress, SecondaryStatus};
use crate::error::{AppError, AppResult};
use crate::events::EventBus;
use crate::repositories::MediaRepository;
use crate::services::BatchImportSession;

pub struct AppState {
    pub event_bus: EventBus,
    pub media_repository: Arc<dyn MediaRepository>,
    settings: RwLock<ImportSettings>,
    settings_path: PathBuf,
    import_session: Mutex<Option<BatchImportSession>>,
}

impl AppState {
    pub fn new(
        settings: ImportSettings,
        settings_path: PathBuf,
        media_repository: Arc<dyn MediaRepository>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            event_bus,
            media_repository,
            settings: RwLock::new(settings),
            settings_path,
            import_session: Mutex::new(None),
        }
    }

    // ========================================================================
    // SETTINGS
    // ========================================================================

    pub fn settings(&self) -> ImportSettings {
        self.settings
            .read()
            .map(|s| s.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Persist new settings. They apply from the next import run.
    pub fn save_settings(&self, dto: SettingsDto) -> AppResult<SettingsDto> {
        let settings = dto.into_settings()?;
        settings.save_to(&self.settings_path)?;

        let mut guard = self
            .settings
            .write()
            .map_err(|_| AppError::Other("Settings lock poisoned".to_string()))?;
        *guard = settings.clone();

        log::info!("Settings saved to {}", self.settings_path.display());
        Ok(SettingsDto::from(settings))
    }

    // ========================================================================
    // IMPORT SESSION
    // ========================================================================

    /// Start a new import with the current settings, replacing any previous
    /// results that were not committed
    pub async fn start_import<F>(&self, raw_text: &str, on_progress: F) -> AppResult<ImportStateDto>
    where
        F: FnMut(ImportProgress, &ImportMatch) + Send,
    {
        let settings = self.settings();
        let mut guard = self.import_session.lock().await;

        let mut session = BatchImportSession::from_settings(
            &settings,
            Arc::clone(&self.media_repository),
            self.event_bus.clone(),
        )?;
        session.run(raw_text, on_progress).await?;

        let state = snapshot(&session);
        *guard = Some(session);
        Ok(state)
    }

    pub async fn toggle_match(&self, index: usize) -> AppResult<ImportMatchDto> {
        let mut guard = self.import_session.lock().await;
        let session = guard.as_mut().ok_or(AppError::NotFound)?;

        session.toggle(index)?;
        let import_match = session.matches().get(index).ok_or(AppError::NotFound)?;
        Ok(ImportMatchDto::from_match(index, import_match))
    }

    pub async fn commit_import(&self) -> AppResult<CommitSummary> {
        let mut guard = self.import_session.lock().await;
        let session = guard.as_mut().ok_or(AppError::NotFound)?;
        session.commit().await
    }

    pub async fn discard_import(&self) -> AppResult<()> {
        let mut guard = self.import_session.lock().await;
        if let Some(session) = guard.as_mut() {
            session.discard()?;
        }
        *guard = None;
        Ok(())
    }

    pub async fn import_state(&self) -> ImportStateDto {
        let guard = self.import_session.lock().await;
        match guard.as_ref() {
            Some(session) => snapshot(session),
            None => ImportStateDto::idle(self.configured_secondary_status()),
        }
    }

    // ========================================================================
    // LIBRARY
    // ========================================================================

    pub fn list_media(&self) -> AppResult<Vec<MediaItemDto>> {
        let items = self.media_repository.list_all()?;
        Ok(items.into_iter().map(MediaItemDto::from).collect())
    }

    fn configured_secondary_status(&self) -> SecondaryStatus {
        if self.settings().omdb_key().is_some() {
            SecondaryStatus::Active
        } else {
            SecondaryStatus::Disabled
        }
    }
}

fn snapshot(session: &BatchImportSession) -> ImportStateDto {
    let progress = session.progress();
    ImportStateDto {
        phase: session.phase(),
        current: progress.current,
        total: progress.total,
        accepted_count: session.accepted_count(),
        secondary_status: session.secondary_status(),
        matches: session
            .matches()
            .iter()
            .enumerate()
            .map(|(index, m)| ImportMatchDto::from_match(index, m))
            .collect(),
    }
}
