use crate::config::AppConfig;
use crate::player::MediaLibrary;

/// Shared, read-only application state / 只读共享状态
pub struct AppState {
    pub config: AppConfig,
    pub library: MediaLibrary,
}

impl AppState {
    pub fn new(config: AppConfig, library: MediaLibrary) -> Self {
        Self { config, library }
    }
}
