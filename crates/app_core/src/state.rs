//! Application state management

use crate::config::GalleryConfig;
use parking_lot::RwLock;

/// Cross-cutting application state shared between the shell and the views
pub struct AppState {
    /// Application configuration
    pub config: RwLock<GalleryConfig>,

    /// Is the window in fullscreen mode?
    pub is_fullscreen: RwLock<bool>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: GalleryConfig) -> Self {
        let is_fullscreen = config.window.start_fullscreen;
        Self {
            config: RwLock::new(config),
            is_fullscreen: RwLock::new(is_fullscreen),
        }
    }

    /// Save the current configuration
    pub fn save_config(&self) -> anyhow::Result<()> {
        self.config.read().save()
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) -> bool {
        let mut fs = self.is_fullscreen.write();
        *fs = !*fs;
        *fs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_fullscreen() {
        let state = AppState::new(GalleryConfig::default());
        assert!(!*state.is_fullscreen.read());
        assert!(state.toggle_fullscreen());
        assert!(!state.toggle_fullscreen());
    }

    #[test]
    fn test_starts_fullscreen_from_config() {
        let mut config = GalleryConfig::default();
        config.window.start_fullscreen = true;
        let state = AppState::new(config);
        assert!(*state.is_fullscreen.read());
    }
}
