//! Application configuration

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub window: WindowConfig,
    pub theme: ThemeConfig,
    pub assets: AssetsConfig,
    pub motion: MotionConfig,
    pub keybindings: HashMap<String, Vec<String>>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            theme: ThemeConfig::default(),
            assets: AssetsConfig::default(),
            motion: MotionConfig::default(),
            keybindings: default_keybindings(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub start_fullscreen: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            title: "Vitrine".to_string(),
            start_fullscreen: false,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub name: String,
    /// Optional accent override as a hex color ("#rrggbb")
    pub accent: Option<String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "dark".to_string(),
            accent: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory scanned for gallery images; placeholders are synthesized
    /// when unset or empty
    pub dir: Option<PathBuf>,
    /// Optional TTF/OTF file installed as the display face
    pub font: Option<PathBuf>,
    pub rows: usize,
    pub cells_per_row: usize,
    pub preview_cells: usize,
    /// Decode target (longest edge, pixels)
    pub max_decode_edge: u32,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            font: None,
            rows: 5,
            cells_per_row: 6,
            preview_cells: 4,
            max_decode_edge: 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Global playback rate for all timelines (1.0 = authored speed)
    pub time_scale: f32,
    /// Collapse every tween to its end state immediately
    pub reduced: bool,
    /// Seed for the randomized preview image offsets
    pub seed: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            reduced: false,
            seed: 0x5eed_cafe,
        }
    }
}

impl GalleryConfig {
    /// Load configuration from file, falling back to defaults
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::info!("Configuration loaded from {:?}", config_path);
            Ok(config)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        tracing::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "Vitrine", "Vitrine")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}

fn default_keybindings() -> HashMap<String, Vec<String>> {
    let mut kb = HashMap::new();

    kb.insert("gallery.close".into(), vec!["Escape".into()]);
    kb.insert("view.toggle_fullscreen".into(), vec!["F11".into(), "f".into()]);
    kb.insert("app.quit".into(), vec!["Ctrl+q".into()]);

    kb
}
