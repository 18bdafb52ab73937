//! Vitrine - an animated row-expansion image gallery.
//!
//! Main entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;

use anyhow::Result;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging and panic hook first
    app_log::init()?;

    // Clean up old logs (7 days)
    if let Err(e) = app_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("Vitrine starting...");

    // Load configuration
    let mut config = app_core::GalleryConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        app_core::GalleryConfig::default()
    });

    // An assets directory on the command line wins over the config file
    if let Some(dir) = std::env::args().nth(1) {
        tracing::info!("Assets directory from command line: {}", dir);
        config.assets.dir = Some(PathBuf::from(dir));
    }

    // Initialize application state
    let _state = app_core::init(config)?;

    // Run the application
    app::run()
}
