//! Vitrine Core Domain Logic
//!
//! This crate contains:
//! - The stage (retained scene of animatable nodes)
//! - Timeline sequencing and the animator
//! - The gallery phase machine and the row interaction controller
//! - Command system
//! - Configuration
//! - Error types
//! - Asset preloading

pub mod command;
pub mod config;
pub mod controller;
pub mod easing;
pub mod error;
pub mod gallery;
pub mod motion;
pub mod preload;
pub mod row;
pub mod stage;
pub mod state;
pub mod timeline;
pub mod util;

pub use command::{Command, CommandId};
pub use config::{AssetsConfig, GalleryConfig, MotionConfig, ThemeConfig, WindowConfig};
pub use controller::RowController;
pub use easing::Ease;
pub use error::GalleryError;
pub use gallery::{GalleryState, Phase};
pub use preload::{
    is_supported_image, DecodedImage, PreloadEvent, Preloader,
};
pub use row::{PreviewModel, RowModel};
pub use stage::{Node, NodeId, NodeKind, Property, Rect, Stage, StageAction, Visual};
pub use state::AppState;
pub use timeline::{
    AnimEvent, Animator, Pos, PropSpan, Stagger, StaggerFrom, StepCall, Timeline,
    TransitionKind, Tween,
};
pub use util::{Prng, Throttle};

use once_cell::sync::OnceCell;

/// Global application state (for UI access)
static APP_STATE: OnceCell<AppState> = OnceCell::new();

/// Initialize global application state
pub fn init(config: GalleryConfig) -> anyhow::Result<&'static AppState> {
    let state = AppState::new(config);
    APP_STATE.set(state).map_err(|_| anyhow::anyhow!("AppState already initialized"))?;
    Ok(APP_STATE.get().unwrap())
}

/// Get global application state
pub fn state() -> Option<&'static AppState> {
    APP_STATE.get()
}
