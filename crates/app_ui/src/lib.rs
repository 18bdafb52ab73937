//! Vitrine UI Layer
//!
//! Provides:
//! - egui-based gallery views
//! - wgpu surface management
//! - Input handling
//! - Texture bridging for preloaded assets

pub mod components;
pub mod input;
pub mod renderer;
pub mod textures;
pub mod theme;

pub use input::InputHandler;
pub use renderer::Renderer;
pub use textures::TextureStore;
pub use theme::Theme;
