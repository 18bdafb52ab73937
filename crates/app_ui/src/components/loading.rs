//! Startup loading overlay
//!
//! Covers the gallery until preloading resolves; rows stay hidden while
//! images and the display font are still settling.

use app_core::Stage;
use egui::{Align2, Context, FontFamily, FontId, Id, Order, Pos2};

use crate::textures::TextureStore;
use crate::theme::Theme;

pub struct LoadingOverlay;

impl LoadingOverlay {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&self, ctx: &Context, stage: &Stage, textures: &TextureStore, theme: &Theme) {
        if !stage.loading() {
            return;
        }

        let screen = ctx.screen_rect();
        egui::Area::new(Id::new("loading-layer"))
            .fixed_pos(Pos2::ZERO)
            .order(Order::Tooltip)
            .interactable(false)
            .show(ctx, |ui| {
                let painter = ui.painter();
                painter.rect_filled(screen, 0.0, theme.background);

                let center = screen.center();
                painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    "VITRINE",
                    FontId::new(40.0, FontFamily::Proportional),
                    theme.text,
                );

                // trailing dots cycle with wall time
                let dots = (ui.input(|i| i.time) * 2.0) as usize % 4;
                painter.text(
                    Pos2::new(center.x, center.y + 48.0),
                    Align2::CENTER_CENTER,
                    format!(
                        "loading {} / {}{}",
                        textures.loaded(),
                        textures.slot_count(),
                        ".".repeat(dots)
                    ),
                    FontId::new(14.0, FontFamily::Monospace),
                    theme.text_secondary,
                );
            });
    }
}

impl Default for LoadingOverlay {
    fn default() -> Self {
        Self::new()
    }
}
