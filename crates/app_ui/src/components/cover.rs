//! Cover overlay
//!
//! A full-width band whose top edge and height the open/close timelines
//! animate: it sits exactly over the clicked row, expands to the whole
//! viewport, and collapses back toward the row's vertical center on
//! close. Painted between the rows and the preview grid.

use app_core::Stage;
use egui::{Context, Id, Order, Pos2, Rect, Vec2};

use crate::theme::Theme;

pub struct CoverOverlay;

impl CoverOverlay {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&self, ctx: &Context, stage: &Stage, theme: &Theme) {
        let visual = stage.node(stage.cover()).visual;
        let opacity = visual.opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 || visual.height <= 0.0 {
            return;
        }

        let screen = ctx.screen_rect();
        let rect = Rect::from_min_size(
            Pos2::new(screen.min.x, visual.top),
            Vec2::new(screen.width(), visual.height),
        );

        egui::Area::new(Id::new("cover-layer"))
            .fixed_pos(Pos2::ZERO)
            .order(Order::Middle)
            .interactable(false)
            .show(ctx, |ui| {
                ui.painter()
                    .rect_filled(rect, 0.0, theme.cover.gamma_multiply(opacity));
            });
    }
}

impl Default for CoverOverlay {
    fn default() -> Self {
        Self::new()
    }
}
