//! Gallery rows view
//!
//! Lays out the row list, writes every node's rect back to the stage
//! (the timelines and the flip capture read them), paints from the node
//! visuals, and reports pointer gestures. All gating lives in the
//! controller; this view reports everything it sees.

use super::draw;
use crate::textures::TextureStore;
use crate::theme::Theme;
use app_core::{NodeKind, Stage};
use egui::{FontFamily, FontId, Sense, Ui, Vec2};

const ROW_HEIGHT: f32 = 110.0;
const ROW_PADDING: f32 = 24.0;
const CELL_GAP: f32 = 10.0;

/// Pointer gestures on rows, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowsAction {
    Hovered(usize),
    Unhovered(usize),
    Clicked(usize),
}

pub struct GalleryRows {
    hovered: Option<usize>,
}

impl GalleryRows {
    pub fn new() -> Self {
        Self { hovered: None }
    }

    /// Lay out and paint all rows; returns the frame's pointer gestures
    pub fn show(
        &mut self,
        ui: &mut Ui,
        stage: &mut Stage,
        textures: &TextureStore,
        theme: &Theme,
    ) -> Vec<RowsAction> {
        let mut actions = Vec::new();
        let mut now_hovered = None;

        for row in 0..stage.row_count() {
            let desired = Vec2::new(ui.available_width(), ROW_HEIGHT);
            let (rect, response) =
                ui.allocate_exact_size(desired, Sense::click());
            if response.hovered() {
                now_hovered = Some(row);
            }
            if response.clicked() {
                actions.push(RowsAction::Clicked(row));
            }

            stage.set_row_rect(row, draw::to_stage(rect));
            self.layout_row(stage, row, rect);

            if ui.is_rect_visible(rect) {
                self.paint_row(ui, stage, textures, theme, row, rect);
            }
        }

        if now_hovered != self.hovered {
            if let Some(prev) = self.hovered {
                actions.push(RowsAction::Unhovered(prev));
            }
            if let Some(next) = now_hovered {
                actions.push(RowsAction::Hovered(next));
            }
            self.hovered = now_hovered;
        }

        actions
    }

    /// Write this frame's rects for the title and any image cells still
    /// living in the row's wrapper. Cells that moved to the preview grid
    /// get their rects from the preview view instead.
    fn layout_row(&self, stage: &mut Stage, row: usize, rect: egui::Rect) {
        let title = stage.row(row).title;
        let title_band = egui::Rect::from_min_size(
            egui::Pos2::new(rect.min.x + ROW_PADDING, rect.min.y),
            Vec2::new(rect.width() * 0.42, rect.height()),
        );
        stage.set_layout(title, draw::to_stage(title_band));

        let images = stage.row(row).images.clone();
        let cell_edge = rect.height() - 2.0 * CELL_GAP;
        let strip_width = images.len() as f32 * cell_edge
            + images.len().saturating_sub(1) as f32 * CELL_GAP;
        let strip_left = rect.max.x - ROW_PADDING - strip_width;
        for (cell, &image) in images.iter().enumerate() {
            if !stage.wrap_members(row).contains(&image) {
                continue;
            }
            let cell_rect = egui::Rect::from_min_size(
                egui::Pos2::new(
                    strip_left + cell as f32 * (cell_edge + CELL_GAP),
                    rect.min.y + CELL_GAP,
                ),
                Vec2::splat(cell_edge),
            );
            stage.set_layout(image, draw::to_stage(cell_rect));
        }
    }

    fn paint_row(
        &self,
        ui: &Ui,
        stage: &Stage,
        textures: &TextureStore,
        theme: &Theme,
        row: usize,
        rect: egui::Rect,
    ) {
        let painter = ui.painter();
        let model = stage.row(row);

        // hairline between rows
        painter.hline(
            rect.x_range(),
            rect.min.y,
            egui::Stroke::new(1.0, theme.text_secondary.gamma_multiply(0.25)),
        );

        let title_band = draw::to_egui(stage.layout(model.title));
        let switched = stage.switched(model.title);
        let (font, color) = if switched {
            (
                FontId::new(30.0, FontFamily::Monospace),
                theme.accent,
            )
        } else {
            (
                FontId::new(32.0, FontFamily::Proportional),
                theme.text,
            )
        };
        draw::paint_title(
            painter,
            title_band,
            &model.label,
            font,
            color,
            &stage.node(model.title).visual,
        );

        for &image in &model.images {
            if !stage.wrap_members(row).contains(&image) {
                continue;
            }
            let asset = match stage.node(image).kind {
                NodeKind::RowImage { asset, .. } => asset,
                _ => continue,
            };
            draw::paint_image_cell(
                painter,
                draw::to_egui(stage.draw_rect(image)),
                &stage.node(image).visual,
                textures.get(asset),
                theme.text_secondary,
            );
        }
    }
}

impl Default for GalleryRows {
    fn default() -> Self {
        Self::new()
    }
}
