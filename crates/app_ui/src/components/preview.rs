//! Expanded preview view
//!
//! Shown while a row/preview pair carries the current marker. Lays out
//! the preview grid (moved row cells first, the preview's own cells
//! after, mirroring the prepend order), the preview title, and the close
//! control, then paints from node visuals. Moved cells draw at their
//! flip-interpolated rects, so the reflow glides from the row strip into
//! the grid.

use super::draw;
use crate::textures::TextureStore;
use crate::theme::Theme;
use app_core::{NodeKind, Stage};
use egui::{Align2, Context, FontFamily, FontId, Id, Order, Pos2, Rect, Sense, Stroke, Vec2};

const GRID_MARGIN: f32 = 48.0;
const GRID_COLS: usize = 5;
const GRID_GAP: f32 = 14.0;
const TITLE_BAND_H: f32 = 110.0;
const CLOSE_RADIUS: f32 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewAction {
    CloseClicked,
}

pub struct PreviewView;

impl PreviewView {
    pub fn new() -> Self {
        Self
    }

    /// Lay out and paint the preview layer. `accept_close` marks whether
    /// a close click would currently be honored (pointer feedback only;
    /// the controller re-checks).
    pub fn show(
        &mut self,
        ctx: &Context,
        stage: &mut Stage,
        textures: &TextureStore,
        theme: &Theme,
        accept_close: bool,
    ) -> Option<PreviewAction> {
        let row = stage.current()?;
        let screen = ctx.screen_rect();
        let mut action = None;

        egui::Area::new(Id::new("preview-layer"))
            .fixed_pos(Pos2::ZERO)
            .order(Order::Foreground)
            .show(ctx, |ui| {
                ui.set_min_size(screen.size());
                let painter = ui.painter();

                self.layout_grid(stage, row, screen);

                // grid members in container order: moved row cells lead
                for &image in &stage.grid_members(row).to_vec() {
                    let asset = match stage.node(image).kind {
                        NodeKind::RowImage { asset, .. }
                        | NodeKind::PreviewImage { asset, .. } => asset,
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

                let title = stage.row(row).preview.title;
                let band = draw::to_egui(stage.layout(title));
                draw::paint_title(
                    painter,
                    band,
                    &stage.row(row).label,
                    FontId::new(64.0, FontFamily::Proportional),
                    theme.background,
                    &stage.node(title).visual,
                );

                if stage.close_shown() {
                    action = self.close_control(ui, stage, theme, screen, accept_close);
                }
            });

        action
    }

    /// Assign this frame's rects: title band across the top, grid cells
    /// below, filled in container order
    fn layout_grid(&self, stage: &mut Stage, row: usize, screen: Rect) {
        let title = stage.row(row).preview.title;
        let band = Rect::from_min_size(
            Pos2::new(screen.min.x + GRID_MARGIN, screen.min.y + 18.0),
            Vec2::new(screen.width() - 2.0 * GRID_MARGIN, TITLE_BAND_H),
        );
        stage.set_layout(title, draw::to_stage(band));

        let members = stage.grid_members(row).to_vec();
        let grid_top = band.max.y + GRID_GAP;
        let grid_width = screen.width() - 2.0 * GRID_MARGIN;
        let cell_w = (grid_width - (GRID_COLS - 1) as f32 * GRID_GAP) / GRID_COLS as f32;
        let cell_h = cell_w * 0.72;
        for (i, &image) in members.iter().enumerate() {
            let col = i % GRID_COLS;
            let line = i / GRID_COLS;
            let cell = Rect::from_min_size(
                Pos2::new(
                    screen.min.x + GRID_MARGIN + col as f32 * (cell_w + GRID_GAP),
                    grid_top + line as f32 * (cell_h + GRID_GAP),
                ),
                Vec2::new(cell_w, cell_h),
            );
            stage.set_layout(image, draw::to_stage(cell));
        }
    }

    fn close_control(
        &self,
        ui: &mut egui::Ui,
        stage: &Stage,
        theme: &Theme,
        screen: Rect,
        accept_close: bool,
    ) -> Option<PreviewAction> {
        let node = stage.close_control();
        let opacity = stage.node(node).visual.opacity.clamp(0.0, 1.0);
        let center = Pos2::new(screen.max.x - 44.0, screen.min.y + 44.0);
        let rect = Rect::from_center_size(center, Vec2::splat(CLOSE_RADIUS * 2.0));

        let response = ui.interact(rect, Id::new("preview-close"), Sense::click());
        if opacity > 0.0 {
            let painter = ui.painter();
            let stroke_color = theme.background.gamma_multiply(opacity);
            let ring = if accept_close && response.hovered() {
                theme.accent.gamma_multiply(opacity)
            } else {
                stroke_color
            };
            painter.circle_stroke(center, CLOSE_RADIUS, Stroke::new(1.5, ring));
            painter.text(
                center,
                Align2::CENTER_CENTER,
                "✕",
                FontId::new(16.0, FontFamily::Proportional),
                stroke_color,
            );
        }

        response.clicked().then_some(PreviewAction::CloseClicked)
    }
}

impl Default for PreviewView {
    fn default() -> Self {
        Self::new()
    }
}
