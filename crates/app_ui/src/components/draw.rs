//! Shared painting helpers for stage nodes
//!
//! Timelines write node visuals in stage space (logical points, same as
//! egui); these helpers turn a node's base rect plus its visual into
//! egui shapes. Percent offsets are relative to the node's own size,
//! matching how the timelines were authored.

use app_core::Visual;
use egui::emath::Rot2;
use egui::epaint::TextShape;
use egui::{Color32, FontId, Painter, Pos2, Rect, TextureHandle, Vec2};

pub fn to_egui(rect: app_core::Rect) -> Rect {
    Rect::from_min_size(Pos2::new(rect.x, rect.y), Vec2::new(rect.w, rect.h))
}

pub fn to_stage(rect: Rect) -> app_core::Rect {
    app_core::Rect::new(rect.min.x, rect.min.y, rect.width(), rect.height())
}

/// Base rect after the node's percent offsets and scale
pub fn visual_rect(base: Rect, visual: &Visual) -> Rect {
    let offset = Vec2::new(
        visual.x_percent / 100.0 * base.width(),
        visual.y_percent / 100.0 * base.height(),
    );
    Rect::from_center_size(base.center() + offset, base.size() * visual.scale.max(0.0))
}

/// Paint one image cell, tinted by its opacity. Cells without a texture
/// yet get a flat placeholder fill.
pub fn paint_image_cell(
    painter: &Painter,
    base: Rect,
    visual: &Visual,
    texture: Option<&TextureHandle>,
    fallback: Color32,
) {
    let opacity = visual.opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || visual.scale <= 0.0 {
        return;
    }
    let rect = visual_rect(base, visual);
    match texture {
        Some(texture) => {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE.gamma_multiply(opacity));
        }
        None => {
            painter.rect_filled(rect, 2.0, fallback.gamma_multiply(opacity * 0.6));
        }
    }
}

/// Paint a title line inside its band, honoring the node's vertical
/// percent offset and rotation. The band clips, so a title at
/// `y_percent ±100` is fully out of view.
pub fn paint_title(
    painter: &Painter,
    band: Rect,
    text: &str,
    font: FontId,
    color: Color32,
    visual: &Visual,
) {
    let painter = painter.with_clip_rect(band);
    let galley = painter.layout_no_wrap(text.to_string(), font, color);
    let size = galley.size();
    let dy = visual.y_percent / 100.0 * band.height();
    let pos = Pos2::new(band.min.x, band.center().y - size.y / 2.0 + dy);

    if visual.rotation != 0.0 {
        // rotate about the configured pivot edge by pre-rotating the
        // anchor, since TextShape spins around its own position
        let angle = visual.rotation.to_radians();
        let pivot = Pos2::new(pos.x + visual.origin_x * size.x, pos.y + size.y / 2.0);
        let rot = Rot2::from_angle(angle);
        let rotated = pivot + rot * (pos - pivot);
        let mut shape = TextShape::new(rotated, galley, color);
        shape.angle = angle;
        painter.add(shape);
    } else {
        painter.galley(pos, galley, color);
    }
}
