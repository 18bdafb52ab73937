//! Scroll-linked card deck
//!
//! A stack of cards below the gallery rows whose pose is scrubbed purely
//! by scroll position: as a card travels from the bottom edge of the
//! viewport to the top it lifts, folds backward, recedes, and darkens.
//! No interaction with the gallery state machine.

use app_core::Prng;
use egui::{Color32, Pos2, Rect, Sense, Ui, Vec2};

use crate::textures::TextureStore;
use crate::theme::Theme;

const CARD_HEIGHT: f32 = 360.0;
const CARD_GAP: f32 = 40.0;
/// Height multiplier once fully folded away (a 60 degree tilt)
const FOLD_SQUASH: f32 = 0.5;

/// Drawn pose of one card at a given scroll progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPose {
    /// Vertical offset in percent of card height (negative = upward)
    pub lift: f32,
    /// Height multiplier from the backward fold
    pub squash: f32,
    /// Overall size multiplier from depth recession
    pub scale: f32,
    /// Texture brightness, 0..=1
    pub brightness: f32,
}

/// Pose as a pure function of scroll progress: 0 entering at the bottom
/// edge, 1 leaving past the top. `max_lift` is the card's randomized
/// upward drift in percent; `max_depth` its recession in layout units
/// per 1000.
pub fn card_pose(progress: f32, max_lift: f32, max_depth: f32) -> CardPose {
    let p = progress.clamp(0.0, 1.0);
    CardPose {
        lift: -max_lift * p,
        squash: 1.0 - (1.0 - FOLD_SQUASH) * p,
        scale: 1.0 + max_depth / 1000.0 * p,
        brightness: 0.7 * (1.0 - p),
    }
}

pub struct ScrollDeck {
    /// Per-card randomized drift, fixed at startup so scrubbing is stable
    lifts: Vec<f32>,
    depths: Vec<f32>,
}

impl ScrollDeck {
    pub fn new(cards: usize, seed: u64) -> Self {
        let mut prng = Prng::new(seed ^ 0x5ca1_ab1e);
        let lifts = (0..cards).map(|_| prng.range(0.0, 100.0)).collect();
        let depths = (0..cards).map(|_| prng.range(-100.0, 0.0)).collect();
        Self { lifts, depths }
    }

    pub fn card_count(&self) -> usize {
        self.lifts.len()
    }

    pub fn show(&self, ui: &mut Ui, textures: &TextureStore, theme: &Theme) {
        let viewport = ui.clip_rect();

        for card in 0..self.card_count() {
            ui.add_space(CARD_GAP);
            let width = (ui.available_width() - 160.0).max(120.0);
            let (rect, _) = ui.allocate_exact_size(Vec2::new(width, CARD_HEIGHT), Sense::hover());
            if !ui.is_rect_visible(rect) {
                continue;
            }

            let progress =
                (viewport.max.y - rect.min.y) / (viewport.height() + rect.height());
            let pose = card_pose(progress, self.lifts[card], self.depths[card]);
            self.paint_card(ui, textures, theme, card, rect, pose);
        }
        ui.add_space(CARD_GAP);
    }

    fn paint_card(
        &self,
        ui: &Ui,
        textures: &TextureStore,
        theme: &Theme,
        card: usize,
        rect: Rect,
        pose: CardPose,
    ) {
        if pose.brightness <= 0.0 {
            return;
        }
        let center = Pos2::new(
            rect.center().x,
            rect.center().y + pose.lift / 100.0 * rect.height(),
        );
        let size = Vec2::new(
            rect.width() * pose.scale,
            rect.height() * pose.scale * pose.squash,
        );
        let drawn = Rect::from_center_size(center, size);

        let painter = ui.painter();
        let slots = textures.slot_count().max(1);
        match textures.get(card % slots) {
            Some(texture) => {
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                painter.image(
                    texture.id(),
                    drawn,
                    uv,
                    Color32::WHITE.gamma_multiply(pose.brightness),
                );
            }
            None => {
                painter.rect_filled(
                    drawn,
                    4.0,
                    theme.text_secondary.gamma_multiply(pose.brightness * 0.5),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_boundaries() {
        let entering = card_pose(0.0, 80.0, -60.0);
        assert_eq!(entering.lift, 0.0);
        assert_eq!(entering.squash, 1.0);
        assert_eq!(entering.scale, 1.0);
        assert!((entering.brightness - 0.7).abs() < 1e-6);

        let leaving = card_pose(1.0, 80.0, -60.0);
        assert_eq!(leaving.lift, -80.0);
        assert_eq!(leaving.squash, FOLD_SQUASH);
        assert!((leaving.scale - 0.94).abs() < 1e-6);
        assert_eq!(leaving.brightness, 0.0);
    }

    #[test]
    fn test_pose_clamps_out_of_range_progress() {
        assert_eq!(card_pose(-0.5, 50.0, -50.0), card_pose(0.0, 50.0, -50.0));
        assert_eq!(card_pose(1.7, 50.0, -50.0), card_pose(1.0, 50.0, -50.0));
    }

    #[test]
    fn test_pose_monotonic_darkening() {
        let mut last = f32::INFINITY;
        for i in 0..=10 {
            let pose = card_pose(i as f32 / 10.0, 30.0, -30.0);
            assert!(pose.brightness <= last);
            last = pose.brightness;
        }
    }

    #[test]
    fn test_deck_randomization_is_seed_stable() {
        let a = ScrollDeck::new(6, 7);
        let b = ScrollDeck::new(6, 7);
        let c = ScrollDeck::new(6, 8);
        assert_eq!(a.lifts, b.lifts);
        assert_eq!(a.depths, b.depths);
        assert_ne!(a.lifts, c.lifts);
        for &lift in &a.lifts {
            assert!((0.0..100.0).contains(&lift));
        }
        for &depth in &a.depths {
            assert!((-100.0..0.0).contains(&depth));
        }
    }
}
