//! Gesture timing tables
//!
//! Durations are seconds, offsets are relative to each gesture's `start`
//! label. The overlap between steps is part of the visual design, not
//! incidental; change values here, never the step order.

use crate::easing::Ease;

// ===== Hover =====

/// Image reveal/conceal length
pub const HOVER_IMAGE_DUR: f32 = 0.4;
pub const HOVER_ENTER_IMAGE_EASE: Ease = Ease::PowerOut(3);
pub const HOVER_LEAVE_IMAGE_EASE: Ease = Ease::PowerOut(4);
/// Reverse cascade across a row's images (last cell leads)
pub const HOVER_IMAGE_STAGGER: f32 = 0.035;
pub const IMAGE_HIDDEN_SCALE: f32 = 0.8;
pub const HOVER_IMAGE_FROM_X: f32 = 20.0;

/// Title flip, phase one (out) and phase two (in); phase two starts while
/// phase one is still running
pub const TITLE_OUT_DUR: f32 = 0.1;
pub const TITLE_OUT_EASE: Ease = Ease::PowerIn(1);
pub const TITLE_IN_DUR: f32 = 0.5;
pub const TITLE_IN_EASE: Ease = Ease::ExpoOut;
pub const TITLE_IN_OFFSET: f32 = 0.1;
pub const TITLE_OFF_Y: f32 = 100.0;
pub const TITLE_TILT: f32 = 15.0;

// ===== Open =====

pub const OPEN_EASE: Ease = Ease::PowerInOut(4);
pub const OPEN_COVER_DUR: f32 = 0.9;
pub const OPEN_TITLE_DUR: f32 = 0.5;
/// Cover sits one pixel short of the row box (keeps the row border visible)
pub const COVER_BORDER_INSET: f32 = 1.0;

/// Row images flying into the preview grid
pub const GRID_FLIP_DUR: f32 = 0.9;
pub const GRID_STAGGER: f32 = 0.04;
/// The preview's own images pop in after the moved ones
pub const PREVIEW_IMAGE_DUR: f32 = 0.9;
pub const PREVIEW_DROP_MAX: f32 = 200.0;

pub const PREVIEW_TITLE_IN_DUR: f32 = 1.0;
pub const CLOSE_CONTROL_IN_DUR: f32 = 1.0;

// ===== Close =====

/// Close timeline defaults; steps below override where noted
pub const CLOSE_DUR: f32 = 0.5;
pub const CLOSE_EASE: Ease = Ease::PowerInOut(4);
pub const CLOSE_PREVIEW_TITLE_DUR: f32 = 0.6;
pub const CLOSE_COVER_EASE: Ease = Ease::PowerOut(4);
pub const CLOSE_COVER_OFFSET: f32 = 0.4;
pub const CLOSE_COVER_FADE_OFFSET: f32 = 0.9;
pub const CLOSE_COVER_FADE_DUR: f32 = 0.3;
/// Returning title cascade, radiating from the closing row
pub const CLOSE_CASCADE_EACH: f32 = 0.03;
pub const CLOSE_CASCADE_OFFSET: f32 = 0.4;
