//! Row interaction flow
//!
//! The controller is the single entry point for gallery gestures. Every
//! handler asks the phase machine first, builds a timeline from the
//! stage's current geometry, and hands it to the animator; completion
//! events flow back through `tick`. Refused gestures are silent no-ops.

use crate::gallery::{GalleryState, Phase};
use crate::motion;
use crate::stage::{NodeId, Property, Stage, StageAction};
use crate::timeline::{
    AnimEvent, Animator, Pos, PropSpan, Stagger, StepCall, Timeline, TransitionKind, Tween,
};

pub struct RowController {
    state: GalleryState,
    animator: Animator,
}

impl RowController {
    pub fn new(animator: Animator) -> Self {
        Self {
            state: GalleryState::new(),
            animator,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    pub fn active_row(&self) -> Option<usize> {
        self.state.active_row()
    }

    pub fn last_row(&self) -> Option<usize> {
        self.state.last_row()
    }

    /// Frames should keep coming while anything still moves
    pub fn needs_frames(&self) -> bool {
        self.state.is_animating() || !self.animator.is_idle()
    }

    fn row_hover_nodes(stage: &Stage, row: usize) -> Vec<NodeId> {
        let model = stage.row(row);
        let mut nodes = model.images.clone();
        nodes.push(model.title);
        nodes
    }

    /// Pointer entered row `row`. Ignored while the preview is up or on
    /// its way in; allowed again as soon as the close starts.
    pub fn pointer_enter(&mut self, row: usize, stage: &mut Stage) {
        if !self.state.can_hover() {
            return;
        }
        let nodes = Self::row_hover_nodes(stage, row);
        self.animator.kill_tweens_of(&nodes);

        let model = stage.row(row);
        let images = model.images.clone();
        let title = model.title;

        let mut tl = Timeline::new("hover-enter");
        tl.add_label("start", 0.0);
        let start = tl.position(Pos::Label("start"));
        tl.add_tween(
            &images,
            Tween::new(
                vec![
                    PropSpan::from_to(Property::Scale, motion::IMAGE_HIDDEN_SCALE, 1.0),
                    PropSpan::from_to(Property::XPercent, motion::HOVER_IMAGE_FROM_X, 0.0),
                    PropSpan::to(Property::Opacity, 1.0),
                ],
                motion::HOVER_IMAGE_DUR,
                motion::HOVER_ENTER_IMAGE_EASE,
            )
            .stagger(Stagger::reverse(motion::HOVER_IMAGE_STAGGER)),
            start,
        );
        tl.add_set(&[title], vec![PropSpan::to(Property::OriginX, 0.0)], start);
        tl.add_tween(
            &[title],
            Tween::new(
                vec![PropSpan::to(Property::YPercent, -motion::TITLE_OFF_Y)],
                motion::TITLE_OUT_DUR,
                motion::TITLE_OUT_EASE,
            )
            .on_complete(StageAction::SetSwitched { row, on: true }),
            start,
        );
        tl.add_tween(
            &[title],
            Tween::new(
                vec![
                    PropSpan::from_to(Property::YPercent, motion::TITLE_OFF_Y, 0.0),
                    PropSpan::from_to(Property::Rotation, motion::TITLE_TILT, 0.0),
                ],
                motion::TITLE_IN_DUR,
                motion::TITLE_IN_EASE,
            ),
            tl.position(Pos::After("start", motion::TITLE_IN_OFFSET)),
        );
        self.animator.play_hover(row, tl);
    }

    /// Pointer left row `row`; plays the reveal in reverse shape back to
    /// the rest pose. Same gate as enter.
    pub fn pointer_leave(&mut self, row: usize, stage: &mut Stage) {
        if !self.state.can_hover() {
            return;
        }
        let nodes = Self::row_hover_nodes(stage, row);
        self.animator.kill_tweens_of(&nodes);

        let model = stage.row(row);
        let images = model.images.clone();
        let title = model.title;

        let mut tl = Timeline::new("hover-leave");
        tl.add_label("start", 0.0);
        let start = tl.position(Pos::Label("start"));
        tl.add_tween(
            &images,
            Tween::new(
                vec![
                    PropSpan::to(Property::Opacity, 0.0),
                    PropSpan::to(Property::Scale, motion::IMAGE_HIDDEN_SCALE),
                ],
                motion::HOVER_IMAGE_DUR,
                motion::HOVER_LEAVE_IMAGE_EASE,
            ),
            start,
        );
        tl.add_tween(
            &[title],
            Tween::new(
                vec![PropSpan::to(Property::YPercent, -motion::TITLE_OFF_Y)],
                motion::TITLE_OUT_DUR,
                motion::TITLE_OUT_EASE,
            )
            .on_complete(StageAction::SetSwitched { row, on: false }),
            start,
        );
        tl.add_tween(
            &[title],
            Tween::new(
                vec![
                    PropSpan::from_to(Property::YPercent, motion::TITLE_OFF_Y, 0.0),
                    PropSpan::from_to(Property::Rotation, motion::TITLE_TILT, 0.0),
                ],
                motion::TITLE_IN_DUR,
                motion::TITLE_IN_EASE,
            ),
            tl.position(Pos::After("start", motion::TITLE_IN_OFFSET)),
        );
        self.animator.play_hover(row, tl);
    }

    /// Click on row `row`: expand it into the preview. Returns whether the
    /// gesture was accepted.
    pub fn open(&mut self, row: usize, stage: &mut Stage) -> bool {
        if !self.state.try_begin_open(row) {
            return false;
        }
        tracing::info!(row, "opening preview");

        let mut kill = stage.all_titles();
        kill.push(stage.cover());
        self.animator.kill_tweens_of(&kill);

        let model = stage.row(row);
        let preview_images = model.preview.images.clone();
        let preview_title = model.preview.title;
        let row_rect = stage.row_rect(row);
        let viewport = stage.viewport();

        // immediate side effects of the gesture, before the first frame
        // of the timeline
        stage.set_overflow_hidden(true);
        stage.set_current(row);
        for &image in &preview_images {
            stage.set_value(image, Property::Opacity, 0.0);
        }
        let cover = stage.cover();
        stage.set_value(cover, Property::Top, row_rect.y);
        stage.set_value(
            cover,
            Property::Height,
            (row_rect.h - motion::COVER_BORDER_INSET).max(0.0),
        );
        stage.set_value(cover, Property::Opacity, 1.0);
        stage.set_value(preview_title, Property::YPercent, -motion::TITLE_OFF_Y);
        stage.set_value(preview_title, Property::Rotation, motion::TITLE_TILT);
        stage.set_value(preview_title, Property::OriginX, 1.0);
        stage.set_close_shown();

        // titles flee away from the opening row
        let mut titles_up = Vec::new();
        let mut titles_down = Vec::new();
        for title in stage.all_titles() {
            if stage.layout(title).y > row_rect.y {
                titles_down.push(title);
            } else {
                titles_up.push(title);
            }
        }

        let mut tl = Timeline::new("open");
        tl.add_label("start", 0.0);
        let start = tl.position(Pos::Label("start"));
        tl.add_tween(
            &[cover],
            Tween::new(
                vec![
                    PropSpan::to(Property::Height, viewport.h),
                    PropSpan::to(Property::Top, 0.0),
                ],
                motion::OPEN_COVER_DUR,
                motion::OPEN_EASE,
            ),
            start,
        );
        tl.add_tween(
            &titles_up,
            Tween::new(
                vec![
                    PropSpan::to(Property::YPercent, -motion::TITLE_OFF_Y),
                    PropSpan::to(Property::Rotation, 0.0),
                ],
                motion::OPEN_TITLE_DUR,
                motion::OPEN_EASE,
            ),
            start,
        );
        tl.add_tween(
            &titles_down,
            Tween::new(
                vec![
                    PropSpan::to(Property::YPercent, motion::TITLE_OFF_Y),
                    PropSpan::to(Property::Rotation, 0.0),
                ],
                motion::OPEN_TITLE_DUR,
                motion::OPEN_EASE,
            ),
            start,
        );
        tl.add_call(StepCall::FlipRowToGrid { row }, start);
        tl.add_tween(
            &[preview_title],
            Tween::new(
                vec![
                    PropSpan::to(Property::YPercent, 0.0),
                    PropSpan::to(Property::Rotation, 0.0),
                ],
                motion::PREVIEW_TITLE_IN_DUR,
                motion::OPEN_EASE,
            )
            .on_complete(StageAction::SetSwitched { row, on: false }),
            start,
        );
        tl.add_tween(
            &[stage.close_control()],
            Tween::new(
                vec![PropSpan::to(Property::Opacity, 1.0)],
                motion::CLOSE_CONTROL_IN_DUR,
                motion::OPEN_EASE,
            ),
            start,
        );
        self.animator.play_transition(TransitionKind::Open, tl);
        true
    }

    /// Click on the close control (or Escape): collapse the preview back
    /// into its row. Returns whether the gesture was accepted.
    pub fn close(&mut self, stage: &mut Stage) -> bool {
        let Some(row) = self.state.try_begin_close() else {
            return false;
        };
        tracing::info!(row, "closing preview");

        let model = stage.row(row);
        let mut shrink: Vec<NodeId> = model.images.clone();
        shrink.extend_from_slice(&model.preview.images);
        let preview_title = model.preview.title;
        let row_rect = stage.row_rect(row);

        // rows scroll again as soon as the collapse starts
        stage.set_overflow_hidden(false);

        let mut tl = Timeline::new("close");
        tl.add_label("start", 0.0);
        let start = tl.position(Pos::Label("start"));
        tl.add_tween(
            &shrink,
            Tween::new(
                vec![
                    PropSpan::to(Property::Scale, 0.0),
                    PropSpan::to(Property::Opacity, 0.0),
                ],
                motion::CLOSE_DUR,
                motion::CLOSE_EASE,
            )
            .stagger(Stagger::forward(motion::GRID_STAGGER))
            .on_complete(StageAction::ReturnImagesHome { row }),
            start,
        );
        tl.add_tween(
            &[preview_title],
            Tween::new(
                vec![PropSpan::to(Property::YPercent, motion::TITLE_OFF_Y)],
                motion::CLOSE_PREVIEW_TITLE_DUR,
                motion::CLOSE_EASE,
            ),
            start,
        );
        tl.add_tween(
            &[stage.close_control()],
            Tween::new(
                vec![PropSpan::to(Property::Opacity, 0.0)],
                motion::CLOSE_DUR,
                motion::CLOSE_EASE,
            ),
            start,
        );
        tl.add_tween(
            &[stage.cover()],
            Tween::new(
                vec![
                    PropSpan::to(Property::Height, 0.0),
                    PropSpan::to(Property::Top, row_rect.center_y()),
                ],
                motion::CLOSE_DUR,
                motion::CLOSE_COVER_EASE,
            ),
            tl.position(Pos::After("start", motion::CLOSE_COVER_OFFSET)),
        );
        tl.add_tween(
            &[stage.cover()],
            Tween::new(
                vec![PropSpan::to(Property::Opacity, 0.0)],
                motion::CLOSE_COVER_FADE_DUR,
                motion::CLOSE_EASE,
            ),
            tl.position(Pos::After("start", motion::CLOSE_COVER_FADE_OFFSET)),
        );
        tl.add_tween(
            &stage.all_titles(),
            Tween::new(
                vec![PropSpan::to(Property::YPercent, 0.0)],
                motion::CLOSE_DUR,
                motion::CLOSE_EASE,
            )
            .stagger(Stagger::from_index(motion::CLOSE_CASCADE_EACH, row)),
            tl.position(Pos::After("start", motion::CLOSE_CASCADE_OFFSET)),
        );
        self.animator.play_transition(TransitionKind::Close, tl);
        true
    }

    /// Advance every live timeline by `dt` seconds and fold completion
    /// events back into the phase machine.
    pub fn tick(&mut self, dt: f32, stage: &mut Stage) {
        for event in self.animator.tick(dt, stage) {
            match event {
                AnimEvent::OpenComplete => self.state.finish_open(),
                AnimEvent::CloseComplete => {
                    stage.clear_current();
                    self.state.finish_close();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MotionConfig;
    use crate::stage::Rect;

    const DT: f32 = 1.0 / 120.0;

    fn fixture(rows: usize) -> (Stage, RowController) {
        let labels: Vec<String> = (0..rows).map(|i| format!("Row {}", i)).collect();
        let mut stage = Stage::new(&labels, 3, 2);
        stage.set_viewport(Rect::new(0.0, 0.0, 1280.0, 800.0));
        // simple stacked layout: each row 100px tall, title pinned to its
        // row top, image cells inside the row
        for row in 0..rows {
            let top = 100.0 * row as f32;
            stage.set_row_rect(row, Rect::new(0.0, top, 1280.0, 100.0));
            let title = stage.row(row).title;
            stage.set_layout(title, Rect::new(20.0, top, 300.0, 100.0));
            for (cell, &img) in stage.row(row).images.clone().iter().enumerate() {
                stage.set_layout(
                    img,
                    Rect::new(400.0 + 90.0 * cell as f32, top + 10.0, 80.0, 80.0),
                );
            }
        }
        let animator = Animator::new(rows, &MotionConfig::default());
        (stage, RowController::new(animator))
    }

    fn settle(controller: &mut RowController, stage: &mut Stage) {
        for _ in 0..2000 {
            controller.tick(DT, stage);
            if !controller.needs_frames() {
                return;
            }
        }
        panic!("animation never settled");
    }

    #[test]
    fn test_open_while_animating_is_dropped() {
        let (mut stage, mut controller) = fixture(3);
        assert!(controller.open(1, &mut stage));
        assert!(controller.is_animating());

        // a competing click changes nothing
        assert!(!controller.open(2, &mut stage));
        assert_eq!(controller.last_row(), Some(1));
        assert_eq!(controller.active_row(), Some(1));

        settle(&mut controller, &mut stage);
        assert_eq!(controller.phase(), Phase::Open { row: 1 });
    }

    #[test]
    fn test_open_then_close_restores_membership() {
        let (mut stage, mut controller) = fixture(3);
        let before: Vec<_> = stage.wrap_members(1).to_vec();

        controller.open(1, &mut stage);
        settle(&mut controller, &mut stage);
        assert!(controller.is_open());
        assert!(stage.wrap_members(1).is_empty());
        assert_eq!(stage.grid_members(1).len(), 3 + 2);

        assert!(controller.close(&mut stage));
        settle(&mut controller, &mut stage);
        assert!(!controller.is_open());
        assert!(!controller.is_animating());
        assert_eq!(stage.wrap_members(1), &before[..]);
        assert_eq!(stage.grid_members(1).len(), 2);
    }

    #[test]
    fn test_current_markers_set_and_cleared_as_pair() {
        let (mut stage, mut controller) = fixture(3);
        assert_eq!(stage.current(), None);

        controller.open(2, &mut stage);
        assert_eq!(stage.current(), Some(2));
        settle(&mut controller, &mut stage);
        assert_eq!(stage.current(), Some(2));

        controller.close(&mut stage);
        settle(&mut controller, &mut stage);
        assert_eq!(stage.current(), None);
    }

    #[test]
    fn test_hover_round_trip_returns_to_rest() {
        let (mut stage, mut controller) = fixture(2);
        let images = stage.row(0).images.clone();
        let title = stage.row(0).title;

        controller.pointer_enter(0, &mut stage);
        settle(&mut controller, &mut stage);
        assert_eq!(stage.value(images[0], Property::Opacity), 1.0);
        assert_eq!(stage.value(images[0], Property::Scale), 1.0);
        assert!(stage.switched(title));

        controller.pointer_leave(0, &mut stage);
        settle(&mut controller, &mut stage);
        for &img in &images {
            assert_eq!(stage.value(img, Property::Opacity), 0.0);
            assert_eq!(stage.value(img, Property::Scale), 0.8);
            assert_eq!(stage.value(img, Property::XPercent), 0.0);
        }
        assert_eq!(stage.value(title, Property::YPercent), 0.0);
        assert_eq!(stage.value(title, Property::Rotation), 0.0);
        assert!(!stage.switched(title));
    }

    #[test]
    fn test_open_middle_row_titles_flee_both_ways() {
        let (mut stage, mut controller) = fixture(3);
        controller.open(1, &mut stage);
        settle(&mut controller, &mut stage);

        let above = stage.value(stage.row(0).title, Property::YPercent);
        let own = stage.value(stage.row(1).title, Property::YPercent);
        let below = stage.value(stage.row(2).title, Property::YPercent);
        // rows above (and the opening row itself) exit upward, rows below
        // exit downward
        assert_eq!(above, -100.0);
        assert_eq!(own, -100.0);
        assert_eq!(below, 100.0);
        assert_eq!(controller.active_row(), Some(1));
    }

    #[test]
    fn test_click_on_other_row_while_open_is_noop() {
        let (mut stage, mut controller) = fixture(3);
        controller.open(1, &mut stage);
        settle(&mut controller, &mut stage);
        let phase = controller.phase();

        assert!(!controller.open(0, &mut stage));
        assert_eq!(controller.phase(), phase);
        assert_eq!(stage.current(), Some(1));
        // and nothing new is animating
        assert!(!controller.needs_frames());
    }

    #[test]
    fn test_close_cascade_radiates_from_last_row() {
        let (mut stage, mut controller) = fixture(3);
        controller.open(1, &mut stage);
        settle(&mut controller, &mut stage);
        controller.close(&mut stage);

        // walk to just past the cascade start: the origin row's title is
        // already moving home while its neighbours still wait their turn
        let probe = motion::CLOSE_CASCADE_OFFSET + 0.015;
        let mut clock = 0.0;
        while clock < probe {
            controller.tick(DT, &mut stage);
            clock += DT;
        }
        let t0 = stage.value(stage.row(0).title, Property::YPercent);
        let t1 = stage.value(stage.row(1).title, Property::YPercent);
        let t2 = stage.value(stage.row(2).title, Property::YPercent);
        assert!(t1 > -100.0, "origin title should be moving, got {}", t1);
        assert_eq!(t0, -100.0);
        assert_eq!(t2, 100.0);

        settle(&mut controller, &mut stage);
        assert_eq!(controller.last_row(), Some(1));
        assert!(!controller.is_open());
        assert_eq!(stage.value(stage.row(0).title, Property::YPercent), 0.0);
        assert_eq!(stage.value(stage.row(2).title, Property::YPercent), 0.0);
    }

    #[test]
    fn test_hover_ignored_while_open_allowed_while_closing() {
        let (mut stage, mut controller) = fixture(2);
        // the reverse cascade starts from the last image
        let img = stage.row(1).images[2];

        controller.open(0, &mut stage);
        settle(&mut controller, &mut stage);
        controller.pointer_enter(1, &mut stage);
        controller.tick(DT, &mut stage);
        // opacity untouched: hover was refused while open
        assert_eq!(stage.value(img, Property::Opacity), 0.0);

        controller.close(&mut stage);
        controller.pointer_enter(1, &mut stage);
        for _ in 0..8 {
            controller.tick(DT, &mut stage);
        }
        // the close is still running, yet the hover reveal is in flight
        assert!(controller.is_animating());
        assert!(stage.value(img, Property::Opacity) > 0.0);
    }

    #[test]
    fn test_open_forces_hover_to_end_state_before_move() {
        let (mut stage, mut controller) = fixture(2);
        let images = stage.row(0).images.clone();

        controller.pointer_enter(0, &mut stage);
        controller.tick(DT, &mut stage);
        // hover barely started
        assert!(stage.value(images[0], Property::Opacity) < 1.0);

        controller.open(0, &mut stage);
        controller.tick(DT, &mut stage);
        // the reflow call completed the hover before moving the nodes
        for &img in &images {
            assert_eq!(stage.value(img, Property::Opacity), 1.0);
            assert_eq!(stage.value(img, Property::Scale), 1.0);
        }
        assert!(stage.wrap_members(0).is_empty());
    }

    #[test]
    fn test_close_refused_unless_open() {
        let (mut stage, mut controller) = fixture(2);
        assert!(!controller.close(&mut stage));

        controller.open(0, &mut stage);
        // still opening: the close control is visible but inert
        assert!(!controller.close(&mut stage));
        settle(&mut controller, &mut stage);
        assert!(controller.close(&mut stage));
        assert!(!controller.close(&mut stage));
    }

    #[test]
    fn test_overflow_hidden_tracks_preview_window() {
        let (mut stage, mut controller) = fixture(2);
        assert!(!stage.overflow_hidden());
        controller.open(0, &mut stage);
        assert!(stage.overflow_hidden());
        settle(&mut controller, &mut stage);
        assert!(stage.overflow_hidden());
        controller.close(&mut stage);
        assert!(!stage.overflow_hidden());
    }

    #[test]
    fn test_preview_images_pop_in_during_open() {
        let (mut stage, mut controller) = fixture(2);
        let preview = stage.row(0).preview.images.clone();
        controller.open(0, &mut stage);
        settle(&mut controller, &mut stage);
        for &img in &preview {
            assert_eq!(stage.value(img, Property::Opacity), 1.0);
            assert_eq!(stage.value(img, Property::Scale), 1.0);
            assert_eq!(stage.value(img, Property::YPercent), 0.0);
        }
    }

    #[test]
    fn test_close_control_shown_once_and_fades() {
        let (mut stage, mut controller) = fixture(2);
        let ctrl = stage.close_control();
        assert!(!stage.close_shown());

        controller.open(0, &mut stage);
        assert!(stage.close_shown());
        settle(&mut controller, &mut stage);
        assert_eq!(stage.value(ctrl, Property::Opacity), 1.0);

        controller.close(&mut stage);
        settle(&mut controller, &mut stage);
        // visibility flag stays on, the control just fades; the phase
        // machine keeps it inert
        assert!(stage.close_shown());
        assert_eq!(stage.value(ctrl, Property::Opacity), 0.0);
    }
}
