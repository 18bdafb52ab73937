//! Timeline sequencing
//!
//! A `Timeline` is an ordered list of step records (targets, property
//! transitions, start offset, duration, easing, stagger) resolved against
//! named labels. The clock advances via `tick(dt)` from the host frame
//! loop; steps sharing a position start together and offsets express
//! intentional overlap, so the offset algebra here is contractual.
//!
//! The `Animator` owns the live timelines: one hover slot per row and at
//! most one open/close transition. Cross-timeline concerns (killing tweens
//! on shared nodes, force-completing a hover before the grid reflow,
//! injecting the reflow tweens) live there.

use crate::config::MotionConfig;
use crate::easing::Ease;
use crate::motion;
use crate::stage::{NodeId, Property, Stage, StageAction};
use crate::util::Prng;

/// Position of a step inside a timeline
#[derive(Debug, Clone, Copy)]
pub enum Pos<'a> {
    At(f32),
    Label(&'a str),
    /// `label + offset`
    After(&'a str, f32),
}

/// One property transition within a step. `from` is applied when the
/// strand first renders (not at timeline start); absent, the strand
/// departs from the node's value at that moment.
#[derive(Debug, Clone, Copy)]
pub struct PropSpan {
    pub prop: Property,
    pub from: Option<f32>,
    pub to: f32,
}

impl PropSpan {
    pub fn to(prop: Property, to: f32) -> Self {
        Self {
            prop,
            from: None,
            to,
        }
    }

    pub fn from_to(prop: Property, from: f32, to: f32) -> Self {
        Self {
            prop,
            from: Some(from),
            to,
        }
    }
}

/// Per-target start delays across a step's target group
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StaggerFrom {
    First,
    /// Reverse cascade: the last target leads
    Last,
    /// Radiates outward from the given target index
    Index(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stagger {
    pub each: f32,
    pub from: StaggerFrom,
}

impl Stagger {
    pub const NONE: Stagger = Stagger {
        each: 0.0,
        from: StaggerFrom::First,
    };

    pub fn forward(each: f32) -> Self {
        Self {
            each,
            from: StaggerFrom::First,
        }
    }

    pub fn reverse(each: f32) -> Self {
        Self {
            each,
            from: StaggerFrom::Last,
        }
    }

    pub fn from_index(each: f32, index: usize) -> Self {
        Self {
            each,
            from: StaggerFrom::Index(index),
        }
    }

    pub fn delay(&self, i: usize, n: usize) -> f32 {
        if n == 0 {
            return 0.0;
        }
        let steps = match self.from {
            StaggerFrom::First => i,
            StaggerFrom::Last => n - 1 - i,
            StaggerFrom::Index(origin) => i.abs_diff(origin),
        };
        steps as f32 * self.each
    }

    fn max_delay(&self, n: usize) -> f32 {
        if n == 0 {
            return 0.0;
        }
        let steps = match self.from {
            StaggerFrom::First | StaggerFrom::Last => n - 1,
            StaggerFrom::Index(origin) => origin.max(n - 1 - origin).max(origin.min(n - 1)),
        };
        steps as f32 * self.each
    }
}

/// Work a timeline cannot do alone; emitted to the animator when the
/// step's position is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCall {
    /// Complete the row's hover, capture its image rects, move the nodes
    /// into the preview grid, and inject the reflow tweens
    FlipRowToGrid { row: usize },
}

/// Animated step record
#[derive(Debug, Clone)]
pub struct Tween {
    pub spans: Vec<PropSpan>,
    pub duration: f32,
    pub ease: Ease,
    pub stagger: Stagger,
    pub on_complete: Option<StageAction>,
}

impl Tween {
    pub fn new(spans: Vec<PropSpan>, duration: f32, ease: Ease) -> Self {
        Self {
            spans,
            duration,
            ease,
            stagger: Stagger::NONE,
            on_complete: None,
        }
    }

    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn on_complete(mut self, action: StageAction) -> Self {
        self.on_complete = Some(action);
        self
    }
}

#[derive(Debug, Clone)]
enum StepBody {
    Tween(Tween),
    /// Zero-duration property write
    Set(Vec<PropSpan>),
    Call(StepCall),
}

#[derive(Debug)]
struct Step {
    targets: Vec<NodeId>,
    at: f32,
    body: StepBody,
    // per-strand runtime state, parallel to targets
    started: Vec<bool>,
    done: Vec<bool>,
    killed: Vec<bool>,
    from: Vec<Vec<f32>>,
    /// Set applied / call emitted / completion action fired
    fired: bool,
}

impl Step {
    fn new(targets: Vec<NodeId>, at: f32, body: StepBody) -> Self {
        let n = targets.len();
        Self {
            targets,
            at,
            body,
            started: vec![false; n],
            done: vec![false; n],
            killed: vec![false; n],
            from: vec![Vec::new(); n],
            fired: false,
        }
    }

    fn end_time(&self) -> f32 {
        match &self.body {
            StepBody::Tween(tw) => {
                self.at + tw.duration + tw.stagger.max_delay(self.targets.len())
            }
            StepBody::Set(_) | StepBody::Call(_) => self.at,
        }
    }

    fn advance(&mut self, clock: f32, stage: &mut Stage) -> Option<StepCall> {
        let Self {
            targets,
            at,
            body,
            started,
            done,
            killed,
            from,
            fired,
        } = self;

        match body {
            StepBody::Set(spans) => {
                if !*fired && clock >= *at {
                    for (i, &target) in targets.iter().enumerate() {
                        if killed[i] {
                            continue;
                        }
                        for span in spans.iter() {
                            stage.set_value(target, span.prop, span.to);
                        }
                        done[i] = true;
                    }
                    *fired = true;
                }
                None
            }
            StepBody::Call(call) => {
                if !*fired && clock >= *at {
                    *fired = true;
                    Some(*call)
                } else {
                    None
                }
            }
            StepBody::Tween(tw) => {
                let n = targets.len();
                for i in 0..n {
                    if killed[i] || done[i] {
                        continue;
                    }
                    let start = *at + tw.stagger.delay(i, n);
                    if clock < start {
                        continue;
                    }
                    if !started[i] {
                        started[i] = true;
                        let mut resolved = Vec::with_capacity(tw.spans.len());
                        for span in &tw.spans {
                            let v = span
                                .from
                                .unwrap_or_else(|| stage.value(targets[i], span.prop));
                            stage.set_value(targets[i], span.prop, v);
                            resolved.push(v);
                        }
                        from[i] = resolved;
                    }
                    let t = if tw.duration <= 0.0 {
                        1.0
                    } else {
                        ((clock - start) / tw.duration).min(1.0)
                    };
                    let k = tw.ease.apply(t);
                    for (j, span) in tw.spans.iter().enumerate() {
                        let v = from[i][j] + (span.to - from[i][j]) * k;
                        stage.set_value(targets[i], span.prop, v);
                    }
                    if t >= 1.0 {
                        done[i] = true;
                    }
                }
                let settled = (0..n).all(|i| done[i] || killed[i]);
                if !*fired && settled && done.iter().any(|d| *d) {
                    *fired = true;
                    if let Some(action) = tw.on_complete {
                        stage.apply(action);
                    }
                }
                None
            }
        }
    }

    fn kill_targets(&mut self, nodes: &[NodeId]) {
        for (i, target) in self.targets.iter().enumerate() {
            if nodes.contains(target) {
                self.killed[i] = true;
            }
        }
    }
}

pub struct TickOutput {
    pub calls: Vec<StepCall>,
    pub completed: bool,
}

/// A sequenced gesture animation. Plays from construction; the clock only
/// moves when the owner ticks it.
pub struct Timeline {
    name: &'static str,
    labels: Vec<(String, f32)>,
    steps: Vec<Step>,
    clock: f32,
    playing: bool,
}

impl Timeline {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            labels: Vec::new(),
            steps: Vec::new(),
            clock: 0.0,
            playing: true,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn add_label(&mut self, name: &str, at: f32) -> &mut Self {
        self.labels.push((name.to_string(), at));
        self
    }

    /// Resolve a position against the label table
    pub fn position(&self, pos: Pos) -> f32 {
        match pos {
            Pos::At(t) => t,
            Pos::Label(name) => self.label_at(name),
            Pos::After(name, offset) => self.label_at(name) + offset,
        }
    }

    fn label_at(&self, name: &str) -> f32 {
        match self.labels.iter().find(|(n, _)| n == name) {
            Some((_, at)) => *at,
            None => {
                debug_assert!(false, "unknown label '{}' in timeline '{}'", name, self.name);
                0.0
            }
        }
    }

    pub fn add_tween(&mut self, targets: &[NodeId], tween: Tween, at: f32) -> &mut Self {
        self.steps
            .push(Step::new(targets.to_vec(), at, StepBody::Tween(tween)));
        self
    }

    pub fn add_set(&mut self, targets: &[NodeId], spans: Vec<PropSpan>, at: f32) -> &mut Self {
        self.steps
            .push(Step::new(targets.to_vec(), at, StepBody::Set(spans)));
        self
    }

    pub fn add_call(&mut self, call: StepCall, at: f32) -> &mut Self {
        self.steps.push(Step::new(Vec::new(), at, StepBody::Call(call)));
        self
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// End of the last step, injected steps included
    pub fn duration(&self) -> f32 {
        self.steps.iter().map(Step::end_time).fold(0.0, f32::max)
    }

    /// Silence every strand targeting the given nodes: they stop writing
    /// and their completion actions never fire. Other strands and steps
    /// are unaffected.
    pub fn kill_tweens_of(&mut self, nodes: &[NodeId]) {
        if !self.playing {
            return;
        }
        for step in &mut self.steps {
            step.kill_targets(nodes);
        }
    }

    /// Advance the clock and apply due steps. Completion is withheld on
    /// any tick that emits calls, so the owner can inject follow-up steps
    /// before the timeline is considered finished.
    pub fn tick(&mut self, dt: f32, stage: &mut Stage) -> TickOutput {
        if !self.playing {
            return TickOutput {
                calls: Vec::new(),
                completed: false,
            };
        }
        self.clock += dt;
        let calls = self.advance_all(stage);
        let completed = calls.is_empty() && self.clock >= self.duration();
        if completed {
            self.playing = false;
        }
        TickOutput { calls, completed }
    }

    /// Jump to the fully-progressed end state: surviving strands get their
    /// end values, surviving completion actions fire exactly once.
    pub fn finish(&mut self, stage: &mut Stage) -> Vec<StepCall> {
        if !self.playing {
            return Vec::new();
        }
        self.clock = self.duration();
        let calls = self.advance_all(stage);
        self.playing = false;
        calls
    }

    fn advance_all(&mut self, stage: &mut Stage) -> Vec<StepCall> {
        let mut calls = Vec::new();
        for step in &mut self.steps {
            if let Some(call) = step.advance(self.clock, stage) {
                calls.push(call);
            }
        }
        calls
    }
}

/// Which gesture the transition slot is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Open,
    Close,
}

/// Completion notifications the controller consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimEvent {
    OpenComplete,
    CloseComplete,
}

/// Owns the live timelines and the cross-timeline contracts
pub struct Animator {
    /// Last hover timeline per row, kept addressable so the open gesture
    /// can force it to its end state
    hover: Vec<Option<Timeline>>,
    transition: Option<(TransitionKind, Timeline)>,
    prng: Prng,
    time_scale: f32,
    reduced: bool,
}

impl Animator {
    pub fn new(rows: usize, motion: &MotionConfig) -> Self {
        Self {
            hover: (0..rows).map(|_| None).collect(),
            transition: None,
            prng: Prng::new(motion.seed),
            time_scale: motion.time_scale.max(0.0),
            reduced: motion.reduced,
        }
    }

    /// Replace the row's hover slot; the superseded timeline is dropped
    /// (its tweens were already killed by the caller's cancellation pass)
    pub fn play_hover(&mut self, row: usize, timeline: Timeline) {
        tracing::trace!(row, name = timeline.name(), "hover timeline start");
        self.hover[row] = Some(timeline);
    }

    pub fn hover_active(&self, row: usize) -> bool {
        self.hover[row].is_some()
    }

    /// Force the row's retained hover timeline (if any) to its end state
    pub fn finish_hover(&mut self, row: usize, stage: &mut Stage) {
        if let Some(mut timeline) = self.hover[row].take() {
            let calls = timeline.finish(stage);
            debug_assert!(calls.is_empty(), "hover timelines carry no calls");
        }
    }

    pub fn play_transition(&mut self, kind: TransitionKind, timeline: Timeline) {
        debug_assert!(self.transition.is_none(), "transition slot is exclusive");
        tracing::debug!(?kind, name = timeline.name(), "transition start");
        self.transition = Some((kind, timeline));
    }

    pub fn transition_kind(&self) -> Option<TransitionKind> {
        self.transition.as_ref().map(|(kind, _)| *kind)
    }

    /// Silence every live strand targeting the given nodes, in whichever
    /// timeline it lives
    pub fn kill_tweens_of(&mut self, nodes: &[NodeId]) {
        for slot in self.hover.iter_mut().flatten() {
            slot.kill_tweens_of(nodes);
        }
        if let Some((_, timeline)) = self.transition.as_mut() {
            timeline.kill_tweens_of(nodes);
        }
    }

    /// Nothing is animating at all (frame-pacing hint)
    pub fn is_idle(&self) -> bool {
        self.transition.is_none() && self.hover.iter().all(Option::is_none)
    }

    pub fn tick(&mut self, dt: f32, stage: &mut Stage) -> Vec<AnimEvent> {
        let dt = if self.reduced {
            // collapse every gesture to its end state across two ticks
            // (the second settles steps injected by the first)
            1.0e5
        } else {
            dt * self.time_scale
        };

        for slot in self.hover.iter_mut() {
            if let Some(timeline) = slot {
                let out = timeline.tick(dt, stage);
                debug_assert!(out.calls.is_empty());
                if out.completed {
                    *slot = None;
                }
            }
        }

        let mut events = Vec::new();
        let mut calls = Vec::new();
        let mut finished = None;
        if let Some((kind, timeline)) = self.transition.as_mut() {
            let out = timeline.tick(dt, stage);
            calls = out.calls;
            if out.completed {
                finished = Some(*kind);
            }
        }
        for call in calls {
            self.run_call(call, stage);
        }
        if let Some(kind) = finished {
            tracing::debug!(?kind, "transition complete");
            self.transition = None;
            events.push(match kind {
                TransitionKind::Open => AnimEvent::OpenComplete,
                TransitionKind::Close => AnimEvent::CloseComplete,
            });
        }
        events
    }

    /// The grid reflow: hover forced to its end state, image nodes moved,
    /// then the moved cells' reflow and the preview's own pop-ins are
    /// injected into the running transition at the current clock.
    fn run_call(&mut self, call: StepCall, stage: &mut Stage) {
        match call {
            StepCall::FlipRowToGrid { row } => {
                self.finish_hover(row, stage);
                let moved = stage.move_images_to_grid(row);
                let preview_images = stage.row(row).preview.images.clone();
                let drops: Vec<f32> = preview_images
                    .iter()
                    .map(|_| self.prng.range(0.0, motion::PREVIEW_DROP_MAX))
                    .collect();

                let Some((_, timeline)) = self.transition.as_mut() else {
                    return;
                };
                let now = timeline.clock();
                timeline.add_tween(
                    &moved,
                    Tween::new(
                        vec![PropSpan::to(Property::Flip, 1.0)],
                        motion::GRID_FLIP_DUR,
                        motion::OPEN_EASE,
                    )
                    .stagger(Stagger::forward(motion::GRID_STAGGER)),
                    now,
                );

                // the preview's own images follow once the moved strip's
                // stagger window has passed, each from a fresh drop offset
                let base = now + motion::GRID_STAGGER * moved.len() as f32;
                for (j, image) in preview_images.iter().enumerate() {
                    timeline.add_tween(
                        &[*image],
                        Tween::new(
                            vec![
                                PropSpan::from_to(Property::Scale, 0.0, 1.0),
                                PropSpan::to(Property::Opacity, 1.0),
                                PropSpan::from_to(Property::YPercent, drops[j], 0.0),
                            ],
                            motion::PREVIEW_IMAGE_DUR,
                            motion::OPEN_EASE,
                        ),
                        base + motion::GRID_STAGGER * j as f32,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Stage;

    fn stage() -> Stage {
        let labels: Vec<String> = (0..2).map(|i| format!("Row {}", i)).collect();
        Stage::new(&labels, 3, 2)
    }

    #[test]
    fn test_label_algebra() {
        let mut tl = Timeline::new("t");
        tl.add_label("start", 0.0).add_label("late", 0.75);
        assert_eq!(tl.position(Pos::Label("start")), 0.0);
        assert_eq!(tl.position(Pos::After("start", 0.1)), 0.1);
        assert_eq!(tl.position(Pos::After("late", 0.25)), 1.0);
        assert_eq!(tl.position(Pos::At(0.4)), 0.4);
    }

    #[test]
    fn test_stagger_delays() {
        let fwd = Stagger::forward(0.04);
        assert_eq!(fwd.delay(0, 4), 0.0);
        assert_eq!(fwd.delay(3, 4), 0.04 * 3.0);

        let rev = Stagger::reverse(0.035);
        assert_eq!(rev.delay(3, 4), 0.0);
        assert!((rev.delay(0, 4) - 0.105).abs() < 1e-6);

        let radial = Stagger::from_index(0.03, 1);
        assert_eq!(radial.delay(1, 3), 0.0);
        assert!((radial.delay(0, 3) - 0.03).abs() < 1e-6);
        assert!((radial.delay(2, 3) - 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_tween_interpolates_and_ends_exact() {
        let mut st = stage();
        let img = st.row(0).images[0];
        let mut tl = Timeline::new("t");
        tl.add_tween(
            &[img],
            Tween::new(
                vec![PropSpan::from_to(Property::Opacity, 0.0, 1.0)],
                1.0,
                Ease::Linear,
            ),
            0.0,
        );

        tl.tick(0.25, &mut st);
        assert!((st.value(img, Property::Opacity) - 0.25).abs() < 1e-5);
        let out = tl.tick(0.75, &mut st);
        assert_eq!(st.value(img, Property::Opacity), 1.0);
        assert!(out.completed);
        assert!(!tl.is_playing());
    }

    #[test]
    fn test_from_applied_at_strand_start_not_before() {
        let mut st = stage();
        let img = st.row(0).images[0];
        let mut tl = Timeline::new("t");
        tl.add_tween(
            &[img],
            Tween::new(
                vec![PropSpan::from_to(Property::XPercent, 20.0, 0.0)],
                0.4,
                Ease::Linear,
            ),
            0.5,
        );

        tl.tick(0.2, &mut st);
        // step not reached: node untouched
        assert_eq!(st.value(img, Property::XPercent), 0.0);
        tl.tick(0.3, &mut st);
        // strand just started: the explicit start value is in effect
        assert_eq!(st.value(img, Property::XPercent), 20.0);
    }

    #[test]
    fn test_stagger_strands_start_separately() {
        let mut st = stage();
        let images: Vec<_> = st.row(0).images.clone();
        let mut tl = Timeline::new("t");
        tl.add_tween(
            &images,
            Tween::new(
                vec![PropSpan::from_to(Property::Opacity, 0.5, 1.0)],
                0.1,
                Ease::Linear,
            )
            .stagger(Stagger::reverse(0.2)),
            0.0,
        );

        tl.tick(0.05, &mut st);
        // reverse cascade: the last image leads
        assert!(st.value(images[2], Property::Opacity) > 0.0);
        assert_eq!(st.value(images[0], Property::Opacity), 0.0);
    }

    #[test]
    fn test_kill_freezes_and_suppresses_action() {
        let mut st = stage();
        let images: Vec<_> = st.row(0).images.clone();
        let mut tl = Timeline::new("t");
        tl.add_tween(
            &images,
            Tween::new(
                vec![PropSpan::from_to(Property::Scale, 0.0, 1.0)],
                1.0,
                Ease::Linear,
            )
            .on_complete(StageAction::SetSwitched { row: 0, on: true }),
            0.0,
        );

        tl.tick(0.5, &mut st);
        tl.kill_tweens_of(&[images[0]]);
        tl.tick(0.5, &mut st);

        // killed strand froze mid-flight, survivors reached the end
        assert!((st.value(images[0], Property::Scale) - 0.5).abs() < 1e-5);
        assert_eq!(st.value(images[1], Property::Scale), 1.0);
        // survivors completed, so the group action still fired
        assert!(st.switched(st.row(0).title));
    }

    #[test]
    fn test_kill_all_suppresses_group_action() {
        let mut st = stage();
        let images: Vec<_> = st.row(0).images.clone();
        let mut tl = Timeline::new("t");
        tl.add_tween(
            &images,
            Tween::new(vec![PropSpan::to(Property::Scale, 0.0)], 0.5, Ease::Linear)
                .on_complete(StageAction::SetSwitched { row: 0, on: true }),
            0.0,
        );

        tl.kill_tweens_of(&images);
        tl.tick(1.0, &mut st);
        assert!(!st.switched(st.row(0).title));
        // untouched by the killed strands
        assert_eq!(st.value(images[0], Property::Scale), 0.8);
    }

    #[test]
    fn test_finish_applies_survivor_end_values_once() {
        let mut st = stage();
        let img = st.row(0).images[0];
        let title = st.row(0).title;
        let mut tl = Timeline::new("t");
        tl.add_tween(
            &[img],
            Tween::new(vec![PropSpan::to(Property::Opacity, 1.0)], 0.4, Ease::Linear),
            0.0,
        );
        tl.add_tween(
            &[title],
            Tween::new(vec![PropSpan::to(Property::YPercent, -100.0)], 0.1, Ease::Linear)
                .on_complete(StageAction::SetSwitched { row: 0, on: true }),
            0.0,
        );

        tl.tick(0.05, &mut st);
        tl.finish(&mut st);
        assert_eq!(st.value(img, Property::Opacity), 1.0);
        assert_eq!(st.value(title, Property::YPercent), -100.0);
        assert!(st.switched(title));
        assert!(!tl.is_playing());
    }

    #[test]
    fn test_set_step_applies_at_position() {
        let mut st = stage();
        let title = st.row(0).title;
        let mut tl = Timeline::new("t");
        tl.add_set(&[title], vec![PropSpan::to(Property::OriginX, 1.0)], 0.3);

        tl.tick(0.1, &mut st);
        assert_eq!(st.value(title, Property::OriginX), 0.0);
        tl.tick(0.3, &mut st);
        assert_eq!(st.value(title, Property::OriginX), 1.0);
    }

    #[test]
    fn test_call_defers_completion_for_injection() {
        let mut st = stage();
        let img = st.row(0).images[0];
        let mut tl = Timeline::new("t");
        tl.add_call(StepCall::FlipRowToGrid { row: 0 }, 0.0);

        let out = tl.tick(0.0, &mut st);
        assert_eq!(out.calls.len(), 1);
        assert!(!out.completed);
        assert!(tl.is_playing());

        // owner injects at the current clock; duration grows accordingly
        tl.add_tween(
            &[img],
            Tween::new(vec![PropSpan::to(Property::Opacity, 1.0)], 0.9, Ease::Linear),
            tl.clock(),
        );
        assert!(tl.duration() >= 0.9);

        let out = tl.tick(1.0, &mut st);
        assert!(out.completed);
        assert_eq!(st.value(img, Property::Opacity), 1.0);
    }

    #[test]
    fn test_overlapping_offsets_share_start() {
        let mut st = stage();
        let title = st.row(0).title;
        let mut tl = Timeline::new("t");
        tl.add_label("start", 0.0);
        let at_out = tl.position(Pos::Label("start"));
        let at_in = tl.position(Pos::After("start", 0.1));
        tl.add_tween(
            &[title],
            Tween::new(vec![PropSpan::to(Property::YPercent, -100.0)], 0.1, Ease::Linear),
            at_out,
        );
        tl.add_tween(
            &[title],
            Tween::new(
                vec![PropSpan::from_to(Property::YPercent, 100.0, 0.0)],
                0.5,
                Ease::Linear,
            ),
            at_in,
        );

        // first phase alone
        tl.tick(0.05, &mut st);
        assert!(st.value(title, Property::YPercent) < 0.0);
        // second phase has taken over from the offset start
        tl.tick(0.15, &mut st);
        assert!(st.value(title, Property::YPercent) > 0.0);
        // and lands at rest
        tl.tick(1.0, &mut st);
        assert_eq!(st.value(title, Property::YPercent), 0.0);
    }

    #[test]
    fn test_animator_reduced_motion_completes_fast() {
        let mut st = stage();
        let motion_cfg = MotionConfig {
            reduced: true,
            ..MotionConfig::default()
        };
        let mut animator = Animator::new(st.row_count(), &motion_cfg);

        let mut tl = Timeline::new("open");
        tl.add_call(StepCall::FlipRowToGrid { row: 0 }, 0.0);
        animator.play_transition(TransitionKind::Open, tl);

        let mut events = Vec::new();
        for _ in 0..3 {
            events.extend(animator.tick(0.016, &mut st));
        }
        assert!(events.contains(&AnimEvent::OpenComplete));
        // the reflow ran: row images live in the preview grid now
        assert!(st.wrap_members(0).is_empty());
    }

    #[test]
    fn test_animator_kill_reaches_all_slots() {
        let mut st = stage();
        let motion_cfg = MotionConfig::default();
        let mut animator = Animator::new(st.row_count(), &motion_cfg);
        let img = st.row(1).images[0];

        let mut tl = Timeline::new("hover-enter");
        tl.add_tween(
            &[img],
            Tween::new(vec![PropSpan::to(Property::Opacity, 1.0)], 1.0, Ease::Linear),
            0.0,
        );
        animator.play_hover(1, tl);

        animator.tick(0.5, &mut st);
        let mid = st.value(img, Property::Opacity);
        animator.kill_tweens_of(&[img]);
        animator.tick(0.4, &mut st);
        assert_eq!(st.value(img, Property::Opacity), mid);
    }
}
