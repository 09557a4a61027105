//! Index and offset bookkeeping for a horizontally paged track.
//!
//! The controller never interpolates. Every change is reported as a
//! [`Motion`] and an external driver (CSS transition, frame loop) moves the
//! track. Offsets are negative as the track slides left.

use thiserror::Error;

pub const SLIDE_DURATION_MS: u32 = 650;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CarouselError {
    #[error("carousel needs at least one item")]
    Empty,
    #[error("invalid item step {0}")]
    InvalidStep(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragChannel {
    Pointer,
    Touch,
}

impl DragChannel {
    /// Distance a release must travel before it changes the index.
    pub fn threshold(self) -> f64 {
        match self {
            DragChannel::Pointer => 60.0,
            DragChannel::Touch => 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Decelerating cubic, `1 - (1 - t)^3`.
    CubicOut,
}

impl Easing {
    pub fn css(self) -> &'static str {
        match self {
            Easing::CubicOut => "cubic-bezier(0.215, 0.61, 0.355, 1)",
        }
    }

}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Jump to `offset` now, cancelling any running animation.
    Set { offset: f64 },
    /// Animate to `to`. A later motion supersedes this one; `seq` lets a
    /// driver drop completions of stale animations.
    Animate {
        to: f64,
        duration_ms: u32,
        easing: Easing,
        seq: u64,
    },
}

#[cfg(test)]
impl Motion {
    pub fn target(&self) -> f64 {
        match *self {
            Motion::Set { offset } => offset,
            Motion::Animate { to, .. } => to,
        }
    }
}

/// Result of a navigation request or a resolved drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Commit {
    pub index: usize,
    pub motion: Motion,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    channel: DragChannel,
    start: f64,
    baseline: f64,
    last: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselController {
    current: usize,
    item_count: usize,
    step: f64,
    offset: f64,
    drag: Option<Drag>,
    seq: u64,
}

impl CarouselController {
    pub fn new(item_count: usize, step: f64) -> Result<Self, CarouselError> {
        if item_count == 0 {
            return Err(CarouselError::Empty);
        }
        check_step(step)?;
        Ok(Self {
            current: 0,
            item_count,
            step,
            offset: 0.0,
            drag: None,
            seq: 0,
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Last offset handed to the driver.
    #[cfg(test)]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn at_start(&self) -> bool {
        self.current == 0
    }

    pub fn at_end(&self) -> bool {
        self.current + 1 == self.item_count
    }

    fn settled_offset(&self, index: usize) -> f64 {
        -(index as f64 * self.step)
    }

    /// Clamps `index` into range, makes it current and animates there.
    /// Any active drag is dropped.
    pub fn go_to(&mut self, index: isize) -> Commit {
        let last = (self.item_count - 1) as isize;
        let index = index.clamp(0, last) as usize;
        self.current = index;
        self.drag = None;
        self.seq += 1;
        self.offset = self.settled_offset(index);
        Commit {
            index,
            motion: Motion::Animate {
                to: self.offset,
                duration_ms: SLIDE_DURATION_MS,
                easing: Easing::CubicOut,
                seq: self.seq,
            },
        }
    }

    pub fn next(&mut self) -> Commit {
        self.go_to(self.current as isize + 1)
    }

    pub fn previous(&mut self) -> Commit {
        self.go_to(self.current as isize - 1)
    }

    /// Starts a drag. `observed` is the offset the driver is showing right
    /// now, which differs from the last target while a slide is running.
    pub fn begin_drag(&mut self, channel: DragChannel, position: f64, observed: Option<f64>) -> Motion {
        let baseline = observed.filter(|o| o.is_finite()).unwrap_or(self.offset);
        self.offset = baseline;
        self.drag = Some(Drag {
            channel,
            start: position,
            baseline,
            last: position,
        });
        // Pin the track where it is, superseding a running slide.
        self.seq += 1;
        Motion::Set { offset: baseline }
    }

    /// Follows the pointer without clamping. `None` when not dragging.
    pub fn update_drag(&mut self, position: f64) -> Option<Motion> {
        let drag = self.drag.as_mut()?;
        drag.last = position;
        self.offset = drag.baseline + (position - drag.start);
        Some(Motion::Set { offset: self.offset })
    }

    pub fn end_drag(&mut self, position: f64) -> Option<Commit> {
        let drag = self.drag.take()?;
        let delta = position - drag.start;
        let threshold = drag.channel.threshold();
        let commit = if delta < -threshold {
            self.next()
        } else if delta > threshold {
            self.previous()
        } else {
            self.go_to(self.current as isize)
        };
        Some(commit)
    }

    /// Pointer left the track or the touch was cancelled.
    pub fn cancel_drag(&mut self) -> Option<Commit> {
        let last = self.drag.as_ref()?.last;
        self.end_drag(last)
    }

    /// Layout changed; re-derives the settled offset for the current index.
    pub fn set_step(&mut self, step: f64) -> Result<Motion, CarouselError> {
        check_step(step)?;
        self.step = step;
        if let Some(drag) = self.drag.as_mut() {
            drag.baseline = -(self.current as f64 * step);
            return Ok(Motion::Set { offset: self.offset });
        }
        self.seq += 1;
        self.offset = self.settled_offset(self.current);
        Ok(Motion::Set { offset: self.offset })
    }
}

fn check_step(step: f64) -> Result<(), CarouselError> {
    if step.is_finite() && step >= 0.0 {
        Ok(())
    } else {
        Err(CarouselError::InvalidStep(step))
    }
}

#[cfg(test)]
mod tests {
    use super::{CarouselController, CarouselError, DragChannel, Easing, Motion};

    const STEP: f64 = 504.0;

    fn carousel() -> CarouselController {
        CarouselController::new(5, STEP).unwrap()
    }

    #[test]
    fn rejects_empty_and_bad_step() {
        assert_eq!(CarouselController::new(0, STEP), Err(CarouselError::Empty));
        assert!(matches!(
            CarouselController::new(3, f64::NAN),
            Err(CarouselError::InvalidStep(_))
        ));
        assert!(CarouselController::new(3, -1.0).is_err());
    }

    #[test]
    fn go_to_clamps_out_of_range() {
        let mut c = carousel();
        assert_eq!(c.go_to(-5).index, 0);
        assert_eq!(c.go_to(99).index, 4);
        assert_eq!(c.current(), 4);
        assert_eq!(c.offset(), -4.0 * STEP);
    }

    #[test]
    fn go_to_animates_with_deceleration() {
        let mut c = carousel();
        let commit = c.go_to(2);
        match commit.motion {
            Motion::Animate { to, duration_ms, easing, .. } => {
                assert_eq!(to, -2.0 * STEP);
                assert_eq!(duration_ms, 650);
                assert_eq!(easing, Easing::CubicOut);
            }
            other => panic!("expected animation, got {:?}", other),
        }
    }

    #[test]
    fn later_motion_supersedes_earlier() {
        let mut c = carousel();
        let first = c.next();
        let second = c.next();
        let seq = |m: Motion| match m {
            Motion::Animate { seq, .. } => seq,
            Motion::Set { .. } => 0,
        };
        assert!(seq(second.motion) > seq(first.motion));
        assert_eq!(second.motion.target(), -2.0 * STEP);
    }

    #[test]
    fn pointer_drag_past_threshold_advances() {
        let mut c = carousel();
        c.go_to(2);
        c.begin_drag(DragChannel::Pointer, 500.0, None);
        assert!(c.is_dragging());
        let commit = c.end_drag(430.0).unwrap();
        assert_eq!(commit.index, 3);
        assert!(!c.is_dragging());
    }

    #[test]
    fn short_drag_snaps_back() {
        let mut c = carousel();
        c.go_to(2);
        c.begin_drag(DragChannel::Pointer, 500.0, None);
        c.update_drag(460.0);
        let commit = c.end_drag(460.0).unwrap();
        assert_eq!(commit.index, 2);
        assert_eq!(commit.motion.target(), -2.0 * STEP);
    }

    #[test]
    fn thresholds_differ_by_channel() {
        let mut c = carousel();
        c.go_to(2);
        c.begin_drag(DragChannel::Touch, 0.0, None);
        assert_eq!(c.end_drag(55.0).unwrap().index, 1);

        c.begin_drag(DragChannel::Pointer, 0.0, None);
        assert_eq!(c.end_drag(55.0).unwrap().index, 1);
    }

    #[test]
    fn update_drag_follows_without_clamping() {
        let mut c = carousel();
        c.begin_drag(DragChannel::Pointer, 100.0, None);
        let motion = c.update_drag(400.0).unwrap();
        assert_eq!(motion, Motion::Set { offset: 300.0 });
    }

    #[test]
    fn update_without_drag_is_ignored() {
        let mut c = carousel();
        assert_eq!(c.update_drag(10.0), None);
        assert_eq!(c.end_drag(10.0), None);
        assert_eq!(c.cancel_drag(), None);
    }

    #[test]
    fn next_at_end_resolves_drag_offset() {
        let mut c = carousel();
        c.go_to(4);
        c.begin_drag(DragChannel::Pointer, 0.0, None);
        c.update_drag(-300.0);
        assert_eq!(c.offset(), -4.0 * STEP - 300.0);
        let commit = c.next();
        assert_eq!(commit.index, 4);
        assert_eq!(commit.motion.target(), -4.0 * STEP);
        assert!(!c.is_dragging());
    }

    #[test]
    fn drag_past_first_item_snaps_back() {
        let mut c = carousel();
        c.begin_drag(DragChannel::Touch, 0.0, None);
        c.update_drag(200.0);
        let commit = c.end_drag(200.0).unwrap();
        assert_eq!(commit.index, 0);
        assert_eq!(commit.motion.target(), 0.0);
    }

    #[test]
    fn cancel_uses_last_known_position() {
        let mut c = carousel();
        c.go_to(1);
        c.begin_drag(DragChannel::Pointer, 300.0, None);
        c.update_drag(200.0);
        let commit = c.cancel_drag().unwrap();
        assert_eq!(commit.index, 2);
        assert!(!c.is_dragging());
    }

    #[test]
    fn set_step_moves_settled_position() {
        let mut c = carousel();
        c.go_to(3);
        assert_eq!(c.set_step(300.0), Ok(Motion::Set { offset: -900.0 }));
        assert_eq!(c.next().motion.target(), -1200.0);
    }

    #[test]
    fn reports_count_for_progress() {
        let mut c = carousel();
        c.go_to(99);
        assert_eq!((c.current() + 1, c.item_count()), (5, 5));
    }

    #[test]
    fn bounds() {
        let mut c = carousel();
        assert!(c.at_start());
        c.go_to(4);
        assert!(c.at_end());
        let single = CarouselController::new(1, STEP).unwrap();
        assert!(single.at_start() && single.at_end());
    }

    #[test]
    fn cubic_out_css_curve() {
        assert_eq!(Easing::CubicOut.css(), "cubic-bezier(0.215, 0.61, 0.355, 1)");
    }

    #[test]
    fn drag_during_slide_starts_from_observed_offset() {
        let mut c = carousel();
        c.go_to(2);
        // Slide to -1008 is only partly done when the track is grabbed.
        let pinned = c.begin_drag(DragChannel::Pointer, 500.0, Some(-700.0));
        assert_eq!(pinned, Motion::Set { offset: -700.0 });
        assert_eq!(c.update_drag(450.0), Some(Motion::Set { offset: -750.0 }));
    }

    #[test]
    fn unusable_observation_falls_back_to_target() {
        let mut c = carousel();
        c.go_to(1);
        let pinned = c.begin_drag(DragChannel::Touch, 0.0, Some(f64::NAN));
        assert_eq!(pinned, Motion::Set { offset: -STEP });
    }

    #[test]
    fn begin_drag_supersedes_running_slide() {
        let mut c = carousel();
        let slide = match c.next().motion {
            Motion::Animate { seq, .. } => seq,
            other => panic!("expected animation, got {:?}", other),
        };
        assert!(matches!(
            c.begin_drag(DragChannel::Pointer, 0.0, Some(-200.0)),
            Motion::Set { .. }
        ));
        match c.end_drag(0.0).unwrap().motion {
            Motion::Animate { seq, to, .. } => {
                assert!(seq > slide + 1);
                assert_eq!(to, -STEP);
            }
            other => panic!("expected animation, got {:?}", other),
        }
    }
}
