//! The navigation reconciler
//!
//! Orchestrates "layout settles -> measure -> compute target -> commit" and
//! owns the authoritative scroll position. Every trigger source - explicit
//! navigation, wheel steps, resizes, content mutation, late content arrival -
//! funnels into the same per-frame state machine, so there is exactly one
//! in-flight measurement sequence at a time and a stale snapshot can never
//! be applied as if it were fresh.

use std::time::{Duration, Instant};

use crate::gesture::{WheelAccumulator, WheelDelta};
use crate::measure::{measure, Surface};
use crate::snapshot::{compute_target, Snapshot};
use crate::spring::Spring;
use crate::timeline::Timeline;
use crate::tuning::{ScrollTuning, CLAMP_EPSILON};

/// Frame boundaries to wait after a navigation request before measuring,
/// letting the visual tree finish applying layout changes.
const LAYOUT_SETTLE_FRAMES: u8 = 2;
/// Frame boundaries to wait between measuring and re-validating.
const MEASURE_SETTLE_FRAMES: u8 = 1;

/// A navigation in flight through the settle/measure/commit sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NavRequest {
    index: usize,
    animate: bool,
    case_version: u64,
}

/// What an in-flight measurement sequence is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sequence {
    /// Commit a specific group index once measurements are fresh.
    Navigate(NavRequest),
    /// A layout-settle signal: republish measurements, then consume the
    /// pending index or re-anchor the current one.
    Settle { case_version: u64 },
}

impl Sequence {
    fn case_version(&self) -> u64 {
        match *self {
            Sequence::Navigate(req) => req.case_version,
            Sequence::Settle { case_version } => case_version,
        }
    }
}

/// Reconciler phase, advanced once per rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    AwaitingLayout { seq: Sequence, frames_left: u8 },
    Measuring { seq: Sequence, frames_left: u8 },
    Committed,
}

/// Result of offering a wheel event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    /// Not consumed (measurements stale); the host may fall back to its own
    /// default handling.
    Ignored,
    /// Consumed - the host must suppress any default scroll handling.
    /// `requested` carries the group index a released step navigated to, so
    /// the host can update its external selected-year state.
    Consumed { requested: Option<usize> },
}

/// The scroll-position controller for one case timeline.
///
/// Single-threaded and frame-driven: the host calls [`handle_wheel`] and
/// [`request_index`] from its event loop, [`on_frame`] once per rendered
/// frame, and reads [`position`] each frame to apply as the content
/// transform. There are no fatal errors; every failure mode degrades to
/// "wait and remeasure".
///
/// [`handle_wheel`]: ScrollController::handle_wheel
/// [`request_index`]: ScrollController::request_index
/// [`on_frame`]: ScrollController::on_frame
/// [`position`]: ScrollController::position
pub struct ScrollController {
    tuning: ScrollTuning,
    timeline: Timeline,
    /// Bumped on every case switch; in-flight sequences carry the version
    /// they started under and are discarded on mismatch.
    case_version: u64,
    /// Latest published measurement. Never partially updated.
    snapshot: Snapshot,
    spring: Spring,
    phase: Phase,
    /// At most one deferred navigation target; last request wins.
    pending_index: Option<usize>,
    /// Index the view is currently anchored to.
    current_index: usize,
    wheel: WheelAccumulator,
    /// Open while wheel input is actively arriving; layout-settle handling
    /// holds off so it does not fight the user's momentum.
    wheel_active_until: Option<Instant>,
    /// Layout-settle signals coalesce here until the frame loop picks one up.
    needs_remeasure: bool,
}

impl ScrollController {
    pub fn new(timeline: Timeline, tuning: ScrollTuning) -> Self {
        let spring = Spring::new(tuning.stiffness, tuning.damping);
        Self {
            tuning,
            timeline,
            case_version: 0,
            snapshot: Snapshot::default(),
            spring,
            phase: Phase::Idle,
            pending_index: None,
            current_index: 0,
            wheel: WheelAccumulator::new(),
            wheel_active_until: None,
            needs_remeasure: true,
        }
    }

    /// The live animated scroll position, always within `[-max_scroll, 0]`.
    pub fn position(&self) -> f32 {
        self.snapshot.clamp(self.spring.value())
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn pending_index(&self) -> Option<usize> {
        self.pending_index
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn tuning(&self) -> &ScrollTuning {
        &self.tuning
    }

    /// Sub-threshold wheel motion currently carried over.
    pub fn wheel_pending(&self) -> f32 {
        self.wheel.pending()
    }

    /// True while the view still has work to do: spring in motion or a
    /// sequence in flight. Hosts can use this to keep rendering hot.
    pub fn is_active(&self) -> bool {
        !self.spring.settled() || self.phase != Phase::Idle || self.needs_remeasure
    }

    fn wheel_window_open(&self) -> bool {
        self.wheel_active_until
            .is_some_and(|until| Instant::now() < until)
    }

    /// Navigate to a group index. Out-of-range indices are clamped. While
    /// measurements do not yet cover the current case, the index is stored
    /// as pending and applied once they catch up; no position changes here.
    pub fn request_index(&mut self, index: usize, animate: bool) {
        if self.timeline.is_empty() {
            return;
        }
        let index = self.timeline.clamp_index(index);
        if !self.snapshot.covers(self.timeline.len()) {
            self.pending_index = Some(index);
            return;
        }
        self.pending_index = None;
        self.phase = Phase::AwaitingLayout {
            seq: Sequence::Navigate(NavRequest {
                index,
                animate,
                case_version: self.case_version,
            }),
            frames_left: LAYOUT_SETTLE_FRAMES,
        };
    }

    /// Re-run the navigation sequence for the current index (imperative
    /// callers, e.g. after the host jumps the selection itself).
    pub fn renavigate(&mut self) {
        self.request_index(self.current_index, true);
    }

    /// Signal that layout may have changed (resize, expand/collapse, late
    /// content arrival). Coalesced; the next idle frame remeasures once.
    pub fn notify_layout_changed(&mut self) {
        self.needs_remeasure = true;
    }

    /// Offer one wheel event. The caller must only forward events whose
    /// origin lies within the timeline viewport.
    pub fn handle_wheel(&mut self, delta: WheelDelta) -> WheelOutcome {
        // Stale measurements: do not consume, let default handling run.
        if !self.snapshot.covers(self.timeline.len()) {
            return WheelOutcome::Ignored;
        }
        if self.timeline.len() < 2 {
            return WheelOutcome::Consumed { requested: None };
        }

        self.wheel_active_until =
            Some(Instant::now() + Duration::from_millis(self.tuning.wheel_active_ms));

        let steps = self
            .wheel
            .feed(delta, self.snapshot.viewport_extent, &self.tuning);
        if steps == 0 {
            return WheelOutcome::Consumed { requested: None };
        }

        let last = self.timeline.len() as i64 - 1;
        let new_index = (self.current_index as i64 + steps as i64).clamp(0, last) as usize;

        // Fast path: aim the spring at the new group immediately so a burst
        // of wheel events never shows blank space while the full
        // settle/measure sequence catches up.
        match compute_target(&self.snapshot, new_index) {
            Some(target) => {
                self.spring.retarget(target);
                self.current_index = new_index;
                self.request_index(new_index, true);
                WheelOutcome::Consumed {
                    requested: Some(new_index),
                }
            }
            None => WheelOutcome::Consumed { requested: None },
        }
    }

    /// Reset for a new case: measurements, pending navigation, accumulated
    /// wheel motion and position all go back to their initial values before
    /// any measurement of the new case is attempted.
    pub fn switch_case(&mut self, timeline: Timeline) {
        self.timeline = timeline;
        self.case_version += 1;
        self.snapshot = Snapshot::default();
        self.phase = Phase::Idle;
        self.pending_index = None;
        self.current_index = 0;
        self.wheel.reset();
        self.wheel_active_until = None;
        self.spring.snap(0.0);
        self.needs_remeasure = true;
    }

    /// Advance one rendered frame. Returns the group index committed this
    /// frame, if any, so the host can mirror it into its external selection
    /// state.
    ///
    /// The phase machine runs before the spring integrates: measurement must
    /// read the surface against the same position the host drew with, and
    /// the host redraws before calling here again.
    pub fn on_frame<S: Surface + ?Sized>(&mut self, surface: &S, dt: f32) -> Option<usize> {
        let committed = self.advance_phase(surface);
        self.spring.step(dt);
        self.spring
            .clamp_to(-self.snapshot.max_scroll, 0.0, CLAMP_EPSILON);
        committed
    }

    fn advance_phase<S: Surface + ?Sized>(&mut self, surface: &S) -> Option<usize> {
        match self.phase {
            Phase::Idle => {
                if self.needs_remeasure && !self.wheel_window_open() {
                    self.needs_remeasure = false;
                    self.phase = Phase::AwaitingLayout {
                        seq: Sequence::Settle {
                            case_version: self.case_version,
                        },
                        frames_left: LAYOUT_SETTLE_FRAMES,
                    };
                }
                None
            }
            Phase::AwaitingLayout { seq, frames_left } => {
                let frames_left = frames_left.saturating_sub(1);
                if frames_left > 0 {
                    self.phase = Phase::AwaitingLayout { seq, frames_left };
                    return None;
                }
                match measure(surface, self.position(), &self.tuning) {
                    Some(snapshot) => {
                        self.publish(snapshot);
                        self.phase = Phase::Measuring {
                            seq,
                            frames_left: MEASURE_SETTLE_FRAMES,
                        };
                    }
                    None => {
                        // Surface not measurable; keep the prior snapshot and
                        // defer navigations until it is.
                        if let Sequence::Navigate(req) = seq {
                            if req.case_version == self.case_version {
                                self.pending_index = Some(req.index);
                            }
                        }
                        self.phase = Phase::Idle;
                    }
                }
                None
            }
            Phase::Measuring { seq, frames_left } => {
                let frames_left = frames_left.saturating_sub(1);
                if frames_left > 0 {
                    self.phase = Phase::Measuring { seq, frames_left };
                    return None;
                }
                if seq.case_version() != self.case_version {
                    // Completed for a case that is no longer current.
                    self.phase = Phase::Idle;
                    return None;
                }
                match seq {
                    Sequence::Navigate(req) => self.commit(req),
                    Sequence::Settle { .. } => {
                        self.after_settle();
                        None
                    }
                }
            }
            Phase::Committed => {
                self.phase = Phase::Idle;
                None
            }
        }
    }

    /// Apply a freshly published snapshot to a navigation request. If the
    /// snapshot turned out not to cover the request after all, it becomes
    /// pending again rather than erroring.
    fn commit(&mut self, req: NavRequest) -> Option<usize> {
        if !self.snapshot.covers(self.timeline.len()) {
            self.pending_index = Some(req.index);
            self.phase = Phase::Idle;
            return None;
        }
        let Some(target) = compute_target(&self.snapshot, req.index) else {
            self.pending_index = Some(req.index);
            self.phase = Phase::Idle;
            return None;
        };
        if req.animate {
            self.spring.retarget(target);
        } else {
            self.spring.snap(target);
        }
        self.current_index = req.index;
        self.phase = Phase::Committed;
        Some(req.index)
    }

    /// A settle-triggered snapshot was published: consume the pending index
    /// first, else re-anchor the current one if it drifted.
    fn after_settle(&mut self) {
        self.phase = Phase::Idle;
        if self.wheel_window_open() {
            // Gesture input is still arriving; retry after the window closes
            // so a pending index is never dropped.
            self.needs_remeasure = true;
            return;
        }
        if let Some(pending) = self.pending_index.take() {
            self.phase = Phase::AwaitingLayout {
                seq: Sequence::Navigate(NavRequest {
                    index: self.timeline.clamp_index(pending),
                    animate: false,
                    case_version: self.case_version,
                }),
                frames_left: LAYOUT_SETTLE_FRAMES,
            };
            return;
        }
        if let Some(target) = compute_target(&self.snapshot, self.current_index) {
            if (target - self.position()).abs() > self.tuning.reanchor_tolerance_px {
                self.spring.retarget(target);
            }
        }
    }

    /// Publish a snapshot and re-clamp the live position against its bounds.
    fn publish(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        self.spring
            .clamp_to(-self.snapshot.max_scroll, 0.0, CLAMP_EPSILON);
    }

    #[cfg(test)]
    pub(crate) fn close_wheel_window(&mut self) {
        self.wheel_active_until = None;
    }
}
