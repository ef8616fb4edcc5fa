//! Core engine for traceline - reconciles discrete year navigation with a
//! continuous, spring-animated scroll position over a dynamically-sized
//! visual surface.
//!
//! The host renders the timeline and owns the input loop; this crate owns the
//! scroll position, the measurement snapshots it is derived from, and the
//! state machine that keeps the two consistent while layout is in flux.

pub mod controller;
pub mod gesture;
pub mod measure;
pub mod snapshot;
pub mod spring;
pub mod timeline;
pub mod tuning;

pub use controller::{ScrollController, WheelOutcome};
pub use gesture::{DeltaUnit, WheelAccumulator, WheelDelta};
pub use measure::{GroupRect, Surface};
pub use snapshot::{compute_target, Snapshot};
pub use spring::Spring;
pub use timeline::{CaseId, Timeline};
pub use tuning::{ScrollTuning, TuningError, CLAMP_EPSILON};
