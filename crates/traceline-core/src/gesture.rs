//! Wheel-event accumulation into discrete year steps
//!
//! Raw wheel input varies wildly across devices; the accumulator decouples
//! that variance from navigation by only emitting a step once a fixed pixel
//! threshold of filtered motion has built up. The sub-threshold remainder is
//! carried over rather than reset, so slow continuous scrolling stays
//! proportional instead of sticky.

use crate::tuning::ScrollTuning;

/// Unit of a raw wheel delta, per the host's input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaUnit {
    /// Device pixels, used as-is.
    Pixel,
    /// Text lines; multiplied by the configured line height.
    Line,
    /// Whole pages; multiplied by the current viewport extent.
    Page,
}

/// One raw wheel event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    pub amount: f32,
    pub unit: DeltaUnit,
}

impl WheelDelta {
    pub fn pixels(amount: f32) -> Self {
        Self {
            amount,
            unit: DeltaUnit::Pixel,
        }
    }

    pub fn lines(amount: f32) -> Self {
        Self {
            amount,
            unit: DeltaUnit::Line,
        }
    }

    pub fn pages(amount: f32) -> Self {
        Self {
            amount,
            unit: DeltaUnit::Page,
        }
    }

    fn to_pixels(self, viewport_extent: f32, tuning: &ScrollTuning) -> f32 {
        match self.unit {
            DeltaUnit::Pixel => self.amount,
            DeltaUnit::Line => self.amount * tuning.line_height_px,
            DeltaUnit::Page => self.amount * viewport_extent,
        }
    }
}

/// Running signed pixel total of filtered wheel motion.
#[derive(Debug, Clone, Default)]
pub struct WheelAccumulator {
    accum: f32,
}

impl WheelAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one event and return the steps it releases (0 below threshold).
    ///
    /// Steps are truncated toward zero so the leftover remainder keeps the
    /// sign of the accumulated motion, and clamped to the per-event maximum.
    pub fn feed(
        &mut self,
        delta: WheelDelta,
        viewport_extent: f32,
        tuning: &ScrollTuning,
    ) -> i32 {
        let px = delta.to_pixels(viewport_extent, tuning);

        // Sensor noise below the deadzone is discarded outright, never accumulated.
        if px.abs() < tuning.deadzone_px {
            return 0;
        }

        self.accum += px;
        if self.accum.abs() < tuning.wheel_threshold_px {
            return 0;
        }

        let raw = (self.accum / tuning.wheel_threshold_px).trunc() as i32;
        let steps = raw.clamp(-tuning.max_step_per_event, tuning.max_step_per_event);
        self.accum -= steps as f32 * tuning.wheel_threshold_px;
        steps
    }

    /// Sub-threshold motion currently carried over.
    pub fn pending(&self) -> f32 {
        self.accum
    }

    /// Stale motion must not leak across case switches.
    pub fn reset(&mut self) {
        self.accum = 0.0;
    }
}
