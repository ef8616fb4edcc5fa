//! Measurement snapshots and target positions
//!
//! A snapshot is produced atomically by the measurement engine and never
//! mutated afterwards; consumers test freshness with [`Snapshot::covers`]
//! against the current case's group count instead of trusting a ready flag.

use serde::{Deserialize, Serialize};

/// A consistent set of measured geometry for every group of the current
/// case, plus the viewport and content extents they were read against.
///
/// Offsets are in untranslated content space: the distance from the content
/// top to each group's top edge, independent of the current scroll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub offsets: Vec<f32>,
    pub heights: Vec<f32>,
    pub content_extent: f32,
    pub viewport_extent: f32,
    pub max_scroll: f32,
}

impl Snapshot {
    /// True when this snapshot measures exactly the groups the current case
    /// renders. A count mismatch means the snapshot predates a case switch
    /// or an expand/collapse and must not be used to compute targets.
    pub fn covers(&self, group_count: usize) -> bool {
        group_count > 0 && self.offsets.len() == group_count
    }

    /// Clamp a scroll position into this snapshot's valid range.
    pub fn clamp(&self, position: f32) -> f32 {
        position.clamp(-self.max_scroll, 0.0)
    }
}

/// Scroll offset that anchors group `index`'s top edge to the viewport top,
/// clamped into the snapshot's scrollable range. `None` when the snapshot
/// does not cover `index` - the caller defers instead of guessing.
pub fn compute_target(snapshot: &Snapshot, index: usize) -> Option<f32> {
    let offset = *snapshot.offsets.get(index)?;
    Some(snapshot.clamp(-offset))
}
