//! Reading the visual surface into measurement snapshots

use crate::snapshot::Snapshot;
use crate::tuning::ScrollTuning;

/// One group's realized geometry, as currently rendered: `top` is relative
/// to the content container's top edge with the scroll translation applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupRect {
    pub top: f32,
    pub height: f32,
}

/// The opaque, measurable visual tree the controller reads.
///
/// Implementations report geometry as it is on screen right now; the
/// measurement pass removes the applied scroll translation itself so that
/// published offsets are always in untranslated content space.
pub trait Surface {
    /// Number of groups the current case renders.
    fn group_count(&self) -> usize;

    /// Geometry for group `index`, or `None` while its element is not yet
    /// realized (mid-rebuild, not yet laid out).
    fn measure_group(&self, index: usize) -> Option<GroupRect>;

    /// Visible height of the scroll viewport, excluding overflowed content.
    fn viewport_extent(&self) -> f32;

    /// The container's own report of its full content height. May lag
    /// reality while layout is settling; the engine cross-checks it.
    fn content_extent(&self) -> f32;
}

/// Produce one snapshot from the surface, or `None` if any group is not yet
/// measurable - the caller keeps its previous snapshot in that case.
///
/// `position` is the scroll translation currently applied to the content
/// (always <= 0); measured tops have it added back out so offsets stay in
/// untranslated space regardless of where the view is scrolled.
pub fn measure<S: Surface + ?Sized>(
    surface: &S,
    position: f32,
    tuning: &ScrollTuning,
) -> Option<Snapshot> {
    let count = surface.group_count();
    if count == 0 {
        return None;
    }

    let viewport_extent = surface.viewport_extent();
    let mut offsets = Vec::with_capacity(count);
    let mut heights = Vec::with_capacity(count);
    let mut total_height = 0.0f32;

    for index in 0..count {
        let rect = surface.measure_group(index)?;
        offsets.push(rect.top - position);
        heights.push(rect.height);
        total_height += rect.height;
    }

    // An unsettled container can undercount its own extent; trust whichever
    // of the two measurements is larger.
    let from_groups = total_height + tuning.content_bottom_padding_px;
    let content_extent = surface.content_extent().max(from_groups);
    let max_scroll = (content_extent - viewport_extent).max(0.0);

    Some(Snapshot {
        offsets,
        heights,
        content_extent,
        viewport_extent,
        max_scroll,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSurface {
        tops: Vec<Option<f32>>,
        heights: Vec<f32>,
        viewport: f32,
        content: f32,
    }

    impl Surface for FakeSurface {
        fn group_count(&self) -> usize {
            self.tops.len()
        }

        fn measure_group(&self, index: usize) -> Option<GroupRect> {
            let top = self.tops.get(index).copied().flatten()?;
            Some(GroupRect {
                top,
                height: self.heights[index],
            })
        }

        fn viewport_extent(&self) -> f32 {
            self.viewport
        }

        fn content_extent(&self) -> f32 {
            self.content
        }
    }

    fn surface(tops: &[f32], heights: &[f32], viewport: f32, content: f32) -> FakeSurface {
        FakeSurface {
            tops: tops.iter().map(|&t| Some(t)).collect(),
            heights: heights.to_vec(),
            viewport,
            content,
        }
    }

    #[test]
    fn test_measure_untranslates_offsets() {
        // Scrolled down 300px: rendered tops are shifted up by 300
        let s = surface(&[-300.0, 0.0, 300.0], &[300.0, 300.0, 300.0], 400.0, 900.0);
        let snap = measure(&s, -300.0, &ScrollTuning::default()).expect("measurable");
        assert_eq!(snap.offsets, vec![0.0, 300.0, 600.0]);
    }

    #[test]
    fn test_measure_prefers_larger_content_extent() {
        // Container reports 900 but groups sum to 900 + padding
        let s = surface(&[0.0, 300.0, 600.0], &[300.0, 300.0, 300.0], 400.0, 900.0);
        let tuning = ScrollTuning::default();
        let snap = measure(&s, 0.0, &tuning).expect("measurable");
        assert_eq!(snap.content_extent, 900.0 + tuning.content_bottom_padding_px);
        assert_eq!(snap.max_scroll, 524.0);
    }

    #[test]
    fn test_measure_trusts_container_when_larger() {
        let s = surface(&[0.0, 300.0], &[300.0, 300.0], 400.0, 1200.0);
        let snap = measure(&s, 0.0, &ScrollTuning::default()).expect("measurable");
        assert_eq!(snap.content_extent, 1200.0);
    }

    #[test]
    fn test_measure_aborts_on_unready_group() {
        let mut s = surface(&[0.0, 300.0, 600.0], &[300.0, 300.0, 300.0], 400.0, 900.0);
        s.tops[1] = None;
        assert!(measure(&s, 0.0, &ScrollTuning::default()).is_none());
    }

    #[test]
    fn test_measure_aborts_on_empty_case() {
        let s = surface(&[], &[], 400.0, 0.0);
        assert!(measure(&s, 0.0, &ScrollTuning::default()).is_none());
    }

    #[test]
    fn test_measure_short_content_has_zero_max_scroll() {
        let s = surface(&[0.0], &[100.0], 400.0, 100.0);
        let snap = measure(&s, 0.0, &ScrollTuning::default()).expect("measurable");
        assert_eq!(snap.max_scroll, 0.0);
    }
}
