//! Edge detection: turning scroll samples into load triggers.

use crate::state::WindowState;
use crate::{Edge, Extent, Geometry, ThresholdUnit};

/// Resolves the configured threshold to pixels for the current viewport.
pub(crate) fn threshold_px(threshold: u32, unit: ThresholdUnit, viewport_size: u32) -> u64 {
    match unit {
        ThresholdUnit::Pixels => threshold as u64,
        ThresholdUnit::Percent => (viewport_size as u64).saturating_mul(threshold as u64) / 100,
    }
}

/// Evaluates one scroll/resize sample.
///
/// Direction is derived from the raw offset against the previous raw sample
/// (a missing previous sample counts as offset 0). The sample is recorded
/// even when no edge is crossed.
pub(crate) fn on_sample(
    state: &mut WindowState,
    geometry: Geometry,
    first: Option<Extent>,
    threshold: u64,
) -> Option<Edge> {
    let prev = state
        .last_scroll_offset
        .replace(geometry.scroll_offset)
        .unwrap_or(0);

    if geometry.scroll_offset > prev {
        forward_crossed(geometry, threshold).then_some(Edge::Forward)
    } else {
        backward_crossed(state, geometry, first, threshold).then_some(Edge::Backward)
    }
}

/// Direction-independent evaluation used by the delayed re-check.
///
/// A fling can out-run the sample that scheduled the re-check, so both edges
/// are tested against the latest geometry. The raw sample is refreshed so the
/// next scroll event derives its direction from current reality.
pub(crate) fn on_recheck(
    state: &mut WindowState,
    geometry: Geometry,
    first: Option<Extent>,
    threshold: u64,
) -> Option<Edge> {
    state.last_scroll_offset = Some(geometry.scroll_offset);

    if forward_crossed(geometry, threshold) {
        return Some(Edge::Forward);
    }
    backward_crossed(state, geometry, first, threshold).then_some(Edge::Backward)
}

fn forward_crossed(geometry: Geometry, threshold: u64) -> bool {
    geometry.bottom_distance() < threshold
}

fn backward_crossed(
    state: &WindowState,
    geometry: Geometry,
    first: Option<Extent>,
    threshold: u64,
) -> bool {
    // Prepending below the logical start is never issued.
    if state.index == 0 {
        return false;
    }
    let Some(range) = state.first_last else {
        return false;
    };
    if range.low == 0 {
        return false;
    }
    let Some(first) = first else {
        return false;
    };
    // The first child's bottom edge is within the threshold of the viewport
    // top (or still inside the viewport).
    first.end().saturating_add(threshold) >= geometry.scroll_offset
}
