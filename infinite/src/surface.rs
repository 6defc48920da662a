use alloc::vec::Vec;

use crate::{Extent, Geometry};

/// The host scrollable surface backing one window.
///
/// Implementors own the rendered children and the native scroll state.
/// Whether the host is a whole document viewport or an inner scrollable
/// element is the implementor's concern; the engine only ever goes through
/// this trait. The children may live in a nested render container as long as
/// extents are reported against the scrolled content box.
///
/// Contract:
/// - [`Surface::geometry`] and [`Surface::extent`] must reflect live layout.
///   Insertion and removal change both, and the splicer measures around every
///   mutation, so no caching is allowed.
/// - Children are an ordered sequence; child `0` is the low-index edge.
/// - [`Surface::logical_index`] reports the logical list index a rendered
///   child represents. The engine re-derives its rendered range from the
///   first and last child after every splice instead of trusting held state.
pub trait Surface {
    type Item;

    /// Current scroll offset, viewport size and content size.
    fn geometry(&self) -> Geometry;

    fn set_scroll_offset(&mut self, offset: u64);

    /// Number of currently rendered children.
    fn rendered_count(&self) -> usize;

    /// Bounding extent of the child at `child`, measured from the content-box
    /// start (top padding included).
    ///
    /// Precondition: `child < rendered_count()`.
    fn extent(&self, child: usize) -> Extent;

    /// Logical list index of the child at `child`.
    ///
    /// Precondition: `child < rendered_count()`.
    fn logical_index(&self, child: usize) -> usize;

    fn append(&mut self, items: Vec<Self::Item>);

    fn prepend(&mut self, items: Vec<Self::Item>);

    fn remove_head(&mut self, count: usize);

    fn remove_tail(&mut self, count: usize);

    fn clear(&mut self);

    /// Sets the placeholder padding boxes (absolute values, not deltas).
    ///
    /// Only called in [`crate::SpliceStrategy::Placeholder`] mode; hosts that
    /// never enable it can keep the default no-op.
    fn set_padding(&mut self, top: u64, bottom: u64) {
        let _ = (top, bottom);
    }
}
