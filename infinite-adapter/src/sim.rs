use alloc::vec::Vec;

use infinite::{Extent, Geometry, Surface};

/// One rendered row of a [`VecSurface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    pub index: usize,
    pub height: u32,
}

/// An in-memory scrollable surface.
///
/// Behaves like a native scroll container: an ordered child list with
/// explicit pixel heights, top/bottom padding boxes and a scroll offset
/// clamped to the scrollable range. Useful for tests, demos and headless
/// prototyping of producer/window wiring before a real UI host exists.
#[derive(Clone, Debug, Default)]
pub struct VecSurface {
    rows: Vec<Row>,
    scroll_offset: u64,
    viewport_size: u32,
    pad_top: u64,
    pad_bottom: u64,
}

impl VecSurface {
    pub fn new(viewport_size: u32) -> Self {
        Self {
            viewport_size,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn padding(&self) -> (u64, u64) {
        (self.pad_top, self.pad_bottom)
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn viewport_size(&self) -> u32 {
        self.viewport_size
    }

    /// Simulates a viewport resize. Feed the follow-up through
    /// [`infinite::Window::handle_resize`].
    pub fn set_viewport_size(&mut self, viewport_size: u32) {
        self.viewport_size = viewport_size;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Simulates a user scroll, clamped like a native container.
    pub fn scroll_to(&mut self, offset: u64) {
        self.scroll_offset = offset.min(self.max_scroll());
    }

    pub fn max_scroll(&self) -> u64 {
        self.content().saturating_sub(self.viewport_size as u64)
    }

    fn content(&self) -> u64 {
        let rows: u64 = self.rows.iter().map(|r| r.height as u64).sum();
        self.pad_top + rows + self.pad_bottom
    }
}

impl Surface for VecSurface {
    type Item = Row;

    fn geometry(&self) -> Geometry {
        Geometry {
            scroll_offset: self.scroll_offset,
            viewport_size: self.viewport_size,
            content_size: self.content(),
        }
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll_offset = offset.min(self.max_scroll());
    }

    fn rendered_count(&self) -> usize {
        self.rows.len()
    }

    fn extent(&self, child: usize) -> Extent {
        let mut start = self.pad_top;
        for r in &self.rows[..child] {
            start += r.height as u64;
        }
        Extent {
            start,
            size: self.rows[child].height,
        }
    }

    fn logical_index(&self, child: usize) -> usize {
        self.rows[child].index
    }

    fn append(&mut self, items: Vec<Row>) {
        self.rows.extend(items);
    }

    fn prepend(&mut self, items: Vec<Row>) {
        self.rows.splice(0..0, items);
    }

    fn remove_head(&mut self, count: usize) {
        self.rows.drain(..count.min(self.rows.len()));
    }

    fn remove_tail(&mut self, count: usize) {
        let keep = self.rows.len().saturating_sub(count);
        self.rows.truncate(keep);
    }

    fn clear(&mut self) {
        self.rows.clear();
    }

    fn set_padding(&mut self, top: u64, bottom: u64) {
        self.pad_top = top;
        self.pad_bottom = bottom;
    }
}
