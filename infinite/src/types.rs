/// A logical edge of the rendered window.
///
/// `Forward` is the high-index edge (appending while scrolling down),
/// `Backward` the low-index edge (prepending while scrolling up). The same
/// values double as the derived scroll direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Forward,
    Backward,
}

/// Unit of [`crate::WindowOptions::offset_threshold`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThresholdUnit {
    Pixels,
    /// Percent of the viewport size.
    Percent,
}

/// How the splicer compensates for evicted content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpliceStrategy {
    /// Physically insert/remove children and adjust the scroll offset by the
    /// measured height delta.
    Real,
    /// Represent evicted content as container padding instead of moving the
    /// scroll offset. Only valid when items share comparable heights.
    Placeholder,
}

/// A live reading of the host's scroll geometry.
///
/// Never cached: insertion and removal change it, so it is re-read around
/// every mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub scroll_offset: u64,
    pub viewport_size: u32,
    pub content_size: u64,
}

impl Geometry {
    /// Distance from the bottom of the viewport to the end of the content.
    pub fn bottom_distance(&self) -> u64 {
        self.content_size
            .saturating_sub(self.scroll_offset.saturating_add(self.viewport_size as u64))
    }
}

/// Bounding position of one rendered child, measured from the content-box
/// start (top padding included).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub start: u64,
    pub size: u32,
}

impl Extent {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }
}

/// Inclusive logical indices of the first and last rendered items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexRange {
    pub low: usize,
    pub high: usize,
}

impl IndexRange {
    pub fn len(&self) -> usize {
        self.high.saturating_sub(self.low).saturating_add(1)
    }

    pub fn is_empty(&self) -> bool {
        self.high < self.low
    }
}

/// The request handed to the page producer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRequest {
    pub edge: Edge,
    /// First logical index of the requested batch.
    pub index: usize,
    pub count: usize,
}

/// Metadata for one successfully spliced batch.
///
/// The items themselves move into the surface on insertion; this is what the
/// completion callback receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Batch {
    pub edge: Edge,
    pub start_index: usize,
    pub len: usize,
}

impl Batch {
    /// Inclusive last logical index of the batch.
    pub fn end_index(&self) -> usize {
        self.start_index
            .saturating_add(self.len.saturating_sub(1))
    }

    pub fn range(&self) -> IndexRange {
        IndexRange {
            low: self.start_index,
            high: self.end_index(),
        }
    }
}

/// Result of a triggered load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadOutcome {
    Loaded(Batch),
    /// The producer had no more content in this direction. Soft stop: the
    /// lock is released and the next scroll sample retries.
    Exhausted(Edge),
    /// A load was already in flight; the request was dropped, nothing else
    /// changed.
    Contended,
}
