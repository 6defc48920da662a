use crate::IndexRange;

/// Virtual-height accumulators for placeholder mode.
///
/// `top` is scroll height evicted above the window, `bottom` scroll height
/// evicted below it. These are the single authority over the surface's
/// padding boxes: the splicer updates the ledger and pushes the absolute
/// values via [`crate::Surface::set_padding`], so repeated operations cannot
/// double-count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaddingLedger {
    pub top: u64,
    pub bottom: u64,
}

/// A lightweight, serializable snapshot of a window's observable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowStatus {
    pub locked: bool,
    /// Next logical index a forward load would request.
    pub next_index: usize,
    /// Logical range currently represented by rendered content.
    pub rendered: Option<IndexRange>,
    pub ledger: PaddingLedger,
}

/// Mutable per-window state.
///
/// Only the load pipeline that holds the lock writes `index` and
/// `first_last`; the detector reads them. `index` is maintained as
/// `first_last.high + 1` after every successful splice.
#[derive(Clone, Debug)]
pub(crate) struct WindowState {
    pub(crate) index: usize,
    pub(crate) first_last: Option<IndexRange>,
    pub(crate) locked: bool,
    /// Raw offset of the previous scroll sample, for direction derivation.
    pub(crate) last_scroll_offset: Option<u64>,
    /// Deadline of the scheduled secondary edge re-check.
    pub(crate) recheck_at_ms: Option<u64>,
    pub(crate) ledger: PaddingLedger,
}

impl WindowState {
    pub(crate) fn new(start_index: usize) -> Self {
        Self {
            index: start_index,
            first_last: None,
            locked: false,
            last_scroll_offset: None,
            recheck_at_ms: None,
            ledger: PaddingLedger::default(),
        }
    }

    /// The only gate through which loader/splicer work proceeds.
    ///
    /// Returns `false` when a load is already in flight; the caller must then
    /// no-op without touching any other state.
    pub(crate) fn begin_load(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.locked = true;
        true
    }

    pub(crate) fn end_load(&mut self) {
        self.locked = false;
    }

    /// Unconditional unlock, the `jump_to` escape hatch.
    pub(crate) fn force_unlock(&mut self) {
        self.locked = false;
    }

    pub(crate) fn current_range(&self) -> Option<IndexRange> {
        self.first_last
    }

    pub(crate) fn update_range(&mut self, low: usize, high: usize) {
        self.first_last = Some(IndexRange { low, high });
        self.index = high.saturating_add(1);
    }

    pub(crate) fn status(&self) -> WindowStatus {
        WindowStatus {
            locked: self.locked,
            next_index: self.index,
            rendered: self.first_last,
            ledger: self.ledger,
        }
    }
}
