use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::options::{OnBatchLoaded, PageProducer};
use crate::state::{PaddingLedger, WindowState, WindowStatus};
use crate::{
    Batch, Edge, IndexRange, LoadOutcome, PageRequest, SpliceStrategy, Surface, ThresholdUnit,
    WindowOptions, detect, loader, splice,
};

/// The live windowing engine bound to one scrollable surface.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold the surface; every operation borrows it.
/// - Your adapter drives it by forwarding scroll/resize events
///   ([`Window::handle_scroll`], [`Window::handle_resize`]) and a periodic
///   [`Window::tick`] for the delayed edge re-check.
/// - Items flow from the injected page producer straight into the surface.
///
/// Single-threaded and cooperative: the only concurrency hazard is
/// re-entrancy, guarded by an internal lock. A sample arriving while a load
/// is in flight is dropped, never queued; the next scroll event re-evaluates
/// the edges once the lock clears.
pub struct Window<I> {
    options: WindowOptions<I>,
    pub(crate) state: WindowState,
}

impl<I> Window<I> {
    pub fn new(options: WindowOptions<I>) -> Self {
        idebug!(
            start_index = options.start_index,
            page_size = options.page_size,
            offset_threshold = options.offset_threshold,
            "Window::new"
        );
        Self {
            state: WindowState::new(options.start_index),
            options,
        }
    }

    pub fn options(&self) -> &WindowOptions<I> {
        &self.options
    }

    /// Logical range currently represented by rendered content, re-derived
    /// from the surface after every splice.
    pub fn rendered_range(&self) -> Option<IndexRange> {
        self.state.current_range()
    }

    /// Next logical index a forward load would request.
    pub fn next_index(&self) -> usize {
        self.state.index
    }

    pub fn is_locked(&self) -> bool {
        self.state.locked
    }

    pub fn last_scroll_offset(&self) -> Option<u64> {
        self.state.last_scroll_offset
    }

    /// Placeholder-mode compensation ledger. Both fields are zero under
    /// [`SpliceStrategy::Real`].
    pub fn ledger(&self) -> PaddingLedger {
        self.state.ledger
    }

    pub fn status(&self) -> WindowStatus {
        self.state.status()
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.options.page_size = page_size;
    }

    pub fn set_offset_threshold(&mut self, offset_threshold: u32, unit: ThresholdUnit) {
        self.options.offset_threshold = offset_threshold;
        self.options.threshold_unit = unit;
    }

    /// Takes effect on the next splice. Switching away from
    /// [`SpliceStrategy::Placeholder`] does not clear padding already on the
    /// surface; use [`Window::jump_to`] for a clean reset.
    pub fn set_strategy(&mut self, strategy: SpliceStrategy) {
        self.options.strategy = strategy;
    }

    pub fn set_recheck_delay_ms(&mut self, delay_ms: u64) {
        self.options.recheck_delay_ms = delay_ms;
    }

    pub fn set_page_producer(
        &mut self,
        producer: impl Fn(PageRequest) -> Option<Vec<I>> + Send + Sync + 'static,
    ) {
        self.options.page_producer = Arc::new(producer) as PageProducer<I>;
    }

    pub fn set_on_batch_loaded(
        &mut self,
        on_batch_loaded: Option<impl Fn(&Batch) + Send + Sync + 'static>,
    ) {
        self.options.on_batch_loaded = on_batch_loaded.map(|f| Arc::new(f) as OnBatchLoaded);
    }

    /// Performs the initial forward fill at `start_index`.
    ///
    /// Call once right after binding the surface; until then the window
    /// represents no content and scroll samples cannot trigger a prepend.
    pub fn load_initial<S: Surface<Item = I>>(&mut self, surface: &mut S) -> LoadOutcome {
        self.try_load(surface, Edge::Forward)
    }

    /// Consumes one scroll sample.
    ///
    /// Derives the scroll direction from the raw offset, evaluates the
    /// forward/backward threshold for that direction, schedules the delayed
    /// re-check, and runs the load pipeline when an edge was crossed.
    ///
    /// Returns `None` when no edge was crossed. Events are expected to be
    /// debounced by the host layer.
    pub fn handle_scroll<S: Surface<Item = I>>(
        &mut self,
        surface: &mut S,
        now_ms: u64,
    ) -> Option<LoadOutcome> {
        if self.state.locked {
            itrace!(now_ms, "scroll sample dropped; load in flight");
            return Some(LoadOutcome::Contended);
        }

        let geometry = surface.geometry();
        let first = (surface.rendered_count() > 0).then(|| surface.extent(0));
        let threshold = detect::threshold_px(
            self.options.offset_threshold,
            self.options.threshold_unit,
            geometry.viewport_size,
        );

        let edge = detect::on_sample(&mut self.state, geometry, first, threshold);
        self.state.recheck_at_ms = Some(now_ms.saturating_add(self.options.recheck_delay_ms));

        let edge = edge?;
        itrace!(?edge, offset = geometry.scroll_offset, "edge crossed");
        Some(self.try_load(surface, edge))
    }

    /// Consumes one resize sample. Same evaluation as a scroll sample.
    pub fn handle_resize<S: Surface<Item = I>>(
        &mut self,
        surface: &mut S,
        now_ms: u64,
    ) -> Option<LoadOutcome> {
        self.handle_scroll(surface, now_ms)
    }

    /// Runs the delayed edge re-check once its deadline has passed.
    ///
    /// The re-check is direction-independent: a fling can jump past the
    /// threshold window between samples in either direction, so both edges
    /// are re-evaluated against the latest geometry.
    pub fn tick<S: Surface<Item = I>>(
        &mut self,
        surface: &mut S,
        now_ms: u64,
    ) -> Option<LoadOutcome> {
        let due = self.state.recheck_at_ms?;
        if now_ms < due {
            return None;
        }
        self.state.recheck_at_ms = None;

        if self.state.locked {
            itrace!(now_ms, "re-check dropped; load in flight");
            return Some(LoadOutcome::Contended);
        }

        let geometry = surface.geometry();
        let first = (surface.rendered_count() > 0).then(|| surface.extent(0));
        let threshold = detect::threshold_px(
            self.options.offset_threshold,
            self.options.threshold_unit,
            geometry.viewport_size,
        );

        let edge = detect::on_recheck(&mut self.state, geometry, first, threshold)?;
        itrace!(?edge, offset = geometry.scroll_offset, "re-check edge crossed");
        Some(self.try_load(surface, edge))
    }

    /// Hard reset: clears all rendered content and reloads fresh from
    /// `index`.
    ///
    /// The lock is released unconditionally first, so this also serves as the
    /// escape hatch for a producer that never returned.
    pub fn jump_to<S: Surface<Item = I>>(
        &mut self,
        surface: &mut S,
        index: usize,
    ) -> LoadOutcome {
        idebug!(index, "jump_to");
        self.state.force_unlock();

        surface.clear();
        surface.set_padding(0, 0);
        surface.set_scroll_offset(0);

        self.state.first_last = None;
        self.state.last_scroll_offset = None;
        self.state.recheck_at_ms = None;
        self.state.ledger = PaddingLedger::default();
        self.state.index = index;

        self.try_load(surface, Edge::Forward)
    }

    fn try_load<S: Surface<Item = I>>(&mut self, surface: &mut S, edge: Edge) -> LoadOutcome {
        if !self.state.begin_load() {
            return LoadOutcome::Contended;
        }

        let Some(req) = loader::plan(edge, &self.state, self.options.page_size) else {
            // Already at the logical start; nothing to prepend.
            self.state.end_load();
            return LoadOutcome::Exhausted(edge);
        };

        let Some(items) = loader::request(&self.options.page_producer, req) else {
            idebug!(?edge, index = req.index, "producer exhausted");
            self.state.end_load();
            return LoadOutcome::Exhausted(edge);
        };

        let report = match edge {
            Edge::Forward => splice::append(
                surface,
                items,
                self.options.page_size,
                self.options.strategy,
                &mut self.state.ledger,
            ),
            Edge::Backward => splice::prepend(
                surface,
                items,
                self.options.page_size,
                self.options.strategy,
                &mut self.state.ledger,
            ),
        };
        self.refresh_range(surface);
        idebug!(
            ?edge,
            inserted = report.inserted,
            evicted = report.evicted,
            "batch spliced"
        );

        let batch = Batch {
            edge,
            start_index: req.index,
            len: report.inserted,
        };

        // The lock clears only once index and rendered range are consistent;
        // the callback runs outside the locked section so it may re-enter.
        self.state.end_load();
        if let Some(cb) = &self.options.on_batch_loaded {
            cb(&batch);
        }
        LoadOutcome::Loaded(batch)
    }

    fn refresh_range<S: Surface<Item = I>>(&mut self, surface: &S) {
        let n = surface.rendered_count();
        if n == 0 {
            self.state.first_last = None;
            return;
        }
        let low = surface.logical_index(0);
        let high = surface.logical_index(n - 1);
        self.state.update_range(low, high);
    }
}

impl<I> Clone for Window<I> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            state: self.state.clone(),
        }
    }
}

impl<I> core::fmt::Debug for Window<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Window")
            .field("options", &self.options)
            .field("state", &self.state)
            .finish()
    }
}
