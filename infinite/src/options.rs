use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{Batch, PageRequest, SpliceStrategy, ThresholdUnit};

/// Produces one batch of renderable items for a [`PageRequest`].
///
/// Returning `None` (or an empty `Vec`) means "no more content in this
/// direction". The engine treats the result as already available; fetching
/// policy (retries, caching) lives behind this closure.
pub type PageProducer<I> = Arc<dyn Fn(PageRequest) -> Option<Vec<I>> + Send + Sync>;

/// A callback fired after a batch has been spliced in and the lock released.
pub type OnBatchLoaded = Arc<dyn Fn(&Batch) + Send + Sync>;

/// Configuration for [`crate::Window`].
///
/// Cheap to clone: the callbacks are stored in `Arc`s.
pub struct WindowOptions<I> {
    /// First logical index the initial fill requests.
    pub start_index: usize,
    /// Items per batch. The rendered window is bounded by `2 * page_size`.
    pub page_size: usize,
    /// Distance from an edge at which the next load triggers.
    pub offset_threshold: u32,
    pub threshold_unit: ThresholdUnit,
    pub strategy: SpliceStrategy,
    /// Delay of the secondary edge re-check scheduled after each scroll
    /// sample, to catch flings that jump past the threshold between samples.
    pub recheck_delay_ms: u64,
    pub page_producer: PageProducer<I>,
    /// Optional callback fired after each successful splice.
    pub on_batch_loaded: Option<OnBatchLoaded>,
}

impl<I> WindowOptions<I> {
    pub fn new(
        page_producer: impl Fn(PageRequest) -> Option<Vec<I>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            start_index: 0,
            page_size: 10,
            offset_threshold: 200,
            threshold_unit: ThresholdUnit::Pixels,
            strategy: SpliceStrategy::Real,
            recheck_delay_ms: 200,
            page_producer: Arc::new(page_producer),
            on_batch_loaded: None,
        }
    }

    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_offset_threshold(mut self, offset_threshold: u32, unit: ThresholdUnit) -> Self {
        self.offset_threshold = offset_threshold;
        self.threshold_unit = unit;
        self
    }

    pub fn with_strategy(mut self, strategy: SpliceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_recheck_delay_ms(mut self, delay_ms: u64) -> Self {
        self.recheck_delay_ms = delay_ms;
        self
    }

    pub fn with_on_batch_loaded(
        mut self,
        on_batch_loaded: Option<impl Fn(&Batch) + Send + Sync + 'static>,
    ) -> Self {
        self.on_batch_loaded = on_batch_loaded.map(|f| Arc::new(f) as _);
        self
    }
}

impl<I> Clone for WindowOptions<I> {
    fn clone(&self) -> Self {
        Self {
            start_index: self.start_index,
            page_size: self.page_size,
            offset_threshold: self.offset_threshold,
            threshold_unit: self.threshold_unit,
            strategy: self.strategy,
            recheck_delay_ms: self.recheck_delay_ms,
            page_producer: Arc::clone(&self.page_producer),
            on_batch_loaded: self.on_batch_loaded.clone(),
        }
    }
}

impl<I> core::fmt::Debug for WindowOptions<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowOptions")
            .field("start_index", &self.start_index)
            .field("page_size", &self.page_size)
            .field("offset_threshold", &self.offset_threshold)
            .field("threshold_unit", &self.threshold_unit)
            .field("strategy", &self.strategy)
            .field("recheck_delay_ms", &self.recheck_delay_ms)
            .finish_non_exhaustive()
    }
}
