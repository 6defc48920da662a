use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Row {
    index: usize,
    height: u32,
}

/// In-memory stand-in for a scrollable host: an ordered child list with
/// explicit heights, two padding boxes and a clamped scroll offset.
struct SimSurface {
    rows: Vec<Row>,
    scroll_offset: u64,
    viewport_size: u32,
    pad_top: u64,
    pad_bottom: u64,
}

impl SimSurface {
    fn new(viewport_size: u32) -> Self {
        Self {
            rows: Vec::new(),
            scroll_offset: 0,
            viewport_size,
            pad_top: 0,
            pad_bottom: 0,
        }
    }

    fn content(&self) -> u64 {
        let rows: u64 = self.rows.iter().map(|r| r.height as u64).sum();
        self.pad_top + rows + self.pad_bottom
    }

    fn max_scroll(&self) -> u64 {
        self.content().saturating_sub(self.viewport_size as u64)
    }

    /// A user scroll: clamped like a native scroll container.
    fn scroll_to(&mut self, offset: u64) {
        self.scroll_offset = offset.min(self.max_scroll());
    }

    fn indices(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.index).collect()
    }
}

impl Surface for SimSurface {
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
        self.rows.drain(..count);
    }

    fn remove_tail(&mut self, count: usize) {
        let keep = self.rows.len() - count;
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

/// Producer over a finite feed of `total` rows of uniform `height`.
fn feed(total: usize, height: u32) -> impl Fn(PageRequest) -> Option<Vec<Row>> {
    move |req| {
        let end = req.index.saturating_add(req.count).min(total);
        if req.index >= end {
            return None;
        }
        Some((req.index..end).map(|i| Row { index: i, height }).collect())
    }
}

/// Same as [`feed`] but records every request it sees.
fn recording_feed(
    total: usize,
    height: u32,
    log: Arc<Mutex<Vec<PageRequest>>>,
) -> impl Fn(PageRequest) -> Option<Vec<Row>> {
    let inner = feed(total, height);
    move |req| {
        log.lock().unwrap().push(req);
        inner(req)
    }
}

fn assert_contiguous(surface: &SimSurface, range: IndexRange) {
    let indices = surface.indices();
    assert_eq!(indices.len(), range.len());
    for (k, &i) in indices.iter().enumerate() {
        assert_eq!(i, range.low + k);
    }
}

#[test]
fn initial_fill_renders_first_page() {
    let mut surface = SimSurface::new(100);
    let mut w = Window::new(WindowOptions::new(feed(1000, 20)));

    let out = w.load_initial(&mut surface);
    assert_eq!(
        out,
        LoadOutcome::Loaded(Batch {
            edge: Edge::Forward,
            start_index: 0,
            len: 10,
        })
    );
    assert_eq!(surface.rendered_count(), 10);
    assert_eq!(w.rendered_range(), Some(IndexRange { low: 0, high: 9 }));
    assert_eq!(w.next_index(), 10);
    assert!(!w.is_locked());
}

#[test]
fn forward_scroll_appends_without_eviction() {
    let mut surface = SimSurface::new(100);
    let mut w = Window::new(WindowOptions::new(feed(1000, 20)));
    w.load_initial(&mut surface);

    surface.scroll_to(95);
    let out = w.handle_scroll(&mut surface, 0);
    assert_eq!(
        out,
        Some(LoadOutcome::Loaded(Batch {
            edge: Edge::Forward,
            start_index: 10,
            len: 10,
        }))
    );
    assert_eq!(surface.rendered_count(), 20);
    assert_eq!(w.rendered_range(), Some(IndexRange { low: 0, high: 19 }));
    // Bound not exceeded yet, so no eviction and no compensation.
    assert_eq!(surface.scroll_offset, 95);
}

#[test]
fn forward_scroll_evicts_head_and_compensates() {
    let mut surface = SimSurface::new(100);
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut w = Window::new(WindowOptions::new(recording_feed(1000, 20, log.clone())));
    w.load_initial(&mut surface);
    surface.scroll_to(95);
    w.handle_scroll(&mut surface, 0);
    assert_eq!(surface.rendered_count(), 20);

    surface.scroll_to(290);
    let out = w.handle_scroll(&mut surface, 100);
    assert_eq!(
        out,
        Some(LoadOutcome::Loaded(Batch {
            edge: Edge::Forward,
            start_index: 20,
            len: 10,
        }))
    );
    assert_eq!(surface.rendered_count(), 20);
    assert_eq!(w.rendered_range(), Some(IndexRange { low: 10, high: 29 }));
    // The evicted head block was 10 rows of 20, so the offset drops by 200.
    assert_eq!(surface.scroll_offset, 90);
    assert_contiguous(&surface, w.rendered_range().unwrap());

    let last = *log.lock().unwrap().last().unwrap();
    assert_eq!(
        last,
        PageRequest {
            edge: Edge::Forward,
            index: 20,
            count: 10,
        }
    );
}

#[test]
fn anchored_item_keeps_viewport_position_across_eviction() {
    let mut surface = SimSurface::new(100);
    let mut w = Window::new(WindowOptions::new(feed(1000, 20)));
    w.load_initial(&mut surface);
    surface.scroll_to(95);
    w.handle_scroll(&mut surface, 0);

    surface.scroll_to(290);
    // Anchor: the child at the viewport center before the operation.
    let center = surface.scroll_offset + surface.viewport_size as u64 / 2;
    let anchor_child = (0..surface.rendered_count())
        .find(|&c| surface.extent(c).end() > center)
        .unwrap();
    let anchor_index = surface.logical_index(anchor_child);
    let anchor_rel = surface.extent(anchor_child).start - surface.scroll_offset;

    w.handle_scroll(&mut surface, 100);

    let child = surface
        .indices()
        .iter()
        .position(|&i| i == anchor_index)
        .unwrap();
    let rel = surface.extent(child).start - surface.scroll_offset;
    assert_eq!(rel, anchor_rel);
}

#[test]
fn prepend_count_clamps_at_logical_zero() {
    let mut surface = SimSurface::new(100);
    let log = Arc::new(Mutex::new(Vec::new()));
    let opts =
        WindowOptions::new(recording_feed(1000, 20, log.clone())).with_start_index(25);
    let mut w = Window::new(opts);
    w.load_initial(&mut surface);
    assert_eq!(w.rendered_range(), Some(IndexRange { low: 25, high: 34 }));

    // First sample at offset 0 reads as upward and sits at the top edge.
    let out = w.handle_scroll(&mut surface, 0);
    assert_eq!(
        out,
        Some(LoadOutcome::Loaded(Batch {
            edge: Edge::Backward,
            start_index: 15,
            len: 10,
        }))
    );
    assert_eq!(w.rendered_range(), Some(IndexRange { low: 15, high: 34 }));
    // Prepending 10 rows of 20 above the viewport shifts the offset by 200.
    assert_eq!(surface.scroll_offset, 200);

    // Compensation moved the real offset above the recorded raw sample, so
    // the next sample reads as downward; the one after re-derives upward.
    surface.scroll_to(10);
    assert_eq!(w.handle_scroll(&mut surface, 100), None);
    surface.scroll_to(5);
    let out = w.handle_scroll(&mut surface, 200);
    assert_eq!(
        out,
        Some(LoadOutcome::Loaded(Batch {
            edge: Edge::Backward,
            start_index: 5,
            len: 10,
        }))
    );
    assert_eq!(w.rendered_range(), Some(IndexRange { low: 5, high: 24 }));
    assert_eq!(surface.rendered_count(), 20);
    assert_eq!(surface.scroll_offset, 205);

    surface.scroll_to(4);
    let out = w.handle_scroll(&mut surface, 300);
    assert_eq!(
        out,
        Some(LoadOutcome::Loaded(Batch {
            edge: Edge::Backward,
            start_index: 0,
            len: 5,
        }))
    );
    assert_eq!(w.rendered_range(), Some(IndexRange { low: 0, high: 19 }));
    let last = *log.lock().unwrap().last().unwrap();
    // Never requests more items than logical positions remain before 0.
    assert_eq!(last.count, 5);
    assert_eq!(last.index, 0);

    // At the logical start an upward sample is a no-op.
    surface.scroll_to(3);
    let before = surface.indices();
    assert_eq!(w.handle_scroll(&mut surface, 400), None);
    assert_eq!(surface.indices(), before);
    assert!(!w.is_locked());
}

#[test]
fn exhausted_producer_is_a_soft_stop_and_retries() {
    let mut surface = SimSurface::new(100);
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut w = Window::new(WindowOptions::new(recording_feed(15, 20, calls.clone())));
    w.load_initial(&mut surface);

    surface.scroll_to(95);
    let out = w.handle_scroll(&mut surface, 0);
    assert_eq!(
        out,
        Some(LoadOutcome::Loaded(Batch {
            edge: Edge::Forward,
            start_index: 10,
            len: 5,
        }))
    );
    assert_eq!(w.rendered_range(), Some(IndexRange { low: 0, high: 14 }));

    surface.scroll_to(200);
    let out = w.handle_scroll(&mut surface, 100);
    assert_eq!(out, Some(LoadOutcome::Exhausted(Edge::Forward)));
    assert!(!w.is_locked());
    assert_eq!(surface.rendered_count(), 15);

    // Exhaustion is not remembered: the next downward sample calls the
    // producer again. An upward sample first re-establishes direction.
    surface.scroll_to(190);
    assert_eq!(w.handle_scroll(&mut surface, 150), None);
    let before = calls.lock().unwrap().len();
    surface.scroll_to(200);
    let out = w.handle_scroll(&mut surface, 200);
    assert_eq!(out, Some(LoadOutcome::Exhausted(Edge::Forward)));
    assert_eq!(calls.lock().unwrap().len(), before + 1);
}

#[test]
fn locked_window_drops_samples_without_mutation() {
    let mut surface = SimSurface::new(100);
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut w = Window::new(WindowOptions::new(recording_feed(1000, 20, calls.clone())));
    w.load_initial(&mut surface);
    let produced = calls.lock().unwrap().len();

    w.state.locked = true;
    let range = w.rendered_range();
    let sample = w.last_scroll_offset();

    surface.scroll_to(95);
    assert_eq!(
        w.handle_scroll(&mut surface, 0),
        Some(LoadOutcome::Contended)
    );
    assert_eq!(calls.lock().unwrap().len(), produced);
    assert_eq!(w.rendered_range(), range);
    assert_eq!(w.last_scroll_offset(), sample);
    assert_eq!(surface.rendered_count(), 10);
}

#[test]
fn jump_to_mid_lock_force_clears_and_reloads() {
    let mut surface = SimSurface::new(100);
    let mut w = Window::new(WindowOptions::new(feed(1000, 20)));
    w.load_initial(&mut surface);
    surface.scroll_to(95);
    w.handle_scroll(&mut surface, 0);

    w.state.locked = true;
    let out = w.jump_to(&mut surface, 50);
    assert_eq!(
        out,
        LoadOutcome::Loaded(Batch {
            edge: Edge::Forward,
            start_index: 50,
            len: 10,
        })
    );
    assert!(!w.is_locked());
    assert_eq!(w.rendered_range(), Some(IndexRange { low: 50, high: 59 }));
    assert_eq!(surface.indices(), (50..60usize).collect::<Vec<_>>());
    assert_eq!(surface.scroll_offset, 0);
    assert_eq!(w.ledger(), PaddingLedger::default());
}

#[test]
fn recheck_catches_fling_past_threshold() {
    let mut surface = SimSurface::new(100);
    let opts = WindowOptions::new(feed(1000, 20))
        .with_offset_threshold(50, ThresholdUnit::Pixels);
    let mut w = Window::new(opts);
    w.load_initial(&mut surface);

    surface.scroll_to(10);
    assert_eq!(w.handle_scroll(&mut surface, 0), None);

    // The fling lands past the threshold without another scroll event.
    surface.scroll_to(95);
    assert_eq!(w.tick(&mut surface, 100), None);
    let out = w.tick(&mut surface, 200);
    assert_eq!(
        out,
        Some(LoadOutcome::Loaded(Batch {
            edge: Edge::Forward,
            start_index: 10,
            len: 10,
        }))
    );
    // The deadline is consumed; nothing further is due.
    assert_eq!(w.tick(&mut surface, 300), None);
}

#[test]
fn percent_threshold_is_relative_to_viewport() {
    let mut surface = SimSurface::new(100);
    let opts = WindowOptions::new(feed(1000, 20))
        .with_offset_threshold(30, ThresholdUnit::Percent);
    let mut w = Window::new(opts);
    w.load_initial(&mut surface);

    // 30% of a 100px viewport: triggers under 30px from the bottom.
    surface.scroll_to(60);
    assert_eq!(w.handle_scroll(&mut surface, 0), None);
    surface.scroll_to(75);
    assert!(matches!(
        w.handle_scroll(&mut surface, 100),
        Some(LoadOutcome::Loaded(_))
    ));
}

#[test]
fn placeholder_append_trades_eviction_for_top_padding() {
    let mut surface = SimSurface::new(100);
    let opts = WindowOptions::new(feed(1000, 20)).with_strategy(SpliceStrategy::Placeholder);
    let mut w = Window::new(opts);
    w.load_initial(&mut surface);
    surface.scroll_to(95);
    w.handle_scroll(&mut surface, 0);
    assert_eq!(surface.rendered_count(), 20);

    let total_before = surface.content() + 10u64 * 20; // plus the incoming batch
    surface.scroll_to(290);
    w.handle_scroll(&mut surface, 100);

    assert_eq!(surface.rendered_count(), 20);
    assert_eq!(w.rendered_range(), Some(IndexRange { low: 10, high: 29 }));
    // Evicted height became top padding; the offset did not move.
    assert_eq!(surface.pad_top, 200);
    assert_eq!(surface.pad_bottom, 0);
    assert_eq!(surface.scroll_offset, 290);
    assert_eq!(w.ledger(), PaddingLedger { top: 200, bottom: 0 });
    // Total scrollable height is conserved.
    assert_eq!(surface.content(), total_before);
}

#[test]
fn placeholder_prepend_consumes_top_padding() {
    let mut surface = SimSurface::new(100);
    let opts = WindowOptions::new(feed(1000, 20)).with_strategy(SpliceStrategy::Placeholder);
    let mut w = Window::new(opts);
    w.load_initial(&mut surface);
    surface.scroll_to(95);
    w.handle_scroll(&mut surface, 0);
    surface.scroll_to(290);
    w.handle_scroll(&mut surface, 100);
    assert_eq!(w.ledger(), PaddingLedger { top: 200, bottom: 0 });

    surface.scroll_to(205);
    let out = w.handle_scroll(&mut surface, 200);
    assert_eq!(
        out,
        Some(LoadOutcome::Loaded(Batch {
            edge: Edge::Backward,
            start_index: 0,
            len: 10,
        }))
    );
    assert_eq!(w.rendered_range(), Some(IndexRange { low: 0, high: 19 }));
    // Insertion was absorbed entirely by the top box; the evicted tail grew
    // the bottom box instead of touching the offset.
    assert_eq!(surface.pad_top, 0);
    assert_eq!(surface.pad_bottom, 200);
    assert_eq!(surface.scroll_offset, 205);
    assert_eq!(w.ledger(), PaddingLedger { top: 0, bottom: 200 });
}

#[test]
fn completion_callback_sees_each_batch() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen2 = seen.clone();
    let opts = WindowOptions::new(feed(1000, 20))
        .with_on_batch_loaded(Some(move |b: &Batch| seen2.lock().unwrap().push(*b)));
    let mut surface = SimSurface::new(100);
    let mut w = Window::new(opts);
    w.load_initial(&mut surface);
    surface.scroll_to(95);
    w.handle_scroll(&mut surface, 0);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].range(), IndexRange { low: 0, high: 9 });
    assert_eq!(seen[1].range(), IndexRange { low: 10, high: 19 });
    assert!(seen.iter().all(|b| b.edge == Edge::Forward));
}

#[test]
fn rendered_count_stays_bounded_under_random_walk() {
    let mut rng = Lcg::new(0x1234_5678);
    let mut surface = SimSurface::new(60);
    let opts = WindowOptions::new(feed(10_000, 20))
        .with_page_size(5)
        .with_offset_threshold(30, ThresholdUnit::Pixels);
    let mut w = Window::new(opts);
    w.load_initial(&mut surface);

    let mut now_ms = 0u64;
    for _ in 0..300 {
        let max = surface.max_scroll().max(1);
        surface.scroll_to(rng.gen_range_u64(0, max + 1));
        now_ms += rng.gen_range_u64(1, 400);
        if rng.next_u64() & 1 == 0 {
            w.handle_scroll(&mut surface, now_ms);
        } else {
            w.tick(&mut surface, now_ms);
        }

        assert!(!w.is_locked());
        assert!(surface.rendered_count() <= 10);
        let range = w.rendered_range().unwrap();
        assert_contiguous(&surface, range);
        assert_eq!(w.next_index(), range.high + 1);
    }
}
