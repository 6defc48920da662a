//! Batch insertion, eviction and scroll compensation.
//!
//! Both strategies keep the rendered child count bounded by `2 * page_size`.
//! They differ in how the evicted height is hidden from the user: `Real`
//! moves the scroll offset by measured deltas, `Placeholder` converts the
//! height into container padding and leaves the offset alone whenever the
//! ledger can absorb it.

use alloc::vec::Vec;

use crate::state::PaddingLedger;
use crate::{SpliceStrategy, Surface};

#[derive(Clone, Copy, Debug)]
pub(crate) struct SpliceReport {
    pub(crate) inserted: usize,
    pub(crate) evicted: usize,
}

pub(crate) fn append<S: Surface>(
    surface: &mut S,
    items: Vec<S::Item>,
    page_size: usize,
    strategy: SpliceStrategy,
    ledger: &mut PaddingLedger,
) -> SpliceReport {
    let inserted = items.len();
    surface.append(items);

    let excess = surface
        .rendered_count()
        .saturating_sub(page_size.saturating_mul(2));
    if excess == 0 {
        return SpliceReport {
            inserted,
            evicted: 0,
        };
    }

    match strategy {
        SpliceStrategy::Real => {
            // Order matters: insert, measure, remove, measure, diff, adjust.
            // Removing before measuring loses the height of the evicted block.
            let before = surface.geometry().content_size;
            surface.remove_head(excess);
            let after = surface.geometry().content_size;
            let removed = before.saturating_sub(after);

            let offset = surface.geometry().scroll_offset;
            surface.set_scroll_offset(offset.saturating_sub(removed));
        }
        SpliceStrategy::Placeholder => {
            let removed = block_height(surface, 0, excess);
            surface.remove_head(excess);

            // The evicted height becomes top padding; the bottom box shrinks
            // by the same amount (clamped) to conserve total scroll height.
            ledger.top = ledger.top.saturating_add(removed);
            ledger.bottom = ledger.bottom.saturating_sub(removed);
            surface.set_padding(ledger.top, ledger.bottom);
        }
    }

    SpliceReport {
        inserted,
        evicted: excess,
    }
}

pub(crate) fn prepend<S: Surface>(
    surface: &mut S,
    items: Vec<S::Item>,
    page_size: usize,
    strategy: SpliceStrategy,
    ledger: &mut PaddingLedger,
) -> SpliceReport {
    let inserted = items.len();
    surface.prepend(items);

    match strategy {
        SpliceStrategy::Real => {
            // Prepending always grows content above the viewport, so the
            // compensation is additive and read straight from geometry: the
            // last prepended child's bottom edge is the inserted height.
            let added = surface.extent(inserted - 1).end();
            let offset = surface.geometry().scroll_offset;
            surface.set_scroll_offset(offset.saturating_add(added));
        }
        SpliceStrategy::Placeholder => {
            // Inserted height is absorbed by shrinking the top padding; only
            // the unabsorbed remainder moves the scroll offset.
            let added = block_height(surface, 0, inserted);
            let absorbed = ledger.top.min(added);
            ledger.top -= absorbed;
            let spill = added - absorbed;
            if spill > 0 {
                let offset = surface.geometry().scroll_offset;
                surface.set_scroll_offset(offset.saturating_add(spill));
            }
        }
    }

    let excess = surface
        .rendered_count()
        .saturating_sub(page_size.saturating_mul(2));
    if excess > 0 {
        match strategy {
            SpliceStrategy::Real => {
                // Tail eviction shrinks content below the viewport only; no
                // compensation needed.
                surface.remove_tail(excess);
            }
            SpliceStrategy::Placeholder => {
                let n = surface.rendered_count();
                let removed = block_height(surface, n - excess, excess);
                surface.remove_tail(excess);
                ledger.bottom = ledger.bottom.saturating_add(removed);
            }
        }
    }

    if strategy == SpliceStrategy::Placeholder {
        surface.set_padding(ledger.top, ledger.bottom);
    }

    SpliceReport {
        inserted,
        evicted: excess,
    }
}

/// Height of the contiguous child block `[first, first + count)`, measured
/// before any removal.
fn block_height<S: Surface>(surface: &S, first: usize, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    let last = surface.extent(first + count - 1).end();
    last.saturating_sub(surface.extent(first).start)
}
