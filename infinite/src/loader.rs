//! Batch planning and producer invocation.

use alloc::vec::Vec;

use crate::options::PageProducer;
use crate::state::WindowState;
use crate::{Edge, PageRequest};

/// Plans the next request for `edge`.
///
/// Forward loads always request a full page at the next forward index.
/// Backward loads request `min(page_size, low)` items ending just before the
/// current low edge, so the logical index can never go below 0. Returns
/// `None` when the window is already at the logical start.
pub(crate) fn plan(edge: Edge, state: &WindowState, page_size: usize) -> Option<PageRequest> {
    match edge {
        Edge::Forward => Some(PageRequest {
            edge,
            index: state.index,
            count: page_size,
        }),
        Edge::Backward => {
            let low = state.first_last.map(|r| r.low).unwrap_or(0);
            if low == 0 {
                return None;
            }
            let count = page_size.min(low);
            Some(PageRequest {
                edge,
                index: low - count,
                count,
            })
        }
    }
}

/// Invokes the producer for a planned request.
///
/// An absent or empty result means "no more content in this direction" and
/// maps to `None`. Results longer than requested are truncated so a
/// misbehaving producer cannot push the low edge out of bounds.
pub(crate) fn request<I>(producer: &PageProducer<I>, req: PageRequest) -> Option<Vec<I>> {
    let mut items = producer(req)?;
    if items.is_empty() {
        return None;
    }
    if items.len() > req.count {
        iwarn!(
            produced = items.len(),
            requested = req.count,
            "producer returned more items than requested; truncating"
        );
        items.truncate(req.count);
    }
    Some(items)
}
