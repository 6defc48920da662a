//! A headless bidirectional windowed-loading engine for infinite lists.
//!
//! For the bind/unbind registry and an in-memory reference surface, see the
//! `infinite-adapter` crate.
//!
//! This crate keeps the rendered portion of an arbitrarily long list bounded:
//! as the user scrolls toward either edge of the rendered content it requests
//! the next batch from an injected page producer, splices it in at that edge,
//! evicts the oldest batch at the opposite edge, and compensates the scroll
//! offset (or container padding) so the viewport never visibly jumps.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide, via the
//! [`Surface`] trait:
//! - live scroll offset, viewport size and content size
//! - per-child bounding extents
//! - append/prepend/remove of rendered items
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod detect;
mod loader;
mod options;
mod splice;
mod state;
mod surface;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use options::{OnBatchLoaded, PageProducer, WindowOptions};
pub use state::{PaddingLedger, WindowStatus};
pub use surface::Surface;
pub use types::{
    Batch, Edge, Extent, Geometry, IndexRange, LoadOutcome, PageRequest, SpliceStrategy,
    ThresholdUnit,
};
pub use window::Window;
