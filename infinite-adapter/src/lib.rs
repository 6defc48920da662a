//! Adapter utilities for the `infinite` crate.
//!
//! The `infinite` crate is UI-agnostic and focuses on the core windowing
//! state machine. This crate provides small, framework-neutral helpers
//! commonly needed by adapters:
//!
//! - A bind/unbind registry mapping host surface ids to live windows
//! - An in-memory reference surface for tests, demos and prototyping
//!
//! This crate is intentionally framework-agnostic (no DOM/ratatui/egui
//! bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod bindings;
mod sim;


pub use bindings::{BindingId, Bindings};
pub use sim::{Row, VecSurface};
