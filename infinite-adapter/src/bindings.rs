#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use infinite::{LoadOutcome, Surface, Window, WindowOptions};

#[cfg(feature = "std")]
type BindingMap<Id, W> = HashMap<Id, W>;
#[cfg(not(feature = "std"))]
type BindingMap<Id, W> = BTreeMap<Id, W>;

#[cfg(feature = "std")]
pub trait BindingId: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<T: core::hash::Hash + Eq> BindingId for T {}

#[cfg(not(feature = "std"))]
pub trait BindingId: Ord {}
#[cfg(not(feature = "std"))]
impl<T: Ord> BindingId for T {}

/// A registry of live windows keyed by a host-chosen surface id.
///
/// The host layer owns the surfaces; this type owns the windows bound to
/// them and routes events by id. Binding is idempotent: a surface that is
/// already bound is left untouched, matching the expectation that the host
/// may re-run its setup path without duplicating subscriptions.
pub struct Bindings<Id, I> {
    map: BindingMap<Id, Window<I>>,
}

impl<Id: BindingId, I> Bindings<Id, I> {
    pub fn new() -> Self {
        Self {
            map: BindingMap::new(),
        }
    }

    /// Binds `id` and performs the initial fill on `surface`.
    ///
    /// Returns `false` (and does nothing) when `id` is already bound.
    pub fn bind<S: Surface<Item = I>>(
        &mut self,
        id: Id,
        surface: &mut S,
        options: WindowOptions<I>,
    ) -> bool {
        if self.map.contains_key(&id) {
            return false;
        }
        let mut window = Window::new(options);
        window.load_initial(surface);
        self.map.insert(id, window);
        true
    }

    /// Drops the window bound to `id`, leaving rendered content as-is.
    ///
    /// Returns `false` when `id` was not bound.
    pub fn unbind(&mut self, id: &Id) -> bool {
        self.map.remove(id).is_some()
    }

    pub fn is_bound(&self, id: &Id) -> bool {
        self.map.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn window(&self, id: &Id) -> Option<&Window<I>> {
        self.map.get(id)
    }

    pub fn window_mut(&mut self, id: &Id) -> Option<&mut Window<I>> {
        self.map.get_mut(id)
    }

    /// Routes a scroll sample to the window bound to `id`.
    ///
    /// Returns `None` when `id` is unbound or no edge was crossed.
    pub fn on_scroll<S: Surface<Item = I>>(
        &mut self,
        id: &Id,
        surface: &mut S,
        now_ms: u64,
    ) -> Option<LoadOutcome> {
        self.map.get_mut(id)?.handle_scroll(surface, now_ms)
    }

    /// Routes a resize sample to the window bound to `id`.
    pub fn on_resize<S: Surface<Item = I>>(
        &mut self,
        id: &Id,
        surface: &mut S,
        now_ms: u64,
    ) -> Option<LoadOutcome> {
        self.map.get_mut(id)?.handle_resize(surface, now_ms)
    }

    /// Advances the delayed edge re-check of the window bound to `id`.
    pub fn tick<S: Surface<Item = I>>(
        &mut self,
        id: &Id,
        surface: &mut S,
        now_ms: u64,
    ) -> Option<LoadOutcome> {
        self.map.get_mut(id)?.tick(surface, now_ms)
    }

    /// Hard-resets the window bound to `id` to `index`.
    pub fn jump_to<S: Surface<Item = I>>(
        &mut self,
        id: &Id,
        surface: &mut S,
        index: usize,
    ) -> Option<LoadOutcome> {
        Some(self.map.get_mut(id)?.jump_to(surface, index))
    }
}

impl<Id: BindingId, I> Default for Bindings<Id, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id, I> core::fmt::Debug for Bindings<Id, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bindings")
            .field("bound", &self.map.len())
            .finish_non_exhaustive()
    }
}
