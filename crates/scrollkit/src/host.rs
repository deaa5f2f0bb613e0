//! Collaborator contracts consumed by the scroll view.
//!
//! The view owns no scene graph, no layout engine and no instantiation
//! strategy. It drives three collaborators:
//!
//! - [`LayoutHost`]: creates layout slots and reports world-space geometry
//! - [`ItemPool`]: hands out and takes back item instances
//! - [`ListingItem`]: binds an item instance to a data record

use scrollkit_core::Corners;

use crate::error::PoolError;

/// An item type that can present one data record.
///
/// Scroll views clone items into their listing and into `item_created` and
/// `item_removed` events, so observers get a copy of the bound instance. Use
/// a handle type if observers need to reach the live item.
pub trait ListingItem<D> {
    /// Bind this instance to `data`. Called exactly once per visible binding.
    fn init(&mut self, data: &D);
}

/// Supplies reusable item instances.
///
/// All calls happen on the thread that drives the view, so implementations
/// need no internal locking.
pub trait ItemPool<I> {
    /// Take an instance out of the pool, creating one if needed.
    fn acquire(&mut self) -> Result<I, PoolError>;

    /// Return an instance previously handed out by [`acquire`](Self::acquire).
    fn release(&mut self, item: I);
}

/// The host scene-graph/layout system the view lives in.
pub trait LayoutHost {
    /// Handle to a layout placeholder owned by the host.
    type Slot;

    /// The item type the host parents under its slots.
    type Item;

    /// World-space corners of the explicit scroll viewport, if one is set.
    fn viewport_corners(&self) -> Option<Corners>;

    /// World-space corners of the scroll container itself.
    fn container_corners(&self) -> Corners;

    /// Create a placeholder for `index` under the scroll content, with an
    /// identity local transform.
    fn spawn_slot(&mut self, index: usize) -> Self::Slot;

    /// Destroy a placeholder created by [`spawn_slot`](Self::spawn_slot).
    fn despawn_slot(&mut self, slot: Self::Slot);

    /// World-space corners of a placeholder, or `None` while the host has not
    /// laid it out yet.
    fn slot_corners(&self, slot: &Self::Slot) -> Option<Corners>;

    /// Parent `item` under `slot` and reset it to the item's reference
    /// transform (position, scale and rotation of the prototype).
    fn attach_item(&mut self, item: &mut Self::Item, slot: &Self::Slot);
}
