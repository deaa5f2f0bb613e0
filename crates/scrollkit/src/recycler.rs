//! The item recycler: binds item instances to visible slots.
//!
//! The recycler owns the authoritative index -> item mapping. For every slot
//! it either materializes an item (slot became visible), releases one (slot
//! became invisible), or leaves the index alone. Side effects are ordered:
//!
//! - create: acquire, attach to the slot, `init`, record the mapping, then
//!   emit `item_created`
//! - remove: drop the mapping, emit `item_removed`, then release to the pool
//!
//! so an observer never sees a mapping entry without a bound item or the
//! other way round.

use std::collections::BTreeMap;
use std::mem::Discriminant;

use scrollkit_core::Signal;
use scrollkit_core::logging::targets;

use crate::error::ScrollViewError;
use crate::host::{ItemPool, LayoutHost, ListingItem};

/// Payload of the `item_created` and `item_removed` signals.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEvent<I, D> {
    /// Logical data index the item is bound to.
    pub index: usize,
    /// A clone of the bound item instance.
    ///
    /// The listing keeps its own instance, so this is the live item only when
    /// `I` is a handle type (an `Arc`, an entity id) whose clones share state.
    pub item: I,
    /// The record the item presents.
    pub data: D,
}

/// The signals a recycler pass reports through.
pub struct RecyclerSignals<'a, I, D> {
    pub created: &'a Signal<ItemEvent<I, D>>,
    pub removed: &'a Signal<ItemEvent<I, D>>,
    pub diagnostics: &'a Signal<ScrollViewError>,
}

impl<I, D> Clone for RecyclerSignals<'_, I, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, D> Copy for RecyclerSignals<'_, I, D> {}

/// What one visibility pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityChanges {
    pub created: usize,
    pub removed: usize,
}

impl VisibilityChanges {
    pub fn is_empty(&self) -> bool {
        self.created == 0 && self.removed == 0
    }
}

#[derive(Debug)]
struct Binding<I, D> {
    item: I,
    data: D,
}

/// Index -> item mapping plus the create/remove rules around it.
#[derive(Debug)]
pub struct ItemRecycler<I, D> {
    bindings: BTreeMap<usize, Binding<I, D>>,
    /// Kind of the last configuration error reported, if it is still
    /// suppressed.
    reported: Option<Discriminant<ScrollViewError>>,
}

impl<I, D> Default for ItemRecycler<I, D> {
    fn default() -> Self {
        Self {
            bindings: BTreeMap::new(),
            reported: None,
        }
    }
}

impl<I, D> ItemRecycler<I, D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bound items.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The item bound at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&I> {
        self.bindings.get(&index).map(|binding| &binding.item)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.bindings.contains_key(&index)
    }

    /// Bound items in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &I)> + '_ {
        self.bindings.iter().map(|(&index, binding)| (index, &binding.item))
    }

    /// Indices with a bound item, ascending.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bindings.keys().copied()
    }

    /// Allow the next configuration error to be reported again.
    pub fn reset_diagnostics(&mut self) {
        self.reported = None;
    }
}

impl<I, D> ItemRecycler<I, D>
where
    I: Clone + 'static,
    D: Clone + 'static,
{
    /// Run one visibility pass over `slots`.
    ///
    /// `visible[i]` is the classification of `slots[i]`; a missing entry
    /// counts as invisible. Slots at or past `data.len()` are left alone.
    pub fn update_visibility<H, P>(
        &mut self,
        slots: &[H::Slot],
        visible: &[bool],
        data: &[D],
        host: &mut H,
        mut pool: Option<&mut P>,
        signals: RecyclerSignals<'_, I, D>,
    ) -> VisibilityChanges
    where
        H: LayoutHost<Item = I> + ?Sized,
        P: ItemPool<I> + ?Sized,
        I: ListingItem<D>,
    {
        let mut changes = VisibilityChanges::default();
        for (index, slot) in slots.iter().enumerate() {
            let Some(record) = data.get(index) else {
                // Stale slot during a data replacement.
                continue;
            };
            let is_visible = visible.get(index).copied().unwrap_or(false);
            let is_bound = self.bindings.contains_key(&index);

            if is_visible && !is_bound {
                if self.create(index, slot, record, host, pool.as_deref_mut(), signals) {
                    changes.created += 1;
                }
            } else if !is_visible && is_bound {
                self.remove(index, pool.as_deref_mut(), signals);
                changes.removed += 1;
            }
        }

        if !changes.is_empty() {
            tracing::trace!(
                target: targets::RECYCLER,
                created = changes.created,
                removed = changes.removed,
                bound = self.bindings.len(),
                "visibility pass"
            );
        }
        changes
    }

    /// Remove and release every bound item, lowest index first.
    ///
    /// Returns the number of items removed.
    pub fn destroy_all<P>(
        &mut self,
        mut pool: Option<&mut P>,
        signals: RecyclerSignals<'_, I, D>,
    ) -> usize
    where
        P: ItemPool<I> + ?Sized,
    {
        let mut removed = 0;
        while let Some((index, binding)) = self.bindings.pop_first() {
            Self::retire(index, binding, pool.as_deref_mut(), signals);
            removed += 1;
        }
        if removed > 0 {
            tracing::trace!(target: targets::RECYCLER, removed, "destroyed all items");
        }
        removed
    }

    fn create<H, P>(
        &mut self,
        index: usize,
        slot: &H::Slot,
        record: &D,
        host: &mut H,
        pool: Option<&mut P>,
        signals: RecyclerSignals<'_, I, D>,
    ) -> bool
    where
        H: LayoutHost<Item = I> + ?Sized,
        P: ItemPool<I> + ?Sized,
        I: ListingItem<D>,
    {
        let Some(pool) = pool else {
            self.report(ScrollViewError::MissingPool, signals);
            return false;
        };
        let mut item = match pool.acquire() {
            Ok(item) => item,
            Err(source) => {
                self.report(ScrollViewError::Acquire { index, source }, signals);
                return false;
            }
        };
        self.reported = None;

        host.attach_item(&mut item, slot);
        item.init(record);
        self.bindings.insert(
            index,
            Binding {
                item: item.clone(),
                data: record.clone(),
            },
        );
        tracing::trace!(target: targets::RECYCLER, index, "item created");
        signals.created.emit(ItemEvent {
            index,
            item,
            data: record.clone(),
        });
        true
    }

    fn remove<P>(&mut self, index: usize, pool: Option<&mut P>, signals: RecyclerSignals<'_, I, D>)
    where
        P: ItemPool<I> + ?Sized,
    {
        if let Some(binding) = self.bindings.remove(&index) {
            Self::retire(index, binding, pool, signals);
        }
    }

    /// Notify and release an item whose mapping entry is already gone.
    fn retire<P>(
        index: usize,
        binding: Binding<I, D>,
        pool: Option<&mut P>,
        signals: RecyclerSignals<'_, I, D>,
    ) where
        P: ItemPool<I> + ?Sized,
    {
        tracing::trace!(target: targets::RECYCLER, index, "item removed");
        signals.removed.emit(ItemEvent {
            index,
            item: binding.item.clone(),
            data: binding.data,
        });
        if let Some(pool) = pool {
            pool.release(binding.item);
        }
    }

    fn report(&mut self, error: ScrollViewError, signals: RecyclerSignals<'_, I, D>) {
        let kind = std::mem::discriminant(&error);
        if self.reported == Some(kind) {
            return;
        }
        self.reported = Some(kind);
        tracing::error!(target: targets::RECYCLER, %error, "item could not be materialized");
        signals.diagnostics.emit(error);
    }
}
