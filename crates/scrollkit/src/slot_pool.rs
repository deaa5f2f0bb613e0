//! The slot pool: one layout placeholder per data index.
//!
//! Growth is budgeted: each reconcile step creates at most `budget` slots and
//! then hands control back so the host can lay the new slots out. Shrinking
//! is not budgeted; the excess is removed from the tail in one step.

use scrollkit_core::logging::targets;

use crate::host::LayoutHost;

/// Outcome of one reconcile step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileStep {
    /// Slots were appended; `remaining` more are still needed.
    Grew { created: usize, remaining: usize },
    /// Excess slots were removed from the tail.
    Shrank { removed: usize },
    /// The pool already matched the target.
    Settled,
}

/// Ordered layout placeholders, indexed by logical data index.
#[derive(Debug)]
pub struct SlotPool<S> {
    slots: Vec<S>,
}

impl<S> Default for SlotPool<S> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<S> SlotPool<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&S> {
        self.slots.get(index)
    }

    pub fn as_slice(&self) -> &[S] {
        &self.slots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.slots.iter()
    }

    /// Move the pool one step towards `target` slots.
    ///
    /// Items bound to slots past `target` must be released before calling
    /// this; an item never outlives its slot. The scroll view meets this by
    /// clearing its listing at the start of every generation, which is the
    /// only time the target changes.
    pub fn reconcile_step<H>(&mut self, target: usize, budget: usize, host: &mut H) -> ReconcileStep
    where
        H: LayoutHost<Slot = S> + ?Sized,
    {
        let current = self.slots.len();
        if target > current {
            let created = (target - current).min(budget.max(1));
            for index in current..current + created {
                self.slots.push(host.spawn_slot(index));
            }
            let remaining = target - self.slots.len();
            tracing::trace!(target: targets::SLOTS, created, remaining, "grew slot pool");
            ReconcileStep::Grew { created, remaining }
        } else if target < current {
            let removed = current - target;
            for slot in self.slots.drain(target..).rev() {
                host.despawn_slot(slot);
            }
            tracing::trace!(target: targets::SLOTS, removed, "shrank slot pool");
            ReconcileStep::Shrank { removed }
        } else {
            ReconcileStep::Settled
        }
    }

    /// Reconcile towards `target` as a lazy sequence of steps.
    ///
    /// Each call to `next` performs one step. The sequence ends after the
    /// step that reaches the target.
    pub fn reconcile<'a, H>(
        &'a mut self,
        target: usize,
        budget: usize,
        host: &'a mut H,
    ) -> Reconcile<'a, S, H>
    where
        H: LayoutHost<Slot = S> + ?Sized,
    {
        Reconcile {
            pool: self,
            host,
            target,
            budget,
            finished: false,
        }
    }

    /// Despawn every slot. Returns the number removed.
    pub fn clear<H>(&mut self, host: &mut H) -> usize
    where
        H: LayoutHost<Slot = S> + ?Sized,
    {
        let removed = self.slots.len();
        for slot in self.slots.drain(..).rev() {
            host.despawn_slot(slot);
        }
        removed
    }
}

/// Iterator returned by [`SlotPool::reconcile`].
pub struct Reconcile<'a, S, H: ?Sized> {
    pool: &'a mut SlotPool<S>,
    host: &'a mut H,
    target: usize,
    budget: usize,
    finished: bool,
}

impl<S, H> Iterator for Reconcile<'_, S, H>
where
    H: LayoutHost<Slot = S> + ?Sized,
{
    type Item = ReconcileStep;

    fn next(&mut self) -> Option<ReconcileStep> {
        if self.finished {
            return None;
        }
        let step = self.pool.reconcile_step(self.target, self.budget, self.host);
        if !matches!(step, ReconcileStep::Grew { remaining, .. } if remaining > 0) {
            self.finished = true;
        }
        Some(step)
    }
}
