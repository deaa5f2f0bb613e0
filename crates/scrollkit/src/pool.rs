//! A simple prototype-cloning item pool.
//!
//! Hosts with their own instantiation strategy implement [`ItemPool`]
//! directly; [`PrototypePool`] covers the common case of items that are cheap
//! to clone from a template.

use crate::error::PoolError;
use crate::host::ItemPool;

/// Clones a prototype on demand and keeps released instances for reuse.
#[derive(Debug, Clone)]
pub struct PrototypePool<I> {
    prototype: Option<I>,
    free: Vec<I>,
    /// Maximum number of instances handed out at once.
    capacity: Option<usize>,
    in_use: usize,
    created: usize,
}

impl<I> Default for PrototypePool<I> {
    fn default() -> Self {
        Self {
            prototype: None,
            free: Vec::new(),
            capacity: None,
            in_use: 0,
            created: 0,
        }
    }
}

impl<I: Clone> PrototypePool<I> {
    /// Create a pool that instantiates clones of `prototype`.
    pub fn new(prototype: I) -> Self {
        Self {
            prototype: Some(prototype),
            ..Self::default()
        }
    }

    /// Create a pool with no prototype. Every acquire fails until
    /// [`set_prototype`](Self::set_prototype) is called.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Limit the number of instances in use at once.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Replace the prototype. Instances already pooled are kept.
    pub fn set_prototype(&mut self, prototype: I) {
        self.prototype = Some(prototype);
    }

    /// Instances currently handed out.
    pub fn in_use(&self) -> usize {
        self.in_use
    }

    /// Instances waiting for reuse.
    pub fn idle(&self) -> usize {
        self.free.len()
    }

    /// Instances cloned from the prototype over the pool's lifetime.
    pub fn created(&self) -> usize {
        self.created
    }
}

impl<I: Clone> ItemPool<I> for PrototypePool<I> {
    fn acquire(&mut self) -> Result<I, PoolError> {
        if let Some(capacity) = self.capacity {
            if self.in_use >= capacity {
                return Err(PoolError::Exhausted { capacity });
            }
        }

        let item = match self.free.pop() {
            Some(item) => item,
            None => {
                let prototype = self.prototype.as_ref().ok_or(PoolError::NoPrototype)?;
                self.created += 1;
                prototype.clone()
            }
        };
        self.in_use += 1;
        Ok(item)
    }

    fn release(&mut self, item: I) {
        self.in_use = self.in_use.saturating_sub(1);
        self.free.push(item);
    }
}
