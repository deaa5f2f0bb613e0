//! Revisioned values shared between a component and its wiring.
//!
//! A [`Property`] holds a value together with a revision number. Every write
//! that changes the value bumps the revision, so a reader that remembers the
//! revision it last saw can tell whether anything happened since without
//! keeping a copy of the value. [`PropertySync`](crate::PropertySync) relies
//! on this to decide which side of a bi-directional binding moved.
//!
//! # Example
//!
//! ```
//! use scrollkit_core::Property;
//!
//! let spacing = Property::new(4.0_f32);
//! let seen = spacing.revision();
//!
//! assert!(!spacing.set(4.0));
//! assert_eq!(spacing.revision(), seen);
//!
//! assert!(spacing.set(6.0));
//! assert!(spacing.changed_since(seen));
//! assert_eq!(spacing.get(), 6.0);
//! ```

use std::fmt;

use parking_lot::RwLock;

/// Revision number of a [`Property`]. Starts at zero and only grows.
pub type Revision = u64;

struct Revisioned<T> {
    value: T,
    revision: Revision,
}

/// A shared value that counts its changes.
pub struct Property<T> {
    cell: RwLock<Revisioned<T>>,
}

impl<T> Property<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell: RwLock::new(Revisioned { value, revision: 0 }),
        }
    }

    /// The current revision.
    pub fn revision(&self) -> Revision {
        self.cell.read().revision
    }

    /// Whether the value changed after revision `seen` was observed.
    pub fn changed_since(&self, seen: Revision) -> bool {
        self.revision() != seen
    }

    /// Read the value in place.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.cell.read().value)
    }
}

impl<T: Clone> Property<T> {
    pub fn get(&self) -> T {
        self.cell.read().value.clone()
    }

    /// The value and its revision, read together.
    pub fn snapshot(&self) -> (T, Revision) {
        let cell = self.cell.read();
        (cell.value.clone(), cell.revision)
    }
}

impl<T: PartialEq> Property<T> {
    /// Store `value`, returning `true` (and bumping the revision) if it
    /// differs from the current value.
    pub fn set(&self, value: T) -> bool {
        self.set_revisioned(value).is_some()
    }

    /// Like [`set`](Self::set), but returns the revision after the write.
    ///
    /// `None` means the value was already equal and nothing was written.
    pub fn set_revisioned(&self, value: T) -> Option<Revision> {
        let mut cell = self.cell.write();
        if cell.value == value {
            return None;
        }
        cell.value = value;
        cell.revision += 1;
        Some(cell.revision)
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = self.cell.read();
        f.debug_struct("Property")
            .field("value", &cell.value)
            .field("revision", &cell.revision)
            .finish()
    }
}

static_assertions::assert_impl_all!(Property<String>: Send, Sync);
