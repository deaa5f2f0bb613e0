//! Core systems for scrollkit.
//!
//! This crate provides the foundational pieces the scroll views are built on:
//!
//! - **Signal/Slot System**: Type-safe, synchronous observer lists
//! - **Property System**: Values with change detection
//! - **Property Sync**: Frame-driven wiring between two properties
//! - **Geometry**: Points, sizes, rectangles and world-space corners
//! - **Frame Clock**: Frame numbering and tick phases
//! - **Logging**: Tracing targets and listing debug output
//!
//! # Signal/Slot Example
//!
//! ```
//! use scrollkit_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

pub mod geometry;
pub mod logging;
pub mod property;
pub mod signal;
pub mod sync;
pub mod tick;

pub use geometry::{Corners, Point, Rect, Size};
pub use logging::{ListingDebug, ListingSource, TreeStyle};
pub use property::{Property, Revision};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use sync::{PropertySync, SyncDirection, SyncTrigger};
pub use tick::{FrameClock, FrameId, TickPhase};
