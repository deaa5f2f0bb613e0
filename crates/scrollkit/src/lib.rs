//! scrollkit - virtualized, recycling scroll views for frame-driven UIs.
//!
//! A [`DynamicScrollView`] presents a data source of any length while only
//! materializing item instances for the records currently inside the
//! viewport. It owns no scene graph: the host application plugs in through
//! three traits.
//!
//! - [`LayoutHost`]: spawns layout slots and reports world-space geometry
//! - [`ItemPool`]: hands out reusable item instances ([`PrototypePool`] is a
//!   ready-made one)
//! - [`ListingItem`]: binds an item to a record
//!
//! Population is cooperative. Slots are created in budgeted batches, and the
//! view waits a configurable number of frames after each structural change
//! before classifying slots, so the host gets a chance to lay them out. The
//! host drives this by calling [`DynamicScrollView::tick`] once per frame.
//!
//! This crate re-exports everything from `scrollkit-core`.
//!
//! # Example
//!
//! ```
//! use scrollkit::{Corners, DynamicScrollView, LayoutHost, ListingItem, PrototypePool, Rect, ScrollViewConfig};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Label(String);
//!
//! impl ListingItem<String> for Label {
//!     fn init(&mut self, data: &String) {
//!         self.0 = data.clone();
//!     }
//! }
//!
//! /// A fixed 100x60 viewport over rows 20 units tall.
//! struct Column;
//!
//! impl LayoutHost for Column {
//!     type Slot = usize;
//!     type Item = Label;
//!
//!     fn viewport_corners(&self) -> Option<Corners> {
//!         Some(Rect::new(0.0, 0.0, 100.0, 60.0).corners())
//!     }
//!     fn container_corners(&self) -> Corners {
//!         Rect::new(0.0, 0.0, 100.0, 60.0).corners()
//!     }
//!     fn spawn_slot(&mut self, index: usize) -> usize {
//!         index
//!     }
//!     fn despawn_slot(&mut self, _slot: usize) {}
//!     fn slot_corners(&self, slot: &usize) -> Option<Corners> {
//!         Some(Rect::new(0.0, *slot as f32 * 20.0, 100.0, 20.0).corners())
//!     }
//!     fn attach_item(&mut self, _item: &mut Label, _slot: &usize) {}
//! }
//!
//! let mut view: DynamicScrollView<String, _, _> =
//!     DynamicScrollView::new(Column, ScrollViewConfig::default())?
//!         .with_pool(PrototypePool::new(Label::default()));
//!
//! let records: Vec<String> = (0..100).map(|i| format!("record {i}")).collect();
//! view.generate(records);
//! while view.is_generating() {
//!     view.tick();
//! }
//!
//! assert_eq!(view.slot_count(), 100);
//! // Rows 0..=3 overlap the viewport (row 3 touches its bottom edge).
//! assert_eq!(view.bound_count(), 4);
//! assert_eq!(view.item_at(2).map(|label| label.0.as_str()), Some("record 2"));
//! # Ok::<(), scrollkit::ConfigError>(())
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod pool;
pub mod recycler;
pub mod scheduler;
pub mod scroll_view;
pub mod slot_pool;
pub mod viewport;
pub mod visibility;

#[cfg(test)]
mod testing;

pub use scrollkit_core::*;

pub use config::ScrollViewConfig;
pub use error::{ConfigError, ConfigResult, PoolError, ScrollViewError};
pub use host::{ItemPool, LayoutHost, ListingItem};
pub use pool::PrototypePool;
pub use recycler::{ItemEvent, ItemRecycler, RecyclerSignals, VisibilityChanges};
pub use scheduler::{FrameOutcome, GenerationPhase, PopulationScheduler};
pub use scroll_view::{DynamicScrollView, ViewStats};
pub use slot_pool::{Reconcile, ReconcileStep, SlotPool};
pub use viewport::{ViewportTracker, compute_viewport_rect};
pub use visibility::{VisibilityClassifier, is_visible};
