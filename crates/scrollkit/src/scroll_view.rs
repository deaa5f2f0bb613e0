//! The recycling scroll view.
//!
//! [`DynamicScrollView`] presents a data source of any length through a pool
//! of layout slots, one per record, and materializes item instances only for
//! the slots that overlap the viewport. Population is spread across frames:
//! the host calls [`tick`](DynamicScrollView::tick) once per frame boundary
//! and [`on_scroll`](DynamicScrollView::on_scroll) whenever the content moves.
//!
//! # Example
//!
//! ```ignore
//! use scrollkit::{DynamicScrollView, ScrollViewConfig, PrototypePool};
//!
//! let mut view = DynamicScrollView::new(host, ScrollViewConfig::default())?
//!     .with_pool(PrototypePool::new(row_prototype));
//!
//! view.item_created.connect(|event| {
//!     println!("row {} now shows {:?}", event.index, event.data);
//! });
//!
//! view.generate(records);
//! loop {
//!     view.tick();
//!     // ...
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use scrollkit_core::logging::{ListingDebug, ListingSource, targets};
use scrollkit_core::{FrameClock, FrameId, Point, Rect, Signal};

use crate::config::ScrollViewConfig;
use crate::error::{ConfigResult, ScrollViewError};
use crate::host::{ItemPool, LayoutHost, ListingItem};
use crate::recycler::{ItemEvent, ItemRecycler, RecyclerSignals, VisibilityChanges};
use crate::scheduler::{FrameOutcome, GenerationPhase, PopulationScheduler};
use crate::slot_pool::{ReconcileStep, SlotPool};
use crate::viewport::ViewportTracker;
use crate::visibility::VisibilityClassifier;

/// Counters describing the work a view has done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewStats {
    /// Generations started (dropped requests are not counted).
    pub generations: u64,
    /// Growth batches created.
    pub growth_batches: u64,
    /// Visibility passes run.
    pub visibility_passes: u64,
}

/// A virtualized, recycling list view over records of type `D`.
///
/// `H` is the layout host the view lives in and `P` the pool items are taken
/// from. Items are of the host's item type.
pub struct DynamicScrollView<D, H, P>
where
    H: LayoutHost,
{
    config: ScrollViewConfig,
    host: H,
    pool: Option<P>,
    slots: SlotPool<H::Slot>,
    recycler: ItemRecycler<H::Item, D>,
    data: Vec<D>,
    viewport: ViewportTracker,
    classifier: VisibilityClassifier,
    scheduler: PopulationScheduler,
    clock: FrameClock,
    enabled: bool,
    scroll_offset: Point,
    stats: ViewStats,

    /// Emitted after an item is bound to a record and recorded in the
    /// listing.
    pub item_created: Signal<ItemEvent<H::Item, D>>,

    /// Emitted after an item leaves the listing, before it is released.
    pub item_removed: Signal<ItemEvent<H::Item, D>>,

    /// Configuration problems that prevent items from being materialized.
    pub diagnostics: Signal<ScrollViewError>,
}

impl<D, H, P> DynamicScrollView<D, H, P>
where
    D: Clone + 'static,
    H: LayoutHost,
    H::Item: ListingItem<D> + Clone + 'static,
    P: ItemPool<H::Item>,
{
    /// Create an empty view with no item pool.
    pub fn new(host: H, config: ScrollViewConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            classifier: VisibilityClassifier::with_margin(config.visibility_margin),
            scheduler: PopulationScheduler::new(
                config.grow_settle_frames,
                config.shrink_settle_frames,
            ),
            config,
            host,
            pool: None,
            slots: SlotPool::new(),
            recycler: ItemRecycler::new(),
            data: Vec::new(),
            viewport: ViewportTracker::new(),
            clock: FrameClock::new(),
            enabled: true,
            scroll_offset: Point::ZERO,
            stats: ViewStats::default(),
            item_created: Signal::new(),
            item_removed: Signal::new(),
            diagnostics: Signal::new(),
        })
    }

    /// Install the item pool.
    pub fn with_pool(mut self, pool: P) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Replace the item pool, returning the previous one.
    ///
    /// Bound items are released to the pool they came from first. If no
    /// generation is running, visible slots are then materialized from the
    /// new pool.
    pub fn set_pool(&mut self, pool: P) -> Option<P> {
        self.destroy_all_items();
        let previous = self.pool.replace(pool);
        self.recycler.reset_diagnostics();
        if self.enabled && !self.scheduler.is_in_flight() {
            self.refresh_visibility();
        }
        previous
    }

    // =========================================================================
    // Population
    // =========================================================================

    /// Replace the data source and repopulate the view.
    ///
    /// Returns `false` (and changes nothing) if a generation is already in
    /// flight or the view is disabled. Otherwise every bound item is removed,
    /// the data is swapped in and the first reconcile step runs immediately;
    /// the rest of the work happens on subsequent [`tick`](Self::tick)s.
    #[tracing::instrument(skip_all, target = "scrollkit::view", level = "debug", fields(records = data.len()))]
    pub fn generate(&mut self, data: Vec<D>) -> bool {
        if !self.enabled {
            tracing::debug!(target: targets::VIEW, "view disabled, generation request dropped");
            return false;
        }
        if !self.scheduler.begin() {
            tracing::debug!(
                target: targets::VIEW,
                phase = %self.scheduler.phase(),
                "generation in flight, request dropped"
            );
            return false;
        }

        self.destroy_all_items();
        self.data = data;
        self.stats.generations += 1;
        tracing::debug!(
            target: targets::VIEW,
            slots = self.slots.len(),
            records = self.data.len(),
            "generation started"
        );
        self.advance_population();
        true
    }

    /// Remove and release every bound item. Slots are kept.
    pub fn destroy_all_items(&mut self) -> usize {
        self.recycler.destroy_all(
            self.pool.as_mut(),
            RecyclerSignals {
                created: &self.item_created,
                removed: &self.item_removed,
                diagnostics: &self.diagnostics,
            },
        )
    }

    /// Drive the view across one frame boundary.
    ///
    /// Ignored while the view is disabled.
    pub fn tick(&mut self) {
        if !self.enabled {
            return;
        }
        let frame = self.clock.advance();
        match self.scheduler.on_frame() {
            FrameOutcome::Idle => {}
            FrameOutcome::Waiting { frames_left } => {
                tracing::trace!(target: targets::SCHEDULER, %frame, frames_left, "waiting for layout");
            }
            FrameOutcome::ResumeGrowth => {
                self.refresh_visibility();
                if self.slots.len() < self.data.len() {
                    self.advance_population();
                } else {
                    self.finish_generation();
                }
            }
            FrameOutcome::ResumeShrink => {
                self.refresh_visibility();
                self.finish_generation();
            }
        }
    }

    /// The scroll position changed: reclassify every slot now.
    ///
    /// Safe while a generation is in flight; only the slots that already
    /// exist are classified.
    #[tracing::instrument(skip_all, target = "scrollkit::view", level = "trace")]
    pub fn on_scroll(&mut self, offset: Point) {
        if !self.enabled {
            return;
        }
        self.scroll_offset = offset;
        self.refresh_visibility();
    }

    /// The viewport or container was resized: reclassify every slot now.
    pub fn on_resize(&mut self) {
        if !self.enabled {
            return;
        }
        self.refresh_visibility();
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Enable or disable the view.
    ///
    /// Disabling abandons the in-flight generation; slots and items keep
    /// whatever state they reached. Enabling regenerates over the current
    /// data if the slot pool does not match it.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            self.scheduler.cancel();
            tracing::debug!(target: targets::VIEW, "view disabled");
            return;
        }

        tracing::debug!(target: targets::VIEW, "view enabled");
        if self.slots.len() != self.data.len() {
            let data = std::mem::take(&mut self.data);
            self.generate(data);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Stop population, destroy every item and despawn every slot.
    ///
    /// The data source is kept; the view can be repopulated with
    /// [`generate`](Self::generate).
    pub fn teardown(&mut self) {
        self.scheduler.cancel();
        let items = self.destroy_all_items();
        let slots = self.slots.clear(&mut self.host);
        tracing::debug!(target: targets::VIEW, items, slots, "view torn down");
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Bound items in ascending index order.
    pub fn listing(&self) -> impl Iterator<Item = (usize, &H::Item)> + '_ {
        self.recycler.iter()
    }

    /// A snapshot of the index -> item mapping.
    pub fn listing_snapshot(&self) -> BTreeMap<usize, H::Item> {
        self.recycler
            .iter()
            .map(|(index, item)| (index, item.clone()))
            .collect()
    }

    /// The item bound at `index`, if any.
    pub fn item_at(&self, index: usize) -> Option<&H::Item> {
        self.recycler.get(index)
    }

    /// Number of bound items.
    pub fn bound_count(&self) -> usize {
        self.recycler.len()
    }

    /// The current records.
    pub fn data_source(&self) -> &[D] {
        &self.data
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The slot for `index`, if it exists.
    pub fn slot(&self, index: usize) -> Option<&H::Slot> {
        self.slots.get(index)
    }

    pub fn phase(&self) -> GenerationPhase {
        self.scheduler.phase()
    }

    pub fn is_generating(&self) -> bool {
        self.scheduler.is_in_flight()
    }

    /// The viewport rectangle used by the last visibility pass.
    pub fn viewport_rect(&self) -> Rect {
        self.viewport.rect()
    }

    /// The last offset passed to [`on_scroll`](Self::on_scroll).
    pub fn scroll_offset(&self) -> Point {
        self.scroll_offset
    }

    /// The current frame.
    pub fn frame(&self) -> FrameId {
        self.clock.now()
    }

    pub fn config(&self) -> &ScrollViewConfig {
        &self.config
    }

    pub fn stats(&self) -> ViewStats {
        self.stats
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, for moving content or resizing the
    /// viewport. Call [`on_scroll`](Self::on_scroll) or
    /// [`on_resize`](Self::on_resize) afterwards.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn pool(&self) -> Option<&P> {
        self.pool.as_ref()
    }

    pub fn pool_mut(&mut self) -> Option<&mut P> {
        self.pool.as_mut()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Take one reconcile step towards the data length.
    fn advance_population(&mut self) {
        let target = self.data.len();
        // `generate` cleared the listing, so a shrink never strands an item.
        debug_assert!(self.recycler.indices().all(|index| index < target));

        let step = self
            .slots
            .reconcile_step(target, self.config.slots_per_tick, &mut self.host);
        if let ReconcileStep::Grew { .. } = step {
            self.stats.growth_batches += 1;
        }
        if self.scheduler.suspend(step) {
            self.refresh_visibility();
            self.finish_generation();
        }
    }

    fn finish_generation(&mut self) {
        self.scheduler.finish();
        tracing::debug!(
            target: targets::VIEW,
            slots = self.slots.len(),
            bound = self.recycler.len(),
            "generation finished"
        );
    }

    /// Recompute the viewport and run one visibility pass over all slots.
    fn refresh_visibility(&mut self) -> VisibilityChanges {
        let now = self.clock.now();
        let viewport = self.viewport.refresh(&self.host, now);
        debug_assert!(self.viewport.is_current(now));
        let visible: Vec<bool> = self
            .slots
            .iter()
            .map(|slot| {
                let corners = self.host.slot_corners(slot);
                self.classifier.classify(&viewport, corners.as_ref())
            })
            .collect();

        self.stats.visibility_passes += 1;
        self.recycler.update_visibility(
            self.slots.as_slice(),
            &visible,
            &self.data,
            &mut self.host,
            self.pool.as_mut(),
            RecyclerSignals {
                created: &self.item_created,
                removed: &self.item_removed,
                diagnostics: &self.diagnostics,
            },
        )
    }
}

impl<D, H, P> DynamicScrollView<D, H, P>
where
    D: Clone + 'static,
    H: LayoutHost,
    H::Item: ListingItem<D> + Clone + fmt::Debug + 'static,
    P: ItemPool<H::Item>,
{
    /// Render the listing as text for debugging.
    pub fn debug_listing(&self) -> String {
        ListingDebug::new().format(self)
    }
}

impl<D, H, P> ListingSource for DynamicScrollView<D, H, P>
where
    H: LayoutHost,
    H::Item: fmt::Debug,
{
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn data_len(&self) -> usize {
        self.data.len()
    }

    fn phase_name(&self) -> &'static str {
        self.scheduler.phase().name()
    }

    fn bound_items(&self) -> Vec<(usize, String)> {
        self.recycler
            .iter()
            .map(|(index, item)| (index, format!("{item:?}")))
            .collect()
    }
}

impl<D, H, P> fmt::Debug for DynamicScrollView<D, H, P>
where
    H: LayoutHost,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicScrollView")
            .field("slots", &self.slots.len())
            .field("records", &self.data.len())
            .field("bound", &self.recycler.len())
            .field("phase", &self.scheduler.phase())
            .field("enabled", &self.enabled)
            .field("frame", &self.clock.now())
            .finish()
    }
}

static_assertions::assert_impl_all!(ViewStats: Send, Sync, Copy);

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::testing::{ColumnHost, Row, SeqPool, records};

    type View = DynamicScrollView<String, ColumnHost, SeqPool>;

    fn view(config: ScrollViewConfig) -> View {
        // 100px viewport over 20px rows: indices 0..=5 overlap (5 touches).
        View::new(ColumnHost::new(100.0, 20.0), config)
            .unwrap()
            .with_pool(SeqPool::default())
    }

    fn settle(view: &mut View) {
        let mut guard = 0;
        while view.is_generating() {
            view.tick();
            guard += 1;
            assert!(guard < 1_000, "generation never settled");
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = View::new(
            ColumnHost::new(100.0, 20.0),
            ScrollViewConfig::new().with_slots_per_tick(0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_materializes_visible_rows() {
        let mut view = view(ScrollViewConfig::default());
        assert!(view.generate(records(30)));
        settle(&mut view);

        assert_eq!(view.slot_count(), 30);
        assert_eq!(
            view.listing().map(|(index, _)| index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5]
        );
        let row: &Row = view.item_at(3).unwrap();
        assert_eq!(row.bound.as_deref(), Some("d3"));
    }

    #[test]
    fn test_equal_length_settles_immediately() {
        let mut view = view(ScrollViewConfig::default());
        view.generate(records(4));
        settle(&mut view);

        let passes = view.stats().visibility_passes;
        assert!(view.generate(records(4)));
        assert!(!view.is_generating());
        assert_eq!(view.stats().visibility_passes, passes + 1);
        assert_eq!(view.bound_count(), 4);
    }

    #[test]
    fn test_scroll_reclassifies() {
        let mut view = view(ScrollViewConfig::default());
        view.generate(records(30));
        settle(&mut view);

        view.host_mut().scroll = 200.0;
        view.on_scroll(Point::new(0.0, 200.0));

        assert_eq!(
            view.listing().map(|(index, _)| index).collect::<Vec<_>>(),
            vec![9, 10, 11, 12, 13, 14, 15]
        );
        assert_eq!(view.scroll_offset(), Point::new(0.0, 200.0));
    }

    #[test]
    fn test_disabled_view_ignores_ticks_and_requests() {
        let mut view = view(ScrollViewConfig::default());
        view.generate(records(30));
        view.set_enabled(false);
        assert!(!view.is_generating());
        assert_eq!(view.slot_count(), 10);

        let frame = view.frame();
        view.tick();
        assert_eq!(view.frame(), frame);
        assert!(!view.generate(records(3)));

        view.set_enabled(true);
        assert!(view.is_generating());
        settle(&mut view);
        assert_eq!(view.slot_count(), 30);
        assert_eq!(view.data_source().len(), 30);
    }

    #[test]
    fn test_set_pool_materializes_after_missing_pool() {
        let mut view = View::new(ColumnHost::new(100.0, 20.0), ScrollViewConfig::default()).unwrap();
        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = errors.clone();
        view.diagnostics.connect(move |error| sink.lock().push(error.clone()));

        view.generate(records(3));
        settle(&mut view);
        assert_eq!(view.bound_count(), 0);
        assert_eq!(*errors.lock(), vec![ScrollViewError::MissingPool]);

        assert!(view.set_pool(SeqPool::default()).is_none());
        assert_eq!(view.bound_count(), 3);
    }

    #[test]
    fn test_teardown_empties_the_view() {
        let mut view = view(ScrollViewConfig::default());
        view.generate(records(30));
        settle(&mut view);

        view.teardown();
        assert_eq!(view.slot_count(), 0);
        assert_eq!(view.bound_count(), 0);
        assert!(view.host().live.is_empty());
        assert_eq!(view.pool().unwrap().released.len(), 6);
    }

    #[test]
    fn test_debug_listing_names_the_phase() {
        let mut view = view(ScrollViewConfig::default());
        view.generate(records(2));
        settle(&mut view);

        let text = view.debug_listing();
        assert!(text.starts_with("Listing (idle, 2 slots for 2 records, 2 bound):"));
    }
}
