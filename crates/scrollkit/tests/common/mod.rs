//! Shared fakes for the scroll view integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use parking_lot::Mutex;
use scrollkit::{
    Corners, DynamicScrollView, ItemPool, LayoutHost, ListingItem, PoolError, Rect,
    ScrollViewConfig, ScrollViewError,
};

pub type TestView = DynamicScrollView<String, ListHost, CountingPool>;

/// Install a test subscriber so `RUST_LOG=scrollkit=trace` shows the view's
/// logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn records(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("d{i}")).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub id: u32,
    pub record: Option<String>,
    pub slot: Option<u64>,
    pub inits: u32,
}

impl ListingItem<String> for Cell {
    fn init(&mut self, data: &String) {
        self.record = Some(data.clone());
        self.inits += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotId(pub u64);

#[derive(Debug)]
struct SlotState {
    index: usize,
    /// Layout passes left before the slot has valid geometry.
    pending: u32,
}

/// A vertical list of fixed-height rows under a fixed viewport.
///
/// New slots only get geometry after `layout_delay` calls to
/// [`layout_pass`](Self::layout_pass).
#[derive(Debug)]
pub struct ListHost {
    pub viewport: Option<Rect>,
    pub container: Rect,
    pub row_height: f32,
    pub scroll: f32,
    pub layout_delay: u32,
    pub spawned: usize,
    pub despawned: usize,
    slots: BTreeMap<u64, SlotState>,
    next_id: u64,
}

impl ListHost {
    pub fn new(viewport_height: f32, row_height: f32) -> Self {
        Self {
            viewport: Some(Rect::new(0.0, 0.0, 100.0, viewport_height)),
            container: Rect::new(0.0, 0.0, 100.0, viewport_height),
            row_height,
            scroll: 0.0,
            layout_delay: 1,
            spawned: 0,
            despawned: 0,
            slots: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn with_layout_delay(mut self, layout_delay: u32) -> Self {
        self.layout_delay = layout_delay;
        self
    }

    /// Lay out every pending slot one step further.
    pub fn layout_pass(&mut self) {
        for state in self.slots.values_mut() {
            state.pending = state.pending.saturating_sub(1);
        }
    }

    pub fn live_slots(&self) -> usize {
        self.slots.len()
    }

    /// The rectangle row `index` occupies at the current scroll offset.
    pub fn row_rect(&self, index: usize) -> Rect {
        Rect::new(
            0.0,
            index as f32 * self.row_height - self.scroll,
            100.0,
            self.row_height,
        )
    }

    pub fn viewport_rect(&self) -> Rect {
        self.viewport.unwrap_or(self.container)
    }
}

impl LayoutHost for ListHost {
    type Slot = SlotId;
    type Item = Cell;

    fn viewport_corners(&self) -> Option<Corners> {
        self.viewport.map(|rect| rect.corners())
    }

    fn container_corners(&self) -> Corners {
        self.container.corners()
    }

    fn spawn_slot(&mut self, index: usize) -> SlotId {
        let id = self.next_id;
        self.next_id += 1;
        self.spawned += 1;
        self.slots.insert(
            id,
            SlotState {
                index,
                pending: self.layout_delay,
            },
        );
        SlotId(id)
    }

    fn despawn_slot(&mut self, slot: SlotId) {
        if self.slots.remove(&slot.0).is_some() {
            self.despawned += 1;
        }
    }

    fn slot_corners(&self, slot: &SlotId) -> Option<Corners> {
        let state = self.slots.get(&slot.0)?;
        if state.pending > 0 {
            return None;
        }
        Some(self.row_rect(state.index).corners())
    }

    fn attach_item(&mut self, item: &mut Cell, slot: &SlotId) {
        item.slot = Some(slot.0);
    }
}

/// Hands out cells with fresh ids and tracks which are checked out.
#[derive(Debug, Default)]
pub struct CountingPool {
    pub acquired: usize,
    pub released: usize,
    pub double_releases: usize,
    pub fail: Option<PoolError>,
    out: BTreeSet<u32>,
    next_id: u32,
}

impl CountingPool {
    pub fn checked_out(&self) -> usize {
        self.out.len()
    }
}

impl ItemPool<Cell> for CountingPool {
    fn acquire(&mut self) -> Result<Cell, PoolError> {
        if let Some(err) = &self.fail {
            return Err(err.clone());
        }
        self.next_id += 1;
        self.acquired += 1;
        self.out.insert(self.next_id);
        Ok(Cell {
            id: self.next_id,
            record: None,
            slot: None,
            inits: 0,
        })
    }

    fn release(&mut self, item: Cell) {
        self.released += 1;
        if !self.out.remove(&item.id) {
            self.double_releases += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Created { index: usize, id: u32, data: String },
    Removed { index: usize, id: u32, data: String },
}

/// Records every item notification and diagnostic a view emits.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub events: Arc<Mutex<Vec<Event>>>,
    pub errors: Arc<Mutex<Vec<ScrollViewError>>>,
}

impl Recorder {
    pub fn attach(view: &TestView) -> Self {
        let recorder = Self::default();
        let events = recorder.events.clone();
        view.item_created.connect(move |event| {
            events.lock().push(Event::Created {
                index: event.index,
                id: event.item.id,
                data: event.data.clone(),
            });
        });
        let events = recorder.events.clone();
        view.item_removed.connect(move |event| {
            events.lock().push(Event::Removed {
                index: event.index,
                id: event.item.id,
                data: event.data.clone(),
            });
        });
        let errors = recorder.errors.clone();
        view.diagnostics.connect(move |error| errors.lock().push(error.clone()));
        recorder
    }

    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn created(&self) -> usize {
        self.count(|event| matches!(event, Event::Created { .. }))
    }

    pub fn removed(&self) -> usize {
        self.count(|event| matches!(event, Event::Removed { .. }))
    }

    fn count(&self, f: impl Fn(&Event) -> bool) -> usize {
        self.events.lock().iter().filter(|event| f(event)).count()
    }
}

pub fn view(host: ListHost, config: ScrollViewConfig) -> TestView {
    init_tracing();
    match TestView::new(host, config) {
        Ok(view) => view.with_pool(CountingPool::default()),
        Err(err) => panic!("invalid test config: {err}"),
    }
}

/// One host frame: lay out, then tick the view.
pub fn frame(view: &mut TestView) {
    view.host_mut().layout_pass();
    view.tick();
}

/// Run frames until the in-flight generation finishes. Returns the number of
/// frames it took.
pub fn settle(view: &mut TestView) -> usize {
    let mut frames = 0;
    while view.is_generating() {
        frame(view);
        frames += 1;
        assert!(frames < 10_000, "generation never settled");
    }
    frames
}

/// Indices whose row overlaps the viewport, as the host sees it now.
pub fn expected_visible(view: &TestView) -> Vec<usize> {
    let host = view.host();
    let viewport = host.viewport_rect();
    (0..view.slot_count().min(view.data_source().len()))
        .filter(|&index| viewport.overlaps(&host.row_rect(index)))
        .collect()
}

pub fn bound_indices(view: &TestView) -> Vec<usize> {
    view.listing().map(|(index, _)| index).collect()
}
