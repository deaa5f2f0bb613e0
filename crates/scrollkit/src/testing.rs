//! In-crate fakes shared by the unit tests.

use std::collections::BTreeMap;

use scrollkit_core::{Corners, Rect};

use crate::error::PoolError;
use crate::host::{ItemPool, LayoutHost, ListingItem};

/// Handle to a slot spawned by [`ColumnHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SlotHandle(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Row {
    pub id: u32,
    pub bound: Option<String>,
    pub slot: Option<u64>,
}

impl ListingItem<String> for Row {
    fn init(&mut self, data: &String) {
        self.bound = Some(data.clone());
    }
}

/// A vertical column of fixed-height slots scrolled under a fixed viewport.
#[derive(Debug)]
pub(crate) struct ColumnHost {
    pub viewport: Option<Rect>,
    pub container: Rect,
    pub row_height: f32,
    pub scroll: f32,
    /// Slot id -> index.
    pub live: BTreeMap<u64, usize>,
    pub attached: Vec<(u32, u64)>,
    next_slot: u64,
}

impl ColumnHost {
    pub fn new(viewport_height: f32, row_height: f32) -> Self {
        Self {
            viewport: Some(Rect::new(0.0, 0.0, 100.0, viewport_height)),
            container: Rect::new(0.0, 0.0, 100.0, 10_000.0),
            row_height,
            scroll: 0.0,
            live: BTreeMap::new(),
            attached: Vec::new(),
            next_slot: 0,
        }
    }
}

impl LayoutHost for ColumnHost {
    type Slot = SlotHandle;
    type Item = Row;

    fn viewport_corners(&self) -> Option<Corners> {
        self.viewport.map(|rect| rect.corners())
    }

    fn container_corners(&self) -> Corners {
        self.container.corners()
    }

    fn spawn_slot(&mut self, index: usize) -> SlotHandle {
        let id = self.next_slot;
        self.next_slot += 1;
        self.live.insert(id, index);
        SlotHandle(id)
    }

    fn despawn_slot(&mut self, slot: SlotHandle) {
        self.live.remove(&slot.0);
    }

    fn slot_corners(&self, slot: &SlotHandle) -> Option<Corners> {
        let index = *self.live.get(&slot.0)?;
        let top = index as f32 * self.row_height - self.scroll;
        Some(Rect::new(0.0, top, 100.0, self.row_height).corners())
    }

    fn attach_item(&mut self, item: &mut Row, slot: &SlotHandle) {
        item.slot = Some(slot.0);
        self.attached.push((item.id, slot.0));
    }
}

/// Hands out rows with increasing ids.
#[derive(Debug, Default)]
pub(crate) struct SeqPool {
    pub next_id: u32,
    pub released: Vec<u32>,
    pub fail: Option<PoolError>,
}

impl ItemPool<Row> for SeqPool {
    fn acquire(&mut self) -> Result<Row, PoolError> {
        if let Some(err) = &self.fail {
            return Err(err.clone());
        }
        self.next_id += 1;
        Ok(Row {
            id: self.next_id,
            bound: None,
            slot: None,
        })
    }

    fn release(&mut self, item: Row) {
        self.released.push(item.id);
    }
}

pub(crate) fn records(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("d{i}")).collect()
}
