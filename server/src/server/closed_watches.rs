use std::collections::{HashMap, VecDeque};

use coffer_shared::{ContainerId, PlayerRef};

type Watch = (PlayerRef, ContainerId);

/// Watches the server ended, remembered so their open state reads as
/// closed rather than unopened.
///
/// Holds at most `capacity` entries. Past that the oldest close is
/// forgotten and reads as unopened again.
pub struct ClosedWatches {
    capacity: usize,
    // watch -> stamp of its latest close
    stamps: HashMap<Watch, u64>,
    order: VecDeque<(u64, Watch)>,
    next_stamp: u64,
}

impl ClosedWatches {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            stamps: HashMap::new(),
            order: VecDeque::new(),
            next_stamp: 0,
        }
    }

    pub fn insert(&mut self, viewer: PlayerRef, id: ContainerId) {
        if self.capacity == 0 {
            return;
        }
        let stamp = self.next_stamp;
        self.next_stamp = self.next_stamp.wrapping_add(1);
        self.stamps.insert((viewer, id), stamp);
        self.order.push_back((stamp, (viewer, id)));

        while self.stamps.len() > self.capacity {
            let Some((stamp, watch)) = self.order.pop_front() else {
                break;
            };
            if self.stamps.get(&watch) == Some(&stamp) {
                self.stamps.remove(&watch);
            }
        }
        // reopened and re-closed watches leave stale stamps behind
        if self.order.len() > self.capacity.saturating_mul(2) {
            let stamps = &self.stamps;
            self.order
                .retain(|(stamp, watch)| stamps.get(watch) == Some(stamp));
        }
    }

    pub fn remove(&mut self, viewer: PlayerRef, id: ContainerId) -> bool {
        self.stamps.remove(&(viewer, id)).is_some()
    }

    pub fn contains(&self, viewer: PlayerRef, id: ContainerId) -> bool {
        self.stamps.contains_key(&(viewer, id))
    }

    pub fn remove_viewer(&mut self, viewer: &PlayerRef) {
        self.stamps.retain(|(closer, _), _| closer != viewer);
        self.order.retain(|(_, (closer, _))| closer != viewer);
    }
}
