use std::{
    collections::{HashMap, VecDeque},
    time::{Duration, Instant},
};

use log::info;

use coffer_shared::{ContainerId, PlayerRef};

/// Open requests that arrived before their container was registered.
///
/// Viewers are kept per identity in arrival order, without duplicates.
/// Entries older than the TTL are dropped by [`OpenWaitlist::expire`].
pub struct OpenWaitlist {
    pending: HashMap<ContainerId, Vec<PlayerRef>>,
    ttls: VecDeque<(Instant, ContainerId, PlayerRef)>,
    ttl: Option<Duration>,
}

impl OpenWaitlist {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            pending: HashMap::new(),
            ttls: VecDeque::new(),
            ttl,
        }
    }

    /// Returns false if `viewer` was already waiting on `id`.
    pub fn queue(&mut self, now: Instant, id: ContainerId, viewer: PlayerRef) -> bool {
        let viewers = self.pending.entry(id).or_default();
        if viewers.contains(&viewer) {
            return false;
        }
        viewers.push(viewer);
        self.ttls.push_back((now, id, viewer));
        true
    }

    pub fn is_pending(&self, id: &ContainerId, viewer: &PlayerRef) -> bool {
        self.pending
            .get(id)
            .is_some_and(|viewers| viewers.contains(viewer))
    }

    pub fn pending_count(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    /// Removes and returns every viewer waiting on `id`, in arrival order.
    pub fn take(&mut self, id: &ContainerId) -> Vec<PlayerRef> {
        self.ttls.retain(|(_, ttl_id, _)| ttl_id != id);
        self.pending.remove(id).unwrap_or_default()
    }

    /// Cancels the wait of one viewer on one identity.
    pub fn cancel(&mut self, id: &ContainerId, viewer: &PlayerRef) -> bool {
        let Some(viewers) = self.pending.get_mut(id) else {
            return false;
        };
        let before = viewers.len();
        viewers.retain(|waiting| waiting != viewer);
        let removed = viewers.len() != before;
        if viewers.is_empty() {
            self.pending.remove(id);
        }
        self.ttls
            .retain(|(_, ttl_id, ttl_viewer)| ttl_id != id || ttl_viewer != viewer);
        removed
    }

    /// Cancels every wait of `viewer`.
    pub fn remove_viewer(&mut self, viewer: &PlayerRef) {
        self.pending.retain(|_, viewers| {
            viewers.retain(|waiting| waiting != viewer);
            !viewers.is_empty()
        });
        self.ttls.retain(|(_, _, ttl_viewer)| ttl_viewer != viewer);
    }

    /// Drops every entry older than the TTL, returning what expired.
    pub fn expire(&mut self, now: Instant) -> Vec<(ContainerId, PlayerRef)> {
        let Some(ttl) = self.ttl else {
            return Vec::new();
        };
        let mut expired = Vec::new();
        while let Some((queued_at, id, viewer)) = self.ttls.front().copied() {
            if now.saturating_duration_since(queued_at) < ttl {
                break;
            }
            self.ttls.pop_front();
            if let Some(viewers) = self.pending.get_mut(&id) {
                viewers.retain(|waiting| *waiting != viewer);
                if viewers.is_empty() {
                    self.pending.remove(&id);
                }
            }
            info!("pending open of {} by {:?} expired", id, viewer);
            expired.push((id, viewer));
        }
        expired
    }
}
