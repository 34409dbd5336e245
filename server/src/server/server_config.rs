use std::{default::Default, time::Duration};

/// Contains Config properties which will be used by the InventoryServer
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Number of slots in each player's quick bar
    pub quick_slots: usize,
    /// Number of slots in each player's main inventory
    pub main_slots: usize,
    /// Number of slots in chests spawned through the server
    pub chest_slots: usize,
    /// Magazine size used for weapons that do not define one
    pub default_magazine_size: u32,
    /// How long an open request may wait for its container to be
    /// registered. `None` waits until the viewer disconnects.
    pub pending_open_ttl: Option<Duration>,
    /// How many server-ended watches are remembered as closed. Older ones
    /// read as unopened again.
    pub closed_watch_history: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            quick_slots: 10,
            main_slots: 24,
            chest_slots: 24,
            default_magazine_size: 30,
            pending_open_ttl: Some(Duration::from_secs(60)),
            closed_watch_history: 4096,
        }
    }
}
