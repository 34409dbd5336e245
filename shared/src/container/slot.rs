/// Auxiliary per-stack state carried alongside an item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ItemState {
    pub ammo: u32,
    pub durability: u32,
}

impl ItemState {
    pub fn new(ammo: u32, durability: u32) -> Self {
        Self { ammo, durability }
    }

    pub fn with_ammo(ammo: u32) -> Self {
        Self {
            ammo,
            durability: 0,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.ammo == 0 && self.durability == 0
    }
}

/// One cell of a container.
///
/// A slot is empty when it has no item id (or an empty one) or a zero count.
/// Slots own their [`ItemState`], so cloning a slot is a deep copy. A blank
/// state (no ammo, no durability) is stored as no state at all, which is also
/// how it decodes off the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Slot {
    item_id: Option<String>,
    count: u32,
    state: Option<ItemState>,
}

impl Slot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(item_id: impl Into<String>, count: u32) -> Self {
        Self {
            item_id: Some(item_id.into()),
            count,
            state: None,
        }
    }

    pub fn with_state(item_id: impl Into<String>, count: u32, state: ItemState) -> Self {
        Self {
            item_id: Some(item_id.into()),
            count,
            state: Some(state).filter(|state| !state.is_blank()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.item_id {
            Some(id) => id.is_empty() || self.count == 0,
            None => true,
        }
    }

    /// Item id of a non-empty slot.
    pub fn item_id(&self) -> Option<&str> {
        if self.is_empty() {
            return None;
        }
        self.item_id.as_deref()
    }

    /// Count of a non-empty slot, zero otherwise.
    pub fn count(&self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        self.count
    }

    pub fn state(&self) -> Option<&ItemState> {
        self.state.as_ref()
    }

    pub fn ammo(&self) -> u32 {
        self.state.map(|state| state.ammo).unwrap_or(0)
    }

    pub fn holds(&self, item_id: &str) -> bool {
        self.item_id() == Some(item_id)
    }

    pub fn set_count(&mut self, count: u32) {
        self.count = count;
        if count == 0 {
            self.clear();
        }
    }

    pub fn set_state(&mut self, state: Option<ItemState>) {
        self.state = state.filter(|state| !state.is_blank());
    }

    /// Removes up to `amount` units, clearing the slot when it runs out.
    /// Returns how many units were taken.
    pub fn take(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.count());
        self.set_count(self.count() - taken);
        taken
    }

    pub fn clear(&mut self) {
        self.item_id = None;
        self.count = 0;
        self.state = None;
    }
}
