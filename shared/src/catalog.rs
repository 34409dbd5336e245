use std::collections::HashMap;

/// Which container an item prefers when picked up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PickupPriority {
    /// Fast-access items (weapons, tools) go to the quick bar first.
    QuickBar,
    /// Everything else goes to the main inventory first.
    #[default]
    Main,
}

impl PickupPriority {
    /// Legacy integer tiers: `1` meant quick bar, anything else main.
    pub fn from_tier(tier: i32) -> Self {
        if tier == 1 {
            PickupPriority::QuickBar
        } else {
            PickupPriority::Main
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeaponSpec {
    pub magazine_size: u32,
    pub ammo_item_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolSpec {
    pub durability: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaceableSpec {
    pub object_kind: String,
}

/// Kind-specific metadata, resolved once when the catalog is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ItemKind {
    #[default]
    Generic,
    Weapon(WeaponSpec),
    Tool(ToolSpec),
    Placeable(PlaceableSpec),
}

/// Static metadata of one item id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDef {
    pub id: String,
    pub max_stack: u32,
    pub priority: PickupPriority,
    pub kind: ItemKind,
}

impl ItemDef {
    pub fn new(id: impl Into<String>, max_stack: u32) -> Self {
        Self {
            id: id.into(),
            max_stack,
            priority: PickupPriority::Main,
            kind: ItemKind::Generic,
        }
    }

    pub fn with_priority(mut self, priority: PickupPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    /// Stack size used by placement math. Never below one.
    pub fn stack_limit(&self) -> u32 {
        self.max_stack.max(1)
    }

    pub fn weapon(&self) -> Option<&WeaponSpec> {
        match &self.kind {
            ItemKind::Weapon(spec) => Some(spec),
            _ => None,
        }
    }
}

/// Read-only lookup of item metadata by id.
pub trait ItemCatalog: Send + Sync {
    fn get(&self, item_id: &str) -> Option<&ItemDef>;
}

/// [`ItemCatalog`] backed by a map, filled once at startup.
#[derive(Default)]
pub struct MemoryItemCatalog {
    items: HashMap<String, ItemDef>,
}

impl MemoryItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the definition of `def.id`.
    pub fn insert(&mut self, def: ItemDef) {
        self.items.insert(def.id.clone(), def);
    }

    pub fn with(mut self, def: ItemDef) -> Self {
        self.insert(def);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemCatalog for MemoryItemCatalog {
    fn get(&self, item_id: &str) -> Option<&ItemDef> {
        self.items.get(item_id)
    }
}
