use std::sync::Arc;

use coffer_shared::{
    ItemCatalog, ItemDef, ItemKind, MemoryItemCatalog, PickupPriority, ToolSpec, WeaponSpec,
};

pub const WOOD: &str = "wood";
pub const BERRIES: &str = "berries";
pub const AMMO: &str = "ammo_9mm";
pub const PISTOL: &str = "pistol";
pub const SWORD: &str = "sword";
pub const SHIELD: &str = "shield";

pub const PISTOL_MAGAZINE: u32 = 30;

/// Item definitions shared by every test.
///
/// | item       | max stack | priority  | kind                     |
/// |------------|-----------|-----------|--------------------------|
/// | `wood`     | 10        | main      | generic                  |
/// | `berries`  | 20        | main      | generic                  |
/// | `ammo_9mm` | 50        | main      | generic                  |
/// | `pistol`   | 1         | quick bar | weapon, 30 x `ammo_9mm`  |
/// | `sword`    | 1         | quick bar | tool                     |
/// | `shield`   | 1         | main      | generic                  |
pub fn test_items() -> MemoryItemCatalog {
    MemoryItemCatalog::new()
        .with(ItemDef::new(WOOD, 10))
        .with(ItemDef::new(BERRIES, 20))
        .with(ItemDef::new(AMMO, 50))
        .with(
            ItemDef::new(PISTOL, 1)
                .with_priority(PickupPriority::QuickBar)
                .with_kind(ItemKind::Weapon(WeaponSpec {
                    magazine_size: PISTOL_MAGAZINE,
                    ammo_item_id: Some(AMMO.to_string()),
                })),
        )
        .with(
            ItemDef::new(SWORD, 1)
                .with_priority(PickupPriority::QuickBar)
                .with_kind(ItemKind::Tool(ToolSpec { durability: 100 })),
        )
        .with(ItemDef::new(SHIELD, 1))
}

pub fn test_catalog() -> Arc<dyn ItemCatalog> {
    Arc::new(test_items())
}
