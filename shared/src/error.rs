use thiserror::Error;

/// Reasons an inventory operation can be refused.
///
/// Every refusal leaves all containers untouched. [`InventoryError::reason`]
/// is the short code sent back to clients in acknowledgements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum InventoryError {
    /// Slot index is negative or out of range
    #[error("Slot index is negative or outside the container capacity")]
    BadIndex,

    /// Source slot holds nothing
    #[error("Source slot is empty, there is nothing to move")]
    Empty,

    /// Source and destination are the same slot
    #[error("Source and destination are the same slot")]
    SameSlot,

    /// Player may not touch one of the containers
    #[error("Player has no access to one of the containers")]
    NoAccess,

    /// Destination refuses the item
    #[error("Destination container does not accept this item")]
    CannotAccept,

    /// Swap was requested for less than a whole stack
    #[error("Swapping requires moving the whole source stack")]
    PartialSwapNotSupported,

    /// Source container is not registered
    #[error("Source container is not registered")]
    FromNotFound,

    /// Destination container is not registered
    #[error("Destination container is not registered")]
    ToNotFound,

    /// Some of the items did not fit
    #[error("Not enough space for every item")]
    NotEnoughSpace,

    /// Weapon magazine holds less than requested
    #[error("Weapon does not hold enough ammo")]
    NoAmmo,

    /// No ammo stacks were found for a reload
    #[error("No ammo items were found in the player containers")]
    NoAmmoItems,

    /// Weapon definition names no ammo item
    #[error("Weapon has no ammo type")]
    WeaponHasNoAmmoType,

    /// Container to open is not registered
    #[error("Container is not registered")]
    ContainerNotFound,

    /// Container policy refused the viewer
    #[error("Access to the container was denied")]
    AccessDenied,

    /// No container service is running
    #[error("No inventory server is running")]
    NoServer,

    /// Item id is not in the catalog
    #[error("Item is not defined in the catalog")]
    ItemNotFound,

    /// Quick bar or main inventory of the player is not registered
    #[error("Player containers are not registered")]
    PlayerContainersMissing,

    /// Quick slot to reload is empty
    #[error("Quick slot holds no weapon")]
    NoWeapon,

    /// Quick slot to reload holds something other than a weapon
    #[error("Quick slot item is not a weapon")]
    NotAWeapon,
}

impl InventoryError {
    /// Wire reason code for this refusal.
    pub fn reason(&self) -> &'static str {
        match self {
            InventoryError::BadIndex => "bad_index",
            InventoryError::Empty => "empty",
            InventoryError::SameSlot => "same_slot",
            InventoryError::NoAccess => "no_access",
            InventoryError::CannotAccept => "cannot_accept",
            InventoryError::PartialSwapNotSupported => "partial_swap_not_supported",
            InventoryError::FromNotFound => "from_not_found",
            InventoryError::ToNotFound => "to_not_found",
            InventoryError::NotEnoughSpace => "Not enough space",
            InventoryError::NoAmmo => "no ammo",
            InventoryError::NoAmmoItems => "no ammo items",
            InventoryError::WeaponHasNoAmmoType => "weapon has no ammo type",
            InventoryError::ContainerNotFound => "Container not found",
            InventoryError::AccessDenied => "Access denied",
            InventoryError::NoServer => "no_server",
            InventoryError::ItemNotFound => "Item not found",
            InventoryError::PlayerContainersMissing => "Player containers missing",
            InventoryError::NoWeapon => "no weapon",
            InventoryError::NotAWeapon => "not a weapon",
        }
    }
}

/// Errors that can occur while encoding or decoding inventory packets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Packet could not be read
    #[error("Failed to read {message} packet. The packet is truncated or malformed")]
    Malformed { message: &'static str },

    /// Parallel slot arrays differ in length
    #[error("Slot arrays of a {message} packet differ in length: expected {expected}, found {found}")]
    LengthMismatch {
        message: &'static str,
        expected: usize,
        found: usize,
    },

    /// Value does not fit the field it is decoded into
    #[error("Value out of range for field {field} of a {message} packet")]
    OutOfRange {
        message: &'static str,
        field: &'static str,
    },
}
