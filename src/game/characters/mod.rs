// Character system
//
// This module contains everything related to the equipment-built hero:
// - Equip slots, items and the item catalog
// - Compositing equipped parts into per-direction animations
// - Hit-flash variants of those animations
// - Player state machine, movement and drawing
// - Weapon and shadow collaborators

pub mod animation;
pub mod catalog;
pub mod compositor;
pub mod equipment;
pub mod hit_flash;
pub mod player;
pub mod shadow;
pub mod state;
pub mod stats;
pub mod weapon;

// Re-export commonly used types
pub use animation::{AnimationClip, AnimationTable, DirectionalClips, Loops};
pub use catalog::{stock_catalog, EquipCatalog, DEFAULT_LOADOUT};
pub use compositor::{Compositor, DrawOrder};
pub use equipment::{AttackImages, EquipItem, EquipSlot, Equipment, PartImage};
pub use hit_flash::HitFlash;
pub use player::{Body, Player};
pub use shadow::Shadow;
pub use state::ActionState;
pub use stats::{AnimationSettings, PlayerStats};
pub use weapon::{Thrust, Weapon};

/// Errors that can occur while putting together a loadout
#[derive(Debug, thiserror::Error)]
pub enum EquipError {
    #[error("No {slot} item named '{name}' in the catalog")]
    UnknownItem { slot: EquipSlot, name: String },

    #[error("Slot {0} picked more than once")]
    DuplicateSlot(EquipSlot),
}
