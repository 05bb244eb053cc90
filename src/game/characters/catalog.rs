// Equipment catalog and the stock item set

use super::equipment::{AttackImages, EquipItem, EquipSlot, Equipment, PartImage};
use super::EquipError;
use crate::core::Rect;
use crate::engine::input::{Direction, DirectionMap};
use crate::engine::renderer::{Canvas, Image, Surface};
use image::{Rgba, RgbaImage};
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// The outfit the hero starts with
pub const DEFAULT_LOADOUT: [(EquipSlot, &str); 5] = [
    (EquipSlot::Head, "sader"),
    (EquipSlot::Body, "chain"),
    (EquipSlot::Shield, "tin"),
    (EquipSlot::ArmLeg, "normal"),
    (EquipSlot::Weapon, "pitch"),
];

/// Every item available to equip, grouped by slot
#[derive(Debug, Clone, Default)]
pub struct EquipCatalog {
    items: HashMap<EquipSlot, BTreeMap<String, EquipItem>>,
}

impl EquipCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item under its own slot
    /// Returns the item previously registered under the same name
    pub fn insert(&mut self, item: EquipItem) -> Option<EquipItem> {
        self.items
            .entry(item.slot())
            .or_default()
            .insert(item.name().to_string(), item)
    }

    pub fn get(&self, slot: EquipSlot, name: &str) -> Option<&EquipItem> {
        self.items.get(&slot).and_then(|items| items.get(name))
    }

    /// Item names available for a slot, sorted
    pub fn names(&self, slot: EquipSlot) -> Vec<&str> {
        self.items
            .get(&slot)
            .map(|items| items.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Total number of items across all slots
    pub fn len(&self) -> usize {
        self.items.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Equipment {
    /// Wear one named catalog item per listed slot; unlisted slots stay empty
    pub fn from_catalog(
        catalog: &EquipCatalog,
        picks: &[(EquipSlot, &str)],
    ) -> Result<Self, EquipError> {
        let mut equipment = Equipment::new();

        for &(slot, name) in picks {
            if equipment.is_equipped(slot) {
                return Err(EquipError::DuplicateSlot(slot));
            }

            let item = catalog
                .get(slot, name)
                .ok_or_else(|| EquipError::UnknownItem {
                    slot,
                    name: name.to_string(),
                })?;
            equipment.equip(item.clone());
            debug!("Equipped {} '{}'", slot, name);
        }

        Ok(equipment)
    }
}

// Stock items are drawn procedurally from solid blocks so the game runs
// without an asset pack.

const STEEL: Rgba<u8> = Rgba([150, 155, 165, 255]);
const VISOR: Rgba<u8> = Rgba([30, 30, 40, 255]);
const MAIL: Rgba<u8> = Rgba([110, 115, 125, 255]);
const SKIN: Rgba<u8> = Rgba([230, 180, 140, 255]);
const BOOTS: Rgba<u8> = Rgba([90, 60, 30, 255]);
const TIN: Rgba<u8> = Rgba([200, 200, 190, 255]);
const WOOD: Rgba<u8> = Rgba([140, 95, 50, 255]);

/// Draw colored blocks onto a transparent cell
fn part(cell: (u32, u32), blocks: &[(Rgba<u8>, Rect)]) -> Image {
    let mut canvas = Canvas::new(cell.0, cell.1);
    for (color, rect) in blocks {
        let block = RgbaImage::from_pixel(rect.width, rect.height, *color);
        canvas.blit(&block, rect.x, rect.y);
    }
    Arc::new(canvas.into_image())
}

fn helmet(cell: (u32, u32)) -> EquipItem {
    let images = DirectionMap::from_fn(|direction| {
        let shell = (STEEL, Rect::new(15, 2, 20, 16));
        let slit = match direction {
            Direction::Front => Some(Rect::new(18, 8, 14, 3)),
            Direction::Back => None,
            Direction::Left => Some(Rect::new(15, 8, 6, 3)),
            Direction::Right => Some(Rect::new(29, 8, 6, 3)),
        };
        let mut blocks = vec![shell];
        blocks.extend(slit.map(|rect| (VISOR, rect)));
        PartImage::Single(part(cell, &blocks))
    });
    EquipItem::new("sader", EquipSlot::Head, images)
}

fn chain_mail(cell: (u32, u32)) -> EquipItem {
    let images = DirectionMap::from_fn(|direction| {
        let torso = match direction {
            Direction::Front | Direction::Back => Rect::new(13, 17, 24, 18),
            Direction::Left | Direction::Right => Rect::new(17, 17, 16, 18),
        };
        PartImage::Single(part(cell, &[(MAIL, torso)]))
    });
    EquipItem::new("chain", EquipSlot::Body, images)
}

fn limbs(cell: (u32, u32), arms: &[Rect], stride: i32) -> PartImage {
    let walk = |offset: i32| {
        let mut blocks: Vec<_> = arms.iter().map(|rect| (SKIN, *rect)).collect();
        blocks.push((BOOTS, Rect::new(16, 35 + offset, 7, 13)));
        blocks.push((BOOTS, Rect::new(27, 35 - offset, 7, 13)));
        part(cell, &blocks)
    };
    PartImage::pair(walk(0), walk(stride))
}

fn arms_and_legs(cell: (u32, u32)) -> EquipItem {
    let left_arm = Rect::new(8, 18, 5, 14);
    let right_arm = Rect::new(37, 18, 5, 14);
    let side_arm = Rect::new(22, 18, 6, 14);

    let images = DirectionMap::new(
        limbs(cell, &[left_arm, right_arm], 1),
        limbs(cell, &[left_arm, right_arm], 1),
        limbs(cell, &[side_arm], 2),
        limbs(cell, &[side_arm], 2),
    );
    // Reaching forward, the near arm pokes out of the torso
    let attack = DirectionMap::new(
        limbs(cell, &[Rect::new(20, 30, 10, 6)], 0),
        limbs(cell, &[Rect::new(20, 14, 10, 6)], 0),
        limbs(cell, &[Rect::new(8, 22, 14, 5)], 0),
        limbs(cell, &[Rect::new(28, 22, 14, 5)], 0),
    );
    // Facing right with a shield the near arm is tucked behind it
    let right_with_shield = limbs(cell, &[Rect::new(24, 18, 4, 10)], 2);

    EquipItem::new("normal", EquipSlot::ArmLeg, images)
        .with_attack_images(AttackImages::Distinct(attack))
        .with_right_with_shield(right_with_shield)
}

fn tin_shield(cell: (u32, u32)) -> EquipItem {
    let images = DirectionMap::from_fn(|direction| {
        let plate = match direction {
            Direction::Front => Rect::new(4, 20, 10, 14),
            Direction::Back => Rect::new(36, 20, 10, 14),
            Direction::Left => Rect::new(12, 19, 6, 16),
            Direction::Right => Rect::new(30, 19, 6, 16),
        };
        PartImage::Single(part(cell, &[(TIN, plate)]))
    });
    EquipItem::new("tin", EquipSlot::Shield, images)
}

fn pitchfork(cell: (u32, u32)) -> EquipItem {
    let images = DirectionMap::from_fn(|direction| {
        let shaft = match direction {
            Direction::Front | Direction::Right => Rect::new(40, 4, 3, 40),
            Direction::Back | Direction::Left => Rect::new(7, 4, 3, 40),
        };
        let prongs = Rect::new(shaft.x - 3, 2, 9, 3);
        PartImage::Single(part(cell, &[(WOOD, shaft), (STEEL, prongs)]))
    });
    // While thrusting the fork is drawn by the weapon itself
    EquipItem::new("pitch", EquipSlot::Weapon, images).with_attack_images(AttackImages::Hidden)
}

/// The items shipped with the game, drawn for cells of `cell` pixels
pub fn stock_catalog(cell: (u32, u32)) -> EquipCatalog {
    let mut catalog = EquipCatalog::new();
    for item in [
        helmet(cell),
        chain_mail(cell),
        arms_and_legs(cell),
        tin_shield(cell),
        pitchfork(cell),
    ] {
        catalog.insert(item);
    }
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: (u32, u32) = (50, 50);

    #[test]
    fn test_stock_catalog_covers_default_loadout() {
        let catalog = stock_catalog(CELL);
        assert_eq!(catalog.len(), 5);
        for (slot, name) in DEFAULT_LOADOUT {
            assert!(catalog.get(slot, name).is_some(), "missing {slot} '{name}'");
        }
    }

    #[test]
    fn test_default_loadout_fills_every_slot() {
        let equipment = Equipment::from_catalog(&stock_catalog(CELL), &DEFAULT_LOADOUT).unwrap();
        for slot in EquipSlot::ALL {
            assert!(equipment.is_equipped(slot));
        }
    }

    #[test]
    fn test_partial_loadout_leaves_slots_empty() {
        let picks = [(EquipSlot::Body, "chain")];
        let equipment = Equipment::from_catalog(&stock_catalog(CELL), &picks).unwrap();
        assert_eq!(equipment.count(), 1);
        assert!(!equipment.is_equipped(EquipSlot::Weapon));
    }

    #[test]
    fn test_unknown_item() {
        let picks = [(EquipSlot::Head, "crown")];
        let err = Equipment::from_catalog(&stock_catalog(CELL), &picks).unwrap_err();
        assert!(matches!(err, EquipError::UnknownItem { slot: EquipSlot::Head, .. }));
    }

    #[test]
    fn test_item_looked_up_in_its_own_slot() {
        let picks = [(EquipSlot::Shield, "chain")];
        assert!(Equipment::from_catalog(&stock_catalog(CELL), &picks).is_err());
    }

    #[test]
    fn test_duplicate_slot() {
        let picks = [(EquipSlot::Body, "chain"), (EquipSlot::Body, "chain")];
        let err = Equipment::from_catalog(&stock_catalog(CELL), &picks).unwrap_err();
        assert!(matches!(err, EquipError::DuplicateSlot(EquipSlot::Body)));
    }

    #[test]
    fn test_names_sorted_per_slot() {
        let mut catalog = stock_catalog(CELL);
        let helm = catalog.get(EquipSlot::Head, "sader").unwrap().clone();
        catalog.insert(EquipItem::new("bascinet", EquipSlot::Head, helm.images().clone()));

        assert_eq!(catalog.names(EquipSlot::Head), vec!["bascinet", "sader"]);
        assert!(catalog.names(EquipSlot::Weapon).contains(&"pitch"));
    }

    #[test]
    fn test_stock_parts_fill_the_cell() {
        let catalog = stock_catalog(CELL);
        let body = catalog.get(EquipSlot::Body, "chain").unwrap();
        let image = body.images()[Direction::Front].frame(0);
        assert_eq!(image.dimensions(), CELL);
        assert_eq!(image.get_pixel(0, 0)[3], 0);
        assert_eq!(*image.get_pixel(20, 20), MAIL);
    }

    #[test]
    fn test_stock_shield_swaps_right_arm() {
        let catalog = stock_catalog(CELL);
        let armleg = catalog.get(EquipSlot::ArmLeg, "normal").unwrap();
        assert!(armleg.right_with_shield().is_some());
        assert!(matches!(armleg.attack_images(), AttackImages::Distinct(_)));
    }
}
