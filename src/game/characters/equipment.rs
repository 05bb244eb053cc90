// Equip slots, equipped items and per-slot image resolution

use crate::engine::input::{Direction, DirectionMap};
use crate::engine::renderer::Image;
use log::warn;
use std::fmt;

/// A body part that can hold one equipped item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipSlot {
    Head,
    Body,
    Weapon,
    /// Arms and legs share one sprite
    ArmLeg,
    Shield,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; 5] = [
        EquipSlot::Head,
        EquipSlot::Body,
        EquipSlot::Weapon,
        EquipSlot::ArmLeg,
        EquipSlot::Shield,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Head => 0,
            Self::Body => 1,
            Self::Weapon => 2,
            Self::ArmLeg => 3,
            Self::Shield => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Body => "body",
            Self::Weapon => "weapon",
            Self::ArmLeg => "armleg",
            Self::Shield => "shield",
        }
    }
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The image(s) a part shows for one direction
#[derive(Debug, Clone)]
pub enum PartImage {
    /// Same image for the idle and action poses
    Single(Image),
    /// Separate idle (frame 0) and action (frame 1) poses
    Pair { idle: Image, action: Image },
}

impl PartImage {
    pub fn pair(idle: Image, action: Image) -> Self {
        Self::Pair { idle, action }
    }

    /// Image for a composite frame index; single images serve every frame
    pub fn frame(&self, frame: usize) -> &Image {
        match self {
            Self::Single(image) => image,
            Self::Pair { idle, .. } if frame == 0 => idle,
            Self::Pair { action, .. } => action,
        }
    }
}

/// What an item shows while its wearer attacks
#[derive(Debug, Clone)]
pub enum AttackImages {
    /// Keep showing the normal images
    ReuseNormal,
    /// Dedicated attack poses
    Distinct(DirectionMap<PartImage>),
    /// Draw nothing (e.g. a weapon replaced by its swing effect)
    Hidden,
}

/// An item that can be worn in one equip slot
#[derive(Debug, Clone)]
pub struct EquipItem {
    name: String,
    slot: EquipSlot,
    images: DirectionMap<PartImage>,
    attack_images: AttackImages,
    /// Right-facing replacement used by arm/leg items while a shield is worn
    right_with_shield: Option<PartImage>,
}

impl EquipItem {
    /// Create an item that keeps its normal images while attacking
    pub fn new(name: &str, slot: EquipSlot, images: DirectionMap<PartImage>) -> Self {
        Self {
            name: name.to_string(),
            slot,
            images,
            attack_images: AttackImages::ReuseNormal,
            right_with_shield: None,
        }
    }

    /// Set what the item shows while attacking
    pub fn with_attack_images(mut self, attack_images: AttackImages) -> Self {
        self.attack_images = attack_images;
        self
    }

    /// Set the right-facing image used when a shield is also worn
    pub fn with_right_with_shield(mut self, image: PartImage) -> Self {
        self.right_with_shield = Some(image);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot(&self) -> EquipSlot {
        self.slot
    }

    pub fn images(&self) -> &DirectionMap<PartImage> {
        &self.images
    }

    pub fn attack_images(&self) -> &AttackImages {
        &self.attack_images
    }

    pub fn right_with_shield(&self) -> Option<&PartImage> {
        self.right_with_shield.as_ref()
    }
}

/// The items currently worn, at most one per slot
#[derive(Debug, Clone, Default)]
pub struct Equipment {
    slots: [Option<EquipItem>; 5],
}

impl Equipment {
    /// Create an empty set of equipment
    pub fn new() -> Self {
        Self::default()
    }

    /// Wear an item in its slot
    /// Returns the item it replaced, if any
    pub fn equip(&mut self, item: EquipItem) -> Option<EquipItem> {
        self.slots[item.slot.index()].replace(item)
    }

    /// Take off whatever is in a slot
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<EquipItem> {
        self.slots[slot.index()].take()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&EquipItem> {
        self.slots[slot.index()].as_ref()
    }

    pub fn is_equipped(&self, slot: EquipSlot) -> bool {
        self.slots[slot.index()].is_some()
    }

    /// Number of occupied slots
    pub fn count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Pick the image a slot contributes to one composite frame
    ///
    /// Empty slots contribute nothing. While attacking, an item's attack
    /// images take over; items without any contribute nothing.
    pub fn resolve(
        &self,
        direction: Direction,
        slot: EquipSlot,
        frame: usize,
        attacking: bool,
    ) -> Option<&Image> {
        let item = self.get(slot)?;

        if attacking {
            match &item.attack_images {
                AttackImages::ReuseNormal => {}
                AttackImages::Distinct(images) => return Some(images[direction].frame(frame)),
                AttackImages::Hidden => return None,
            }
        }

        Some(self.normal_part(item, direction).frame(frame))
    }

    fn normal_part<'a>(&self, item: &'a EquipItem, direction: Direction) -> &'a PartImage {
        if item.slot == EquipSlot::ArmLeg
            && direction == Direction::Right
            && self.is_equipped(EquipSlot::Shield)
        {
            match &item.right_with_shield {
                Some(image) => return image,
                None => warn!(
                    "arm/leg item '{}' has no right-with-shield image, using its plain one",
                    item.name
                ),
            }
        }

        &item.images[direction]
    }
}
