// Layers equipped part images into per-direction animation clips

use super::animation::{AnimationClip, DirectionalClips};
use super::equipment::{EquipSlot, Equipment};
use crate::engine::input::{Direction, DirectionMap};
use crate::engine::renderer::{Canvas, Surface};
use log::debug;
use std::sync::Arc;

/// Frames composited per direction: idle pose, then action pose
pub const POSE_FRAMES: usize = 2;

/// Back-to-front slot order for each direction
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOrder {
    orders: DirectionMap<[EquipSlot; 5]>,
}

impl DrawOrder {
    pub fn new(orders: DirectionMap<[EquipSlot; 5]>) -> Self {
        Self { orders }
    }

    /// Layering while walking or standing
    pub fn normal() -> Self {
        use EquipSlot::*;
        Self::new(DirectionMap::new(
            [Body, Head, Weapon, ArmLeg, Shield],
            [Shield, ArmLeg, Weapon, Body, Head],
            [Shield, Body, Head, Weapon, ArmLeg],
            [Weapon, Body, Head, ArmLeg, Shield],
        ))
    }

    /// Layering while attacking; the shield swings behind the body when
    /// facing front or in front of it when facing back
    pub fn attack() -> Self {
        use EquipSlot::*;
        Self::new(DirectionMap::new(
            [Shield, Body, Head, Weapon, ArmLeg],
            [ArmLeg, Weapon, Body, Head, Shield],
            [Shield, Body, Head, Weapon, ArmLeg],
            [Weapon, Body, Head, ArmLeg, Shield],
        ))
    }

    /// Slots for one direction, back to front
    pub fn slots(&self, direction: Direction) -> &[EquipSlot] {
        &self.orders[direction]
    }
}

/// Builds the composited character animations for a set of equipment
#[derive(Debug, Clone)]
pub struct Compositor {
    normal_order: DrawOrder,
    attack_order: DrawOrder,
    cell_size: (u32, u32),
    fps: f32,
}

impl Compositor {
    pub fn new(
        normal_order: DrawOrder,
        attack_order: DrawOrder,
        cell_size: (u32, u32),
        fps: f32,
    ) -> Self {
        Self {
            normal_order,
            attack_order,
            cell_size,
            fps,
        }
    }

    /// Compositor using the stock draw orders
    pub fn standard(cell_size: (u32, u32), fps: f32) -> Self {
        Self::new(DrawOrder::normal(), DrawOrder::attack(), cell_size, fps)
    }

    /// The draw order used for a mode
    pub fn order(&self, attacking: bool) -> &DrawOrder {
        if attacking {
            &self.attack_order
        } else {
            &self.normal_order
        }
    }

    /// Build one looping two-frame clip per direction
    pub fn composite(&self, equipment: &Equipment, attacking: bool) -> DirectionalClips {
        let clips = DirectionMap::from_fn(|direction| {
            let frames = (0..POSE_FRAMES)
                .map(|frame| {
                    let canvas = self.compose_frame(equipment, direction, frame, attacking);
                    Arc::new(canvas.into_image())
                })
                .collect();
            AnimationClip::looping(frames, self.fps)
        });

        debug!(
            "Composited {} animations from {} equipped item(s)",
            if attacking { "attack" } else { "normal" },
            equipment.count()
        );
        clips
    }

    /// Stack every equipped part for one pose onto a transparent cell
    pub fn compose_frame(
        &self,
        equipment: &Equipment,
        direction: Direction,
        frame: usize,
        attacking: bool,
    ) -> Canvas {
        let mut canvas = Canvas::new(self.cell_size.0, self.cell_size.1);
        for &slot in self.order(attacking).slots(direction) {
            if let Some(image) = equipment.resolve(direction, slot, frame, attacking) {
                canvas.blit(image, 0, 0);
            }
        }
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::equipment::{AttackImages, EquipItem, PartImage};
    use approx::assert_relative_eq;
    use image::{Rgba, RgbaImage};

    const CELL: (u32, u32) = (5, 1);

    /// Every slot covers the full cell in its own color, so the top-most
    /// layer owns pixel 0; slot N also covers pixels 1..=N alone, so a pixel
    /// is owned by the highest layer that reaches it
    fn striped_equipment() -> Equipment {
        let mut equipment = Equipment::new();
        for slot in EquipSlot::ALL {
            let images = DirectionMap::splat(PartImage::Single(stripe(slot)));
            equipment.equip(EquipItem::new(slot.name(), slot, images));
        }
        equipment
    }

    fn color(slot: EquipSlot) -> Rgba<u8> {
        Rgba([slot.index() as u8 * 40 + 10, 0, 0, 255])
    }

    fn stripe(slot: EquipSlot) -> crate::engine::renderer::Image {
        let mut image = RgbaImage::from_pixel(CELL.0, CELL.1, Rgba([0, 0, 0, 0]));
        image.put_pixel(0, 0, color(slot));
        image.put_pixel(slot.index() as u32, 0, color(slot));
        Arc::new(image)
    }

    fn owner(canvas: &Canvas, x: u32) -> Option<EquipSlot> {
        let pixel = canvas.pixel(x, 0);
        EquipSlot::ALL.into_iter().find(|slot| color(*slot) == pixel)
    }

    /// Equipment whose images encode each slot's position in the draw
    /// order: the slot drawn k-th paints pixels 0..=(4 - k), so pixel p ends
    /// up owned by the slot drawn at position 4 - p
    fn ordered_equipment(compositor: &Compositor) -> Equipment {
        let staircase = |attacking: bool, slot: EquipSlot| {
            DirectionMap::from_fn(|direction| {
                let slots = compositor.order(attacking).slots(direction);
                let position = slots.iter().position(|s| *s == slot).unwrap();
                let mut image = RgbaImage::from_pixel(CELL.0, CELL.1, Rgba([0, 0, 0, 0]));
                for x in 0..=(4 - position as u32) {
                    image.put_pixel(x, 0, color(slot));
                }
                PartImage::Single(Arc::new(image))
            })
        };

        let mut equipment = Equipment::new();
        for slot in EquipSlot::ALL {
            let item = EquipItem::new(slot.name(), slot, staircase(false, slot))
                .with_attack_images(AttackImages::Distinct(staircase(true, slot)));
            equipment.equip(item);
        }
        equipment
    }

    #[test]
    fn test_composite_follows_draw_order_exactly() {
        let compositor = Compositor::standard(CELL, 7.0);
        let equipment = ordered_equipment(&compositor);

        for attacking in [false, true] {
            let clips = compositor.composite(&equipment, attacking);
            for direction in Direction::ALL {
                let order = compositor.order(attacking).slots(direction);
                let canvas = Canvas::from(clips[direction].frames()[0].as_ref().clone());
                for x in 0..5 {
                    assert_eq!(
                        owner(&canvas, x),
                        Some(order[4 - x as usize]),
                        "{direction} attacking={attacking} pixel {x}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_reordered_layers_change_the_result() {
        let stock = Compositor::standard(CELL, 7.0);
        let equipment = ordered_equipment(&stock);

        use EquipSlot::*;
        let mut orders = DirectionMap::from_fn(|direction| {
            let mut order = [Head; 5];
            order.copy_from_slice(DrawOrder::normal().slots(direction));
            order
        });
        orders[Direction::Front] = [Weapon, ArmLeg, Body, Head, Shield];
        let swapped = Compositor::new(DrawOrder::new(orders), DrawOrder::attack(), CELL, 7.0);

        let expected = stock.compose_frame(&equipment, Direction::Front, 0, false);
        let actual = swapped.compose_frame(&equipment, Direction::Front, 0, false);
        assert_ne!(expected.as_image(), actual.as_image());
    }

    #[test]
    fn test_top_layer_follows_draw_order() {
        let compositor = Compositor::standard(CELL, 7.0);
        let equipment = striped_equipment();

        for attacking in [false, true] {
            for direction in Direction::ALL {
                let canvas = compositor.compose_frame(&equipment, direction, 0, attacking);
                let order = compositor.order(attacking).slots(direction);
                assert_eq!(
                    owner(&canvas, 0),
                    order.last().copied(),
                    "{direction} attacking={attacking}"
                );
            }
        }
    }

    #[test]
    fn test_shield_moves_in_front_when_attacking_back() {
        let compositor = Compositor::standard(CELL, 7.0);
        let equipment = striped_equipment();

        let normal = compositor.compose_frame(&equipment, Direction::Back, 0, false);
        let attack = compositor.compose_frame(&equipment, Direction::Back, 0, true);
        assert_eq!(owner(&normal, 0), Some(EquipSlot::Head));
        assert_eq!(owner(&attack, 0), Some(EquipSlot::Shield));
    }

    #[test]
    fn test_empty_equipment_composites_transparent() {
        let compositor = Compositor::standard(CELL, 7.0);
        let clips = compositor.composite(&Equipment::new(), false);
        for (_, clip) in clips.iter() {
            assert_eq!(clip.frame_count(), POSE_FRAMES);
            assert!(clip.frames()[0].pixels().all(|p| p[3] == 0));
        }
    }

    #[test]
    fn test_hidden_parts_skipped_when_attacking() {
        let compositor = Compositor::standard(CELL, 7.0);
        let mut equipment = striped_equipment();
        let weapon = equipment.unequip(EquipSlot::Weapon).unwrap();
        equipment.equip(weapon.with_attack_images(AttackImages::Hidden));

        // Facing right the weapon is the bottom layer and alone at its stripe
        let x = EquipSlot::Weapon.index() as u32;
        let normal = compositor.compose_frame(&equipment, Direction::Right, 0, false);
        let attack = compositor.compose_frame(&equipment, Direction::Right, 0, true);
        assert_eq!(owner(&normal, x), Some(EquipSlot::Weapon));
        assert_eq!(attack.pixel(x, 0)[3], 0);
    }

    #[test]
    fn test_composite_builds_two_pose_clips() {
        let compositor = Compositor::standard((2, 1), 7.0);
        let mut equipment = Equipment::new();
        let idle = Arc::new(RgbaImage::from_pixel(2, 1, Rgba([1, 0, 0, 255])));
        let action = Arc::new(RgbaImage::from_pixel(2, 1, Rgba([2, 0, 0, 255])));
        let images = DirectionMap::splat(PartImage::pair(idle, action));
        equipment.equip(EquipItem::new("chain", EquipSlot::Body, images));

        let clips = compositor.composite(&equipment, false);
        let clip = &clips[Direction::Left];
        assert_relative_eq!(clip.fps(), 7.0);
        assert_eq!(clip.frames()[0].get_pixel(0, 0)[0], 1);
        assert_eq!(clip.frames()[1].get_pixel(0, 0)[0], 2);
    }

    #[test]
    fn test_armleg_override_in_both_modes() {
        let compositor = Compositor::standard((1, 1), 7.0);
        let plain = Arc::new(RgbaImage::from_pixel(1, 1, Rgba([1, 0, 0, 255])));
        let tucked = Arc::new(RgbaImage::from_pixel(1, 1, Rgba([2, 0, 0, 255])));
        let plain_images = DirectionMap::splat(PartImage::Single(plain));
        let armleg = EquipItem::new("normal", EquipSlot::ArmLeg, plain_images)
            .with_right_with_shield(PartImage::Single(tucked));
        // A shield with no pixels so the arm/leg layer stays visible
        let blank = Arc::new(RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0])));
        let blank_images = DirectionMap::splat(PartImage::Single(blank));
        let shield = EquipItem::new("tin", EquipSlot::Shield, blank_images);

        let mut equipment = Equipment::new();
        equipment.equip(armleg);
        let without = compositor.compose_frame(&equipment, Direction::Right, 0, false);
        assert_eq!(without.pixel(0, 0)[0], 1);

        equipment.equip(shield);
        for attacking in [false, true] {
            let with = compositor.compose_frame(&equipment, Direction::Right, 0, attacking);
            assert_eq!(with.pixel(0, 0)[0], 2);
        }
    }
}
