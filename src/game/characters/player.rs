// The player character: input, state machine, movement and drawing

use super::animation::AnimationTable;
use super::compositor::Compositor;
use super::equipment::Equipment;
use super::hit_flash::HitFlash;
use super::shadow::Shadow;
use super::state::ActionState;
use super::stats::{AnimationSettings, PlayerStats};
use super::weapon::Weapon;
use crate::core::Rect;
use crate::engine::input::{Direction, DirectionStack, KeyBindings};
use crate::engine::renderer::{CollisionMask, Image, Surface};
use glam::Vec2;
use log::{debug, info};
use std::sync::Arc;
use winit::keyboard::KeyCode;

/// Where the player is and where it is heading
///
/// Kept apart from the rest of the player so the weapon can read it while
/// the player is borrowed mutably.
#[derive(Debug, Clone)]
pub struct Body {
    /// Committed integer rectangle used for drawing and collision
    rect: Rect,
    /// Sub-pixel position of the rectangle's top-left corner
    exact_position: Vec2,
    /// Position before the last movement step
    old_position: Vec2,
    /// Pixels per second
    speed: f32,
    direction: Direction,
}

impl Body {
    pub fn new(rect: Rect, speed: f32, direction: Direction) -> Self {
        let position = rect.topleft();
        Self {
            rect,
            exact_position: position,
            old_position: position,
            speed,
            direction,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn position(&self) -> Vec2 {
        self.exact_position
    }

    pub fn old_position(&self) -> Vec2 {
        self.old_position
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Place the body without walking there
    pub fn teleport(&mut self, position: Vec2) {
        self.exact_position = position;
        self.old_position = position;
        self.rect.set_topleft(position);
    }

    /// Walk along `heading` for `dt` seconds, remembering where we started
    fn step(&mut self, heading: Option<Direction>, dt: f32) {
        self.old_position = self.exact_position;
        if let Some(direction) = heading {
            self.exact_position += direction.vector() * self.speed * dt;
        }
    }

    fn commit(&mut self) {
        self.rect.set_topleft(self.exact_position);
    }

    fn roll_back(&mut self) {
        self.exact_position = self.old_position;
        self.rect.set_topleft(self.old_position);
    }
}

/// The hero, assembled from its equipment
#[derive(Debug)]
pub struct Player {
    body: Body,
    direction_stack: DirectionStack,
    controls: KeyBindings,

    equipment: Equipment,
    weapon: Box<dyn Weapon>,
    mask: CollisionMask,
    shadow: Shadow,

    animations: AnimationTable,
    /// Frame drawn at the body's rectangle
    image: Image,

    action_state: ActionState,
    hit: bool,
    /// Sample the active clip next tick even if nothing else asks for it
    redraw: bool,

    health: i32,
}

impl Player {
    /// Create a player standing at `rect` and build its animations from
    /// `equipment`
    pub fn new(
        rect: Rect,
        stats: &PlayerStats,
        settings: &AnimationSettings,
        equipment: Equipment,
        weapon: Box<dyn Weapon>,
    ) -> Self {
        let compositor = Compositor::standard(stats.cell_size, settings.standard_fps);
        let hit_flash = HitFlash::from_settings(settings);

        let normal = compositor.composite(&equipment, false);
        let attack = compositor.composite(&equipment, true);
        let normal_flash = hit_flash.flash_all(&normal);
        let attack_flash = hit_flash.flash_all(&attack);
        let animations = AnimationTable::new(normal, attack, normal_flash, attack_flash);

        let direction = stats.initial_direction;
        let image = Arc::clone(
            animations
                .get(false, ActionState::Normal, direction)
                .current_image(),
        );

        info!(
            "Player created at ({}, {}) with {} equipped item(s), facing {}",
            rect.x,
            rect.y,
            equipment.count(),
            direction
        );

        Self {
            body: Body::new(rect, stats.speed, direction),
            direction_stack: DirectionStack::new(),
            controls: KeyBindings::default(),
            equipment,
            weapon,
            mask: CollisionMask::from_rect(stats.cell_size.0, stats.cell_size.1, stats.mask_rect),
            shadow: Shadow::new(stats.shadow_size, &rect),
            animations,
            image,
            action_state: ActionState::Normal,
            hit: false,
            redraw: true,
            health: stats.max_health,
        }
    }

    /// Replace the direction key layout
    pub fn with_controls(mut self, controls: KeyBindings) -> Self {
        self.controls = controls;
        self
    }

    /// Handle a pressed key; keys without a direction are ignored
    pub fn add_direction(&mut self, key: KeyCode) {
        if let Some(direction) = self.controls.direction_for(key) {
            self.press_direction(direction);
        }
    }

    /// Handle a released key; keys without a direction are ignored
    pub fn pop_direction(&mut self, key: KeyCode) {
        if let Some(direction) = self.controls.direction_for(key) {
            self.release_direction(direction);
        }
    }

    pub fn press_direction(&mut self, direction: Direction) {
        self.direction_stack.push(direction);
    }

    pub fn release_direction(&mut self, direction: Direction) {
        self.direction_stack.remove(direction);
    }

    /// Advance the player by one tick at game time `now`, `dt` seconds after
    /// the previous one
    pub fn update(&mut self, now: f32, dt: f32) {
        self.check_states();

        if let Some(direction) = self.direction_stack.top() {
            self.body.direction = direction;
        }

        self.adjust_frames(now);

        if self.action_state.can_move() {
            self.body.step(self.direction_stack.top(), dt);
        } else {
            self.weapon.attack(&self.body, now);
        }

        self.body.commit();
        self.shadow.follow(&self.body.rect);
    }

    fn check_states(&mut self) {
        if self.action_state.is_attacking() && !self.weapon.is_attacking() {
            self.action_state = ActionState::Normal;
            self.redraw = true;
            debug!("Attack finished");
        }

        if self.hit {
            let clip = self.animations.get(true, self.action_state, self.body.direction);
            if clip.is_done() {
                self.animations.reset_flashing();
                self.hit = false;
                debug!("Hit flash finished");
            }
            self.redraw = true;
        }
    }

    fn adjust_frames(&mut self, now: f32) {
        if self.direction_stack.is_empty() && !self.hit && !self.redraw {
            return;
        }

        let clip = self
            .animations
            .get_mut(self.hit, self.action_state, self.body.direction);
        self.image = Arc::clone(clip.get_next_frame(now));
        self.redraw = false;
    }

    /// Undo this tick's movement after running into something solid
    pub fn collide_with_solid(&mut self) {
        self.body.roll_back();
        self.shadow.follow(&self.body.rect);
    }

    /// Take `damage` unless still flashing from an earlier hit
    pub fn got_hit(&mut self, damage: i32) {
        if self.hit {
            return;
        }

        self.health = (self.health - damage).max(0);
        self.hit = true;
        self.redraw = true;
        info!("Player hit for {} damage, health now {}", damage, self.health);
    }

    /// Try to start an attack at game time `now`
    pub fn attack(&mut self, now: f32) {
        if self.action_state.is_attacking() {
            return;
        }

        if self.weapon.start_attack(now) {
            self.action_state = ActionState::Attack;
            self.redraw = true;
            debug!("Attack started facing {}", self.body.direction);
        }
    }

    /// Draw the shadow, attack effects and the current frame
    pub fn draw(&self, surface: &mut dyn Surface) {
        self.shadow.draw(surface);
        if self.action_state.is_attacking() {
            self.weapon.draw_attack(surface, self.body.direction);
        }
        surface.blit(&self.image, self.body.rect.x, self.body.rect.y);
    }

    /// Check for a pixel overlap with another mask placed at `other_rect`
    pub fn overlaps(&self, other: &CollisionMask, other_rect: &Rect) -> bool {
        let offset = (other_rect.x - self.body.rect.x, other_rect.y - self.body.rect.y);
        self.mask.overlaps(other, offset)
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn rect(&self) -> Rect {
        self.body.rect
    }

    pub fn direction(&self) -> Direction {
        self.body.direction
    }

    pub fn held_directions(&self) -> &DirectionStack {
        &self.direction_stack
    }

    pub fn action_state(&self) -> ActionState {
        self.action_state
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn mask(&self) -> &CollisionMask {
        &self.mask
    }

    pub fn shadow(&self) -> &Shadow {
        &self.shadow
    }
}
