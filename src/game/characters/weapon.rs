// Weapons: the attack half of an equipped weapon

use super::player::Body;
use crate::core::Rect;
use crate::engine::input::{Direction, DirectionMap};
use crate::engine::renderer::{Canvas, Image, Surface};
use image::{Rgba, RgbaImage};
use log::debug;
use std::fmt;
use std::sync::Arc;

/// Attack behavior of the equipped weapon
///
/// The player only decides *when* to attack; timing, hit detection and
/// effects belong to the weapon.
pub trait Weapon: fmt::Debug {
    /// Ask to begin an attack at game time `now`
    /// Returns true if the weapon accepted (not mid-swing, off cooldown)
    fn start_attack(&mut self, now: f32) -> bool;

    /// Check if an attack is in progress
    fn is_attacking(&self) -> bool;

    /// Advance the current attack by one tick
    fn attack(&mut self, body: &Body, now: f32);

    /// Draw attack effects (swings, projectiles) for the current attack
    fn draw_attack(&self, surface: &mut dyn Surface, direction: Direction);
}

/// A timed stab that shows an effect sprite ahead of its wielder
#[derive(Debug, Clone)]
pub struct Thrust {
    /// Seconds an attack lasts
    duration: f32,
    /// Seconds after an attack before the next may start
    cooldown: f32,
    /// Per-direction effect sprite and how far ahead of the body it sits
    effects: Option<(DirectionMap<Image>, f32)>,
    /// When the current attack ends
    ends_at: Option<f32>,
    ready_at: f32,
    /// Unset until the current attack has been advanced once
    effect_origin: Option<(i32, i32)>,
}

impl Thrust {
    /// Create a thrust without any effect sprite
    pub fn new(duration: f32, cooldown: f32) -> Self {
        Self {
            duration,
            cooldown,
            effects: None,
            ends_at: None,
            ready_at: f32::NEG_INFINITY,
            effect_origin: None,
        }
    }

    /// Draw `effects` `reach` pixels ahead of the body while attacking
    pub fn with_effects(mut self, effects: DirectionMap<Image>, reach: f32) -> Self {
        self.effects = Some((effects, reach));
        self
    }

    /// The stock pitchfork stab, drawn for cells of `cell` pixels
    pub fn pitchfork(cell: (u32, u32)) -> Self {
        let (width, height) = (cell.0 as i32, cell.1 as i32);
        let shaft_length = cell.1.saturating_sub(6);
        let shaft_width = cell.0.saturating_sub(6);
        let wood = Rgba([140, 95, 50, 255]);
        let steel = Rgba([150, 155, 165, 255]);

        let effects = DirectionMap::from_fn(|direction| {
            let (shaft, prongs) = match direction {
                Direction::Front => (
                    Rect::new(width / 2 - 1, 0, 3, shaft_length),
                    Rect::new(width / 2 - 4, height - 6, 9, 6),
                ),
                Direction::Back => (
                    Rect::new(width / 2 - 1, 6, 3, shaft_length),
                    Rect::new(width / 2 - 4, 0, 9, 6),
                ),
                Direction::Left => (
                    Rect::new(6, height / 2 - 1, shaft_width, 3),
                    Rect::new(0, height / 2 - 4, 6, 9),
                ),
                Direction::Right => (
                    Rect::new(0, height / 2 - 1, shaft_width, 3),
                    Rect::new(width - 6, height / 2 - 4, 6, 9),
                ),
            };
            let mut canvas = Canvas::new(cell.0, cell.1);
            for (color, rect) in [(wood, shaft), (steel, prongs)] {
                canvas.blit(&RgbaImage::from_pixel(rect.width, rect.height, color), rect.x, rect.y);
            }
            Arc::new(canvas.into_image())
        });

        Self::new(0.3, 0.2).with_effects(effects, width as f32 * 0.6)
    }

    /// Where the effect sprite is drawn this tick
    pub fn effect_origin(&self) -> Option<(i32, i32)> {
        self.effect_origin
    }
}

impl Weapon for Thrust {
    fn start_attack(&mut self, now: f32) -> bool {
        if self.ends_at.is_some() || now < self.ready_at {
            return false;
        }
        self.ends_at = Some(now + self.duration);
        self.effect_origin = None;
        debug!("Thrust started at {:.3}s", now);
        true
    }

    fn is_attacking(&self) -> bool {
        self.ends_at.is_some()
    }

    fn attack(&mut self, body: &Body, now: f32) {
        let Some(ends_at) = self.ends_at else {
            return;
        };

        let reach = self.effects.as_ref().map_or(0.0, |(_, reach)| *reach);
        let offset = body.direction().vector() * reach;
        let rect = body.rect();
        self.effect_origin = Some((rect.x + offset.x as i32, rect.y + offset.y as i32));

        if now >= ends_at {
            self.ends_at = None;
            self.ready_at = now + self.cooldown;
            debug!("Thrust finished, ready again at {:.3}s", self.ready_at);
        }
    }

    fn draw_attack(&self, surface: &mut dyn Surface, direction: Direction) {
        if !self.is_attacking() {
            return;
        }
        if let (Some((effects, _)), Some((x, y))) = (&self.effects, self.effect_origin) {
            surface.blit(&effects[direction], x, y);
        }
    }
}
