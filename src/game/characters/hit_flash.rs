// Strobing red/blue variants of composited animations, shown while hurt

use super::animation::{AnimationClip, DirectionalClips};
use super::stats::AnimationSettings;
use crate::engine::renderer::{Canvas, Channel, ChannelBoost, Posterize, Surface};
use image::{Rgb, Rgba, RgbaImage};
use std::sync::Arc;

/// Painted under every frame before recoloring; after the boost it turns
/// into exactly the tint's color key, so empty cell space stays transparent
pub const BACKDROP: Rgb<u8> = Rgb([85, 0, 85]);

/// Four levels per channel: 0, 85, 170, 255
pub const FLASH_PALETTE: Posterize = Posterize::new(4);

/// How one frame of the strobe is recolored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashTint {
    pub boost: ChannelBoost,
    /// Color made fully transparent after the boost
    pub color_key: Rgb<u8>,
}

/// Even frames
pub const RED_TINT: FlashTint = FlashTint {
    boost: ChannelBoost::new(Channel::Red, 150, 255),
    color_key: Rgb([235, 0, 85]),
};

/// Odd frames
pub const BLUE_TINT: FlashTint = FlashTint {
    boost: ChannelBoost::new(Channel::Blue, 150, 255),
    color_key: Rgb([85, 0, 235]),
};

impl FlashTint {
    /// Recolor a single opaque pixel
    pub fn apply(&self, palette: &Posterize, color: Rgb<u8>) -> Rgba<u8> {
        let tinted = self.boost.apply(palette.quantize(color));
        let alpha = if tinted == self.color_key { 0 } else { 255 };
        Rgba([tinted[0], tinted[1], tinted[2], alpha])
    }
}

/// Derives the finite hit-flash clips from composited ones
#[derive(Debug, Clone)]
pub struct HitFlash {
    backdrop: Rgb<u8>,
    palette: Posterize,
    /// Cycled by frame index
    tints: [FlashTint; 2],
    fps: f32,
    loops: u32,
}

impl HitFlash {
    pub fn new(fps: f32, loops: u32) -> Self {
        Self {
            backdrop: BACKDROP,
            palette: FLASH_PALETTE,
            tints: [RED_TINT, BLUE_TINT],
            fps,
            loops,
        }
    }

    /// Generator using the hit rate and loop budget from `settings`
    pub fn from_settings(settings: &AnimationSettings) -> Self {
        Self::new(settings.hit_fps, settings.hit_loops)
    }

    /// Tint used for a frame index
    pub fn tint(&self, frame: usize) -> &FlashTint {
        &self.tints[frame % self.tints.len()]
    }

    /// Build the strobing counterpart of a clip
    pub fn flash(&self, clip: &AnimationClip) -> AnimationClip {
        let frames = clip
            .frames()
            .iter()
            .enumerate()
            .map(|(index, frame)| Arc::new(self.flash_frame(frame, index)))
            .collect();
        AnimationClip::finite(frames, self.fps, self.loops)
    }

    /// Flash every direction of a clip set
    pub fn flash_all(&self, clips: &DirectionalClips) -> DirectionalClips {
        clips.map(|_, clip| self.flash(clip))
    }

    /// Recolor one frame
    pub fn flash_frame(&self, frame: &RgbaImage, index: usize) -> RgbaImage {
        let [r, g, b] = self.backdrop.0;
        let mut canvas = Canvas::filled(frame.width(), frame.height(), Rgba([r, g, b, 255]));
        canvas.blit(frame, 0, 0);

        let tint = self.tint(index);
        let mut image = canvas.into_image();
        for pixel in image.pixels_mut() {
            *pixel = tint.apply(&self.palette, Rgb([pixel[0], pixel[1], pixel[2]]));
        }
        image
    }
}
