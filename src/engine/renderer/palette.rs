// Color quantization and channel transforms used for sprite recoloring

use crate::core::math::add_clamped;
use image::Rgb;

/// One of the three color channels of an RGB pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Index of this channel inside an `Rgb`/`Rgba` pixel
    pub fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

/// Uniform per-channel quantizer
///
/// Stands in for an indexed palette: every channel snaps to the nearest of
/// `levels` evenly spaced values between 0 and 255, so the whole image ends
/// up with at most `levels³` distinct colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posterize {
    levels: u8,
}

impl Posterize {
    /// Create a quantizer with `levels` steps per channel (at least 2)
    pub const fn new(levels: u8) -> Self {
        Self {
            levels: if levels < 2 { 2 } else { levels },
        }
    }

    /// Distance between two neighbouring levels
    pub fn step(&self) -> u16 {
        255 / u16::from(self.levels - 1)
    }

    /// Number of palette entries this quantizer can produce
    pub fn palette_size(&self) -> usize {
        usize::from(self.levels).pow(3)
    }

    /// Snap a single channel value to the nearest level
    pub fn quantize_channel(&self, value: u8) -> u8 {
        let step = self.step();
        let level = (u16::from(value) + step / 2) / step;
        (level * step).min(255) as u8
    }

    /// Snap every channel of a color
    pub fn quantize(&self, color: Rgb<u8>) -> Rgb<u8> {
        Rgb(color.0.map(|value| self.quantize_channel(value)))
    }
}

/// Additive boost of a single channel, clamped to a ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelBoost {
    pub channel: Channel,
    pub amount: u8,
    pub ceiling: u8,
}

impl ChannelBoost {
    pub const fn new(channel: Channel, amount: u8, ceiling: u8) -> Self {
        Self {
            channel,
            amount,
            ceiling,
        }
    }

    /// Apply the boost to a color, leaving the other channels untouched
    pub fn apply(&self, color: Rgb<u8>) -> Rgb<u8> {
        let mut boosted = color;
        let index = self.channel.index();
        boosted.0[index] = add_clamped(color.0[index], self.amount, self.ceiling);
        boosted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_indices() {
        assert_eq!(Channel::Red.index(), 0);
        assert_eq!(Channel::Green.index(), 1);
        assert_eq!(Channel::Blue.index(), 2);
    }

    #[test]
    fn test_four_level_quantizer() {
        let palette = Posterize::new(4);
        assert_eq!(palette.step(), 85);
        assert_eq!(palette.palette_size(), 64);
        assert_eq!(palette.quantize_channel(0), 0);
        assert_eq!(palette.quantize_channel(40), 0);
        assert_eq!(palette.quantize_channel(43), 85);
        assert_eq!(palette.quantize_channel(85), 85);
        assert_eq!(palette.quantize_channel(200), 170);
        assert_eq!(palette.quantize_channel(255), 255);
    }

    #[test]
    fn test_quantize_keeps_palette_colors() {
        let palette = Posterize::new(4);
        let backdrop = Rgb([85, 0, 85]);
        assert_eq!(palette.quantize(backdrop), backdrop);
    }

    #[test]
    fn test_degenerate_level_count() {
        let palette = Posterize::new(0);
        assert_eq!(palette.quantize_channel(100), 0);
        assert_eq!(palette.quantize_channel(200), 255);
    }

    #[test]
    fn test_boost_single_channel() {
        let boost = ChannelBoost::new(Channel::Red, 150, 255);
        assert_eq!(boost.apply(Rgb([85, 0, 85])), Rgb([235, 0, 85]));
        assert_eq!(boost.apply(Rgb([170, 170, 170])), Rgb([255, 170, 170]));
    }

    #[test]
    fn test_boost_respects_ceiling() {
        let boost = ChannelBoost::new(Channel::Blue, 150, 200);
        assert_eq!(boost.apply(Rgb([0, 0, 85])), Rgb([0, 0, 200]));
    }
}
