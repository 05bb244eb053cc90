// Per-pixel collision masks

use crate::core::Rect;
use image::RgbaImage;

/// Alpha values above this count as solid
const ALPHA_THRESHOLD: u8 = 127;

/// Bit mask of solid pixels used for pixel-perfect hit tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl CollisionMask {
    /// Create an empty mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// Build a mask from the alpha channel of an image
    pub fn from_image(image: &RgbaImage) -> Self {
        let mut mask = Self::new(image.width(), image.height());
        for (x, y, pixel) in image.enumerate_pixels() {
            if pixel[3] > ALPHA_THRESHOLD {
                mask.set(x, y, true);
            }
        }
        mask
    }

    /// Build a mask whose only solid area is `solid`, clipped to the mask size
    pub fn from_rect(width: u32, height: u32, solid: Rect) -> Self {
        let mut mask = Self::new(width, height);
        let x_range = solid.x.max(0)..solid.right().min(width as i32);
        for y in solid.y.max(0)..solid.bottom().min(height as i32) {
            for x in x_range.clone() {
                mask.set(x as u32, y as u32, true);
            }
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check a single pixel; out-of-range coordinates are empty
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, solid: bool) {
        if x < self.width && y < self.height {
            self.bits[(y * self.width + x) as usize] = solid;
        }
    }

    /// Number of solid pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|solid| **solid).count()
    }

    /// Check whether `other`, placed at `offset` relative to this mask, shares
    /// any solid pixel with it
    pub fn overlaps(&self, other: &CollisionMask, offset: (i32, i32)) -> bool {
        let (dx, dy) = offset;
        let x_start = dx.max(0);
        let x_end = (dx + other.width as i32).min(self.width as i32);
        let y_start = dy.max(0);
        let y_end = (dy + other.height as i32).min(self.height as i32);

        (y_start..y_end).any(|y| {
            (x_start..x_end).any(|x| self.get(x, y) && other.get(x - dx, y - dy))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_from_rect() {
        let mask = CollisionMask::from_rect(50, 50, Rect::new(10, 20, 30, 30));
        assert_eq!(mask.count(), 30 * 30);
        assert!(mask.get(10, 20));
        assert!(mask.get(39, 49));
        assert!(!mask.get(9, 20));
        assert!(!mask.get(40, 20));
    }

    #[test]
    fn test_from_rect_clips() {
        let mask = CollisionMask::from_rect(10, 10, Rect::new(-5, 5, 10, 10));
        assert_eq!(mask.count(), 5 * 5);
    }

    #[test]
    fn test_from_image_uses_alpha() {
        let mut image = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 0]));
        image.put_pixel(1, 2, Rgba([0, 0, 0, 255]));
        image.put_pixel(2, 2, Rgba([0, 0, 0, 100]));
        let mask = CollisionMask::from_image(&image);
        assert_eq!(mask.count(), 1);
        assert!(mask.get(1, 2));
    }

    #[test]
    fn test_overlaps() {
        let a = CollisionMask::from_rect(10, 10, Rect::new(0, 0, 5, 5));
        let b = CollisionMask::from_rect(10, 10, Rect::new(0, 0, 5, 5));
        assert!(a.overlaps(&b, (4, 4)));
        assert!(!a.overlaps(&b, (5, 0)));
        assert!(a.overlaps(&b, (-4, -4)));
        assert!(!a.overlaps(&b, (20, 20)));
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let mask = CollisionMask::from_rect(4, 4, Rect::new(0, 0, 4, 4));
        assert!(!mask.get(-1, 0));
        assert!(!mask.get(0, 4));
    }
}
