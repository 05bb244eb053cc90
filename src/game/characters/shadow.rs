// Drop shadow under a character

use crate::core::Rect;
use crate::engine::renderer::{Image, Surface};
use image::{Rgba, RgbaImage};
use std::sync::Arc;

const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 90]);

/// A soft ellipse kept under its owner's feet
#[derive(Debug, Clone)]
pub struct Shadow {
    rect: Rect,
    image: Image,
}

impl Shadow {
    /// Create a shadow of `size` pixels under `anchor`
    pub fn new(size: (u32, u32), anchor: &Rect) -> Self {
        let mut shadow = Self {
            rect: Rect::new(0, 0, size.0, size.1),
            image: Arc::new(ellipse(size)),
        };
        shadow.follow(anchor);
        shadow
    }

    /// Re-center under the bottom edge of `anchor`
    pub fn follow(&mut self, anchor: &Rect) {
        let (x, bottom) = anchor.midbottom();
        self.rect.x = x - (self.rect.width / 2) as i32;
        self.rect.y = bottom - self.rect.height as i32;
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.blit(&self.image, self.rect.x, self.rect.y);
    }
}

fn ellipse((width, height): (u32, u32)) -> RgbaImage {
    let (rx, ry) = (width as f32 / 2.0, height as f32 / 2.0);
    RgbaImage::from_fn(width, height, |x, y| {
        let dx = (x as f32 + 0.5 - rx) / rx;
        let dy = (y as f32 + 0.5 - ry) / ry;
        if dx * dx + dy * dy <= 1.0 {
            SHADOW_COLOR
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::Canvas;

    #[test]
    fn test_shadow_sits_under_anchor() {
        let shadow = Shadow::new((40, 20), &Rect::new(100, 100, 50, 50));
        assert_eq!(shadow.rect(), Rect::new(105, 130, 40, 20));
    }

    #[test]
    fn test_follow() {
        let mut shadow = Shadow::new((40, 20), &Rect::new(0, 0, 50, 50));
        shadow.follow(&Rect::new(10, 20, 50, 50));
        assert_eq!(shadow.rect().midbottom(), (35, 70));
        assert_eq!(shadow.rect(), Rect::new(15, 50, 40, 20));
    }

    #[test]
    fn test_ellipse_shape() {
        let image = ellipse((40, 20));
        assert_eq!(image.get_pixel(20, 10)[3], 90);
        assert_eq!(image.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_draw() {
        let shadow = Shadow::new((40, 20), &Rect::new(0, 0, 50, 50));
        let mut canvas = Canvas::new(60, 60);
        shadow.draw(&mut canvas);
        assert!(canvas.pixel(25, 40)[3] > 0);
    }
}
