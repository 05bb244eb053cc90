// Software drawing surface backed by an RGBA image

use image::{ImageResult, Rgba, RgbaImage};
use std::path::Path;
use std::sync::Arc;

/// Shared, immutable sprite image
pub type Image = Arc<RgbaImage>;

/// Fully transparent pixel
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A target that sprites can be blitted onto
pub trait Surface {
    /// Draw `image` with its top-left corner at (x, y)
    ///
    /// Fully transparent source pixels never touch the target, opaque ones
    /// replace it and anything in between is alpha-blended.
    fn blit(&mut self, image: &RgbaImage, x: i32, y: i32);
}

/// An owned RGBA drawing surface
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// Create a fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, TRANSPARENT)
    }

    /// Create a canvas filled with a single color
    pub fn filled(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, color),
        }
    }

    /// Overwrite every pixel with `color`
    pub fn fill(&mut self, color: Rgba<u8>) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = color;
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Get a single pixel
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    /// Borrow the underlying image
    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Mutably borrow the underlying image
    pub fn as_image_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    /// Consume the canvas, keeping its pixels
    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Write the canvas to disk (format picked from the extension)
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.pixels.save(path)
    }
}

impl From<RgbaImage> for Canvas {
    fn from(pixels: RgbaImage) -> Self {
        Self { pixels }
    }
}

impl Surface for Canvas {
    fn blit(&mut self, image: &RgbaImage, x: i32, y: i32) {
        let (width, height) = (self.width() as i64, self.height() as i64);

        for (src_x, src_y, src) in image.enumerate_pixels() {
            let dst_x = x as i64 + src_x as i64;
            let dst_y = y as i64 + src_y as i64;
            if dst_x < 0 || dst_y < 0 || dst_x >= width || dst_y >= height {
                continue;
            }

            let dst = self.pixels.get_pixel_mut(dst_x as u32, dst_y as u32);
            match src[3] {
                0 => {}
                255 => *dst = *src,
                _ => *dst = blend_over(*dst, *src),
            }
        }
    }
}

/// Porter-Duff "source over destination" in integer math
fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let src_a = u32::from(src[3]);
    let dst_a = u32::from(dst[3]) * (255 - src_a);
    let out_a = src_a * 255 + dst_a;
    if out_a == 0 {
        return TRANSPARENT;
    }

    let mut out = [0u8; 4];
    for (channel, value) in out.iter_mut().take(3).enumerate() {
        let mixed = u32::from(src[channel]) * src_a * 255 + u32::from(dst[channel]) * dst_a;
        *value = (mixed / out_a) as u8;
    }
    out[3] = (out_a / 255) as u8;
    Rgba(out)
}
