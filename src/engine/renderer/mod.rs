// Software rendering
//
// Everything is drawn on the CPU into RGBA images:
// - `canvas`: blit target with transparent-pixel-aware layering
// - `palette`: channel quantization and boosts used for recoloring
// - `mask`: per-pixel collision masks built from image alpha
// - `screen`: shows a finished canvas in the window via wgpu

pub mod canvas;
pub mod mask;
pub mod palette;
pub mod screen;

pub use canvas::{Canvas, Image, Surface};
pub use mask::CollisionMask;
pub use palette::{Channel, ChannelBoost, Posterize};
pub use screen::Screen;
