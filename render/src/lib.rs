//! Software rendering backend: pixel surfaces, colours, 2D affine
//! transforms and text rasterisation.

pub mod geom;
pub mod bitmap;
pub mod color;
pub mod debug_font;
pub mod error;
pub mod file;
pub mod surface;
pub mod text;

pub use bitmap::Bitmap;
pub use color::Color;
pub use error::RenderError;
pub use geom::{
    aabb::Aabb,
    affine::Affine,
    vector::{V2, V2f, V2i},
};
pub use surface::Surface;
pub use text::FontBitmaps;
