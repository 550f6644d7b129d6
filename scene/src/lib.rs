//! Camera-follow, viewport and layered screen composition for 2D games.
//!
//! A [`Viewport`] looks at part of a larger world and is steered by its
//! [`Camera`]. A [`Screen`] holds the world image and renders the visible
//! part, shaken by its [`Shaker`]; an [`Overlay`] is composited on top.

pub mod camera;
pub mod config;
pub mod error;
pub mod layer;
pub mod overlay;
pub mod screen;
pub mod shaker;
pub mod viewport;

#[cfg(test)]
mod recorder;

pub use camera::{Camera, Mover, PositionSource};
pub use config::SceneConfig;
pub use error::SceneError;
pub use layer::Layer;
pub use overlay::Overlay;
pub use screen::Screen;
pub use shaker::Shaker;
pub use viewport::Viewport;
