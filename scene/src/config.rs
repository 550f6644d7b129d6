//! # Configuration
//!
//! Values a scene is built from. Every section has defaults, so a TOML file
//! only needs to name what it changes.

use std::path::Path;
use render::{V2f, V2i};
use serde::{Deserialize, Serialize};
use crate::error::SceneError;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: i32,
    pub height: i32,
}

impl Extent {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_positive(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl From<Extent> for V2i {
    fn from(e: Extent) -> Self {
        V2i::new(e.width, e.height)
    }
}

impl From<Extent> for V2f {
    fn from(e: Extent) -> Self {
        V2f::new(e.width as f32, e.height as f32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<Point> for V2f {
    fn from(p: Point) -> Self {
        V2f::new(p.x, p.y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Gap kept between the viewport edges and the world edges.
    pub margin: f32,
    /// Exclusive lower zoom bound.
    pub min_zoom: i32,
    /// Exclusive upper zoom bound.
    pub max_zoom: i32,
    /// Scale factor per zoom step; `zoom_base.powi(zoom)` is the applied scale.
    pub zoom_base: f32,
    /// Initial rotation in degrees.
    pub rotation: i32,
    pub allow_out_of_bounds: bool,
    /// Size of the camera's focus box.
    pub focus_box: Extent,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            margin: 0.0,
            min_zoom: crate::viewport::MIN_ZOOM,
            max_zoom: crate::viewport::MAX_ZOOM,
            zoom_base: crate::viewport::ZOOM_BASE,
            rotation: 0,
            allow_out_of_bounds: false,
            focus_box: crate::viewport::DEFAULT_FOCUS_BOX,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    /// 10.0 is very intense, 1.0 barely visible.
    pub max_intensity: f32,
    /// Fixed update rate the shake decay is timed against.
    pub frame_rate: f32,
    pub seed: u64,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            max_intensity: crate::shaker::DEFAULT_MAX_INTENSITY,
            frame_rate: crate::shaker::DEFAULT_FRAME_RATE,
            seed: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    pub auto_scaling: bool,
    pub debug: bool,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self { auto_scaling: true, debug: false }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub view: Extent,
    pub world: Extent,
    /// Initial viewport centre and camera focus point, in world space.
    pub focus: Point,
    /// Border added around the world when no viewport is needed.
    pub auto_padding: f32,
    pub viewport: ViewportConfig,
    pub shake: ShakeConfig,
    pub screen: LayerConfig,
    pub overlay: LayerConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            view: Extent::new(320, 240),
            world: Extent::new(420, 420),
            focus: Point { x: 160.0, y: 120.0 },
            auto_padding: crate::screen::AUTO_PADDING,
            viewport: ViewportConfig::default(),
            shake: ShakeConfig::default(),
            screen: LayerConfig::default(),
            overlay: LayerConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, SceneError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        let fail = |msg: String| Err(SceneError::Configuration(msg));
        if !self.view.is_positive() {
            return fail(format!("view size must be positive, got {:?}", self.view));
        }
        if !self.world.is_positive() {
            return fail(format!("world size must be positive, got {:?}", self.world));
        }
        if !self.viewport.focus_box.is_positive() {
            return fail(format!("focus box must be positive, got {:?}", self.viewport.focus_box));
        }
        if !(self.viewport.min_zoom < 0 && 0 < self.viewport.max_zoom) {
            return fail(format!(
                "zoom bounds must contain the default level 0: ({}, {})",
                self.viewport.min_zoom, self.viewport.max_zoom,
            ));
        }
        if !(self.viewport.zoom_base > 0.0) {
            return fail(format!("zoom base must be positive, got {}", self.viewport.zoom_base));
        }
        if !(self.shake.frame_rate > 0.0) {
            return fail(format!("frame rate must be positive, got {}", self.shake.frame_rate));
        }
        if self.auto_padding < 0.0 {
            return fail(format!("auto padding must not be negative, got {}", self.auto_padding));
        }
        Ok(())
    }
}
