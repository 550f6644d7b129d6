//! # Viewport
//!
//! The window into the world. Holds position, zoom and rotation, keeps
//! itself inside the world unless told otherwise, and owns the [`Camera`]
//! that drives it.

use std::fmt;
use render::{Affine, V2f};
use tracing::{debug, warn};
use crate::{
    camera::{Camera, Mover, PositionSource},
    config::{Extent, SceneConfig},
    error::SceneError,
};

/// Exclusive lower zoom bound.
pub const MIN_ZOOM: i32 = -200;
/// Exclusive upper zoom bound.
pub const MAX_ZOOM: i32 = 200;
pub const ZOOM_BASE: f32 = 1.01;
pub const DEFAULT_FOCUS_BOX: Extent = Extent::new(60, 60);

/// Positional part of the viewport. The camera moves it through [`Mover`].
#[derive(Clone, Debug)]
struct Frame {
    position: V2f,
    view_size: V2f,
    world_size: V2f,
    margin: f32,
    allow_out_of_bounds: bool,
}

impl Frame {
    /// Correction that brings the frame back inside the world minus margins.
    /// The far edge wins when the view does not fit.
    fn out_of_bounds(&self) -> V2f {
        let near = self.position;
        let far = self.position + self.view_size;
        let limit = self.world_size - V2f::diag(self.margin);
        let mut delta = V2f::ZERO;

        if near.x < self.margin {
            delta.x = self.margin - near.x;
        }
        if far.x > limit.x {
            delta.x = limit.x - far.x;
        }
        if near.y < self.margin {
            delta.y = self.margin - near.y;
        }
        if far.y > limit.y {
            delta.y = limit.y - far.y;
        }

        delta
    }

    fn clamp(&mut self) {
        if self.allow_out_of_bounds {
            return;
        }
        let delta = self.out_of_bounds();
        if delta != V2f::ZERO {
            debug!(position = %self.position, %delta, "viewport pulled back inside world");
            self.position += delta;
        }
    }
}

impl Mover for Frame {
    fn move_by(&mut self, delta: V2f) {
        self.position += delta;
        self.clamp();
    }
}

#[derive(Clone, Debug)]
pub struct Viewport {
    frame: Frame,
    initial_position: V2f,
    zoom: i32,
    rotation: i32,
    min_zoom: i32,
    max_zoom: i32,
    zoom_base: f32,
    camera: Camera,
}

impl Viewport {
    /// Viewport of `view_size` centred on `center` inside a world of
    /// `world_size`, with default zoom limits and focus box.
    pub fn new(view_size: V2f, world_size: V2f, center: V2f) -> Result<Self, SceneError> {
        Self::build(view_size, world_size, center, DEFAULT_FOCUS_BOX.into(), 0.0, false)
    }

    /// The bounds policy and margin are in place before the first clamp, and
    /// the camera starts on the centre the viewport ended up with.
    fn build(
        view_size: V2f,
        world_size: V2f,
        center: V2f,
        focus_size: V2f,
        margin: f32,
        allow_out_of_bounds: bool,
    ) -> Result<Self, SceneError> {
        let positive = |v: V2f| v.x > 0.0 && v.y > 0.0;
        if !positive(view_size) || !positive(world_size) {
            return Err(SceneError::Configuration(format!(
                "viewport needs positive sizes, got view {} and world {}",
                view_size, world_size,
            )));
        }

        let position = center - view_size * 0.5;
        let mut frame = Frame {
            position,
            view_size,
            world_size,
            margin,
            allow_out_of_bounds,
        };
        frame.clamp();

        let mut camera = Camera::new(world_size, focus_size, frame.position + view_size * 0.5);
        camera.allow_overflow(allow_out_of_bounds);

        let viewport = Self {
            initial_position: frame.position,
            frame,
            zoom: 0,
            rotation: 0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_base: ZOOM_BASE,
            camera,
        };
        debug!(%viewport, "viewport created");
        Ok(viewport)
    }

    pub fn from_config(config: &SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;
        let vp = &config.viewport;
        let mut viewport = Self::build(
            config.view.into(),
            config.world.into(),
            config.focus.into(),
            vp.focus_box.into(),
            vp.margin,
            vp.allow_out_of_bounds,
        )?;
        viewport.min_zoom = vp.min_zoom;
        viewport.max_zoom = vp.max_zoom;
        viewport.zoom_base = vp.zoom_base;
        viewport.rotation = vp.rotation;
        Ok(viewport)
    }

    pub fn position(&self) -> V2f { self.frame.position }
    pub fn initial_position(&self) -> V2f { self.initial_position }
    pub fn view_size(&self) -> V2f { self.frame.view_size }
    pub fn world_size(&self) -> V2f { self.frame.world_size }
    pub fn margin(&self) -> f32 { self.frame.margin }
    pub fn zoom(&self) -> i32 { self.zoom }
    pub fn zoom_limits(&self) -> (i32, i32) { (self.min_zoom, self.max_zoom) }
    /// Degrees.
    pub fn rotation(&self) -> i32 { self.rotation }
    pub fn camera(&self) -> &Camera { &self.camera }

    pub fn center(&self) -> V2f {
        self.frame.position + self.frame.view_size * 0.5
    }

    pub fn world_center(&self) -> V2f {
        self.frame.world_size * 0.5
    }

    /// Scale factor the current zoom level applies.
    pub fn scale(&self) -> f32 {
        self.zoom_base.powi(self.zoom)
    }

    pub fn allows_out_of_bounds(&self) -> bool {
        self.frame.allow_out_of_bounds
    }

    /// Also tells the camera. Disabling pulls the viewport back immediately.
    pub fn set_allow_out_of_bounds(&mut self, allowed: bool) {
        self.frame.allow_out_of_bounds = allowed;
        self.camera.allow_overflow(allowed);
        self.frame.clamp();
    }

    pub fn set_margin(&mut self, margin: f32) {
        self.frame.margin = margin;
        self.frame.clamp();
    }

    pub fn out_of_bounds(&self) -> V2f {
        self.frame.out_of_bounds()
    }

    pub fn move_by(&mut self, delta: V2f) {
        self.frame.move_by(delta);
    }

    pub fn move_to(&mut self, position: V2f) {
        self.frame.position = position;
        self.frame.clamp();
    }

    /// Levels outside the exclusive zoom limits are ignored.
    pub fn set_zoom(&mut self, zoom: i32) {
        if zoom > self.min_zoom && zoom < self.max_zoom {
            self.zoom = zoom;
        } else {
            debug!(zoom, min = self.min_zoom, max = self.max_zoom, "zoom level out of range, ignored");
        }
    }

    pub fn zoom_by(&mut self, step: i32) {
        self.set_zoom(self.zoom.saturating_add(step));
    }

    pub fn set_rotation(&mut self, degrees: i32) {
        self.rotation = degrees;
    }

    pub fn rotate_by(&mut self, degrees: i32) {
        self.rotation = self.rotation.wrapping_add(degrees);
    }

    /// World-to-view transform: zoom and rotation about the viewport centre,
    /// then the shift that puts the viewport's top left at the origin.
    pub fn matrix(&self) -> Affine {
        let center = self.center();
        let scale = self.scale();

        let mut m = Affine::translation(-center.x, -center.y);
        m.scale(scale, scale);
        m.rotate((self.rotation as f32).to_radians());
        m.translate(center.x, center.y);
        m.translate(-self.frame.position.x, -self.frame.position.y);
        m
    }

    pub fn world_to_screen(&self, p: V2f) -> V2f {
        self.matrix().apply(p)
    }

    /// [`V2f::NAN`] when the transform cannot be inverted.
    pub fn screen_to_world(&self, p: V2f) -> V2f {
        match self.matrix().inverse() {
            Some(inv) => inv.apply(p),
            None => {
                warn!(zoom = self.zoom, rotation = self.rotation, "viewport transform is singular");
                V2f::NAN
            },
        }
    }

    /// Shift that maps world coordinates to the viewport's local space.
    pub fn offsets(&self) -> V2f {
        self.frame.position
    }

    pub fn offset_matrix(&self) -> Affine {
        let off = self.offsets();
        Affine::translation(off.x, off.y)
    }

    /// Back to the initial position with zoom and rotation cleared.
    pub fn reset(&mut self) {
        self.frame.position = self.initial_position;
        self.zoom = 0;
        self.rotation = 0;
        self.frame.clamp();
        self.camera.reset(self.center());
    }

    /// Runs the camera against `target` and moves by whatever it decides.
    pub fn follow(&mut self, target: &(impl PositionSource + ?Sized)) -> V2f {
        let Self { camera, frame, .. } = self;
        camera.update(target.position(), frame)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "T: {}, R: {}deg, S: {}",
            self.frame.position, self.rotation, self.zoom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use utils::approx_eq;

    const EPS: f32 = 1e-3;

    fn viewport() -> Viewport {
        Viewport::new(V2f::new(320.0, 240.0), V2f::new(420.0, 420.0), V2f::new(160.0, 120.0)).unwrap()
    }

    fn assert_inside(vp: &Viewport) {
        let near = vp.position();
        let far = near + vp.view_size();
        let m = vp.margin();
        assert!(near.x >= m - EPS && near.y >= m - EPS, "{} below margin {}", near, m);
        assert!(far.x <= vp.world_size().x - m + EPS, "{} past world", far);
        assert!(far.y <= vp.world_size().y - m + EPS, "{} past world", far);
    }

    #[test]
    fn centred_on_construction() {
        let vp = viewport();
        assert_eq!(vp.position(), V2f::ZERO);
        assert_eq!(vp.center(), V2f::new(160.0, 120.0));
        assert_eq!(vp.world_center(), V2f::new(210.0, 210.0));
        assert_eq!(vp.camera().focus_point(), vp.center());
    }

    #[test]
    fn non_positive_sizes_are_rejected() {
        let err = Viewport::new(V2f::new(0.0, 240.0), V2f::new(420.0, 420.0), V2f::ZERO).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn disabling_out_of_bounds_clamps_immediately() {
        let mut vp = viewport();
        vp.set_allow_out_of_bounds(true);
        vp.move_by(V2f::new(-50.0, 0.0));
        assert_eq!(vp.position(), V2f::new(-50.0, 0.0));
        assert_eq!(vp.out_of_bounds(), V2f::new(50.0, 0.0));

        vp.set_allow_out_of_bounds(false);
        assert_eq!(vp.position(), V2f::ZERO);
        assert!(!vp.camera().overflow_allowed());
    }

    #[test]
    fn random_moves_stay_inside_world() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut vp = viewport();
        vp.set_margin(8.0);
        for _ in 0..1000 {
            let delta = V2f::new(rng.gen_range(-80.0..80.0), rng.gen_range(-80.0..80.0));
            if rng.gen_bool(0.2) {
                vp.move_to(vp.position() + delta * 3.0);
            } else {
                vp.move_by(delta);
            }
            assert_inside(&vp);
        }
    }

    #[test]
    fn view_larger_than_world_sticks_to_far_edge() {
        let mut vp = Viewport::new(V2f::new(500.0, 100.0), V2f::new(420.0, 420.0), V2f::ZERO).unwrap();
        vp.move_by(V2f::new(-30.0, 0.0));
        assert_eq!(vp.position().x, 420.0 - 500.0);
    }

    #[test]
    fn margin_change_reclamps() {
        let mut vp = viewport();
        vp.set_margin(10.0);
        assert_eq!(vp.position(), V2f::new(10.0, 10.0));
    }

    #[test]
    fn zoom_limits_are_exclusive() {
        let mut vp = viewport();
        vp.set_zoom(199);
        assert_eq!(vp.zoom(), 199);
        vp.zoom_by(1);
        assert_eq!(vp.zoom(), 199);
        vp.set_zoom(-200);
        assert_eq!(vp.zoom(), 199);
        vp.set_zoom(-199);
        assert_eq!(vp.zoom(), -199);
        vp.zoom_by(-1);
        assert_eq!(vp.zoom(), -199);
        vp.zoom_by(i32::MIN);
        assert_eq!(vp.zoom(), -199);
    }

    #[test]
    fn every_zoom_level_is_invertible() {
        let mut vp = viewport();
        for zoom in (MIN_ZOOM + 1)..MAX_ZOOM {
            vp.set_zoom(zoom);
            for &rotation in &[0, 45, 90, 180, 271] {
                vp.set_rotation(rotation);
                assert!(vp.matrix().is_invertible(), "zoom {} rotation {}", zoom, rotation);
            }
        }
    }

    #[test]
    fn screen_world_round_trip() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut vp = viewport();
        for _ in 0..500 {
            vp.set_zoom(rng.gen_range(-150..150));
            vp.set_rotation(rng.gen_range(-360..360));
            vp.move_to(V2f::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..180.0)));

            let p = V2f::new(rng.gen_range(0.0..320.0), rng.gen_range(0.0..240.0));
            let back = vp.world_to_screen(vp.screen_to_world(p));
            assert!(approx_eq(back.x, p.x, 0.05) && approx_eq(back.y, p.y, 0.05), "{} -> {}", p, back);
        }
    }

    #[test]
    fn matrix_is_pure_translation_without_zoom_or_rotation() {
        let mut vp = viewport();
        vp.move_by(V2f::new(30.0, 40.0));
        let m = vp.matrix();
        assert!(m.is_translation_only());
        assert_eq!(vp.world_to_screen(V2f::new(30.0, 40.0)), V2f::ZERO);
        assert_eq!(vp.screen_to_world(V2f::ZERO), V2f::new(30.0, 40.0));
        assert_eq!(vp.offsets(), V2f::new(30.0, 40.0));
    }

    #[test]
    fn zoom_keeps_centre_fixed() {
        let mut vp = viewport();
        vp.set_zoom(50);
        vp.set_rotation(30);
        let c = vp.center();
        let on_screen = vp.world_to_screen(c);
        assert!(approx_eq(on_screen.x, 160.0, EPS) && approx_eq(on_screen.y, 120.0, EPS));
    }

    #[test]
    fn follow_moves_viewport_with_camera() {
        let mut vp = viewport();
        let delta = vp.follow(&V2f::new(240.0, 120.0));
        assert_eq!(delta, V2f::new(50.0, 0.0));
        assert_eq!(vp.position(), V2f::new(50.0, 0.0));
        assert_eq!(vp.camera().focus_point(), V2f::new(210.0, 120.0));
    }

    #[test]
    fn follow_respects_world_edge() {
        let mut vp = viewport();
        for _ in 0..20 {
            vp.follow(&V2f::new(1000.0, 1000.0));
        }
        assert_eq!(vp.position(), V2f::new(100.0, 180.0));
        assert_inside(&vp);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut vp = viewport();
        vp.follow(&V2f::new(400.0, 400.0));
        vp.set_zoom(20);
        vp.rotate_by(15);
        vp.reset();
        assert_eq!(vp.position(), V2f::ZERO);
        assert_eq!((vp.zoom(), vp.rotation()), (0, 0));
        assert_eq!(vp.camera().focus_point(), V2f::new(160.0, 120.0));
    }

    #[test]
    fn display_shows_transform() {
        let mut vp = viewport();
        vp.move_by(V2f::new(5.0, 6.0));
        vp.set_rotation(90);
        vp.set_zoom(3);
        assert_eq!(vp.to_string(), "T: (5.00, 6.00), R: 90deg, S: 3");
    }

    #[test]
    fn config_builds_viewport() {
        let config = SceneConfig::from_toml_str(
            "[viewport]\nmargin = 4.0\nrotation = 10\nfocus_box = { width = 20, height = 10 }\n",
        )
        .unwrap();
        let vp = Viewport::from_config(&config).unwrap();
        assert_eq!(vp.position(), V2f::new(4.0, 4.0));
        assert_eq!(vp.rotation(), 10);
        assert_eq!(vp.camera().focus().1, V2f::new(20.0, 10.0));
        assert_eq!(vp.initial_position(), V2f::new(4.0, 4.0));
    }

    #[test]
    fn corner_focus_starts_camera_on_clamped_centre() {
        let mut vp = Viewport::new(V2f::new(320.0, 240.0), V2f::new(420.0, 420.0), V2f::ZERO).unwrap();
        assert_eq!(vp.position(), V2f::ZERO);
        assert_eq!(vp.camera().focus_point(), vp.center());

        vp.follow(&V2f::ZERO);
        assert_eq!(vp.position(), V2f::ZERO);
        vp.follow(&V2f::new(300.0, 200.0));
        assert!(vp.position().x <= 300.0 && 300.0 <= vp.position().x + 320.0);
        assert!(vp.position().y <= 200.0 && 200.0 <= vp.position().y + 240.0);
    }

    #[test]
    fn config_out_of_bounds_keeps_derived_position() {
        let config = SceneConfig::from_toml_str(
            "focus = { x = 0.0, y = 0.0 }\n[viewport]\nallow_out_of_bounds = true\n",
        )
        .unwrap();
        let vp = Viewport::from_config(&config).unwrap();
        assert_eq!(vp.position(), V2f::new(-160.0, -120.0));
        assert_eq!(vp.initial_position(), V2f::new(-160.0, -120.0));
        assert_eq!(vp.camera().focus_point(), V2f::ZERO);
        assert!(vp.camera().overflow_allowed());
    }

    #[test]
    fn config_margin_applies_before_camera_is_placed() {
        let config = SceneConfig::from_toml_str("focus = { x = 0.0, y = 0.0 }\n[viewport]\nmargin = 10.0\n").unwrap();
        let vp = Viewport::from_config(&config).unwrap();
        assert_eq!(vp.position(), V2f::new(10.0, 10.0));
        assert_eq!(vp.camera().focus_point(), vp.center());
    }

    #[test]
    fn singular_matrix_gives_nan_world_point() {
        let config = SceneConfig::from_toml_str("[viewport]\nzoom_base = 0.001\n").unwrap();
        let mut vp = Viewport::from_config(&config).unwrap();
        vp.set_zoom(199);
        assert_eq!(vp.scale(), 0.0);
        assert!(!vp.matrix().is_invertible());
        assert!(vp.screen_to_world(V2f::new(10.0, 10.0)).is_nan());
    }
}
