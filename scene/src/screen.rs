//! # Screen
//!
//! The world layer. Everything the game draws in world space goes onto an
//! internal surface the size of the world; [`Screen::render`] shows the part
//! the viewport looks at, shaken and scaled to the target.
//!
//! When the view covers the whole world there is no viewport. The surface
//! then gets a fixed padding on every side so shaking never reveals an edge.

use render::{debug_font, Affine, Color, Surface, V2f, V2i};
use tracing::{info, trace};
use crate::{
    config::SceneConfig,
    error::SceneError,
    layer::Layer,
    shaker::Shaker,
    viewport::Viewport,
};

/// Border, in pixels, added around the world in auto-padding mode.
pub const AUTO_PADDING: f32 = 32.0;

const FOCUS_BOX_COLOR: Color = Color::BLUE;

#[derive(Clone, Debug)]
enum Mode {
    Padded(f32),
    Viewport(Viewport),
}

pub struct Screen<S: Surface> {
    view_size: V2i,
    world_size: V2i,
    image: S,
    mode: Mode,
    shaker: Shaker,
    auto_scaling: bool,
    debug: bool,
    /// Pointer position in view space, shown in debug mode.
    pointer: Option<V2f>,
}

impl<S: Surface> Screen<S> {
    /// A viewport is required exactly when the view and world sizes differ.
    pub fn new(view_size: V2i, world_size: V2i, viewport: Option<Viewport>) -> Result<Self, SceneError> {
        Self::with_padding(view_size, world_size, viewport, AUTO_PADDING)
    }

    pub fn with_padding(
        view_size: V2i,
        world_size: V2i,
        viewport: Option<Viewport>,
        padding: f32,
    ) -> Result<Self, SceneError> {
        let fail = |msg: String| Err(SceneError::Configuration(msg));

        if view_size.x <= 0 || view_size.y <= 0 || world_size.x <= 0 || world_size.y <= 0 {
            return fail(format!("screen needs positive sizes, got view {} and world {}", view_size, world_size));
        }
        if !(padding >= 0.0) {
            return fail(format!("padding must not be negative, got {}", padding));
        }

        let mode = match viewport {
            None if view_size == world_size => Mode::Padded(padding.round()),
            None => {
                return fail(format!(
                    "view {} and world {} differ, a viewport is required",
                    view_size, world_size,
                ))
            },
            Some(_) if view_size == world_size => {
                return fail(format!("view and world are both {}, a viewport is not allowed", view_size))
            },
            Some(vp) => {
                if vp.view_size() != V2f::from(view_size) || vp.world_size() != V2f::from(world_size) {
                    return fail(format!(
                        "viewport sized for view {} and world {}, screen has {} and {}",
                        vp.view_size(), vp.world_size(), view_size, world_size,
                    ));
                }
                Mode::Viewport(vp)
            },
        };

        let image_size = match mode {
            Mode::Padded(p) => world_size + V2i::diag(2 * p as i32),
            Mode::Viewport(_) => world_size,
        };
        let image = S::with_dimensions(image_size.x, image_size.y);
        info!(view = %view_size, world = %world_size, surface = %image_size, padded = matches!(mode, Mode::Padded(_)), "screen created");

        Ok(Self {
            view_size,
            world_size,
            image,
            mode,
            shaker: Shaker::default(),
            auto_scaling: true,
            debug: false,
            pointer: None,
        })
    }

    pub fn from_config(config: &SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;
        let view_size = V2i::from(config.view);
        let world_size = V2i::from(config.world);
        let viewport = if view_size == world_size {
            None
        } else {
            Some(Viewport::from_config(config)?)
        };

        let mut screen = Self::with_padding(view_size, world_size, viewport, config.auto_padding)?;
        screen.shaker = Shaker::from_config(&config.shake);
        screen.auto_scaling = config.screen.auto_scaling;
        screen.debug = config.screen.debug;
        Ok(screen)
    }

    pub fn view_size(&self) -> V2i { self.view_size }
    pub fn world_size(&self) -> V2i { self.world_size }
    pub fn image(&self) -> &S { &self.image }
    pub fn image_mut(&mut self) -> &mut S { &mut self.image }
    pub fn shaker_mut(&mut self) -> &mut Shaker { &mut self.shaker }

    pub fn is_auto_padding(&self) -> bool {
        matches!(self.mode, Mode::Padded(_))
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        match &self.mode {
            Mode::Viewport(vp) => Some(vp),
            Mode::Padded(_) => None,
        }
    }

    pub fn viewport_mut(&mut self) -> Option<&mut Viewport> {
        match &mut self.mode {
            Mode::Viewport(vp) => Some(vp),
            Mode::Padded(_) => None,
        }
    }

    pub fn set_auto_scaling(&mut self, enabled: bool) {
        self.auto_scaling = enabled;
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    pub fn set_pointer(&mut self, pointer: Option<V2f>) {
        self.pointer = pointer;
    }

    pub fn shake(&mut self) {
        self.shaker.shake();
    }

    /// Fixed-rate tick.
    pub fn update(&mut self) {
        self.shaker.update();
    }

    /// Shift from screen-local coordinates to surface coordinates.
    pub fn offsets(&self) -> V2f {
        match &self.mode {
            Mode::Padded(p) => V2f::diag(*p),
            Mode::Viewport(vp) => vp.offsets(),
        }
    }

    /// Shift from world coordinates to surface coordinates.
    pub fn world_offsets(&self) -> V2f {
        match self.mode {
            Mode::Padded(p) => V2f::diag(p),
            Mode::Viewport(_) => V2f::ZERO,
        }
    }

    pub fn draw_world_image(&mut self, image: &S, transform: &Affine) {
        let off = self.world_offsets();
        self.image.blit(image, &transform.then(&Affine::translation(off.x, off.y)));
    }

    pub fn draw_world_line(&mut self, p0: V2f, p1: V2f, color: Color) {
        let off = self.world_offsets();
        self.image.draw_line(p0 + off, p1 + off, color);
    }

    pub fn draw_world_rect(&mut self, top_left: V2f, size: V2f, solid: bool, color: Color) {
        let off = self.world_offsets();
        self.image.draw_rect(top_left + off, size, solid, color);
    }

    /// Surface-to-target transform for a target of `target_size`.
    pub fn render_matrix(&self, target_size: V2i, shake: V2f) -> Affine {
        let mut m = Affine::translation(-shake.x, -shake.y);
        match &self.mode {
            Mode::Padded(p) => m.translate(-p, -p),
            Mode::Viewport(vp) => m.concat(&vp.matrix()),
        }
        if self.auto_scaling && target_size != self.view_size {
            m.scale(
                target_size.x as f32 / self.view_size.x as f32,
                target_size.y as f32 / self.view_size.y as f32,
            );
        }
        m
    }

    fn draw_debug_info(&mut self) {
        let vp = match &self.mode {
            Mode::Viewport(vp) => vp,
            Mode::Padded(_) => return,
        };
        let camera = vp.camera();
        let focus = camera.focus_box();

        let mut lines = vec![
            format!("viewport: {}", vp.position()),
            format!("camera: {}", camera.focus_point()),
            format!("focus: {}", focus.top_left()),
        ];
        if let Some(pointer) = self.pointer {
            let world = vp.screen_to_world(pointer);
            if world.is_nan() {
                lines.push("pointer: -".to_owned());
            } else {
                lines.push(format!("pointer: {}", world));
            }
        }

        self.image.draw_rect(focus.top_left(), focus.size(), false, FOCUS_BOX_COLOR);
        let origin = V2i::from(vp.offsets()) + V2i::diag(2);
        for (i, line) in lines.iter().enumerate() {
            let p = origin + V2i::new(0, i as i32 * debug_font::LINE_HEIGHT);
            self.image.debug_print_at(line, p);
        }
    }
}

impl<S: Surface> Layer<S> for Screen<S> {
    fn fill(&mut self, color: Color) {
        self.image.fill(color);
    }

    fn draw_image(&mut self, image: &S, transform: &Affine) {
        let off = self.offsets();
        self.image.blit(image, &transform.then(&Affine::translation(off.x, off.y)));
    }

    fn draw_line(&mut self, p0: V2f, p1: V2f, color: Color) {
        let off = self.offsets();
        self.image.draw_line(p0 + off, p1 + off, color);
    }

    fn draw_rect(&mut self, top_left: V2f, size: V2f, solid: bool, color: Color) {
        let off = self.offsets();
        self.image.draw_rect(top_left + off, size, solid, color);
    }

    fn debug_print(&mut self, text: &str) {
        self.image.debug_print_at(text, V2i::new(0, 0));
    }

    fn debug_print_at(&mut self, text: &str, p: V2i) {
        let off = V2i::from(self.offsets());
        self.image.debug_print_at(text, p + off);
    }

    fn draw_text(&mut self, text: &str, font: &S::Font, p: V2i, color: Color) {
        let off = V2i::from(self.offsets());
        self.image.draw_text(text, font, p + off, color);
    }

    /// Shake is sampled once per call.
    fn render(&mut self, target: &mut S) {
        let shake = self.shaker.offsets();
        if self.debug {
            self.draw_debug_info();
        }
        let m = self.render_matrix(target.dim(), shake);
        trace!(%shake, ?m, "screen render");
        target.blit(&self.image, &m);
    }
}
