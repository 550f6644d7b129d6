//! # Overlay
//!
//! Flat layer for HUD and menus. Nothing it draws is shifted; it is
//! composited on top of the screen as is.

use render::{Affine, Color, Surface, V2f, V2i};
use tracing::{debug, trace};
use crate::{config::SceneConfig, error::SceneError, layer::Layer};

/// Translucent tint that makes the overlay's extent visible in debug mode.
pub const DEBUG_TINT: Color = Color::argb8(64, 64, 220, 14);

pub struct Overlay<S: Surface> {
    view_size: V2i,
    image: S,
    auto_scaling: bool,
    debug: bool,
}

impl<S: Surface> Overlay<S> {
    pub fn new(view_size: V2i) -> Result<Self, SceneError> {
        if view_size.x <= 0 || view_size.y <= 0 {
            return Err(SceneError::Configuration(format!("overlay needs a positive size, got {}", view_size)));
        }
        debug!(view = %view_size, "overlay created");
        Ok(Self {
            view_size,
            image: S::with_dimensions(view_size.x, view_size.y),
            auto_scaling: true,
            debug: false,
        })
    }

    pub fn from_config(config: &SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;
        let mut overlay = Self::new(config.view.into())?;
        overlay.auto_scaling = config.overlay.auto_scaling;
        overlay.set_debug(config.overlay.debug);
        Ok(overlay)
    }

    pub fn view_size(&self) -> V2i { self.view_size }
    pub fn image(&self) -> &S { &self.image }
    pub fn image_mut(&mut self) -> &mut S { &mut self.image }
    pub fn is_debug(&self) -> bool { self.debug }

    pub fn set_auto_scaling(&mut self, enabled: bool) {
        self.auto_scaling = enabled;
    }

    /// Turning debug on tints the whole overlay once.
    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
        if enabled {
            self.image.fill(DEBUG_TINT);
        }
    }

    /// Rescales only when auto-scaling is off and the target size differs.
    pub fn render_matrix(&self, target_size: V2i) -> Affine {
        if !self.auto_scaling && target_size != self.view_size {
            Affine::scaling(
                target_size.x as f32 / self.view_size.x as f32,
                target_size.y as f32 / self.view_size.y as f32,
            )
        } else {
            Affine::IDENTITY
        }
    }
}

impl<S: Surface> Layer<S> for Overlay<S> {
    fn fill(&mut self, color: Color) {
        self.image.fill(color);
    }

    fn draw_image(&mut self, image: &S, transform: &Affine) {
        self.image.blit(image, transform);
    }

    fn draw_line(&mut self, p0: V2f, p1: V2f, color: Color) {
        self.image.draw_line(p0, p1, color);
    }

    fn draw_rect(&mut self, top_left: V2f, size: V2f, solid: bool, color: Color) {
        self.image.draw_rect(top_left, size, solid, color);
    }

    fn debug_print(&mut self, text: &str) {
        self.image.debug_print_at(text, V2i::new(0, 0));
    }

    fn debug_print_at(&mut self, text: &str, p: V2i) {
        self.image.debug_print_at(text, p);
    }

    fn draw_text(&mut self, text: &str, font: &S::Font, p: V2i, color: Color) {
        self.image.draw_text(text, font, p, color);
    }

    fn render(&mut self, target: &mut S) {
        let m = self.render_matrix(target.dim());
        trace!(?m, "overlay render");
        target.blit(&self.image, &m);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::{Command, Recorder};

    fn overlay() -> Overlay<Recorder> {
        Overlay::new(V2i::new(160, 120)).unwrap()
    }

    #[test]
    fn drawing_passes_through_untouched() {
        let mut overlay = overlay();
        overlay.draw_line(V2f::new(1.0, 2.0), V2f::new(3.0, 4.0), Color::WHITE);
        overlay.draw_text("score", &(), V2i::new(5, 6), Color::YELLOW);
        overlay.debug_print("menu");
        assert_eq!(
            overlay.image_mut().take(),
            vec![
                Command::Line(V2f::new(1.0, 2.0), V2f::new(3.0, 4.0), Color::WHITE),
                Command::Text { text: "score".into(), p: V2i::new(5, 6), color: Color::YELLOW },
                Command::DebugPrint { text: "menu".into(), p: V2i::new(0, 0) },
            ],
        );
    }

    #[test]
    fn default_render_does_not_rescale() {
        let mut overlay = overlay();
        let mut target = Recorder::with_dimensions(320, 240);
        overlay.render(&mut target);
        assert_eq!(target.blits(), vec![&Affine::IDENTITY]);
    }

    #[test]
    fn disabled_auto_scaling_stretches_to_target() {
        let mut overlay = overlay();
        overlay.set_auto_scaling(false);
        assert_eq!(overlay.render_matrix(V2i::new(320, 360)), Affine::scaling(2.0, 3.0));
        assert_eq!(overlay.render_matrix(V2i::new(160, 120)), Affine::IDENTITY);
    }

    #[test]
    fn debug_tints_overlay() {
        let mut overlay = overlay();
        overlay.set_debug(true);
        assert!(overlay.is_debug());
        assert_eq!(overlay.image_mut().take(), vec![Command::Fill(DEBUG_TINT)]);
    }

    #[test]
    fn empty_overlay_is_rejected() {
        assert!(Overlay::<Recorder>::new(V2i::new(0, 10)).is_err());
    }
}
