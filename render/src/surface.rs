use crate::{
    color::Color,
    geom::{affine::Affine, vector::prelude::*},
};

/// A fixed-size pixel target that layers draw into and composite onto.
///
/// Coordinates are in pixels, origin top-left, y pointing down. Everything
/// drawn outside the surface is clipped.
pub trait Surface: Sized {
    /// Typeface handed to [`Surface::draw_text`].
    type Font;

    /// Panics if either dimension is not positive.
    fn with_dimensions(width: i32, height: i32) -> Self;

    fn width(&self) -> i32;
    fn height(&self) -> i32;

    fn dim(&self) -> V2i {
        V2i::new(self.width(), self.height())
    }

    fn fill(&mut self, color: Color);

    /// Composites `src` onto `self`, mapping source pixels through `transform`.
    /// A non-invertible transform draws nothing.
    fn blit(&mut self, src: &Self, transform: &Affine);

    fn draw_line(&mut self, p0: V2f, p1: V2f, color: Color);

    fn draw_rect(&mut self, top_left: V2f, size: V2f, solid: bool, color: Color);

    /// `p` is the top-left corner of the first glyph.
    fn draw_text(&mut self, text: &str, font: &Self::Font, p: V2i, color: Color);

    /// Prints with the built-in debug font.
    fn debug_print_at(&mut self, text: &str, p: V2i);
}
