use render::{Affine, Color, Surface, V2f, V2i};

/// A drawable layer that composites onto a target surface once per frame.
///
/// Layers are rendered in the order the caller keeps them in; later layers
/// end up on top.
pub trait Layer<S: Surface> {
    fn fill(&mut self, color: Color);
    fn draw_image(&mut self, image: &S, transform: &Affine);
    fn draw_line(&mut self, p0: V2f, p1: V2f, color: Color);
    fn draw_rect(&mut self, top_left: V2f, size: V2f, solid: bool, color: Color);
    /// Prints at the layer's top-left corner.
    fn debug_print(&mut self, text: &str);
    fn debug_print_at(&mut self, text: &str, p: V2i);
    fn draw_text(&mut self, text: &str, font: &S::Font, p: V2i, color: Color);
    fn render(&mut self, target: &mut S);
}
