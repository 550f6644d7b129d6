//! Surface that remembers what was drawn on it.

use render::{Affine, Color, Surface, V2f, V2i};

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Fill(Color),
    Blit { src: V2i, transform: Affine },
    Line(V2f, V2f, Color),
    Rect { top_left: V2f, size: V2f, solid: bool, color: Color },
    Text { text: String, p: V2i, color: Color },
    DebugPrint { text: String, p: V2i },
}

#[derive(Clone, Debug)]
pub struct Recorder {
    width: i32,
    height: i32,
    pub commands: Vec<Command>,
}

impl Recorder {
    pub fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn blits(&self) -> Vec<&Affine> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Blit { transform, .. } => Some(transform),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recorder {
    type Font = ();

    fn with_dimensions(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0);
        Self { width, height, commands: Vec::new() }
    }

    fn width(&self) -> i32 { self.width }
    fn height(&self) -> i32 { self.height }

    fn fill(&mut self, color: Color) {
        self.commands.push(Command::Fill(color));
    }

    fn blit(&mut self, src: &Self, transform: &Affine) {
        self.commands.push(Command::Blit { src: src.dim(), transform: *transform });
    }

    fn draw_line(&mut self, p0: V2f, p1: V2f, color: Color) {
        self.commands.push(Command::Line(p0, p1, color));
    }

    fn draw_rect(&mut self, top_left: V2f, size: V2f, solid: bool, color: Color) {
        self.commands.push(Command::Rect { top_left, size, solid, color });
    }

    fn draw_text(&mut self, text: &str, _font: &(), p: V2i, color: Color) {
        self.commands.push(Command::Text { text: text.to_owned(), p, color });
    }

    fn debug_print_at(&mut self, text: &str, p: V2i) {
        self.commands.push(Command::DebugPrint { text: text.to_owned(), p });
    }
}
