use std::{
    collections::HashMap,
    path::Path,
};
use tracing::debug;
use crate::{
    bitmap::Bitmap,
    color::Color,
    error::RenderError,
    geom::vector::prelude::*,
};

const ALL_SYMBOLS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-_.,:;!?()/%+=";

/// Glyphs rasterised once at a fixed pixel height, stored as white
/// coverage masks and tinted when drawn.
//TODO: if height is smaller than 20, letters are barely visible
pub struct FontBitmaps {
    chars: HashMap<char, Bitmap>,
    height: i32,
}

impl FontBitmaps {
    pub fn height(&self) -> i32 { self.height }

    pub fn width(&self, s: &str) -> i32 {
        s.chars().map(|c| self.advance(c)).sum()
    }

    /// Draws string of text to the dst `Bitmap`
    ///
    /// Returns width of drawn string in pixels
    pub fn draw_string(&self, dst: &mut Bitmap, V2i { x, y }: V2i, s: &str, color: Color) -> i32 {
        let mut current_x = x;
        for c in s.chars() {
            if let Some(bmp) = self.chars.get(&c) {
                for gy in 0..bmp.height() {
                    for gx in 0..bmp.width() {
                        let coverage = Color::from(bmp[(gx, gy)]).a() as u32;
                        if coverage != 0 {
                            let alpha = (coverage * color.a() as u32 / 255) as u8;
                            dst.blend_pixel(current_x + gx, y + gy, color.with_alpha(alpha));
                        }
                    }
                }
            }
            current_x += self.advance(c);
        }
        current_x - x
    }

    fn advance(&self, c: char) -> i32 {
        self.chars.get(&c).map_or(self.height / 2, Bitmap::width)
    }

    pub fn new(filepath: impl AsRef<Path>, height: i32) -> Result<Self, RenderError> {
        let file = crate::file::read_entire_file(filepath.as_ref())?;
        let font = rusttype::Font::try_from_vec(file).ok_or_else(|| {
            RenderError::Font(format!("{} is not a TrueType font", filepath.as_ref().display()))
        })?;
        Ok(Self::from_font(&font, height))
    }

    pub fn from_font(font: &rusttype::Font<'_>, height: i32) -> Self {
        use rusttype::{point, PositionedGlyph, Scale};

        let scale = Scale::uniform(height as f32);

        // The origin of a line of text is at the baseline (roughly where
        // non-descending letters sit). We don't want to clip the text, so we shift
        // it down with an offset when laying it out. v_metrics.ascent is the
        // distance between the baseline and the highest edge of any glyph in
        // the font. That's enough to guarantee that there's no clipping.
        let v_metrics = font.v_metrics(scale);
        let offset = point(0.0, v_metrics.ascent);

        let glyphs: Vec<PositionedGlyph<'_>> = font.layout(ALL_SYMBOLS, scale, offset).collect();

        let mut char_bitmaps = HashMap::new();
        for (g, ch) in glyphs.iter().zip(ALL_SYMBOLS.chars()) {
            let advance = g.unpositioned().h_metrics().advance_width.ceil().max(1.0) as i32;
            let origin_x = g.position().x.floor() as i32;
            let mut bmp = Bitmap::with_dimensions(advance, height);
            if let Some(bbox) = g.pixel_bounding_box() {
                g.draw(|x, y, v| {
                    let x = x as i32 + bbox.min.x - origin_x;
                    let y = y as i32 + bbox.min.y;
                    // glyphs may still overhang their advance box
                    if bmp.in_bounds(x, y) {
                        bmp[(x, y)] = Color::argb(v, 1.0, 1.0, 1.0).into();
                    }
                });
            }
            char_bitmaps.insert(ch, bmp);
        }
        let space = Bitmap::with_dimensions((height / 2).max(1), height);
        char_bitmaps.insert(' ', space);

        debug!(glyphs = char_bitmaps.len(), height, "rasterised font");
        Self {
            chars: char_bitmaps,
            height,
        }
    }
}
